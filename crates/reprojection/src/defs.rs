//! CRS definition tables.
//!
//! One proj4 string (consumed by proj4rs) and one `.prj` WKT per
//! supported CRS. POSGAR 2007 fajas are Gauss-Krüger zones: central
//! meridian -72° + 3° per faja, false easting faja·1_000_000 + 500_000.

use idera_common::CrsCode;

/// proj4 definition string for a supported CRS.
pub fn proj_string(code: CrsCode) -> &'static str {
    match code {
        CrsCode::Epsg4326 => "+proj=longlat +datum=WGS84 +no_defs",
        CrsCode::Epsg5340 => "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs",
        CrsCode::Epsg5343 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-72 +k=1 +x_0=1500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
        CrsCode::Epsg5344 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-69 +k=1 +x_0=2500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
        CrsCode::Epsg5345 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-66 +k=1 +x_0=3500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
        CrsCode::Epsg5346 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-63 +k=1 +x_0=4500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
        CrsCode::Epsg5347 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-60 +k=1 +x_0=5500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
        CrsCode::Epsg5348 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-57 +k=1 +x_0=6500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
        CrsCode::Epsg5349 => {
            "+proj=tmerc +lat_0=-90 +lon_0=-54 +k=1 +x_0=7500000 +y_0=0 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"
        }
    }
}

const POSGAR_GEOGCS: &str = "GEOGCS[\"GCS_POSGAR_2007\",DATUM[\"D_POSGAR_2007\",\
SPHEROID[\"GRS_1980\",6378137.0,298.257222101]],PRIMEM[\"Greenwich\",0.0],\
UNIT[\"Degree\",0.0174532925199433]]";

/// ESRI WKT written to the exported `.prj` file.
pub fn prj_wkt(code: CrsCode) -> String {
    match code {
        CrsCode::Epsg4326 => "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
             SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],\
             UNIT[\"Degree\",0.0174532925199433]]"
            .to_string(),
        CrsCode::Epsg5340 => POSGAR_GEOGCS.to_string(),
        faja => {
            let zone = faja.epsg() - 5342;
            let central_meridian = -72.0 + 3.0 * (zone as f64 - 1.0);
            let false_easting = zone as f64 * 1_000_000.0 + 500_000.0;
            format!(
                "PROJCS[\"POSGAR_2007_Argentina_{zone}\",{POSGAR_GEOGCS},\
                 PROJECTION[\"Gauss_Kruger\"],\
                 PARAMETER[\"False_Easting\",{false_easting:.1}],\
                 PARAMETER[\"False_Northing\",0.0],\
                 PARAMETER[\"Central_Meridian\",{central_meridian:.1}],\
                 PARAMETER[\"Scale_Factor\",1.0],\
                 PARAMETER[\"Latitude_Of_Origin\",-90.0],\
                 UNIT[\"Meter\",1.0]]"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faja_parameters() {
        let wkt = prj_wkt(CrsCode::Epsg5344);
        assert!(wkt.contains("Argentina_2"));
        assert!(wkt.contains("False_Easting\",2500000.0"));
        assert!(wkt.contains("Central_Meridian\",-69.0"));
    }

    #[test]
    fn test_proj_strings_cover_every_code() {
        for code in CrsCode::all() {
            assert!(proj_string(code).starts_with("+proj="));
            assert!(!prj_wkt(code).is_empty());
        }
    }
}
