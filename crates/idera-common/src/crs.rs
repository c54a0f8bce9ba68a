//! Coordinate Reference System codes.
//!
//! The output CRS list is fixed: POSGAR 2007 (geographic and the seven
//! Gauss-Krüger fajas) plus WGS 84. Everything else is "keep original".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IderaError;

/// Well-known CRS codes the tool can reproject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// POSGAR 2007 Geographic
    Epsg5340,
    /// POSGAR 2007 / Argentina 1 (Gauss-Krüger faja 1)
    Epsg5343,
    /// POSGAR 2007 / Argentina 2
    Epsg5344,
    /// POSGAR 2007 / Argentina 3
    Epsg5345,
    /// POSGAR 2007 / Argentina 4
    Epsg5346,
    /// POSGAR 2007 / Argentina 5
    Epsg5347,
    /// POSGAR 2007 / Argentina 6
    Epsg5348,
    /// POSGAR 2007 / Argentina 7
    Epsg5349,
}

impl CrsCode {
    /// All selectable output CRSs, in menu order.
    pub fn all() -> [CrsCode; 9] {
        [
            CrsCode::Epsg5340,
            CrsCode::Epsg5343,
            CrsCode::Epsg5344,
            CrsCode::Epsg5345,
            CrsCode::Epsg5346,
            CrsCode::Epsg5347,
            CrsCode::Epsg5348,
            CrsCode::Epsg5349,
            CrsCode::Epsg4326,
        ]
    }

    /// Numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg5340 => 5340,
            CrsCode::Epsg5343 => 5343,
            CrsCode::Epsg5344 => 5344,
            CrsCode::Epsg5345 => 5345,
            CrsCode::Epsg5346 => 5346,
            CrsCode::Epsg5347 => 5347,
            CrsCode::Epsg5348 => 5348,
            CrsCode::Epsg5349 => 5349,
        }
    }

    /// Look up a supported code by its EPSG number.
    pub fn from_epsg(epsg: u32) -> Option<CrsCode> {
        CrsCode::all().into_iter().find(|c| c.epsg() == epsg)
    }

    /// Parse an operator-supplied CRS string.
    ///
    /// Accepts "EPSG:5344", "epsg:5344" or a bare "5344".
    pub fn parse(s: &str) -> Result<CrsCode, IderaError> {
        let upper = s.trim().to_uppercase();
        let code = upper
            .strip_prefix("EPSG:")
            .unwrap_or(&upper)
            .parse::<u32>()
            .map_err(|_| IderaError::UnsupportedCrs(s.to_string()))?;

        CrsCode::from_epsg(code).ok_or_else(|| IderaError::UnsupportedCrs(s.to_string()))
    }

    /// Check if this is a geographic (lat/lon, degrees) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326 | CrsCode::Epsg5340)
    }

    /// Human-readable name, as shown in the CRS menu.
    pub fn description(&self) -> &'static str {
        match self {
            CrsCode::Epsg4326 => "WGS 84",
            CrsCode::Epsg5340 => "POSGAR 2007",
            CrsCode::Epsg5343 => "POSGAR 2007 / Argentina 1",
            CrsCode::Epsg5344 => "POSGAR 2007 / Argentina 2",
            CrsCode::Epsg5345 => "POSGAR 2007 / Argentina 3",
            CrsCode::Epsg5346 => "POSGAR 2007 / Argentina 4",
            CrsCode::Epsg5347 => "POSGAR 2007 / Argentina 5",
            CrsCode::Epsg5348 => "POSGAR 2007 / Argentina 6",
            CrsCode::Epsg5349 => "POSGAR 2007 / Argentina 7",
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(CrsCode::parse("EPSG:5344").unwrap(), CrsCode::Epsg5344);
        assert_eq!(CrsCode::parse("epsg:4326").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("5349").unwrap(), CrsCode::Epsg5349);
        assert!(CrsCode::parse("EPSG:99999").is_err());
        assert!(CrsCode::parse("not-a-crs").is_err());
    }

    #[test]
    fn test_geographic_flag() {
        assert!(CrsCode::Epsg4326.is_geographic());
        assert!(CrsCode::Epsg5340.is_geographic());
        assert!(!CrsCode::Epsg5344.is_geographic());
    }

    #[test]
    fn test_epsg_round_trip() {
        for code in CrsCode::all() {
            assert_eq!(CrsCode::from_epsg(code.epsg()), Some(code));
        }
    }
}
