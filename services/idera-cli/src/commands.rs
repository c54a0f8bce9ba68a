//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use catalog::Catalog;
use feature_table::read_geojson_file;
use idera_common::{CrsCode, FieldValue};
use pipeline::Session;

/// List the catalog tree, or one object's full definition.
pub fn browse_catalog(catalog: &Catalog, object: Option<&str>) -> Result<()> {
    if let Some(code) = object {
        let og = catalog
            .find_object(code)
            .ok_or_else(|| anyhow!("object {code} not found in catalog"))?;

        println!("{} – {}", og.code, og.name);
        if !og.definition.is_empty() {
            println!("  {}", og.definition);
        }
        let kinds: Vec<String> = og.geometry.iter().map(|k| k.to_string()).collect();
        println!("  geometry: {}", kinds.join(", "));
        println!("  attributes:");
        for attr in &og.attributes {
            let flag = if attr.mandatory { " (mandatory)" } else { "" };
            println!("    {}{}", attr.name, flag);
        }
        return Ok(());
    }

    for class in &catalog.classes {
        println!("{} – {}", class.code, class.name);
        for subclass in &class.subclasses {
            println!("  {} – {}", subclass.code, subclass.name);
            for og in &subclass.objects {
                println!("    {} – {}", og.code, og.name);
            }
        }
    }
    Ok(())
}

/// Report what an uploaded file contains before any processing.
pub fn inspect(input: &str) -> Result<()> {
    let table = read_geojson_file(input)?;

    println!("records:  {}", table.len());
    let kinds: Vec<String> = table.geometry_kinds().iter().map(|k| k.to_string()).collect();
    println!(
        "geometry: {}",
        if kinds.is_empty() { "none".into() } else { kinds.join(", ") }
    );
    match table.crs() {
        Some(epsg) => println!("crs:      EPSG:{epsg}"),
        None => println!("crs:      undefined"),
    }
    println!("columns:  {}", table.columns().join(", "));
    Ok(())
}

/// Print the fuzzy mapping suggestions for one object.
pub fn suggest(catalog: &Catalog, input: &str, object: &str) -> Result<()> {
    let mut session = Session::open(read_geojson_file(input)?);
    session.select_object(catalog, object)?;

    for suggestion in session.suggestions(catalog)? {
        match suggestion.column {
            Some(column) => println!(
                "{} <- {} (similarity {:.2})",
                suggestion.attribute, column, suggestion.score
            ),
            None => println!("{} <- (unassigned)", suggestion.attribute),
        }
    }
    Ok(())
}

/// Inputs for a full conversion run.
pub struct ConvertOptions {
    pub input: String,
    pub object: String,
    pub crs: Option<String>,
    pub map: Vec<String>,
    pub suggest: bool,
    pub set: Vec<String>,
    pub set_cell: Vec<String>,
    pub output_dir: String,
}

/// The whole wizard in one shot: reproject, normalize, map, edit,
/// validate, export.
pub fn convert(catalog: &Catalog, options: ConvertOptions) -> Result<()> {
    let table = read_geojson_file(&options.input)?;
    println!("loaded {} record(s) from {}", table.len(), options.input);

    let mut session = Session::open(table);

    let target = options
        .crs
        .as_deref()
        .map(CrsCode::parse)
        .transpose()?;
    session.reproject(target)?;
    if let Some(target) = target {
        println!("reprojected to {target} ({})", target.description());
    }

    let og = session.select_object(catalog, &options.object)?;
    println!("object: {} – {}", og.code, og.name);
    session.normalize(catalog)?;

    let mut mapping = session.empty_mapping(catalog)?;
    if options.suggest {
        for suggestion in session.suggestions(catalog)? {
            if let Some(column) = suggestion.column {
                mapping.assign(&suggestion.attribute, &column)?;
            }
        }
    }
    for pair in &options.map {
        let (attribute, column) = parse_pair(pair)?;
        mapping.assign(attribute, column)?;
    }
    session.confirm_mapping(catalog, mapping)?;

    for pair in &options.set {
        let (column, value) = parse_pair(pair)?;
        session.fill_column(column, parse_value(value))?;
    }
    for edit in &options.set_cell {
        let (record, assignment) = edit
            .split_once(':')
            .ok_or_else(|| anyhow!("expected RECORD:ATTR=VALUE, got '{edit}'"))?;
        let record: usize = record
            .parse()
            .with_context(|| format!("record index in '{edit}'"))?;
        let (column, value) = parse_pair(assignment)?;
        session.edit_cell(record, column, parse_value(value))?;
    }

    let violations = session.validate(catalog)?;
    if !violations.is_empty() {
        eprintln!("validation failed:");
        for violation in &violations {
            eprintln!("  - {violation}");
        }
        bail!("{} validation violation(s)", violations.len());
    }

    let bundle = session.export(catalog)?;
    let path = Path::new(&options.output_dir).join(&bundle.file_name);
    fs::write(&path, &bundle.data)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("wrote {}", path.display());
    Ok(())
}

/// Split an `attr=value` flag.
fn parse_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| anyhow!("expected ATTR=VALUE, got '{pair}'"))
}

/// Interpret a bulk-assignment value the way JSON would.
fn parse_value(raw: &str) -> FieldValue {
    if raw.is_empty() || raw == "null" {
        FieldValue::Null
    } else if let Ok(i) = raw.parse::<i64>() {
        FieldValue::Integer(i)
    } else if let Ok(r) = raw.parse::<f64>() {
        FieldValue::Real(r)
    } else if let Ok(b) = raw.parse::<bool>() {
        FieldValue::Bool(b)
    } else {
        FieldValue::Text(raw.to_string())
    }
}
