//! IDERA geographic-object validator CLI.
//!
//! Drives the conversion wizard non-interactively: every operator
//! decision (file, output CRS, catalog object, attribute mapping, bulk
//! value assignment) arrives as a flag, and the result is a zipped
//! shapefile bundle aligned to the selected catalog object.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "idera")]
#[command(about = "GeoJSON to IDERA-aligned shapefile converter")]
struct Args {
    /// Catalog document path
    #[arg(short, long, default_value = "data/catalog.json", env = "IDERA_CATALOG")]
    catalog: String,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the catalog: classes, subclasses and objects
    Catalog {
        /// Show one object's definition and attribute schema
        #[arg(long)]
        object: Option<String>,
    },

    /// Inspect a GeoJSON file: records, geometry kind, CRS, columns
    Inspect {
        /// GeoJSON file to inspect
        input: String,
    },

    /// Print fuzzy source-column suggestions for an object's attributes
    Suggest {
        /// GeoJSON file to match against
        input: String,

        /// Geographic object code
        #[arg(long)]
        object: String,
    },

    /// Run the full pipeline and write the zip bundle
    Convert {
        /// GeoJSON file to convert
        input: String,

        /// Geographic object code
        #[arg(long)]
        object: String,

        /// Output CRS, e.g. EPSG:5344 (omit to keep the original)
        #[arg(long)]
        crs: Option<String>,

        /// Attribute to source-column assignment (repeatable)
        #[arg(long = "map", value_name = "ATTR=COLUMN")]
        map: Vec<String>,

        /// Accept fuzzy suggestions for attributes not covered by --map
        #[arg(long)]
        suggest: bool,

        /// Bulk value for a clean-table column (repeatable)
        #[arg(long = "set", value_name = "ATTR=VALUE")]
        set: Vec<String>,

        /// Single-cell edit on the clean table (repeatable)
        #[arg(long = "set-cell", value_name = "RECORD:ATTR=VALUE")]
        set_cell: Vec<String>,

        /// Directory the zip bundle is written to
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Fatal when unreadable or malformed: no catalog, no valid objects.
    let catalog = catalog::load_catalog(&args.catalog)?;

    match args.command {
        Command::Catalog { object } => commands::browse_catalog(&catalog, object.as_deref()),
        Command::Inspect { input } => commands::inspect(&input),
        Command::Suggest { input, object } => commands::suggest(&catalog, &input, &object),
        Command::Convert {
            input,
            object,
            crs,
            map,
            suggest,
            set,
            set_cell,
            output_dir,
        } => commands::convert(
            &catalog,
            commands::ConvertOptions {
                input,
                object,
                crs,
                map,
                suggest,
                set,
                set_cell,
                output_dir,
            },
        ),
    }
}
