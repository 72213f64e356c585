use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tunnelmap::config::init_logging;
use tunnelmap::survey::format::{format_degrees, format_distance};
use tunnelmap::survey::records::{read_boreholes_from_path, write_report};
use tunnelmap::{
    evaluate, CrsCatalog, CrsRegistry, PlanarPoint, ProjectKind, Result, SurveyReport, SurveyRequest,
    Transformer,
};

#[derive(Debug, Parser)]
#[command(name = "tunnelmap", about = "Boreholes relative to a tunnel alignment", version)]
struct Cli {
    /// JSON file with the coordinate system catalog
    #[arg(long, global = true, env = "TUNNELMAP_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists the known coordinate systems
    Catalog,

    /// Converts one planar coordinate to latitude/longitude
    Reproject {
        /// Catalog name or AUTHORITY:CODE of the input
        #[arg(long)]
        crs: String,
        /// Catalog name or AUTHORITY:CODE of the output; must be geographic
        #[arg(long, default_value = "EPSG:4326")]
        target: String,
        x: f64,
        y: f64,
    },

    /// Evaluates a survey request stored as JSON
    Survey {
        #[arg(long)]
        input: PathBuf,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Evaluates boreholes from a CSV file with Name,X,Y columns
    Boreholes {
        #[arg(long)]
        crs: String,
        #[arg(long)]
        csv: PathBuf,
        /// Tunnel vertex as `x,y`; repeat for each vertex
        #[arg(long = "alignment", value_parser = parse_point)]
        alignment: Vec<PlanarPoint>,
        /// Geographic system for display positions
        #[arg(long, default_value = "EPSG:4326")]
        target: String,
    },
}

fn parse_point(value: &str) -> std::result::Result<PlanarPoint, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", value))?;

    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{}': {}", value, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{}': {}", value, e))?;

    Ok(PlanarPoint::new(x, y))
}

fn print_report(report: &SurveyReport) {
    println!("Input CRS: {}  Display CRS: {}", report.crs, report.target);
    println!(
        "Map center: {}, {}",
        format_degrees(report.center.lat),
        format_degrees(report.center.lon)
    );

    if let Some(alignment) = &report.alignment {
        println!(
            "Tunnel: start ({}, {}) end ({}, {}) length {}",
            format_degrees(alignment.start.lat),
            format_degrees(alignment.start.lon),
            format_degrees(alignment.end.lat),
            format_degrees(alignment.end.lon),
            format_distance(alignment.length)
        );
    }

    for borehole in &report.boreholes {
        println!();
        println!("{}", borehole.summary());
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => CrsCatalog::load(path)?,
        None => CrsCatalog::default(),
    };
    let registry = CrsRegistry::default();

    match cli.command {
        Command::Catalog => {
            for entry in catalog.entries() {
                println!("{:<28} {}", entry.name, entry.code);
            }
        }
        Command::Reproject { crs, target, x, y } => {
            let from = catalog.resolve(&crs)?;
            let to = catalog.resolve(&target)?;
            let geo = Transformer::with_registry(&from, &to, &registry)?.reproject(PlanarPoint::new(x, y))?;
            println!("Lat: {}", format_degrees(geo.lat));
            println!("Lon: {}", format_degrees(geo.lon));
        }
        Command::Survey { input, csv } => {
            let request: SurveyRequest = serde_json::from_str(&std::fs::read_to_string(input)?)?;
            let report = evaluate(&request, &registry)?;
            if csv {
                write_report(&report, std::io::stdout())?;
            } else {
                print_report(&report);
            }
        }
        Command::Boreholes {
            crs,
            csv,
            alignment,
            target,
        } => {
            let kind = if alignment.is_empty() {
                ProjectKind::Offshore
            } else {
                ProjectKind::TunnelBoring
            };

            let request = SurveyRequest {
                kind,
                crs: catalog.resolve(&crs)?,
                target: catalog.resolve(&target)?,
                alignment,
                boreholes: read_boreholes_from_path(csv)?,
            };

            let report = evaluate(&request, &registry)?;
            print_report(&report);
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
