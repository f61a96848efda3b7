use std::{fs, path::PathBuf};

use arctic_navigator::{
    calculate_routes,
    config::{GeneratorConfig, parse_interior_steps},
    hazard::HazardField,
    models::{FeatureCollection, GeoPoint, HazardSource},
    validate_coordinate,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Plan safe and optimal Arctic routes between two points and print them as JSON"
)]
struct Args {
    #[arg(long, allow_hyphen_values = true)]
    start_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    start_lon: f64,
    #[arg(long, allow_hyphen_values = true)]
    end_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    end_lon: f64,

    /// GeoJSON FeatureCollection of ice zones to route around
    #[arg(long)]
    ice: Option<PathBuf>,

    /// Interpolation steps between start and end (1..=500)
    #[arg(long, default_value_t = 20, value_parser = parse_interior_steps)]
    steps: usize,

    /// Directory where `safe.gpx` and `optimal.gpx` are written
    #[arg(long)]
    gpx_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let start = GeoPoint::new(args.start_lat, args.start_lon);
    let end = GeoPoint::new(args.end_lat, args.end_lon);
    validate_coordinate("start", start)?;
    validate_coordinate("end", end)?;

    let (hazards, hazard_source) = match &args.ice {
        Some(path) => {
            let ice: FeatureCollection = serde_json::from_str(&fs::read_to_string(path)?)?;
            let hazards = HazardField::from_feature_collection(&ice)?;
            tracing::info!("loaded {} ice zones from {:?}", hazards.len(), path);
            (hazards, HazardSource::Request)
        }
        None => (HazardField::empty(), HazardSource::None),
    };

    let generator = GeneratorConfig::default().with_interior_steps(args.steps);
    let response = calculate_routes(start, end, &hazards, hazard_source, &generator)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Some(dir) = &args.gpx_dir {
        fs::create_dir_all(dir)?;
        for route in [&response.safe, &response.optimal] {
            let path = dir.join(format!("{}.gpx", route.policy));
            fs::write(&path, BASE64.decode(&route.gpx_base64)?)?;
            tracing::info!("wrote {} route to {:?}", route.policy, path);
        }
    }

    Ok(())
}
