use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use tracing::{info, warn};
use tripline::{
    ClockPolicy, ErrorMode, OutputShape, TripGenerator, TripParams, Trips, trip::TripSummary,
};

use crate::{
    file_utils::{is_geojson, output_file_for, read_folder},
    geojson_input::{InputProperties, read_paths},
    parsers,
};

#[derive(Args)]
pub struct TripsArgs {
    /// GeoJSON file, or folder of GeoJSON files processed as separate batches
    #[arg(short, long)]
    input: PathBuf,

    /// Output file, or folder when the input is a folder. Stdout when unset.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file of trip params, overridden by the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Speed in meters per second
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long)]
    source_crs: Option<String>,

    #[arg(long)]
    target_crs: Option<String>,

    /// Epoch seconds or RFC 3339 timestamp
    #[arg(long, value_parser = parsers::parse_start_time)]
    start_time: Option<i64>,

    #[arg(long)]
    policy: Option<ClockPolicy>,

    #[arg(long)]
    shape: Option<OutputShape>,

    #[arg(long, default_value = "offset_distance")]
    offset_property: String,

    /// Feature property used as path id instead of the feature id
    #[arg(long)]
    id_property: Option<String>,

    /// Leave failing paths out instead of failing the batch
    #[arg(long)]
    skip_invalid: bool,

    /// Print a summary table of every batch
    #[arg(long)]
    summary: bool,

    #[arg(long)]
    pretty: bool,
}

impl TripsArgs {
    fn params(&self) -> Result<TripParams, anyhow::Error> {
        let mut params = match &self.config {
            Some(config) => {
                let content = std::fs::read_to_string(config)
                    .with_context(|| format!("Cannot read config {}", config.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config {}", config.display()))?
            }
            None => TripParams::default(),
        };

        if let Some(speed) = self.speed {
            params.speed_m_per_s = Some(speed);
        }
        if let Some(source_crs) = &self.source_crs {
            params.source_crs = Some(source_crs.clone());
        }
        if let Some(target_crs) = &self.target_crs {
            params.target_crs = Some(target_crs.clone());
        }
        if let Some(start_time) = self.start_time {
            params.start_time = Some(start_time);
        }
        if let Some(policy) = self.policy {
            params.clock_policy = policy;
        }
        if let Some(shape) = self.shape {
            params.output_shape = shape;
        }
        if self.skip_invalid {
            params.error_mode = ErrorMode::Skip;
        }

        Ok(params)
    }

    fn input_properties(&self) -> InputProperties {
        InputProperties {
            offset_property: self.offset_property.clone(),
            id_property: self.id_property.clone(),
        }
    }
}

pub fn run(args: TripsArgs) -> Result<(), anyhow::Error> {
    let params = args.params()?;
    let generator = TripGenerator::from_params(&params)?;
    let properties = args.input_properties();

    if !args.input.exists() {
        anyhow::bail!("Input not found: {}", args.input.display());
    }

    if args.input.is_file() {
        let trips = process_file(&generator, &args.input, &properties)?;
        write_trips(&trips, args.output.as_deref(), args.pretty)?;
        if args.summary {
            print_summary(&[(args.input.clone(), trips.summary)]);
        }
        return Ok(());
    }

    let Some(output) = &args.output else {
        anyhow::bail!("An output folder is required when the input is a folder");
    };
    std::fs::create_dir_all(output)?;

    let mut summaries = Vec::new();
    let files = read_folder(&args.input)
        .with_context(|| format!("Cannot read input folder {}", args.input.display()))?;
    for path in files {
        if !is_geojson(&path) {
            continue;
        }

        let trips = process_file(&generator, &path, &properties)?;
        let out = output_file_for(&path, output);
        write_trips(&trips, Some(&out), args.pretty)?;
        info!("Wrote {}", out.display());
        summaries.push((path, trips.summary));
    }

    if args.summary {
        print_summary(&summaries);
    }

    Ok(())
}

/// Runs the paths of one file as a batch with its own clock.
pub fn process_file(
    generator: &TripGenerator,
    path: &Path,
    properties: &InputProperties,
) -> Result<Trips, anyhow::Error> {
    info!("Processing {}", path.display());
    let paths = read_paths(path, properties)?;
    let trips = generator
        .generate(&paths)
        .with_context(|| format!("Cannot generate trips for {}", path.display()))?;

    for skipped in &trips.skipped {
        warn!(
            "{}: skipped path {} ({}): {}",
            path.display(),
            skipped.index,
            skipped.id.as_deref().unwrap_or("no id"),
            skipped.error
        );
    }

    Ok(trips)
}

fn write_trips(trips: &Trips, output: Option<&Path>, pretty: bool) -> Result<(), anyhow::Error> {
    let json = if pretty {
        serde_json::to_string_pretty(&trips.output)?
    } else {
        serde_json::to_string(&trips.output)?
    };

    match output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(output, json)?;
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn summary_table(summaries: &[(PathBuf, TripSummary)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["File", "Paths", "Waypoints", "Skipped", "Earliest", "Latest"]);

    let timestamp = |value: Option<i64>| value.map(|value| value.to_string()).unwrap_or_default();

    for (path, summary) in summaries {
        table.add_row(vec![
            path.display().to_string(),
            summary.paths.to_string(),
            summary.waypoints.to_string(),
            summary.skipped.to_string(),
            timestamp(summary.earliest_timestamp),
            timestamp(summary.latest_timestamp),
        ]);
    }

    table
}

fn print_summary(summaries: &[(PathBuf, TripSummary)]) {
    eprintln!("{}", summary_table(summaries));
}
