// src/main.rs

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sierpinski_gasket::config::GasketConfig;
use sierpinski_gasket::export::{self, PointWriter};
use sierpinski_gasket::generator::{PointGenerator, SeedStrategy, UniformSelector};
use sierpinski_gasket::geometry::Point2;
use sierpinski_gasket::retained::{draw_immediate, PresentationMode, RetainedPoints};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for export::Format {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => export::Format::Csv,
            Format::Json => export::Format::Json,
        }
    }
}

/// Generates Sierpinski gasket points by random midpoint walking.
#[derive(Parser, Debug)]
#[command(name = "gasket", version)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of points to generate after the seed
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// RNG seed for a reproducible walk
    #[arg(long)]
    rng_seed: Option<u64>,

    /// edge-midpoints, random-interior, or an explicit X,Y
    #[arg(long, allow_hyphen_values = true)]
    origin: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file, stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_origin(origin: &str) -> anyhow::Result<SeedStrategy> {
    match origin {
        "edge-midpoints" => Ok(SeedStrategy::EdgeMidpoints),
        "random-interior" => Ok(SeedStrategy::RandomInterior),
        other => {
            let Some((x, y)) = other.split_once(',') else {
                bail!("unrecognised origin {:?}", other);
            };
            let x: f32 = x.trim().parse().with_context(|| format!("bad origin x {:?}", x))?;
            let y: f32 = y.trim().parse().with_context(|| format!("bad origin y {:?}", y))?;
            Ok(SeedStrategy::Fixed(Point2::new(x, y)))
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GasketConfig::load(path)?,
        None => GasketConfig::default(),
    };
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(seed) = args.rng_seed {
        config.rng_seed = Some(seed);
    }
    if let Some(origin) = &args.origin {
        config.seed_strategy = parse_origin(origin)?;
    }

    let (triangle, count) = config.validate()?;
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let seed = config.seed_strategy.resolve(&triangle, &mut rng);
    let mut selector = UniformSelector::new(rng);

    let out: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let destination = args
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    let mut writer = PointWriter::new(out, args.format.into())
        .with_context(|| format!("writing {}", destination))?;

    info!("walking {} steps from ({}, {})", count, seed.x, seed.y);
    let written = match config.presentation {
        PresentationMode::Immediate => {
            // nothing is kept: each point goes to the writer as it is computed
            let mut sink_result = Ok(());
            draw_immediate(&triangle, count, seed, &mut selector, config.color, |v| {
                if sink_result.is_ok() {
                    sink_result = writer.write_point(&v.point());
                }
            })?;
            sink_result.with_context(|| format!("writing {}", destination))?;
            writer.finish()
        }
        mode => {
            let sequence = PointGenerator::generate_with(&triangle, count, seed, &mut selector)?;
            let mut retained = RetainedPoints::new(mode, sequence, config.color)?;
            retained.redraw();
            info!(
                "{} of {} vertices inside clip space ({} bytes staged)",
                retained.visible_count(),
                retained.vertices().len(),
                retained.as_bytes().len()
            );
            for p in retained.source() {
                writer
                    .write_point(p)
                    .with_context(|| format!("writing {}", destination))?;
            }
            writer.finish()
        }
    }
    .with_context(|| format!("writing {}", destination))?;

    info!("wrote {} points to {}", written, destination);

    Ok(())
}
