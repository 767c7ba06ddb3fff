use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hexworld::config::{Params, Strategy};
use hexworld::topology::Wrap;
use hexworld::{Grid, render, save};

/// Generate a hex world map, or re-render a saved one.
#[derive(Parser, Debug)]
#[command(name = "hexworld", version, about)]
struct Args {
    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Grid width in tiles
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Grid height in tiles
    #[arg(long, default_value_t = 50)]
    height: usize,

    /// FLAT, CYLINDER, TORUS, MOBIUS_STRIP or KLEIN_BOTTLE
    #[arg(long, default_value = "CYLINDER")]
    wrap: Wrap,

    /// archipelago or continents
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Target share of land tiles
    #[arg(long)]
    land_fraction: Option<f64>,

    /// JSON file with generation parameters; flags override it
    #[arg(long)]
    params: Option<PathBuf>,

    /// Re-render an existing save instead of generating
    #[arg(long)]
    load: Option<PathBuf>,

    /// Preview pixels per internal unit
    #[arg(long, default_value_t = 12.0)]
    scale: f64,

    /// Output directory
    #[arg(long, default_value = "artifacts")]
    out: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn params(args: &Args) -> Result<Params> {
    let mut params = match &args.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Params::for_strategy(args.strategy.unwrap_or_default()),
    };
    if let Some(strategy) = args.strategy {
        if args.params.is_some() && args.land_fraction.is_none() {
            params.land_fraction = strategy.default_land_fraction();
        }
        params.strategy = strategy;
    }
    if let Some(fraction) = args.land_fraction {
        params.land_fraction = fraction;
    }
    Ok(params)
}

fn generate(args: &Args) -> Result<Grid> {
    let params = params(args)?;
    info!(
        width = args.width,
        height = args.height,
        seed = args.seed,
        wrap = %args.wrap,
        strategy = %params.strategy,
        land_fraction = params.land_fraction,
        "generating"
    );
    let (grid, report) = hexworld::generate(args.seed, args.width, args.height, args.wrap, &params)?;

    eprintln!("\nTimings:");
    for t in &report.timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    eprintln!(
        "Land: {} of {} tiles after {} expansion passes",
        report.land,
        grid.len(),
        report.expansions.iter().map(Vec::len).sum::<usize>()
    );
    Ok(grid)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let grid = match &args.load {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            save::load(&text).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            let grid = generate(&args)?;
            let path = args.out.join("map.json");
            std::fs::write(&path, save::save(&grid)?)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Saved {}", path.display());
            grid
        }
    };

    let (rgba, w, h) = render::render_map(&grid, args.scale);
    let path = args.out.join("map.png");
    image::save_buffer(&path, &rgba, w as u32, h as u32, image::ColorType::Rgba8)
        .with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Saved {}", path.display());

    eprintln!("\nDone.");
    Ok(())
}
