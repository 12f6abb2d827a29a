/// Chunk sampling tool: generates a block of neighbouring noise chunks over
/// the standard basis of a chosen dimension and writes it as JSON.
///
/// Settings come from an optional JSON config file; flags override it.
use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use octave_core::{ChunkNoise, NoiseConfig, NoiseRegion, VecN, ZeroSeams};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "chunk_sampler",
    about = "Generate a region of deterministic chunk noise and write it as JSON"
)]
struct Args {
    /// JSON octave configuration (pixel_size, octaves, lacunarity, persistence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Noise seed
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    seed: i64,

    /// Chunk column of the region's top-left chunk
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    cx: i64,

    /// Chunk row of the region's top-left chunk
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    cy: i64,

    /// Chunks per region row
    #[arg(long, default_value = "1")]
    cols: usize,

    /// Chunk rows in the region
    #[arg(long, default_value = "1")]
    rows: usize,

    /// Dimension of the influence vectors (the standard basis is used)
    #[arg(long, default_value = "3")]
    dims: usize,

    /// Chunk width/height in pixels (overrides the config file)
    #[arg(long)]
    pixel_size: Option<usize>,

    /// Octave count (overrides the config file)
    #[arg(long)]
    octaves: Option<usize>,

    /// Sub-chunks per axis per octave (overrides the config file)
    #[arg(long)]
    lacunarity: Option<u32>,

    /// Amplitude factor per octave (overrides the config file)
    #[arg(long)]
    persistence: Option<f32>,

    /// Pin every main-chunk border to zero
    #[arg(long)]
    zero_seams: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// ── Output schema ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SampleFile {
    seed: i64,
    dims: usize,
    config: NoiseConfig,
    zero_seams: bool,
    weak_bound: f32,
    strict_bound: f32,
    region: NoiseRegion<VecN>,
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<NoiseConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            NoiseConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => NoiseConfig::default(),
    };
    if let Some(v) = args.pixel_size {
        config.pixel_size = v;
    }
    if let Some(v) = args.octaves {
        config.octaves = v;
    }
    if let Some(v) = args.lacunarity {
        config.lacunarity = v;
    }
    if let Some(v) = args.persistence {
        config.persistence = v;
    }
    config.validate().context("invalid octave configuration")?;
    Ok(config)
}

fn sample(args: &Args, config: &NoiseConfig) -> Result<SampleFile> {
    let basis = VecN::standard_basis(args.dims);
    let noise = ChunkNoise::from_config(config.clone(), basis).context("building generator")?;
    let (weak_bound, strict_bound) = (noise.weak_bound(), noise.strict_bound());

    let region = if args.zero_seams {
        let zero = VecN::splat(args.dims, 0.0);
        noise
            .with_override(ZeroSeams::new(&zero, true, true))
            .context("installing zero seams")?
            .generate_region(args.seed, args.cx, args.cy, args.cols, args.rows)
    } else {
        noise.generate_region(args.seed, args.cx, args.cy, args.cols, args.rows)
    }
    .context("generating region")?;

    info!(min = region.min, max = region.max, weak_bound, "region generated");
    if region.max > weak_bound || -region.min > weak_bound {
        warn!(min = region.min, max = region.max, weak_bound, "values exceed the weak bound");
    }

    Ok(SampleFile {
        seed: args.seed,
        dims: args.dims,
        config: config.clone(),
        zero_seams: args.zero_seams,
        weak_bound,
        strict_bound,
        region,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    ensure!(args.dims > 0, "--dims must be at least 1");

    let config = load_config(&args)?;
    info!(
        seed = args.seed,
        cx = args.cx,
        cy = args.cy,
        cols = args.cols,
        rows = args.rows,
        pixel_size = config.pixel_size,
        octaves = config.octaves,
        lacunarity = config.lacunarity,
        "sampling region"
    );

    let file = sample(&args, &config)?;
    let json = serde_json::to_string(&file).context("serialising region")?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote region");
        }
        None => println!("{json}"),
    }
    Ok(())
}
