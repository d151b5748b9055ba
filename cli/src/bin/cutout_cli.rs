use clap::{Parser, Subcommand};
use cli::{BatchConfig, list_images};
use color_eyre::eyre::{Result, eyre};
use cutout::{BatchRunner, DirectorySink, OutputSink, Pipeline, ProgressFn, ProgressObserver, io};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch using an existing configuration file
    Process {
        /// Path to the TOML or JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run a batch from directory paths
    Run {
        /// Directory containing grayscale shape templates
        #[arg(short, long)]
        shapes: PathBuf,
        /// Directory containing source images
        #[arg(short, long)]
        images: PathBuf,
        /// Destination directory for cutouts
        #[arg(short, long)]
        out: PathBuf,
        /// Foreground threshold applied to templates
        #[arg(long, default_value_t = 0)]
        threshold: u8,
        /// Gaussian blur sigma applied before thresholding
        #[arg(long)]
        blur: Option<f32>,
        /// Log pair failures and continue instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Process { config } => BatchConfig::from_file(&config)?,
        Commands::Run {
            shapes,
            images,
            out,
            threshold,
            blur,
            keep_going,
        } => BatchConfig {
            shape_dir: shapes,
            image_dir: images,
            output_dir: out,
            threshold,
            blur_sigma: blur,
            keep_going,
        },
    };

    run_batch(&config)
}

fn run_batch(config: &BatchConfig) -> Result<()> {
    // Create the results directory if it doesn't exist
    fs::create_dir_all(&config.output_dir)?;

    let shape_paths = list_images(&config.shape_dir)?;
    let source_paths = list_images(&config.image_dir)?;
    if shape_paths.is_empty() {
        return Err(eyre!(
            "no shape templates found in {}",
            config.shape_dir.display()
        ));
    }
    if source_paths.is_empty() {
        return Err(eyre!(
            "no source images found in {}",
            config.image_dir.display()
        ));
    }
    info!(
        "{} shape templates, {} source images",
        shape_paths.len(),
        source_paths.len()
    );

    let templates = shape_paths
        .iter()
        .map(io::load_template)
        .collect::<cutout::Result<Vec<_>>>()?;

    let mut builder = Pipeline::builder();
    if let Some(sigma) = config.blur_sigma {
        builder = builder.with_blur(sigma);
    }
    let pipeline = builder.with_threshold(config.threshold).build();

    let mut runner = BatchRunner::new(&pipeline, templates)?;
    let mut sink = DirectorySink::new(&config.output_dir);
    let total = source_paths.len();
    let mut observer = ProgressFn(|fraction: f64| info!("progress: {:.0}%", fraction * 100.0));

    if config.keep_going {
        let mut failures = 0usize;
        for (pair, path) in source_paths.iter().enumerate() {
            let outcome = io::load_source(path)
                .and_then(|source| runner.process_pair(pair, &source))
                .and_then(|output| sink.write(pair, &output));
            if let Err(error) = outcome {
                failures += 1;
                warn!("skipping pair {} ({}): {}", pair, path.display(), error);
            }
            observer.on_progress((pair + 1) as f64 / total as f64);
        }
        if failures > 0 {
            warn!("{} of {} pairs failed", failures, total);
        }
    } else {
        let sources = source_paths.iter().map(io::load_source);
        if let Err(error) = runner.run(sources, &mut sink, &mut observer) {
            return Err(eyre!(
                "batch aborted at pair {} ({}): {}",
                error.pair,
                source_paths[error.pair].display(),
                error.source
            ));
        }
    }

    info!("✅ Batch completed");
    Ok(())
}
