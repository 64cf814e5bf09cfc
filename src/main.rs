use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use org_roles::config::{Config, IsolatePolicy};
use org_roles::data::load_edge_list;
use org_roles::metrics::StandardMetrics;
use org_roles::roles::{classify, Role};
use org_roles::storage;

#[derive(Parser, Debug)]
#[clap(
    name = "org-roles",
    about = "Classify organizers, gatekeepers, stars and isolates in a weighted relationship graph"
)]
struct Cli {
    /// Path to the edge list (source, target, weight per row)
    #[clap(long)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "role_results")]
    output_dir: PathBuf,

    /// JSON configuration file; command-line flags override it
    #[clap(long)]
    config: Option<PathBuf>,

    /// Field delimiter of the edge list
    #[clap(long)]
    delimiter: Option<char>,

    /// Share of nodes (rounded down) promoted to organizer
    #[clap(long)]
    organizer_fraction: Option<f64>,

    /// Seed for community detection
    #[clap(long)]
    seed: Option<u64>,

    /// Also classify nodes without any edge as isolates
    #[clap(long)]
    include_degree_zero: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(fraction) = self.organizer_fraction {
            config.organizer_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            config.louvain.seed = seed;
        }
        if self.include_degree_zero {
            config.isolates = IsolatePolicy::DegreeZeroOrOne;
        }

        if !(0.0..=1.0).contains(&config.organizer_fraction) {
            return Err(anyhow!(
                "organizer fraction must be within [0, 1], got {}",
                config.organizer_fraction
            ));
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = args.resolve_config()?;

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting role classification");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir.display());

    let delimiter = config.delimiter_byte()?;

    // 1. Load graph views
    let views = load_edge_list(&args.input, delimiter)
        .with_context(|| format!("loading {}", args.input.display()))?;

    // 2. Classify
    let provider = StandardMetrics::from_config(&config);
    let classification = classify(&views, &provider, &config)?;

    for role in Role::ALL {
        log::info!(
            "{:>10}: {}",
            role.name(),
            classification.assignment.count(role)
        );
    }

    // 3. Save results
    storage::save_results(&classification, &views, &config, &args.output_dir)
        .with_context(|| format!("writing results to {}", args.output_dir.display()))?;

    log::info!(
        "Classification complete. Results saved to {}",
        args.output_dir.display()
    );

    Ok(())
}
