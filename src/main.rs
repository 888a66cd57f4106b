use anyhow::{Context, Result};
use clap::Parser;
use pixelgenesis_lib::app::App;
use pixelgenesis_lib::model::{init_logging, AppConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Overrides the seed from the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks between progress lines; 0 logs only the final summary
    #[arg(short, long, default_value_t = 100)]
    log_interval: u64,

    /// Writes population statistics as JSON lines to this file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Prints the effective configuration as TOML and exits
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut app = App::new(config, args.log_interval, args.stats.as_deref())?;
    let summary = app.run(args.ticks)?;
    if summary.extinct {
        tracing::warn!(tick = app.world.tick(), "Population went extinct");
    }
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
