use clap::Parser;
use gol_torus::{app, args::Args, timing::Stopwatch};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;

    let mut stopwatch = Stopwatch::new();
    app::run(&config, &mut stopwatch)?;

    if config.timing {
        println!("{stopwatch}");
    }
    Ok(())
}
