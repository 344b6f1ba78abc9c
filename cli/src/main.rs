use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wishlist_cli::{render, run, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = run(&cli)?;
    print!("{}", render(&state));
    Ok(())
}
