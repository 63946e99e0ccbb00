use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod render;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("yoda_plot=debug,info")
    } else {
        EnvFilter::new("yoda_plot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Failures are reported, not turned into an exit code
    let preview = match cli::plot::run(&cli) {
        Ok(preview) => preview,
        Err(e) => {
            println!("{e:#}");
            None
        }
    };

    cli::prompt::wait_on_terminal()?;
    drop(preview);

    Ok(())
}
