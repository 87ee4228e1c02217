#![forbid(unsafe_code)]

//! # film-suggest
//!
//! Pick one of the top 100 films by typing. The chosen film is printed
//! when the program exits.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p typeahead-demo -- --position top-left --no-minimal
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use typeahead_tea::{Program, ProgramOptions};

use typeahead_demo::app::App;
use typeahead_demo::cli::Cli;
use typeahead_demo::config::DemoConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = DemoConfig::resolve(&cli).context("invalid configuration")?;

    if cli.print_config {
        print!("{}", config.to_toml().context("failed to render configuration")?);
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path, config.log_level())?;
    }
    tracing::info!(?config, "starting film-suggest");

    let options = ProgramOptions {
        alt_screen: config.alt_screen,
        mouse: config.mouse,
        ..ProgramOptions::default()
    };
    let app = Program::new(App::new(&config))
        .with_options(options)
        .run()
        .context("terminal program failed")?;

    if let Some(film) = app.chosen() {
        println!("{film}");
    }
    Ok(())
}

/// Sends logs to `path`; `RUST_LOG` wins over the `-v` level.
fn init_logging(path: &Path, default_level: &str) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")
}
