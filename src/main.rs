//! Strm Mounter CLI
//!
//! Mirrors a download catalog into .strm pointer files, with optional AI filename cleanup.

use clap::Parser;
use std::path::PathBuf;
use strm_mounter::cli::{
    args::{Cli, Commands},
    commands::{check, mount, unmount},
};
use strm_mounter::models::config::{self, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = config::load_config()?;

    match cli.command {
        Commands::Mount {
            downloads,
            mount: mount_path,
            no_ai,
            report,
        } => {
            override_mount(&mut config, mount_path);
            if !cli.skip_preflight {
                check::check(&config)?;
            }
            mount::mount(&config, &downloads, no_ai, report.as_deref()).await?;
        }

        Commands::Unmount { mount: mount_path } => {
            override_mount(&mut config, mount_path);
            unmount::unmount(&config)?;
        }

        Commands::Check { mount: mount_path } => {
            override_mount(&mut config, mount_path);
            check::check(&config)?;
        }
    }

    Ok(())
}

fn override_mount(config: &mut Config, mount_path: Option<PathBuf>) {
    if let Some(path) = mount_path {
        config.mount_path = path;
    }
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("strm_mounter=debug")
    } else {
        EnvFilter::new("strm_mounter=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
