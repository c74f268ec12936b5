#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cellasso::cli::{Backend, CliArgs, Settings};
use cellasso::{druid_app, window};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let filter = EnvFilter::try_new(&args.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_args(&args)?;
    info!(
        backend = ?settings.backend,
        rows = settings.grid.rows,
        cols = settings.grid.cols,
        cell_width = settings.grid.cell_width,
        gap = settings.grid.gap,
        "starting cellasso"
    );

    match settings.backend {
        Backend::Druid => druid_app::run(&settings),
        Backend::Minifb => window::run(&settings),
    }
}
