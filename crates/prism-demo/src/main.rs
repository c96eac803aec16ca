mod app;
mod cli;
mod config;

use anyhow::Result;
use clap::Parser;

use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::render::Spin;
use prism_engine::window::Runtime;

use crate::app::DemoApp;
use crate::cli::Cli;
use crate::config::DemoConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DemoConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    init_logging(LoggingConfig {
        env_filter: config.logging.filter.clone(),
        ..Default::default()
    });

    let kind = config.sample_kind()?;
    log::info!(
        "starting with {kind} on {:?} backend (Tab: next sample, Esc: quit)",
        config.gpu.backend
    );

    let app = DemoApp::new(
        kind,
        config.sample_options(),
        config.clear_color(),
        Spin::new(config.sample.degrees_per_second),
        config.window.title.clone(),
    );

    Runtime::run(config.runtime_config(), config.gpu_init(), app)
}
