use std::path::PathBuf;

use clap::Parser;

use prism_engine::render::SampleKind;

use crate::config::Backend;

/// Sample renderers: rotating quad, perspective triangle, textured quad,
/// instanced quads.
///
/// Keys: Tab/Space switches to the next sample, Escape quits.
#[derive(Debug, Parser)]
#[command(name = "prism-demo", version, about)]
pub struct Cli {
    /// Config file (defaults to ./prism.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sample to start with: rotating-quad, perspective-triangle,
    /// textured-quad, instanced-quads.
    #[arg(short, long)]
    pub sample: Option<SampleKind>,

    /// Image used by the textured-quad sample.
    #[arg(short, long)]
    pub texture: Option<PathBuf>,

    /// Graphics API to render with.
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Log filter, e.g. "debug" or "prism_engine=debug".
    #[arg(long)]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_overrides_nothing() {
        let cli = Cli::try_parse_from(["prism-demo"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.sample.is_none());
        assert!(cli.backend.is_none());
    }

    #[test]
    fn sample_parsed_by_name() {
        let cli = Cli::try_parse_from(["prism-demo", "-s", "perspective-triangle"]).unwrap();
        assert_eq!(cli.sample, Some(SampleKind::PerspectiveTriangle));
    }

    #[test]
    fn bad_sample_rejected() {
        assert!(Cli::try_parse_from(["prism-demo", "--sample", "teapot"]).is_err());
    }

    #[test]
    fn gl_backend_flag() {
        let cli = Cli::try_parse_from(["prism-demo", "--backend", "gl"]).unwrap();
        assert_eq!(cli.backend, Some(Backend::Gl));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
