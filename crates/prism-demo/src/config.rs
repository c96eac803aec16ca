//! `prism.toml` configuration.
//!
//! Every key is optional; missing sections fall back to the defaults below.
//! Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use winit::dpi::LogicalSize;

use prism_engine::device::GpuInit;
use prism_engine::paint::Color;
use prism_engine::render::{SampleKind, SampleOptions};
use prism_engine::window::RuntimeConfig;

use crate::cli::Cli;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "prism.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub window: WindowSection,
    pub gpu: GpuSection,
    pub sample: SampleSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            width: 960.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpuSection {
    pub backend: Backend,
    pub vsync: bool,
}

impl Default for GpuSection {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            vsync: true,
        }
    }
}

/// Graphics API the adapter is picked from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Auto,
    /// OpenGL / OpenGL ES.
    Gl,
    Vulkan,
    Metal,
    Dx12,
}

impl Backend {
    pub fn to_wgpu(self) -> wgpu::Backends {
        match self {
            Backend::Auto => wgpu::Backends::all(),
            Backend::Gl => wgpu::Backends::GL,
            Backend::Vulkan => wgpu::Backends::VULKAN,
            Backend::Metal => wgpu::Backends::METAL,
            Backend::Dx12 => wgpu::Backends::DX12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SampleSection {
    /// Sample name, e.g. "rotating-quad".
    pub kind: String,
    pub texture: PathBuf,
    pub degrees_per_second: f32,
    pub instances_per_side: u32,
    pub seed: u64,
    /// Straight-alpha RGBA.
    pub clear_color: [f32; 4],
}

impl Default for SampleSection {
    fn default() -> Self {
        let options = SampleOptions::default();
        Self {
            kind: SampleKind::default().name().to_string(),
            texture: options.texture_path,
            degrees_per_second: 90.0,
            instances_per_side: options.instances_per_side,
            seed: options.seed,
            clear_color: [0.1, 0.1, 0.12, 1.0],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `env_logger` filter; `RUST_LOG` is used when unset.
    pub filter: Option<String>,
}

impl DemoConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path`, or `prism.toml` from the working directory if it exists.
    ///
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(kind) = cli.sample {
            self.sample.kind = kind.name().to_string();
        }
        if let Some(texture) = &cli.texture {
            self.sample.texture = texture.clone();
        }
        if let Some(backend) = cli.backend {
            self.gpu.backend = backend;
        }
        if let Some(filter) = &cli.log {
            self.logging.filter = Some(filter.clone());
        }
    }

    pub fn sample_kind(&self) -> Result<SampleKind> {
        self.sample
            .kind
            .parse()
            .context("invalid [sample] kind")
    }

    pub fn sample_options(&self) -> SampleOptions {
        SampleOptions {
            texture_path: self.sample.texture.clone(),
            instances_per_side: self.sample.instances_per_side,
            seed: self.sample.seed,
        }
    }

    pub fn clear_color(&self) -> Color {
        Color::from_straight_array(self.sample.clear_color)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.window.title.clone(),
            initial_size: LogicalSize::new(self.window.width, self.window.height),
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            backends: self.gpu.backend.to_wgpu(),
            present_mode: if self.gpu.vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            ..GpuInit::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn shipped_config_parses() {
        let cfg = DemoConfig::parse(include_str!("../../../prism.toml")).unwrap();
        assert_eq!(cfg.sample_kind().unwrap(), SampleKind::RotatingQuad);
        assert_eq!(cfg.sample.seed, SampleOptions::default().seed);
        assert_eq!(cfg.window.width, 960.0);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(DemoConfig::parse("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = DemoConfig::parse(
            r#"
            [gpu]
            backend = "gl"

            [sample]
            kind = "textured-quad"
            texture = "img/brick.png"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.gpu.backend, Backend::Gl);
        assert!(cfg.gpu.vsync);
        assert_eq!(cfg.sample_kind().unwrap(), SampleKind::TexturedQuad);
        assert_eq!(cfg.sample.texture, PathBuf::from("img/brick.png"));
        assert_eq!(cfg.sample.degrees_per_second, 90.0);
        assert_eq!(cfg.window, WindowSection::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(DemoConfig::parse("[window]\ncolour = 3\n").is_err());
    }

    #[test]
    fn unknown_sample_kind_reported() {
        let cfg = DemoConfig::parse("[sample]\nkind = \"cube\"\n").unwrap();
        let err = format!("{:#}", cfg.sample_kind().unwrap_err());
        assert!(err.contains("cube"));
    }

    #[test]
    fn cli_overrides_file() {
        let mut cfg = DemoConfig::parse("[sample]\nkind = \"textured-quad\"\n").unwrap();
        let cli = Cli::try_parse_from([
            "prism-demo",
            "--sample",
            "instanced-quads",
            "--backend",
            "vulkan",
        ])
        .unwrap();
        cfg.apply_cli(&cli);
        assert_eq!(cfg.sample_kind().unwrap(), SampleKind::InstancedQuads);
        assert_eq!(cfg.gpu.backend, Backend::Vulkan);
    }

    #[test]
    fn vsync_off_maps_to_no_vsync() {
        let cfg = DemoConfig::parse("[gpu]\nvsync = false\nbackend = \"gl\"\n").unwrap();
        let init = cfg.gpu_init();
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(init.backends, wgpu::Backends::GL);
    }

    #[test]
    fn implicit_config_is_optional_but_explicit_is_not() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(DemoConfig::load(Some(&missing)).is_err());

        let present = dir.path().join("prism.toml");
        std::fs::write(&present, "[window]\ntitle = \"quad\"\n").unwrap();
        assert_eq!(DemoConfig::load(Some(&present)).unwrap().window.title, "quad");
    }

    #[test]
    fn clear_color_is_premultiplied() {
        let cfg = DemoConfig::parse("[sample]\nclear_color = [1.0, 1.0, 1.0, 0.5]\n").unwrap();
        assert_eq!(cfg.clear_color().to_array(), [0.5, 0.5, 0.5, 0.5]);
    }
}
