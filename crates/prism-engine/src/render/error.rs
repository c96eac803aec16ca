use std::path::PathBuf;

use thiserror::Error;

/// Failures while building a sample renderer.
///
/// A renderer is either fully constructed or not returned at all; every
/// variant here means no GPU objects of that renderer remain alive.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompile { label: String, message: String },

    #[error("pipeline `{label}` was rejected by the device: {message}")]
    PipelineCreate { label: String, message: String },

    #[error("failed to load texture {}: {source}", path.display())]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture {}x{} exceeds the device limit of {max}", width, height)]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    #[error("viewport {width}x{height} cannot produce a projection")]
    InvalidViewport { width: f32, height: f32 },

    #[error("unknown sample `{0}` (expected one of: {})", super::SampleKind::NAMES.join(", "))]
    UnknownSample(String),
}
