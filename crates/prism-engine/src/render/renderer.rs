use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::device::ContextId;
use crate::time::FrameTime;

use super::samples::{InstancedQuads, PerspectiveTriangle, RotatingQuad, TexturedQuad};
use super::{RenderCtx, RenderTarget, RendererError};

/// Per-frame inputs shared by every sample.
#[derive(Debug, Copy, Clone)]
pub struct FrameState {
    /// Current rotation angle in degrees.
    pub angle_deg: f32,
    pub time: FrameTime,
}

/// A sample renderer: built once against a GPU context, drawn every frame,
/// released before that context goes away.
///
/// Construction is the fallible initialization step; there is no
/// half-initialized renderer.
pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Called when the drawable size changed since the last draw.
    fn resize(&mut self, ctx: &RenderCtx<'_>) -> Result<(), RendererError> {
        let _ = ctx;
        Ok(())
    }

    /// Records this sample's draw into `target`, on top of the cleared frame.
    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameState);

    /// Destroys GPU objects if `current` is the context they were created in.
    ///
    /// Returns whether anything was destroyed. Calling it again is a no-op.
    fn release(&mut self, current: Option<ContextId>) -> bool;
}

/// The available samples.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum SampleKind {
    /// Color quad spinning about the Y axis, back faces culled.
    #[default]
    RotatingQuad,
    /// Color triangle seen through a perspective camera.
    PerspectiveTriangle,
    /// Quad sampling an image file.
    TexturedQuad,
    /// Grid of quads, each spinning at its own speed.
    InstancedQuads,
}

impl SampleKind {
    pub const ALL: [SampleKind; 4] = [
        SampleKind::RotatingQuad,
        SampleKind::PerspectiveTriangle,
        SampleKind::TexturedQuad,
        SampleKind::InstancedQuads,
    ];

    pub const NAMES: [&'static str; 4] = [
        "rotating-quad",
        "perspective-triangle",
        "textured-quad",
        "instanced-quads",
    ];

    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// The sample after this one, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            SampleKind::RotatingQuad => 0,
            SampleKind::PerspectiveTriangle => 1,
            SampleKind::TexturedQuad => 2,
            SampleKind::InstancedQuads => 3,
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleKind {
    type Err = RendererError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::NAMES
            .iter()
            .position(|n| *n == wanted)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| RendererError::UnknownSample(s.to_string()))
    }
}

/// Construction options shared by all samples; each sample reads what it needs.
#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Image sampled by [`SampleKind::TexturedQuad`].
    pub texture_path: PathBuf,
    /// Grid cells along the longer screen side for [`SampleKind::InstancedQuads`].
    pub instances_per_side: u32,
    /// Seed for per-instance starting angles and speeds.
    pub seed: u64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("assets/texture.png"),
            instances_per_side: 16,
            seed: 0x5eed,
        }
    }
}

/// Builds the renderer for `kind` against the current context.
pub fn create_renderer(
    kind: SampleKind,
    ctx: &RenderCtx<'_>,
    options: &SampleOptions,
) -> Result<Box<dyn Renderer>, RendererError> {
    let renderer: Box<dyn Renderer> = match kind {
        SampleKind::RotatingQuad => Box::new(RotatingQuad::new(ctx)?),
        SampleKind::PerspectiveTriangle => Box::new(PerspectiveTriangle::new(ctx)?),
        SampleKind::TexturedQuad => Box::new(TexturedQuad::new(ctx, &options.texture_path)?),
        SampleKind::InstancedQuads => Box::new(InstancedQuads::new(
            ctx,
            options.instances_per_side,
            options.seed,
        )?),
    };
    log::info!("{}: {} renderer ready", ctx.context, renderer.name());
    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::render::ctx::test_support::{frame, NoopGpu};

    fn bundled_options() -> SampleOptions {
        SampleOptions {
            texture_path: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../assets/texture.png"
            )),
            instances_per_side: 4,
            ..SampleOptions::default()
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in SampleKind::ALL {
            assert_eq!(kind.name().parse::<SampleKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_underscores() {
        assert_eq!(
            " Textured_Quad ".parse::<SampleKind>().unwrap(),
            SampleKind::TexturedQuad
        );
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "hexagon".parse::<SampleKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("hexagon"));
        assert!(msg.contains("instanced-quads"));
    }

    #[test]
    fn next_cycles_through_all() {
        let mut kind = SampleKind::default();
        let mut seen = Vec::new();
        for _ in 0..SampleKind::ALL.len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, SampleKind::default());
        assert_eq!(seen, SampleKind::ALL.to_vec());
    }

    #[test]
    fn every_sample_builds_resizes_draws_and_releases() {
        let mut gpu = NoopGpu::new();
        let options = bundled_options();

        for kind in SampleKind::ALL {
            let mut renderer = create_renderer(kind, &gpu.ctx(), &options).unwrap();
            assert_eq!(renderer.name(), kind.name());

            gpu.draw(renderer.as_mut(), &frame(30.0, 0.016));

            gpu.viewport = Viewport::new(320.0, 720.0);
            renderer.resize(&gpu.ctx()).unwrap();
            gpu.draw(renderer.as_mut(), &frame(60.0, 0.016));
            gpu.viewport = Viewport::new(640.0, 480.0);

            assert!(renderer.release(Some(gpu.context)), "{kind}");
            assert!(!renderer.release(Some(gpu.context)), "{kind}");
        }
    }

    #[test]
    fn release_from_another_context_destroys_nothing() {
        let gpu = NoopGpu::new();
        for kind in SampleKind::ALL {
            let mut renderer = create_renderer(kind, &gpu.ctx(), &bundled_options()).unwrap();
            assert!(!renderer.release(Some(ContextId::next())), "{kind}");
            assert!(!renderer.release(None), "{kind}");
        }
    }

    #[test]
    fn draw_after_release_records_nothing() {
        let gpu = NoopGpu::new();
        for kind in SampleKind::ALL {
            let mut renderer = create_renderer(kind, &gpu.ctx(), &bundled_options()).unwrap();
            assert!(renderer.release(Some(gpu.context)));
            // Would hit destroyed buffers and fail validation if recorded.
            gpu.draw(renderer.as_mut(), &frame(0.0, 0.016));
        }
    }

    #[test]
    fn missing_texture_fails_creation() {
        let gpu = NoopGpu::new();
        let options = SampleOptions {
            texture_path: PathBuf::from("/nonexistent/texture.png"),
            ..SampleOptions::default()
        };
        let err = create_renderer(SampleKind::TexturedQuad, &gpu.ctx(), &options)
            .err()
            .expect("missing texture must fail");
        assert!(matches!(err, RendererError::TextureLoad { .. }));
        assert!(err.to_string().contains("/nonexistent/texture.png"));
    }

    #[test]
    fn degenerate_viewport_fails_creation() {
        let mut gpu = NoopGpu::new();
        gpu.viewport = Viewport::new(0.0, 0.0);
        for kind in [SampleKind::PerspectiveTriangle, SampleKind::InstancedQuads] {
            assert!(matches!(
                create_renderer(kind, &gpu.ctx(), &bundled_options()),
                Err(RendererError::InvalidViewport { .. })
            ));
        }
    }
}
