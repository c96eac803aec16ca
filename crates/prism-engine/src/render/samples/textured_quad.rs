use std::path::Path;

use crate::device::ContextId;
use crate::render::mesh::{TexturedVertex, TEXTURED_QUAD};
use crate::render::shader::{self, TEXTURED_WGSL};
use crate::render::texture::{GpuTexture, TextureImage};
use crate::render::{FrameState, GpuResources, RenderCtx, RenderTarget, Renderer, RendererError};

use super::common::{self, PipelineSpec};

/// Quad sampling an image loaded from disk.
///
/// The image is decoded before any GPU object is created, so a missing or
/// corrupt file fails construction without leaving anything behind.
pub struct TexturedQuad {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    vbo: wgpu::Buffer,
    // Keeps the view and sampler referenced by `bind_group` alive.
    _texture: GpuTexture,
    resources: GpuResources,
}

impl TexturedQuad {
    pub fn new(ctx: &RenderCtx<'_>, path: &Path) -> Result<Self, RendererError> {
        let image = TextureImage::open(path)?;
        Self::from_image(ctx, &image, path)
    }

    /// Builds the sample from an already decoded image.
    pub fn from_image(
        ctx: &RenderCtx<'_>,
        image: &TextureImage,
        source: &Path,
    ) -> Result<Self, RendererError> {
        let shader = shader::create_program(ctx, "textured quad shader", TEXTURED_WGSL)?;
        let mut resources = GpuResources::new(ctx.context);

        let mut texture = GpuTexture::upload(ctx, image, "textured quad texture")?;
        texture.texture = resources.texture(texture.texture);

        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("textured quad bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("textured quad bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let pipeline = common::strip_pipeline(
            ctx,
            PipelineSpec {
                label: "textured quad pipeline",
                shader: &shader,
                bind_group_layouts: &[&bgl],
                buffers: &[TexturedVertex::layout()],
                cull_mode: None,
            },
        )?;

        let vbo = common::static_vertex_buffer(
            ctx,
            &mut resources,
            "textured quad vbo",
            bytemuck::cast_slice(&TEXTURED_QUAD),
        );

        log::debug!(
            "textured quad: {} ({}x{})",
            source.display(),
            image.width,
            image.height
        );

        Ok(Self {
            pipeline,
            bind_group,
            vbo,
            _texture: texture,
            resources,
        })
    }
}

impl Renderer for TexturedQuad {
    fn name(&self) -> &'static str {
        "textured-quad"
    }

    fn draw(&mut self, _ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, _frame: &FrameState) {
        if self.resources.is_released() {
            return;
        }

        let mut rpass = target.begin_load_pass("textured quad pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..TEXTURED_QUAD.len() as u32, 0..1);
    }

    fn release(&mut self, current: Option<ContextId>) -> bool {
        self.resources.release(current)
    }
}
