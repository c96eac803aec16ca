use crate::device::ContextId;
use crate::render::mesh::{ColorVertex, COLOR_QUAD};
use crate::render::shader::{self, COLOR_MVP_WGSL};
use crate::render::transform::{self, MvpUniform};
use crate::render::{FrameState, GpuResources, RenderCtx, RenderTarget, Renderer, RendererError};

use super::common::{self, PipelineSpec};

/// Color quad spinning about +Y.
///
/// Back faces are culled, so the quad disappears for the half turn where its
/// back faces the viewer.
pub struct RotatingQuad {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    mvp_ubo: wgpu::Buffer,
    vbo: wgpu::Buffer,
    resources: GpuResources,
}

impl RotatingQuad {
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self, RendererError> {
        let shader = shader::create_program(ctx, "rotating quad shader", COLOR_MVP_WGSL)?;
        let mut resources = GpuResources::new(ctx.context);

        let bgl = common::mvp_bind_group_layout(ctx, "rotating quad bgl");
        let pipeline = common::strip_pipeline(
            ctx,
            PipelineSpec {
                label: "rotating quad pipeline",
                shader: &shader,
                bind_group_layouts: &[&bgl],
                buffers: &[ColorVertex::layout()],
                cull_mode: Some(wgpu::Face::Back),
            },
        )?;

        let vbo = common::static_vertex_buffer(
            ctx,
            &mut resources,
            "rotating quad vbo",
            bytemuck::cast_slice(&COLOR_QUAD),
        );
        let (mvp_ubo, bind_group) = common::mvp_binding(
            ctx,
            &mut resources,
            &bgl,
            "rotating quad mvp",
            MvpUniform::identity(),
        );

        Ok(Self {
            pipeline,
            bind_group,
            mvp_ubo,
            vbo,
            resources,
        })
    }
}

impl Renderer for RotatingQuad {
    fn name(&self) -> &'static str {
        "rotating-quad"
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameState) {
        if self.resources.is_released() {
            return;
        }

        let mvp = MvpUniform::new(transform::rotation_y(frame.angle_deg));
        ctx.queue.write_buffer(&self.mvp_ubo, 0, bytemuck::bytes_of(&mvp));

        let mut rpass = target.begin_load_pass("rotating quad pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..COLOR_QUAD.len() as u32, 0..1);
    }

    fn release(&mut self, current: Option<ContextId>) -> bool {
        self.resources.release(current)
    }
}
