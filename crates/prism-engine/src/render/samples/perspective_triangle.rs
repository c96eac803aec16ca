use glam::Mat4;

use crate::coords::Viewport;
use crate::device::ContextId;
use crate::render::mesh::{ColorVertex, COLOR_TRIANGLE};
use crate::render::shader::{self, COLOR_MVP_WGSL};
use crate::render::transform::{self, MvpUniform};
use crate::render::{FrameState, GpuResources, RenderCtx, RenderTarget, Renderer, RendererError};

use super::common::{self, PipelineSpec};

/// Color triangle seen through a fixed perspective camera.
///
/// Projection and view are computed when the renderer is built and again
/// whenever the drawable size changes; the uniform is only rewritten then.
pub struct PerspectiveTriangle {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    mvp_ubo: wgpu::Buffer,
    vbo: wgpu::Buffer,
    resources: GpuResources,

    projection: Mat4,
    view: Mat4,
    viewport: Viewport,
}

impl PerspectiveTriangle {
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self, RendererError> {
        let projection = transform::projection_for(ctx.viewport)?;
        let view = transform::default_view();

        let shader = shader::create_program(ctx, "perspective triangle shader", COLOR_MVP_WGSL)?;
        let mut resources = GpuResources::new(ctx.context);

        let bgl = common::mvp_bind_group_layout(ctx, "perspective triangle bgl");
        let pipeline = common::strip_pipeline(
            ctx,
            PipelineSpec {
                label: "perspective triangle pipeline",
                shader: &shader,
                bind_group_layouts: &[&bgl],
                buffers: &[ColorVertex::layout()],
                cull_mode: None,
            },
        )?;

        let vbo = common::static_vertex_buffer(
            ctx,
            &mut resources,
            "perspective triangle vbo",
            bytemuck::cast_slice(&COLOR_TRIANGLE),
        );
        let (mvp_ubo, bind_group) = common::mvp_binding(
            ctx,
            &mut resources,
            &bgl,
            "perspective triangle mvp",
            MvpUniform::new(projection * view),
        );

        Ok(Self {
            pipeline,
            bind_group,
            mvp_ubo,
            vbo,
            resources,
            projection,
            view,
            viewport: ctx.viewport,
        })
    }

    /// Projection for the viewport last seen by `new` or `resize`.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

impl Renderer for PerspectiveTriangle {
    fn name(&self) -> &'static str {
        "perspective-triangle"
    }

    fn resize(&mut self, ctx: &RenderCtx<'_>) -> Result<(), RendererError> {
        if ctx.viewport == self.viewport || self.resources.is_released() {
            return Ok(());
        }

        self.projection = transform::projection_for(ctx.viewport)?;
        self.viewport = ctx.viewport;

        let mvp = MvpUniform::new(self.projection * self.view);
        ctx.queue.write_buffer(&self.mvp_ubo, 0, bytemuck::bytes_of(&mvp));
        Ok(())
    }

    fn draw(&mut self, _ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, _frame: &FrameState) {
        if self.resources.is_released() {
            return;
        }

        let mut rpass = target.begin_load_pass("perspective triangle pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..COLOR_TRIANGLE.len() as u32, 0..1);
    }

    fn release(&mut self, current: Option<ContextId>) -> bool {
        self.resources.release(current)
    }
}
