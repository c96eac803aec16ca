//! Pipeline and buffer helpers shared by the samples.

use wgpu::util::DeviceExt;

use crate::render::shader::{FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::render::transform::MvpUniform;
use crate::render::{GpuResources, RenderCtx, RendererError};

/// Fixed-function state for one sample pipeline.
pub(super) struct PipelineSpec<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub cull_mode: Option<wgpu::Face>,
}

/// Builds a triangle-strip pipeline; validation failures become
/// [`RendererError::PipelineCreate`].
pub(super) fn strip_pipeline(
    ctx: &RenderCtx<'_>,
    desc: PipelineSpec<'_>,
) -> Result<wgpu::RenderPipeline, RendererError> {
    let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

    let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: desc.bind_group_layouts,
        immediate_size: 0,
    });

    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: desc.buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    match pollster::block_on(scope.pop()) {
        Some(err) => Err(RendererError::PipelineCreate {
            label: desc.label.to_string(),
            message: err.to_string(),
        }),
        None => Ok(pipeline),
    }
}

pub(super) fn static_vertex_buffer(
    ctx: &RenderCtx<'_>,
    resources: &mut GpuResources,
    label: &str,
    contents: &[u8],
) -> wgpu::Buffer {
    resources.buffer(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::VERTEX,
    }))
}

/// Bind group layout with one vertex-stage MVP uniform at binding 0.
pub(super) fn mvp_bind_group_layout(ctx: &RenderCtx<'_>, label: &str) -> wgpu::BindGroupLayout {
    ctx.device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(MvpUniform::min_binding_size()),
                },
                count: None,
            }],
        })
}

/// Creates the MVP uniform buffer, initialised to `initial`, and its bind group.
pub(super) fn mvp_binding(
    ctx: &RenderCtx<'_>,
    resources: &mut GpuResources,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    initial: MvpUniform,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let ubo = resources.buffer(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&initial),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    }));

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    });

    (ubo, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ctx::test_support::NoopGpu;
    use crate::render::mesh::ColorVertex;
    use crate::render::shader::{self, COLOR_MVP_WGSL};

    #[test]
    fn matching_layout_builds() {
        let gpu = NoopGpu::new();
        let ctx = gpu.ctx();
        let module = shader::create_program(&ctx, "color", COLOR_MVP_WGSL).unwrap();
        let bgl = mvp_bind_group_layout(&ctx, "color bgl");
        let built = strip_pipeline(
            &ctx,
            PipelineSpec {
                label: "color pipeline",
                shader: &module,
                bind_group_layouts: &[&bgl],
                buffers: &[ColorVertex::layout()],
                cull_mode: Some(wgpu::Face::Back),
            },
        );
        assert!(built.is_ok());
    }

    #[test]
    fn missing_vertex_buffers_is_a_pipeline_error() {
        let gpu = NoopGpu::new();
        let ctx = gpu.ctx();
        let module = shader::create_program(&ctx, "color", COLOR_MVP_WGSL).unwrap();
        let bgl = mvp_bind_group_layout(&ctx, "color bgl");
        let err = strip_pipeline(
            &ctx,
            PipelineSpec {
                label: "unfed pipeline",
                shader: &module,
                bind_group_layouts: &[&bgl],
                buffers: &[],
                cull_mode: None,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RendererError::PipelineCreate { ref label, .. } if label == "unfed pipeline"
        ));
    }
}
