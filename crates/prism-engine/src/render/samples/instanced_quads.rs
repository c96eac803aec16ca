use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coords::Viewport;
use crate::device::ContextId;
use crate::render::mesh::{QuadVertex, INSTANCE_QUAD};
use crate::render::shader::{self, INSTANCED_WGSL};
use crate::render::{
    FrameState, GpuResources, RenderCtx, RenderTarget, Renderer, RendererError, Spin,
};

use super::common::{self, PipelineSpec};

/// Fastest per-instance spin, either direction.
pub const MAX_DEGREES_PER_SECOND: f32 = 0.3 * 360.0;

pub const MAX_INSTANCES_PER_SIDE: u32 = 64;

/// Per-instance data: columns of a 2x2 scale/rotation matrix, then an offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub scale_rot: [f32; 4],
    pub offset: [f32; 2],
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        2 => Float32x4, // scale_rot
        3 => Float32x2  // offset
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Instance rotated by `degrees`, scaled per axis by `scale`, centered at `offset`.
    pub fn new(degrees: f32, scale: [f32; 2], offset: [f32; 2]) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            scale_rot: [c * scale[0], s * scale[1], -s * scale[0], c * scale[1]],
            offset,
        }
    }
}

/// Grid of square cells filling the screen.
///
/// The longer screen side gets `per_side` cells; the shorter side gets as many
/// whole cells of the same on-screen size as fit. Cells are centered.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub offsets: Vec<[f32; 2]>,
    /// Clip-space half extent of one cell along x and y.
    pub scale: [f32; 2],
}

impl GridLayout {
    pub fn compute(viewport: Viewport, per_side: u32) -> Result<Self, RendererError> {
        if !viewport.is_valid() {
            return Err(RendererError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let per_side = per_side.clamp(1, MAX_INSTANCES_PER_SIDE);
        let n_major = per_side as f32;
        let cell = 2.0 / n_major;

        let major_len = viewport.width.max(viewport.height);
        let minor_len = viewport.width.min(viewport.height);
        // Scene units are clip units along the major axis; the minor axis is stretched
        // so cells stay square on screen.
        let scene_to_clip = [1.0, major_len / minor_len];
        let cells = [
            per_side,
            ((n_major * minor_len / major_len).floor() as u32).max(1),
        ];

        let centers = |d: usize| -> Vec<f32> {
            let start = -(cells[d] as f32) / n_major;
            (0..cells[d])
                .map(|i| scene_to_clip[d] * (cell * (i as f32 + 0.5) + start))
                .collect()
        };
        let major_centers = centers(0);
        let minor_centers = centers(1);

        let (major, minor) = if viewport.width >= viewport.height {
            (0, 1)
        } else {
            (1, 0)
        };

        let mut offsets = Vec::with_capacity(major_centers.len() * minor_centers.len());
        for &a in &major_centers {
            for &b in &minor_centers {
                let mut o = [0.0; 2];
                o[major] = a;
                o[minor] = b;
                offsets.push(o);
            }
        }

        let mut scale = [0.0; 2];
        scale[major] = 0.5 * cell * scene_to_clip[0];
        scale[minor] = 0.5 * cell * scene_to_clip[1];

        Ok(Self { offsets, scale })
    }

    pub fn cell_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Per-instance spins with random start angles and speeds.
fn seeded_spins(count: usize, seed: u64) -> Vec<Spin> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Spin {
            angle_deg: rng.random_range(0.0..360.0),
            degrees_per_second: MAX_DEGREES_PER_SECOND * (2.0 * rng.random::<f32>() - 1.0),
        })
        .collect()
}

/// Grid of quads, each spinning at its own speed.
///
/// Instance data is rewritten every frame; the grid is rebuilt on resize.
pub struct InstancedQuads {
    pipeline: wgpu::RenderPipeline,
    quad_vbo: wgpu::Buffer,
    instance_vbo: wgpu::Buffer,
    resources: GpuResources,

    per_side: u32,
    layout: GridLayout,
    spins: Vec<Spin>,
    instances: Vec<QuadInstance>,
}

impl InstancedQuads {
    pub fn new(ctx: &RenderCtx<'_>, per_side: u32, seed: u64) -> Result<Self, RendererError> {
        let per_side = per_side.clamp(1, MAX_INSTANCES_PER_SIDE);
        let layout = GridLayout::compute(ctx.viewport, per_side)?;

        let shader = shader::create_program(ctx, "instanced quads shader", INSTANCED_WGSL)?;
        let mut resources = GpuResources::new(ctx.context);

        let pipeline = common::strip_pipeline(
            ctx,
            PipelineSpec {
                label: "instanced quads pipeline",
                shader: &shader,
                bind_group_layouts: &[],
                buffers: &[QuadVertex::layout(), QuadInstance::layout()],
                cull_mode: None,
            },
        )?;

        let quad_vbo = common::static_vertex_buffer(
            ctx,
            &mut resources,
            "instanced quads vbo",
            bytemuck::cast_slice(&INSTANCE_QUAD),
        );

        // No grid can hold more than per_side^2 cells; size for that once.
        let capacity = (per_side * per_side) as usize;
        let instance_vbo = resources.buffer(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instanced quads instance vbo"),
            size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));

        log::debug!(
            "instanced quads: {} of {capacity} instances for {}x{}",
            layout.cell_count(),
            ctx.viewport.width,
            ctx.viewport.height
        );

        Ok(Self {
            pipeline,
            quad_vbo,
            instance_vbo,
            resources,
            per_side,
            layout,
            spins: seeded_spins(capacity, seed),
            instances: Vec::with_capacity(capacity),
        })
    }

    /// Advances every spin by `dt` and rebuilds the instance data.
    fn step(&mut self, dt: f32) {
        self.instances.clear();
        for (spin, offset) in self.spins.iter_mut().zip(&self.layout.offsets) {
            let angle = spin.advance(dt);
            self.instances
                .push(QuadInstance::new(angle, self.layout.scale, *offset));
        }
    }
}

impl Renderer for InstancedQuads {
    fn name(&self) -> &'static str {
        "instanced-quads"
    }

    fn resize(&mut self, ctx: &RenderCtx<'_>) -> Result<(), RendererError> {
        self.layout = GridLayout::compute(ctx.viewport, self.per_side)?;
        Ok(())
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameState) {
        if self.resources.is_released() {
            return;
        }

        self.step(frame.time.dt);
        if self.instances.is_empty() {
            return;
        }
        ctx.queue
            .write_buffer(&self.instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut rpass = target.begin_load_pass("instanced quads pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, self.instance_vbo.slice(..));
        rpass.draw(0..INSTANCE_QUAD.len() as u32, 0..self.instances.len() as u32);
    }

    fn release(&mut self, current: Option<ContextId>) -> bool {
        self.resources.release(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn square_viewport_fills_full_grid() {
        let grid = GridLayout::compute(Viewport::new(400.0, 400.0), 4).unwrap();
        assert_eq!(grid.cell_count(), 16);
        assert_eq!(grid.scale, [0.25, 0.25]);
        assert_eq!(grid.offsets[0], [-0.75, -0.75]);
        assert_eq!(grid.offsets[15], [0.75, 0.75]);
    }

    #[test]
    fn landscape_keeps_cells_square_on_screen() {
        let grid = GridLayout::compute(Viewport::new(200.0, 100.0), 4).unwrap();
        assert_eq!(grid.cell_count(), 8);
        assert_relative_eq!(grid.scale[0], 0.25);
        assert_relative_eq!(grid.scale[1], 0.5);
        // Half extents in pixels: 0.25 * 100 and 0.5 * 50.
        assert_relative_eq!(grid.scale[0] * 100.0, grid.scale[1] * 50.0);

        let ys: Vec<f32> = grid.offsets.iter().take(2).map(|o| o[1]).collect();
        assert_relative_eq!(ys[0], -0.5);
        assert_relative_eq!(ys[1], 0.5);
    }

    #[test]
    fn portrait_swaps_axes() {
        let grid = GridLayout::compute(Viewport::new(100.0, 200.0), 4).unwrap();
        assert_eq!(grid.cell_count(), 8);
        assert_relative_eq!(grid.scale[0], 0.5);
        assert_relative_eq!(grid.scale[1], 0.25);
    }

    #[test]
    fn extreme_aspect_still_has_one_row() {
        let grid = GridLayout::compute(Viewport::new(10_000.0, 10.0), 4).unwrap();
        assert_eq!(grid.cell_count(), 4);
    }

    #[test]
    fn per_side_clamped() {
        let grid = GridLayout::compute(Viewport::new(100.0, 100.0), 0).unwrap();
        assert_eq!(grid.cell_count(), 1);
        let grid = GridLayout::compute(Viewport::new(100.0, 100.0), 1000).unwrap();
        assert_eq!(grid.cell_count(), (MAX_INSTANCES_PER_SIDE * MAX_INSTANCES_PER_SIDE) as usize);
    }

    #[test]
    fn invalid_viewport_rejected() {
        assert!(GridLayout::compute(Viewport::new(0.0, 100.0), 4).is_err());
    }

    #[test]
    fn instance_matrix_rotates_and_scales() {
        let inst = QuadInstance::new(90.0, [2.0, 3.0], [0.1, 0.2]);
        assert_relative_eq!(inst.scale_rot[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(inst.scale_rot[1], 3.0, epsilon = 1e-6);
        assert_relative_eq!(inst.scale_rot[2], -2.0, epsilon = 1e-6);
        assert_relative_eq!(inst.scale_rot[3], 0.0, epsilon = 1e-6);
        assert_eq!(inst.offset, [0.1, 0.2]);
    }

    #[test]
    fn spins_are_reproducible_and_bounded() {
        let a = seeded_spins(32, 7);
        let b = seeded_spins(32, 7);
        assert_eq!(a, b);
        for s in &a {
            assert!((0.0..360.0).contains(&s.angle_deg));
            assert!(s.degrees_per_second.abs() <= MAX_DEGREES_PER_SECOND);
        }
        assert_ne!(seeded_spins(32, 8), a);
    }

    #[test]
    fn instance_stride_matches_shader_inputs() {
        assert_eq!(QuadInstance::layout().array_stride, 24);
    }
}
