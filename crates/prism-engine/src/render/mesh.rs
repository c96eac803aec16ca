//! Vertex formats and the static geometry the samples upload once.
//!
//! All positions are clip-space; every mesh is drawn as a triangle strip.

use bytemuck::{Pod, Zeroable};

// ── color vertex ──────────────────────────────────────────────────────────

/// Position + straight RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x4  // color
    ];

    pub const fn new(pos: [f32; 3], color: [f32; 4]) -> Self {
        Self { pos, color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── textured vertex ───────────────────────────────────────────────────────

/// Position + texture coordinate (top-left origin).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x2  // uv
    ];

    pub const fn new(pos: [f32; 3], uv: [f32; 2]) -> Self {
        Self { pos, uv }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── instanced quad vertex ─────────────────────────────────────────────────

/// 2D position + 8-bit color, expanded per instance by a scale/rotation
/// matrix and an offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
    pub rgba: [u8; 4],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Unorm8x4   // color
    ];

    pub const fn new(pos: [f32; 2], rgba: [u8; 4]) -> Self {
        Self { pos, rgba }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── sample geometry ───────────────────────────────────────────────────────

const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Quad at ±0.8: bottom-left, bottom-right, top-left, top-right.
///
/// Counter-clockwise when viewed from +Z, so back-face culling hides it once
/// it has rotated more than a quarter turn.
pub const COLOR_QUAD: [ColorVertex; 4] = [
    ColorVertex::new([-0.8, -0.8, 0.0], YELLOW),
    ColorVertex::new([0.8, -0.8, 0.0], RED),
    ColorVertex::new([-0.8, 0.8, 0.0], GREEN),
    ColorVertex::new([0.8, 0.8, 0.0], BLUE),
];

/// Single triangle: apex, bottom-left, bottom-right.
pub const COLOR_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex::new([0.0, 1.0, 0.0], RED),
    ColorVertex::new([-1.0, -1.0, 0.0], GREEN),
    ColorVertex::new([1.0, -1.0, 0.0], BLUE),
];

/// Quad at ±0.8 with the image's top row mapped to the top edge.
pub const TEXTURED_QUAD: [TexturedVertex; 4] = [
    TexturedVertex::new([-0.8, -0.8, 0.0], [0.0, 1.0]),
    TexturedVertex::new([0.8, -0.8, 0.0], [1.0, 1.0]),
    TexturedVertex::new([-0.8, 0.8, 0.0], [0.0, 0.0]),
    TexturedVertex::new([0.8, 0.8, 0.0], [1.0, 0.0]),
];

/// Unit quad at ±0.7 for the instanced sample.
pub const INSTANCE_QUAD: [QuadVertex; 4] = [
    QuadVertex::new([-0.7, -0.7], [0x00, 0xFF, 0x00, 0xFF]),
    QuadVertex::new([0.7, -0.7], [0x00, 0x00, 0xFF, 0xFF]),
    QuadVertex::new([-0.7, 0.7], [0xFF, 0x00, 0x00, 0xFF]),
    QuadVertex::new([0.7, 0.7], [0xFF, 0xFF, 0xFF, 0xFF]),
];
