/// Surface texture acquired by [`super::Gpu::begin_frame`] plus the encoder
/// the clear pass and the active sample record into.
///
/// Hand it back to [`super::Gpu::submit`] in the same redraw; the next frame
/// cannot be acquired while this one is held.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    /// View of `surface_texture`, bound as the sample's color attachment.
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
