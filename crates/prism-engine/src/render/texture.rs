//! Texture loading: decode on the CPU with `image`, upload as RGBA8 sRGB.

use std::path::{Path, PathBuf};

use super::{RenderCtx, RendererError};

/// Decoded RGBA8 image, ready for upload.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes the image file at `path`; the format is guessed from its contents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RendererError> {
        let path = path.as_ref();
        let img = image::ImageReader::open(path)
            .map_err(|e| RendererError::TextureLoad {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(e),
            })?
            .with_guessed_format()
            .map_err(|e| RendererError::TextureLoad {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|source| RendererError::TextureLoad {
                path: path.to_path_buf(),
                source,
            })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {} ({width}x{height})", path.display());

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Decodes an in-memory encoded image. `origin` is only used for error reporting.
    pub fn from_bytes(bytes: &[u8], origin: impl Into<PathBuf>) -> Result<Self, RendererError> {
        let img = image::load_from_memory(bytes).map_err(|source| RendererError::TextureLoad {
            path: origin.into(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Bytes per row of tightly packed RGBA8 data.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        4 * self.width
    }

    fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Texture + view + sampler triple owned by a textured renderer.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Uploads `image` into a sampled 2D texture with a linear, edge-clamped sampler.
    pub fn upload(
        ctx: &RenderCtx<'_>,
        image: &TextureImage,
        label: &str,
    ) -> Result<Self, RendererError> {
        let max = ctx.device.limits().max_texture_dimension_2d;
        if image.width > max || image.height > max {
            return Err(RendererError::TextureTooLarge {
                width: image.width,
                height: image.height,
                max,
            });
        }

        let size = image.extent();
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}
