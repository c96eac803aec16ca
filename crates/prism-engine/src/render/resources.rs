use crate::device::ContextId;

/// Remembers which GPU context created a set of objects and decides, once,
/// whether they may be destroyed.
///
/// Objects may only be destroyed through the context that created them. When
/// that context is gone (the platform tore it down on suspend, or a new one
/// replaced it) its objects went with it and the release is skipped.
#[derive(Debug, Clone)]
pub struct ContextGuard {
    owner: ContextId,
    released: bool,
}

impl ContextGuard {
    pub fn new(owner: ContextId) -> Self {
        Self {
            owner,
            released: false,
        }
    }

    #[inline]
    pub fn owner(&self) -> ContextId {
        self.owner
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Returns `true` exactly once, and only if `current` is the owning context.
    ///
    /// After any call the guard is spent: a later call never returns `true`.
    pub fn take_release(&mut self, current: Option<ContextId>) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        current == Some(self.owner)
    }
}

/// GPU objects owned by one renderer, destroyed together on release.
///
/// Pipelines, bind groups, views and samplers have no explicit destroy in wgpu
/// and are freed when the renderer drops them; buffers and textures are
/// destroyed eagerly so their memory returns before the renderer is dropped.
pub struct GpuResources {
    guard: ContextGuard,
    buffers: Vec<wgpu::Buffer>,
    textures: Vec<wgpu::Texture>,
}

impl GpuResources {
    pub fn new(owner: ContextId) -> Self {
        Self {
            guard: ContextGuard::new(owner),
            buffers: Vec::new(),
            textures: Vec::new(),
        }
    }

    /// Tracks `buffer` and hands it back for use.
    pub fn buffer(&mut self, buffer: wgpu::Buffer) -> wgpu::Buffer {
        self.buffers.push(buffer.clone());
        buffer
    }

    /// Tracks `texture` and hands it back for use.
    pub fn texture(&mut self, texture: wgpu::Texture) -> wgpu::Texture {
        self.textures.push(texture.clone());
        texture
    }

    pub fn is_released(&self) -> bool {
        self.guard.is_released()
    }

    /// Destroys the tracked objects if `current` is the owning context.
    ///
    /// Returns whether anything was destroyed. Idempotent.
    pub fn release(&mut self, current: Option<ContextId>) -> bool {
        let destroy = self.guard.take_release(current);
        let buffers = std::mem::take(&mut self.buffers);
        let textures = std::mem::take(&mut self.textures);

        if !destroy {
            log::debug!(
                "{}: not current (current: {current:?}); skipping release",
                self.guard.owner()
            );
            return false;
        }

        for b in &buffers {
            b.destroy();
        }
        for t in &textures {
            t.destroy();
        }
        log::debug!(
            "{}: released {} buffer(s), {} texture(s)",
            self.guard.owner(),
            buffers.len(),
            textures.len()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ctx::test_support::{validation_error, NoopGpu};

    fn tracked_buffer(gpu: &NoopGpu, res: &mut GpuResources) -> wgpu::Buffer {
        res.buffer(gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tracked"),
            size: 16,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    fn writable(gpu: &NoopGpu, buffer: &wgpu::Buffer) -> bool {
        validation_error(&gpu.device, || gpu.queue.write_buffer(buffer, 0, &[0u8; 16])).is_none()
    }

    #[test]
    fn release_in_owning_context() {
        let owner = ContextId::next();
        let mut guard = ContextGuard::new(owner);
        assert!(guard.take_release(Some(owner)));
        assert!(guard.is_released());
    }

    #[test]
    fn release_is_one_shot() {
        let owner = ContextId::next();
        let mut guard = ContextGuard::new(owner);
        assert!(guard.take_release(Some(owner)));
        assert!(!guard.take_release(Some(owner)));
    }

    #[test]
    fn foreign_context_skips_release() {
        let owner = ContextId::next();
        let other = ContextId::next();
        let mut guard = ContextGuard::new(owner);
        assert!(!guard.take_release(Some(other)));
        // Spent even though nothing was destroyed.
        assert!(!guard.take_release(Some(owner)));
    }

    #[test]
    fn no_current_context_skips_release() {
        let mut guard = ContextGuard::new(ContextId::next());
        assert!(!guard.take_release(None));
        assert!(guard.is_released());
    }

    #[test]
    fn empty_resources_release_only_in_owner() {
        let owner = ContextId::next();
        let mut res = GpuResources::new(owner);
        assert!(!res.release(Some(ContextId::next())));
        assert!(res.is_released());

        let mut res = GpuResources::new(owner);
        assert!(res.release(Some(owner)));
        assert!(!res.release(Some(owner)));
    }

    #[test]
    fn owning_context_destroys_tracked_buffers() {
        let gpu = NoopGpu::new();
        let mut res = GpuResources::new(gpu.context);
        let buffer = tracked_buffer(&gpu, &mut res);
        assert!(writable(&gpu, &buffer));

        assert!(res.release(Some(gpu.context)));
        assert!(!writable(&gpu, &buffer));
    }

    #[test]
    fn foreign_context_leaves_tracked_buffers_alone() {
        let gpu = NoopGpu::new();
        let mut res = GpuResources::new(gpu.context);
        let buffer = tracked_buffer(&gpu, &mut res);

        assert!(!res.release(Some(ContextId::next())));
        assert!(writable(&gpu, &buffer));

        // Spent: the owner can no longer destroy them either.
        assert!(!res.release(Some(gpu.context)));
        assert!(writable(&gpu, &buffer));
    }
}
