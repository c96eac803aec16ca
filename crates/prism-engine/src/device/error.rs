/// What the frame loop does after the surface refused to hand out a texture.
///
/// Only `Fatal` ends the run; the other two keep the current renderer and its
/// context alive and simply draw nothing this frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated surface, configured again at the current size.
    Reconfigured,
    /// Timeout or other transient failure.
    SkipFrame,
    /// Out of memory.
    Fatal,
}
