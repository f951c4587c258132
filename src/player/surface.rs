use crate::{
    animation::state::FrameState,
    foundation::core::{Canvas, FrameRgba},
    foundation::error::PlayheadResult,
};

/// A render target owned by the player for one surface lifetime (from mount
/// or resize until the next resize).
///
/// Implementations hold whatever mutable state their drawing recipe needs
/// (a raster context, a simulation world). The player guarantees `draw` is
/// invoked with `t == 0` at least once after every reset and at the start of
/// every recording session, which implementations may treat as the signal to
/// reinitialize internal simulation state.
pub trait DrawSurface {
    /// Pixel dimensions of the target.
    fn canvas(&self) -> Canvas;

    /// Render one frame from the given state.
    fn draw(&mut self, state: &FrameState) -> PlayheadResult<()>;

    /// Read back the most recently drawn frame.
    fn read_pixels(&mut self) -> PlayheadResult<FrameRgba>;
}

/// Builds a [`DrawSurface`] for a canvas size.
///
/// Called exactly once per surface acquisition; a resize discards the old
/// surface and asks the factory for a fresh one.
pub trait SurfaceFactory {
    fn create(&mut self, canvas: Canvas) -> PlayheadResult<Box<dyn DrawSurface>>;
}

impl<F> SurfaceFactory for F
where
    F: FnMut(Canvas) -> PlayheadResult<Box<dyn DrawSurface>>,
{
    fn create(&mut self, canvas: Canvas) -> PlayheadResult<Box<dyn DrawSurface>> {
        self(canvas)
    }
}
