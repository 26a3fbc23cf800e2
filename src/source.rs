use crate::foundation::error::ReelResult;
use crate::render::draw::DrawContext;

/// What a frame source reports after being asked for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was drawn and should be encoded.
    Drawn,
    /// The sequence has ended; nothing drawn by this call is encoded.
    Finished,
}

/// Decides what each frame looks like and when the sequence ends.
///
/// Called once per frame with strictly increasing `time` (seconds). Static outputs call it once
/// at an arbitrary time and ignore the returned status.
pub trait FrameSource {
    fn render_frame(&mut self, ctx: &mut DrawContext, time: f64) -> ReelResult<FrameStatus>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn render_frame(&mut self, ctx: &mut DrawContext, time: f64) -> ReelResult<FrameStatus> {
        (**self).render_frame(ctx, time)
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn render_frame(&mut self, ctx: &mut DrawContext, time: f64) -> ReelResult<FrameStatus> {
        (**self).render_frame(ctx, time)
    }
}

/// Frame source backed by a closure. See [`from_fn`].
pub struct FnSource<F>(F);

/// Adapt `f(ctx, time)` into a [`FrameSource`].
pub fn from_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut(&mut DrawContext, f64) -> ReelResult<FrameStatus>,
{
    FnSource(f)
}

impl<F> FrameSource for FnSource<F>
where
    F: FnMut(&mut DrawContext, f64) -> ReelResult<FrameStatus>,
{
    fn render_frame(&mut self, ctx: &mut DrawContext, time: f64) -> ReelResult<FrameStatus> {
        (self.0)(ctx, time)
    }
}
