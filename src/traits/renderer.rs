use crate::scene::FrameOutput;

/// Consumer of finished frames. Called once per frame after every
/// placement, camera and material update has been applied.
pub trait RenderTarget {
    fn render_frame(&mut self, frame: &FrameOutput) -> anyhow::Result<()>;
}
