/// Size used when the surface reports a zero dimension (minimized window,
/// surface not yet configured)
pub const FALLBACK_WIDTH: u32 = 800;
pub const FALLBACK_HEIGHT: u32 = 600;

/// Window dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Replace a zero dimension with the fallback 800×600
    pub fn or_fallback(self) -> Self {
        if self.width == 0 || self.height == 0 {
            Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        let dims = self.or_fallback();
        dims.width as f32 / dims.height as f32
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for WindowDimensions {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}
