use pixels::Pixels;

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

/// Windowed renderer built on `pixels`.
///
/// Game code draws through `Renderer2d` into the pixel buffer; this type owns
/// resizing and presenting that buffer to the window surface.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer2d {
    /// A window that starts minimised reports 0x0; the buffer then starts at 1x1.
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, pixels::Error> {
        let extent = buffer_extent(size);
        pixels.resize_buffer(extent.width, extent.height)?;
        Ok(Self {
            pixels,
            size: extent,
        })
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), pixels::Error> {
        if size.is_empty() {
            // Minimised windows report 0x0; keep the last buffer until we are visible again.
            return Ok(());
        }
        self.size = size;
        self.pixels.resize_surface(size.width, size.height)?;
        self.pixels.resize_buffer(size.width, size.height)?;
        Ok(())
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.size);
        cpu.begin_frame(self.size);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

pub(crate) fn buffer_extent(size: SurfaceSize) -> SurfaceSize {
    if size.is_empty() {
        SurfaceSize::new(1, 1)
    } else {
        size
    }
}
