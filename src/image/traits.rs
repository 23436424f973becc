/// Read-only access to an RGBA raster.
///
/// Implemented by the borrowed [`ImageRgba8`](super::ImageRgba8) view and by
/// `image::RgbaImage`, so decoded images can be analysed without a copy.
/// Views are shared read-only across the sweep, hence `Sync`.
pub trait ImageView: Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// RGBA channels at `(x, y)`. Callers are expected to check
    /// [`ImageView::contains`] first.
    fn pixel(&self, x: usize, y: usize) -> [u8; 4];

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Perceptual luminosity of the pixel at `(x, y)`.
    fn luminosity(&self, x: usize, y: usize) -> i32 {
        crate::sampling::luminosity(self.pixel(x, y))
    }
}

impl ImageView for image::RgbaImage {
    #[inline]
    fn width(&self) -> usize {
        self.width() as usize
    }
    #[inline]
    fn height(&self) -> usize {
        self.height() as usize
    }
    #[inline]
    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.get_pixel(x as u32, y as u32).0
    }
}
