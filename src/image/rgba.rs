/// Borrowed 8-bit RGBA image in row-major order.
#[derive(Clone, Debug)]
pub struct ImageRgba8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageRgba8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = y * self.stride + x * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

impl<'a> crate::image::traits::ImageView for ImageRgba8<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.get(x, y)
    }
}
