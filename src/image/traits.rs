/// Read-only access to a row-major single-channel image.
///
/// Rows may be padded (`stride >= width`); `row` only returns the visible
/// pixels.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Coordinates of every pixel brighter than `threshold`, in raster order.
    fn ink_points(&self, threshold: Self::Pixel) -> Vec<(usize, usize)>
    where
        Self: Sized,
        Self::Pixel: PartialOrd,
    {
        let mut points = Vec::new();
        for (y, row) in self.rows().enumerate() {
            points.extend(
                row.iter()
                    .enumerate()
                    .filter(|&(_, &v)| v > threshold)
                    .map(|(x, _)| (x, y)),
            );
        }
        points
    }
}

/// Row iterator returned by [`ImageView::rows`].
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
