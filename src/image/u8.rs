use super::ImageView;

/// Borrowed 8-bit view into a (possibly larger) strided buffer.
///
/// `data` starts at the view's top-left pixel; rows are `stride` bytes apart,
/// so a window of a parent buffer is expressed without copying.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// View over a tightly packed buffer.
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        debug_assert!(data.len() >= w * h);
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    pub fn empty() -> ImageU8<'static> {
        ImageU8 {
            w: 0,
            h: 0,
            stride: 0,
            data: &[],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Mean intensity over the view; zero for an empty view.
    pub fn mean(&self) -> f64 {
        if self.w == 0 || self.h == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .rows()
            .map(|row| row.iter().map(|&v| v as u64).sum::<u64>())
            .sum();
        sum as f64 / (self.w * self.h) as f64
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_rows_skip_padding() {
        let data: Vec<u8> = (0..48).collect();
        let view = ImageU8 {
            w: 3,
            h: 2,
            stride: 8,
            data: &data[10..],
        };
        assert_eq!(view.row(0), &[10, 11, 12]);
        assert_eq!(view.row(1), &[18, 19, 20]);
        assert_eq!(view.get(2, 1), 20);
    }

    #[test]
    fn empty_view_has_zero_mean() {
        let none = ImageU8::empty();
        assert!(none.is_empty());
        assert_eq!(none.mean(), 0.0);
    }

    #[test]
    fn mean_and_ink_points() {
        let data = vec![0u8, 255, 255, 0, 100, 0];
        let view = ImageU8::packed(3, 2, &data);
        assert!((view.mean() - 610.0 / 6.0).abs() < 1e-9);
        assert_eq!(view.ink_points(99), vec![(1, 0), (2, 0), (1, 1)]);
    }
}
