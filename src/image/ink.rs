//! Shared, inverted page buffer with crop windows.
//!
//! The page is inverted once so that ink is bright and paper is dark. Every
//! crop of the page is a window into the same `Arc` buffer; cropping never
//! copies pixels.

use super::ImageU8;
use crate::error::{LedgerError, LedgerResult};
use crate::types::Crop;
use image::GrayImage;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct InkImage {
    buffer: Arc<[u8]>,
    stride: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
}

impl InkImage {
    /// Invert a grayscale page into an ink buffer.
    pub fn from_gray(gray: &GrayImage) -> Self {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let inverted: Vec<u8> = gray.as_raw().iter().map(|&v| 255 - v).collect();
        Self::packed(width, height, inverted)
    }

    /// Wrap a buffer that already holds ink intensities (bright = ink).
    pub fn from_ink(width: usize, height: usize, data: Vec<u8>) -> LedgerResult<Self> {
        if data.len() != width * height {
            return Err(LedgerError::BufferSize {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self::packed(width, height, data))
    }

    fn packed(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            buffer: data.into(),
            stride: width,
            x0: 0,
            y0: 0,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Window obtained by removing `crop` margins; shares the pixel buffer.
    pub fn crop(&self, crop: &Crop) -> LedgerResult<InkImage> {
        let (width, height) =
            crop.remaining(self.width, self.height)
                .ok_or(LedgerError::EmptyCrop {
                    crop: *crop,
                    width: self.width,
                    height: self.height,
                })?;
        Ok(InkImage {
            buffer: Arc::clone(&self.buffer),
            stride: self.stride,
            x0: self.x0 + crop.left,
            y0: self.y0 + crop.top,
            width,
            height,
        })
    }

    /// Sub-window `[x, x+w) × [y, y+h)` in local coordinates, clamped to
    /// this window. May be empty.
    pub fn window(&self, x: usize, y: usize, w: usize, h: usize) -> InkImage {
        let x = x.min(self.width);
        let y = y.min(self.height);
        InkImage {
            buffer: Arc::clone(&self.buffer),
            stride: self.stride,
            x0: self.x0 + x,
            y0: self.y0 + y,
            width: w.min(self.width - x),
            height: h.min(self.height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrow the window as a strided view.
    pub fn view(&self) -> ImageU8<'_> {
        if self.width == 0 || self.height == 0 {
            return ImageU8::empty();
        }
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.buffer[self.y0 * self.stride + self.x0..],
        }
    }
}
