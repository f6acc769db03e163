//! Annotated page rendering for visual review.

use crate::detector::{Overlay, OverlayKind};
use crate::error::LedgerResult;
use crate::image::io::save_rgba_image;
use image::{GrayImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, Blend};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

const ALPHA: u8 = 128;

/// Fill colour of each overlay kind.
pub fn overlay_color(kind: OverlayKind) -> [u8; 3] {
    match kind {
        OverlayKind::RowLabel => [0xfe, 0xb2, 0x09],
        OverlayKind::ColumnLabel => [0x06, 0x9a, 0xf3],
        OverlayKind::Mark => [0x39, 0xad, 0x48],
    }
}

/// `<dir>/<stem>_out.png`.
pub fn overlay_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{file_name}_out.png"))
}

/// The page in gray with every overlay blended on top, clipped to the page.
pub fn render_overlay(page: &GrayImage, overlays: &[Overlay]) -> RgbaImage {
    let (w, h) = page.dimensions();
    let mut canvas = Blend(RgbaImage::from_fn(w, h, |x, y| {
        let v = page.get_pixel(x, y)[0];
        Rgba([v, v, v, 255])
    }));
    for overlay in overlays {
        let patch = &overlay.patch;
        let x0 = patch.origin.x.clamp(0, w as i32);
        let y0 = patch.origin.y.clamp(0, h as i32);
        let x1 = (patch.origin.x + patch.width).clamp(0, w as i32);
        let y1 = (patch.origin.y + patch.height).clamp(0, h as i32);
        if x1 <= x0 || y1 <= y0 {
            continue;
        }
        let [r, g, b] = overlay_color(overlay.kind);
        let rect = Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut canvas, rect, Rgba([r, g, b, ALPHA]));
    }
    canvas.0
}

/// Render and save the overlay for one page; returns the written path.
pub fn save_overlay(
    page: &GrayImage,
    overlays: &[Overlay],
    dir: &Path,
    file_name: &str,
) -> LedgerResult<PathBuf> {
    let path = overlay_path(dir, file_name);
    save_rgba_image(&render_overlay(page, overlays), &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Patch, Point};

    fn near(actual: Rgba<u8>, expected: [u8; 4]) -> bool {
        actual.0.iter().zip(expected).all(|(&a, e)| a.abs_diff(e) <= 2)
    }

    fn mark(x: i32, y: i32, width: i32, height: i32) -> Overlay {
        Overlay {
            kind: OverlayKind::Mark,
            patch: Patch {
                origin: Point::new(x, y),
                width,
                height,
            },
        }
    }

    #[test]
    fn patches_are_blended_and_clipped() {
        let page = GrayImage::from_pixel(10, 10, image::Luma([255]));
        let out = render_overlay(&page, &[mark(6, -2, 8, 5)]);
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
        // half way between white and the mark green
        let tinted = *out.get_pixel(9, 2);
        assert!(near(tinted, [156, 214, 164, 255]), "got {tinted:?}");
        assert_eq!(*out.get_pixel(6, 0), tinted);
        assert_eq!(out.get_pixel(5, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(9, 3).0, [255, 255, 255, 255]);
    }

    #[test]
    fn patches_outside_the_page_leave_it_untouched() {
        let page = GrayImage::from_fn(8, 6, |x, y| image::Luma([(x * 30 + y) as u8]));
        let overlays = [mark(-5, 1, 5, 3), mark(2, 6, 4, 4), mark(3, 2, 0, 2)];
        let out = render_overlay(&page, &overlays);
        for (x, y, px) in out.enumerate_pixels() {
            let v = page.get_pixel(x, y)[0];
            assert_eq!(px.0, [v, v, v, 255]);
        }
    }

    #[test]
    fn overlay_file_is_named_after_the_page() {
        assert_eq!(
            overlay_path(Path::new("output"), "page_01"),
            PathBuf::from("output/page_01_out.png")
        );
    }
}
