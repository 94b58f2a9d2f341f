//! Top-left pixel matrix of an image, showing the blue channel and its LSB.

use image::RgbaImage;
use serde::Serialize;
use std::fmt;

/// Side of the preview square shown by default.
pub const DEFAULT_PREVIEW_SIDE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelCell {
    pub row: u32,
    pub col: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub lsb: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelMatrix {
    pub width: u32,
    pub height: u32,
    /// Row-major cells
    pub cells: Vec<PixelCell>,
}

/// Collect the top-left `side` x `side` pixels (clipped to the image).
pub fn pixel_matrix(img: &RgbaImage, side: u32) -> PixelMatrix {
    let width = side.min(img.width());
    let height = side.min(img.height());

    let mut cells = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            let [r, g, b, _] = img.get_pixel(col, row).0;
            cells.push(PixelCell {
                row,
                col,
                r,
                g,
                b,
                lsb: b & 1,
            });
        }
    }

    PixelMatrix {
        width,
        height,
        cells,
    }
}

impl fmt::Display for PixelMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            let line: Vec<String> = row
                .iter()
                .map(|c| format!("{:>3}:{}", c.b, c.lsb))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_matrix_clips_to_image() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let matrix = pixel_matrix(&img, DEFAULT_PREVIEW_SIDE);
        assert_eq!((matrix.width, matrix.height), (3, 2));
        assert_eq!(matrix.cells.len(), 6);
        assert!(matrix.cells.iter().all(|c| c.b == 3 && c.lsb == 1));
    }

    #[test]
    fn test_matrix_is_row_major() {
        let img = RgbaImage::from_fn(10, 10, |x, y| Rgba([0, 0, (y * 10 + x) as u8, 255]));
        let matrix = pixel_matrix(&img, 5);
        assert_eq!(matrix.cells.len(), 25);
        assert_eq!(matrix.cells[6].b, 11);
        assert_eq!((matrix.cells[6].row, matrix.cells[6].col), (1, 1));
    }

    #[test]
    fn test_display() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 254, 255]));
        assert_eq!(pixel_matrix(&img, 5).to_string(), "254:0 254:0\n");
    }
}
