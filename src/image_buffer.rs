use crate::geometry::FloatType;
use crate::util::{BLACK, Color, ColorExt as _};

/// Linear-color raster with a bottom-left origin.
///
/// Pixels are stored column-major (all of column 0, then column 1, ...), so a
/// contiguous range of columns is a contiguous slice and the renderer can hand
/// disjoint `chunks_mut` partitions to its workers.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[x as usize * self.height as usize + y as usize]
    }

    pub(crate) fn data_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Pure post-process applying `c' = c^(1/gamma)` per channel.
    pub fn gamma_corrected(&self, gamma: FloatType) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .map(|color| color.gamma_corrected(gamma))
                .collect(),
        }
    }

    /// Converts to an 8-bit raster, flipping to the top-left origin image
    /// files expect.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixel(x, self.height - 1 - y).clamped();
            image::Rgb([
                (color.r * 255.0).round() as u8,
                (color.g * 255.0).round() as u8,
                (color.b * 255.0).round() as u8,
            ])
        })
    }
}
