//! Raster rendering of encoded symbols
//!
//! Each module becomes a square block of pixels, centered in the requested
//! canvas with at least `quiet_zone` light modules on every side.
//! Pixels are 8-bit grayscale: 0 is dark, 255 is light.

use crate::encoder::{EncodeHints, QrEncoder};
use crate::error::{QrError, Result};
use crate::models::QrSymbol;
use image::GrayImage;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Largest canvas `render_raster` will allocate (16384 x 16384)
pub const MAX_RASTER_PIXELS: usize = 1 << 28;

/// Row-major grayscale pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// `width * height` bytes
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Pixel at (x, y)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Convert into an `image` buffer
    pub fn into_image(self) -> Result<GrayImage> {
        let width = to_u32(self.width)?;
        let height = to_u32(self.height)?;
        GrayImage::from_raw(width, height, self.pixels)
            .ok_or_else(|| QrError::Internal("raster size does not match its pixels".to_string()))
    }
}

/// Encodes text and renders it to a grayscale image
pub struct QrWriter;

impl QrWriter {
    /// Encode `contents` and render it at no less than `width` x `height`
    pub fn encode(
        contents: &str,
        width: u32,
        height: u32,
        hints: &EncodeHints,
    ) -> Result<GrayImage> {
        if contents.is_empty() {
            return Err(QrError::InvalidInput("found empty contents".to_string()));
        }
        if width == 0 || height == 0 {
            return Err(QrError::InvalidInput(format!(
                "requested dimensions are too small: {}x{}",
                width, height
            )));
        }
        let symbol = QrEncoder::encode(contents, hints)?;
        Self::render(&symbol, width, height, hints.quiet_zone)
    }

    /// Render an already encoded symbol to an image
    pub fn render(
        symbol: &QrSymbol,
        width: u32,
        height: u32,
        quiet_zone: usize,
    ) -> Result<GrayImage> {
        render_raster(symbol, width as usize, height as usize, quiet_zone)?.into_image()
    }
}

/// Scale `symbol` by the largest whole factor that fits the canvas.
///
/// The canvas grows to the symbol plus quiet zone when the request is
/// smaller; leftover pixels split evenly as extra light border.
pub fn render_raster(
    symbol: &QrSymbol,
    width: usize,
    height: usize,
    quiet_zone: usize,
) -> Result<Raster> {
    if width == 0 || height == 0 {
        return Err(QrError::InvalidInput(format!(
            "requested dimensions are too small: {}x{}",
            width, height
        )));
    }
    let matrix = symbol.matrix();
    if !matrix.is_complete() {
        return Err(QrError::Internal("symbol has unset modules".to_string()));
    }
    let input_width = matrix.width();
    let input_height = matrix.height();
    let too_large = || {
        QrError::InvalidInput(format!(
            "quiet zone {} with a {}x{} canvas exceeds {} pixels",
            quiet_zone, width, height, MAX_RASTER_PIXELS
        ))
    };
    let border = quiet_zone.checked_mul(2).ok_or_else(too_large)?;
    let qr_width = input_width.checked_add(border).ok_or_else(too_large)?;
    let qr_height = input_height.checked_add(border).ok_or_else(too_large)?;
    let output_width = width.max(qr_width);
    let output_height = height.max(qr_height);
    let num_pixels = output_width
        .checked_mul(output_height)
        .filter(|&n| n <= MAX_RASTER_PIXELS)
        .ok_or_else(too_large)?;

    let multiple = (output_width / qr_width).min(output_height / qr_height);
    let left_padding = (output_width - input_width * multiple) / 2;
    let top_padding = (output_height - input_height * multiple) / 2;

    let mut pixels = vec![LIGHT; num_pixels];
    for input_y in 0..input_height {
        let output_y = top_padding + input_y * multiple;
        for input_x in 0..input_width {
            if !matrix.get(input_x, input_y).is_dark() {
                continue;
            }
            let output_x = left_padding + input_x * multiple;
            for y in output_y..output_y + multiple {
                let row = y * output_width;
                pixels[row + output_x..row + output_x + multiple].fill(DARK);
            }
        }
    }

    Ok(Raster {
        width: output_width,
        height: output_height,
        pixels,
    })
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        QrError::InvalidArgument(format!("image dimension {} does not fit in u32", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ECLevel;

    fn symbol(content: &str) -> QrSymbol {
        QrEncoder::encode(content, &EncodeHints::with_error_correction(ECLevel::L)).unwrap()
    }

    #[test]
    fn test_small_request_grows_to_minimum() {
        let qr = symbol("HELLO WORLD");
        let raster = render_raster(&qr, 1, 1, 4).unwrap();
        assert_eq!(raster.width, 29);
        assert_eq!(raster.height, 29);
        // Finder corner sits right after the quiet zone
        assert_eq!(raster.get(4, 4), DARK);
        assert_eq!(raster.get(3, 4), LIGHT);
    }

    #[test]
    fn test_scaling_and_centering() {
        let qr = symbol("HELLO WORLD");
        // 100 / 29 = 3, padding (100 - 63) / 2 = 18
        let raster = render_raster(&qr, 100, 100, 4).unwrap();
        assert_eq!(raster.width, 100);
        for y in 0..21 {
            for x in 0..21 {
                let expected = if qr.is_dark(x, y) { DARK } else { LIGHT };
                for dy in 0..3 {
                    for dx in 0..3 {
                        assert_eq!(raster.get(18 + x * 3 + dx, 18 + y * 3 + dy), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let qr = symbol("HELLO WORLD");
        let raster = render_raster(&qr, 58, 58, 4).unwrap();
        // multiple 2, padding 8
        for y in 0..58 {
            for x in 0..58 {
                let inside = (8..50).contains(&x) && (8..50).contains(&y);
                if !inside {
                    assert_eq!(raster.get(x, y), LIGHT, "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_zero_quiet_zone() {
        let qr = symbol("HELLO WORLD");
        let raster = render_raster(&qr, 21, 21, 0).unwrap();
        assert_eq!(raster.width, 21);
        assert_eq!(raster.get(0, 0), DARK);
    }

    #[test]
    fn test_non_square_canvas() {
        let qr = symbol("HELLO WORLD");
        let raster = render_raster(&qr, 200, 60, 4).unwrap();
        assert_eq!((raster.width, raster.height), (200, 60));
        // multiple 2, left (200 - 42) / 2 = 79, top (60 - 42) / 2 = 9
        assert_eq!(raster.get(79, 9), DARK);
        assert_eq!(raster.get(78, 9), LIGHT);
    }

    #[test]
    fn test_writer_encode() {
        let hints = EncodeHints::default();
        let image = QrWriter::encode("HELLO WORLD", 100, 100, &hints).unwrap();
        assert_eq!(image.dimensions(), (100, 100));
        assert_eq!(image.get_pixel(0, 0).0, [LIGHT]);
        assert_eq!(image.get_pixel(18, 18).0, [DARK]);
    }

    #[test]
    fn test_oversized_quiet_zone_is_rejected() {
        let qr = symbol("HELLO WORLD");
        for quiet_zone in [usize::MAX, usize::MAX / 2, 1 << 20] {
            assert!(
                matches!(
                    render_raster(&qr, 100, 100, quiet_zone),
                    Err(QrError::InvalidInput(_))
                ),
                "quiet zone {}",
                quiet_zone
            );
        }
        assert!(matches!(
            render_raster(&qr, usize::MAX, usize::MAX, 4),
            Err(QrError::InvalidInput(_))
        ));
        // Largest accepted canvas still renders
        assert!(render_raster(&qr, 16384, 1, 4).is_ok());

        let hints = EncodeHints {
            quiet_zone: usize::MAX,
            ..EncodeHints::default()
        };
        assert!(matches!(
            QrWriter::encode("HELLO WORLD", 100, 100, &hints),
            Err(QrError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_writer_rejects_bad_input() {
        let hints = EncodeHints::default();
        assert!(matches!(
            QrWriter::encode("", 100, 100, &hints),
            Err(QrError::InvalidInput(_))
        ));
        assert!(matches!(
            QrWriter::encode("HELLO", 0, 100, &hints),
            Err(QrError::InvalidInput(_))
        ));
        assert!(matches!(
            QrWriter::encode("HELLO", 100, 0, &hints),
            Err(QrError::InvalidInput(_))
        ));
    }
}
