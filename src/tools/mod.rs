//! Helpers for the `qrtool` CLI: PNG output, terminal rendering and stats.

use crate::models::QrSymbol;
use image::{GrayImage, ImageResult};
use std::path::Path;

/// Save a rendered symbol, format picked from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &GrayImage, path: P) -> ImageResult<()> {
    image.save(path)
}

/// Draw the symbol with full blocks, two columns per module.
///
/// `invert` swaps dark and light for terminals with a dark background.
pub fn to_ascii(symbol: &QrSymbol, quiet_zone: usize, invert: bool) -> String {
    let width = symbol.matrix_width();
    let border = quiet_zone as isize;
    let span = width as isize + border;
    let mut out = String::with_capacity((width + 2 * quiet_zone) * (width + 2 * quiet_zone + 1) * 2);
    for y in -border..span {
        for x in -border..span {
            let dark = x >= 0 && y >= 0 && symbol.is_dark(x as usize, y as usize);
            out.push_str(if dark != invert { "\u{2588}\u{2588}" } else { "  " });
        }
        out.push('\n');
    }
    out
}

/// Module counts for a finished symbol.
#[derive(Debug, Clone, Copy)]
pub struct ModuleStats {
    /// Count of dark modules.
    pub dark_modules: usize,
    /// Total modules in the symbol.
    pub total_modules: usize,
    /// Ratio of dark modules to total modules.
    pub dark_ratio: f64,
}

/// Compute dark module stats for a symbol.
pub fn module_stats(symbol: &QrSymbol) -> ModuleStats {
    let dark = symbol.matrix().dark_count();
    let width = symbol.matrix_width();
    let total = width * width;
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    ModuleStats {
        dark_modules: dark,
        total_modules: total,
        dark_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeHints, QrEncoder};
    use crate::models::ECLevel;
    use crate::writer::QrWriter;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_png_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("rustqr_encoder_{nanos}_{sequence}.png"));
        path
    }

    fn hello() -> QrSymbol {
        QrEncoder::encode("HELLO WORLD", &EncodeHints::with_error_correction(ECLevel::L)).unwrap()
    }

    #[test]
    fn to_ascii_has_quiet_zone_and_finder() {
        let text = to_ascii(&hello(), 2, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 25);
        assert!(lines[0].chars().all(|c| c == ' '));
        assert_eq!(lines[0].chars().count(), 50);
        // Top row of the top-left finder
        let finder_row: String = lines[2].chars().skip(4).take(14).collect();
        assert_eq!(finder_row, "\u{2588}".repeat(14));
    }

    #[test]
    fn to_ascii_invert_swaps_modules() {
        let symbol = hello();
        let plain = to_ascii(&symbol, 0, false);
        let inverted = to_ascii(&symbol, 0, true);
        for (a, b) in plain.chars().zip(inverted.chars()) {
            if a == '\n' {
                assert_eq!(b, '\n');
            } else {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn module_stats_counts_dark_modules() {
        let symbol = hello();
        let stats = module_stats(&symbol);
        assert_eq!(stats.total_modules, 441);
        assert_eq!(stats.dark_modules, symbol.matrix().dark_count());
        assert!(stats.dark_ratio > 0.3 && stats.dark_ratio < 0.7);
    }

    #[test]
    fn save_and_load_png_round_trips_pixels() {
        let image = QrWriter::render(&hello(), 87, 87, 4).unwrap();
        let path = temp_png_path();
        save_image(&image, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded.dimensions(), image.dimensions());
        assert_eq!(loaded.as_raw(), image.as_raw());
        let _ = fs::remove_file(path);
    }
}
