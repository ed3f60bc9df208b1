//! Data mask functions and the four penalty rules used to choose between them.

use crate::models::{BitMatrix, MaskPattern, ModuleMatrix};

// Penalty weights from ISO 18004:2006 6.8.2.1
const N1: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: u32 = 10;

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

/// Whether `mask` flips the data module at column `x`, row `y`
pub fn data_mask_bit(mask: MaskPattern, x: usize, y: usize) -> bool {
    let intermediate = match mask {
        MaskPattern::Pattern0 => (y + x) & 0x1,
        MaskPattern::Pattern1 => y & 0x1,
        MaskPattern::Pattern2 => x % 3,
        MaskPattern::Pattern3 => (y + x) % 3,
        MaskPattern::Pattern4 => ((y / 2) + (x / 3)) & 0x1,
        MaskPattern::Pattern5 => {
            let temp = y * x;
            (temp & 0x1) + (temp % 3)
        }
        MaskPattern::Pattern6 => {
            let temp = y * x;
            ((temp & 0x1) + (temp % 3)) & 0x1
        }
        MaskPattern::Pattern7 => {
            let temp = y * x;
            ((temp % 3) + ((y + x) & 0x1)) & 0x1
        }
    };
    intermediate == 0
}

/// Flip every data module selected by `mask`. `function` marks the modules
/// that belong to function patterns and are left alone; applying the same
/// mask twice restores the matrix.
pub fn apply_data_mask(matrix: &mut ModuleMatrix, mask: MaskPattern, function: &BitMatrix) {
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            if !function.get(x, y) && data_mask_bit(mask, x, y) {
                matrix.flip(x, y);
            }
        }
    }
}

/// Sum of all four penalty rules; lower is better
pub fn mask_penalty(matrix: &ModuleMatrix) -> u32 {
    penalty_rule1(matrix) + penalty_rule2(matrix) + penalty_rule3(matrix) + penalty_rule4(matrix)
}

/// Runs of five or more same-colour modules in a row or column
pub fn penalty_rule1(matrix: &ModuleMatrix) -> u32 {
    rule1_direction(matrix, true) + rule1_direction(matrix, false)
}

fn rule1_direction(matrix: &ModuleMatrix, horizontal: bool) -> u32 {
    let (outer, inner) = if horizontal {
        (matrix.height(), matrix.width())
    } else {
        (matrix.width(), matrix.height())
    };
    let mut penalty = 0;
    for i in 0..outer {
        let mut run = 0u32;
        let mut prev: Option<bool> = None;
        for j in 0..inner {
            let bit = if horizontal { dark(matrix, j, i) } else { dark(matrix, i, j) };
            if prev == Some(bit) {
                run += 1;
            } else {
                if run >= 5 {
                    penalty += N1 + (run - 5);
                }
                run = 1;
                prev = Some(bit);
            }
        }
        if run >= 5 {
            penalty += N1 + (run - 5);
        }
    }
    penalty
}

/// Every 2x2 block of one colour; overlapping blocks count separately
pub fn penalty_rule2(matrix: &ModuleMatrix) -> u32 {
    let mut blocks = 0;
    for y in 0..matrix.height().saturating_sub(1) {
        for x in 0..matrix.width().saturating_sub(1) {
            let value = dark(matrix, x, y);
            if value == dark(matrix, x + 1, y)
                && value == dark(matrix, x, y + 1)
                && value == dark(matrix, x + 1, y + 1)
            {
                blocks += 1;
            }
        }
    }
    N2 * blocks
}

/// Finder-like 1:1:3:1:1 runs with four light modules on either side.
/// The light run must lie inside the matrix.
pub fn penalty_rule3(matrix: &ModuleMatrix) -> u32 {
    let width = matrix.width();
    let height = matrix.height();
    let mut found = 0;
    for y in 0..height {
        for x in 0..width {
            if x + 6 < width
                && (0..7).all(|k| dark(matrix, x + k, y) == FINDER_LIKE[k])
                && ((x >= 4 && is_light_horizontal(matrix, y, x - 4, x))
                    || (x + 10 < width && is_light_horizontal(matrix, y, x + 7, x + 11)))
            {
                found += 1;
            }
            if y + 6 < height
                && (0..7).all(|k| dark(matrix, x, y + k) == FINDER_LIKE[k])
                && ((y >= 4 && is_light_vertical(matrix, x, y - 4, y))
                    || (y + 10 < height && is_light_vertical(matrix, x, y + 7, y + 11)))
            {
                found += 1;
            }
        }
    }
    N3 * found
}

fn is_light_horizontal(matrix: &ModuleMatrix, y: usize, from: usize, to: usize) -> bool {
    (from..to).all(|x| !dark(matrix, x, y))
}

fn is_light_vertical(matrix: &ModuleMatrix, x: usize, from: usize, to: usize) -> bool {
    (from..to).all(|y| !dark(matrix, x, y))
}

/// Deviation of the dark ratio from 50%, in 5% steps
pub fn penalty_rule4(matrix: &ModuleMatrix) -> u32 {
    let total = matrix.width() * matrix.height();
    if total == 0 {
        return 0;
    }
    let dark_cells = matrix.dark_count();
    let five_percent_variances = (dark_cells * 2).abs_diff(total) * 10 / total;
    five_percent_variances as u32 * N4
}

#[inline]
fn dark(matrix: &ModuleMatrix, x: usize, y: usize) -> bool {
    matrix.get(x, y).is_dark()
}
