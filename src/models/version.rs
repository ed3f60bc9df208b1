//! Symbol versions 1-40 and their error correction block layout.

use super::{BitMatrix, ECLevel};
use crate::encoder::tables::{alignment_pattern_positions, ec_block_info};
use crate::error::{QrError, Result};
use std::sync::OnceLock;

/// A run of Reed-Solomon blocks with the same number of data codewords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlock {
    count: usize,
    data_codewords: usize,
}

impl EcBlock {
    /// Blocks in this group
    pub fn count(&self) -> usize {
        self.count
    }

    /// Data codewords per block
    pub fn data_codewords(&self) -> usize {
        self.data_codewords
    }
}

/// One or two block groups sharing an EC-codewords-per-block count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcBlocks {
    ec_codewords_per_block: usize,
    blocks: Vec<EcBlock>,
}

impl EcBlocks {
    /// EC codewords in every block
    pub fn ec_codewords_per_block(&self) -> usize {
        self.ec_codewords_per_block
    }

    /// Block groups, shorter blocks first
    pub fn blocks(&self) -> &[EcBlock] {
        &self.blocks
    }

    /// Total block count across groups
    pub fn num_blocks(&self) -> usize {
        self.blocks.iter().map(|b| b.count).sum()
    }

    /// EC codewords across all blocks
    pub fn total_ec_codewords(&self) -> usize {
        self.ec_codewords_per_block * self.num_blocks()
    }

    /// Data codewords across all blocks
    pub fn total_data_codewords(&self) -> usize {
        self.blocks.iter().map(|b| b.count * b.data_codewords).sum()
    }

    /// Data plus EC codewords
    pub fn total_codewords(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.count * (b.data_codewords + self.ec_codewords_per_block))
            .sum()
    }
}

/// QR Code version (1-40, Model 2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    number: u8,
    alignment_centers: Vec<usize>,
    total_codewords: usize,
    ec_blocks: [EcBlocks; 4],
}

static VERSIONS: OnceLock<Result<Vec<Version>>> = OnceLock::new();

fn versions() -> Result<&'static [Version]> {
    match VERSIONS.get_or_init(build_versions) {
        Ok(v) => Ok(v.as_slice()),
        Err(e) => Err(e.clone()),
    }
}

fn build_versions() -> Result<Vec<Version>> {
    (1..=40u8).map(build_version).collect()
}

fn build_version(number: u8) -> Result<Version> {
    let mut version = Version {
        number,
        alignment_centers: alignment_pattern_positions(number),
        total_codewords: 0,
        ec_blocks: Default::default(),
    };

    // Whatever the function patterns leave free carries codewords; leftover bits are remainder bits
    let function = version.build_function_pattern()?;
    let dimension = version.dimension();
    let data_modules = dimension * dimension - function.count_set();
    version.total_codewords = data_modules / 8;

    for level in ECLevel::ALL {
        let info = ec_block_info(number, level).ok_or_else(|| {
            QrError::Internal(format!("no EC table entry for version {} {:?}", number, level))
        })?;
        let total = version.total_codewords;
        let short_len = total / info.num_blocks;
        let long_blocks = total % info.num_blocks;
        let short_blocks = info.num_blocks - long_blocks;
        if short_len <= info.ecc_per_block {
            return Err(QrError::Internal(format!(
                "version {} {:?}: block of {} codewords cannot hold {} EC codewords",
                number, level, short_len, info.ecc_per_block
            )));
        }
        let mut blocks = vec![EcBlock {
            count: short_blocks,
            data_codewords: short_len - info.ecc_per_block,
        }];
        if long_blocks > 0 {
            blocks.push(EcBlock {
                count: long_blocks,
                data_codewords: short_len - info.ecc_per_block + 1,
            });
        }
        let ec_blocks = EcBlocks {
            ec_codewords_per_block: info.ecc_per_block,
            blocks,
        };
        if ec_blocks.total_codewords() != total {
            return Err(QrError::Internal(format!(
                "version {} {:?}: blocks hold {} codewords, symbol has {}",
                number,
                level,
                ec_blocks.total_codewords(),
                total
            )));
        }
        version.ec_blocks[level.ordinal()] = ec_blocks;
    }
    Ok(version)
}

impl Default for EcBlocks {
    fn default() -> Self {
        Self {
            ec_codewords_per_block: 0,
            blocks: Vec::new(),
        }
    }
}

impl Version {
    /// Look up a version by number (1-40)
    pub fn for_number(number: u32) -> Result<&'static Version> {
        if !(1..=40).contains(&number) {
            return Err(QrError::InvalidArgument(format!(
                "version number must be in 1..=40, got {}",
                number
            )));
        }
        Ok(&versions()?[number as usize - 1])
    }

    /// Infer the version from a symbol dimension (`17 + 4 * version`)
    pub fn provisional_for_dimension(dimension: usize) -> Result<&'static Version> {
        if dimension % 4 != 1 || dimension < 21 {
            return Err(QrError::InvalidArgument(format!(
                "dimension {} is not a valid symbol size",
                dimension
            )));
        }
        Self::for_number(((dimension - 17) / 4) as u32)
    }

    /// Get the version number
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Get the size in modules (width = height)
    pub fn dimension(&self) -> usize {
        17 + 4 * self.number as usize
    }

    /// Row/column coordinates of alignment pattern centers
    pub fn alignment_centers(&self) -> &[usize] {
        &self.alignment_centers
    }

    /// Codewords the symbol holds, independent of level
    pub fn total_codewords(&self) -> usize {
        self.total_codewords
    }

    /// Block layout at `level`
    pub fn ec_blocks_for_level(&self, level: ECLevel) -> &EcBlocks {
        &self.ec_blocks[level.ordinal()]
    }

    /// Number of data codewords at `level`
    pub fn data_codewords(&self, level: ECLevel) -> usize {
        self.total_codewords - self.ec_blocks_for_level(level).total_ec_codewords()
    }

    /// Footprint of all function patterns (finders, separators, format and
    /// version info, timing, alignment). Set bits are not available for data.
    pub fn build_function_pattern(&self) -> Result<BitMatrix> {
        let dimension = self.dimension();
        let mut matrix = BitMatrix::square(dimension);

        // Finder patterns, separators and format info
        matrix.set_region(0, 0, 9, 9)?;
        matrix.set_region(dimension - 8, 0, 8, 9)?;
        matrix.set_region(0, dimension - 8, 9, 8)?;

        let centers = &self.alignment_centers;
        let max = centers.len();
        for x in 0..max {
            let top = centers[x] - 2;
            for y in 0..max {
                if (x == 0 && (y == 0 || y == max - 1)) || (x == max - 1 && y == 0) {
                    continue;
                }
                matrix.set_region(centers[y] - 2, top, 5, 5)?;
            }
        }

        // Timing patterns
        matrix.set_region(6, 9, 1, dimension - 17)?;
        matrix.set_region(9, 6, dimension - 17, 1)?;

        if self.number > 6 {
            matrix.set_region(dimension - 11, 0, 3, 6)?;
            matrix.set_region(0, dimension - 11, 6, 3)?;
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_data_modules(ver: usize) -> usize {
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let num_align = ver / 7 + 2;
            result -= (25 * num_align - 10) * num_align - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    #[test]
    fn test_version_size() {
        assert_eq!(Version::for_number(1).unwrap().dimension(), 21);
        assert_eq!(Version::for_number(2).unwrap().dimension(), 25);
        assert_eq!(Version::for_number(40).unwrap().dimension(), 177);
    }

    #[test]
    fn test_for_number_range() {
        assert!(Version::for_number(0).is_err());
        assert!(Version::for_number(41).is_err());
        assert_eq!(Version::for_number(7).unwrap().number(), 7);
    }

    #[test]
    fn test_provisional_for_dimension() {
        assert_eq!(Version::provisional_for_dimension(21).unwrap().number(), 1);
        assert_eq!(Version::provisional_for_dimension(177).unwrap().number(), 40);
        assert!(Version::provisional_for_dimension(22).is_err());
        assert!(Version::provisional_for_dimension(181).is_err());
        assert!(Version::provisional_for_dimension(17).is_err());
    }

    #[test]
    fn test_function_pattern_leaves_raw_data_modules() {
        for n in 1..=40u32 {
            let version = Version::for_number(n).unwrap();
            let dim = version.dimension();
            let function = version.build_function_pattern().unwrap();
            assert_eq!(
                dim * dim - function.count_set(),
                raw_data_modules(n as usize),
                "version {}",
                n
            );
        }
    }

    #[test]
    fn test_codeword_totals() {
        for n in 1..=40u32 {
            let version = Version::for_number(n).unwrap();
            for level in ECLevel::ALL {
                let blocks = version.ec_blocks_for_level(level);
                let data = version.data_codewords(level);
                assert_eq!(version.total_codewords(), data + blocks.total_ec_codewords());
                assert_eq!(
                    blocks.total_ec_codewords(),
                    blocks.ec_codewords_per_block() * blocks.num_blocks()
                );
                assert_eq!(blocks.total_data_codewords(), data);
            }
        }
    }

    #[test]
    fn test_known_capacities() {
        let v1 = Version::for_number(1).unwrap();
        assert_eq!(v1.total_codewords(), 26);
        assert_eq!(v1.data_codewords(ECLevel::L), 19);
        assert_eq!(v1.data_codewords(ECLevel::H), 9);

        let v5 = Version::for_number(5).unwrap();
        let q = v5.ec_blocks_for_level(ECLevel::Q);
        assert_eq!(q.blocks()[0].count(), 2);
        assert_eq!(q.blocks()[0].data_codewords(), 15);
        assert_eq!(q.blocks()[1].count(), 2);
        assert_eq!(q.blocks()[1].data_codewords(), 16);

        let v40 = Version::for_number(40).unwrap();
        assert_eq!(v40.total_codewords(), 3706);
        assert_eq!(v40.data_codewords(ECLevel::L), 2956);
        assert_eq!(v40.data_codewords(ECLevel::H), 1276);
    }
}
