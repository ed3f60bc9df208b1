/// Packed boolean matrix used for function pattern masks
pub mod matrix;
/// Tri-state module grid
pub mod module_matrix;
/// Symbol, mode, level and mask types
pub mod qr_code;
/// Versions 1-40 and their EC block tables
pub mod version;

pub use matrix::BitMatrix;
pub use module_matrix::{Module, ModuleMatrix};
pub use qr_code::{ECLevel, MaskPattern, Mode, QrSymbol, QrSymbolBuilder};
pub use version::{EcBlock, EcBlocks, Version};
