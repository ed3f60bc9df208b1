use std::fmt;

/// State of one module in a symbol under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not yet claimed by any pattern or data bit
    #[default]
    Empty,
    /// Light module (0)
    Light,
    /// Dark module (1)
    Dark,
}

impl Module {
    /// `Dark` for true, `Light` for false
    pub fn from_bool(dark: bool) -> Self {
        if dark { Module::Dark } else { Module::Light }
    }

    /// True for unset modules
    pub fn is_empty(self) -> bool {
        self == Module::Empty
    }

    /// True only for `Dark`
    pub fn is_dark(self) -> bool {
        self == Module::Dark
    }
}

/// Tri-state module grid, row-major.
///
/// Out-of-range coordinates are a caller bug and panic, the same as slice indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    width: usize,
    height: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Create a matrix with every module `Empty`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            modules: vec![Module::Empty; width * height],
        }
    }

    /// Columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Module at (x, y)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Module {
        self.modules[y * self.width + x]
    }

    /// Overwrite the module at (x, y)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Module) {
        self.modules[y * self.width + x] = value;
    }

    /// Set (x, y) to dark or light
    #[inline]
    pub fn set_bool(&mut self, x: usize, y: usize, dark: bool) {
        self.set(x, y, Module::from_bool(dark));
    }

    /// Swap light and dark at (x, y); empty modules stay empty
    pub fn flip(&mut self, x: usize, y: usize) {
        let idx = y * self.width + x;
        self.modules[idx] = match self.modules[idx] {
            Module::Light => Module::Dark,
            Module::Dark => Module::Light,
            Module::Empty => Module::Empty,
        };
    }

    /// Reset every module to `value`
    pub fn clear(&mut self, value: Module) {
        self.modules.fill(value);
    }

    /// One row as a slice
    pub fn row(&self, y: usize) -> &[Module] {
        &self.modules[y * self.width..(y + 1) * self.width]
    }

    /// True when no module is `Empty`
    pub fn is_complete(&self) -> bool {
        !self.modules.iter().any(|m| m.is_empty())
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// All modules, row-major
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

impl fmt::Display for ModuleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for m in self.row(y) {
                f.write_str(match m {
                    Module::Dark => " 1",
                    Module::Light => " 0",
                    Module::Empty => "  ",
                })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_matrix() {
        let mut matrix = ModuleMatrix::new(3, 2);
        assert!(matrix.get(2, 1).is_empty());
        assert!(!matrix.is_complete());

        matrix.set_bool(2, 1, true);
        assert_eq!(matrix.get(2, 1), Module::Dark);
        matrix.flip(2, 1);
        assert_eq!(matrix.get(2, 1), Module::Light);
        matrix.flip(0, 0);
        assert_eq!(matrix.get(0, 0), Module::Empty);

        matrix.clear(Module::Dark);
        assert!(matrix.is_complete());
        assert_eq!(matrix.dark_count(), 6);
        assert_eq!(matrix.row(1), &[Module::Dark; 3]);
    }

    #[test]
    fn test_display() {
        let mut matrix = ModuleMatrix::new(2, 1);
        matrix.set_bool(0, 0, true);
        assert_eq!(matrix.to_string(), " 1  \n");
    }
}
