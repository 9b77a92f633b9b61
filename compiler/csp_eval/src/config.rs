//! Compile and enumeration settings.

use std::fmt;

/// Options for [`compile_with`](crate::compile_with).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompileOptions {
    /// Build the short-circuit jump table for `and`/`or`/`imp`.
    pub short_circuit: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            short_circuit: true,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn with_short_circuit(mut self, enabled: bool) -> Self {
        self.short_circuit = enabled;
        self
    }
}

/// Integer width enumeration results must fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

impl IntWidth {
    /// Inclusive bounds.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            IntWidth::I8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
            IntWidth::I16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
            IntWidth::I32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            IntWidth::I64 => (i64::MIN, i64::MAX),
        }
    }

    #[inline]
    pub fn contains(self, value: i64) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&value)
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
        };
        f.write_str(name)
    }
}

/// Settings shared by the enumerators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumerationConfig {
    /// Tuples classified before the kept side is frozen.
    pub sample_limit: u32,
    /// Width results of `possible_values`/`restricted_tuples` must fit.
    pub result_width: IntWidth,
}

impl EnumerationConfig {
    pub const DEFAULT_SAMPLE_LIMIT: u32 = 1_000;

    #[must_use]
    pub fn with_sample_limit(mut self, limit: u32) -> Self {
        self.sample_limit = limit;
        self
    }

    #[must_use]
    pub fn with_result_width(mut self, width: IntWidth) -> Self {
        self.result_width = width;
        self
    }
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        EnumerationConfig {
            sample_limit: Self::DEFAULT_SAMPLE_LIMIT,
            result_width: IntWidth::I32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_bounds() {
        assert!(IntWidth::I8.contains(127));
        assert!(!IntWidth::I8.contains(128));
        assert!(IntWidth::I32.contains(-2_147_483_648));
        assert!(!IntWidth::I32.contains(1 << 31));
        assert!(IntWidth::I64.contains(i64::MIN));
    }

    #[test]
    fn defaults() {
        let config = EnumerationConfig::default();
        assert_eq!(config.sample_limit, EnumerationConfig::DEFAULT_SAMPLE_LIMIT);
        assert_eq!(config.result_width, IntWidth::I32);
        assert!(CompileOptions::default().short_circuit);
        assert!(!CompileOptions::default().with_short_circuit(false).short_circuit);
    }
}
