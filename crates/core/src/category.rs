//! Hardware component categories.
//!
//! A complete build holds exactly one component per category. The order of
//! [`ComponentCategory::ALL`] is the order categories are listed, reported and
//! iterated everywhere in the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CATEGORY_CPU: &str = "cpu";
pub const CATEGORY_MOTHERBOARD: &str = "motherboard";
pub const CATEGORY_MEMORY: &str = "memory";
pub const CATEGORY_GPU: &str = "gpu";
pub const CATEGORY_STORAGE: &str = "storage";
pub const CATEGORY_PSU: &str = "psu";
pub const CATEGORY_CASE: &str = "case";

/// All valid category strings, in build order.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_CPU,
    CATEGORY_MOTHERBOARD,
    CATEGORY_MEMORY,
    CATEGORY_GPU,
    CATEGORY_STORAGE,
    CATEGORY_PSU,
    CATEGORY_CASE,
];

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// One slot of a PC build.
///
/// `Ord` follows declaration order, so sorted collections of categories come
/// out in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Cpu,
    Motherboard,
    Memory,
    Gpu,
    Storage,
    Psu,
    Case,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 7] = [
        Self::Cpu,
        Self::Motherboard,
        Self::Memory,
        Self::Gpu,
        Self::Storage,
        Self::Psu,
        Self::Case,
    ];

    /// Number of slots in a complete build.
    pub const COUNT: usize = Self::ALL.len();

    /// Parse a wire token such as `"gpu"`.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            CATEGORY_CPU => Ok(Self::Cpu),
            CATEGORY_MOTHERBOARD => Ok(Self::Motherboard),
            CATEGORY_MEMORY => Ok(Self::Memory),
            CATEGORY_GPU => Ok(Self::Gpu),
            CATEGORY_STORAGE => Ok(Self::Storage),
            CATEGORY_PSU => Ok(Self::Psu),
            CATEGORY_CASE => Ok(Self::Case),
            _ => Err(format!(
                "Invalid component category '{s}'. Must be one of: {}",
                VALID_CATEGORIES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => CATEGORY_CPU,
            Self::Motherboard => CATEGORY_MOTHERBOARD,
            Self::Memory => CATEGORY_MEMORY,
            Self::Gpu => CATEGORY_GPU,
            Self::Storage => CATEGORY_STORAGE,
            Self::Psu => CATEGORY_PSU,
            Self::Case => CATEGORY_CASE,
        }
    }

    /// Human-readable title used by the builder page.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpu => "Processor (CPU)",
            Self::Motherboard => "Motherboard",
            Self::Memory => "Memory (RAM)",
            Self::Gpu => "Graphics Card",
            Self::Storage => "Storage",
            Self::Psu => "Power Supply",
            Self::Case => "Case",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_token() {
        for category in ComponentCategory::ALL {
            assert_eq!(
                ComponentCategory::from_str_value(category.as_str()),
                Ok(category)
            );
        }
    }

    #[test]
    fn rejects_unknown_token() {
        let err = ComponentCategory::from_str_value("fan").unwrap_err();
        assert!(err.contains("'fan'"));
        assert!(err.contains("motherboard"));
    }

    #[test]
    fn ordering_matches_build_order() {
        let mut shuffled = vec![
            ComponentCategory::Case,
            ComponentCategory::Cpu,
            ComponentCategory::Psu,
            ComponentCategory::Memory,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                ComponentCategory::Cpu,
                ComponentCategory::Memory,
                ComponentCategory::Psu,
                ComponentCategory::Case,
            ]
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ComponentCategory::Psu).unwrap();
        assert_eq!(json, "\"psu\"");
    }
}
