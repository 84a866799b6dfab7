//! Catalog component records.
//!
//! A [`Component`] carries the common fields (id, name, price) plus a
//! [`ComponentSpec`] variant holding only its own category's attributes.
//! Rule evaluation matches on the variant; there is no untyped attribute bag.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::category::ComponentCategory;
use crate::types::{ComponentId, Price};

// ---------------------------------------------------------------------------
// Memory type sets
// ---------------------------------------------------------------------------

/// The memory standards a CPU or motherboard accepts, e.g. `{DDR4, DDR5}`.
///
/// Accepts either a JSON list (`["DDR4", "DDR5"]`) or the storefront's joined
/// form (`"DDR4/DDR5"`). Always serializes as a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MemoryTypesRepr")]
pub struct MemoryTypes(BTreeSet<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum MemoryTypesRepr {
    List(Vec<String>),
    Joined(String),
}

impl From<MemoryTypesRepr> for MemoryTypes {
    fn from(repr: MemoryTypesRepr) -> Self {
        match repr {
            MemoryTypesRepr::List(tokens) => tokens.iter().map(String::as_str).collect(),
            MemoryTypesRepr::Joined(joined) => Self::parse(&joined),
        }
    }
}

impl<'a> FromIterator<&'a str> for MemoryTypes {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl MemoryTypes {
    /// Split a `/`-separated token list.
    pub fn parse(joined: &str) -> Self {
        joined.split('/').collect()
    }

    pub fn contains(&self, memory_type: &str) -> bool {
        self.0.contains(memory_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for MemoryTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join("/"))
    }
}

fn validate_memory_types(types: &MemoryTypes) -> Result<(), ValidationError> {
    if types.is_empty() {
        return Err(ValidationError::new("memory_types_empty"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-category attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CpuSpec {
    #[validate(length(min = 1))]
    pub socket: String,
    pub tdp_watts: u32,
    #[validate(custom(function = "validate_memory_types"))]
    pub supported_memory_types: MemoryTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MotherboardSpec {
    #[validate(length(min = 1))]
    pub socket: String,
    #[validate(length(min = 1))]
    pub form_factor: String,
    #[validate(custom(function = "validate_memory_types"))]
    pub supported_memory_types: MemoryTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_slots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_gb: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MemorySpec {
    #[validate(length(min = 1))]
    pub memory_type: String,
    pub capacity_gb: u32,
    pub speed_mhz: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GpuSpec {
    pub power_draw_watts: u32,
    #[validate(range(min = 1))]
    pub length_mm: u32,
    pub vram_gb: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StorageSpec {
    #[validate(length(min = 1))]
    pub interface_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_gb: Option<u32>,
    /// Drive medium, e.g. `"NVMe SSD"` or `"HDD"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PsuSpec {
    #[validate(range(min = 1))]
    pub wattage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CaseSpec {
    #[validate(length(min = 1))]
    pub form_factor: String,
    #[validate(range(min = 1))]
    pub max_gpu_length_mm: u32,
}

/// Category-specific attributes, tagged by category on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ComponentSpec {
    Cpu(CpuSpec),
    Motherboard(MotherboardSpec),
    Memory(MemorySpec),
    Gpu(GpuSpec),
    Storage(StorageSpec),
    Psu(PsuSpec),
    Case(CaseSpec),
}

impl ComponentSpec {
    pub fn category(&self) -> ComponentCategory {
        match self {
            Self::Cpu(_) => ComponentCategory::Cpu,
            Self::Motherboard(_) => ComponentCategory::Motherboard,
            Self::Memory(_) => ComponentCategory::Memory,
            Self::Gpu(_) => ComponentCategory::Gpu,
            Self::Storage(_) => ComponentCategory::Storage,
            Self::Psu(_) => ComponentCategory::Psu,
            Self::Case(_) => ComponentCategory::Case,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Cpu(spec) => spec.validate(),
            Self::Motherboard(spec) => spec.validate(),
            Self::Memory(spec) => spec.validate(),
            Self::Gpu(spec) => spec.validate(),
            Self::Storage(spec) => spec.validate(),
            Self::Psu(spec) => spec.validate(),
            Self::Case(spec) => spec.validate(),
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A purchasable part as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub price: Price,
    #[serde(flatten)]
    pub spec: ComponentSpec,
}

impl Component {
    pub fn category(&self) -> ComponentCategory {
        self.spec.category()
    }
}
