//! Derived build quantities, recomputed from the selection on every change.

use serde::Serialize;

use crate::category::ComponentCategory;
use crate::power::estimate_wattage;
use crate::selection::BuildSelection;
use crate::types::Price;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub total_price: Price,
    pub estimated_wattage: u32,
    /// Selected categories over total categories, in `0.0..=1.0`.
    pub completion_fraction: f64,
    pub completion_percent: u32,
    pub selected_count: usize,
    pub total_categories: usize,
}

impl DerivedMetrics {
    pub fn compute(selection: &BuildSelection) -> Self {
        let selected_count = selection.selected_count();
        let total_categories = ComponentCategory::COUNT;
        let completion_fraction = selected_count as f64 / total_categories as f64;

        Self {
            total_price: selection.total_price(),
            estimated_wattage: estimate_wattage(selection),
            completion_fraction,
            completion_percent: (completion_fraction * 100.0).round() as u32,
            selected_count,
            total_categories,
        }
    }
}
