//! Catalog compatibility tagging for the component pickers.
//!
//! A candidate is compatible when swapping it into its category's slot would
//! not create an ERROR-level conflict with any *other* selected component.
//! Warnings never make a candidate incompatible.

use serde::Serialize;

use crate::category::ComponentCategory;
use crate::component::Component;
use crate::power::{self, PowerBudget};
use crate::rules::{form_factors_match, gpu_fits, memory_supported, sockets_match};
use crate::selection::BuildSelection;

/// One picker option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub component: Component,
    pub is_compatible: bool,
}

/// Categories whose parts contribute to the estimated draw.
const POWER_CONSUMERS: [ComponentCategory; 3] = [
    ComponentCategory::Cpu,
    ComponentCategory::Memory,
    ComponentCategory::Gpu,
];

/// Every ERROR-level conflict in `selection`, as the pair (or group) of
/// categories it binds.
///
/// The memory-type rule is split into its two pairwise halves so a conflict
/// can be attributed to the part actually at fault.
fn blocking_conflicts(selection: &BuildSelection) -> Vec<Vec<ComponentCategory>> {
    use ComponentCategory::*;

    let mut conflicts = Vec::new();

    if let (Some(cpu), Some(motherboard)) = (selection.cpu(), selection.motherboard()) {
        if !sockets_match(cpu, motherboard) {
            conflicts.push(vec![Cpu, Motherboard]);
        }
    }
    if let Some(memory) = selection.memory() {
        if let Some(cpu) = selection.cpu() {
            if !memory_supported(&cpu.supported_memory_types, memory) {
                conflicts.push(vec![Cpu, Memory]);
            }
        }
        if let Some(motherboard) = selection.motherboard() {
            if !memory_supported(&motherboard.supported_memory_types, memory) {
                conflicts.push(vec![Motherboard, Memory]);
            }
        }
    }
    if let Some(psu) = selection.psu() {
        let draw = power::estimate_wattage(selection);
        if power::assess(psu.wattage, draw) == PowerBudget::Insufficient {
            let mut group: Vec<ComponentCategory> = POWER_CONSUMERS
                .into_iter()
                .filter(|c| selection.get(*c).is_some())
                .collect();
            group.push(Psu);
            conflicts.push(group);
        }
    }
    if let (Some(gpu), Some(case)) = (selection.gpu(), selection.case()) {
        if !gpu_fits(gpu, case) {
            conflicts.push(vec![Gpu, Case]);
        }
    }
    if let (Some(motherboard), Some(case)) = (selection.motherboard(), selection.case()) {
        if !form_factors_match(motherboard, case) {
            conflicts.push(vec![Motherboard, Case]);
        }
    }

    conflicts
}

/// Whether `candidate` can join the rest of `selection` without an ERROR.
///
/// The candidate's own category slot is ignored, so the currently selected
/// part of that category is never compared with its alternatives.
pub fn is_compatible(candidate: &Component, selection: &BuildSelection) -> bool {
    let category = candidate.category();
    let trial = selection.with(candidate.clone());
    !blocking_conflicts(&trial)
        .iter()
        .any(|group| group.contains(&category))
}

/// Tag every component of a category, keeping catalog order.
pub fn tag_components(components: &[Component], selection: &BuildSelection) -> Vec<CatalogEntry> {
    components
        .iter()
        .map(|component| CatalogEntry {
            is_compatible: is_compatible(component, selection),
            component: component.clone(),
        })
        .collect()
}
