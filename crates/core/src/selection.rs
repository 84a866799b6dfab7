//! The user's in-progress build: at most one component per category.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::category::ComponentCategory;
use crate::component::{
    CaseSpec, Component, ComponentSpec, CpuSpec, GpuSpec, MemorySpec, MotherboardSpec, PsuSpec,
};
use crate::types::Price;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSelection {
    slots: BTreeMap<ComponentCategory, Component>,
}

impl BuildSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ComponentCategory) -> Option<&Component> {
        self.slots.get(&category)
    }

    /// Place `component` in its own category's slot, replacing any previous
    /// choice.
    pub fn insert(&mut self, component: Component) {
        self.slots.insert(component.category(), component);
    }

    pub fn remove(&mut self, category: ComponentCategory) -> Option<Component> {
        self.slots.remove(&category)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// A copy of this selection with `component` swapped into its slot.
    pub fn with(&self, component: Component) -> Self {
        let mut trial = self.clone();
        trial.insert(component);
        trial
    }

    /// Selected components in category order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.slots.values()
    }

    pub fn selected_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.len() == ComponentCategory::COUNT
    }

    pub fn total_price(&self) -> Price {
        self.iter().map(|c| c.price).sum()
    }

    fn spec(&self, category: ComponentCategory) -> Option<&ComponentSpec> {
        self.get(category).map(|c| &c.spec)
    }

    pub fn cpu(&self) -> Option<&CpuSpec> {
        match self.spec(ComponentCategory::Cpu) {
            Some(ComponentSpec::Cpu(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn motherboard(&self) -> Option<&MotherboardSpec> {
        match self.spec(ComponentCategory::Motherboard) {
            Some(ComponentSpec::Motherboard(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn memory(&self) -> Option<&MemorySpec> {
        match self.spec(ComponentCategory::Memory) {
            Some(ComponentSpec::Memory(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn gpu(&self) -> Option<&GpuSpec> {
        match self.spec(ComponentCategory::Gpu) {
            Some(ComponentSpec::Gpu(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn psu(&self) -> Option<&PsuSpec> {
        match self.spec(ComponentCategory::Psu) {
            Some(ComponentSpec::Psu(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn case(&self) -> Option<&CaseSpec> {
        match self.spec(ComponentCategory::Case) {
            Some(ComponentSpec::Case(spec)) => Some(spec),
            _ => None,
        }
    }
}

/// Serializes every category, with `null` for empty slots.
impl Serialize for BuildSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ComponentCategory::COUNT))?;
        for category in ComponentCategory::ALL {
            map.serialize_entry(category.as_str(), &self.get(category))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn insert_replaces_same_category() {
        let catalog = Catalog::builtin().unwrap();
        let mut selection = BuildSelection::new();
        selection.insert(catalog.find(ComponentCategory::Cpu, 1).unwrap().clone());
        selection.insert(catalog.find(ComponentCategory::Cpu, 2).unwrap().clone());

        assert_eq!(selection.selected_count(), 1);
        assert_eq!(selection.get(ComponentCategory::Cpu).unwrap().id, 2);
        assert_eq!(selection.cpu().unwrap().socket, "AM5");
    }

    #[test]
    fn with_leaves_original_untouched() {
        let catalog = Catalog::builtin().unwrap();
        let selection = BuildSelection::new();
        let trial = selection.with(catalog.find(ComponentCategory::Psu, 3).unwrap().clone());

        assert_eq!(selection.selected_count(), 0);
        assert_eq!(trial.psu().unwrap().wattage, 650);
    }

    #[test]
    fn serializes_all_slots() {
        let catalog = Catalog::builtin().unwrap();
        let mut selection = BuildSelection::new();
        selection.insert(catalog.find(ComponentCategory::Case, 2).unwrap().clone());

        let value = serde_json::to_value(&selection).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert!(obj["cpu"].is_null());
        assert_eq!(obj["case"]["name"], "NZXT H7 Flow");
    }
}
