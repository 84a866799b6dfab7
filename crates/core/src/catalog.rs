//! Read-only component catalog, grouped by category.
//!
//! The catalog is supplied by the caller (product service, JSON file, or the
//! built-in reference set) and never mutated after construction.

use std::collections::{BTreeMap, HashSet};

use crate::category::ComponentCategory;
use crate::component::Component;
use crate::error::CoreError;
use crate::types::ComponentId;

/// Reference catalog shipped with the crate: the storefront's stock parts.
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_category: BTreeMap<ComponentCategory, Vec<Component>>,
}

impl Catalog {
    /// Group components by category, keeping declaration order within each.
    ///
    /// Fails if an id repeats within a category or a record fails field
    /// validation.
    pub fn from_components(components: Vec<Component>) -> Result<Self, CoreError> {
        let mut by_category: BTreeMap<ComponentCategory, Vec<Component>> = ComponentCategory::ALL
            .into_iter()
            .map(|c| (c, Vec::new()))
            .collect();
        let mut seen: HashSet<(ComponentCategory, ComponentId)> = HashSet::new();

        for component in components {
            let category = component.category();
            if !seen.insert((category, component.id)) {
                return Err(CoreError::Validation(format!(
                    "Duplicate {category} id {} in catalog",
                    component.id
                )));
            }
            validate_component(&component)?;
            by_category.entry(category).or_default().push(component);
        }

        Ok(Self { by_category })
    }

    /// Parse a JSON array of component records.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let components: Vec<Component> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid catalog JSON: {e}")))?;
        Self::from_components(components)
    }

    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Components of one category in declaration order.
    pub fn components(&self, category: ComponentCategory) -> &[Component] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find(&self, category: ComponentCategory, id: ComponentId) -> Option<&Component> {
        self.components(category).iter().find(|c| c.id == id)
    }

    /// Like [`Catalog::find`], but a miss is an `UnknownComponent` error.
    pub fn get(&self, category: ComponentCategory, id: ComponentId) -> Result<&Component, CoreError> {
        self.find(category, id)
            .ok_or(CoreError::UnknownComponent { category, id })
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_component(component: &Component) -> Result<(), CoreError> {
    let category = component.category();
    if component.name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{category} {} has an empty name",
            component.id
        )));
    }
    component.spec.validate().map_err(|errors| {
        CoreError::Validation(format!(
            "{category} {} ({}) failed validation: {errors}",
            component.id, component.name
        ))
    })
}
