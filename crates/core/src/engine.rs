//! Per-session compatibility engine.
//!
//! Owns a shared read-only [`Catalog`] handle, the session's
//! [`BuildSelection`], and the report computed from them. Every mutating call
//! ends with a full, synchronous recompute, so the report a caller reads is
//! always the one for the current selection.
//!
//! The engine is not internally synchronised; callers sharing one across
//! tasks must serialise access (one mutex per session).

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::category::ComponentCategory;
use crate::error::CoreError;
use crate::filter::{self, CatalogEntry};
use crate::matrix::CompatibilityMatrix;
use crate::metrics::DerivedMetrics;
use crate::rules::{self, CompatibilityIssue};
use crate::selection::BuildSelection;
use crate::types::ComponentId;

/// Derived metrics and issues for one selection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub metrics: DerivedMetrics,
    pub issues: Vec<CompatibilityIssue>,
    pub has_blocking_errors: bool,
    /// No ERROR issues and every category selected.
    pub orderable: bool,
}

impl BuildReport {
    pub fn compute(selection: &BuildSelection) -> Self {
        let metrics = DerivedMetrics::compute(selection);
        let issues = rules::evaluate_rules(selection, metrics.estimated_wattage);
        let has_blocking_errors = rules::has_blocking_errors(&issues);
        Self {
            orderable: !has_blocking_errors && selection.is_complete(),
            metrics,
            issues,
            has_blocking_errors,
        }
    }
}

/// Selection plus its report, as returned by the state endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildState {
    pub selection: BuildSelection,
    #[serde(flatten)]
    pub report: BuildReport,
}

#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    catalog: Arc<Catalog>,
    selection: BuildSelection,
    report: BuildReport,
}

impl CompatibilityEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let selection = BuildSelection::new();
        let report = BuildReport::compute(&selection);
        Self {
            catalog,
            selection,
            report,
        }
    }

    /// Build an engine from a full selection snapshot.
    ///
    /// Fails on the first unknown id, or if a category appears twice.
    pub fn with_selection<I>(catalog: Arc<Catalog>, picks: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (ComponentCategory, ComponentId)>,
    {
        let mut selection = BuildSelection::new();
        for (category, id) in picks {
            if selection.get(category).is_some() {
                return Err(CoreError::Validation(format!(
                    "Category {category} selected more than once"
                )));
            }
            selection.insert(catalog.get(category, id)?.clone());
        }
        let report = BuildReport::compute(&selection);
        Ok(Self {
            catalog,
            selection,
            report,
        })
    }

    /// Select `id` for `category`, or clear the slot when `id` is `None`.
    ///
    /// Incompatible picks are accepted and surface as issues. An id missing
    /// from the catalog fails with [`CoreError::UnknownComponent`] and leaves
    /// the engine untouched.
    pub fn select_component(
        &mut self,
        category: ComponentCategory,
        id: Option<ComponentId>,
    ) -> Result<&BuildReport, CoreError> {
        match id {
            Some(id) => {
                let component = self.catalog.get(category, id)?.clone();
                self.selection.insert(component);
            }
            None => {
                self.selection.remove(category);
            }
        }
        self.recompute();
        Ok(&self.report)
    }

    /// Drop every selection.
    pub fn clear(&mut self) -> &BuildReport {
        self.selection.clear();
        self.recompute();
        &self.report
    }

    /// Every catalog component of `category`, in catalog order, tagged with
    /// whether it fits the other selected components.
    pub fn filtered_catalog(&self, category: ComponentCategory) -> Vec<CatalogEntry> {
        filter::tag_components(self.catalog.components(category), &self.selection)
    }

    pub fn matrix(&self) -> CompatibilityMatrix {
        CompatibilityMatrix::compute(&self.selection, self.report.metrics.estimated_wattage)
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Owned snapshot of the selection and its report.
    pub fn state(&self) -> BuildState {
        BuildState {
            selection: self.selection.clone(),
            report: self.report.clone(),
        }
    }

    pub fn selection(&self) -> &BuildSelection {
        &self.selection
    }

    pub fn metrics(&self) -> &DerivedMetrics {
        &self.report.metrics
    }

    pub fn issues(&self) -> &[CompatibilityIssue] {
        &self.report.issues
    }

    pub fn has_blocking_errors(&self) -> bool {
        self.report.has_blocking_errors
    }

    pub fn is_orderable(&self) -> bool {
        self.report.orderable
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn recompute(&mut self) {
        self.report = BuildReport::compute(&self.selection);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::component::{CaseSpec, Component, ComponentSpec, CpuSpec, GpuSpec};
    use crate::component::{MemorySpec, MemoryTypes, MotherboardSpec, PsuSpec, StorageSpec};
    use crate::rules::{IssueCode, Severity};
    use crate::types::Price;
    use ComponentCategory::*;

    fn builtin() -> Arc<Catalog> {
        Arc::new(Catalog::builtin().unwrap())
    }

    fn part(id: ComponentId, cents: u64, spec: ComponentSpec) -> Component {
        Component {
            id,
            name: format!("{}-{id}", spec.category()),
            price: Price::from_cents(cents),
            spec,
        }
    }

    /// Parts from the end-to-end walkthrough, plus a mismatched CPU (id 2)
    /// and an undersized PSU (id 2).
    fn scenario_catalog() -> Arc<Catalog> {
        let components = vec![
            part(
                1,
                58_999,
                ComponentSpec::Cpu(CpuSpec {
                    socket: "LGA1700".into(),
                    tdp_watts: 125,
                    supported_memory_types: MemoryTypes::parse("DDR4/DDR5"),
                    cores: None,
                    threads: None,
                }),
            ),
            part(
                2,
                54_999,
                ComponentSpec::Cpu(CpuSpec {
                    socket: "AM5".into(),
                    tdp_watts: 170,
                    supported_memory_types: MemoryTypes::parse("DDR5"),
                    cores: None,
                    threads: None,
                }),
            ),
            part(
                1,
                44_999,
                ComponentSpec::Motherboard(MotherboardSpec {
                    socket: "LGA1700".into(),
                    form_factor: "ATX".into(),
                    supported_memory_types: MemoryTypes::parse("DDR5"),
                    memory_slots: None,
                    max_memory_gb: None,
                }),
            ),
            part(
                1,
                17_999,
                ComponentSpec::Memory(MemorySpec {
                    memory_type: "DDR5".into(),
                    capacity_gb: 32,
                    speed_mhz: 5600,
                    modules: None,
                }),
            ),
            part(
                1,
                59_999,
                ComponentSpec::Gpu(GpuSpec {
                    power_draw_watts: 220,
                    length_mm: 285,
                    vram_gb: 12,
                }),
            ),
            part(
                1,
                16_999,
                ComponentSpec::Case(CaseSpec {
                    form_factor: "ATX".into(),
                    max_gpu_length_mm: 315,
                }),
            ),
            part(
                1,
                9_999,
                ComponentSpec::Psu(PsuSpec {
                    wattage: 650,
                    efficiency: None,
                    modular: None,
                }),
            ),
            part(
                2,
                4_999,
                ComponentSpec::Psu(PsuSpec {
                    wattage: 350,
                    efficiency: None,
                    modular: None,
                }),
            ),
            part(
                1,
                12_999,
                ComponentSpec::Storage(StorageSpec {
                    interface_type: "M.2".into(),
                    capacity_gb: None,
                    medium: None,
                }),
            ),
        ];
        Arc::new(Catalog::from_components(components).unwrap())
    }

    #[test]
    fn new_engine_reports_baseline() {
        let engine = CompatibilityEngine::new(builtin());
        assert_eq!(engine.metrics().estimated_wattage, 50);
        assert_eq!(engine.metrics().total_price, Price::ZERO);
        assert!(engine.issues().is_empty());
        assert!(!engine.has_blocking_errors());
        assert!(!engine.is_orderable());
    }

    #[test]
    fn end_to_end_walkthrough_misses_only_storage() {
        let mut engine = CompatibilityEngine::new(scenario_catalog());
        for category in [Cpu, Motherboard, Memory, Gpu, Case, Psu] {
            engine.select_component(category, Some(1)).unwrap();
        }

        let report = engine.report();
        assert_eq!(report.metrics.estimated_wattage, 125 + 220 + 10 + 50);
        assert_eq!(crate::power::recommended_wattage(405), 486);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
        assert!(!report.has_blocking_errors);
        assert_eq!(report.metrics.selected_count, 6);
        assert!(!report.orderable);

        engine.select_component(Storage, Some(1)).unwrap();
        assert!(engine.is_orderable());
        assert_eq!(engine.metrics().completion_fraction, 1.0);
    }

    #[test]
    fn incompatible_selection_is_accepted_and_flagged() {
        let mut engine = CompatibilityEngine::new(scenario_catalog());
        engine.select_component(Cpu, Some(2)).unwrap();
        let report = engine.select_component(Motherboard, Some(1)).unwrap();

        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule, IssueCode::SocketMismatch);
        assert_eq!(report.issues[0].severity, Severity::Error);
        assert!(report.has_blocking_errors);
        assert_eq!(engine.selection().get(Cpu).unwrap().id, 2);
    }

    #[test]
    fn complete_build_with_errors_is_not_orderable() {
        let mut engine = CompatibilityEngine::new(scenario_catalog());
        for category in ComponentCategory::ALL {
            engine.select_component(category, Some(1)).unwrap();
        }
        assert!(engine.is_orderable());

        engine.select_component(Psu, Some(2)).unwrap();
        assert!(engine.selection().is_complete());
        assert!(engine.has_blocking_errors());
        assert!(!engine.is_orderable());
    }

    #[test]
    fn unknown_component_leaves_state_unchanged() {
        let mut engine = CompatibilityEngine::new(scenario_catalog());
        engine.select_component(Cpu, Some(2)).unwrap();
        engine.select_component(Motherboard, Some(1)).unwrap();
        let before_report = engine.report().clone();
        let before_selection = engine.selection().clone();

        let err = engine.select_component(Gpu, Some(42)).unwrap_err();
        assert_matches!(err, CoreError::UnknownComponent { category: Gpu, id: 42 });

        // The id exists, but under another category.
        let err = engine.select_component(Case, Some(2)).unwrap_err();
        assert_matches!(err, CoreError::UnknownComponent { category: Case, id: 2 });

        assert_eq!(engine.report(), &before_report);
        assert_eq!(engine.selection(), &before_selection);
    }

    #[test]
    fn clearing_a_slot_recomputes() {
        let mut engine = CompatibilityEngine::new(scenario_catalog());
        engine.select_component(Cpu, Some(2)).unwrap();
        engine.select_component(Motherboard, Some(1)).unwrap();
        assert!(engine.has_blocking_errors());

        let report = engine.select_component(Cpu, None).unwrap();
        assert!(report.issues.is_empty());
        assert_eq!(report.metrics.total_price.cents(), 44_999);
        assert_eq!(report.metrics.estimated_wattage, 50);
    }

    #[test]
    fn clear_resets_everything() {
        let mut engine = CompatibilityEngine::new(builtin());
        engine.select_component(Gpu, Some(1)).unwrap();
        engine.select_component(Psu, Some(3)).unwrap();

        let report = engine.clear();
        assert_eq!(report.metrics.selected_count, 0);
        assert_eq!(report.metrics.estimated_wattage, 50);
    }

    #[test]
    fn filtered_catalog_never_omits_components() {
        let mut engine = CompatibilityEngine::new(builtin());
        engine.select_component(Cpu, Some(2)).unwrap();
        engine.select_component(Motherboard, Some(2)).unwrap();
        engine.select_component(Memory, Some(1)).unwrap();

        for category in ComponentCategory::ALL {
            let entries = engine.filtered_catalog(category);
            assert_eq!(entries.len(), engine.catalog().components(category).len());
        }

        let memory = engine.filtered_catalog(Memory);
        let flags: Vec<bool> = memory.iter().map(|e| e.is_compatible).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn with_selection_evaluates_snapshot() {
        let engine =
            CompatibilityEngine::with_selection(scenario_catalog(), [(Cpu, 2), (Motherboard, 1)])
                .unwrap();
        assert!(engine.has_blocking_errors());
        assert_eq!(engine.metrics().selected_count, 2);
    }

    #[test]
    fn with_selection_rejects_unknown_and_duplicate_picks() {
        assert_matches!(
            CompatibilityEngine::with_selection(scenario_catalog(), [(Gpu, 9)]),
            Err(CoreError::UnknownComponent { category: Gpu, id: 9 })
        );
        assert_matches!(
            CompatibilityEngine::with_selection(scenario_catalog(), [(Cpu, 1), (Cpu, 2)]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn state_serializes_selection_and_report() {
        let mut engine = CompatibilityEngine::new(builtin());
        engine.select_component(Case, Some(2)).unwrap();

        let value = serde_json::to_value(engine.state()).unwrap();
        assert_eq!(value["selection"]["case"]["id"], 2);
        assert!(value["selection"]["cpu"].is_null());
        assert_eq!(value["metrics"]["estimated_wattage"], 50);
        assert_eq!(value["orderable"], false);
        assert!(value["issues"].as_array().unwrap().is_empty());
    }

    #[test]
    fn matrix_tracks_selection() {
        let mut engine = CompatibilityEngine::new(builtin());
        engine.select_component(Cpu, Some(1)).unwrap();
        engine.select_component(Motherboard, Some(2)).unwrap();
        assert_eq!(
            engine.matrix().socket.status,
            crate::matrix::SocketStatus::Incompatible
        );
    }
}
