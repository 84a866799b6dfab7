//! Compatibility rules and their evaluator. Pure logic.
//!
//! Rules run in a fixed order against a [`BuildSelection`] and each produces
//! at most one [`CompatibilityIssue`]. A rule only fires when every category
//! it inspects is selected; partial builds are never penalised for what is
//! missing.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::category::ComponentCategory;
use crate::component::{CaseSpec, CpuSpec, GpuSpec, MemorySpec, MemoryTypes, MotherboardSpec};
use crate::power::{self, PowerBudget};
use crate::selection::BuildSelection;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether an issue blocks ordering or is advisory.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Stable machine-readable identifier for the condition that fired.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    SocketMismatch,
    MemoryTypeMismatch,
    InsufficientPower,
    LowPowerHeadroom,
    GpuClearance,
    FormFactorMismatch,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompatibilityIssue {
    pub severity: Severity,
    pub rule: IssueCode,
    /// Human-readable, embeds the values that triggered the issue.
    pub message: String,
    pub involved_categories: BTreeSet<ComponentCategory>,
}

impl CompatibilityIssue {
    fn new(
        severity: Severity,
        rule: IssueCode,
        message: String,
        involved: &[ComponentCategory],
    ) -> Self {
        Self {
            severity,
            rule,
            message,
            involved_categories: involved.iter().copied().collect(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn involves(&self, category: ComponentCategory) -> bool {
        self.involved_categories.contains(&category)
    }
}

/// The rule set, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Socket,
    MemoryType,
    PowerBudget,
    GpuClearance,
    FormFactor,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::Socket,
        Rule::MemoryType,
        Rule::PowerBudget,
        Rule::GpuClearance,
        Rule::FormFactor,
    ];

    pub fn evaluate(
        self,
        selection: &BuildSelection,
        estimated_wattage: u32,
    ) -> Option<CompatibilityIssue> {
        match self {
            Rule::Socket => evaluate_socket(selection),
            Rule::MemoryType => evaluate_memory_type(selection),
            Rule::PowerBudget => evaluate_power_budget(selection, estimated_wattage),
            Rule::GpuClearance => evaluate_gpu_clearance(selection),
            Rule::FormFactor => evaluate_form_factor(selection),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Run every rule in order and collect what fires into a fresh list.
pub fn evaluate_rules(
    selection: &BuildSelection,
    estimated_wattage: u32,
) -> Vec<CompatibilityIssue> {
    Rule::ALL
        .into_iter()
        .filter_map(|rule| rule.evaluate(selection, estimated_wattage))
        .collect()
}

pub fn has_blocking_errors(issues: &[CompatibilityIssue]) -> bool {
    issues.iter().any(CompatibilityIssue::is_error)
}

// ---------------------------------------------------------------------------
// Pairwise predicates (shared with the catalog filter)
// ---------------------------------------------------------------------------

pub(crate) fn sockets_match(cpu: &CpuSpec, motherboard: &MotherboardSpec) -> bool {
    cpu.socket == motherboard.socket
}

pub(crate) fn memory_supported(supported: &MemoryTypes, memory: &MemorySpec) -> bool {
    supported.contains(&memory.memory_type)
}

pub(crate) fn gpu_fits(gpu: &GpuSpec, case: &CaseSpec) -> bool {
    gpu.length_mm <= case.max_gpu_length_mm
}

pub(crate) fn form_factors_match(motherboard: &MotherboardSpec, case: &CaseSpec) -> bool {
    motherboard.form_factor == case.form_factor
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn evaluate_socket(selection: &BuildSelection) -> Option<CompatibilityIssue> {
    let (cpu, motherboard) = (selection.cpu()?, selection.motherboard()?);
    if sockets_match(cpu, motherboard) {
        return None;
    }
    Some(CompatibilityIssue::new(
        Severity::Error,
        IssueCode::SocketMismatch,
        format!(
            "CPU socket {} is not compatible with motherboard socket {}",
            cpu.socket, motherboard.socket
        ),
        &[ComponentCategory::Cpu, ComponentCategory::Motherboard],
    ))
}

/// The memory type must be accepted by both the CPU and the motherboard.
fn evaluate_memory_type(selection: &BuildSelection) -> Option<CompatibilityIssue> {
    let (cpu, motherboard, memory) = (
        selection.cpu()?,
        selection.motherboard()?,
        selection.memory()?,
    );
    if memory_supported(&cpu.supported_memory_types, memory)
        && memory_supported(&motherboard.supported_memory_types, memory)
    {
        return None;
    }
    Some(CompatibilityIssue::new(
        Severity::Error,
        IssueCode::MemoryTypeMismatch,
        format!(
            "Memory type {} is not compatible with selected CPU ({}) and motherboard ({})",
            memory.memory_type, cpu.supported_memory_types, motherboard.supported_memory_types
        ),
        &[
            ComponentCategory::Cpu,
            ComponentCategory::Motherboard,
            ComponentCategory::Memory,
        ],
    ))
}

fn evaluate_power_budget(
    selection: &BuildSelection,
    estimated_wattage: u32,
) -> Option<CompatibilityIssue> {
    let psu = selection.psu()?;
    if estimated_wattage == 0 {
        return None;
    }
    let recommended = power::recommended_wattage(estimated_wattage);

    match power::assess(psu.wattage, estimated_wattage) {
        PowerBudget::Sufficient => None,
        PowerBudget::Insufficient => Some(CompatibilityIssue::new(
            Severity::Error,
            IssueCode::InsufficientPower,
            format!(
                "Power supply ({}W) is insufficient for an estimated {estimated_wattage}W draw. \
                 Recommended: {recommended}W or higher",
                psu.wattage
            ),
            &[ComponentCategory::Psu],
        )),
        PowerBudget::LowHeadroom => Some(CompatibilityIssue::new(
            Severity::Warning,
            IssueCode::LowPowerHeadroom,
            format!(
                "Power supply ({}W) is close to the estimated {estimated_wattage}W draw. \
                 Consider {recommended}W or higher for better efficiency",
                psu.wattage
            ),
            &[ComponentCategory::Psu],
        )),
    }
}

fn evaluate_gpu_clearance(selection: &BuildSelection) -> Option<CompatibilityIssue> {
    let (gpu, case) = (selection.gpu()?, selection.case()?);
    if gpu_fits(gpu, case) {
        return None;
    }
    Some(CompatibilityIssue::new(
        Severity::Error,
        IssueCode::GpuClearance,
        format!(
            "Graphics card ({}mm) is too long for the selected case (max: {}mm)",
            gpu.length_mm, case.max_gpu_length_mm
        ),
        &[ComponentCategory::Gpu, ComponentCategory::Case],
    ))
}

fn evaluate_form_factor(selection: &BuildSelection) -> Option<CompatibilityIssue> {
    let (motherboard, case) = (selection.motherboard()?, selection.case()?);
    if form_factors_match(motherboard, case) {
        return None;
    }
    Some(CompatibilityIssue::new(
        Severity::Error,
        IssueCode::FormFactorMismatch,
        format!(
            "Motherboard form factor ({}) is not compatible with case ({})",
            motherboard.form_factor, case.form_factor
        ),
        &[ComponentCategory::Motherboard, ComponentCategory::Case],
    ))
}
