//! Power draw estimation and PSU budget classification.
//!
//! Thresholds are expressed in tenths so comparisons stay in integer
//! arithmetic: a PSU at exactly 1.2x the draw is sufficient, not borderline.

use serde::Serialize;

use crate::selection::BuildSelection;

/// Fixed draw for motherboard, storage, fans and idle, always included.
pub const BASELINE_WATTS: u32 = 50;

/// Approximate draw of a memory kit.
pub const MEMORY_WATTS: u32 = 10;

/// Below 1.1x the estimated draw a PSU cannot carry the build.
pub const MIN_HEADROOM_TENTHS: u64 = 11;

/// 1.2x the estimated draw is the recommended PSU rating.
pub const RECOMMENDED_HEADROOM_TENTHS: u64 = 12;

/// Estimated system draw: CPU TDP + GPU power + memory + baseline.
pub fn estimate_wattage(selection: &BuildSelection) -> u32 {
    let cpu = selection.cpu().map_or(0, |c| c.tdp_watts);
    let gpu = selection.gpu().map_or(0, |g| g.power_draw_watts);
    let memory = if selection.memory().is_some() {
        MEMORY_WATTS
    } else {
        0
    };
    cpu.saturating_add(gpu)
        .saturating_add(memory)
        .saturating_add(BASELINE_WATTS)
}

/// Recommended PSU rating for a draw, rounded up to the next whole watt.
pub fn recommended_wattage(draw: u32) -> u64 {
    (u64::from(draw) * RECOMMENDED_HEADROOM_TENTHS).div_ceil(10)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerBudget {
    /// At least the recommended 1.2x rating.
    Sufficient,
    /// Between 1.1x and 1.2x: works, but with thin headroom.
    LowHeadroom,
    /// Under 1.1x the estimated draw.
    Insufficient,
}

pub fn assess(psu_wattage: u32, draw: u32) -> PowerBudget {
    let psu_tenths = u64::from(psu_wattage) * 10;
    let draw = u64::from(draw);
    if psu_tenths < draw * MIN_HEADROOM_TENTHS {
        PowerBudget::Insufficient
    } else if psu_tenths < draw * RECOMMENDED_HEADROOM_TENTHS {
        PowerBudget::LowHeadroom
    } else {
        PowerBudget::Sufficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::category::ComponentCategory;

    #[test]
    fn empty_selection_draws_baseline() {
        assert_eq!(estimate_wattage(&BuildSelection::new()), 50);
    }

    #[test]
    fn sums_cpu_gpu_memory_and_baseline() {
        let catalog = Catalog::builtin().unwrap();
        let mut selection = BuildSelection::new();
        for (category, id) in [
            (ComponentCategory::Cpu, 1),
            (ComponentCategory::Gpu, 2),
            (ComponentCategory::Memory, 1),
            (ComponentCategory::Psu, 1),
            (ComponentCategory::Storage, 1),
        ] {
            selection.insert(catalog.find(category, id).unwrap().clone());
        }
        assert_eq!(estimate_wattage(&selection), 125 + 220 + 10 + 50);
    }

    #[test]
    fn recommended_rounds_up() {
        assert_eq!(recommended_wattage(405), 486);
        assert_eq!(recommended_wattage(401), 482);
        assert_eq!(recommended_wattage(50), 60);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(assess(480, 400), PowerBudget::Sufficient);
        assert_eq!(assess(479, 400), PowerBudget::LowHeadroom);
        assert_eq!(assess(460, 400), PowerBudget::LowHeadroom);
        assert_eq!(assess(440, 400), PowerBudget::LowHeadroom);
        assert_eq!(assess(439, 400), PowerBudget::Insufficient);
    }
}
