//! Compatibility matrix shown on the builder's "Compatibility Check" tab.
//!
//! A quick per-concern summary that, unlike the issue list, also reports the
//! state of checks that cannot run yet.

use serde::Serialize;

use crate::power::{self, PowerBudget};
use crate::rules::sockets_match;
use crate::selection::BuildSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketStatus {
    Compatible,
    Incompatible,
    /// CPU or motherboard not selected yet.
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerStatus {
    /// At least 1.1x the estimated draw.
    Sufficient,
    Insufficient,
    NoPsuSelected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocketCheck {
    pub cpu_socket: Option<String>,
    pub motherboard_socket: Option<String>,
    pub status: SocketStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerCheck {
    pub estimated_wattage: u32,
    pub psu_wattage: Option<u32>,
    pub recommended_wattage: u64,
    pub status: PowerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityMatrix {
    pub socket: SocketCheck,
    pub power: PowerCheck,
}

impl CompatibilityMatrix {
    pub fn compute(selection: &BuildSelection, estimated_wattage: u32) -> Self {
        let (cpu, motherboard) = (selection.cpu(), selection.motherboard());
        let socket_status = match (cpu, motherboard) {
            (Some(cpu), Some(motherboard)) if sockets_match(cpu, motherboard) => {
                SocketStatus::Compatible
            }
            (Some(_), Some(_)) => SocketStatus::Incompatible,
            _ => SocketStatus::Incomplete,
        };

        let psu_wattage = selection.psu().map(|p| p.wattage);
        let power_status = match psu_wattage {
            None => PowerStatus::NoPsuSelected,
            Some(watts) if power::assess(watts, estimated_wattage) == PowerBudget::Insufficient => {
                PowerStatus::Insufficient
            }
            Some(_) => PowerStatus::Sufficient,
        };

        Self {
            socket: SocketCheck {
                cpu_socket: cpu.map(|c| c.socket.clone()),
                motherboard_socket: motherboard.map(|m| m.socket.clone()),
                status: socket_status,
            },
            power: PowerCheck {
                estimated_wattage,
                psu_wattage,
                recommended_wattage: power::recommended_wattage(estimated_wattage),
                status: power_status,
            },
        }
    }
}
