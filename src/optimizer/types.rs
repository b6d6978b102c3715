use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::GreeningType;

/// Tolerance on the coverage-fraction sum, absorbing floating-point
/// accumulation across allocation entries.
pub const COVERAGE_EPSILON: f64 = 1e-6;

/// The effect dimension a target is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EffectKind {
    Co2,
    Temp,
    Hvac,
}

/// A single target effect for the optimizer.
///
/// One variant per effect kind, each carrying its own payload, so a caller
/// can neither request two effects at once nor none at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    /// Annual CO₂ absorption target (kg/yr)
    Co2KgPerYear(f64),
    /// Surface temperature reduction target (°C)
    TempReductionC(f64),
    /// Annual HVAC energy savings target (kWh/yr)
    HvacSavingsKwhPerYear(f64),
}

impl EffectTarget {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Co2KgPerYear(_) => EffectKind::Co2,
            Self::TempReductionC(_) => EffectKind::Temp,
            Self::HvacSavingsKwhPerYear(_) => EffectKind::Hvac,
        }
    }

    /// The raw target value in its kind's units.
    pub fn value(&self) -> f64 {
        match self {
            Self::Co2KgPerYear(v) | Self::TempReductionC(v) | Self::HvacSavingsKwhPerYear(v) => *v,
        }
    }
}

/// Coverage fractions per greening type.
///
/// Fractions live in [0, 1]; the sum may stay below 1, leaving the remainder
/// of the roof untreated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageAllocation {
    ratios: BTreeMap<GreeningType, f64>,
}

impl CoverageAllocation {
    /// Allocation assigning one type a single coverage fraction.
    pub fn single(type_code: GreeningType, ratio: f64) -> Self {
        let mut ratios = BTreeMap::new();
        ratios.insert(type_code, ratio);
        Self { ratios }
    }

    /// Coverage fraction for a type (0 when absent).
    pub fn ratio(&self, type_code: GreeningType) -> f64 {
        self.ratios.get(&type_code).copied().unwrap_or(0.0)
    }

    /// Sum of all coverage fractions.
    pub fn total(&self) -> f64 {
        self.ratios.values().sum()
    }

    /// Iterate `(type, ratio)` entries in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (GreeningType, f64)> + '_ {
        self.ratios.iter().map(|(t, r)| (*t, *r))
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

impl FromIterator<(GreeningType, f64)> for CoverageAllocation {
    fn from_iter<I: IntoIterator<Item = (GreeningType, f64)>>(iter: I) -> Self {
        Self {
            ratios: iter.into_iter().collect(),
        }
    }
}

/// Result of one optimization call. Computed fresh per call, never persisted.
///
/// `achieved_effect` and `target_effect` are expressed in the target kind's
/// user-facing units (kg/yr, °C, kWh/yr).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageProposal {
    pub coverage: CoverageAllocation,
    /// Total installation cost over the roof (KRW)
    pub total_cost: f64,
    /// Total added structural load over the roof (kg)
    pub total_load: f64,
    pub achieved_effect: f64,
    pub target_effect: f64,
    pub effect_kind: EffectKind,
    /// Whether the achieved effect meets the target within the roof budget.
    pub feasible: bool,
}

impl CoverageProposal {
    /// Human-readable combination, e.g. "세덤 40% + 관목 60%".
    ///
    /// Types at zero coverage are omitted; an empty selection renders the
    /// fixed "선택 없음" label.
    pub fn combination_label(&self) -> String {
        let parts: Vec<String> = self
            .coverage
            .iter()
            .filter(|(_, ratio)| *ratio > 0.0)
            .map(|(type_code, ratio)| {
                format!("{} {}%", type_code.label_ko(), (ratio * 100.0).round() as i64)
            })
            .collect();
        if parts.is_empty() {
            return "선택 없음".to_string();
        }
        parts.join(" + ")
    }
}
