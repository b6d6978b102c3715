//! Scenario evaluation: the environmental benefit of one concrete greening
//! plan (a type, a coverage ratio, optionally a species and a tree count).
//!
//! This is the preview computation behind the planning step; the coverage
//! optimizer answers the inverse question (which plan meets a target).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EngineConfig;
use crate::domain::{species, CoefficientCatalog, GreeningType};
use crate::error::EngineError;

/// One concrete greening plan to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub greening_type: GreeningType,
    /// Fraction of the roof covered by the chosen type, in [0, 1].
    pub coverage_ratio: f64,
    /// Optional species key refining the macro CO₂ coefficient.
    pub species: Option<String>,
    /// Number of trees planted; only meaningful for the tree type, whose
    /// CO₂ yield is counted per trunk rather than per m².
    pub tree_count: u32,
}

impl ScenarioInput {
    pub fn new(greening_type: GreeningType, coverage_ratio: f64) -> Self {
        Self {
            greening_type,
            coverage_ratio,
            species: None,
            tree_count: 0,
        }
    }

    pub fn with_species(mut self, key: impl Into<String>) -> Self {
        self.species = Some(key.into());
        self
    }

    pub fn with_tree_count(mut self, count: u32) -> Self {
        self.tree_count = count;
        self
    }
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self::new(GreeningType::Sedum, 0.65)
    }
}

/// Coefficient provenance echoed back with a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientMeta {
    pub co2_unit: String,
    pub temp_reduction_max_c: f64,
}

/// Computed environmental benefit of a scenario. Derived data, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub roof_area_m2: f64,
    pub greening_type: GreeningType,
    pub coverage_ratio: f64,
    pub tree_count: u32,
    pub species: Option<String>,
    pub green_area_m2: f64,
    pub co2_absorption_kg_per_year: f64,
    pub temp_reduction_c: f64,
    pub baseline_surface_temp_c: f64,
    pub after_surface_temp_c: f64,
    pub hvac_savings_kwh_per_year: f64,
    /// How many reference pines would absorb the same CO₂.
    pub tree_equivalent_count: u32,
    pub engine_version: String,
    pub coefficient_set_version: String,
    pub coeff_meta: CoefficientMeta,
}

/// Pure scenario evaluator over an immutable catalog.
#[derive(Debug, Clone)]
pub struct ScenarioEvaluator {
    catalog: CoefficientCatalog,
    engine: EngineConfig,
}

impl ScenarioEvaluator {
    pub fn new(catalog: CoefficientCatalog, engine: EngineConfig) -> Self {
        Self { catalog, engine }
    }

    /// Evaluate a scenario against the configured baseline temperature.
    pub fn compute(
        &self,
        roof_area_m2: f64,
        scenario: &ScenarioInput,
    ) -> Result<SimulationResult, EngineError> {
        self.compute_with_baseline(
            roof_area_m2,
            scenario,
            self.engine.baseline_surface_temp_c,
        )
    }

    pub fn compute_with_baseline(
        &self,
        roof_area_m2: f64,
        scenario: &ScenarioInput,
        baseline_surface_temp_c: f64,
    ) -> Result<SimulationResult, EngineError> {
        if roof_area_m2 <= 0.0 {
            return Err(EngineError::InvalidScenario(
                "roof_area_m2 must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&scenario.coverage_ratio) {
            return Err(EngineError::InvalidScenario(
                "coverage_ratio must be in [0,1]".to_string(),
            ));
        }

        let coeff = self.catalog.coefficients_for(scenario.greening_type)?;
        let green_area_m2 = roof_area_m2 * scenario.coverage_ratio;

        let co2_absorption_kg_per_year = match scenario.greening_type {
            GreeningType::Tree => {
                let per_tree = scenario
                    .species
                    .as_deref()
                    .and_then(species::tree_species)
                    .map(|s| s.co2_kg_per_tree_y)
                    .unwrap_or(species::PINE_CO2_KG_PER_TREE_Y);
                f64::from(scenario.tree_count) * per_tree
            }
            type_code => {
                let per_m2 = scenario
                    .species
                    .as_deref()
                    .and_then(|key| species::area_species(type_code, key))
                    .map(|s| s.co2_kg_m2_y)
                    .unwrap_or(coeff.co2_kg_m2_y);
                green_area_m2 * per_m2
            }
        };

        // Temperature coefficient expresses the whole-roof reduction at full
        // coverage; it scales with the ratio only, never with area.
        let temp_reduction_c = coeff.temp_reduction_c_at_100 * scenario.coverage_ratio;
        let after_surface_temp_c = baseline_surface_temp_c - temp_reduction_c;
        let hvac_savings_kwh_per_year =
            temp_reduction_c * roof_area_m2 * self.engine.hvac_savings_kwh_per_deg_m2;

        let tree_equivalent_count =
            (co2_absorption_kg_per_year / species::PINE_CO2_KG_PER_TREE_Y).round() as u32;

        trace!(
            greening_type = %scenario.greening_type,
            green_area_m2,
            co2_absorption_kg_per_year,
            "evaluated scenario"
        );

        Ok(SimulationResult {
            roof_area_m2,
            greening_type: scenario.greening_type,
            coverage_ratio: scenario.coverage_ratio,
            tree_count: scenario.tree_count,
            species: scenario.species.clone(),
            green_area_m2,
            co2_absorption_kg_per_year,
            temp_reduction_c,
            baseline_surface_temp_c,
            after_surface_temp_c,
            hvac_savings_kwh_per_year,
            tree_equivalent_count,
            engine_version: self.engine.engine_version.clone(),
            coefficient_set_version: self.engine.coefficient_set_version.clone(),
            coeff_meta: CoefficientMeta {
                co2_unit: match scenario.greening_type {
                    GreeningType::Tree => "kg/tree/y".to_string(),
                    _ => "kg/m2/y".to_string(),
                },
                temp_reduction_max_c: coeff.temp_reduction_c_at_100,
            },
        })
    }
}

impl Default for ScenarioEvaluator {
    fn default() -> Self {
        Self::new(CoefficientCatalog::default(), EngineConfig::default())
    }
}
