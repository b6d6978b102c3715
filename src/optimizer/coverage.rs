//! # Coverage Optimizer
//!
//! Finds the minimum-cost coverage allocation that meets a target effect.
//!
//! The effect of an allocation is linear in each type's coverage fraction
//! and the roof budget is a single linear constraint, so the optimum always
//! sits on a vertex of the feasible region: either one type at its required
//! coverage, or two types blended on the full-roof boundary. The optimizer
//! enumerates exactly those vertices instead of running a general LP solve.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use tracing::debug;

use super::{
    CoverageAllocation, CoverageProposal, EffectKind, EffectTarget, COVERAGE_EPSILON,
};
use crate::config::DEFAULT_HVAC_SAVINGS_KWH_PER_DEG_M2;
use crate::domain::{CoefficientCatalog, GreeningCoefficient, GreeningType};
use crate::error::EngineError;

/// Coverage a single type needs on its own to reach the target.
enum SingleTypeFit {
    /// Reachable with this fraction of the roof (≤ 1).
    Covers(f64),
    /// Zero effect coefficient, or more than the whole roof required.
    OutOfReach,
}

fn single_type_fit(effect_coeff: f64, target_effect: f64) -> SingleTypeFit {
    if effect_coeff > 0.0 {
        let required = target_effect / effect_coeff;
        if required <= 1.0 {
            return SingleTypeFit::Covers(required);
        }
    }
    SingleTypeFit::OutOfReach
}

/// Coverage optimization engine over an immutable coefficient catalog.
///
/// `optimize` is a pure function of the catalog and its arguments: no I/O,
/// no randomness, no shared mutable state. Identical inputs yield
/// bit-identical proposals.
#[derive(Debug, Clone)]
pub struct CoverageOptimizer {
    catalog: CoefficientCatalog,
    hvac_savings_kwh_per_deg_m2: f64,
}

impl CoverageOptimizer {
    pub fn new(catalog: CoefficientCatalog) -> Self {
        Self {
            catalog,
            hvac_savings_kwh_per_deg_m2: DEFAULT_HVAC_SAVINGS_KWH_PER_DEG_M2,
        }
    }

    /// Override the HVAC energy-per-degree conversion constant.
    pub fn with_hvac_savings(mut self, kwh_per_deg_m2: f64) -> Self {
        self.hvac_savings_kwh_per_deg_m2 = kwh_per_deg_m2;
        self
    }

    pub fn catalog(&self) -> &CoefficientCatalog {
        &self.catalog
    }

    /// Recommend the cheapest coverage allocation meeting `target`.
    ///
    /// Returns `None` for a non-positive roof area or target value. When the
    /// target is out of reach, returns the maximum-effect allocation marked
    /// `feasible = false` rather than failing.
    pub fn optimize(&self, roof_area_m2: f64, target: EffectTarget) -> Option<CoverageProposal> {
        if roof_area_m2 <= 0.0 || target.value() <= 0.0 {
            return None;
        }
        let kind = target.kind();
        let target_value = target.value();
        let target_effect = self.normalized_target(roof_area_m2, target);

        let mut candidates: Vec<CoverageProposal> = Vec::new();

        // Single-type candidates: the exact required coverage when the type
        // can reach the target alone, plus the full-roof variant kept for
        // the closest-approach fallback.
        for (type_code, coeff) in self.catalog.iter() {
            let eff = self.effect_coefficient(kind, coeff);
            if let SingleTypeFit::Covers(required) = single_type_fit(eff, target_effect) {
                candidates.push(self.score(
                    roof_area_m2,
                    kind,
                    &[(type_code, coeff, required)],
                    target_value,
                    target_effect,
                ));
            }
            candidates.push(self.score(
                roof_area_m2,
                kind,
                &[(type_code, coeff, 1.0)],
                target_value,
                target_effect,
            ));
        }

        // Two-type blends on the coverage = 1 boundary:
        // x·a + (1-x)·b = target. Pairs with equal coefficients have no
        // unique solution and are skipped.
        for ((type_a, coeff_a), (type_b, coeff_b)) in self.catalog.iter().tuple_combinations() {
            let a = self.effect_coefficient(kind, coeff_a);
            let b = self.effect_coefficient(kind, coeff_b);
            if a == b {
                continue;
            }
            let x = (target_effect - b) / (a - b);
            if (0.0..=1.0).contains(&x) {
                candidates.push(self.score(
                    roof_area_m2,
                    kind,
                    &[(type_a, coeff_a, x), (type_b, coeff_b, 1.0 - x)],
                    target_value,
                    target_effect,
                ));
            }
        }

        debug!(
            kind = %kind,
            target_effect,
            candidates = candidates.len(),
            "enumerated coverage candidates"
        );

        if let Some(best) = candidates
            .iter()
            .filter(|c| c.feasible)
            .min_by_key(|c| (OrderedFloat(c.total_cost), OrderedFloat(c.total_load)))
        {
            debug!(
                total_cost = best.total_cost,
                total_load = best.total_load,
                "selected minimum-cost feasible coverage"
            );
            return Some(best.clone());
        }

        // Out of reach: hand back the best the catalog can do, marked
        // infeasible. The first maximum wins on exact ties.
        let mut closest: Option<&CoverageProposal> = None;
        for candidate in &candidates {
            if closest.map_or(true, |c| candidate.achieved_effect > c.achieved_effect) {
                closest = Some(candidate);
            }
        }
        closest.map(|c| {
            debug!(
                achieved_effect = c.achieved_effect,
                "target unreachable, returning closest approach"
            );
            CoverageProposal {
                feasible: false,
                ..c.clone()
            }
        })
    }

    /// Score a caller-supplied allocation against `target` with the same
    /// formulas `optimize` uses.
    ///
    /// Fails with [`EngineError::UnknownType`] when the allocation references
    /// a type absent from the catalog.
    pub fn evaluate(
        &self,
        roof_area_m2: f64,
        target: EffectTarget,
        coverage: &CoverageAllocation,
    ) -> Result<CoverageProposal, EngineError> {
        if roof_area_m2 <= 0.0 {
            return Err(EngineError::InvalidScenario(
                "roof_area_m2 must be > 0".to_string(),
            ));
        }
        let kind = target.kind();
        let target_effect = self.normalized_target(roof_area_m2, target);

        let mut parts = Vec::with_capacity(coverage.len());
        for (type_code, ratio) in coverage.iter() {
            let coeff = self.catalog.coefficients_for(type_code)?;
            parts.push((type_code, coeff, ratio));
        }
        Ok(self.score(roof_area_m2, kind, &parts, target.value(), target_effect))
    }

    /// Per-area effect coefficient of one type in the active kind's units.
    fn effect_coefficient(&self, kind: EffectKind, coeff: &GreeningCoefficient) -> f64 {
        match kind {
            EffectKind::Co2 => coeff.co2_kg_m2_y,
            EffectKind::Temp => coeff.temp_reduction_c_at_100,
            // HVAC rides on the temperature coefficient, converted to kWh
            EffectKind::Hvac => {
                coeff.temp_reduction_c_at_100 * self.hvac_savings_kwh_per_deg_m2
            }
        }
    }

    /// Normalize the target to the per-area effect space candidates are
    /// generated in. The temperature coefficient already expresses a
    /// whole-roof reduction, so that kind carries no area scaling.
    fn normalized_target(&self, roof_area_m2: f64, target: EffectTarget) -> f64 {
        match target {
            EffectTarget::Co2KgPerYear(v) => v / roof_area_m2,
            EffectTarget::TempReductionC(v) => v,
            EffectTarget::HvacSavingsKwhPerYear(v) => {
                v / (roof_area_m2 * self.hvac_savings_kwh_per_deg_m2)
            }
        }
    }

    /// Scale from per-area effect space back to the target's units.
    fn display_scale(&self, kind: EffectKind, roof_area_m2: f64) -> f64 {
        match kind {
            EffectKind::Temp => 1.0,
            EffectKind::Co2 | EffectKind::Hvac => roof_area_m2,
        }
    }

    fn score(
        &self,
        roof_area_m2: f64,
        kind: EffectKind,
        parts: &[(GreeningType, &GreeningCoefficient, f64)],
        target_value: f64,
        target_effect: f64,
    ) -> CoverageProposal {
        let mut achieved = 0.0;
        let mut cost_per_m2 = 0.0;
        let mut load_per_m2 = 0.0;
        for &(_, coeff, ratio) in parts {
            achieved += self.effect_coefficient(kind, coeff) * ratio;
            cost_per_m2 += coeff.cost_per_m2 * ratio;
            load_per_m2 += coeff.load_kg_per_m2 * ratio;
        }
        let coverage: CoverageAllocation =
            parts.iter().map(|(t, _, ratio)| (*t, *ratio)).collect();
        let feasible =
            achieved >= target_effect && coverage.total() <= 1.0 + COVERAGE_EPSILON;

        CoverageProposal {
            coverage,
            total_cost: roof_area_m2 * cost_per_m2,
            total_load: roof_area_m2 * load_per_m2,
            achieved_effect: achieved * self.display_scale(kind, roof_area_m2),
            target_effect: target_value,
            effect_kind: kind,
            feasible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn reference_optimizer() -> CoverageOptimizer {
        CoverageOptimizer::new(CoefficientCatalog::default())
    }

    fn catalog_of(rows: &[(GreeningType, f64, f64, f64, f64)]) -> CoefficientCatalog {
        let mut coeffs = BTreeMap::new();
        for (type_code, co2, temp, cost, load) in rows {
            coeffs.insert(
                *type_code,
                GreeningCoefficient {
                    co2_kg_m2_y: *co2,
                    temp_reduction_c_at_100: *temp,
                    cost_per_m2: *cost,
                    load_kg_per_m2: *load,
                },
            );
        }
        CoefficientCatalog::new(coeffs).unwrap()
    }

    #[test]
    fn test_non_positive_roof_area_returns_none() {
        let optimizer = reference_optimizer();
        assert!(optimizer
            .optimize(0.0, EffectTarget::Co2KgPerYear(100.0))
            .is_none());
        assert!(optimizer
            .optimize(-25.0, EffectTarget::TempReductionC(1.0))
            .is_none());
    }

    #[test]
    fn test_non_positive_target_returns_none() {
        let optimizer = reference_optimizer();
        assert!(optimizer
            .optimize(100.0, EffectTarget::Co2KgPerYear(0.0))
            .is_none());
        assert!(optimizer
            .optimize(100.0, EffectTarget::HvacSavingsKwhPerYear(-1.0))
            .is_none());
    }

    #[test]
    fn test_cheapest_feasible_candidate_wins_co2() {
        // 100 kg/yr over 100 m² → 1.0 kg/m²/yr. Sedum covers it exactly at
        // 100% (5 200 000 KRW), but shrub needs only a third of the roof at
        // 110 000 KRW/m², which is strictly cheaper.
        let optimizer = reference_optimizer();
        let proposal = optimizer
            .optimize(100.0, EffectTarget::Co2KgPerYear(100.0))
            .unwrap();

        assert!(proposal.feasible);
        assert_eq!(proposal.coverage.len(), 1);
        assert!((proposal.coverage.ratio(GreeningType::Shrub) - 1.0 / 3.0).abs() < 1e-12);
        assert!((proposal.total_cost - 11_000_000.0 / 3.0).abs() < 1e-3);
        assert!((proposal.total_load - 7_000.0).abs() < 1e-9);
        assert!((proposal.achieved_effect - 100.0).abs() < 1e-9);
        assert_eq!(proposal.target_effect, 100.0);
        assert_eq!(proposal.effect_kind, EffectKind::Co2);

        // Strictly cheaper than sedum at full coverage.
        assert!(proposal.total_cost < 100.0 * 52_000.0);
    }

    #[test]
    fn test_two_type_mix_beats_every_single_type() {
        // 2.5 °C: shrub alone needs 83.3% (91 667 KRW/m² equivalent), tree
        // alone 50% (92 500), but a sedum+tree full-roof blend lands at
        // ~70 345 KRW/m².
        let optimizer = reference_optimizer();
        let proposal = optimizer
            .optimize(100.0, EffectTarget::TempReductionC(2.5))
            .unwrap();

        assert!(proposal.feasible);
        assert_eq!(proposal.coverage.len(), 2);
        let sedum = proposal.coverage.ratio(GreeningType::Sedum);
        let tree = proposal.coverage.ratio(GreeningType::Tree);
        assert!((sedum - 2.5 / 2.9).abs() < 1e-9);
        assert!((sedum + tree - 1.0).abs() < 1e-9);
        assert!((proposal.achieved_effect - 2.5).abs() < 1e-9);
        // Cheaper than the best single-type option (tree at 50%).
        assert!(proposal.total_cost < 100.0 * 185_000.0 * 0.5);
    }

    #[test]
    fn test_unreachable_target_returns_closest_approach() {
        // Even tree at 100% caps out at 4.0 kg/m²/yr → 400 kg on 100 m².
        let optimizer = reference_optimizer();
        let proposal = optimizer
            .optimize(100.0, EffectTarget::Co2KgPerYear(10_000.0))
            .unwrap();

        assert!(!proposal.feasible);
        assert_eq!(proposal.coverage.ratio(GreeningType::Tree), 1.0);
        assert_eq!(proposal.achieved_effect, 400.0);
        assert_eq!(proposal.target_effect, 10_000.0);
        assert!((proposal.total_cost - 18_500_000.0).abs() < 1e-6);
        assert!((proposal.total_load - 35_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_coefficient_pair_produces_no_blend() {
        // Both types absorb 2.0 kg/m²/yr; the boundary blend is degenerate,
        // so the result must be a plain single-type allocation.
        let catalog = catalog_of(&[
            (GreeningType::Grass, 2.0, 1.0, 30_000.0, 100.0),
            (GreeningType::Sedum, 2.0, 1.5, 40_000.0, 90.0),
        ]);
        let optimizer = CoverageOptimizer::new(catalog);
        let proposal = optimizer
            .optimize(50.0, EffectTarget::Co2KgPerYear(50.0))
            .unwrap();

        assert!(proposal.feasible);
        assert_eq!(proposal.coverage.len(), 1);
        assert!((proposal.coverage.ratio(GreeningType::Grass) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_coefficient_type_never_selected_partially() {
        // Grass absorbs nothing here; it must not be offered as a partial
        // cover, and the feasible sedum allocation wins.
        let catalog = catalog_of(&[
            (GreeningType::Grass, 0.0, 2.0, 10_000.0, 50.0),
            (GreeningType::Sedum, 1.0, 2.1, 52_000.0, 95.0),
        ]);
        let optimizer = CoverageOptimizer::new(catalog);
        let proposal = optimizer
            .optimize(10.0, EffectTarget::Co2KgPerYear(5.0))
            .unwrap();

        assert!(proposal.feasible);
        assert_eq!(proposal.coverage.ratio(GreeningType::Grass), 0.0);
        assert!((proposal.coverage.ratio(GreeningType::Sedum) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_catalog_falls_back_infeasible() {
        let catalog = catalog_of(&[(GreeningType::Grass, 0.0, 0.0, 10_000.0, 50.0)]);
        let optimizer = CoverageOptimizer::new(catalog);
        let proposal = optimizer
            .optimize(10.0, EffectTarget::Co2KgPerYear(5.0))
            .unwrap();

        assert!(!proposal.feasible);
        assert_eq!(proposal.achieved_effect, 0.0);
        assert_eq!(proposal.coverage.ratio(GreeningType::Grass), 1.0);
    }

    #[test]
    fn test_load_breaks_cost_ties() {
        // Identical effect and cost, different load: the lighter type wins.
        let catalog = catalog_of(&[
            (GreeningType::Grass, 1.0, 1.0, 50_000.0, 120.0),
            (GreeningType::Sedum, 1.0, 1.0, 50_000.0, 80.0),
        ]);
        let optimizer = CoverageOptimizer::new(catalog);
        let proposal = optimizer
            .optimize(100.0, EffectTarget::Co2KgPerYear(50.0))
            .unwrap();

        assert!(proposal.feasible);
        assert!(proposal.coverage.ratio(GreeningType::Sedum) > 0.0);
        assert_eq!(proposal.coverage.ratio(GreeningType::Grass), 0.0);
        assert!((proposal.total_load - 100.0 * 80.0 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_target_is_area_independent() {
        let optimizer = reference_optimizer();
        let small = optimizer
            .optimize(50.0, EffectTarget::TempReductionC(2.0))
            .unwrap();
        let large = optimizer
            .optimize(5_000.0, EffectTarget::TempReductionC(2.0))
            .unwrap();

        // Same allocation regardless of area; cost scales with area.
        assert_eq!(small.coverage, large.coverage);
        assert!((large.total_cost / small.total_cost - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_hvac_target_follows_temperature_coefficients() {
        let optimizer = reference_optimizer();
        let area = 200.0;
        let hvac = DEFAULT_HVAC_SAVINGS_KWH_PER_DEG_M2;
        // Pick the HVAC target whose normalized effect matches a 2.5 °C
        // temperature target; the selected allocation must coincide.
        let equivalent_kwh = 2.5 * area * hvac * hvac;

        let by_temp = optimizer
            .optimize(area, EffectTarget::TempReductionC(2.5))
            .unwrap();
        let by_hvac = optimizer
            .optimize(area, EffectTarget::HvacSavingsKwhPerYear(equivalent_kwh))
            .unwrap();

        // Same allocation up to float noise in the two normalization paths.
        assert_eq!(by_temp.coverage.len(), by_hvac.coverage.len());
        for (type_code, ratio) in by_temp.coverage.iter() {
            assert!((by_hvac.coverage.ratio(type_code) - ratio).abs() < 1e-9);
        }
        assert_eq!(by_hvac.effect_kind, EffectKind::Hvac);
    }

    #[test]
    fn test_evaluate_matches_optimize_scoring() {
        let optimizer = reference_optimizer();
        let target = EffectTarget::Co2KgPerYear(100.0);
        let proposal = optimizer.optimize(100.0, target).unwrap();
        let rescored = optimizer
            .evaluate(100.0, target, &proposal.coverage)
            .unwrap();

        assert_eq!(proposal.achieved_effect, rescored.achieved_effect);
        assert_eq!(proposal.total_cost, rescored.total_cost);
        assert_eq!(proposal.total_load, rescored.total_load);
        assert_eq!(proposal.feasible, rescored.feasible);
    }

    #[test]
    fn test_evaluate_unknown_type_is_hard_failure() {
        let catalog = catalog_of(&[(GreeningType::Grass, 0.5, 2.0, 48_000.0, 120.0)]);
        let optimizer = CoverageOptimizer::new(catalog);
        let allocation = CoverageAllocation::single(GreeningType::Tree, 0.5);

        assert!(matches!(
            optimizer.evaluate(100.0, EffectTarget::Co2KgPerYear(10.0), &allocation),
            Err(EngineError::UnknownType(GreeningType::Tree))
        ));
    }

    #[test]
    fn test_evaluate_rejects_non_positive_area() {
        let optimizer = reference_optimizer();
        let allocation = CoverageAllocation::single(GreeningType::Sedum, 1.0);
        assert!(matches!(
            optimizer.evaluate(0.0, EffectTarget::Co2KgPerYear(10.0), &allocation),
            Err(EngineError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_optimize_is_idempotent() {
        let optimizer = reference_optimizer();
        let target = EffectTarget::Co2KgPerYear(137.5);
        let first = optimizer.optimize(321.0, target).unwrap();
        let second = optimizer.optimize(321.0, target).unwrap();
        assert_eq!(first, second);
    }
}
