//! Greening coefficient catalog: the immutable lookup every computation in
//! this crate reads its per-type effect, cost and load coefficients from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GreeningType;
use crate::error::EngineError;

/// Effect, cost and structural-load coefficients for one greening type.
///
/// All values are per square metre of planted area, except
/// `temp_reduction_c_at_100` which expresses the whole-roof surface
/// temperature drop when this type covers 100% of the roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeningCoefficient {
    /// CO₂ absorbed per m² of planted area per year (kg)
    pub co2_kg_m2_y: f64,
    /// Surface temperature reduction at full roof coverage (°C)
    pub temp_reduction_c_at_100: f64,
    /// Installation plus first-year maintenance cost per m² (KRW)
    pub cost_per_m2: f64,
    /// Added structural load per m² (kg)
    pub load_kg_per_m2: f64,
}

/// Immutable coefficient lookup, keyed by greening type.
///
/// Swapping coefficient sets means constructing a new catalog; optimizer and
/// evaluator instances keep the set they were built with, so concurrent
/// readers never observe a partially updated table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<GreeningType, GreeningCoefficient>",
    into = "BTreeMap<GreeningType, GreeningCoefficient>"
)]
pub struct CoefficientCatalog {
    coeffs: BTreeMap<GreeningType, GreeningCoefficient>,
}

impl CoefficientCatalog {
    /// Build a catalog from explicit coefficient rows.
    ///
    /// An empty map is rejected: every computation needs at least one type
    /// to enumerate.
    pub fn new(
        coeffs: BTreeMap<GreeningType, GreeningCoefficient>,
    ) -> Result<Self, EngineError> {
        if coeffs.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        Ok(Self { coeffs })
    }

    /// Look up the coefficients for a type, failing on unknown codes.
    pub fn coefficients_for(
        &self,
        type_code: GreeningType,
    ) -> Result<&GreeningCoefficient, EngineError> {
        self.coeffs
            .get(&type_code)
            .ok_or(EngineError::UnknownType(type_code))
    }

    /// All type codes in the catalog, in deterministic order.
    pub fn type_codes(&self) -> impl Iterator<Item = GreeningType> + '_ {
        self.coeffs.keys().copied()
    }

    /// Iterate `(type, coefficients)` pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (GreeningType, &GreeningCoefficient)> + Clone {
        self.coeffs.iter().map(|(t, c)| (*t, c))
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl Default for CoefficientCatalog {
    /// Reference coefficient set for the four macro types.
    fn default() -> Self {
        let mut coeffs = BTreeMap::new();
        coeffs.insert(
            GreeningType::Grass,
            GreeningCoefficient {
                co2_kg_m2_y: 0.5,
                temp_reduction_c_at_100: 2.0,
                cost_per_m2: 48_000.0,
                load_kg_per_m2: 120.0,
            },
        );
        coeffs.insert(
            GreeningType::Sedum,
            GreeningCoefficient {
                co2_kg_m2_y: 1.0,
                temp_reduction_c_at_100: 2.1,
                cost_per_m2: 52_000.0,
                load_kg_per_m2: 95.0,
            },
        );
        coeffs.insert(
            GreeningType::Shrub,
            GreeningCoefficient {
                co2_kg_m2_y: 3.0,
                temp_reduction_c_at_100: 3.0,
                cost_per_m2: 110_000.0,
                load_kg_per_m2: 210.0,
            },
        );
        coeffs.insert(
            GreeningType::Tree,
            GreeningCoefficient {
                co2_kg_m2_y: 4.0,
                temp_reduction_c_at_100: 5.0,
                cost_per_m2: 185_000.0,
                load_kg_per_m2: 350.0,
            },
        );
        Self { coeffs }
    }
}

impl TryFrom<BTreeMap<GreeningType, GreeningCoefficient>> for CoefficientCatalog {
    type Error = EngineError;

    fn try_from(
        coeffs: BTreeMap<GreeningType, GreeningCoefficient>,
    ) -> Result<Self, Self::Error> {
        Self::new(coeffs)
    }
}

impl From<CoefficientCatalog> for BTreeMap<GreeningType, GreeningCoefficient> {
    fn from(catalog: CoefficientCatalog) -> Self {
        catalog.coeffs
    }
}
