use std::collections::BTreeMap;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::domain::{CoefficientCatalog, GreeningCoefficient, GreeningType};
use crate::error::EngineError;

/// Annual HVAC energy saved per degree of surface temperature reduction per
/// m² of roof (kWh/°C/m²/yr).
pub const DEFAULT_HVAC_SAVINGS_KWH_PER_DEG_M2: f64 = 1.5;

/// Typical un-greened rooftop surface temperature on a summer day (°C).
pub const DEFAULT_BASELINE_SURFACE_TEMP_C: f64 = 60.0;

/// Fraction of a gross roof area usable for greening once equipment,
/// walkways and setbacks are subtracted.
pub const DEFAULT_ROOF_AVAILABLE_RATE: f64 = 0.65;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    /// Coefficient rows overriding the built-in reference set. Empty means
    /// the reference catalog.
    pub catalog: BTreeMap<GreeningType, GreeningCoefficient>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub engine_version: String,
    pub coefficient_set_version: String,
    pub baseline_surface_temp_c: f64,
    pub roof_available_rate: f64,
    pub hvac_savings_kwh_per_deg_m2: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_version: "v3.4".to_string(),
            coefficient_set_version: "2025.01".to_string(),
            baseline_surface_temp_c: DEFAULT_BASELINE_SURFACE_TEMP_C,
            roof_available_rate: DEFAULT_ROOF_AVAILABLE_RATE,
            hvac_savings_kwh_per_deg_m2: DEFAULT_HVAC_SAVINGS_KWH_PER_DEG_M2,
        }
    }
}

impl EngineConfig {
    /// Greening-usable area of a gross roof area.
    pub fn usable_roof_area(&self, gross_area_m2: f64) -> f64 {
        gross_area_m2 * self.roof_available_rate
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            catalog: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("GREENROOF__").split("__"));
        Ok(figment.extract()?)
    }

    /// Materialize the configured coefficient catalog, falling back to the
    /// reference set when no rows were supplied.
    pub fn catalog(&self) -> Result<CoefficientCatalog, EngineError> {
        if self.catalog.is_empty() {
            return Ok(CoefficientCatalog::default());
        }
        CoefficientCatalog::new(self.catalog.clone())
    }
}
