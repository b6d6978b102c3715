//! # Greenroof Engine
//!
//! Estimates the environmental benefit of rooftop greening (CO₂ absorption,
//! surface temperature reduction, HVAC energy savings) and recommends a
//! cost-minimal combination of greening types meeting a target effect.
//!
//! The crate is a pure computational core with no file, network or CLI
//! surface: a presentation layer supplies a roof area and a target, and the
//! [`optimizer::CoverageOptimizer`] returns a
//! [`optimizer::CoverageProposal`] ready for rendering. Geocoding, building
//! lookup and report generation live in downstream services.
//!
//! ```
//! use greenroof_engine::{
//!     CoefficientCatalog, CoverageOptimizer, EffectTarget,
//! };
//!
//! let optimizer = CoverageOptimizer::new(CoefficientCatalog::default());
//! let proposal = optimizer
//!     .optimize(100.0, EffectTarget::Co2KgPerYear(100.0))
//!     .expect("positive area and target");
//! assert!(proposal.feasible);
//! println!("{}", proposal.combination_label());
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod scenario;
pub mod telemetry;

pub use config::{Config, EngineConfig};
pub use domain::{CoefficientCatalog, GreeningCoefficient, GreeningType};
pub use error::EngineError;
pub use optimizer::{
    CoverageAllocation, CoverageOptimizer, CoverageProposal, EffectKind, EffectTarget,
};
pub use scenario::{ScenarioEvaluator, ScenarioInput, SimulationResult};
