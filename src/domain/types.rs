use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Macro greening types available for rooftop planting.
///
/// Variant order fixes the catalog iteration order, which in turn fixes the
/// candidate enumeration order of the coverage optimizer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GreeningType {
    Grass,
    Sedum,
    Shrub,
    Tree,
}

impl GreeningType {
    /// Korean display label used in combination labels and reports.
    pub fn label_ko(&self) -> &'static str {
        match self {
            Self::Grass => "잔디",
            Self::Sedum => "세덤",
            Self::Shrub => "관목",
            Self::Tree => "나무",
        }
    }
}
