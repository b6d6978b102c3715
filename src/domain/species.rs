//! Per-species CO₂ refinements for the v3.4 coefficient set.
//!
//! Sedum and shrub species refine the area-based macro coefficient; tree
//! species are quantified per trunk instead of per m².

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::GreeningType;

/// Reference pine absorption (kg/tree/yr), also the unit of the
/// tree-equivalent conversion shown in reports.
pub const PINE_CO2_KG_PER_TREE_Y: f64 = 6.6;

/// Area-based species entry (grass, sedum, shrub).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesInfo {
    pub name_ko: &'static str,
    pub co2_kg_m2_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeCategory {
    /// 낙엽 활엽
    Deciduous,
    /// 상록 침엽
    Evergreen,
}

/// Count-based species entry (trees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSpeciesInfo {
    pub name_ko: &'static str,
    pub co2_kg_per_tree_y: f64,
    pub category: TreeCategory,
}

static GRASS_SPECIES: Lazy<BTreeMap<&'static str, SpeciesInfo>> = Lazy::new(|| {
    BTreeMap::from([(
        "default",
        SpeciesInfo {
            name_ko: "잔디",
            co2_kg_m2_y: 0.4,
        },
    )])
});

static SEDUM_SPECIES: Lazy<BTreeMap<&'static str, SpeciesInfo>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "kamtschaticum",
            SpeciesInfo {
                name_ko: "기린초",
                co2_kg_m2_y: 0.89,
            },
        ),
        (
            "album",
            SpeciesInfo {
                name_ko: "흰세덤",
                co2_kg_m2_y: 0.77,
            },
        ),
        (
            "spurium",
            SpeciesInfo {
                name_ko: "둥근잎꿩의비름",
                co2_kg_m2_y: 0.72,
            },
        ),
        (
            "acre",
            SpeciesInfo {
                name_ko: "돌나물",
                co2_kg_m2_y: 0.37,
            },
        ),
    ])
});

static SHRUB_SPECIES: Lazy<BTreeMap<&'static str, SpeciesInfo>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "jopap",
            SpeciesInfo {
                name_ko: "조팝나무",
                co2_kg_m2_y: 0.56,
            },
        ),
        (
            "hwasal",
            SpeciesInfo {
                name_ko: "화살나무",
                co2_kg_m2_y: 0.54,
            },
        ),
        (
            "sachul",
            SpeciesInfo {
                name_ko: "사철나무",
                co2_kg_m2_y: 0.49,
            },
        ),
        (
            "hoiyang",
            SpeciesInfo {
                name_ko: "회양목",
                co2_kg_m2_y: 0.45,
            },
        ),
        (
            "sancheol",
            SpeciesInfo {
                name_ko: "산철쭉",
                co2_kg_m2_y: 0.34,
            },
        ),
    ])
});

static TREE_SPECIES: Lazy<BTreeMap<&'static str, TreeSpeciesInfo>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "bokjagi",
            TreeSpeciesInfo {
                name_ko: "복자기",
                co2_kg_per_tree_y: 13.8,
                category: TreeCategory::Deciduous,
            },
        ),
        (
            "magamok",
            TreeSpeciesInfo {
                name_ko: "마가목",
                co2_kg_per_tree_y: 11.4,
                category: TreeCategory::Deciduous,
            },
        ),
        (
            "kkochsagwa",
            TreeSpeciesInfo {
                name_ko: "꽃사과",
                co2_kg_per_tree_y: 9.2,
                category: TreeCategory::Deciduous,
            },
        ),
        (
            "sonamu",
            TreeSpeciesInfo {
                name_ko: "소나무",
                co2_kg_per_tree_y: 6.6,
                category: TreeCategory::Evergreen,
            },
        ),
        (
            "seomjatnamu",
            TreeSpeciesInfo {
                name_ko: "섬잣",
                co2_kg_per_tree_y: 5.5,
                category: TreeCategory::Evergreen,
            },
        ),
        (
            "jumok",
            TreeSpeciesInfo {
                name_ko: "주목",
                co2_kg_per_tree_y: 5.2,
                category: TreeCategory::Evergreen,
            },
        ),
    ])
});

/// Area-based species entry for a macro type, if the key is known.
pub fn area_species(type_code: GreeningType, key: &str) -> Option<&'static SpeciesInfo> {
    let table = match type_code {
        GreeningType::Grass => &GRASS_SPECIES,
        GreeningType::Sedum => &SEDUM_SPECIES,
        GreeningType::Shrub => &SHRUB_SPECIES,
        GreeningType::Tree => return None,
    };
    table.get(key)
}

/// Count-based tree species entry, if the key is known.
pub fn tree_species(key: &str) -> Option<&'static TreeSpeciesInfo> {
    TREE_SPECIES.get(key)
}
