//! Project record model.
//!
//! # Invariants
//! - `id` is unique within one project list (checked by `SiteConfig::validate`).
//! - `category` is serialized as `type` to match the page's `data-type` key.

use serde::{Deserialize, Serialize};

/// Identifier of one project within a list.
pub type ProjectId = u32;

/// One project shown as a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    /// Untrusted display text; escaped before it reaches markup.
    pub title: String,
    /// Open-ended category tag, e.g. `reforestation`.
    #[serde(rename = "type")]
    pub category: String,
    pub location: String,
    /// Estimated tCO₂e offset.
    pub co2: u64,
    pub status: String,
}

impl ProjectRecord {
    pub fn new(
        id: ProjectId,
        title: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
        co2: u64,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            location: location.into(),
            co2,
            status: status.into(),
        }
    }
}

/// Built-in demo projects shown until a real data source exists.
pub fn sample_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord::new(
            1,
            "Coastal Mangrove Restoration",
            "reforestation",
            "Kenya",
            12_000,
            "Active",
        ),
        ProjectRecord::new(
            2,
            "Rooftop Solar Microgrid",
            "renewable",
            "Ghana",
            8_000,
            "Pipeline",
        ),
        ProjectRecord::new(
            3,
            "Cookstove Efficiency Program",
            "avoidance",
            "Nepal",
            4_000,
            "Active",
        ),
        ProjectRecord::new(
            4,
            "Savanna Rewilding",
            "reforestation",
            "Tanzania",
            15_000,
            "Active",
        ),
    ]
}
