//! Cities and the derived per-city statistics that follow the owner's age.

use serde::{Deserialize, Serialize};

use crate::simulation::AgeState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub production: f32,
    pub culture: f32,
    pub stability: f32,
    /// Number of recalculations, for observers tracking refreshes.
    pub revision: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub base_production: f32,
    pub base_culture: f32,
    /// Flat production granted by triggered effects.
    pub bonus_production: f32,
    pub stats: CityStats,
}

impl City {
    pub fn new(name: impl Into<String>, base_production: f32, base_culture: f32) -> Self {
        let mut city = Self {
            name: name.into(),
            base_production,
            base_culture,
            bonus_production: 0.0,
            stats: CityStats::default(),
        };
        city.update(AgeState::Neutral, 50.0);
        city
    }

    /// Recomputes derived stats for the owner's current age and stability.
    pub fn update(&mut self, age: AgeState, civ_stability: f32) {
        let (production_factor, culture_factor, stability_shift) = match age {
            AgeState::Golden => (1.25, 1.5, 10.0),
            AgeState::Dark => (0.75, 0.75, -15.0),
            AgeState::Neutral => (1.0, 1.0, 0.0),
        };
        self.stats.production =
            ((self.base_production + self.bonus_production) * production_factor).max(0.0);
        self.stats.culture = (self.base_culture * culture_factor).max(0.0);
        self.stats.stability = (civ_stability + stability_shift).clamp(0.0, 100.0);
        self.stats.revision = self.stats.revision.wrapping_add(1);
    }
}
