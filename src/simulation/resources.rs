//! Shared resources and world-level data structures.

use std::collections::HashMap;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{
    AgeManager, AgeState, City, DEFAULT_AGE_TURNS, GameSpeed, Nation, TriggeredEffect,
};

/// Age changes requested by triggered effects, applied at the start of the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAgeAction {
    BankHappiness { amount: i32 },
    EnterGoldenAge { turns: i32 },
    EnterDarkAge { turns: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationCivState {
    pub cities: Vec<City>,
    /// Baseline happiness before per-city unrest.
    pub amenities: i32,
    /// Net happiness produced this turn.
    pub happiness: i32,
    pub stability: f32,
    #[serde(default)]
    pub pending: Vec<PendingAgeAction>,
}

impl NationCivState {
    pub fn founded(nation: Nation) -> Self {
        Self {
            cities: vec![City::new(nation.capital(), 6.0, 3.0)],
            amenities: 24,
            happiness: 0,
            stability: 60.0,
            pending: Vec::new(),
        }
    }

    pub fn found_city(&mut self, name: impl Into<String>) {
        self.cities.push(City::new(name, 4.0, 2.0));
    }

    pub fn refresh_cities(&mut self, age: AgeState) {
        let stability = self.stability;
        for city in &mut self.cities {
            city.update(age, stability);
        }
    }

    pub fn production(&self) -> f32 {
        self.cities.iter().map(|city| city.stats.production).sum()
    }

    /// Applies a triggered effect. Effects on the age tally are deferred.
    pub fn apply_effect(&mut self, effect: &TriggeredEffect) {
        match effect {
            TriggeredEffect::Production { amount } => {
                for city in &mut self.cities {
                    city.bonus_production = (city.bonus_production + amount).max(0.0);
                }
            }
            TriggeredEffect::Stability { amount } => {
                self.stability = (self.stability + amount).clamp(0.0, 100.0);
            }
            TriggeredEffect::BankHappiness { amount } => {
                self.pending
                    .push(PendingAgeAction::BankHappiness { amount: *amount });
            }
            TriggeredEffect::GoldenAge { turns } => {
                self.pending
                    .push(PendingAgeAction::EnterGoldenAge { turns: *turns });
            }
            TriggeredEffect::DarkAge { turns } => {
                self.pending
                    .push(PendingAgeAction::EnterDarkAge { turns: *turns });
            }
        }
    }
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct AllNationCivState(pub HashMap<Nation, NationCivState>);

impl Default for AllNationCivState {
    fn default() -> Self {
        Self(
            Nation::ALL
                .iter()
                .map(|nation| (*nation, NationCivState::founded(*nation)))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct AllNationAges(pub HashMap<Nation, AgeManager>);

impl Default for AllNationAges {
    fn default() -> Self {
        Self(
            Nation::ALL
                .iter()
                .map(|nation| (*nation, AgeManager::new()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Resource)]
pub struct SimulationConfig {
    pub tick_duration: Duration,
    /// Stop after this many turns; `None` runs until shutdown.
    pub turn_limit: Option<u64>,
    pub seed: u64,
    pub speed: GameSpeed,
    /// Base length of ages entered by crossing a happiness threshold.
    pub base_age_turns: i32,
    pub max_cities: usize,
    pub event_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_duration: Duration::from_millis(250),
            turn_limit: Some(300),
            seed: 911,
            speed: GameSpeed::Standard,
            base_age_turns: DEFAULT_AGE_TURNS,
            max_cities: 12,
            event_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Default, Resource, Serialize, Deserialize)]
pub struct WorldTime {
    pub turn: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_effects_are_deferred() {
        let mut civ = NationCivState::founded(Nation::Solar);
        civ.apply_effect(&TriggeredEffect::BankHappiness { amount: 60 });
        civ.apply_effect(&TriggeredEffect::GoldenAge { turns: 5 });
        assert_eq!(
            civ.pending,
            vec![
                PendingAgeAction::BankHappiness { amount: 60 },
                PendingAgeAction::EnterGoldenAge { turns: 5 },
            ]
        );
    }

    #[test]
    fn production_effect_reaches_every_city() {
        let mut civ = NationCivState::founded(Nation::Aqua);
        civ.found_city("Aqua #2");
        civ.apply_effect(&TriggeredEffect::Production { amount: 2.0 });
        civ.refresh_cities(AgeState::Neutral);
        assert_eq!(civ.production(), 8.0 + 6.0);
    }

    #[test]
    fn stability_is_clamped() {
        let mut civ = NationCivState::founded(Nation::Luna);
        civ.apply_effect(&TriggeredEffect::Stability { amount: -500.0 });
        assert_eq!(civ.stability, 0.0);
    }

    #[test]
    fn every_nation_starts_neutral_with_a_capital() {
        let civ = AllNationCivState::default();
        let ages = AllNationAges::default();
        for nation in Nation::ALL {
            assert_eq!(civ.0[&nation].cities.len(), 1);
            assert_eq!(ages.0[&nation], AgeManager::new());
        }
    }
}
