//! Observer-facing snapshot of every nation's age state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::simulation::{AgeManager, AgeState, CivAgeView, Nation, WorldEvent};

#[derive(Debug, Clone, Serialize)]
pub struct AgeSnapshot {
    pub age: AgeState,
    pub stored_happiness: i32,
    pub turns_left_golden: i32,
    pub turns_left_dark: i32,
    pub golden_ages: i32,
    pub dark_ages: i32,
    pub next_golden_threshold: i32,
    pub next_dark_threshold: i32,
    pub happiness_per_turn: i32,
    pub cities: usize,
    pub production: f32,
}

impl AgeSnapshot {
    pub fn capture(manager: &AgeManager, view: &CivAgeView<'_>) -> Self {
        Self {
            age: manager.state(),
            stored_happiness: manager.stored_happiness,
            turns_left_golden: manager.turns_left_for_current_golden_age,
            turns_left_dark: manager.turns_left_for_current_dark_age,
            golden_ages: manager.number_of_golden_ages,
            dark_ages: manager.number_of_dark_ages,
            next_golden_threshold: manager.happiness_required_for_next_golden_age(view),
            next_dark_threshold: manager.happiness_required_for_next_dark_age(view),
            happiness_per_turn: view.civ.happiness,
            cities: view.civ.cities.len(),
            production: view.civ.production(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObserverSnapshot {
    pub turn: u64,
    pub nations: BTreeMap<Nation, AgeSnapshot>,
    pub recent_events: Vec<WorldEvent>,
}

impl ObserverSnapshot {
    pub fn update(
        &mut self,
        turn: u64,
        nations: BTreeMap<Nation, AgeSnapshot>,
        recent_events: Vec<WorldEvent>,
    ) {
        self.turn = turn;
        self.nations = nations;
        self.recent_events = recent_events;
    }

    pub fn in_golden_age(&self) -> impl Iterator<Item = Nation> + '_ {
        self.nations
            .iter()
            .filter(|(_, snapshot)| snapshot.age == AgeState::Golden)
            .map(|(nation, _)| *nation)
    }
}
