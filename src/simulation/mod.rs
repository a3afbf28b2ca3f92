use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use tracing::info;

pub mod ages;
pub mod city;
pub mod context;
pub mod events;
pub mod localization;
pub mod nation;
pub mod observer;
pub mod persistence;
pub mod resources;
pub mod ruleset;
pub mod systems;

pub use ages::*;
pub use city::*;
pub use context::*;
pub use events::*;
pub use localization::*;
pub use nation::*;
pub use observer::*;
pub use persistence::*;
pub use resources::*;
pub use ruleset::*;
pub use systems::*;

/// Number of log events mirrored into the observer snapshot.
const OBSERVED_EVENTS: usize = 24;

pub struct SimulationWorld {
    world: World,
    schedule: Schedule,
    observer: Arc<RwLock<ObserverSnapshot>>,
}

impl SimulationWorld {
    pub fn new(config: SimulationConfig, ruleset: Ruleset) -> Self {
        Self::with_observer(
            config,
            ruleset,
            Arc::new(RwLock::new(ObserverSnapshot::default())),
        )
    }

    pub fn with_observer(
        config: SimulationConfig,
        ruleset: Ruleset,
        observer: Arc<RwLock<ObserverSnapshot>>,
    ) -> Self {
        let mut world = World::default();
        world.insert_resource(WorldEventLog::new(config.event_capacity));
        world.insert_resource(config);
        world.insert_resource(ruleset);
        world.insert_resource(AllNationCivState::default());
        world.insert_resource(AllNationAges::default());
        world.insert_resource(WorldTime::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                happiness_system,
                deferred_effects_system, // before end_turn so forced ages count down this turn
                age_system,
                logging_system,
            )
                .chain(),
        );

        let mut simulation = Self {
            world,
            schedule,
            observer,
        };
        simulation.refresh_observer_snapshot();
        simulation
    }

    pub fn tick(&mut self) {
        {
            let mut time = self.world.resource_mut::<WorldTime>();
            time.turn += 1;
        }

        self.schedule.run(&mut self.world);
        self.refresh_observer_snapshot();
    }

    pub fn turn(&self) -> u64 {
        self.world.resource::<WorldTime>().turn
    }

    pub fn config(&self) -> &SimulationConfig {
        self.world.resource::<SimulationConfig>()
    }

    /// True once the configured turn limit has been reached.
    pub fn finished(&self) -> bool {
        self.config()
            .turn_limit
            .is_some_and(|limit| self.turn() >= limit)
    }

    pub fn ages(&self) -> &AllNationAges {
        self.world.resource::<AllNationAges>()
    }

    pub fn civ_state(&self) -> &AllNationCivState {
        self.world.resource::<AllNationCivState>()
    }

    pub fn events(&self) -> &WorldEventLog {
        self.world.resource::<WorldEventLog>()
    }

    pub fn observer(&self) -> Arc<RwLock<ObserverSnapshot>> {
        self.observer.clone()
    }

    pub fn save(&self) -> SaveGame {
        SaveGame {
            version: SAVE_VERSION,
            turn: self.turn(),
            speed: self.config().speed,
            ages: self.ages().0.clone(),
            civ_state: self.civ_state().0.clone(),
        }
    }

    /// Replaces the age and civ state with a save. Nations missing from the save start fresh.
    pub fn restore(&mut self, save: SaveGame) {
        let mut ages = AllNationAges::default();
        ages.0.extend(save.ages);
        let mut civ_state = AllNationCivState::default();
        civ_state.0.extend(save.civ_state);

        self.world.insert_resource(ages);
        self.world.insert_resource(civ_state);
        self.world.resource_mut::<WorldTime>().turn = save.turn;
        self.world.resource_mut::<SimulationConfig>().speed = save.speed;
        info!(turn = save.turn, speed = ?save.speed, "restored save");

        self.refresh_observer_snapshot();
    }

    fn refresh_observer_snapshot(&mut self) {
        let turn = self.turn();
        let speed = self.config().speed;
        let base_age_turns = self.config().base_age_turns;
        let ruleset = self.world.resource::<Ruleset>();
        let civ_state = self.civ_state();

        let nations = self
            .ages()
            .0
            .iter()
            .filter_map(|(nation, manager)| {
                let civ = civ_state.0.get(nation)?;
                let view = CivAgeView {
                    nation: *nation,
                    turn,
                    speed,
                    base_age_turns,
                    rules: ruleset.rules_for(*nation),
                    civ,
                };
                Some((*nation, AgeSnapshot::capture(manager, &view)))
            })
            .collect::<BTreeMap<_, _>>();

        let recent_events = {
            let events = self.events().snapshot();
            let skip = events.len().saturating_sub(OBSERVED_EVENTS);
            events.into_iter().skip(skip).collect::<Vec<_>>()
        };

        if let Ok(mut snapshot) = self.observer.write() {
            snapshot.update(turn, nations, recent_events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            turn_limit: Some(5),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn tick_advances_turn_and_snapshot() {
        let mut simulation = SimulationWorld::new(quiet_config(), Ruleset::default());
        assert_eq!(simulation.turn(), 0);

        for _ in 0..5 {
            simulation.tick();
        }

        assert!(simulation.finished());
        let observer = simulation.observer();
        let snapshot = observer.read().unwrap();
        assert_eq!(snapshot.turn, 5);
        assert_eq!(snapshot.nations.len(), Nation::ALL.len());
    }

    #[test]
    fn pending_golden_age_does_not_count() {
        let mut simulation = SimulationWorld::new(quiet_config(), Ruleset::default());
        let mut save = simulation.save();
        if let Some(civ) = save.civ_state.get_mut(&Nation::Sora) {
            civ.pending
                .push(PendingAgeAction::EnterGoldenAge { turns: 10 });
        }
        simulation.restore(save);

        simulation.tick();

        let sora = &simulation.ages().0[&Nation::Sora];
        assert!(sora.is_golden_age());
        // Entered and counted down once within the same turn.
        assert_eq!(sora.turns_left_for_current_golden_age, 9);
        assert_eq!(sora.number_of_golden_ages, 0);
        assert!(simulation.civ_state().0[&Nation::Sora].pending.is_empty());
    }

    #[test]
    fn configured_age_turns_drive_threshold_entries() {
        let config = SimulationConfig {
            base_age_turns: 4,
            ..quiet_config()
        };
        let mut simulation = SimulationWorld::new(config, Ruleset::default());
        let mut save = simulation.save();
        if let Some(manager) = save.ages.get_mut(&Nation::Sora) {
            manager.stored_happiness = 100_000;
        }
        simulation.restore(save);

        simulation.tick();
        let sora = &simulation.ages().0[&Nation::Sora];
        assert_eq!(sora.turns_left_for_current_golden_age, 4);
        assert_eq!(sora.number_of_golden_ages, 1);

        for _ in 0..4 {
            simulation.tick();
        }
        assert!(!simulation.ages().0[&Nation::Sora].is_golden_age());
        assert!(simulation.events().for_turn(5).any(|event| matches!(
            &event.kind,
            WorldEventKind::AgeEnded {
                nation: Nation::Sora,
                age: AgeState::Golden,
            }
        )));
    }
}
