use bevy_ecs::prelude::*;

use crate::simulation::{
    AgeContext, AllNationAges, AllNationCivState, CivAgeContext, Ruleset, SimulationConfig,
    WorldEventLog, WorldTime,
};

/// Runs the age state machine once per nation, then refreshes cities for the resulting age.
pub fn age_system(
    mut ages: ResMut<AllNationAges>,
    mut civ_state: ResMut<AllNationCivState>,
    mut events: ResMut<WorldEventLog>,
    ruleset: Res<Ruleset>,
    config: Res<SimulationConfig>,
    time: Res<WorldTime>,
) {
    for (nation, manager) in ages.0.iter_mut() {
        let Some(civ) = civ_state.0.get_mut(nation) else {
            continue;
        };
        let happiness = civ.happiness;

        let mut ctx = CivAgeContext {
            nation: *nation,
            turn: time.turn,
            speed: config.speed,
            base_age_turns: config.base_age_turns,
            rules: ruleset.rules_for(*nation),
            civ,
            events: &mut *events,
        };
        manager.end_turn(&mut ctx, happiness);
        ctx.update_city_stats(manager.state());
    }
}
