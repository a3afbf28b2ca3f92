use bevy_ecs::prelude::*;

use crate::simulation::{
    AllNationAges, AllNationCivState, CivAgeContext, PendingAgeAction, Ruleset, SimulationConfig,
    WorldEventLog, WorldTime,
};

/// Applies age changes queued by last turn's triggered effects.
///
/// Forced entries go straight through `enter_*_age` and never touch the
/// historical age counts.
pub fn deferred_effects_system(
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
        if civ.pending.is_empty() {
            continue;
        }

        let pending = std::mem::take(&mut civ.pending);
        let mut ctx = CivAgeContext {
            nation: *nation,
            turn: time.turn,
            speed: config.speed,
            base_age_turns: config.base_age_turns,
            rules: ruleset.rules_for(*nation),
            civ,
            events: &mut *events,
        };
        for action in pending {
            match action {
                PendingAgeAction::BankHappiness { amount } => manager.add_happiness(amount),
                PendingAgeAction::EnterGoldenAge { turns } => {
                    manager.enter_golden_age(&mut ctx, turns)
                }
                PendingAgeAction::EnterDarkAge { turns } => manager.enter_dark_age(&mut ctx, turns),
            }
        }
    }
}
