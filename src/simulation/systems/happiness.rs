use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::simulation::{AllNationCivState, SimulationConfig, WorldTime};

/// Per-turn happiness production: amenities drift, cities bring unrest, rare shocks.
pub fn happiness_system(
    mut civ_state: ResMut<AllNationCivState>,
    config: Res<SimulationConfig>,
    time: Res<WorldTime>,
) {
    for (nation, civ) in civ_state.0.iter_mut() {
        // Seeded per nation so map iteration order does not matter.
        let mut rng = SmallRng::seed_from_u64(
            config.seed ^ time.turn.wrapping_mul(911) ^ ((*nation as u64) << 40),
        );

        civ.amenities = (civ.amenities + rng.gen_range(-3..=3)).clamp(-60, 90);

        let unrest = civ.cities.len() as i32 * 3;
        let instability = if civ.stability < 35.0 { 8 } else { 0 };
        let shock = if rng.gen_bool(0.05) {
            rng.gen_range(-120..=-40)
        } else {
            0
        };
        civ.happiness = civ.amenities - unrest - instability + shock + rng.gen_range(-15..=15);

        // Stability relaxes toward the middle.
        civ.stability += (50.0 - civ.stability) * 0.02;

        if civ.cities.len() < config.max_cities && rng.gen_bool(0.04) {
            let name = format!("{} {}", nation.name(), civ.cities.len() + 1);
            civ.found_city(name);
        }
    }
}
