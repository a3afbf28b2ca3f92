//! Colorized per-turn age pulse for quick CLI scanning.

use bevy_ecs::prelude::*;
use colored::{Color, Colorize};
use tracing::info;

use crate::simulation::{
    AgeState, AllNationAges, AllNationCivState, CivAgeView, Ruleset, SimulationConfig, WorldEvent,
    WorldEventLog, WorldTime, age_color, age_label, format_signed, sentiment_color,
    sentiment_label,
};

fn badge(label: &str, color: Color) -> String {
    format!("[{}]", label).color(color).to_string()
}

fn category_color(category: &str) -> Color {
    match category {
        "Notice" => Color::BrightCyan,
        "Alert" => Color::BrightMagenta,
        "Effect" => Color::BrightGreen,
        "Ended" => Color::BrightYellow,
        _ => Color::White,
    }
}

fn format_event_line(event: &WorldEvent) -> String {
    let nation = event.nation();
    format!(
        "{} {} {} {}",
        badge(event.category(), category_color(event.category())),
        badge(
            sentiment_label(event.sentiment()),
            sentiment_color(event.sentiment())
        ),
        badge(nation.name(), nation.logging_color()),
        event.headline()
    )
}

pub fn logging_system(
    time: Res<WorldTime>,
    config: Res<SimulationConfig>,
    ruleset: Res<Ruleset>,
    ages: Res<AllNationAges>,
    civ_state: Res<AllNationCivState>,
    events: Res<WorldEventLog>,
) {
    let mut lines = vec![format!(
        "{} {}",
        badge("Ages", Color::BrightWhite),
        badge(&format!("Turn {}", time.turn), Color::BrightBlack),
    )];

    let mut nations: Vec<_> = ages.0.iter().collect();
    nations.sort_by_key(|(nation, _)| **nation);

    for (nation, manager) in nations {
        let Some(civ) = civ_state.0.get(nation) else {
            continue;
        };
        let view = CivAgeView {
            nation: *nation,
            turn: time.turn,
            speed: config.speed,
            base_age_turns: config.base_age_turns,
            rules: ruleset.rules_for(*nation),
            civ,
        };
        let age = manager.state();
        let age_badge = match age {
            AgeState::Golden => badge(
                &format!(
                    "{} {}",
                    age_label(age),
                    manager.turns_left_for_current_golden_age
                ),
                age_color(age),
            ),
            AgeState::Dark => badge(
                &format!(
                    "{} {}",
                    age_label(age),
                    manager.turns_left_for_current_dark_age
                ),
                age_color(age),
            ),
            AgeState::Neutral => badge(age_label(age), age_color(age)),
        };

        lines.push(format!(
            "{} {} banked {} / {} (dark below -{}) | {}/turn | {} cities",
            badge(nation.name(), nation.logging_color()),
            age_badge,
            format_signed(i64::from(manager.stored_happiness)),
            manager.happiness_required_for_next_golden_age(&view),
            manager.happiness_required_for_next_dark_age(&view),
            format_signed(i64::from(civ.happiness)),
            civ.cities.len(),
        ));
    }

    lines.extend(events.for_turn(time.turn).map(format_event_line));

    info!("\n{}", lines.join("\n"));
}
