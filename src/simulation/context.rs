//! Binds a nation's civ state, rules and the event log to the age manager's capabilities.

use tracing::debug;

use crate::simulation::{
    AgeAlert, AgeContext, AgeInputs, AgeState, GameSpeed, Nation, NationCivState, NationRules,
    Notification, TriggerCategory, WorldEvent, WorldEventLog,
};

/// Both bindings read the same fields; only mutability of the civ differs.
macro_rules! impl_civ_age_inputs {
    ($binding:ident) => {
        impl AgeInputs for $binding<'_> {
            fn owner_name(&self) -> &str {
                self.nation.name()
            }

            fn turn(&self) -> u64 {
                self.turn
            }

            fn city_count(&self) -> i32 {
                i32::try_from(self.civ.cities.len()).unwrap_or(i32::MAX)
            }

            fn speed_modifier(&self) -> f64 {
                self.speed.modifier()
            }

            fn golden_age_length_speed_modifier(&self) -> f64 {
                self.speed.golden_age_length_modifier()
            }

            fn golden_age_length_modifiers(&self) -> Vec<f64> {
                self.rules.golden_age_length_modifiers.clone()
            }

            fn base_age_turns(&self) -> i32 {
                self.base_age_turns
            }
        }
    };
}

/// Read-only inputs, used for thresholds in observer snapshots.
pub struct CivAgeView<'a> {
    pub nation: Nation,
    pub turn: u64,
    pub speed: GameSpeed,
    pub base_age_turns: i32,
    pub rules: &'a NationRules,
    pub civ: &'a NationCivState,
}

pub struct CivAgeContext<'a> {
    pub nation: Nation,
    pub turn: u64,
    pub speed: GameSpeed,
    pub base_age_turns: i32,
    pub rules: &'a NationRules,
    pub civ: &'a mut NationCivState,
    pub events: &'a mut WorldEventLog,
}

impl_civ_age_inputs!(CivAgeView);
impl_civ_age_inputs!(CivAgeContext);

impl AgeContext for CivAgeContext<'_> {
    fn trigger_effects(&mut self, category: TriggerCategory) {
        for effect in self.rules.triggered(category) {
            debug!(
                nation = self.nation.name(),
                turn = self.turn,
                effect = %effect.describe(),
                "{}",
                category.label()
            );
            self.civ.apply_effect(effect);
            self.events.push(WorldEvent::triggered(
                self.turn,
                self.nation,
                category,
                effect.clone(),
            ));
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.events
            .push(WorldEvent::notification(self.turn, self.nation, notification));
    }

    fn push_alert(&mut self, alert: AgeAlert) {
        self.events
            .push(WorldEvent::alert(self.turn, self.nation, alert));
    }

    fn update_city_stats(&mut self, age: AgeState) {
        self.civ.refresh_cities(age);
    }

    fn age_ended(&mut self, age: AgeState) {
        self.events
            .push(WorldEvent::age_ended(self.turn, self.nation, age));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{
        AgeManager, AlertKind, DEFAULT_AGE_TURNS, Ruleset, TriggerBinding, TriggeredEffect, WorldEventKind,
    };

    fn rules() -> NationRules {
        NationRules {
            golden_age_length_modifiers: vec![50.0],
            triggers: vec![
                TriggerBinding {
                    on: TriggerCategory::UponEnteringGoldenAge,
                    effect: TriggeredEffect::Production { amount: 1.0 },
                },
                TriggerBinding {
                    on: TriggerCategory::UponEndingGoldenAge,
                    effect: TriggeredEffect::DarkAge { turns: 3 },
                },
            ],
        }
    }

    #[test]
    fn golden_age_entry_reaches_civ_and_log() {
        let rules = rules();
        let mut civ = NationCivState::founded(Nation::Tera);
        let mut events = WorldEventLog::default();
        let mut manager = AgeManager::new();

        {
            let mut ctx = CivAgeContext {
                nation: Nation::Tera,
                turn: 7,
                speed: GameSpeed::Standard,
                base_age_turns: DEFAULT_AGE_TURNS,
                rules: &rules,
                civ: &mut civ,
                events: &mut events,
            };
            manager.enter_golden_age(&mut ctx, 10);
        }

        assert_eq!(manager.turns_left_for_current_golden_age, 15);
        assert_eq!(civ.cities[0].bonus_production, 1.0);
        // (6 + 1) * 1.25, refreshed right away
        assert_eq!(civ.cities[0].stats.production, 8.75);

        let kinds: Vec<&'static str> = events.for_turn(7).map(WorldEvent::category).collect();
        assert_eq!(kinds, vec!["Notice", "Alert", "Effect"]);
        assert!(events.snapshot().iter().any(|event| matches!(
            &event.kind,
            WorldEventKind::Alert { alert, .. } if alert.kind == AlertKind::GoldenAge
        )));
    }

    #[test]
    fn ending_trigger_queues_dark_age() {
        let rules = rules();
        let mut civ = NationCivState::founded(Nation::Luna);
        let mut events = WorldEventLog::default();
        let mut manager = AgeManager {
            turns_left_for_current_golden_age: 1,
            ..AgeManager::default()
        };

        let mut ctx = CivAgeContext {
            nation: Nation::Luna,
            turn: 3,
            speed: GameSpeed::Epic,
            base_age_turns: DEFAULT_AGE_TURNS,
            rules: &rules,
            civ: &mut civ,
            events: &mut events,
        };
        manager.end_turn(&mut ctx, 0);

        assert!(!manager.is_golden_age());
        let ended: Vec<_> = events
            .for_turn(3)
            .filter_map(|event| match &event.kind {
                WorldEventKind::AgeEnded { nation, age } => Some((*nation, *age)),
                _ => None,
            })
            .collect();
        assert_eq!(ended, vec![(Nation::Luna, AgeState::Golden)]);
        assert_eq!(
            civ.pending,
            vec![crate::simulation::PendingAgeAction::EnterDarkAge { turns: 3 }]
        );
    }

    #[test]
    fn view_reads_speed_and_cities() {
        let ruleset = Ruleset::default();
        let mut civ = NationCivState::founded(Nation::Sora);
        civ.found_city("Sora #2");
        let view = CivAgeView {
            nation: Nation::Sora,
            turn: 0,
            speed: GameSpeed::Epic,
            base_age_turns: 8,
            rules: ruleset.rules_for(Nation::Sora),
            civ: &civ,
        };
        let manager = AgeManager::new();
        // 500 * 1.02 * 1.5
        assert_eq!(manager.happiness_required_for_next_golden_age(&view), 765);
        assert_eq!(manager.calculate_golden_age_length(&view, 10), 12);
        assert_eq!(view.base_age_turns(), 8);
    }
}
