//! Happiness-driven Golden Age / Dark Age cycle for one civilization.
//!
//! The manager only holds counters. Everything it needs from the owning
//! civilization (city count, game speed, ruleset modifiers) and everything it
//! tells the civilization (notifications, alerts, triggered effects, city
//! refreshes) goes through an [`AgeContext`] passed into each call.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simulation::{AgeAlert, AlertKind, Notification, NotificationCategory, TriggerCategory};

/// Base length of an age before modifiers.
pub const DEFAULT_AGE_TURNS: i32 = 10;

const GOLDEN_AGE_BASE_COST: i32 = 500;
const GOLDEN_AGE_COST_STEP: i32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeState {
    Neutral,
    Golden,
    Dark,
}

/// Read-only view of the owning civilization.
pub trait AgeInputs {
    fn owner_name(&self) -> &str;
    fn turn(&self) -> u64;
    fn city_count(&self) -> i32;
    fn speed_modifier(&self) -> f64;
    fn golden_age_length_speed_modifier(&self) -> f64;
    /// Active "Golden Age length" percentages, in declaration order.
    fn golden_age_length_modifiers(&self) -> Vec<f64>;

    /// Base length of an age entered through happiness thresholds.
    fn base_age_turns(&self) -> i32 {
        DEFAULT_AGE_TURNS
    }
}

/// Side effects an age transition has on the owning civilization.
pub trait AgeContext: AgeInputs {
    fn trigger_effects(&mut self, category: TriggerCategory);
    fn notify(&mut self, notification: Notification);
    fn push_alert(&mut self, alert: AgeAlert);
    fn update_city_stats(&mut self, age: AgeState);
    fn age_ended(&mut self, age: AgeState);
}

/// `(100 + value) / 100`, the multiplier for a percentage bonus.
fn as_percent(value: f64) -> f64 {
    (100.0 + value) / 100.0
}

fn age_length(inputs: &impl AgeInputs, base_turns: i32) -> i32 {
    let mut turns = f64::from(base_turns);
    for percent in inputs.golden_age_length_modifiers() {
        turns *= as_percent(percent);
    }
    turns *= inputs.golden_age_length_speed_modifier();
    turns.floor() as i32
}

/// Persisted age state of a civilization. `Clone` is the snapshot copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeManager {
    pub stored_happiness: i32,
    pub number_of_golden_ages: i32,
    pub turns_left_for_current_golden_age: i32,
    pub number_of_dark_ages: i32,
    pub turns_left_for_current_dark_age: i32,
}

impl AgeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_golden_age(&self) -> bool {
        self.turns_left_for_current_golden_age > 0
    }

    pub fn is_dark_age(&self) -> bool {
        self.turns_left_for_current_dark_age > 0
    }

    pub fn state(&self) -> AgeState {
        if self.is_golden_age() {
            AgeState::Golden
        } else if self.is_dark_age() {
            AgeState::Dark
        } else {
            AgeState::Neutral
        }
    }

    pub fn add_happiness(&mut self, amount: i32) {
        self.stored_happiness = self.stored_happiness.saturating_add(amount);
    }

    pub fn happiness_required_for_next_golden_age(&self, inputs: &impl AgeInputs) -> i32 {
        let mut cost = f64::from(GOLDEN_AGE_BASE_COST)
            + f64::from(self.number_of_golden_ages) * f64::from(GOLDEN_AGE_COST_STEP);
        cost *= as_percent(f64::from(inputs.city_count()));
        cost *= inputs.speed_modifier();
        // Every past Dark Age makes the next Golden Age cheaper.
        cost /= as_percent(f64::from(self.number_of_dark_ages) * 100.0) * 1.33 - 0.33;
        cost.floor() as i32
    }

    pub fn happiness_required_for_next_dark_age(&self, inputs: &impl AgeInputs) -> i32 {
        self.happiness_required_for_next_golden_age(inputs) / 2
    }

    pub fn calculate_golden_age_length(&self, inputs: &impl AgeInputs, base_turns: i32) -> i32 {
        age_length(inputs, base_turns)
    }

    /// Dark Ages share the Golden Age length modifiers and speed factor.
    pub fn calculate_dark_age_length(&self, inputs: &impl AgeInputs, base_turns: i32) -> i32 {
        age_length(inputs, base_turns)
    }

    /// Starts (or extends) a Dark Age. The historical count is left to the caller.
    pub fn enter_dark_age<C: AgeContext>(&mut self, ctx: &mut C, base_turns: i32) {
        self.turns_left_for_current_golden_age = 0;

        let turns = self.calculate_dark_age_length(&*ctx, base_turns);
        self.turns_left_for_current_dark_age =
            self.turns_left_for_current_dark_age.saturating_add(turns.max(0));
        info!(
            nation = ctx.owner_name(),
            turn = ctx.turn(),
            turns,
            "entered dark age"
        );

        ctx.notify(Notification::new(
            "Your civilization has descended into a Dark Age",
            Some("Tutorial/Golden Age"),
            NotificationCategory::General,
            "StatIcons/Malcontent",
        ));
        ctx.push_alert(AgeAlert::new(AlertKind::DarkAge));
    }

    /// Starts (or extends) a Golden Age. The historical count is left to the caller.
    pub fn enter_golden_age<C: AgeContext>(&mut self, ctx: &mut C, base_turns: i32) {
        self.turns_left_for_current_dark_age = 0;

        let turns = self.calculate_golden_age_length(&*ctx, base_turns);
        self.turns_left_for_current_golden_age = self
            .turns_left_for_current_golden_age
            .saturating_add(turns.max(0));
        info!(
            nation = ctx.owner_name(),
            turn = ctx.turn(),
            turns,
            "entered golden age"
        );

        ctx.notify(Notification::new(
            "You have entered a Golden Age!",
            Some("Tutorial/Golden Age"),
            NotificationCategory::General,
            "StatIcons/Happiness",
        ));
        ctx.push_alert(AgeAlert::new(AlertKind::GoldenAge));
        ctx.trigger_effects(TriggerCategory::UponEnteringGoldenAge);

        // May happen mid-turn through effects, so cities cannot wait for the turn boundary.
        ctx.update_city_stats(self.state());
    }

    pub fn end_turn<C: AgeContext>(&mut self, ctx: &mut C, happiness: i32) {
        if !self.is_golden_age() && !self.is_dark_age() {
            self.add_happiness(happiness);
        }

        if self.is_dark_age() {
            self.turns_left_for_current_dark_age -= 1;
            if self.turns_left_for_current_dark_age <= 0 {
                info!(nation = ctx.owner_name(), turn = ctx.turn(), "dark age ended");
                ctx.age_ended(AgeState::Dark);
            }
        } else if self.stored_happiness < -self.happiness_required_for_next_dark_age(&*ctx) {
            self.stored_happiness = 0;
            let base_turns = ctx.base_age_turns();
            self.enter_dark_age(ctx, base_turns);
            self.number_of_dark_ages += 1;
        }

        // Re-checked: a Dark Age entered above has already cleared the Golden Age.
        if self.is_golden_age() {
            self.turns_left_for_current_golden_age -= 1;
            if self.turns_left_for_current_golden_age <= 0 {
                info!(nation = ctx.owner_name(), turn = ctx.turn(), "golden age ended");
                ctx.age_ended(AgeState::Golden);
                ctx.trigger_effects(TriggerCategory::UponEndingGoldenAge);
            }
        } else {
            let cost = self.happiness_required_for_next_golden_age(&*ctx);
            if self.stored_happiness > cost {
                self.stored_happiness = self.stored_happiness.saturating_sub(cost);
                let base_turns = ctx.base_age_turns();
                self.enter_golden_age(ctx, base_turns);
                self.number_of_golden_ages += 1;
            }
        }
    }
}
