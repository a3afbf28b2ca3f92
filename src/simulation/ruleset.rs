//! Game speed presets and per-nation age rules (length modifiers, triggered effects).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::Nation;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GameSpeed {
    Quick,
    #[default]
    Standard,
    Epic,
    Marathon,
}

impl GameSpeed {
    /// General cost scaling applied to happiness thresholds.
    pub fn modifier(&self) -> f64 {
        match self {
            GameSpeed::Quick => 0.67,
            GameSpeed::Standard => 1.0,
            GameSpeed::Epic => 1.5,
            GameSpeed::Marathon => 3.0,
        }
    }

    pub fn golden_age_length_modifier(&self) -> f64 {
        match self {
            GameSpeed::Quick => 0.8,
            GameSpeed::Standard => 1.0,
            GameSpeed::Epic => 1.25,
            GameSpeed::Marathon => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    UponEnteringGoldenAge,
    UponEndingGoldenAge,
}

impl TriggerCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerCategory::UponEnteringGoldenAge => "upon entering a Golden Age",
            TriggerCategory::UponEndingGoldenAge => "upon ending a Golden Age",
        }
    }
}

/// Game effect executed when its trigger category fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggeredEffect {
    /// Flat production added to every city.
    Production { amount: f32 },
    Stability { amount: f32 },
    /// Happiness banked into the age tally on the next turn.
    BankHappiness { amount: i32 },
    GoldenAge { turns: i32 },
    DarkAge { turns: i32 },
}

impl TriggeredEffect {
    pub fn describe(&self) -> String {
        match self {
            TriggeredEffect::Production { amount } => format!("{amount:+.1} production per city"),
            TriggeredEffect::Stability { amount } => format!("{amount:+.1} stability"),
            TriggeredEffect::BankHappiness { amount } => format!("{amount:+} banked happiness"),
            TriggeredEffect::GoldenAge { turns } => format!("Golden Age for {turns} base turns"),
            TriggeredEffect::DarkAge { turns } => format!("Dark Age for {turns} base turns"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerBinding {
    pub on: TriggerCategory,
    pub effect: TriggeredEffect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NationRules {
    /// "Golden Age length" percentages, applied in declaration order.
    #[serde(default)]
    pub golden_age_length_modifiers: Vec<f64>,
    #[serde(default)]
    pub triggers: Vec<TriggerBinding>,
}

impl NationRules {
    pub fn triggered(&self, category: TriggerCategory) -> impl Iterator<Item = &TriggeredEffect> {
        self.triggers
            .iter()
            .filter(move |binding| binding.on == category)
            .map(|binding| &binding.effect)
    }
}

#[derive(Debug, Clone, PartialEq, Resource, Serialize, Deserialize)]
pub struct Ruleset {
    /// Rules for nations without their own entry.
    #[serde(default)]
    pub base: NationRules,
    #[serde(default)]
    pub nations: HashMap<Nation, NationRules>,
}

impl Ruleset {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read ruleset {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse ruleset {}", path.display()))
    }

    pub fn rules_for(&self, nation: Nation) -> &NationRules {
        self.nations.get(&nation).unwrap_or(&self.base)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        let base = NationRules {
            golden_age_length_modifiers: Vec::new(),
            triggers: vec![TriggerBinding {
                on: TriggerCategory::UponEnteringGoldenAge,
                effect: TriggeredEffect::Stability { amount: 5.0 },
            }],
        };

        let mut nations = HashMap::new();
        nations.insert(
            Nation::Tera,
            NationRules {
                golden_age_length_modifiers: vec![50.0],
                ..base.clone()
            },
        );
        nations.insert(
            Nation::Aqua,
            NationRules {
                golden_age_length_modifiers: Vec::new(),
                triggers: vec![TriggerBinding {
                    on: TriggerCategory::UponEnteringGoldenAge,
                    effect: TriggeredEffect::Production { amount: 2.0 },
                }],
            },
        );
        nations.insert(
            Nation::Solar,
            NationRules {
                golden_age_length_modifiers: vec![25.0],
                triggers: vec![TriggerBinding {
                    on: TriggerCategory::UponEndingGoldenAge,
                    effect: TriggeredEffect::BankHappiness { amount: 60 },
                }],
            },
        );
        nations.insert(
            Nation::Luna,
            NationRules {
                golden_age_length_modifiers: Vec::new(),
                triggers: vec![TriggerBinding {
                    on: TriggerCategory::UponEndingGoldenAge,
                    effect: TriggeredEffect::Stability { amount: -8.0 },
                }],
            },
        );

        Self { base, nations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_nation_falls_back_to_base_rules() {
        let ruleset = Ruleset {
            base: NationRules {
                golden_age_length_modifiers: vec![10.0],
                triggers: Vec::new(),
            },
            nations: HashMap::new(),
        };
        assert_eq!(
            ruleset.rules_for(Nation::Sora).golden_age_length_modifiers,
            vec![10.0]
        );
    }

    #[test]
    fn ruleset_parses_from_json() {
        let raw = r#"{
            "nations": {
                "Luna": {
                    "golden_age_length_modifiers": [50, -20],
                    "triggers": [
                        { "on": "upon_ending_golden_age", "effect": { "kind": "dark_age", "turns": 4 } }
                    ]
                }
            }
        }"#;
        let ruleset: Ruleset = serde_json::from_str(raw).unwrap();
        let luna = ruleset.rules_for(Nation::Luna);
        assert_eq!(luna.golden_age_length_modifiers, vec![50.0, -20.0]);
        let effects: Vec<_> = luna.triggered(TriggerCategory::UponEndingGoldenAge).collect();
        assert_eq!(effects, vec![&TriggeredEffect::DarkAge { turns: 4 }]);
        assert_eq!(luna.triggered(TriggerCategory::UponEnteringGoldenAge).count(), 0);
        assert!(ruleset.base.triggers.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Ruleset::load("/nonexistent/ruleset.json").unwrap_err();
        assert!(err.to_string().contains("failed to read ruleset"));
    }

    #[test]
    fn slower_speeds_scale_up() {
        assert!(GameSpeed::Quick.modifier() < GameSpeed::Standard.modifier());
        assert!(GameSpeed::Marathon.modifier() > GameSpeed::Epic.modifier());
        assert_eq!(GameSpeed::default(), GameSpeed::Standard);
    }
}
