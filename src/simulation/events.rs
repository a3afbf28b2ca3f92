//! Notifications, popup alerts and the bounded world event log they land in.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{AgeState, Nation, TriggerCategory, TriggeredEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    General,
}

/// A message addressed to a civilization's notification tray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    /// Civilopedia-style link opened when the notification is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub category: NotificationCategory,
    pub icon: String,
}

impl Notification {
    pub fn new(
        text: impl Into<String>,
        action: Option<&str>,
        category: NotificationCategory,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            action: action.map(str::to_string),
            category,
            icon: icon.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    GoldenAge,
    DarkAge,
}

/// Popup queued for the owning player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeAlert {
    pub kind: AlertKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl AgeAlert {
    pub fn new(kind: AlertKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEventKind {
    Notification {
        nation: Nation,
        notification: Notification,
    },
    Alert {
        nation: Nation,
        alert: AgeAlert,
    },
    Triggered {
        nation: Nation,
        category: TriggerCategory,
        effect: TriggeredEffect,
    },
    AgeEnded {
        nation: Nation,
        age: AgeState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldEvent {
    pub turn: u64,
    pub kind: WorldEventKind,
}

impl WorldEvent {
    pub fn notification(turn: u64, nation: Nation, notification: Notification) -> Self {
        Self {
            turn,
            kind: WorldEventKind::Notification {
                nation,
                notification,
            },
        }
    }

    pub fn alert(turn: u64, nation: Nation, alert: AgeAlert) -> Self {
        Self {
            turn,
            kind: WorldEventKind::Alert { nation, alert },
        }
    }

    pub fn triggered(
        turn: u64,
        nation: Nation,
        category: TriggerCategory,
        effect: TriggeredEffect,
    ) -> Self {
        Self {
            turn,
            kind: WorldEventKind::Triggered {
                nation,
                category,
                effect,
            },
        }
    }

    pub fn age_ended(turn: u64, nation: Nation, age: AgeState) -> Self {
        Self {
            turn,
            kind: WorldEventKind::AgeEnded { nation, age },
        }
    }

    pub fn nation(&self) -> Nation {
        match &self.kind {
            WorldEventKind::Notification { nation, .. }
            | WorldEventKind::Alert { nation, .. }
            | WorldEventKind::Triggered { nation, .. }
            | WorldEventKind::AgeEnded { nation, .. } => *nation,
        }
    }

    pub fn category(&self) -> &'static str {
        match &self.kind {
            WorldEventKind::Notification { .. } => "Notice",
            WorldEventKind::Alert { .. } => "Alert",
            WorldEventKind::Triggered { .. } => "Effect",
            WorldEventKind::AgeEnded { .. } => "Ended",
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match &self.kind {
            WorldEventKind::Alert {
                alert: AgeAlert {
                    kind: AlertKind::GoldenAge,
                    ..
                },
                ..
            } => Sentiment::Positive,
            WorldEventKind::Alert { .. } => Sentiment::Negative,
            WorldEventKind::Triggered {
                category: TriggerCategory::UponEnteringGoldenAge,
                ..
            } => Sentiment::Positive,
            WorldEventKind::AgeEnded {
                age: AgeState::Golden,
                ..
            } => Sentiment::Negative,
            WorldEventKind::AgeEnded {
                age: AgeState::Dark,
                ..
            } => Sentiment::Positive,
            _ => Sentiment::Neutral,
        }
    }

    pub fn headline(&self) -> String {
        match &self.kind {
            WorldEventKind::Notification {
                nation,
                notification,
            } => format!("{}: {}", nation.name(), notification.text),
            WorldEventKind::Alert { nation, alert } => match alert.kind {
                AlertKind::GoldenAge => format!("{} celebrates a Golden Age", nation.name()),
                AlertKind::DarkAge => format!("{} falls into a Dark Age", nation.name()),
            },
            WorldEventKind::Triggered {
                nation,
                category,
                effect,
            } => format!(
                "{} | {} | {}",
                nation.name(),
                category.label(),
                effect.describe()
            ),
            WorldEventKind::AgeEnded { nation, age } => match age {
                AgeState::Golden => format!("{}'s Golden Age is over", nation.name()),
                AgeState::Dark => format!("{} emerges from its Dark Age", nation.name()),
                AgeState::Neutral => format!("{} returns to an ordinary age", nation.name()),
            },
        }
    }
}

#[derive(Debug, Resource)]
pub struct WorldEventLog {
    events: VecDeque<WorldEvent>,
    capacity: usize,
}

impl WorldEventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: WorldEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot(&self) -> Vec<WorldEvent> {
        self.events.iter().cloned().collect()
    }

    /// Events recorded on `turn`, oldest first.
    pub fn for_turn(&self, turn: u64) -> impl Iterator<Item = &WorldEvent> {
        self.events.iter().filter(move |event| event.turn == turn)
    }
}

impl Default for WorldEventLog {
    fn default() -> Self {
        Self::new(256)
    }
}
