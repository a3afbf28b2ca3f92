use colored::Color as ColoredColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nation {
    Tera,
    Sora,
    Aqua,
    Solar,
    Luna,
}

impl Nation {
    pub const ALL: [Nation; 5] = [
        Nation::Tera,
        Nation::Sora,
        Nation::Aqua,
        Nation::Solar,
        Nation::Luna,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Nation::Tera => "Tera",
            Nation::Sora => "Sora",
            Nation::Aqua => "Aqua",
            Nation::Solar => "Solar",
            Nation::Luna => "Luna",
        }
    }

    /// Name of the capital founded at game start.
    pub fn capital(&self) -> &'static str {
        match self {
            Nation::Tera => "Terahold",
            Nation::Sora => "Skyreach",
            Nation::Aqua => "Tidehaven",
            Nation::Solar => "Sunspire",
            Nation::Luna => "Moonwell",
        }
    }

    pub fn logging_color(&self) -> ColoredColor {
        match self {
            Nation::Tera => ColoredColor::Blue,
            Nation::Sora => ColoredColor::Red,
            Nation::Aqua => ColoredColor::Green,
            Nation::Solar => ColoredColor::Yellow,
            Nation::Luna => ColoredColor::White,
        }
    }
}
