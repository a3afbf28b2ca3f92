//! Display labels and color semantics for age output.

use colored::Color;

use crate::simulation::{AgeState, Sentiment};

pub fn age_label(age: AgeState) -> &'static str {
    match age {
        AgeState::Neutral => "Steady",
        AgeState::Golden => "Golden Age",
        AgeState::Dark => "Dark Age",
    }
}

pub fn age_color(age: AgeState) -> Color {
    match age {
        AgeState::Neutral => Color::BrightBlack,
        AgeState::Golden => Color::BrightYellow,
        AgeState::Dark => Color::Magenta,
    }
}

pub fn sentiment_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Positive",
        Sentiment::Neutral => "Neutral",
        Sentiment::Negative => "Negative",
    }
}

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::BrightGreen,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::BrightRed,
    }
}

pub fn format_number_commas(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

/// Comma-grouped with an explicit sign, e.g. `+1,250` or `-40`.
pub fn format_signed(n: i64) -> String {
    let sign = if n < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_number_commas(n.unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number_commas(0), "0");
        assert_eq!(format_number_commas(999), "999");
        assert_eq!(format_number_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn signed_values_keep_their_sign() {
        assert_eq!(format_signed(1250), "+1,250");
        assert_eq!(format_signed(-40), "-40");
        assert_eq!(format_signed(0), "+0");
    }
}
