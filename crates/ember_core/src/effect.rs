//! The six particle effects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A particle effect. Selects the kernel assets and the render decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Torch flame with a smoke layer.
    Fire,
    /// Short velocity streaks.
    Sparks,
    /// Falling numeric labels inside a box.
    Text,
    /// Vertical rain lines.
    Rain,
    /// Snow dots.
    Snow,
    /// Palette sparks with smoke and ash.
    Firework,
}

/// Effect used when none is named.
pub const DEFAULT_EFFECT: Effect = Effect::Fire;

impl Effect {
    /// All effects, in catalog order.
    pub const ALL: [Effect; 6] = [
        Effect::Fire,
        Effect::Sparks,
        Effect::Text,
        Effect::Rain,
        Effect::Snow,
        Effect::Firework,
    ];

    /// Lower-case name used in asset paths and job labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Effect::Fire => "fire",
            Effect::Sparks => "sparks",
            Effect::Text => "text",
            Effect::Rain => "rain",
            Effect::Snow => "snow",
            Effect::Firework => "firework",
        }
    }

    /// Comma-separated list of every effect name.
    #[must_use]
    pub fn available() -> String {
        Self::ALL.iter().map(|e| e.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| CoreError::UnknownEffect {
                name: s.to_owned(),
                available: Self::available(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_effects() {
        for effect in Effect::ALL {
            assert_eq!(effect.name().parse::<Effect>(), Ok(effect));
        }
    }

    #[test]
    fn test_unknown_effect_lists_alternatives() {
        let err = "plasma".parse::<Effect>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"plasma\""));
        assert!(message.contains("fire, sparks, text, rain, snow, firework"));
    }
}
