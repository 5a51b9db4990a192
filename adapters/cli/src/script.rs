//! Scripted player input for headless runs.

use anyhow::{bail, Result};
use tank_battle_core::{Direction, PlayerIntent};

/// Repeating sequence of per-tick player intents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Script {
    intents: Vec<PlayerIntent>,
}

impl Script {
    /// Parses one intent per character.
    ///
    /// `U`, `D`, `L` and `R` move, `F` fires, `W` cycles the weapon and `.`
    /// idles. Whitespace is ignored and letters are case-insensitive.
    pub(crate) fn parse(source: &str) -> Result<Self> {
        let mut intents = Vec::new();
        for (position, symbol) in source.chars().enumerate() {
            let intent = match symbol.to_ascii_uppercase() {
                'U' => PlayerIntent::moving(Direction::Up),
                'D' => PlayerIntent::moving(Direction::Down),
                'L' => PlayerIntent::moving(Direction::Left),
                'R' => PlayerIntent::moving(Direction::Right),
                'F' => PlayerIntent::firing(),
                'W' => PlayerIntent {
                    cycle_weapon: true,
                    ..PlayerIntent::default()
                },
                '.' => PlayerIntent::default(),
                c if c.is_whitespace() => continue,
                other => bail!("unknown script symbol {other:?} at position {position}"),
            };
            intents.push(intent);
        }
        Ok(Self { intents })
    }

    /// Intent for tick `frame`; an empty script always idles.
    pub(crate) fn intent(&self, frame: u64) -> PlayerIntent {
        if self.intents.is_empty() {
            return PlayerIntent::default();
        }
        let length = self.intents.len() as u64;
        self.intents[(frame % length) as usize]
    }
}
