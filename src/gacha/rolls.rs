//! Randomness sources for the draw engine.

use rand::Rng;

/// Produces uniform samples in `[0, 1)`.
///
/// Every [`rand::Rng`] is a roll source. [`FixedRolls`] replays a scripted
/// sequence so callers can force specific outcomes.
pub trait RollSource {
    fn roll(&mut self) -> f64;
}

impl<R: Rng> RollSource for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of rolls, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl FixedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of rolls consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RollSource for FixedRolls {
    fn roll(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}
