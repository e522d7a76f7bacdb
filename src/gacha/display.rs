//! Text and command rendering for draw results.
//!
//! Nothing here talks to the server; these build the strings a host handler
//! sends to the player or runs as commands.

use super::types::{DrawResult, Rarity, Reward};
use serde::Serialize;
use std::collections::BTreeMap;

/// `give` command for a reward. Raw NBT is appended to the item id verbatim.
pub fn give_command(reward: &Reward) -> String {
    match &reward.nbt {
        Some(nbt) => format!("give @s {}{} {}", reward.item, nbt, reward.count),
        None => format!("give @s {} {}", reward.item, reward.count),
    }
}

/// One line of a ten-pull listing, numbered from 1.
pub fn batch_line(index: usize, result: &DrawResult) -> String {
    format!("{}. [{}] {}", index + 1, result.rarity, result.reward.name)
}

pub fn batch_lines(results: &[DrawResult]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| batch_line(i, r))
        .collect()
}

/// Per-tier totals over a set of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    counts: BTreeMap<Rarity, u64>,
}

impl TierCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a DrawResult>) -> Self {
        let mut counts = Self::new();
        for result in results {
            counts.record(result.rarity);
        }
        counts
    }

    pub fn record(&mut self, rarity: Rarity) {
        *self.counts.entry(rarity).or_insert(0) += 1;
    }

    pub fn get(&self, rarity: Rarity) -> u64 {
        self.counts.get(&rarity).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Share of `rarity` in percent, 0 when nothing was recorded.
    pub fn percent(&self, rarity: Rarity) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(rarity) as f64 / total as f64 * 100.0
        }
    }

    /// e.g. `"3N 5R 2SR 0SSR"`
    pub fn summary_line(&self) -> String {
        Rarity::ALL
            .iter()
            .map(|r| format!("{}{}", self.get(*r), r))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Sound and particle commands played for a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    pub sound: Option<&'static str>,
    pub particle: Option<String>,
    /// SSR results also get a broadcast-style banner line
    pub banner: bool,
}

impl Celebration {
    const NONE: Celebration = Celebration {
        sound: None,
        particle: None,
        banner: false,
    };

    /// Effects for a single draw.
    pub fn for_tier(rarity: Rarity) -> Self {
        match rarity {
            Rarity::SSR => Self::legendary(50),
            Rarity::SR => Self::rare(30),
            Rarity::R => Celebration {
                sound: Some(
                    "playsound minecraft:entity.experience_orb.pickup player @s ~ ~ ~ 1 1",
                ),
                particle: None,
                banner: false,
            },
            Rarity::N => Self::NONE,
        }
    }

    /// Effects for a ten-pull, keyed on its best tier. Only SR and above
    /// celebrate, with denser particles than a single draw.
    pub fn for_batch(best: Option<Rarity>) -> Self {
        match best {
            Some(Rarity::SSR) => Self::legendary(100),
            Some(Rarity::SR) => Self::rare(50),
            _ => Self::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sound.is_none() && self.particle.is_none() && !self.banner
    }

    /// Commands to run, sound first.
    pub fn commands(&self) -> Vec<String> {
        let mut commands = Vec::new();
        if let Some(sound) = self.sound {
            commands.push(sound.to_string());
        }
        if let Some(particle) = &self.particle {
            commands.push(particle.clone());
        }
        commands
    }

    fn legendary(particles: u32) -> Self {
        Celebration {
            sound: Some("playsound minecraft:ui.toast.challenge_complete player @s ~ ~ ~ 1 1"),
            particle: Some(format!(
                "particle minecraft:totem_of_undying ~ ~1 ~ 0.5 0.5 0.5 0.1 {particles}"
            )),
            banner: true,
        }
    }

    fn rare(particles: u32) -> Self {
        Celebration {
            sound: Some("playsound minecraft:entity.player.levelup player @s ~ ~ ~ 1 1.5"),
            particle: Some(format!(
                "particle minecraft:enchant ~ ~1 ~ 0.5 0.5 0.5 0.1 {particles}"
            )),
            banner: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rarity: Rarity, name: &str) -> DrawResult {
        DrawResult {
            rarity,
            reward: Reward::new("minecraft:stone", 1, name),
        }
    }

    #[test]
    fn test_give_command_plain() {
        let reward = Reward::new("minecraft:diamond", 3, "Diamond x3");
        assert_eq!(give_command(&reward), "give @s minecraft:diamond 3");
    }

    #[test]
    fn test_give_command_appends_nbt_verbatim() {
        let reward = Reward::new("minecraft:diamond_sword", 1, "Blade")
            .with_nbt("{Enchantments:[{id:\"minecraft:sharpness\",lvl:5s}]}");
        assert_eq!(
            give_command(&reward),
            "give @s minecraft:diamond_sword{Enchantments:[{id:\"minecraft:sharpness\",lvl:5s}]} 1"
        );
    }

    #[test]
    fn test_batch_lines_are_numbered() {
        let lines = batch_lines(&[result(Rarity::N, "Coal"), result(Rarity::SSR, "Star")]);
        assert_eq!(lines, vec!["1. [N] Coal", "2. [SSR] Star"]);
    }

    #[test]
    fn test_tier_counts_summary() {
        let results = vec![
            result(Rarity::N, "a"),
            result(Rarity::N, "b"),
            result(Rarity::R, "c"),
            result(Rarity::SSR, "d"),
        ];
        let counts = TierCounts::from_results(&results);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(Rarity::SR), 0);
        assert_eq!(counts.summary_line(), "2N 1R 0SR 1SSR");
        assert!((counts.percent(Rarity::N) - 50.0).abs() < 1e-9);
        assert_eq!(TierCounts::new().percent(Rarity::N), 0.0);
    }

    #[test]
    fn test_celebration_by_tier() {
        assert!(Celebration::for_tier(Rarity::N).is_empty());
        assert_eq!(Celebration::for_tier(Rarity::R).commands().len(), 1);

        let ssr = Celebration::for_tier(Rarity::SSR);
        assert!(ssr.banner);
        assert!(ssr.commands()[1].ends_with(" 50"));
    }

    #[test]
    fn test_celebration_for_batch_skips_low_tiers() {
        assert!(Celebration::for_batch(Some(Rarity::R)).is_empty());
        assert!(Celebration::for_batch(None).is_empty());
        assert!(Celebration::for_batch(Some(Rarity::SR)).commands()[1].ends_with(" 50"));
        assert!(Celebration::for_batch(Some(Rarity::SSR)).commands()[1].ends_with(" 100"));
    }
}
