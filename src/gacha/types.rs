use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Draw mode for standard tickets.
pub const NORMAL: &str = "normal";
/// Draw mode for advanced tickets; also the table the normal pity redraw uses.
pub const ADVANCED: &str = "advanced";
/// Draw mode for legendary tickets.
pub const LEGENDARY: &str = "legendary";

/// Contexts every rates configuration must define.
pub const REQUIRED_CONTEXTS: [&str; 3] = [NORMAL, ADVANCED, LEGENDARY];

/// Number of draws in a ten-pull batch.
pub const BATCH_SIZE: usize = 10;

/// Reward tier, ordered by rank (N lowest, SSR highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    N,
    R,
    SR,
    SSR,
}

impl Rarity {
    /// All tiers in ascending rank.
    pub const ALL: [Rarity; 4] = [Rarity::N, Rarity::R, Rarity::SR, Rarity::SSR];

    /// Bottom tier. Absorbs any roll no table weight claims.
    pub const LOWEST: Rarity = Rarity::ALL[0];
    pub const TOP: Rarity = Rarity::ALL[Rarity::ALL.len() - 1];
    pub const SECOND_HIGHEST: Rarity = Rarity::ALL[Rarity::ALL.len() - 2];

    pub fn tag(&self) -> &'static str {
        match self {
            Rarity::N => "N",
            Rarity::R => "R",
            Rarity::SR => "SR",
            Rarity::SSR => "SSR",
        }
    }

    /// Minecraft text color used when announcing this tier.
    pub fn color_name(&self) -> &'static str {
        match self {
            Rarity::N => "white",
            Rarity::R => "blue",
            Rarity::SR => "light_purple",
            Rarity::SSR => "gold",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single reward entry in a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Item identifier, e.g. `minecraft:diamond`
    pub item: String,
    pub count: u32,
    /// Display label shown to the player
    pub name: String,
    /// Raw SNBT payload appended to the give command as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt: Option<String>,
}

impl Reward {
    pub fn new(item: impl Into<String>, count: u32, name: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            count,
            name: name.into(),
            nbt: None,
        }
    }

    pub fn with_nbt(mut self, nbt: impl Into<String>) -> Self {
        self.nbt = Some(nbt.into());
        self
    }
}

/// Tier weights for one draw context, in percentage points.
///
/// Weights need not sum to 100; whatever is left over falls to the lowest
/// tier present in the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    weights: BTreeMap<Rarity, f64>,
}

impl TierTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weights(weights: impl IntoIterator<Item = (Rarity, f64)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    /// Weight for a tier; tiers absent from the table weigh 0.
    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.weights.get(&rarity).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Tiers in ascending rank with their weights.
    pub fn iter(&self) -> impl Iterator<Item = (Rarity, f64)> + '_ {
        self.weights.iter().map(|(r, w)| (*r, *w))
    }

    /// Tiers from highest rank to lowest.
    pub fn tiers_descending(&self) -> impl Iterator<Item = (Rarity, f64)> + '_ {
        self.weights.iter().rev().map(|(r, w)| (*r, *w))
    }
}

/// Rewards available for each tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardPool {
    tiers: BTreeMap<Rarity, Vec<Reward>>,
}

impl RewardPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, rarity: Rarity, rewards: Vec<Reward>) -> Self {
        self.tiers.insert(rarity, rewards);
        self
    }

    pub fn contains_tier(&self, rarity: Rarity) -> bool {
        self.tiers.contains_key(&rarity)
    }

    /// Rewards for a tier, empty if the tier has no entry.
    pub fn rewards(&self, rarity: Rarity) -> &[Reward] {
        self.tiers.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rarity, &[Reward])> + '_ {
        self.tiers.iter().map(|(r, rewards)| (*r, rewards.as_slice()))
    }
}

/// Outcome of one draw. The reward is an owned copy of the pool entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub rarity: Rarity,
    pub reward: Reward,
}

/// Ten draws in draw order, after pity adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    results: Vec<DrawResult>,
    /// Indices overwritten by the pity rule, in the order they were applied
    pity_slots: Vec<usize>,
}

impl BatchResult {
    pub(crate) fn from_draws(results: Vec<DrawResult>) -> Self {
        debug_assert_eq!(results.len(), BATCH_SIZE);
        Self {
            results,
            pity_slots: Vec::new(),
        }
    }

    /// Overwrite one slot; only the pity step calls this.
    pub(crate) fn replace(&mut self, index: usize, result: DrawResult) {
        self.results[index] = result;
        self.pity_slots.push(index);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DrawResult> {
        self.results.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[DrawResult] {
        &self.results
    }

    pub fn into_vec(self) -> Vec<DrawResult> {
        self.results
    }

    pub fn count(&self, rarity: Rarity) -> usize {
        self.results.iter().filter(|r| r.rarity == rarity).count()
    }

    pub fn count_at_least(&self, rarity: Rarity) -> usize {
        self.results.iter().filter(|r| r.rarity >= rarity).count()
    }

    pub fn best(&self) -> Option<Rarity> {
        self.results.iter().map(|r| r.rarity).max()
    }

    pub fn pity_slots(&self) -> &[usize] {
        &self.pity_slots
    }

    pub fn pity_triggered(&self) -> bool {
        !self.pity_slots.is_empty()
    }
}

impl Index<usize> for BatchResult {
    type Output = DrawResult;

    fn index(&self, index: usize) -> &DrawResult {
        &self.results[index]
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a DrawResult;
    type IntoIter = std::slice::Iter<'a, DrawResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
