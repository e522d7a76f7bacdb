use super::types::Rarity;
use thiserror::Error;

/// Configuration problems surfaced by the draw engine and the loader.
///
/// A draw that hits one of these is a data bug; the engine never retries and
/// never returns a partial batch.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("tier table is empty")]
    EmptyTierTable,

    #[error("reward pool has no entry for tier {0}")]
    MissingPoolTier(Rarity),

    #[error("reward list for tier {0} is empty")]
    EmptyRewardList(Rarity),

    #[error("unknown draw context '{0}'")]
    UnknownContext(String),

    #[error("rates are missing required context '{0}'")]
    MissingContext(String),

    #[error("negative weight {weight} for tier {rarity} in context '{context}'")]
    NegativeWeight {
        context: String,
        rarity: Rarity,
        weight: f64,
    },

    #[error("reward '{item}' has a zero quantity")]
    ZeroQuantity { item: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
