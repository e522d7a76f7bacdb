use super::config::GachaConfig;
use super::display::{give_command, Celebration, TierCounts};
use super::error::ConfigError;
use super::logic::{batch_draw_with_pity, draw_in_context};
use super::persistence::{load_config, ConfigLoad};
use super::rolls::RollSource;
use super::ticket::TicketKind;
use super::types::{BatchResult, DrawResult, Rarity};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a redeemed ticket produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Redemption {
    Single(DrawResult),
    Batch(BatchResult),
}

impl Redemption {
    pub fn results(&self) -> &[DrawResult] {
        match self {
            Redemption::Single(result) => std::slice::from_ref(result),
            Redemption::Batch(batch) => batch.as_slice(),
        }
    }

    /// One `give` command per reward, in draw order.
    pub fn give_commands(&self) -> Vec<String> {
        self.results().iter().map(|r| give_command(&r.reward)).collect()
    }

    pub fn counts(&self) -> TierCounts {
        TierCounts::from_results(self.results())
    }

    pub fn celebration(&self) -> Celebration {
        match self {
            Redemption::Single(result) => Celebration::for_tier(result.rarity),
            Redemption::Batch(batch) => Celebration::for_batch(batch.best()),
        }
    }

    pub fn best(&self) -> Option<Rarity> {
        self.results().iter().map(|r| r.rarity).max()
    }
}

/// Holds the active configuration and serves draws from it.
#[derive(Debug, Clone)]
pub struct GachaMachine {
    config_dir: Option<PathBuf>,
    config: GachaConfig,
    fallback_reason: Option<String>,
}

impl GachaMachine {
    /// A machine over an already resolved configuration, with nothing to
    /// reload from.
    pub fn new(config: GachaConfig) -> Self {
        Self {
            config_dir: None,
            config,
            fallback_reason: None,
        }
    }

    /// Load configuration from `dir`, falling back to defaults per file.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let mut machine = Self {
            config_dir: Some(dir.into()),
            config: GachaConfig::default(),
            fallback_reason: None,
        };
        machine.reload();
        machine
    }

    pub fn config(&self) -> &GachaConfig {
        &self.config
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Why the current configuration is (partly) defaults, if it is.
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    /// Re-read configuration from disk. Returns false if any part fell back
    /// to defaults. Machines built with [`GachaMachine::new`] keep their
    /// configuration.
    pub fn reload(&mut self) -> bool {
        let Some(dir) = self.config_dir.clone() else {
            info!("no config directory, keeping in-memory configuration");
            return true;
        };

        match load_config(&dir) {
            ConfigLoad::Loaded(config) => {
                info!(dir = %dir.display(), "gacha configuration loaded");
                self.config = config;
                self.fallback_reason = None;
                true
            }
            ConfigLoad::Fallback { config, reason } => {
                warn!(dir = %dir.display(), %reason, "gacha configuration fell back to defaults");
                self.config = config;
                self.fallback_reason = Some(reason);
                false
            }
        }
    }

    pub fn draw(
        &self,
        context: &str,
        rolls: &mut impl RollSource,
    ) -> Result<DrawResult, ConfigError> {
        draw_in_context(context, &self.config, rolls)
    }

    pub fn draw_batch(
        &self,
        context: &str,
        rolls: &mut impl RollSource,
    ) -> Result<BatchResult, ConfigError> {
        batch_draw_with_pity(context, &self.config, rolls)
    }

    pub fn redeem(
        &self,
        ticket: &TicketKind,
        rolls: &mut impl RollSource,
    ) -> Result<Redemption, ConfigError> {
        let redemption = match ticket {
            TicketKind::Single(context) => Redemption::Single(self.draw(context, rolls)?),
            TicketKind::Batch(context) => Redemption::Batch(self.draw_batch(context, rolls)?),
        };
        if redemption.best() == Some(Rarity::SSR) {
            info!(ticket = %ticket.tag(), "SSR drawn");
        }
        Ok(redemption)
    }

    /// Parse a ticket tag and redeem it. `Ok(None)` means the tag is not a
    /// ticket and nothing was consumed.
    pub fn redeem_tag(
        &self,
        gacha_type: &str,
        rolls: &mut impl RollSource,
    ) -> Result<Option<Redemption>, ConfigError> {
        match TicketKind::parse(gacha_type) {
            Some(ticket) => self.redeem(&ticket, rolls).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for GachaMachine {
    fn default() -> Self {
        Self::new(GachaConfig::default())
    }
}
