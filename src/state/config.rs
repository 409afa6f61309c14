//! Session tuning.

use serde::{Deserialize, Serialize};

use super::payout::PayoutTable;
use super::purchase::DEFAULT_MAX_PURCHASES_PER_DAY;
use super::reel::DEFAULT_REEL_SPEED;
use super::store::DEFAULT_SCORE;

/// Bet selected when a session loads.
pub const DEFAULT_BET: u64 = 10;

/// Number of past results kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Score added by one purchase.
pub const DEFAULT_PURCHASE_CREDIT: u64 = 100;

/// Session configuration. Every field has a default, so a partial JSON
/// document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Score when nothing usable is stored
    pub starting_score: u64,

    /// Bet selected on load, clamped to the score
    pub default_bet: u64,

    /// Past results kept in history
    pub history_limit: usize,

    pub max_purchases_per_day: u32,

    /// Score added per purchase
    pub purchase_credit: u64,

    /// Reel strip speed in symbol cells per second
    pub reel_speed: f64,

    pub payouts: PayoutTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_score: DEFAULT_SCORE,
            default_bet: DEFAULT_BET,
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_purchases_per_day: DEFAULT_MAX_PURCHASES_PER_DAY,
            purchase_credit: DEFAULT_PURCHASE_CREDIT,
            reel_speed: DEFAULT_REEL_SPEED,
            payouts: PayoutTable::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration, defaulting missing fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Set the reel strip speed.
    pub fn with_reel_speed(mut self, speed: f64) -> Self {
        self.reel_speed = speed;
        self
    }

    /// Set the daily purchase limit.
    pub fn with_max_purchases(mut self, max_per_day: u32) -> Self {
        self.max_purchases_per_day = max_per_day;
        self
    }
}
