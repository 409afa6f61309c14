//! Payout resolution.
//!
//! A spin wins when all three reels show the same symbol. The reward is the
//! bet times the symbol's multiplier.

use serde::{Deserialize, Serialize};

use super::reel::REEL_COUNT;
use super::symbol::Symbol;

/// Multiplier used for a symbol missing from the table.
pub const DEFAULT_MULTIPLIER: u64 = 1;

/// Standard multipliers, lowest paying first.
pub const STANDARD_PAYOUTS: [(Symbol, u64); 6] = [
    (Symbol::Cherry, 2),
    (Symbol::Lemon, 3),
    (Symbol::Bell, 5),
    (Symbol::Star, 8),
    (Symbol::Clover, 10),
    (Symbol::Seven, 20),
];

/// Outcome of evaluating a full result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub is_win: bool,
    /// Zero on a loss
    pub multiplier: u64,
    /// Zero on a loss
    pub reward: u64,
}

impl Payout {
    pub const LOSS: Payout = Payout {
        is_win: false,
        multiplier: 0,
        reward: 0,
    };

    /// Message shown for a win, e.g. `7️⃣ × 20 → +200`.
    pub fn win_message(&self, symbol: Symbol) -> Option<String> {
        self.is_win
            .then(|| format!("{} × {} → +{}", symbol, self.multiplier, self.reward))
    }
}

/// Symbol → multiplier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutTable {
    entries: Vec<(Symbol, u64)>,
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            entries: STANDARD_PAYOUTS.to_vec(),
        }
    }
}

impl PayoutTable {
    /// Create a table from explicit entries.
    pub fn new(entries: Vec<(Symbol, u64)>) -> Self {
        Self { entries }
    }

    /// Multiplier for a symbol, or [`DEFAULT_MULTIPLIER`] if absent.
    pub fn multiplier(&self, symbol: Symbol) -> u64 {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, m)| *m)
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// Evaluate a full result against a bet.
    pub fn evaluate(&self, result: [Symbol; REEL_COUNT], bet: u64) -> Payout {
        let first = result[0];
        if !result.iter().all(|s| *s == first) {
            return Payout::LOSS;
        }

        let multiplier = self.multiplier(first);
        Payout {
            is_win: true,
            multiplier,
            reward: bet.saturating_mul(multiplier),
        }
    }
}

/// Evaluate a result with the standard table.
pub fn evaluate(result: [Symbol; REEL_COUNT], bet: u64) -> Payout {
    PayoutTable::default().evaluate(result, bet)
}
