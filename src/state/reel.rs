//! Reel spin/stop lifecycle.
//!
//! A spinning reel carries a continuous strip position measured in symbol
//! cells. The position only moves when the reel is advanced, and `stop`
//! samples whatever position the reel holds at that moment: the symbol whose
//! cell covers the centre line is the result.
//!
//! ```text
//! ┌─────────┐   spin    ┌────────────┐   stop    ┌─────────┐
//! │ Stopped │ ────────▶ │  Spinning  │ ────────▶ │ Stopped │
//! │ (none)  │           │ pos += v·t │  sample   │ (sym)   │
//! └─────────┘           └────────────┘           └────┬────┘
//!                             ▲          spin         │
//!                             └───────────────────────┘
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::symbol::{Symbol, SYMBOL_COUNT};

/// Number of reels on the machine.
pub const REEL_COUNT: usize = 3;

/// Default strip speed (symbol cells per second).
pub const DEFAULT_REEL_SPEED: f64 = 12.0;

/// Observable state of one reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReelState {
    pub spinning: bool,
    pub resolved: Option<Symbol>,
}

/// Reel errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReelError {
    #[error("reel not spinning")]
    NotSpinning,
}

/// A single reel.
#[derive(Debug, Clone)]
pub struct Reel {
    state: ReelState,

    /// Strip position in symbol cells, kept within `[0, SYMBOL_COUNT)`
    position: f64,

    /// Cells per second while spinning
    speed: f64,
}

impl Default for Reel {
    fn default() -> Self {
        Self::new(DEFAULT_REEL_SPEED)
    }
}

impl Reel {
    /// Create a stopped reel with the given strip speed.
    pub fn new(speed: f64) -> Self {
        Self {
            state: ReelState::default(),
            position: 0.0,
            speed: speed.max(0.0),
        }
    }

    /// Get the observable state.
    pub fn state(&self) -> ReelState {
        self.state
    }

    /// Check if the reel is spinning.
    pub fn is_spinning(&self) -> bool {
        self.state.spinning
    }

    /// Get the symbol this spin stopped on, if stopped.
    pub fn resolved(&self) -> Option<Symbol> {
        self.state.resolved
    }

    /// Current strip position in symbol cells.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Start spinning from the top of the strip.
    pub fn spin(&mut self) {
        self.state = ReelState {
            spinning: true,
            resolved: None,
        };
        self.position = 0.0;
    }

    /// Move the strip forward. Ignored while stopped.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.state.spinning {
            return;
        }
        let travelled = self.speed * elapsed.as_secs_f64();
        self.position = (self.position + travelled).rem_euclid(SYMBOL_COUNT as f64);
    }

    /// Symbol under the centre line at the current position.
    pub fn centre_symbol(&self) -> Symbol {
        let cell = (self.position + 0.5).floor() as usize;
        Symbol::from_index(cell)
    }

    /// Stop the reel on whatever symbol is under the centre line.
    pub fn stop(&mut self) -> Result<Symbol, ReelError> {
        if !self.state.spinning {
            return Err(ReelError::NotSpinning);
        }

        let symbol = self.centre_symbol();
        // Snap to the cell so the displayed strip matches the result
        self.position = symbol.index() as f64;
        self.state = ReelState {
            spinning: false,
            resolved: Some(symbol),
        };

        log::debug!("reel stopped on {}", symbol.as_str());
        Ok(symbol)
    }
}
