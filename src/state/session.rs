//! Game session.
//!
//! Owns the reels and the game state, drives the spin cycle and writes every
//! change through to the store. All operations take `&mut self` and finish,
//! store writes included, before returning, so transitions never interleave.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::Serialize;

use super::config::SessionConfig;
use super::payout::Payout;
use super::phase::{InvalidTransition, PhaseEvent, SessionPhase};
use super::purchase::{Clock, PurchaseError, PurchaseLimiter, SystemClock};
use super::reel::{Reel, ReelState, REEL_COUNT};
use super::sound::{SoundBoard, SoundCue};
use super::store::{self, PersistenceStore, SavedGame, StoreError};
use super::symbol::Symbol;

/// Everything a player can see about the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub score: u64,

    /// Currently selected bet
    pub bet: u64,

    /// Per-reel result of the current or last spin
    pub result: [Option<Symbol>; REEL_COUNT],

    /// Completed results, most recent first
    pub history: Vec<[Symbol; REEL_COUNT]>,

    /// Occurrences of each symbol across every completed spin
    pub symbol_counts: BTreeMap<Symbol, u64>,

    pub reach_active: bool,

    /// Reels still spinning while a reach is active
    pub reach_targets: BTreeSet<usize>,

    pub last_win_message: Option<String>,
}

/// Session errors. None of them change any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidState(#[from] InvalidTransition),

    #[error("reel index {0} out of range")]
    InvalidReel(usize),

    #[error("reel {0} already stopped")]
    ReelAlreadyStopped(usize),

    #[error("bet must be at least 1")]
    InvalidBet,

    #[error("bet {bet} exceeds score {score}")]
    InsufficientFunds { bet: u64, score: u64 },

    #[error(transparent)]
    LimitExceeded(#[from] PurchaseError),
}

/// Result of a completed spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinSummary {
    pub result: [Symbol; REEL_COUNT],
    pub bet: u64,
    pub payout: Payout,
    /// Score after the payout was applied
    pub score: u64,
    pub message: Option<String>,
}

/// Result of stopping one reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopOutcome {
    pub reel: usize,
    pub symbol: Symbol,
    /// True only on the stop that activated a reach
    pub reach_triggered: bool,
    /// Set when this stop completed the spin
    pub spin: Option<SpinSummary>,
}

/// A single player's slot machine.
pub struct GameSession<S: PersistenceStore> {
    store: S,
    config: SessionConfig,
    clock: Box<dyn Clock>,
    sounds: SoundBoard,
    phase: SessionPhase,
    reels: [Reel; REEL_COUNT],
    state: GameState,
    /// Bet staked on the spin in progress
    wager: u64,
    limiter: PurchaseLimiter,
}

impl<S: PersistenceStore> GameSession<S> {
    /// Load a session from the store using the system clock and no sound.
    pub fn open(store: S, config: SessionConfig) -> Self {
        Self::open_with(store, config, SystemClock, SoundBoard::silent())
    }

    /// Load a session from the store.
    pub fn open_with(
        mut store: S,
        config: SessionConfig,
        clock: impl Clock + 'static,
        sounds: SoundBoard,
    ) -> Self {
        let saved = SavedGame::load(&store, config.starting_score);
        let today = clock.today();

        let limiter = match saved.purchase {
            Some(stored) => PurchaseLimiter::restore(config.max_purchases_per_day, stored, today),
            None => PurchaseLimiter::new(config.max_purchases_per_day, today),
        };
        if saved.purchase != Some(limiter.state()) {
            check_write("purchase", store::save_purchase(&mut store, limiter.state()));
        }

        let mut history = saved.history;
        history.truncate(config.history_limit);

        let score = saved.score;
        let bet = clamp_bet(config.default_bet, score);

        log::info!(
            "session loaded: score={}, history={}, purchases today={}",
            score,
            history.len(),
            limiter.state().count
        );

        let reels = std::array::from_fn(|_| Reel::new(config.reel_speed));

        Self {
            store,
            clock: Box::new(clock),
            sounds,
            phase: SessionPhase::Idle,
            reels,
            state: GameState {
                score,
                bet,
                result: [None; REEL_COUNT],
                history,
                symbol_counts: saved.symbol_counts,
                reach_active: false,
                reach_targets: BTreeSet::new(),
                last_win_message: None,
            },
            wager: 0,
            limiter,
            config,
        }
    }

    // Accessors

    /// Get the full game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Get the current score.
    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Get the selected bet.
    pub fn bet(&self) -> u64 {
        self.state.bet
    }

    /// Get the per-reel result of the current or last spin.
    pub fn result(&self) -> [Option<Symbol>; REEL_COUNT] {
        self.state.result
    }

    /// Get past results, most recent first.
    pub fn history(&self) -> &[[Symbol; REEL_COUNT]] {
        &self.state.history
    }

    /// Get the symbol tally across every completed spin.
    pub fn symbol_counts(&self) -> &BTreeMap<Symbol, u64> {
        &self.state.symbol_counts
    }

    /// Check if a reach is active.
    pub fn reach_active(&self) -> bool {
        self.state.reach_active
    }

    /// Get the reels a reach is waiting on.
    pub fn reach_targets(&self) -> &BTreeSet<usize> {
        &self.state.reach_targets
    }

    /// Get the message for the last win, if the last spin won.
    pub fn last_win_message(&self) -> Option<&str> {
        self.state.last_win_message.as_deref()
    }

    /// Get a reel by index.
    pub fn reel(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index)
    }

    /// Get a reel's state by index.
    pub fn reel_state(&self, index: usize) -> Option<ReelState> {
        self.reel(index).map(Reel::state)
    }

    /// Get every reel's state.
    pub fn reel_states(&self) -> [ReelState; REEL_COUNT] {
        std::array::from_fn(|i| self.reels[i].state())
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the session and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Symbols by how often they came up, most frequent first.
    pub fn symbol_ranking(&self) -> Vec<(Symbol, u64)> {
        let mut ranking: Vec<(Symbol, u64)> = self
            .state
            .symbol_counts
            .iter()
            .map(|(s, c)| (*s, *c))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }

    /// Check if a spin with the selected bet would be accepted.
    pub fn can_start_spin(&self) -> bool {
        self.phase.is_idle() && self.state.bet >= 1 && self.state.bet <= self.state.score
    }

    // Bet

    /// Select a bet, clamped to `[1, score]`. Returns the bet kept.
    pub fn set_bet(&mut self, bet: u64) -> u64 {
        self.state.bet = clamp_bet(bet, self.state.score);
        self.state.bet
    }

    // Spin cycle

    /// Debit the bet and set every reel spinning.
    pub fn start_spin(&mut self, bet: u64) -> Result<(), SessionError> {
        let next = self.phase.transition(PhaseEvent::StartSpin)?;

        if bet < 1 {
            return Err(SessionError::InvalidBet);
        }
        if bet > self.state.score {
            log::warn!("spin rejected: bet {} exceeds score {}", bet, self.state.score);
            return Err(SessionError::InsufficientFunds {
                bet,
                score: self.state.score,
            });
        }

        self.phase = next;
        self.wager = bet;
        self.state.bet = bet;
        self.state.score -= bet;
        self.state.result = [None; REEL_COUNT];
        self.state.last_win_message = None;
        self.clear_reach();
        for reel in &mut self.reels {
            reel.spin();
        }

        check_write("score", store::save_score(&mut self.store, self.state.score));
        self.sounds.cue(SoundCue::Spin);

        log::info!("spin started: bet={}, score={}", bet, self.state.score);
        Ok(())
    }

    /// Advance every spinning reel.
    pub fn tick(&mut self, elapsed: Duration) {
        for reel in &mut self.reels {
            reel.advance(elapsed);
        }
    }

    /// Stop one reel on the symbol under its centre line.
    ///
    /// Stopping the last spinning reel evaluates the spin before returning.
    pub fn stop_reel(&mut self, index: usize) -> Result<StopOutcome, SessionError> {
        if index >= REEL_COUNT {
            return Err(SessionError::InvalidReel(index));
        }

        let remaining = self.spinning_count().saturating_sub(1);
        let next = self
            .phase
            .transition(PhaseEvent::ReelStopped { remaining })?;

        if !self.reels[index].is_spinning() {
            return Err(SessionError::ReelAlreadyStopped(index));
        }

        // Everything that can fail is checked before any state changes
        let symbol = self.reels[index].centre_symbol();
        let mut result = self.state.result;
        result[index] = Some(symbol);
        let completed = if next == SessionPhase::Resolving {
            let settled = next.transition(PhaseEvent::Evaluate)?;
            let full = complete_result(result).ok_or(InvalidTransition {
                from: next,
                event: PhaseEvent::Evaluate,
                reason: "Result incomplete",
            })?;
            Some((full, settled))
        } else {
            None
        };

        self.reels[index]
            .stop()
            .map_err(|_| SessionError::ReelAlreadyStopped(index))?;
        self.state.result = result;
        self.phase = next;
        self.sounds.cue(SoundCue::ReelStop);

        let reach_triggered = self.update_reach();
        if reach_triggered {
            log::info!("reach on {}, waiting on reels {:?}", symbol.as_str(), self.state.reach_targets);
            self.sounds.cue(SoundCue::Reach);
        }

        let spin = completed.map(|(full, settled)| self.evaluate(full, settled));

        Ok(StopOutcome {
            reel: index,
            symbol,
            reach_triggered,
            spin,
        })
    }

    fn spinning_count(&self) -> usize {
        self.reels.iter().filter(|r| r.is_spinning()).count()
    }

    /// Recompute reach from the resolved symbols.
    /// Returns true if reach just became active.
    fn update_reach(&mut self) -> bool {
        let resolved: Vec<Symbol> = self.state.result.iter().flatten().copied().collect();
        let spinning: BTreeSet<usize> = self
            .reels
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_spinning())
            .map(|(i, _)| i)
            .collect();

        let matching = resolved.len() >= 2 && resolved.iter().all(|s| *s == resolved[0]);
        let was_active = self.state.reach_active;

        if matching && !spinning.is_empty() {
            self.state.reach_active = true;
            self.state.reach_targets = spinning;
            !was_active
        } else {
            self.clear_reach();
            false
        }
    }

    fn clear_reach(&mut self) {
        self.state.reach_active = false;
        self.state.reach_targets.clear();
    }

    /// Apply the payout for a fully stopped spin and move to `settled`.
    fn evaluate(&mut self, result: [Symbol; REEL_COUNT], settled: SessionPhase) -> SpinSummary {
        let payout = self.config.payouts.evaluate(result, self.wager);
        if payout.is_win {
            self.state.score = self.state.score.saturating_add(payout.reward);
            self.state.last_win_message = payout.win_message(result[0]);
            self.sounds.cue(SoundCue::Win(result[0]));
            log::info!(
                "win: {} x{} -> +{}, score={}",
                result[0].as_str(),
                payout.multiplier,
                payout.reward,
                self.state.score
            );
        } else {
            log::debug!("no win: {:?}", result);
        }

        self.state.history.insert(0, result);
        self.state.history.truncate(self.config.history_limit);
        for symbol in result {
            let count = self.state.symbol_counts.entry(symbol).or_insert(0);
            *count = count.saturating_add(1);
        }
        self.clear_reach();
        self.phase = settled;

        check_write("score", store::save_score(&mut self.store, self.state.score));
        check_write("history", store::save_history(&mut self.store, &self.state.history));
        check_write(
            "symbol counts",
            store::save_symbol_counts(&mut self.store, &self.state.symbol_counts),
        );

        SpinSummary {
            result,
            bet: self.wager,
            payout,
            score: self.state.score,
            message: self.state.last_win_message.clone(),
        }
    }

    // Purchases

    /// Check if a purchase is allowed today.
    pub fn can_purchase(&self) -> bool {
        self.limiter.can_purchase_on(self.clock.today())
    }

    /// Get purchases left today.
    pub fn purchases_remaining(&self) -> u32 {
        self.limiter.remaining_on(self.clock.today())
    }

    /// Add the configured credit to the score, if today's limit allows.
    /// Returns the new score.
    pub fn purchase_credits(&mut self) -> Result<u64, SessionError> {
        let today = self.clock.today();
        let count = match self.limiter.increment(today) {
            Ok(count) => count,
            Err(e) => {
                log::warn!("purchase rejected: {}", e);
                return Err(e.into());
            }
        };

        self.state.score = self.state.score.saturating_add(self.config.purchase_credit);

        check_write("score", store::save_score(&mut self.store, self.state.score));
        check_write("purchase", store::save_purchase(&mut self.store, self.limiter.state()));

        log::info!(
            "purchase {}/{}: +{}, score={}",
            count,
            self.limiter.max_per_day(),
            self.config.purchase_credit,
            self.state.score
        );
        Ok(self.state.score)
    }

    /// Convert session to JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        let reels: Vec<serde_json::Value> = self
            .reels
            .iter()
            .map(|r| {
                serde_json::json!({
                    "spinning": r.is_spinning(),
                    "resolved": r.resolved()
                })
            })
            .collect();

        serde_json::json!({
            "phase": self.phase.as_str(),
            "score": self.state.score,
            "bet": self.state.bet,
            "result": self.state.result,
            "reels": reels,
            "history": self.state.history,
            "symbol_counts": self.state.symbol_counts,
            "reach_active": self.state.reach_active,
            "reach_targets": self.state.reach_targets,
            "last_win_message": self.state.last_win_message,
            "can_purchase": self.can_purchase(),
            "purchases_remaining": self.purchases_remaining()
        })
    }
}

/// Full result once every reel has resolved.
fn complete_result(result: [Option<Symbol>; REEL_COUNT]) -> Option<[Symbol; REEL_COUNT]> {
    match result {
        [Some(a), Some(b), Some(c)] => Some([a, b, c]),
        _ => None,
    }
}

/// Clamp a bet to `[1, score]`; a zero score still keeps a bet of 1.
fn clamp_bet(bet: u64, score: u64) -> u64 {
    bet.min(score).max(1)
}

fn check_write(what: &str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        log::error!("failed to persist {}: {}", what, e);
    }
}
