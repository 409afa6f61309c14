//! State management module for the slot machine.
//!
//! This module provides the core state types:
//!
//! - `symbol` - Reel symbol catalog
//! - `reel` - Single reel spin/stop lifecycle
//! - `payout` - Payout table and win evaluation
//! - `purchase` - Daily purchase limit
//! - `phase` - Session phase state machine
//! - `store` - Key/value persistence and typed load/save
//! - `sound` - Two-channel sound cue routing
//! - `config` - Session configuration
//! - `session` - The game session tying everything together
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         GameSession<S>                              │
//! │                                                                     │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐   ┌──────────────┐  │
//! │  │  Reel 0    │  │  Reel 1    │  │  Reel 2    │   │ SessionPhase │  │
//! │  │ pos, state │  │ pos, state │  │ pos, state │   │ Idle ▶ Spin  │  │
//! │  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘   │ ▶ Resolving  │  │
//! │        └───────────────┼───────────────┘          └──────────────┘  │
//! │                        ▼                                            │
//! │  ┌──────────────────────────────┐   ┌───────────────────────────┐   │
//! │  │ GameState                    │   │ PayoutTable               │   │
//! │  │ score, bet, result, history, │◀──│ evaluate(result, bet)     │   │
//! │  │ symbol_counts, reach         │   └───────────────────────────┘   │
//! │  └──────────────┬───────────────┘   ┌───────────────────────────┐   │
//! │                 │                   │ PurchaseLimiter (Clock)   │   │
//! │                 │                   └───────────────────────────┘   │
//! └─────────────────┼───────────────────────────────────────────────────┘
//!                   ▼ write-through
//!        ┌─────────────────────┐          ┌──────────────────────────┐
//!        │ S: PersistenceStore │          │ SoundBoard (2 channels)  │
//!        └─────────────────────┘          └──────────────────────────┘
//! ```

pub mod config;
pub mod payout;
pub mod phase;
pub mod purchase;
pub mod reel;
pub mod session;
pub mod sound;
pub mod store;
pub mod symbol;

// Re-export commonly used types
pub use config::{SessionConfig, DEFAULT_BET, DEFAULT_HISTORY_LIMIT, DEFAULT_PURCHASE_CREDIT};
pub use payout::{evaluate, Payout, PayoutTable, DEFAULT_MULTIPLIER, STANDARD_PAYOUTS};
pub use phase::{InvalidTransition, PhaseEvent, SessionPhase};
pub use purchase::{
    Clock, PurchaseError, PurchaseLimitState, PurchaseLimiter, PurchaseStatus, SystemClock,
    DEFAULT_MAX_PURCHASES_PER_DAY,
};
pub use reel::{Reel, ReelError, ReelState, DEFAULT_REEL_SPEED, REEL_COUNT};
pub use session::{GameSession, GameState, SessionError, SpinSummary, StopOutcome};
pub use sound::{SilentPlayer, SoundBoard, SoundChannel, SoundCue, SoundPlayer};
pub use store::{JsonFileStore, MemoryStore, PersistenceStore, SavedGame, StoreError, DEFAULT_SCORE};
pub use symbol::{Symbol, UnknownSymbol, SYMBOL_COUNT};
