//! Reelspin State Library
//!
//! This crate provides the game logic for a three-reel slot machine.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Reels** - Each reel spins until stopped by the player; the symbol is
//!   taken from wherever the strip is at that moment.
//!
//! - **Payouts** - Three of a kind pays the bet times the symbol multiplier.
//!
//! - **Session** - Score, bet, history, symbol tally and reach (near-win)
//!   detection, driven through a validated idle/spinning/resolving cycle.
//!
//! - **Purchases** - "Add funds" limited to a fixed number of uses per day.
//!
//! - **Persistence** - A string-keyed store the session writes through to.
//!
//! # Design Principles
//!
//! 1. **State machines validate transitions** - Invalid actions are rejected
//!    with an error and leave the session unchanged.
//!
//! 2. **No rendering** - Animation, layout and audio decoding live elsewhere;
//!    sound is a play/stop contract.
//!
//! 3. **Injected collaborators** - Store, clock and sound players are passed
//!    in; there is no global state.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use reelspin_state::state::{GameSession, MemoryStore, SessionConfig, Symbol};
//!
//! let config = SessionConfig::default().with_reel_speed(1.0);
//! let mut session = GameSession::open(MemoryStore::new(), config);
//!
//! session.start_spin(10).unwrap();
//! assert_eq!(session.score(), 90);
//!
//! // Five cells down the strip is the seven
//! session.tick(Duration::from_secs(5));
//! for reel in 0..3 {
//!     session.stop_reel(reel).unwrap();
//! }
//!
//! assert_eq!(session.history()[0], [Symbol::Seven; 3]);
//! assert_eq!(session.score(), 290);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
