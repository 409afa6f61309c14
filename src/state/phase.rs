//! Session phase state machine.
//!
//! Tracks where a session is in the spin cycle and validates transitions.
//!
//! # State Diagram
//!
//! ```text
//!            start_spin              last reel stopped
//! ┌──────┐ ─────────────▶ ┌──────────┐ ───────────────▶ ┌───────────┐
//! │ Idle │                │ Spinning │                   │ Resolving │
//! └──────┘                └──────────┘                   └─────┬─────┘
//!    ▲                      │     ▲                            │
//!    │                      └─────┘ reel stopped,              │
//!    │                              others still spinning      │
//!    └─────────────────────────────────────────────────────────┘
//!                             evaluate
//! ```

use std::fmt;

/// Where the session is in the spin cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No reel spinning; result fully resolved or never started
    #[default]
    Idle,

    /// At least one reel spinning
    Spinning,

    /// Every reel stopped, payout not yet applied
    Resolving,
}

impl SessionPhase {
    /// Get the phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Spinning => "spinning",
            Self::Resolving => "resolving",
        }
    }

    /// Check if a new spin may start.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if any reel is spinning.
    pub fn is_spinning(&self) -> bool {
        matches!(self, Self::Spinning)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    StartSpin,
    /// A reel stopped; `remaining` reels are still spinning
    ReelStopped { remaining: usize },
    Evaluate,
}

/// Error when a phase transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transition from {from} via {event:?}: {reason}")]
pub struct InvalidTransition {
    pub from: SessionPhase,
    pub event: PhaseEvent,
    pub reason: &'static str,
}

impl SessionPhase {
    /// Apply an event in place, returning error if invalid.
    pub fn apply_mut(&mut self, event: PhaseEvent) -> Result<(), InvalidTransition> {
        *self = self.transition(event)?;
        Ok(())
    }

    /// Calculate the next phase for an event.
    pub fn transition(&self, event: PhaseEvent) -> Result<SessionPhase, InvalidTransition> {
        use PhaseEvent::*;
        use SessionPhase::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: *self,
            event,
            reason,
        };

        match (self, event) {
            (Idle, StartSpin) => Ok(Spinning),
            (Spinning, StartSpin) => Err(invalid("Reels are already spinning")),
            (Resolving, StartSpin) => Err(invalid("Previous spin not evaluated")),

            (Spinning, ReelStopped { remaining: 0 }) => Ok(Resolving),
            (Spinning, ReelStopped { .. }) => Ok(Spinning),
            (_, ReelStopped { .. }) => Err(invalid("No spin in progress")),

            (Resolving, Evaluate) => Ok(Idle),
            (_, Evaluate) => Err(invalid("Reels have not all stopped")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut phase = SessionPhase::default();
        assert!(phase.is_idle());

        phase.apply_mut(PhaseEvent::StartSpin).unwrap();
        assert!(phase.is_spinning());

        phase
            .apply_mut(PhaseEvent::ReelStopped { remaining: 2 })
            .unwrap();
        phase
            .apply_mut(PhaseEvent::ReelStopped { remaining: 1 })
            .unwrap();
        assert_eq!(phase, SessionPhase::Spinning);

        phase
            .apply_mut(PhaseEvent::ReelStopped { remaining: 0 })
            .unwrap();
        assert_eq!(phase, SessionPhase::Resolving);

        phase.apply_mut(PhaseEvent::Evaluate).unwrap();
        assert!(phase.is_idle());
    }

    #[test]
    fn test_invalid_transitions() {
        let idle = SessionPhase::Idle;
        assert!(idle.transition(PhaseEvent::Evaluate).is_err());
        assert!(idle
            .transition(PhaseEvent::ReelStopped { remaining: 0 })
            .is_err());

        let spinning = idle.transition(PhaseEvent::StartSpin).unwrap();
        assert!(spinning.transition(PhaseEvent::StartSpin).is_err());
        assert!(spinning.transition(PhaseEvent::Evaluate).is_err());

        let resolving = SessionPhase::Resolving;
        assert!(resolving.transition(PhaseEvent::StartSpin).is_err());
    }

    #[test]
    fn test_failed_apply_keeps_phase() {
        let mut phase = SessionPhase::Idle;
        let err = phase.apply_mut(PhaseEvent::Evaluate).unwrap_err();
        assert_eq!(err.from, SessionPhase::Idle);
        assert_eq!(phase, SessionPhase::Idle);
    }

    #[test]
    fn test_display() {
        let err = SessionPhase::Idle
            .transition(PhaseEvent::Evaluate)
            .unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid transition from idle via Evaluate: Reels have not all stopped"
        );
    }
}
