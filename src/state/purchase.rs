//! Daily purchase limit.
//!
//! Gates the "add funds" action to a fixed number of uses per calendar day.
//! A stored state from an earlier day is reset before any query or update,
//! whatever its count.
//!
//! ```text
//!               increment (count < max)
//!              ┌──────────┐
//!              ▼          │
//!        ┌───────────┐ ───┘  count == max  ┌───────────┐
//!  ────▶ │ Available │ ──────────────────▶ │ Exhausted │
//!        └───────────┘                     └─────┬─────┘
//!              ▲          new day                │
//!              └─────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default purchases allowed per day.
pub const DEFAULT_MAX_PURCHASES_PER_DAY: u32 = 3;

/// Source of the current calendar day.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// UTC calendar day from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}

/// Persisted counter for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLimitState {
    pub date: NaiveDate,
    pub count: u32,
}

impl PurchaseLimitState {
    /// Create a counter with no purchases on `date`.
    pub fn fresh(date: NaiveDate) -> Self {
        Self { date, count: 0 }
    }
}

/// Limiter status for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Available,
    Exhausted,
}

impl PurchaseStatus {
    /// Get the status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Purchase errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("daily purchase limit of {max} reached")]
    LimitExceeded { max: u32 },
}

/// Daily-bounded purchase counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseLimiter {
    max_per_day: u32,
    state: PurchaseLimitState,
}

impl PurchaseLimiter {
    /// Create a limiter with no purchases made today.
    pub fn new(max_per_day: u32, today: NaiveDate) -> Self {
        Self {
            max_per_day,
            state: PurchaseLimitState::fresh(today),
        }
    }

    /// Restore a stored counter, resetting it if it belongs to another day.
    pub fn restore(max_per_day: u32, stored: PurchaseLimitState, today: NaiveDate) -> Self {
        let mut limiter = Self {
            max_per_day,
            state: PurchaseLimitState {
                date: stored.date,
                count: stored.count.min(max_per_day),
            },
        };
        limiter.refresh(today);
        limiter
    }

    /// Get the daily limit.
    pub fn max_per_day(&self) -> u32 {
        self.max_per_day
    }

    /// Stored counter as of the last refresh.
    pub fn state(&self) -> PurchaseLimitState {
        self.state
    }

    /// Reset the counter if `today` is a different day.
    /// Returns true if a reset happened.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        if self.state.date == today {
            return false;
        }
        log::debug!(
            "purchase counter reset ({} -> {})",
            self.state.date,
            today
        );
        self.state = PurchaseLimitState::fresh(today);
        true
    }

    /// Count for `today`, without mutating.
    pub fn count_on(&self, today: NaiveDate) -> u32 {
        if self.state.date == today {
            self.state.count
        } else {
            0
        }
    }

    /// Get the status for `today`, without mutating.
    pub fn status_on(&self, today: NaiveDate) -> PurchaseStatus {
        if self.count_on(today) < self.max_per_day {
            PurchaseStatus::Available
        } else {
            PurchaseStatus::Exhausted
        }
    }

    /// Check if a purchase is allowed on `today`, without mutating.
    pub fn can_purchase_on(&self, today: NaiveDate) -> bool {
        self.status_on(today) == PurchaseStatus::Available
    }

    /// Purchases left for `today`.
    pub fn remaining_on(&self, today: NaiveDate) -> u32 {
        self.max_per_day.saturating_sub(self.count_on(today))
    }

    /// Record a purchase. Returns the new count.
    pub fn increment(&mut self, today: NaiveDate) -> Result<u32, PurchaseError> {
        self.refresh(today);

        if self.state.count >= self.max_per_day {
            return Err(PurchaseError::LimitExceeded {
                max: self.max_per_day,
            });
        }

        self.state.count += 1;
        Ok(self.state.count)
    }
}
