use std::sync::{Mutex, PoisonError};

use jiff::Timestamp;
use jiff::tz::TimeZone;
use switchboard_config::{BudgetConfig, BudgetPeriod};

use crate::error::BillingError;

/// Cumulative spend against a fixed ceiling
///
/// Checking and recording are separate steps with separate critical
/// sections. Two requests can both pass the check before either records,
/// so spend may briefly overshoot the limit under concurrency.
#[derive(Debug)]
pub struct UsageMonitor {
    limit: f64,
    period: BudgetPeriod,
    ledger: Mutex<Ledger>,
}

#[derive(Debug, Default)]
struct Ledger {
    spent: f64,
    /// Month the spend belongs to; only tracked for monthly budgets
    month: Option<BillingMonth>,
}

/// Ordered by year, then month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct BillingMonth {
    year: i16,
    month: i8,
}

impl BillingMonth {
    fn containing(at: Timestamp) -> Self {
        let zoned = at.to_zoned(TimeZone::UTC);
        Self {
            year: zoned.year(),
            month: zoned.month(),
        }
    }
}

impl UsageMonitor {
    /// Create from configuration
    pub fn new(config: &BudgetConfig) -> Self {
        Self::with_period(config.limit, config.period)
    }

    /// Create with an explicit ceiling and reset policy
    pub fn with_period(limit: f64, period: BudgetPeriod) -> Self {
        Self {
            limit,
            period,
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// Fail if charging `cost` now would exceed the budget
    ///
    /// Never changes the ledger. A spend of exactly the limit is allowed.
    pub fn check_budget(&self, cost: f64) -> Result<(), BillingError> {
        self.check_budget_at(cost, Timestamp::now())
    }

    /// [`Self::check_budget`] evaluated at a given instant
    pub fn check_budget_at(&self, cost: f64, now: Timestamp) -> Result<(), BillingError> {
        let spent = self.spent_at(now);
        let projected = spent + cost;

        if projected > self.limit {
            tracing::warn!(spent, cost, limit = self.limit, "budget check failed");
            return Err(BillingError::BudgetExceeded {
                projected,
                limit: self.limit,
            });
        }

        Ok(())
    }

    /// Add `cost` to the ledger, returning the new total
    pub fn record(&self, cost: f64) -> f64 {
        self.record_at(cost, Timestamp::now())
    }

    /// [`Self::record`] evaluated at a given instant
    pub fn record_at(&self, cost: f64, now: Timestamp) -> f64 {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);

        if self.period == BudgetPeriod::Monthly {
            // A clock that steps back keeps charging the newer month
            let current = BillingMonth::containing(now);
            if ledger.month.is_none_or(|month| current > month) {
                if let Some(previous) = ledger.month {
                    tracing::info!(
                        previous_year = previous.year,
                        previous_month = previous.month,
                        carried_spend = ledger.spent,
                        "billing period rolled over"
                    );
                }
                ledger.spent = 0.0;
                ledger.month = Some(current);
            }
        }

        ledger.spent += cost;
        tracing::debug!(cost, total = ledger.spent, "usage recorded");
        ledger.spent
    }

    /// Spend for the current period
    pub fn current_usage(&self) -> f64 {
        self.spent_at(Timestamp::now())
    }

    /// Budget left in the current period, floored at zero
    pub fn remaining(&self) -> f64 {
        (self.limit - self.current_usage()).max(0.0)
    }

    pub const fn limit(&self) -> f64 {
        self.limit
    }

    /// Spend attributable to the period containing `now`
    fn spent_at(&self, now: Timestamp) -> f64 {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);

        match (self.period, ledger.month) {
            (BudgetPeriod::Monthly, Some(month)) if BillingMonth::containing(now) > month => 0.0,
            _ => ledger.spent,
        }
    }
}
