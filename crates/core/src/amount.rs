//! Amount kinds and the validation predicate shared by stock and order
//! quantities.

use serde::{Deserialize, Serialize};

/// Distance from a valid value that is still accepted.
pub const DEFAULT_AMOUNT_TOLERANCE: f64 = 0.001;

/// Which amounts are valid for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountKind {
    /// Any non-negative real value.
    Any,
    /// Whole units (within tolerance).
    Integer,
    /// Whole or half units (within tolerance).
    HalfInteger,
}

impl AmountKind {
    /// Closest value this kind considers exact.
    fn nearest(self, amount: f64) -> f64 {
        match self {
            AmountKind::Any => amount,
            AmountKind::Integer => amount.round(),
            AmountKind::HalfInteger => (amount * 2.0).round() / 2.0,
        }
    }
}

/// What happens to an accepted amount that is within tolerance but not exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    /// Store the nearest valid value (3.0005 becomes 3).
    #[default]
    Snap,
    /// Store the value as supplied.
    Keep,
}

/// Amount validation rules.
///
/// The predicate is pure: it never touches stored state, it only tells the
/// caller whether an amount is acceptable and which value to store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRules {
    pub tolerance: f64,
    pub policy: AmountPolicy,
}

impl Default for AmountRules {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_AMOUNT_TOLERANCE,
            policy: AmountPolicy::Snap,
        }
    }
}

impl AmountRules {
    pub fn new(tolerance: f64, policy: AmountPolicy) -> Self {
        Self { tolerance, policy }
    }

    /// Validate a non-negative amount against `kind`.
    ///
    /// Returns the value to store, or `None` if the amount is negative, not
    /// finite, or too far from any value `kind` allows.
    pub fn accept(&self, kind: AmountKind, amount: f64) -> Option<f64> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let nearest = kind.nearest(amount);
        if (amount - nearest).abs() > self.tolerance {
            return None;
        }
        match self.policy {
            AmountPolicy::Snap => Some(nearest),
            AmountPolicy::Keep => Some(amount),
        }
    }

    /// Validate a signed delta: its magnitude must be acceptable for `kind`.
    ///
    /// The sign is carried over to the returned value.
    pub fn accept_delta(&self, kind: AmountKind, delta: f64) -> Option<f64> {
        self.accept(kind, delta.abs())
            .map(|magnitude| magnitude.copysign(delta))
    }

    /// Validate the amount `current + delta` would produce.
    ///
    /// Returns the adjustment that lands on the accepted value, or `None` if
    /// the resulting amount is not acceptable for `kind`. A negative result is
    /// never acceptable; callers that treat it as a shortage check it first.
    pub fn accept_change(&self, kind: AmountKind, current: f64, delta: f64) -> Option<f64> {
        let target = current + delta;
        let accepted = self.accept(kind, target)?;
        if accepted == target {
            Some(delta)
        } else {
            Some(accepted - current)
        }
    }
}
