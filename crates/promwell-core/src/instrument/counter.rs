//! Monotonic counter.

use crate::error::{PromwellError, Result};

use super::value::AtomicF64;

/// Monotonic non-negative accumulator.
///
/// Values only grow, except through an explicit [`Counter::reset`].
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicF64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.value.add(1.0);
    }

    /// Increment by an arbitrary non-negative delta.
    ///
    /// Negative or NaN deltas are rejected with `NegativeDelta` and leave the
    /// stored value untouched.
    pub fn inc_by(&self, delta: f64) -> Result<()> {
        // `!(delta >= 0.0)` also catches NaN.
        if !(delta >= 0.0) {
            return Err(PromwellError::NegativeDelta(delta));
        }
        self.value.add(delta);
        Ok(())
    }

    /// Reset to zero. The only sanctioned way a counter decreases.
    pub fn reset(&self) {
        self.value.set(0.0);
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value.get()
    }
}
