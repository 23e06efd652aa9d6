//! Atomic f64 cell.
//!
//! Instrument values are f64 per the exposition format, but std has no
//! `AtomicF64`; the cell stores the bit pattern in an `AtomicU64` and applies
//! deltas with a CAS loop. The loop is bounded in practice (one retry per
//! concurrent writer racing the same cell).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) struct AtomicF64 {
    bits: AtomicU64,
}

impl fmt::Debug for AtomicF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF64").field(&self.get()).finish()
    }
}

impl AtomicF64 {
    pub(crate) fn new(v: f64) -> Self {
        Self {
            bits: AtomicU64::new(v.to_bits()),
        }
    }

    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn add(&self, delta: f64) {
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(observed) => cur = observed,
            }
        }
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}
