//! Counter search (mining) and verification
//!
//! Mining is a brute-force linear search over the stamp counter: serialize,
//! digest, test, increment. Expected cost is about 16^difficulty attempts
//! with hex-digit units.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use std::sync::atomic::AtomicU64;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::digest::{DifficultyUnit, digest, meets_difficulty};
use crate::error::{ExhaustedError, MineError};
use crate::params::CANCEL_CHECK_INTERVAL;
use crate::stamp::Stamp;

/// Shared flag for stopping a running search from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Outcome of a successful mining run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningReport {
    /// Counter that made the stamp valid
    pub counter: u64,
    /// Digests computed
    pub attempts: u64,
    /// Wall time spent searching
    pub elapsed: Duration,
}

impl MiningReport {
    /// Digests per second
    pub fn hashrate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

/// Mining and verification under one fixed difficulty unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    unit: DifficultyUnit,
}

impl Engine {
    /// Engine using the canonical hex-digit unit
    pub const fn new() -> Self {
        Self {
            unit: DifficultyUnit::HexDigit,
        }
    }

    pub const fn with_unit(unit: DifficultyUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> DifficultyUnit {
        self.unit
    }

    /// Check a received stamp
    ///
    /// Re-serializes every field as received, including the claimed counter,
    /// and recomputes the digest. Never mutates the stamp.
    pub fn verify(&self, stamp: &Stamp) -> bool {
        meets_difficulty(&stamp.digest(), stamp.difficulty(), self.unit)
    }

    /// Search for a counter that satisfies the stamp's difficulty
    ///
    /// Starts from the stamp's current counter. `budget` caps the counter
    /// value inclusively; `None` searches until `u64::MAX`. On failure the
    /// counter is left at the last value attempted.
    pub fn mine(&self, stamp: &mut Stamp, budget: Option<u64>) -> Result<(), ExhaustedError> {
        self.search(stamp, budget, None)
            .map(|_| ())
            .map_err(|e| uncancelled(e, budget))
    }

    /// [`Engine::mine`] with attempt count and timing
    pub fn mine_with_report(
        &self,
        stamp: &mut Stamp,
        budget: Option<u64>,
    ) -> Result<MiningReport, ExhaustedError> {
        let start = Instant::now();
        let attempts = self
            .search(stamp, budget, None)
            .map_err(|e| uncancelled(e, budget))?;

        Ok(MiningReport {
            counter: stamp.counter(),
            attempts,
            elapsed: start.elapsed(),
        })
    }

    /// [`Engine::mine`] that also stops when `cancel` is set
    ///
    /// The token is polled every [`CANCEL_CHECK_INTERVAL`] attempts. On
    /// cancellation the counter is left at the next untried value, so a
    /// later call resumes where this one stopped.
    pub fn mine_cancellable(
        &self,
        stamp: &mut Stamp,
        budget: Option<u64>,
        cancel: &CancelToken,
    ) -> Result<(), MineError> {
        self.search(stamp, budget, Some(cancel)).map(|_| ())
    }

    fn search(
        &self,
        stamp: &mut Stamp,
        budget: Option<u64>,
        cancel: Option<&CancelToken>,
    ) -> Result<u64, MineError> {
        let limit = budget.unwrap_or(u64::MAX);
        let difficulty = stamp.difficulty();
        let mut counter = stamp.counter();

        if counter > limit || difficulty > self.unit.max_difficulty() {
            debug!(counter, difficulty, ?budget, "nothing to search");
            return Err(ExhaustedError {
                last_counter: counter,
                budget,
            }
            .into());
        }

        let mut buf = String::with_capacity(stamp.canonical_len_hint());
        let mut attempts = 0u64;

        loop {
            if let Some(token) = cancel {
                if attempts % CANCEL_CHECK_INTERVAL == 0 && token.is_cancelled() {
                    stamp.set_counter(counter);
                    debug!(counter, attempts, "mining cancelled");
                    return Err(MineError::Cancelled { counter });
                }
            }

            stamp.write_canonical_with(counter, &mut buf);
            attempts += 1;

            if meets_difficulty(&digest(buf.as_bytes()), difficulty, self.unit) {
                stamp.set_counter(counter);
                debug!(counter, attempts, difficulty, "stamp solved");
                return Ok(attempts);
            }

            if counter == limit {
                stamp.set_counter(counter);
                debug!(counter, attempts, difficulty, "mining budget exhausted");
                return Err(ExhaustedError {
                    last_counter: counter,
                    budget,
                }
                .into());
            }

            counter += 1;
        }
    }

    /// Search the counter space with `workers` rayon tasks
    ///
    /// Worker `i` tries `start + i`, `start + i + workers`, ... over a shared
    /// read-only stamp. A hit is published as an atomic minimum and each
    /// worker stops once its next candidate is above the best hit, so the
    /// result is the same smallest counter the sequential search finds.
    #[cfg(feature = "parallel")]
    pub fn mine_parallel(
        &self,
        stamp: &mut Stamp,
        budget: Option<u64>,
        workers: usize,
    ) -> Result<(), ExhaustedError> {
        self.parallel_search(stamp, budget, workers).map(|_| ())
    }

    /// [`Engine::mine_parallel`] with attempt count and timing
    ///
    /// `attempts` sums every worker, including candidates hashed past the
    /// winning counter before the other workers stopped.
    #[cfg(feature = "parallel")]
    pub fn mine_parallel_with_report(
        &self,
        stamp: &mut Stamp,
        budget: Option<u64>,
        workers: usize,
    ) -> Result<MiningReport, ExhaustedError> {
        let start = Instant::now();
        let attempts = self.parallel_search(stamp, budget, workers)?;

        Ok(MiningReport {
            counter: stamp.counter(),
            attempts,
            elapsed: start.elapsed(),
        })
    }

    #[cfg(feature = "parallel")]
    fn parallel_search(
        &self,
        stamp: &mut Stamp,
        budget: Option<u64>,
        workers: usize,
    ) -> Result<u64, ExhaustedError> {
        let limit = budget.unwrap_or(u64::MAX);
        let difficulty = stamp.difficulty();
        let start = stamp.counter();

        if start > limit || difficulty > self.unit.max_difficulty() {
            return Err(ExhaustedError {
                last_counter: start,
                budget,
            });
        }

        let stride = workers.max(1) as u64;
        let best = AtomicU64::new(u64::MAX);
        let found = AtomicBool::new(false);
        let attempts = AtomicU64::new(0);
        let unit = self.unit;
        let shared: &Stamp = stamp;

        (0..stride).into_par_iter().for_each(|worker| {
            let mut buf = String::with_capacity(shared.canonical_len_hint());
            let mut local_attempts = 0u64;
            let mut next = start.checked_add(worker);

            while let Some(counter) = next {
                if counter > limit || counter > best.load(Ordering::Acquire) {
                    break;
                }

                shared.write_canonical_with(counter, &mut buf);
                local_attempts += 1;

                if meets_difficulty(&digest(buf.as_bytes()), difficulty, unit) {
                    best.fetch_min(counter, Ordering::AcqRel);
                    found.store(true, Ordering::Release);
                    break;
                }

                next = counter.checked_add(stride);
            }

            attempts.fetch_add(local_attempts, Ordering::Relaxed);
        });

        let attempts = attempts.into_inner();

        if found.into_inner() {
            let counter = best.into_inner();
            stamp.set_counter(counter);
            debug!(counter, attempts, difficulty, workers = stride, "stamp solved");
            Ok(attempts)
        } else {
            stamp.set_counter(limit);
            debug!(counter = limit, attempts, difficulty, "mining budget exhausted");
            Err(ExhaustedError {
                last_counter: limit,
                budget,
            })
        }
    }
}

/// Narrow a search error from a run without a cancel token
fn uncancelled(err: MineError, budget: Option<u64>) -> ExhaustedError {
    match err {
        MineError::Exhausted(e) => e,
        MineError::Cancelled { counter } => ExhaustedError {
            last_counter: counter,
            budget,
        },
    }
}

/// Mine with the canonical hex-digit engine
pub fn mine(stamp: &mut Stamp, budget: Option<u64>) -> Result<(), ExhaustedError> {
    Engine::new().mine(stamp, budget)
}

/// Verify with the canonical hex-digit engine
pub fn verify(stamp: &Stamp) -> bool {
    Engine::new().verify(stamp)
}
