//! Process-wide counters.
//!
//! One `Metrics` value is created at start-up and cloned into the store client
//! and the email validator, so a single summary covers the whole run.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Default)]
struct Counters {
    store_requests: AtomicU64,
    store_errors: AtomicU64,
    store_time_ms: AtomicU64,
    organizations_fetched: AtomicU64,
    products_fetched: AtomicU64,
    verification_calls: AtomicU64,
    verification_fallbacks: AtomicU64,
}

fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

/// Cheaply cloneable handle; clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing one store request.
    pub fn start_request(&self) -> RequestTimer {
        RequestTimer {
            started: Instant::now(),
            metrics: self.clone(),
        }
    }

    pub fn record_organizations_fetched(&self, count: usize) {
        bump(&self.counters.organizations_fetched, count as u64);
    }

    pub fn record_products_fetched(&self, count: usize) {
        bump(&self.counters.products_fetched, count as u64);
    }

    pub fn record_verification_call(&self) {
        bump(&self.counters.verification_calls, 1);
    }

    pub fn record_verification_fallback(&self) {
        bump(&self.counters.verification_fallbacks, 1);
    }

    pub fn http_requests_total(&self) -> u64 {
        read(&self.counters.store_requests)
    }

    pub fn http_errors_total(&self) -> u64 {
        read(&self.counters.store_errors)
    }

    pub fn organizations_fetched_total(&self) -> u64 {
        read(&self.counters.organizations_fetched)
    }

    pub fn products_fetched_total(&self) -> u64 {
        read(&self.counters.products_fetched)
    }

    pub fn verification_calls_total(&self) -> u64 {
        read(&self.counters.verification_calls)
    }

    pub fn verification_fallbacks_total(&self) -> u64 {
        read(&self.counters.verification_fallbacks)
    }

    /// Point-in-time copy of every counter.
    pub fn summary(&self) -> MetricsSummary {
        let requests = self.http_requests_total();
        let total_ms = read(&self.counters.store_time_ms);

        MetricsSummary {
            store_requests: requests,
            store_errors: self.http_errors_total(),
            store_avg_ms: if requests == 0 {
                0.0
            } else {
                total_ms as f64 / requests as f64
            },
            organizations_fetched: self.organizations_fetched_total(),
            products_fetched: self.products_fetched_total(),
            verification_calls: self.verification_calls_total(),
            verification_fallbacks: self.verification_fallbacks_total(),
        }
    }
}

/// Snapshot returned by [`Metrics::summary`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub store_requests: u64,
    pub store_errors: u64,
    pub store_avg_ms: f64,
    pub organizations_fetched: u64,
    pub products_fetched: u64,
    pub verification_calls: u64,
    pub verification_fallbacks: u64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "store requests={} errors={} avg={:.1}ms, organizations={}, products={}, \
             verification calls={} fallbacks={}",
            self.store_requests,
            self.store_errors,
            self.store_avg_ms,
            self.organizations_fetched,
            self.products_fetched,
            self.verification_calls,
            self.verification_fallbacks,
        )
    }
}

/// Measures one store request; consumed when the request settles.
pub struct RequestTimer {
    started: Instant,
    metrics: Metrics,
}

impl RequestTimer {
    pub fn finish(self, succeeded: bool) {
        let counters = &self.metrics.counters;
        bump(&counters.store_requests, 1);
        bump(&counters.store_time_ms, self.started.elapsed().as_millis() as u64);
        if !succeeded {
            bump(&counters.store_errors, 1);
        }
    }
}
