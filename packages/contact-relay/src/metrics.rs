//! Prometheus metrics (lock-free atomics).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub submissions_total: AtomicU64,
    pub submissions_success: AtomicU64,

    // --- Rejections by stage ---
    pub rejected_missing_input: AtomicU64,
    pub rejected_verification: AtomicU64,
    pub verification_unavailable: AtomicU64,
    pub dispatch_failed: AtomicU64,
    pub method_not_allowed: AtomicU64,

    // --- Upstream latency (μs) ---
    pub verify_duration_us_sum: AtomicU64,
    pub dispatch_duration_us_sum: AtomicU64,
    pub submission_duration_us_max: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            submissions_total: AtomicU64::new(0),
            submissions_success: AtomicU64::new(0),
            rejected_missing_input: AtomicU64::new(0),
            rejected_verification: AtomicU64::new(0),
            verification_unavailable: AtomicU64::new(0),
            dispatch_failed: AtomicU64::new(0),
            method_not_allowed: AtomicU64::new(0),
            verify_duration_us_sum: AtomicU64::new(0),
            dispatch_duration_us_sum: AtomicU64::new(0),
            submission_duration_us_max: AtomicU64::new(0),
        }
    }

    pub fn record_verify_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.verify_duration_us_sum.fetch_add(us, Ordering::Relaxed);
    }

    pub fn record_dispatch_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.dispatch_duration_us_sum
            .fetch_add(us, Ordering::Relaxed);
    }

    pub fn record_submission_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.submission_duration_us_max
            .fetch_max(us, Ordering::Relaxed);
    }

    /// Bump the rejection counter for a terminal error.
    pub fn record_error(&self, err: &crate::Error) {
        let counter = match err {
            crate::Error::MissingInput => &self.rejected_missing_input,
            crate::Error::InvalidVerification(_) => &self.rejected_verification,
            crate::Error::VerificationUnavailable(_) => &self.verification_unavailable,
            crate::Error::Dispatch(_) => &self.dispatch_failed,
            crate::Error::MethodNotAllowed => &self.method_not_allowed,
            crate::Error::Config(_) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let total = self.submissions_total.load(Ordering::Relaxed);
        let success = self.submissions_success.load(Ordering::Relaxed);
        let missing = self.rejected_missing_input.load(Ordering::Relaxed);
        let verification = self.rejected_verification.load(Ordering::Relaxed);
        let unavailable = self.verification_unavailable.load(Ordering::Relaxed);
        let dispatch = self.dispatch_failed.load(Ordering::Relaxed);
        let not_allowed = self.method_not_allowed.load(Ordering::Relaxed);
        let verify_sum = self.verify_duration_us_sum.load(Ordering::Relaxed);
        let dispatch_sum = self.dispatch_duration_us_sum.load(Ordering::Relaxed);
        let max = self.submission_duration_us_max.swap(0, Ordering::Relaxed);

        let verify_sum_s = verify_sum as f64 / 1_000_000.0;
        let dispatch_sum_s = dispatch_sum as f64 / 1_000_000.0;
        let max_s = max as f64 / 1_000_000.0;

        format!(
            "\
# HELP contact_submissions_total Contact submissions received.\n\
# TYPE contact_submissions_total counter\n\
contact_submissions_total {total}\n\
# HELP contact_submissions_success_total Submissions verified and emailed.\n\
# TYPE contact_submissions_success_total counter\n\
contact_submissions_success_total {success}\n\
# HELP contact_rejected_total Submissions rejected, by stage.\n\
# TYPE contact_rejected_total counter\n\
contact_rejected_total{{stage=\"missing_input\"}} {missing}\n\
contact_rejected_total{{stage=\"verification\"}} {verification}\n\
contact_rejected_total{{stage=\"verification_unavailable\"}} {unavailable}\n\
contact_rejected_total{{stage=\"dispatch\"}} {dispatch}\n\
contact_rejected_total{{stage=\"method\"}} {not_allowed}\n\
# HELP contact_verify_duration_seconds_sum Time spent in the verification provider.\n\
# TYPE contact_verify_duration_seconds_sum counter\n\
contact_verify_duration_seconds_sum {verify_sum_s:.6}\n\
# HELP contact_dispatch_duration_seconds_sum Time spent in the email provider.\n\
# TYPE contact_dispatch_duration_seconds_sum counter\n\
contact_dispatch_duration_seconds_sum {dispatch_sum_s:.6}\n\
# HELP contact_submission_duration_seconds_max Max handler time since last scrape.\n\
# TYPE contact_submission_duration_seconds_max gauge\n\
contact_submission_duration_seconds_max {max_s:.6}\n"
        )
    }
}
