use prescreen::Result;
use prescreen::model::Estimator;
use prescreen::scoring::{FeatureRow, ScoringRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Estimator that always reports the same default probability.
pub struct FixedEstimator(pub f64);

impl Estimator for FixedEstimator {
    fn predict_proba(&self, _row: &FeatureRow) -> Result<[f64; 2]> {
        Ok([1.0 - self.0, self.0])
    }
}

/// Estimator that always fails, for exercising the inference error path.
pub struct BrokenEstimator;

impl Estimator for BrokenEstimator {
    fn predict_proba(&self, _row: &FeatureRow) -> Result<[f64; 2]> {
        Err(prescreen::Error::inference("artifact shape mismatch"))
    }
}

/// Estimator that counts invocations, for asserting that rejected requests
/// never reach inference.
pub struct CountingEstimator {
    pub probability: f64,
    pub calls: Arc<AtomicUsize>,
}

impl CountingEstimator {
    pub fn new(probability: f64) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                probability,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Estimator for CountingEstimator {
    fn predict_proba(&self, _row: &FeatureRow) -> Result<[f64; 2]> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok([1.0 - self.probability, self.probability])
    }
}

/// Well-formed applicant used across the integration tests.
pub fn sample_request() -> ScoringRequest {
    ScoringRequest {
        loan_amnt: 10000.0,
        term: "36 months".to_string(),
        int_rate: 12.5,
        fico_range_low: 700.0,
        annual_inc: 600000.0,
        dti: 15.0,
        emp_length: "5 years".to_string(),
        purpose: "credit_card".to_string(),
        open_acc: 5.0,
        total_acc: 10.0,
        revol_util: 30.0,
        inq_last_6mths: 0.0,
    }
}
