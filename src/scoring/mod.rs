mod types;

pub use types::*;

use crate::model::Estimator;
use crate::{Error, Result};

/// Column order the classifier was trained on. The projection below must
/// emit exactly these columns in exactly this order; the underlying model
/// will not error on relabeled-but-present columns, it will just score
/// garbage.
pub const EXPECTED_COLUMNS: [&str; 12] = [
    "loan_amnt",
    "term",
    "int_rate",
    "fico_range_low",
    "annual_inc",
    "dti",
    "emp_length",
    "purpose",
    "open_acc",
    "total_acc",
    "revol_util",
    "inq_last_6mths",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

/// A single applicant row, projected into the trained column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(&'static str, FeatureValue)>,
}

impl FeatureRow {
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(col, _)| *col == name)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(col, _)| *col)
    }
}

impl ScoringRequest {
    fn fields(&self) -> Vec<(&'static str, FeatureValue)> {
        vec![
            ("loan_amnt", FeatureValue::Number(self.loan_amnt)),
            ("term", FeatureValue::Category(self.term.clone())),
            ("int_rate", FeatureValue::Number(self.int_rate)),
            ("fico_range_low", FeatureValue::Number(self.fico_range_low)),
            ("annual_inc", FeatureValue::Number(self.annual_inc)),
            ("dti", FeatureValue::Number(self.dti)),
            ("emp_length", FeatureValue::Category(self.emp_length.clone())),
            ("purpose", FeatureValue::Category(self.purpose.clone())),
            ("open_acc", FeatureValue::Number(self.open_acc)),
            ("total_acc", FeatureValue::Number(self.total_acc)),
            ("revol_util", FeatureValue::Number(self.revol_util)),
            ("inq_last_6mths", FeatureValue::Number(self.inq_last_6mths)),
        ]
    }

    /// Checks each field against its declared type. Categorical fields are
    /// deliberately left as free-form strings; values outside the trained
    /// vocabulary degrade the prediction instead of failing (see the
    /// out-of-vocabulary warning in the model layer).
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("loan_amnt", self.loan_amnt),
            ("int_rate", self.int_rate),
            ("fico_range_low", self.fico_range_low),
            ("annual_inc", self.annual_inc),
            ("dti", self.dti),
            ("open_acc", self.open_acc),
            ("total_acc", self.total_acc),
            ("revol_util", self.revol_util),
            ("inq_last_6mths", self.inq_last_6mths),
        ];
        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(Error::validation(name, "must be a finite number"));
            }
        }
        if self.loan_amnt <= 0.0 {
            return Err(Error::validation("loan_amnt", "must be positive"));
        }
        if self.annual_inc <= 0.0 {
            return Err(Error::validation("annual_inc", "must be positive"));
        }
        for (name, value) in [
            ("open_acc", self.open_acc),
            ("total_acc", self.total_acc),
            ("inq_last_6mths", self.inq_last_6mths),
        ] {
            if value < 0.0 {
                return Err(Error::validation(name, "must not be negative"));
            }
        }
        Ok(())
    }

    /// Projects the request into the trained column order. Every expected
    /// column must be present; a missing one is a hard validation failure
    /// raised before inference.
    pub fn project(&self) -> Result<FeatureRow> {
        let mut fields = self.fields();
        let mut columns = Vec::with_capacity(EXPECTED_COLUMNS.len());

        for name in EXPECTED_COLUMNS {
            let position = fields
                .iter()
                .position(|(col, _)| *col == name)
                .ok_or_else(|| Error::validation(name, "required field is missing"))?;
            let (_, value) = fields.swap_remove(position);
            columns.push((name, value));
        }

        Ok(FeatureRow { columns })
    }
}

/// Maps a default probability to a risk band. Thresholds per the
/// pre-screening policy: below 0.20 approve, below 0.50 route to manual
/// review, otherwise reject.
pub fn risk_band(probability: f64) -> (RiskLevel, Decision) {
    if probability < 0.2 {
        (RiskLevel::Low, Decision::Approve)
    } else if probability < 0.5 {
        (RiskLevel::Medium, Decision::ManualReview)
    } else {
        (RiskLevel::High, Decision::Reject)
    }
}

/// Display score: probability truncated to an integer percentage. Capped at
/// 99 so the wire contract stays in 0..=99 even for probability 1.0.
pub fn risk_score(probability: f64) -> u8 {
    ((probability * 100.0).floor() as u8).min(99)
}

/// Rounds half away from zero to three decimal places.
pub fn round_probability(probability: f64) -> f64 {
    (probability * 1000.0).round() / 1000.0
}

/// The scoring pipeline: one immutable classifier behind the [`Estimator`]
/// seam, constructed once at startup and shared read-only across requests.
pub struct Scorer {
    estimator: Box<dyn Estimator>,
}

impl Scorer {
    pub fn new(estimator: impl Estimator + 'static) -> Self {
        Self {
            estimator: Box::new(estimator),
        }
    }

    pub fn score(&self, request: &ScoringRequest) -> Result<ScoringResponse> {
        request.validate()?;
        let row = request.project()?;

        let proba = self.estimator.predict_proba(&row)?;
        let probability = proba[1];
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(Error::inference(format!(
                "classifier produced probability {probability} outside [0, 1]"
            )));
        }

        let (risk_level, decision_recommendation) = risk_band(probability);

        Ok(ScoringResponse {
            default_probability: round_probability(probability),
            risk_score: risk_score(probability),
            risk_level,
            decision_recommendation,
        })
    }
}
