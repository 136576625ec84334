use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicant and loan attributes submitted for pre-screening. All twelve
/// fields are required; extra fields are rejected at the wire boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringRequest {
    pub loan_amnt: f64,
    pub term: String,
    pub int_rate: f64,
    pub fico_range_low: f64,
    pub annual_inc: f64,
    pub dti: f64,
    pub emp_length: String,
    pub purpose: String,
    pub open_acc: f64,
    pub total_acc: f64,
    pub revol_util: f64,
    pub inq_last_6mths: f64,
}

/// Classification returned to the intake side. Constructed per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub default_probability: f64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub decision_recommendation: Decision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    #[serde(rename = "Manual Review")]
    ManualReview,
    Reject,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => write!(f, "Approve"),
            Decision::ManualReview => write!(f, "Manual Review"),
            Decision::Reject => write!(f, "Reject"),
        }
    }
}
