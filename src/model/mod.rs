use crate::scoring::{FeatureRow, FeatureValue};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Seam between the scoring pipeline and the underlying classifier. Index 1
/// of the returned distribution is the positive (default) class.
pub trait Estimator: Send + Sync {
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2]>;
}

/// Pre-trained classifier deserialized from the artifact file: a
/// standardized logistic model over the trained feature order, with a
/// weight table per categorical vocabulary. Loaded once at process start
/// and never mutated afterwards.
#[derive(Debug, Deserialize)]
pub struct Classifier {
    feature_order: Vec<String>,
    intercept: f64,
    #[serde(default)]
    numeric: HashMap<String, NumericTerm>,
    #[serde(default)]
    categorical: HashMap<String, HashMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
struct NumericTerm {
    mean: f64,
    scale: f64,
    weight: f64,
}

impl Classifier {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read(path.as_ref()).await?;
        Self::from_artifact_bytes(&raw)
    }

    pub fn from_artifact_bytes(raw: &[u8]) -> Result<Self> {
        let classifier: Classifier = serde_json::from_slice(raw)?;
        classifier.check()?;
        debug!(
            "Deserialized classifier artifact with {} features",
            classifier.feature_order.len()
        );
        Ok(classifier)
    }

    /// Structural checks on the artifact itself. A model that refers to a
    /// column it carries no term for, or a degenerate standardization
    /// scale, is a corrupted artifact.
    fn check(&self) -> Result<()> {
        if self.feature_order.is_empty() {
            return Err(Error::inference("artifact declares no features"));
        }
        if !self.intercept.is_finite() {
            return Err(Error::inference("artifact intercept is not finite"));
        }
        for name in &self.feature_order {
            if !self.numeric.contains_key(name) && !self.categorical.contains_key(name) {
                return Err(Error::inference(format!(
                    "artifact carries no term for column '{name}'"
                )));
            }
        }
        for (name, term) in &self.numeric {
            if !term.scale.is_finite() || term.scale <= 0.0 {
                return Err(Error::inference(format!(
                    "artifact has degenerate scale for column '{name}'"
                )));
            }
            if !term.mean.is_finite() || !term.weight.is_finite() {
                return Err(Error::inference(format!(
                    "artifact has non-finite term for column '{name}'"
                )));
            }
        }
        Ok(())
    }
}

impl Estimator for Classifier {
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2]> {
        let mut z = self.intercept;

        for name in &self.feature_order {
            let value = row.get(name).ok_or_else(|| {
                Error::inference(format!("scoring row is missing column '{name}'"))
            })?;

            if let Some(term) = self.numeric.get(name) {
                let FeatureValue::Number(x) = value else {
                    return Err(Error::inference(format!(
                        "column '{name}' expected a numeric value"
                    )));
                };
                z += term.weight * (x - term.mean) / term.scale;
            } else if let Some(vocab) = self.categorical.get(name) {
                let FeatureValue::Category(label) = value else {
                    return Err(Error::inference(format!(
                        "column '{name}' expected a categorical value"
                    )));
                };
                match vocab.get(label) {
                    Some(weight) => z += weight,
                    // Known weakness carried over from the trained pipeline:
                    // unseen categories score with zero contribution instead
                    // of failing. Surfaced in the logs only.
                    None => warn!(
                        column = name.as_str(),
                        value = label.as_str(),
                        "categorical value outside trained vocabulary, scoring with zero contribution"
                    ),
                }
            }
        }

        let positive = 1.0 / (1.0 + (-z).exp());
        if !positive.is_finite() {
            return Err(Error::inference(format!(
                "logistic score {z} produced a non-finite probability"
            )));
        }

        Ok([1.0 - positive, positive])
    }
}
