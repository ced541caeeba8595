//! Scaler plus logistic-regression pipeline loaded from a JSON artifact.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::encoder::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use super::predictor::{Predictor, PredictorError};

/// Exported classifier: standardize each column, then apply a logistic model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPipeline {
    pub feature_names: Vec<String>,
    pub scaler: StandardScaler,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Labels returned for the negative and positive class.
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

impl LinearPipeline {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelLoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ModelLoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let pipeline = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "loaded linear pipeline artifact");
        Ok(pipeline)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let pipeline: Self = serde_json::from_reader(reader)?;
        pipeline.check_schema()?;
        Ok(pipeline)
    }

    fn check_schema(&self) -> Result<(), ModelLoadError> {
        let names_match = self.feature_names.len() == FEATURE_COUNT
            && self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .all(|(actual, expected)| actual == expected);
        if !names_match {
            return Err(ModelLoadError::Schema(format!(
                "feature columns [{}] do not match [{}]",
                self.feature_names.join(", "),
                FEATURE_NAMES.join(", ")
            )));
        }

        for (label, len) in [
            ("coefficients", self.coefficients.len()),
            ("scaler.mean", self.scaler.mean.len()),
            ("scaler.scale", self.scaler.scale.len()),
        ] {
            if len != FEATURE_COUNT {
                return Err(ModelLoadError::Schema(format!(
                    "{label} has {len} entries, expected {FEATURE_COUNT}"
                )));
            }
        }

        if let Some(column) = self
            .scaler
            .scale
            .iter()
            .position(|scale| *scale == 0.0 || !scale.is_finite())
        {
            return Err(ModelLoadError::Schema(format!(
                "scaler.scale for {} must be finite and non-zero",
                FEATURE_NAMES[column]
            )));
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelLoadError::Schema(format!(
                "threshold {} must lie in [0, 1]",
                self.threshold
            )));
        }

        Ok(())
    }

    /// Probability of the positive class.
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, PredictorError> {
        let width = self
            .coefficients
            .len()
            .min(self.scaler.mean.len())
            .min(self.scaler.scale.len());
        if width != FEATURE_COUNT {
            return Err(PredictorError::SchemaMismatch {
                expected: width,
                found: FEATURE_COUNT,
            });
        }

        let logit = features
            .values()
            .iter()
            .enumerate()
            .fold(self.intercept, |acc, (column, value)| {
                let standardized =
                    (*value as f64 - self.scaler.mean[column]) / self.scaler.scale[column];
                acc + self.coefficients[column] * standardized
            });

        let probability = 1.0 / (1.0 + (-logit).exp());
        if probability.is_finite() {
            Ok(probability)
        } else {
            Err(PredictorError::Internal(format!(
                "model produced a non-finite score ({logit})"
            )))
        }
    }
}

impl Predictor for LinearPipeline {
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictorError> {
        let probability = self.probability(features)?;
        let [negative, positive] = self.classes;
        Ok(if probability >= self.threshold {
            positive
        } else {
            negative
        })
    }
}

/// Failure to load or accept a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model file not found at {}; ensure the artifact is in the configured location", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("model artifact does not match the applicant schema: {0}")]
    Schema(String),
}
