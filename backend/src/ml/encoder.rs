//! Categorical label encoding
//!
//! A sorted class table mapping categorical values to integer codes and
//! back, mirroring the encoders the classifiers were trained with.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Categorical-to-integer lookup table paired with a trained classifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder over a column of values. Classes are normalized
    /// (trimmed, lowercased), deduplicated, and sorted.
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values
            .into_iter()
            .map(|value| normalize(value.as_ref()))
            .collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Encode a value; a value outside the trained classes is a
    /// validation error, never a panic.
    pub fn transform(&self, field: &str, value: &str) -> AppResult<usize> {
        let needle = normalize(value);
        self.classes
            .binary_search(&needle)
            .map_err(|_| AppError::UnknownCategory {
                field: field.to_string(),
                value: value.to_string(),
            })
    }

    /// Decode a class index back to its label.
    pub fn inverse_transform(&self, index: usize) -> AppResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                AppError::Internal(format!("encoded class {} out of range", index))
            })
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
