//! Feature schema and vector types.
//!
//! The schema is the fixed, ordered set of numeric columns the classifier
//! was trained on. It is declared by the model artifact and shared
//! read-only across all analysis calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Ordered feature column names declared by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from ordered column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column in the schema, if declared.
    #[must_use]
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Numeric vector aligned to a [`FeatureSchema`].
///
/// Invariant: `values.len() == schema.len()`, enforced at construction.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    values: Vec<f64>,
    #[serde(skip)]
    schema: Arc<FeatureSchema>,
}

impl FeatureVector {
    /// Create a vector aligned to the given schema.
    ///
    /// # Errors
    /// Returns an error message if the value count does not match the schema.
    pub fn new(schema: Arc<FeatureSchema>, values: Vec<f64>) -> Result<Self, String> {
        if values.len() != schema.len() {
            return Err(format!(
                "Feature count mismatch: got {}, schema declares {}",
                values.len(),
                schema.len()
            ));
        }
        Ok(Self { values, schema })
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Value of a named column, if the schema declares it.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<f64> {
        self.schema.index_of(column).map(|i| self.values[i])
    }

    /// Iterate over `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.schema
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Arc<FeatureSchema> {
        Arc::new(FeatureSchema::new(vec![
            "Age".to_string(),
            "BMI".to_string(),
        ]))
    }

    #[test]
    fn test_vector_must_match_schema() {
        assert!(FeatureVector::new(schema(), vec![35.0, 24.2]).is_ok());
        assert!(FeatureVector::new(schema(), vec![35.0]).is_err());
    }

    #[test]
    fn test_named_lookup() {
        let vector = FeatureVector::new(schema(), vec![35.0, 24.2]).expect("Should build");
        assert_eq!(vector.value("BMI"), Some(24.2));
        assert_eq!(vector.value("Pulse"), None);
    }
}
