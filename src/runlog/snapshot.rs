//! Snapshot - columnar, step-aligned view of a run
//!
//! ## JSON Form
//!
//! ```text
//! {"step": [0, 1], "loss": [1.0, 0.8], "acc": [0.5, null]}
//! ```
//!
//! An empty run is written as `{"step": [], "metrics": {}}`. Non-finite
//! values are written as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`
//! so a diverged metric is not mistaken for a missing one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::STEP_COLUMN;
use crate::{Error, Result};

/// Key used by the empty-run marker.
const EMPTY_MARKER: &str = "metrics";

const NAN: &str = "NaN";
const POS_INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

fn encode_value(value: Option<f64>) -> Value {
    match value {
        None => Value::Null,
        Some(v) if v.is_nan() => Value::String(NAN.to_string()),
        Some(v) if v == f64::INFINITY => Value::String(POS_INFINITY.to_string()),
        Some(v) if v == f64::NEG_INFINITY => Value::String(NEG_INFINITY.to_string()),
        Some(v) => Value::from(v),
    }
}

fn decode_value(column: &str, item: Value) -> Result<Option<f64>> {
    match item {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::MalformedColumn(column.to_string())),
        Value::String(s) => match s.as_str() {
            NAN => Ok(Some(f64::NAN)),
            POS_INFINITY => Ok(Some(f64::INFINITY)),
            NEG_INFINITY => Ok(Some(f64::NEG_INFINITY)),
            _ => Err(Error::MalformedColumn(column.to_string())),
        },
        _ => Err(Error::MalformedColumn(column.to_string())),
    }
}

/// One metric column aligned to the snapshot's step sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

impl Column {
    /// Metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values aligned to the step sequence; `None` where the step lacks the metric.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

/// Columnar view of a run: ascending steps plus aligned metric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawSnapshot", try_from = "RawSnapshot")]
pub struct Snapshot {
    steps: Vec<i64>,
    columns: Vec<Column>,
}

impl Snapshot {
    /// Create an empty snapshot (no steps, no metrics).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            steps: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Create a snapshot from a step column with no metric columns yet.
    #[must_use]
    pub fn with_steps(steps: Vec<i64>) -> Self {
        Self {
            steps,
            columns: Vec::new(),
        }
    }

    /// Append a metric column.
    ///
    /// # Errors
    ///
    /// - `Error::AlreadyExists` if `name` is `step` or already a column
    /// - `Error::ColumnLengthMismatch` if `values` is not aligned with the steps
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        if name == STEP_COLUMN || self.column(&name).is_some() {
            return Err(Error::AlreadyExists(name));
        }
        if values.len() != self.steps.len() {
            return Err(Error::ColumnLengthMismatch {
                column: name,
                expected: self.steps.len(),
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Builder-style variant of [`push_column`](Self::push_column).
    ///
    /// # Errors
    ///
    /// Same as [`push_column`](Self::push_column).
    pub fn column_with(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
    ) -> Result<Self> {
        self.push_column(name, values.into_iter().map(Some).collect())?;
        Ok(self)
    }

    /// Assemble a snapshot whose columns are already aligned and uniquely
    /// named.
    pub(crate) fn from_parts(steps: Vec<i64>, columns: Vec<(String, Vec<Option<f64>>)>) -> Self {
        debug_assert!(columns.iter().all(|(_, values)| values.len() == steps.len()));
        Self {
            steps,
            columns: columns
                .into_iter()
                .map(|(name, values)| Column { name, values })
                .collect(),
        }
    }

    /// Ascending step indices.
    #[must_use]
    pub fn steps(&self) -> &[i64] {
        &self.steps
    }

    /// Values of one metric column, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// All metric columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Metric column names in order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Check if the snapshot holds no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Metric values present at row `index`, skipping `None` cells.
    pub(crate) fn row(&self, index: usize) -> Vec<(String, f64)> {
        self.columns
            .iter()
            .filter_map(|c| {
                c.values
                    .get(index)
                    .copied()
                    .flatten()
                    .map(|v| (c.name.clone(), v))
            })
            .collect()
    }

    /// Parse the JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for invalid JSON, or the snapshot validation
    /// errors (`MissingStepColumn`, `ColumnLengthMismatch`, `MalformedColumn`).
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Render the JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Wire shape: the step column plus every other key as a metric column.
#[derive(Serialize, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    step: Option<Vec<i64>>,
    #[serde(flatten)]
    columns: Map<String, Value>,
}

impl From<Snapshot> for RawSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        let mut columns = Map::new();
        if snapshot.steps.is_empty() {
            columns.insert(EMPTY_MARKER.to_string(), Value::Object(Map::new()));
        }
        for column in snapshot.columns {
            let values = column.values.into_iter().map(encode_value).collect();
            columns.insert(column.name, Value::Array(values));
        }
        Self {
            step: Some(snapshot.steps),
            columns,
        }
    }
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = Error;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        let steps = raw.step.ok_or(Error::MissingStepColumn)?;
        let mut snapshot = Self::with_steps(steps);

        for (name, value) in raw.columns {
            match value {
                Value::Object(ref marker) if name == EMPTY_MARKER && marker.is_empty() => {}
                Value::Array(items) => {
                    let values = items
                        .into_iter()
                        .map(|item| decode_value(&name, item))
                        .collect::<Result<Vec<_>>>()?;
                    snapshot.push_column(name, values)?;
                }
                _ => return Err(Error::MalformedColumn(name)),
            }
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_json() {
        let json = Snapshot::empty().to_json().unwrap();
        assert_eq!(json, r#"{"step":[],"metrics":{}}"#);
    }

    #[test]
    fn test_snapshot_json_keeps_column_order() {
        let snapshot = Snapshot::with_steps(vec![0, 1])
            .column_with("loss", [1.0, 0.8])
            .unwrap()
            .column_with("acc", [0.5, 0.6])
            .unwrap();

        let json = snapshot.to_json().unwrap();
        assert_eq!(json, r#"{"step":[0,1],"loss":[1.0,0.8],"acc":[0.5,0.6]}"#);

        let parsed = Snapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_missing_step_column() {
        let err = Snapshot::from_json(r#"{"loss":[1.0]}"#).unwrap_err();
        assert!(matches!(err, Error::MissingStepColumn));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Snapshot::from_json(r#"{"step":[0,1],"loss":[1.0]}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnLengthMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_null_cells() {
        let snapshot = Snapshot::from_json(r#"{"step":[0,1],"acc":[0.9,null]}"#).unwrap();
        assert_eq!(snapshot.column("acc"), Some(&[Some(0.9), None][..]));
        assert_eq!(snapshot.row(1), Vec::<(String, f64)>::new());
    }

    #[test]
    fn test_malformed_column() {
        let err = Snapshot::from_json(r#"{"step":[0],"loss":["high"]}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedColumn(name) if name == "loss"));
    }

    #[test]
    fn test_non_finite_values_survive_json() {
        let snapshot = Snapshot::with_steps(vec![0, 1, 2])
            .column_with("loss", [f64::NAN, f64::INFINITY, f64::NEG_INFINITY])
            .unwrap();

        let json = snapshot.to_json().unwrap();
        assert_eq!(json, r#"{"step":[0,1,2],"loss":["NaN","Infinity","-Infinity"]}"#);

        let parsed = Snapshot::from_json(&json).unwrap();
        let loss = parsed.column("loss").unwrap();
        assert!(loss[0].is_some_and(f64::is_nan));
        assert_eq!(loss[1], Some(f64::INFINITY));
        assert_eq!(loss[2], Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_steps_without_columns_have_no_marker() {
        let snapshot = Snapshot::with_steps(vec![0, 1]);
        assert_eq!(snapshot.to_json().unwrap(), r#"{"step":[0,1]}"#);

        let parsed = Snapshot::from_json(r#"{"step":[0,1]}"#).unwrap();
        assert_eq!(parsed.steps(), &[0, 1]);
        assert_eq!(parsed.columns().len(), 0);
    }

    #[test]
    fn test_step_name_is_reserved() {
        let mut snapshot = Snapshot::with_steps(vec![0]);
        let err = snapshot.push_column("step", vec![Some(1.0)]).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }
}
