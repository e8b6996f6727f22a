#[cfg(feature = "parallel-rows")]
use rayon::prelude::*;
use tracing::debug;

use crate::core::{OptionMap, OptionValue};
use crate::error::{LiteralError, LiteralResult};

/// Column-oriented table with named columns and row-major cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<OptionValue>>,
}

impl Frame {
    /// Builds a frame, rejecting rows whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<OptionValue>>) -> LiteralResult<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(LiteralError::InvalidData(format!(
                "frame row {index} has {} cells, expected {}",
                row.len(),
                columns.len()
            )));
        }
        for (index, name) in columns.iter().enumerate() {
            if columns[..index].contains(name) {
                return Err(LiteralError::InvalidData(format!(
                    "frame column `{name}` is duplicated"
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Extracts one column as a named series.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Series> {
        let index = self.columns.iter().position(|column| column == name)?;
        let values = self.rows.iter().map(|row| row[index].clone()).collect();
        Some(Series::new(name, values))
    }

    /// One object per row, keys in column order.
    #[must_use]
    pub fn records(&self) -> Vec<OptionValue> {
        #[cfg(feature = "parallel-rows")]
        {
            self.rows.par_iter().map(|row| self.record(row)).collect()
        }

        #[cfg(not(feature = "parallel-rows"))]
        {
            self.rows.iter().map(|row| self.record(row)).collect()
        }
    }

    fn record(&self, row: &[OptionValue]) -> OptionValue {
        let map: OptionMap = self
            .columns
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect();
        OptionValue::Object(map)
    }
}

/// One-dimensional named sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<OptionValue>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<OptionValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[OptionValue] {
        &self.values
    }

    /// `[index, value]` pairs, the shape most category/time axes expect.
    ///
    /// Extra values past the end of `index` are dropped.
    #[must_use]
    pub fn pairs(&self, index: &[OptionValue]) -> Vec<OptionValue> {
        index
            .iter()
            .zip(&self.values)
            .map(|(key, value)| OptionValue::Array(vec![key.clone(), value.clone()]))
            .collect()
    }
}

/// Tabular input accepted by option builders.
#[derive(Debug, Clone, PartialEq)]
pub enum TabularSource {
    Frame(Frame),
    Series(Series),
    Array(Vec<OptionValue>),
}

impl TabularSource {
    /// Flattens the source into the ordered sequence placed under `data`.
    #[must_use]
    pub fn to_sequence(&self) -> Vec<OptionValue> {
        let out = match self {
            Self::Frame(frame) => frame.records(),
            Self::Series(series) => series.values.clone(),
            Self::Array(values) => values.clone(),
        };
        debug!(kind = self.kind(), len = out.len(), "tabular source flattened");
        out
    }

    #[must_use]
    pub fn to_option_value(&self) -> OptionValue {
        OptionValue::Array(self.to_sequence())
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Frame(_) => "frame",
            Self::Series(_) => "series",
            Self::Array(_) => "array",
        }
    }
}

impl From<Frame> for TabularSource {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

impl From<Series> for TabularSource {
    fn from(series: Series) -> Self {
        Self::Series(series)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for TabularSource {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}
