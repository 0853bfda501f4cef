//! Serialized forms of a [`ProjectionSeries`]
//!
//! JSON comes in two orientations: `columns` (one array per key) and `records`
//! (one object per time step). CSV always uses the records layout.

use crate::projection::{ProjectionRecord, ProjectionSeries};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown orientation: {0:?} (expected \"columns\" or \"records\")")]
    UnknownOrientation(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Layout of JSON output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Columns,
    Records,
}

impl FromStr for Orientation {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "columns" => Ok(Orientation::Columns),
            "records" => Ok(Orientation::Records),
            other => Err(ExportError::UnknownOrientation(other.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Columns => f.write_str("columns"),
            Orientation::Records => f.write_str("records"),
        }
    }
}

pub fn to_json_value(
    series: &ProjectionSeries,
    orientation: Orientation,
) -> Result<serde_json::Value, ExportError> {
    let value = match orientation {
        Orientation::Columns => serde_json::to_value(series)?,
        Orientation::Records => {
            serde_json::to_value(series.records().collect::<Vec<ProjectionRecord>>())?
        }
    };
    Ok(value)
}

pub fn to_json(series: &ProjectionSeries, orientation: Orientation) -> Result<String, ExportError> {
    Ok(to_json_value(series, orientation)?.to_string())
}

/// Pretty-printed JSON to any writer
pub fn write_json<W: Write>(
    series: &ProjectionSeries,
    orientation: Orientation,
    mut writer: W,
) -> Result<(), ExportError> {
    let value = to_json_value(series, orientation)?;
    serde_json::to_writer_pretty(&mut writer, &value)?;
    writeln!(writer)?;
    Ok(())
}

/// CSV with a header row, one line per time step
pub fn write_csv<W: Write>(series: &ProjectionSeries, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in series.records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ProjectionParameters;
    use crate::projection::{CostProjector, ProjectionConfig};

    fn short_series() -> ProjectionSeries {
        CostProjector::new(ProjectionConfig { steps: 2 })
            .project(&ProjectionParameters::default())
            .unwrap()
    }

    #[test]
    fn test_records_json() {
        let value = to_json_value(&short_series(), Orientation::Records).unwrap();
        let rows = value.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["year"], 1.0);
        assert_eq!(rows[1]["month"], 12);
        assert_eq!(rows[1]["cost_leasing"], 4280.0);
        assert_eq!(rows[0]["cost_new_purchase"], 31000.0);
    }

    #[test]
    fn test_columns_json() {
        let value = to_json_value(&short_series(), Orientation::Columns).unwrap();

        assert_eq!(value["year"], serde_json::json!([0.5, 1.0]));
        assert_eq!(value["month"], serde_json::json!([6, 12]));
        assert_eq!(value["cost_used_purchase"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_both_orientations_carry_same_values() {
        let series = short_series();
        let records = to_json_value(&series, Orientation::Records).unwrap();
        let columns = to_json_value(&series, Orientation::Columns).unwrap();

        for key in ["year", "month", "cost_used_purchase", "cost_new_purchase", "cost_leasing"] {
            for idx in 0..series.len() {
                assert_eq!(records[idx][key], columns[key][idx], "{} at {}", key, idx);
            }
        }
    }

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        write_csv(&short_series(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "year,month,cost_used_purchase,cost_new_purchase,cost_leasing");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("1.0,12,"));
        assert!(lines[2].ends_with(",4280.0"));
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("records".parse::<Orientation>().unwrap(), Orientation::Records);
        assert_eq!("columns".parse::<Orientation>().unwrap(), Orientation::Columns);
        assert!(matches!(
            "rows".parse::<Orientation>(),
            Err(ExportError::UnknownOrientation(s)) if s == "rows"
        ));
    }
}
