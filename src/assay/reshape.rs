//! src/assay/reshape.rs
//!
//! Wide table → long observations.
//!
//! A panel selects four wide columns, melts them column by column into
//! `(variable, value)` rows, then splits each variable into its test and odor.

use color_eyre::{
    Result,
    eyre::{bail, eyre},
};
use tracing::debug;

use super::data::Test;

/// Named columns of measurements. Column order is preserved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WideTable {
    columns: Vec<(String, Vec<f64>)>,
}

impl WideTable {
    pub fn from_columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Row count of a rectangular table (0 when empty).
    pub fn rows(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    /// Build a sub-table from `names`, in the given order.
    ///
    /// Fails when a column is missing or when the selected columns do not all
    /// have the same length.
    pub fn select(&self, names: &[&str]) -> Result<WideTable> {
        let mut columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(names.len());
        for &name in names {
            let values = self.column(name).ok_or_else(|| {
                let known: Vec<&str> = self.names().collect();
                eyre!("no column named {name} (have {})", known.join(", "))
            })?;
            if let Some((first, first_values)) = columns.first() {
                let expected = first_values.len();
                if expected != values.len() {
                    bail!(
                        "column {name} has {} rows but {first} has {expected}",
                        values.len()
                    );
                }
            }
            columns.push((name.to_string(), values.to_vec()));
        }
        Ok(WideTable { columns })
    }
}

/// One melted cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MeltedRow {
    pub variable: String,
    pub value: f64,
}

/// One long-format measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub odor: String,
    pub test: Test,
    pub licks: f64,
}

/// Stack every column on top of the next: all rows of column 0, then column 1, ...
pub fn melt(table: &WideTable) -> Vec<MeltedRow> {
    table
        .columns
        .iter()
        .flat_map(|(name, values)| {
            values.iter().map(move |&value| MeltedRow {
                variable: name.clone(),
                value,
            })
        })
        .collect()
}

/// Split `Pre_Ethyl` style variables into test and odor.
pub fn split_test_odor(rows: Vec<MeltedRow>) -> Result<Vec<Observation>> {
    rows.into_iter()
        .map(|row| -> Result<Observation> {
            let (prefix, odor) = row
                .variable
                .split_once('_')
                .ok_or_else(|| eyre!("column {} is not <Test>_<Odor>", row.variable))?;
            let test = Test::parse(prefix)
                .ok_or_else(|| eyre!("column {} has unknown test {prefix}", row.variable))?;
            if odor.is_empty() {
                bail!("column {} has no odor name", row.variable);
            }
            Ok(Observation {
                odor: odor.to_string(),
                test,
                licks: row.value,
            })
        })
        .collect()
}

/// select → melt → split, for one panel.
pub fn long_format(table: &WideTable, columns: &[&str]) -> Result<Vec<Observation>> {
    let frame = table.select(columns)?;
    let observations = split_test_odor(melt(&frame))?;
    debug!(
        columns = ?columns,
        rows = frame.rows(),
        observations = observations.len(),
        "reshaped panel frame"
    );
    Ok(observations)
}
