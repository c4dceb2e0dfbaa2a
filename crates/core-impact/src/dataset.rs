use crate::error::{
    self as dataset_error, DatasetError, DatasetResult, EmptyFieldSnafu, NonPositiveValueSnafu,
};
use crate::models::{Catalog, ReferenceRow};
use csv::{ReaderBuilder, Trim};
use indexmap::{IndexMap, IndexSet};
use snafu::{ResultExt, ensure};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// First line of data, the header occupies line 1.
const FIRST_DATA_LINE: u64 = 2;

/// Key of a model and query type pair.
///
/// The key is a plain concatenation, so pairs whose names contain `_` can
/// collide: `("A_B", "C")` and `("A", "B_C")` share a group and their rows
/// are averaged together.
#[must_use]
pub fn lookup_key(model: &str, query_type: &str) -> String {
    format!("{model}_{query_type}")
}

/// Reference rows grouped by `model_querytype`, in file order.
///
/// Built once at start-up and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    groups: IndexMap<String, Vec<ReferenceRow>>,
}

impl ReferenceTable {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the dataset at `path`.
    ///
    /// A file that can't be opened is not fatal: it is reported once at warn
    /// level and an empty table is returned, so every later lookup misses.
    /// Malformed content is an error.
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(dataset_error::DataUnavailableSnafu {
            path: path.display().to_string(),
        });
        match file {
            Ok(file) => {
                let table = Self::from_reader(file)?;
                tracing::info!(
                    path = %path.display(),
                    rows = table.row_count(),
                    combinations = table.len(),
                    "Reference dataset loaded"
                );
                Ok(table)
            }
            Err(err @ DatasetError::DataUnavailable { .. }) => {
                tracing::warn!("{err}, continuing with an empty reference table");
                Ok(Self::empty())
            }
            Err(err) => Err(err),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> DatasetResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut table = Self::empty();
        for (line, record) in (FIRST_DATA_LINE..).zip(reader.deserialize()) {
            let row: ReferenceRow = record.context(dataset_error::CsvSnafu)?;
            verify_row(&row, line)?;
            table.insert(row);
        }
        Ok(table)
    }

    /// Builds a table from rows that are already known to be valid.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = ReferenceRow>) -> Self {
        let mut table = Self::empty();
        for row in rows {
            table.insert(row);
        }
        table
    }

    fn insert(&mut self, row: ReferenceRow) {
        self.groups
            .entry(lookup_key(&row.model, &row.query_type))
            .or_default()
            .push(row);
    }

    /// Rows sharing the exact (case-sensitive) model and query type.
    #[must_use]
    pub fn get(&self, model: &str, query_type: &str) -> Option<&[ReferenceRow]> {
        self.groups
            .get(&lookup_key(model, query_type))
            .map(Vec::as_slice)
            .filter(|rows| !rows.is_empty())
    }

    /// Number of distinct combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = &ReferenceRow> {
        self.groups.values().flatten()
    }

    #[must_use]
    pub fn models(&self) -> Vec<String> {
        distinct(self.rows().map(|row| row.model.as_str()))
    }

    #[must_use]
    pub fn query_types(&self) -> Vec<String> {
        distinct(self.rows().map(|row| row.query_type.as_str()))
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog {
            models: self.models(),
            query_types: self.query_types(),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

fn verify_row(row: &ReferenceRow, line: u64) -> DatasetResult<()> {
    for (column, value) in [("modelo", &row.model), ("tipo_consulta", &row.query_type)] {
        ensure!(!value.is_empty(), EmptyFieldSnafu { line, column });
    }
    for (column, value) in [
        ("agua(L)", row.water_liters),
        ("energia(kWh)", row.energy_kwh),
        ("carbono(gCO2e)", row.carbon_grams_co2e),
    ] {
        ensure!(
            value.is_finite() && value > 0.0,
            NonPositiveValueSnafu {
                line,
                column,
                value
            }
        );
    }
    Ok(())
}
