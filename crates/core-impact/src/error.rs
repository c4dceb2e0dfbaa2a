use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum DatasetError {
    #[snafu(display("Reference dataset unavailable at {path}: {source}"))]
    DataUnavailable {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Malformed reference dataset: {source}"))]
    Csv { source: csv::Error },

    #[snafu(display("Reference dataset line {line}: column {column} is empty"))]
    EmptyField { line: u64, column: String },

    #[snafu(display(
        "Reference dataset line {line}: column {column} must be a positive number, got {value}"
    ))]
    NonPositiveValue {
        line: u64,
        column: String,
        value: f64,
    },
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;

#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum CalculatorError {
    #[snafu(display("Error: La cantidad debe ser un número positivo"))]
    InvalidQuantity,

    #[snafu(display(
        "Error: Combinación de modelo '{model}' y tipo '{query_type}' no encontrada"
    ))]
    CombinationNotFound { model: String, query_type: String },
}

pub type CalculatorResult<T> = std::result::Result<T, CalculatorError>;
