use core_impact::error::CalculatorResult;
use core_impact::parse_quantity;
use serde::{Deserialize, Serialize};

/// Fields posted by the calculator form. Missing fields deserialize as
/// empty strings so the calculator reports them instead of the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateForm {
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub tipo_consulta: String,
    #[serde(default)]
    pub cantidad: String,
}

impl CalculateForm {
    pub fn quantity(&self) -> CalculatorResult<f64> {
        parse_quantity(&self.cantidad)
    }
}
