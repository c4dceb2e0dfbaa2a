use core_impact::calculator::parse_quantity;
use core_impact::error::{CalculatorError, CalculatorResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /api/calcular`. Missing fields are tolerated so the
/// calculator can report them with its own error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculatePayload {
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub tipo_consulta: String,
    /// A JSON number or a numeric string.
    #[serde(default)]
    pub cantidad: Option<Value>,
}

impl CalculatePayload {
    pub fn quantity(&self) -> CalculatorResult<f64> {
        match &self.cantidad {
            Some(Value::Number(number)) => number.as_f64().ok_or(CalculatorError::InvalidQuantity),
            Some(Value::String(raw)) => parse_quantity(raw),
            _ => Err(CalculatorError::InvalidQuantity),
        }
    }
}
