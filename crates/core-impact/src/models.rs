use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One measured (or estimated) impact sample, as read from the dataset.
///
/// Column names follow the dataset header; `unidad_medida` and the
/// precomputed `eq_*` columns are optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "tipo_consulta")]
    pub query_type: String,
    #[serde(rename = "agua(L)")]
    pub water_liters: f64,
    #[serde(rename = "energia(kWh)")]
    pub energy_kwh: f64,
    #[serde(rename = "carbono(gCO2e)")]
    pub carbon_grams_co2e: f64,
    #[serde(rename = "unidad_medida", default)]
    pub unit_label: String,
    #[serde(rename = "eq_agua", default)]
    pub water_equivalence: Option<String>,
    #[serde(rename = "eq_energia", default)]
    pub energy_equivalence: Option<String>,
    #[serde(rename = "eq_co2", default)]
    pub carbon_equivalence: Option<String>,
}

impl ReferenceRow {
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        query_type: impl Into<String>,
        water_liters: f64,
        energy_kwh: f64,
        carbon_grams_co2e: f64,
        unit_label: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            query_type: query_type.into(),
            water_liters,
            energy_kwh,
            carbon_grams_co2e,
            unit_label: unit_label.into(),
            water_equivalence: None,
            energy_equivalence: None,
            carbon_equivalence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Equivalences {
    #[serde(rename = "eq_agua")]
    pub water: String,
    #[serde(rename = "eq_energia")]
    pub energy: String,
    #[serde(rename = "eq_co2")]
    pub carbon: String,
}

/// Outcome of a successful calculation. Totals are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImpactEstimate {
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "tipo_consulta")]
    pub query_type: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "cantidad_formateada")]
    pub quantity_description: String,
    #[serde(rename = "unidad")]
    pub unit_label: String,
    #[serde(rename = "agua")]
    pub water_liters: f64,
    #[serde(rename = "energia")]
    pub energy_kwh: f64,
    #[serde(rename = "co2")]
    pub carbon_grams_co2e: f64,
    #[serde(flatten)]
    pub equivalences: Equivalences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub models: Vec<String>,
    pub query_types: Vec<String>,
}
