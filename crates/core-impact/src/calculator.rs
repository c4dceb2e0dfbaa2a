use crate::dataset::ReferenceTable;
use crate::equivalences::equivalences;
use crate::error::{CalculatorError, CalculatorResult, CombinationNotFoundSnafu};
use crate::models::{ImpactEstimate, ReferenceRow};
use snafu::{OptionExt, ensure};
use std::sync::Arc;

/// Descriptive noun phrase per query type, used in the quantity description.
pub const QUERY_TYPE_PHRASES: [(&str, &str); 5] = [
    ("texto", "respuesta(s) de texto"),
    ("código", "bloque(s) de código"),
    ("imagen", "imagen(es) generada"),
    ("audio", "minuto(s) de transcripción de audio"),
    ("video", "minuto(s) de video"),
];

const IMAGE_QUERY_TYPE: &str = "imagen";

/// Parses a user supplied quantity. Positivity is checked by
/// [`ImpactCalculator::calculate`].
pub fn parse_quantity(raw: &str) -> CalculatorResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|quantity| quantity.is_finite())
        .ok_or(CalculatorError::InvalidQuantity)
}

/// Rounds half away from zero to 2 decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Integer rendering when there is no fractional part, decimal otherwise.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        quantity.to_string()
    }
}

#[must_use]
#[allow(clippy::float_cmp)]
pub fn describe_quantity(query_type: &str, quantity: f64) -> String {
    let mut phrase = QUERY_TYPE_PHRASES
        .iter()
        .find(|(known, _)| *known == query_type)
        .map_or(query_type, |(_, phrase)| *phrase)
        .to_string();
    if query_type == IMAGE_QUERY_TYPE && quantity != 1.0 {
        phrase.push('s');
    }
    format!("{} {phrase}", format_quantity(quantity))
}

#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
fn mean(rows: &[ReferenceRow], value: impl Fn(&ReferenceRow) -> f64) -> f64 {
    rows.iter().map(value).sum::<f64>() / rows.len() as f64
}

/// Estimates impact from a shared, read-only reference table.
#[derive(Debug, Clone)]
pub struct ImpactCalculator {
    table: Arc<ReferenceTable>,
}

impl ImpactCalculator {
    #[must_use]
    pub const fn new(table: Arc<ReferenceTable>) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Averages every reference row of `model`/`query_type` and scales it by
    /// `quantity`.
    ///
    /// The quantity is validated before the lookup, so an invalid quantity is
    /// reported even for an unknown combination.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub fn calculate(
        &self,
        model: &str,
        query_type: &str,
        quantity: f64,
    ) -> CalculatorResult<ImpactEstimate> {
        ensure!(
            quantity.is_finite() && quantity > 0.0,
            crate::error::InvalidQuantitySnafu
        );
        let rows = self
            .table
            .get(model, query_type)
            .context(CombinationNotFoundSnafu { model, query_type })?;

        let water_liters = round2(mean(rows, |row| row.water_liters) * quantity);
        let energy_kwh = round2(mean(rows, |row| row.energy_kwh) * quantity);
        let carbon_grams_co2e = round2(mean(rows, |row| row.carbon_grams_co2e) * quantity);
        // Quantities near f64::MAX overflow once scaled
        ensure!(
            [water_liters, energy_kwh, carbon_grams_co2e]
                .iter()
                .all(|total| total.is_finite()),
            crate::error::InvalidQuantitySnafu
        );

        Ok(ImpactEstimate {
            model: model.to_string(),
            query_type: query_type.to_string(),
            quantity,
            quantity_description: describe_quantity(query_type, quantity),
            unit_label: rows[0].unit_label.clone(),
            water_liters,
            energy_kwh,
            carbon_grams_co2e,
            equivalences: equivalences(water_liters, energy_kwh, carbon_grams_co2e),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn calculator(rows: impl IntoIterator<Item = ReferenceRow>) -> ImpactCalculator {
        ImpactCalculator::new(Arc::new(ReferenceTable::from_rows(rows)))
    }

    fn sample() -> ImpactCalculator {
        calculator([
            ReferenceRow::new("GPT-4 Turbo", "texto", 0.15, 0.03, 6.0, "respuesta"),
            ReferenceRow::new("Claude 3", "imagen", 0.9, 0.12, 30.0, "imagen"),
            ReferenceRow::new("Claude 3", "código", 0.21, 0.05, 7.3, "bloque"),
            ReferenceRow::new("Claude 3", "audio", 0.4, 0.07, 14.0, "minuto"),
            ReferenceRow::new("Gemini 1.5", "video", 1.1, 0.2, 41.0, "minuto"),
        ])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_row_scenario() {
        let estimate = sample().calculate("GPT-4 Turbo", "texto", 5.0).unwrap();
        assert_eq!(estimate.model, "GPT-4 Turbo");
        assert_eq!(estimate.query_type, "texto");
        assert_eq!(estimate.quantity, 5.0);
        assert!(close(estimate.water_liters, 0.75));
        assert!(close(estimate.energy_kwh, 0.15));
        assert!(close(estimate.carbon_grams_co2e, 30.0));
        assert_eq!(estimate.quantity_description, "5 respuesta(s) de texto");
        assert_eq!(estimate.unit_label, "respuesta");
        assert_eq!(
            estimate.equivalences.water,
            "3.00 vasos de agua / 1.50 botellas de 500ml / 0.0100 duchas de 5 min"
        );
        assert_eq!(estimate.equivalences.carbon, "0.25000 km en auto");
    }

    #[test]
    fn test_repeated_measurements_are_averaged() {
        let calc = calculator([
            ReferenceRow::new("GPT-4 Turbo", "texto", 0.1, 0.02, 5.0, "respuesta"),
            ReferenceRow::new("GPT-4 Turbo", "texto", 0.3, 0.04, 7.0, "consulta"),
        ]);
        let estimate = calc.calculate("GPT-4 Turbo", "texto", 2.0).unwrap();
        assert!(close(estimate.water_liters, 0.4));
        assert!(close(estimate.energy_kwh, 0.06));
        assert!(close(estimate.carbon_grams_co2e, 12.0));
        // unit label comes from the first matching row
        assert_eq!(estimate.unit_label, "respuesta");
    }

    #[test]
    fn test_invalid_quantity_checked_first() {
        let calc = sample();
        for quantity in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                calc.calculate("GPT-4 Turbo", "texto", quantity),
                Err(CalculatorError::InvalidQuantity)
            );
            assert_eq!(
                calc.calculate("NoSuchModel", "tipo_invalido", quantity),
                Err(CalculatorError::InvalidQuantity)
            );
        }
    }

    #[test]
    fn test_unknown_combination() {
        let calc = sample();
        for (model, query_type) in [
            ("GPT-4 Turbo", "tipo_invalido"),
            ("NoSuchModel", "texto"),
            ("gpt-4 turbo", "texto"),
        ] {
            let err = calc.calculate(model, query_type, 5.0).unwrap_err();
            assert_eq!(
                err,
                CalculatorError::CombinationNotFound {
                    model: model.to_string(),
                    query_type: query_type.to_string(),
                }
            );
            assert!(err.to_string().contains("no encontrada"));
            assert!(err.to_string().contains(model));
        }
    }

    #[test]
    fn test_empty_table_never_matches() {
        let calc = ImpactCalculator::new(Arc::new(ReferenceTable::empty()));
        assert!(matches!(
            calc.calculate("GPT-4 Turbo", "texto", 1.0),
            Err(CalculatorError::CombinationNotFound { .. })
        ));
    }

    #[test]
    fn test_linear_scaling() {
        let calc = sample();
        let one = calc.calculate("Claude 3", "código", 1.0).unwrap();
        let ten = calc.calculate("Claude 3", "código", 10.0).unwrap();
        for (single, scaled) in [
            (one.water_liters, ten.water_liters),
            (one.energy_kwh, ten.energy_kwh),
            (one.carbon_grams_co2e, ten.carbon_grams_co2e),
        ] {
            let ratio = scaled / single;
            assert!((ratio - 10.0).abs() <= 10.0 * 0.02, "ratio {ratio}");
        }
    }

    #[test]
    fn test_totals_have_at_most_two_decimals() {
        let estimate = sample().calculate("Claude 3", "código", 3.0).unwrap();
        for total in [
            estimate.water_liters,
            estimate.energy_kwh,
            estimate.carbon_grams_co2e,
        ] {
            let rendered = total.to_string();
            let decimals = rendered.split('.').nth(1).map_or(0, str::len);
            assert!(decimals <= 2, "{rendered}");
        }
    }

    #[test]
    fn test_fractional_and_large_quantities() {
        let calc = sample();
        let estimate = calc.calculate("Claude 3", "audio", 2.5).unwrap();
        assert_eq!(estimate.quantity, 2.5);
        assert_eq!(
            estimate.quantity_description,
            "2.5 minuto(s) de transcripción de audio"
        );
        assert!(close(estimate.water_liters, 1.0));

        let estimate = calc.calculate("GPT-4 Turbo", "texto", 10_000.0).unwrap();
        assert!(close(estimate.water_liters, 1500.0));
    }

    #[test]
    fn test_overflowing_quantity_is_rejected() {
        let calc = sample();
        for quantity in [1e306, f64::MAX] {
            assert_eq!(
                calc.calculate("GPT-4 Turbo", "texto", quantity),
                Err(CalculatorError::InvalidQuantity),
                "{quantity}"
            );
        }
        let estimate = calc.calculate("GPT-4 Turbo", "texto", 1e12).unwrap();
        assert!(estimate.carbon_grams_co2e.is_finite());
    }

    #[test]
    fn test_image_description_pluralizes() {
        let calc = sample();
        let one = calc.calculate("Claude 3", "imagen", 1.0).unwrap();
        let three = calc.calculate("Claude 3", "imagen", 3.0).unwrap();
        assert_eq!(one.quantity_description, "1 imagen(es) generada");
        assert_eq!(three.quantity_description, "3 imagen(es) generadas");
    }

    #[test]
    fn test_describe_unknown_type_falls_back_to_raw() {
        assert_eq!(describe_quantity("podcast", 2.0), "2 podcast");
        assert_eq!(describe_quantity("video", 1.5), "1.5 minuto(s) de video");
    }

    #[test]
    fn test_bundled_dataset_totals_are_positive() {
        let table = ReferenceTable::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../data/dataset.csv"
        ))
        .unwrap();
        let calc = ImpactCalculator::new(Arc::new(table.clone()));
        for model in table.models() {
            for query_type in table.query_types() {
                let estimate = calc.calculate(&model, &query_type, 1.0).unwrap();
                assert!(estimate.water_liters > 0.0, "{model} {query_type}");
                assert!(estimate.energy_kwh > 0.0, "{model} {query_type}");
                assert!(estimate.carbon_grams_co2e > 0.0, "{model} {query_type}");
                assert!(estimate.equivalences.water.contains("vasos"));
                assert!(estimate.equivalences.energy.contains("min"));
                assert!(estimate.equivalences.carbon.contains("km"));
            }
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 5 "), Ok(5.0));
        assert_eq!(parse_quantity("2.5"), Ok(2.5));
        assert_eq!(parse_quantity("-5"), Ok(-5.0));
        for raw in ["", "cinco", "NaN", "inf", "5,5"] {
            assert_eq!(parse_quantity(raw), Err(CalculatorError::InvalidQuantity), "{raw}");
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(30.0), 30.0);
    }

    #[test]
    fn test_estimate_json_field_names() {
        let estimate = sample().calculate("GPT-4 Turbo", "texto", 5.0).unwrap();
        let json = serde_json::to_value(&estimate).unwrap();
        for field in [
            "modelo",
            "tipo_consulta",
            "cantidad",
            "cantidad_formateada",
            "unidad",
            "agua",
            "energia",
            "co2",
            "eq_agua",
            "eq_energia",
            "eq_co2",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
