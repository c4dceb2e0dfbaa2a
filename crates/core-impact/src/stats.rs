use crate::dataset::ReferenceTable;
use crate::models::ReferenceRow;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImpactStats {
    pub agua: f64,
    pub energia: f64,
    pub carbono: f64,
}

/// Per-model and per-query-type averages, as consumed by the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub models: Vec<String>,
    pub query_types: Vec<String>,
    pub model_stats: IndexMap<String, ImpactStats>,
    pub query_type_stats: IndexMap<String, ImpactStats>,
}

#[derive(Default)]
struct Accumulator {
    water: f64,
    energy: f64,
    carbon: f64,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, row: &ReferenceRow) {
        self.water += row.water_liters;
        self.energy += row.energy_kwh;
        self.carbon += row.carbon_grams_co2e;
        self.count += 1;
    }

    fn mean(&self) -> ImpactStats {
        let count = f64::from(self.count.max(1));
        ImpactStats {
            agua: self.water / count,
            energia: self.energy / count,
            carbono: self.carbon / count,
        }
    }
}

fn averages_by<'a>(
    rows: impl Iterator<Item = &'a ReferenceRow>,
    key: impl Fn(&ReferenceRow) -> &str,
) -> IndexMap<String, ImpactStats> {
    let mut groups: IndexMap<String, Accumulator> = IndexMap::new();
    for row in rows {
        groups.entry(key(row).to_string()).or_default().add(row);
    }
    groups
        .into_iter()
        .map(|(name, acc)| (name, acc.mean()))
        .collect()
}

impl ReferenceTable {
    #[must_use]
    pub fn chart_data(&self) -> ChartData {
        let model_stats = averages_by(self.rows(), |row| row.model.as_str());
        let query_type_stats = averages_by(self.rows(), |row| row.query_type.as_str());
        ChartData {
            models: model_stats.keys().cloned().collect(),
            query_types: query_type_stats.keys().cloned().collect(),
            model_stats,
            query_type_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_chart_data_averages() {
        let table = ReferenceTable::from_rows([
            ReferenceRow::new("GPT-4 Turbo", "texto", 0.1, 0.02, 4.0, "respuesta"),
            ReferenceRow::new("GPT-4 Turbo", "imagen", 0.3, 0.06, 12.0, "imagen"),
            ReferenceRow::new("Claude 3", "texto", 0.2, 0.04, 8.0, "respuesta"),
        ]);
        let data = table.chart_data();

        assert_eq!(data.models, vec!["GPT-4 Turbo", "Claude 3"]);
        assert_eq!(data.query_types, vec!["texto", "imagen"]);

        let gpt = data.model_stats["GPT-4 Turbo"];
        assert!(close(gpt.agua, 0.2));
        assert!(close(gpt.energia, 0.04));
        assert!(close(gpt.carbono, 8.0));

        let texto = data.query_type_stats["texto"];
        assert!(close(texto.agua, 0.15));
        assert!(close(texto.carbono, 6.0));
    }

    #[test]
    fn test_chart_data_serializes_camel_case() {
        let table = ReferenceTable::from_rows([ReferenceRow::new(
            "Claude 3", "audio", 0.5, 0.1, 20.0, "minuto",
        )]);
        let json = serde_json::to_string(&table.chart_data()).unwrap_or_default();
        insta::assert_snapshot!(json, @r#"{"models":["Claude 3"],"queryTypes":["audio"],"modelStats":{"Claude 3":{"agua":0.5,"energia":0.1,"carbono":20.0}},"queryTypeStats":{"audio":{"agua":0.5,"energia":0.1,"carbono":20.0}}}"#);
    }

    #[test]
    fn test_chart_data_empty_table() {
        let data = ReferenceTable::empty().chart_data();
        assert!(data.models.is_empty());
        assert!(data.model_stats.is_empty());
        assert!(data.query_type_stats.is_empty());
    }
}
