use crate::models::Equivalences;

pub const GLASS_LITERS: f64 = 0.25;
pub const BOTTLE_LITERS: f64 = 0.5;
pub const SHOWER_LITERS: f64 = 75.0;
pub const LED_MINUTES_PER_KWH: f64 = 16.67;
pub const CAR_GRAMS_CO2E_PER_KM: f64 = 120.0;

/// Translates physical totals into everyday units.
///
/// Precision is part of the output contract: 2 decimals for glasses, bottles
/// and LED minutes, 4 for showers, 5 for kilometers.
#[must_use]
pub fn equivalences(water_liters: f64, energy_kwh: f64, carbon_grams_co2e: f64) -> Equivalences {
    Equivalences {
        water: water_equivalence(water_liters),
        energy: energy_equivalence(energy_kwh),
        carbon: carbon_equivalence(carbon_grams_co2e),
    }
}

#[must_use]
pub fn water_equivalence(liters: f64) -> String {
    let glasses = liters / GLASS_LITERS;
    let bottles = liters / BOTTLE_LITERS;
    let showers = liters / SHOWER_LITERS;
    format!(
        "{glasses:.2} vasos de agua / {bottles:.2} botellas de 500ml / {showers:.4} duchas de 5 min"
    )
}

#[must_use]
pub fn energy_equivalence(kwh: f64) -> String {
    let minutes = kwh * LED_MINUTES_PER_KWH;
    format!("{minutes:.2} min ampolleta LED")
}

#[must_use]
pub fn carbon_equivalence(grams_co2e: f64) -> String {
    let km = grams_co2e / CAR_GRAMS_CO2E_PER_KM;
    format!("{km:.5} km en auto")
}
