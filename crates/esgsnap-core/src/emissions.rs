//! Annual emissions calculator.
//!
//! Multiplies each activity quantity by a fixed emission factor, rounds every
//! category to whole tonnes of CO2e, then sums the rounded subtotals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::answers::ActivityInputs;

/// kg CO2e per litre of fuel burned.
pub const FUEL_KG_CO2E_PER_LITER: f64 = 2.7;
/// t CO2e per kWh of grid electricity.
pub const ELECTRICITY_T_CO2E_PER_KWH: f64 = 0.0005;
/// kg CO2e per vehicle kilometre.
pub const VEHICLE_KG_CO2E_PER_KM: f64 = 0.21;

const KG_PER_TONNE: f64 = 1000.0;

/// The category contributing most to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryDriver {
    Fuel,
    Electricity,
    Vehicles,
    /// Fuel and electricity tie for the largest subtotal.
    FuelAndElectricity,
    /// Any other tie for the largest subtotal.
    Multiple,
    NoData,
}

impl PrimaryDriver {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fuel => "Fuel consumption",
            Self::Electricity => "Electricity usage",
            Self::Vehicles => "Vehicle travel",
            Self::FuelAndElectricity => "Fuel and electricity",
            Self::Multiple => "Multiple categories",
            Self::NoData => "No emissions data",
        }
    }
}

impl std::fmt::Display for PrimaryDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category subtotals and total, in whole tCO2e.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsResult {
    pub fuel_emissions: i64,
    pub electricity_emissions: i64,
    pub vehicle_emissions: i64,
    pub total_emissions: i64,
    pub primary_driver: PrimaryDriver,
}

impl EmissionsResult {
    /// Subtotal attributed to the primary driver.
    ///
    /// For ties this is the shared value; for [`PrimaryDriver::NoData`] it is 0.
    pub fn driver_emissions(&self) -> i64 {
        match self.primary_driver {
            PrimaryDriver::Fuel | PrimaryDriver::FuelAndElectricity => self.fuel_emissions,
            PrimaryDriver::Electricity => self.electricity_emissions,
            PrimaryDriver::Vehicles => self.vehicle_emissions,
            PrimaryDriver::Multiple => self
                .fuel_emissions
                .max(self.electricity_emissions)
                .max(self.vehicle_emissions),
            PrimaryDriver::NoData => 0,
        }
    }
}

/// Round half towards positive infinity, to whole tonnes.
///
/// Values just below a half round down. Out-of-range values saturate at the
/// `i64` bounds.
fn round_tonnes(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Compute annual emissions from activity inputs.
///
/// A category whose applicability flag is unset contributes zero regardless
/// of any quantity left in its field. Negative quantities are not rejected.
pub fn compute(inputs: &ActivityInputs) -> EmissionsResult {
    let fuel_emissions = if inputs.consumes_fuel {
        round_tonnes(inputs.fuel_liters * FUEL_KG_CO2E_PER_LITER / KG_PER_TONNE)
    } else {
        0
    };

    let electricity_emissions = if inputs.uses_grid_electricity {
        let annual_kwh = inputs.electricity_kwh * inputs.electricity_period.annual_multiplier();
        round_tonnes(annual_kwh * ELECTRICITY_T_CO2E_PER_KWH)
    } else {
        0
    };

    let vehicle_emissions = if inputs.operates_vehicles {
        let annual_km = inputs.vehicle_km * inputs.vehicle_period.annual_multiplier();
        round_tonnes(annual_km * VEHICLE_KG_CO2E_PER_KM / KG_PER_TONNE)
    } else {
        0
    };

    let total_emissions = fuel_emissions
        .saturating_add(electricity_emissions)
        .saturating_add(vehicle_emissions);
    let primary_driver = primary_driver(fuel_emissions, electricity_emissions, vehicle_emissions);

    debug!(
        fuel = fuel_emissions,
        electricity = electricity_emissions,
        vehicles = vehicle_emissions,
        total = total_emissions,
        driver = primary_driver.label(),
        "computed emissions"
    );

    EmissionsResult {
        fuel_emissions,
        electricity_emissions,
        vehicle_emissions,
        total_emissions,
        primary_driver,
    }
}

/// Pick the largest non-zero subtotal; ties are reported as combined drivers.
fn primary_driver(fuel: i64, electricity: i64, vehicles: i64) -> PrimaryDriver {
    let candidates = [
        (PrimaryDriver::Fuel, fuel),
        (PrimaryDriver::Electricity, electricity),
        (PrimaryDriver::Vehicles, vehicles),
    ];

    let Some(max) = candidates
        .iter()
        .filter(|(_, v)| *v != 0)
        .map(|(_, v)| *v)
        .max()
    else {
        return PrimaryDriver::NoData;
    };

    let leaders: Vec<PrimaryDriver> = candidates
        .iter()
        .filter(|(_, v)| *v != 0 && *v == max)
        .map(|(d, _)| *d)
        .collect();

    match leaders.as_slice() {
        [single] => *single,
        [PrimaryDriver::Fuel, PrimaryDriver::Electricity] => PrimaryDriver::FuelAndElectricity,
        _ => PrimaryDriver::Multiple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Period, QuestionnaireAnswers};

    fn fuel_and_electricity(liters: f64, kwh: f64, period: Period) -> ActivityInputs {
        ActivityInputs {
            consumes_fuel: true,
            fuel_liters: liters,
            uses_grid_electricity: true,
            electricity_kwh: kwh,
            electricity_period: period,
            ..Default::default()
        }
    }

    #[test]
    fn zero_inputs_report_no_data() {
        let result = compute(&ActivityInputs::default());
        assert_eq!(result.fuel_emissions, 0);
        assert_eq!(result.electricity_emissions, 0);
        assert_eq!(result.vehicle_emissions, 0);
        assert_eq!(result.total_emissions, 0);
        assert_eq!(result.primary_driver, PrimaryDriver::NoData);
        assert_eq!(result.primary_driver.label(), "No emissions data");
    }

    #[test]
    fn reference_scenario() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "yes".into(),
            total_fuel_liters: "1000".into(),
            uses_grid_electricity: "yes".into(),
            electricity_usage_kwh: "12000".into(),
            electricity_usage_period: "annual".into(),
            ..Default::default()
        };
        let result = compute(&answers.activity_inputs());
        assert_eq!(result.fuel_emissions, 3);
        assert_eq!(result.electricity_emissions, 6);
        assert_eq!(result.total_emissions, 9);
        assert_eq!(result.primary_driver.label(), "Electricity usage");
    }

    #[test]
    fn total_is_sum_of_rounded_subtotals() {
        // 1.35 t fuel + 1.4 t electricity: rounding first gives 1 + 1.
        let result = compute(&fuel_and_electricity(500.0, 2800.0, Period::Annual));
        assert_eq!(result.fuel_emissions, 1);
        assert_eq!(result.electricity_emissions, 1);
        assert_eq!(result.total_emissions, 2);
        assert_eq!(
            result.total_emissions,
            result.fuel_emissions + result.electricity_emissions + result.vehicle_emissions
        );
    }

    #[test]
    fn monthly_times_twelve_matches_annual() {
        let monthly = compute(&fuel_and_electricity(0.0, 1000.0, Period::Monthly));
        let annual = compute(&fuel_and_electricity(0.0, 12_000.0, Period::Annual));
        assert_eq!(monthly.electricity_emissions, annual.electricity_emissions);
        assert_eq!(monthly.electricity_emissions, 6);

        let monthly = compute(&ActivityInputs {
            operates_vehicles: true,
            vehicle_km: 2000.0,
            vehicle_period: Period::Monthly,
            ..Default::default()
        });
        let annual = compute(&ActivityInputs {
            operates_vehicles: true,
            vehicle_km: 24_000.0,
            vehicle_period: Period::Annual,
            ..Default::default()
        });
        assert_eq!(monthly.vehicle_emissions, annual.vehicle_emissions);
        assert_eq!(monthly.vehicle_emissions, 5);
    }

    #[test]
    fn inapplicable_category_is_forced_to_zero() {
        let inputs = ActivityInputs {
            consumes_fuel: false,
            fuel_liters: 50_000.0,
            uses_grid_electricity: true,
            electricity_kwh: 4000.0,
            ..Default::default()
        };
        let result = compute(&inputs);
        assert_eq!(result.fuel_emissions, 0);
        assert_eq!(result.electricity_emissions, 2);
        assert_eq!(result.primary_driver, PrimaryDriver::Electricity);
    }

    #[test]
    fn huge_quantities_saturate_total() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "yes".into(),
            total_fuel_liters: "1e300".into(),
            uses_grid_electricity: "yes".into(),
            electricity_usage_kwh: "1e300".into(),
            ..Default::default()
        };
        let result = compute(&answers.activity_inputs());
        assert_eq!(result.fuel_emissions, i64::MAX);
        assert_eq!(result.electricity_emissions, i64::MAX);
        assert_eq!(result.total_emissions, i64::MAX);
        assert_eq!(result.primary_driver, PrimaryDriver::FuelAndElectricity);
    }

    #[test]
    fn just_below_half_rounds_down() {
        assert_eq!(round_tonnes(0.499_999_999_999_999_94), 0);
        assert_eq!(round_tonnes(0.5), 1);
        assert_eq!(round_tonnes(-0.5), 0);
        assert_eq!(round_tonnes(-1.5), -1);
        assert_eq!(round_tonnes(2.4), 2);
        assert_eq!(round_tonnes(f64::INFINITY), i64::MAX);
    }

    #[test]
    fn halves_round_up() {
        // 1000 kWh = 0.5 t, 3000 kWh = 1.5 t.
        let half = compute(&fuel_and_electricity(0.0, 1000.0, Period::Annual));
        assert_eq!(half.electricity_emissions, 1);
        let one_and_half = compute(&fuel_and_electricity(0.0, 3000.0, Period::Annual));
        assert_eq!(one_and_half.electricity_emissions, 2);
    }

    #[test]
    fn negative_inputs_pass_through() {
        let result = compute(&fuel_and_electricity(-2000.0, 0.0, Period::Annual));
        assert_eq!(result.fuel_emissions, -5);
        assert_eq!(result.total_emissions, -5);
        assert_eq!(result.primary_driver, PrimaryDriver::Fuel);

        // -0.5 t rounds towards positive infinity.
        let result = compute(&fuel_and_electricity(0.0, -1000.0, Period::Annual));
        assert_eq!(result.electricity_emissions, 0);
    }

    #[test]
    fn fuel_larger_than_electricity() {
        let result = compute(&fuel_and_electricity(10_000.0, 2000.0, Period::Annual));
        assert_eq!(result.fuel_emissions, 27);
        assert_eq!(result.electricity_emissions, 1);
        assert_eq!(result.primary_driver, PrimaryDriver::Fuel);
        assert_eq!(result.driver_emissions(), 27);
    }

    #[test]
    fn fuel_electricity_tie() {
        // 2.7 t -> 3 and 6000 kWh -> 3.
        let result = compute(&fuel_and_electricity(1000.0, 6000.0, Period::Annual));
        assert_eq!(result.primary_driver, PrimaryDriver::FuelAndElectricity);
        assert_eq!(result.primary_driver.label(), "Fuel and electricity");
        assert_eq!(result.driver_emissions(), 3);
    }

    #[test]
    fn tie_involving_vehicles_is_multiple() {
        let inputs = ActivityInputs {
            operates_vehicles: true,
            vehicle_km: 14_286.0,
            ..fuel_and_electricity(1000.0, 0.0, Period::Annual)
        };
        let result = compute(&inputs);
        assert_eq!(result.fuel_emissions, 3);
        assert_eq!(result.vehicle_emissions, 3);
        assert_eq!(result.primary_driver, PrimaryDriver::Multiple);
        assert_eq!(result.driver_emissions(), 3);
    }

    #[test]
    fn deterministic() {
        let inputs = fuel_and_electricity(1234.5, 6789.0, Period::Monthly);
        assert_eq!(compute(&inputs), compute(&inputs));
    }
}
