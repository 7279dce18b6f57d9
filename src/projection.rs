//! Remaining range and cost after a trip.

use crate::errors::FuelError;
use crate::models::{Alert, Projection, TankState};

/// Project the tank state after driving `trip_km` at `consumption` L/100 km.
///
/// Results are not clamped: a trip that burns more than the tank holds gives
/// negative remaining liters and distances.
pub fn project(
    trip_km: f64,
    consumption: f64,
    tank: &TankState,
    price_per_liter: f64,
) -> Result<Projection, FuelError> {
    ensure_positive(trip_km, "trip")?;
    ensure_positive(consumption, "consumption")?;

    let liters_consumed = trip_km * consumption / 100.0;
    let remaining_liters = tank.total_capacity_l - liters_consumed;
    let remaining_liters_before_reserve = remaining_liters - tank.reserve_capacity_l;

    Ok(Projection {
        liters_consumed,
        remaining_liters,
        remaining_liters_before_reserve,
        remaining_distance_before_reserve_km: remaining_liters_before_reserve * 100.0 / consumption,
        total_distance_before_refuel_km: remaining_liters * 100.0 / consumption,
        estimated_cost: liters_consumed * price_per_liter,
    })
}

impl Projection {
    pub fn is_low_range(&self, threshold_km: f64) -> bool {
        self.remaining_distance_before_reserve_km <= threshold_km
    }

    pub fn low_range_alert(&self, threshold_km: f64) -> Option<Alert> {
        self.is_low_range(threshold_km).then(|| Alert {
            title: "Fuel alert".to_string(),
            body: format!(
                "Only {:.1} km left before the reserve.",
                self.remaining_distance_before_reserve_km
            ),
        })
    }
}

fn ensure_positive(value: f64, field: &'static str) -> Result<(), FuelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FuelError::InvalidInput { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn follows_the_range_formulas() {
        let tank = TankState::default();
        let (trip, consumption, price) = (120.0, 4.5, 1.58);
        let projection = project(trip, consumption, &tank, price).unwrap();

        let liters = trip * consumption / 100.0;
        assert_eq!(projection.liters_consumed, liters);
        assert_eq!(projection.estimated_cost, liters * price);
        assert_eq!(projection.remaining_liters, 17.0 - liters);
        assert_eq!(projection.remaining_liters_before_reserve, 17.0 - liters - 5.0);
        assert_eq!(
            projection.remaining_distance_before_reserve_km,
            (17.0 - liters - 5.0) * 100.0 / consumption
        );
        assert_eq!(projection.total_distance_before_refuel_km, (17.0 - liters) * 100.0 / consumption);
    }

    #[test]
    fn over_capacity_trip_goes_negative() {
        let tank = TankState {
            total_capacity_l: 17.0,
            reserve_capacity_l: 5.0,
        };
        let projection = project(300.0, 6.0, &tank, 1.58).unwrap();

        assert!(close(projection.liters_consumed, 18.0));
        assert!(close(projection.remaining_liters, -1.0));
        assert!(close(projection.remaining_liters_before_reserve, -6.0));
        assert!(close(projection.remaining_distance_before_reserve_km, -100.0));
        assert!(close(projection.total_distance_before_refuel_km, -100.0 / 6.0));
        assert!(close(projection.estimated_cost, 28.44));
        assert!(projection.is_low_range(50.0));
    }

    #[test]
    fn rejects_non_positive_or_non_finite_inputs() {
        let tank = TankState::default();
        for (trip, consumption) in [
            (0.0, 5.0),
            (-10.0, 5.0),
            (f64::NAN, 5.0),
            (f64::INFINITY, 5.0),
            (100.0, 0.0),
            (100.0, -1.0),
            (100.0, f64::NAN),
        ] {
            assert!(
                matches!(project(trip, consumption, &tank, 1.58), Err(FuelError::InvalidInput { .. })),
                "trip={trip} consumption={consumption}"
            );
        }
        assert_eq!(
            project(100.0, 0.0, &tank, 1.58),
            Err(FuelError::InvalidInput { field: "consumption" })
        );
    }

    #[test]
    fn alert_fires_at_or_below_threshold() {
        let tank = TankState::default();
        // 12 liters before reserve at 4 L/100 km is 300 km.
        let far = project(0.0001, 4.0, &tank, 1.0).unwrap();
        assert!(far.low_range_alert(50.0).is_none());

        // 100 km at 10 L/100 km leaves 2 L before reserve: exactly 20 km.
        let near = project(100.0, 10.0, &tank, 1.0).unwrap();
        assert!(close(near.remaining_distance_before_reserve_km, 20.0));
        assert!(near.is_low_range(20.0));
        let alert = near.low_range_alert(50.0).unwrap();
        assert_eq!(alert.title, "Fuel alert");
        assert_eq!(alert.body, "Only 20.0 km left before the reserve.");
    }
}
