use crate::errors::FuelError;
use crate::models::{ChartSeries, LogEntry, MonthlyCost, RangeReport};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::warn;

/// Fuel burnt and its cost per calendar month, oldest month first.
///
/// Liters are recomputed from each trip's distance and consumption. Refuel
/// events and trips with an unreadable date do not count.
pub fn aggregate_monthly(log: &[LogEntry], price_per_liter: f64) -> Result<Vec<MonthlyCost>, FuelError> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for (date, trip_km, consumption) in dated_trips(log) {
        let liters = trip_km * consumption / 100.0;
        *buckets.entry((date.year(), date.month())).or_default() += liters;
    }

    if buckets.is_empty() {
        return Err(FuelError::NoData);
    }

    Ok(buckets
        .into_iter()
        .map(|((year, month), total_liters)| MonthlyCost {
            month,
            year,
            label: format!("{month:02}/{year}"),
            total_liters,
            total_cost: total_liters * price_per_liter,
        })
        .collect())
}

/// Distance and mean consumption of the trips dated within `[start, end]`.
///
/// Callers reject `start > end` before calling. The average is the plain
/// mean of each trip's consumption, not total liters over total distance.
pub fn build_report(log: &[LogEntry], start: NaiveDate, end: NaiveDate) -> Result<RangeReport, FuelError> {
    let mut entry_count = 0usize;
    let mut total_trip_km = 0.0;
    let mut consumption_sum = 0.0;

    for (_, trip_km, consumption) in dated_trips(log).filter(|(date, _, _)| (start..=end).contains(date)) {
        entry_count += 1;
        total_trip_km += trip_km;
        consumption_sum += consumption;
    }

    if entry_count == 0 {
        return Err(FuelError::NoData);
    }

    Ok(RangeReport {
        entry_count,
        total_trip_km,
        average_consumption: consumption_sum / entry_count as f64,
    })
}

/// Trip history for the trend chart in chronological order.
pub fn chart_series(log: &[LogEntry]) -> ChartSeries {
    let mut points: Vec<(NaiveDate, &str, f64, f64)> = log
        .iter()
        .rev()
        .filter_map(|entry| match entry {
            LogEntry::Trip {
                date,
                trip_km,
                consumption_l_per_100km,
            } => match date.calendar() {
                Ok(day) => Some((day, date.label(), *consumption_l_per_100km, *trip_km)),
                Err(err) => {
                    warn!("leaving trip out of chart: {err}");
                    None
                }
            },
            LogEntry::Refuel { .. } => None,
        })
        .collect();
    // Stable, so same-day trips stay in insertion order.
    points.sort_by_key(|(day, ..)| *day);

    let mut series = ChartSeries::default();
    for (_, label, consumption, trip_km) in points {
        series.labels.push(label.to_string());
        series.consumption.push(consumption);
        series.trip_km.push(trip_km);
    }
    series
}

fn dated_trips(log: &[LogEntry]) -> impl Iterator<Item = (NaiveDate, f64, f64)> + '_ {
    log.iter().filter_map(|entry| match entry {
        LogEntry::Trip {
            date,
            trip_km,
            consumption_l_per_100km,
        } => match date.calendar() {
            Ok(day) => Some((day, *trip_km, *consumption_l_per_100km)),
            Err(err) => {
                warn!("skipping trip: {err}");
                None
            }
        },
        LogEntry::Refuel { .. } => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDate;

    fn trip(date: &str, trip_km: f64, consumption: f64) -> LogEntry {
        LogEntry::Trip {
            date: EntryDate::new(date),
            trip_km,
            consumption_l_per_100km: consumption,
        }
    }

    fn refuel(date: &str) -> LogEntry {
        LogEntry::Refuel {
            date: EntryDate::new(date),
            fuel_price_per_liter: 1.58,
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn monthly_bucket_for_march() {
        let log = vec![trip("01/03/2024", 300.0, 6.0), trip("15/03/2024", 200.0, 7.0)];
        let months = aggregate_monthly(&log, 1.58).unwrap();

        assert_eq!(months.len(), 1);
        let march = &months[0];
        assert_eq!((march.month, march.year), (3, 2024));
        assert_eq!(march.label, "03/2024");
        assert!(close(march.total_liters, 32.0));
        assert!(close(march.total_cost, 50.56));
    }

    #[test]
    fn monthly_output_is_chronological() {
        // Newest first by insertion, with a back-dated entry in the middle.
        let log = vec![
            trip("02/01/2025", 100.0, 5.0),
            trip("20/11/2023", 100.0, 4.0),
            trip("10/12/2024", 100.0, 6.0),
            trip("05/02/2024", 100.0, 7.0),
        ];
        let keys: Vec<(i32, u32)> = aggregate_monthly(&log, 1.0)
            .unwrap()
            .iter()
            .map(|month| (month.year, month.month))
            .collect();
        assert_eq!(keys, vec![(2023, 11), (2024, 2), (2024, 12), (2025, 1)]);
    }

    #[test]
    fn monthly_ignores_refuels_and_bad_dates() {
        let log = vec![
            refuel("01/03/2024"),
            trip("not a date", 500.0, 9.0),
            trip("32/03/2024", 500.0, 9.0),
            trip("10/03/2024", 100.0, 5.0),
        ];
        let months = aggregate_monthly(&log, 2.0).unwrap();
        assert_eq!(months.len(), 1);
        assert!(close(months[0].total_liters, 5.0));
        assert!(close(months[0].total_cost, 10.0));
    }

    #[test]
    fn monthly_without_trips_is_no_data() {
        assert_eq!(aggregate_monthly(&[], 1.58), Err(FuelError::NoData));
        let log = vec![refuel("01/03/2024"), trip("bad", 10.0, 5.0)];
        assert_eq!(aggregate_monthly(&log, 1.58), Err(FuelError::NoData));
    }

    #[test]
    fn report_uses_plain_mean_of_consumption() {
        let log = vec![trip("05/03/2024", 100.0, 4.0), trip("06/03/2024", 300.0, 8.0)];
        let report = build_report(&log, ymd(2024, 3, 1), ymd(2024, 3, 31)).unwrap();

        assert_eq!(report.entry_count, 2);
        assert!(close(report.total_trip_km, 400.0));
        assert!(close(report.average_consumption, 6.0));
        let weighted = (100.0 * 4.0 / 100.0 + 300.0 * 8.0 / 100.0) * 100.0 / 400.0;
        assert!(!close(report.average_consumption, weighted));
    }

    #[test]
    fn report_bounds_are_inclusive() {
        let log = vec![
            trip("28/02/2024", 999.0, 9.0),
            trip("01/03/2024", 100.0, 5.0),
            trip("31/03/2024", 50.0, 7.0),
            trip("01/04/2024", 999.0, 9.0),
            refuel("15/03/2024"),
            trip("garbage", 999.0, 9.0),
        ];
        let report = build_report(&log, ymd(2024, 3, 1), ymd(2024, 3, 31)).unwrap();
        assert_eq!(report.entry_count, 2);
        assert!(close(report.total_trip_km, 150.0));
        assert!(close(report.average_consumption, 6.0));

        let single_day = build_report(&log, ymd(2024, 3, 31), ymd(2024, 3, 31)).unwrap();
        assert_eq!(single_day.entry_count, 1);
    }

    #[test]
    fn report_with_no_matches_is_no_data() {
        let log = vec![trip("01/03/2024", 100.0, 5.0), refuel("10/06/2024")];
        assert_eq!(
            build_report(&log, ymd(2024, 6, 1), ymd(2024, 6, 30)),
            Err(FuelError::NoData)
        );
    }

    #[test]
    fn chart_series_runs_oldest_first() {
        let log = vec![
            trip("03/03/2024", 30.0, 6.0),
            refuel("02/03/2024"),
            trip("01/02/2024", 10.0, 4.0),
            trip("02/03/2024", 20.0, 5.0),
            trip("nope", 1.0, 1.0),
        ];
        let series = chart_series(&log);
        assert_eq!(series.labels, vec!["01/02/2024", "02/03/2024", "03/03/2024"]);
        assert_eq!(series.trip_km, vec![10.0, 20.0, 30.0]);
        assert_eq!(series.consumption, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn chart_series_is_empty_without_trips() {
        assert_eq!(chart_series(&[refuel("01/01/2024")]), ChartSeries::default());
    }
}
