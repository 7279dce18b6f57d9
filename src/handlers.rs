use crate::config::FuelConfig;
use crate::date::{format_date, parse_bound};
use crate::errors::{AppError, FuelError};
use crate::models::{
    CalculateRequest, CalculateResponse, ChartSeries, EntryDate, HistoryResponse, LogEntry,
    MonthlyResponse, Numeric, RefuelRequest, ReportQuery, ReportResponse,
};
use crate::projection::project;
use crate::state::AppState;
use crate::stats::{aggregate_monthly, build_report, chart_series};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use chrono::Local;
use tracing::info;

const NO_MONTHLY_DATA: &str = "No data available to compute the monthly cost.";
const NO_REPORT_DATA: &str = "No data available for this period.";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config))
}

pub async fn get_config(State(state): State<AppState>) -> Json<FuelConfig> {
    Json(state.config)
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let log = state.log.lock().await;
    Json(HistoryResponse {
        entries: log.load().await,
    })
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    apply_clear(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_history_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_clear(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, AppError> {
    let trip_km = numeric_input(payload.trip.as_ref(), "trip")?;
    let consumption = numeric_input(payload.consumption.as_ref(), "consumption")?;
    let date = entry_date(payload.date.as_deref())?;

    let config = &state.config;
    let projection = project(trip_km, consumption, &config.tank, config.fuel_price_per_liter)?;
    let alert = projection.low_range_alert(config.low_range_threshold_km);

    let entry = LogEntry::Trip {
        date,
        trip_km,
        consumption_l_per_100km: consumption,
    };
    state.log.lock().await.append(&entry).await?;
    if let Some(alert) = &alert {
        state.notifier.notify(alert);
    }
    info!(
        trip_km,
        consumption,
        remaining_before_reserve_km = projection.remaining_distance_before_reserve_km,
        "trip logged"
    );

    Ok(Json(CalculateResponse {
        projection,
        alert,
        entry,
    }))
}

pub async fn refuel(
    State(state): State<AppState>,
    payload: Option<Json<RefuelRequest>>,
) -> Result<Json<LogEntry>, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let entry = apply_refuel(&state, request.date.as_deref()).await?;
    Ok(Json(entry))
}

pub async fn refuel_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_refuel(&state, None).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_monthly(State(state): State<AppState>) -> Result<Json<MonthlyResponse>, AppError> {
    let entries = state.log.lock().await.load().await;
    match aggregate_monthly(&entries, state.config.fuel_price_per_liter) {
        Ok(months) => Ok(Json(MonthlyResponse::Ok { months })),
        Err(FuelError::NoData) => Ok(Json(MonthlyResponse::NoData {
            message: NO_MONTHLY_DATA.to_string(),
        })),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let start = parse_bound(&query.start)?;
    let end = parse_bound(&query.end)?;
    if start > end {
        return Err(AppError::bad_request("start date must not be after end date"));
    }

    let entries = state.log.lock().await.load().await;
    match build_report(&entries, start, end) {
        Ok(report) => Ok(Json(ReportResponse::Ok { report })),
        Err(FuelError::NoData) => Ok(Json(ReportResponse::NoData {
            message: NO_REPORT_DATA.to_string(),
        })),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_chart(State(state): State<AppState>) -> Json<ChartSeries> {
    let entries = state.log.lock().await.load().await;
    Json(chart_series(&entries))
}

async fn apply_refuel(state: &AppState, date: Option<&str>) -> Result<LogEntry, AppError> {
    let entry = LogEntry::Refuel {
        date: entry_date(date)?,
        fuel_price_per_liter: state.config.fuel_price_per_liter,
    };
    state.log.lock().await.append(&entry).await?;
    info!(date = entry.date().label(), "refuel logged");
    Ok(entry)
}

async fn apply_clear(state: &AppState) -> Result<(), AppError> {
    state.log.lock().await.clear().await?;
    info!("fuel history cleared");
    Ok(())
}

/// Today unless the request names a day; a named day is normalised to
/// `DD/MM/YYYY`.
fn entry_date(requested: Option<&str>) -> Result<EntryDate, FuelError> {
    let date = match requested.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_bound(value)?,
        None => Local::now().date_naive(),
    };
    Ok(EntryDate::new(format_date(date)))
}

/// Missing, null and non-numeric values all count as invalid input.
fn numeric_input(value: Option<&Numeric>, field: &'static str) -> Result<f64, FuelError> {
    value
        .and_then(Numeric::value)
        .ok_or(FuelError::InvalidInput { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Alert;
    use crate::notify::Notifier;
    use crate::storage::{EntryLog, FileStore};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Alert>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, alert: &Alert) {
            self.seen.lock().unwrap().push(alert.clone());
        }
    }

    fn state_at(path: std::path::PathBuf, recorder: &Arc<Recorder>) -> AppState {
        let mut state = AppState::new(FuelConfig::default(), EntryLog::new(FileStore::new(path)));
        state.notifier = Arc::clone(recorder) as Arc<dyn Notifier>;
        state
    }

    fn unique_path(name: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("fuel_log_{name}_{}_{}.json", std::process::id(), nanos))
    }

    fn long_trip() -> CalculateRequest {
        CalculateRequest {
            trip: Some(Numeric::Number(300.0)),
            consumption: Some(Numeric::Number(6.0)),
            date: Some("01/03/2024".to_string()),
        }
    }

    #[tokio::test]
    async fn alert_waits_for_the_trip_to_be_stored() {
        let recorder = Arc::new(Recorder::default());
        let unwritable = unique_path("missing_dir").join("history.json");
        let state = state_at(unwritable, &recorder);

        let result = calculate(State(state), Json(long_trip())).await;
        assert!(result.is_err());
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn alert_dispatched_once_trip_is_stored() {
        let recorder = Arc::new(Recorder::default());
        let path = unique_path("alert");
        let state = state_at(path.clone(), &recorder);

        let Json(response) = calculate(State(state), Json(long_trip())).await.unwrap();
        assert_eq!(recorder.seen.lock().unwrap().as_slice(), response.alert.as_slice());
        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn entry_date_normalises_requested_days() {
        assert_eq!(entry_date(Some("1/3/2024")).unwrap().label(), "01/03/2024");
        assert_eq!(entry_date(Some("2024-03-01")).unwrap().label(), "01/03/2024");
        assert!(entry_date(Some("31/02/2024")).is_err());
    }

    #[test]
    fn stored_labels_parse_back() {
        assert!(entry_date(Some("01/01/12345")).is_err());
        assert!(entry_date(Some("+12345-01-01")).is_err());
        for requested in [None, Some("31/12/9999"), Some("1/1/1"), Some("2024-02-29")] {
            let date = entry_date(requested).unwrap();
            assert!(date.calendar().is_ok(), "{} does not parse", date.label());
        }
    }

    #[test]
    fn missing_or_non_numeric_inputs_are_invalid() {
        assert_eq!(
            numeric_input(None, "trip"),
            Err(FuelError::InvalidInput { field: "trip" })
        );
        let text = Numeric::Text("lots".to_string());
        assert_eq!(
            numeric_input(Some(&text), "consumption"),
            Err(FuelError::InvalidInput { field: "consumption" })
        );
        assert_eq!(numeric_input(Some(&Numeric::Text(" 6,5 ".to_string())), "consumption"), Ok(6.5));
    }

    #[test]
    fn entry_date_defaults_to_today() {
        let today = format_date(Local::now().date_naive());
        assert_eq!(entry_date(None).unwrap().label(), today);
        assert_eq!(entry_date(Some("  ")).unwrap().label(), today);
    }
}
