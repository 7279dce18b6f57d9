use crate::date::parse_date;
use crate::errors::FuelError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker stored in the `event` field of refuel records.
pub const REFUEL_EVENT: &str = "Plein fait";

/// The date label of an entry as it was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryDate(String);

impl EntryDate {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn calendar(&self) -> Result<NaiveDate, FuelError> {
        parse_date(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Trip {
        date: EntryDate,
        trip_km: f64,
        consumption_l_per_100km: f64,
    },
    Refuel {
        date: EntryDate,
        fuel_price_per_liter: f64,
    },
}

impl LogEntry {
    pub fn date(&self) -> &EntryDate {
        match self {
            Self::Trip { date, .. } | Self::Refuel { date, .. } => date,
        }
    }
}

/// A number that may have been stored as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().replace(',', ".").parse().ok(),
        }
    }
}

/// Persisted shape of one log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<Numeric>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default, rename = "fuelPrice", skip_serializing_if = "Option::is_none")]
    pub fuel_price: Option<Numeric>,
}

impl TryFrom<StoredRecord> for LogEntry {
    type Error = FuelError;

    fn try_from(record: StoredRecord) -> Result<Self, Self::Error> {
        let date = record
            .date
            .map(EntryDate::new)
            .ok_or_else(|| FuelError::Parse("record has no date".to_string()))?;

        if record.event.as_deref() == Some(REFUEL_EVENT) {
            let fuel_price_per_liter = record
                .fuel_price
                .as_ref()
                .and_then(Numeric::value)
                .filter(|price| price.is_finite() && *price >= 0.0)
                .ok_or_else(|| FuelError::Parse("refuel record has no valid fuelPrice".to_string()))?;
            return Ok(Self::Refuel {
                date,
                fuel_price_per_liter,
            });
        }

        let trip_km = positive(record.trip.as_ref(), "trip")?;
        let consumption_l_per_100km = positive(record.consumption.as_ref(), "consumption")?;
        Ok(Self::Trip {
            date,
            trip_km,
            consumption_l_per_100km,
        })
    }
}

impl From<&LogEntry> for StoredRecord {
    fn from(entry: &LogEntry) -> Self {
        match entry {
            LogEntry::Trip {
                date,
                trip_km,
                consumption_l_per_100km,
            } => Self {
                date: Some(date.label().to_string()),
                trip: Some(Numeric::Number(*trip_km)),
                consumption: Some(Numeric::Number(*consumption_l_per_100km)),
                event: None,
                fuel_price: None,
            },
            LogEntry::Refuel {
                date,
                fuel_price_per_liter,
            } => Self {
                date: Some(date.label().to_string()),
                trip: None,
                consumption: None,
                event: Some(REFUEL_EVENT.to_string()),
                fuel_price: Some(Numeric::Number(*fuel_price_per_liter)),
            },
        }
    }
}

/// Reads any JSON value, keeping only numbers and strings.
fn lenient_numeric<'de, D>(deserializer: D) -> Result<Option<Numeric>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn positive(field: Option<&Numeric>, name: &'static str) -> Result<f64, FuelError> {
    field
        .and_then(Numeric::value)
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or_else(|| FuelError::Parse(format!("record has no valid {name}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    pub total_capacity_l: f64,
    pub reserve_capacity_l: f64,
}

impl Default for TankState {
    fn default() -> Self {
        Self {
            total_capacity_l: 17.0,
            reserve_capacity_l: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub liters_consumed: f64,
    pub remaining_liters: f64,
    pub remaining_liters_before_reserve: f64,
    pub remaining_distance_before_reserve_km: f64,
    pub total_distance_before_refuel_km: f64,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCost {
    pub month: u32,
    pub year: i32,
    pub label: String,
    pub total_liters: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    pub entry_count: usize,
    pub total_trip_km: f64,
    pub average_consumption: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub consumption: Vec<f64>,
    pub trip_km: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default, deserialize_with = "lenient_numeric")]
    pub trip: Option<Numeric>,
    #[serde(default, deserialize_with = "lenient_numeric")]
    pub consumption: Option<Numeric>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefuelRequest {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub projection: Projection,
    pub alert: Option<Alert>,
    pub entry: LogEntry,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonthlyResponse {
    Ok { months: Vec<MonthlyCost> },
    NoData { message: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportResponse {
    Ok { report: RangeReport },
    NoData { message: String },
}
