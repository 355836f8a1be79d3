// Reading domain models - sensor samples and the 24h series
use super::level::LevelCalibration;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::{Map, Value};

/// Timezone every reading is displayed in, and the zone offset-less
/// timestamps are interpreted in.
pub const DASHBOARD_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Outcome of deriving a reading's point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Missing,
    Invalid,
    At(DateTime<Utc>),
}

impl Timestamp {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::At(at) => Some(*at),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub distance: Option<f64>,
    pub level: Option<f64>,
    pub timestamp: Timestamp,
}

impl Reading {
    pub fn new(distance: Option<f64>, level: Option<f64>, timestamp: Timestamp) -> Self {
        Self {
            distance,
            level,
            timestamp,
        }
    }

    /// Parse a reading object as served by the sensor API.
    /// Anything that is not a JSON object yields a reading with every field absent.
    pub fn from_json(value: &Value, calibration: Option<&LevelCalibration>) -> Self {
        match value.as_object() {
            Some(obj) => Self::from_object(obj, calibration),
            None => Self::new(None, None, Timestamp::Missing),
        }
    }

    fn from_object(obj: &Map<String, Value>, calibration: Option<&LevelCalibration>) -> Self {
        let distance = coerce_number(obj.get("distancia"));
        let level = coerce_number(obj.get("nivel")).or_else(|| {
            let (calibration, distance) = (calibration?, distance?);
            Some(calibration.level_for(distance))
        });

        Self::new(distance, level, reading_timestamp(obj))
    }
}

/// One element of the history series. Both the instant and the distance are
/// guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub at: DateTime<Utc>,
    pub distance: f64,
    pub level: Option<f64>,
}

impl SeriesPoint {
    pub fn new(at: DateTime<Utc>, distance: f64, level: Option<f64>) -> Self {
        Self {
            at,
            distance,
            level,
        }
    }

    pub fn time_ms(&self) -> i64 {
        self.at.timestamp_millis()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingSeries {
    pub points: Vec<SeriesPoint>,
}

impl ReadingSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Turn the raw history payload into a series ordered by time.
///
/// Non-array payloads produce an empty series. Elements without a usable
/// timestamp or distance are dropped. The sort is stable, so readings sharing
/// a timestamp keep their source order.
pub fn ingest_series(raw: &Value, calibration: Option<&LevelCalibration>) -> ReadingSeries {
    let Some(items) = raw.as_array() else {
        return ReadingSeries::default();
    };

    let mut points: Vec<SeriesPoint> = items
        .iter()
        .filter_map(|item| {
            let reading = Reading::from_json(item, calibration);
            let at = reading.timestamp.instant()?;
            let distance = reading.distance?;
            Some(SeriesPoint::new(at, distance, reading.level))
        })
        .collect();

    points.sort_by_key(|p| p.at);
    ReadingSeries::new(points)
}

/// `timestamp` wins when present; `created_on` is only consulted when
/// `timestamp` is missing, null or blank.
fn reading_timestamp(obj: &Map<String, Value>) -> Timestamp {
    match obj.get("timestamp").map(parse_timestamp) {
        None | Some(Timestamp::Missing) => obj
            .get("created_on")
            .map(parse_timestamp)
            .unwrap_or(Timestamp::Missing),
        Some(derived) => derived,
    }
}

pub fn parse_timestamp(value: &Value) -> Timestamp {
    match value {
        Value::Null => Timestamp::Missing,
        Value::String(s) if s.trim().is_empty() => Timestamp::Missing,
        Value::String(s) => parse_time_str(s.trim()).map_or(Timestamp::Invalid, Timestamp::At),
        // Numbers are epoch milliseconds
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| Utc.timestamp_millis_opt(ms as i64).single())
            .map_or(Timestamp::Invalid, Timestamp::At),
        _ => Timestamp::Invalid,
    }
}

fn parse_time_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(at.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return DASHBOARD_TZ
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}
