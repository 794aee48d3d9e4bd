// astro-report-service/src/models.rs

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::{ReportError, Result};

/// Immutable birth parameters for one report subject. Created once per
/// request after validation and passed by value to every upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthParameters {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub min: u32,
    pub lat: f64,
    pub lon: f64,
    pub tzone: f64,
    pub house_type: String,
}

fn req_num(body: &Value, field: &str) -> Result<f64> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ReportError::MissingField(field.to_string())),
        Some(v) => v.as_f64().ok_or_else(|| ReportError::OutOfRange {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

fn range_err(field: &str, reason: &str) -> ReportError {
    ReportError::OutOfRange {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

impl BirthParameters {
    /// Extracts and validates birth parameters from a request body.
    /// `house_type` defaults to "placidus" when omitted.
    pub fn from_body(body: &Value) -> Result<Self> {
        let day = req_num(body, "day")? as i64;
        let month = req_num(body, "month")? as i64;
        let year = req_num(body, "year")? as i64;
        let hour = req_num(body, "hour")? as i64;
        let min = req_num(body, "min")? as i64;
        let lat = req_num(body, "lat")?;
        let lon = req_num(body, "lon")?;
        let tzone = req_num(body, "tzone")?;

        if !(0..=23).contains(&hour) {
            return Err(range_err("hour", "must be within 0-23"));
        }
        if !(0..=59).contains(&min) {
            return Err(range_err("min", "must be within 0-59"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(range_err("lat", "must be within -90 to 90"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(range_err("lon", "must be within -180 to 180"));
        }
        if !(-12.0..=14.0).contains(&tzone) {
            return Err(range_err("tzone", "must be within -12 to 14"));
        }
        if NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).is_none() {
            return Err(range_err("day", "day/month/year is not a valid calendar date"));
        }

        let house_type = body
            .get("house_type")
            .and_then(Value::as_str)
            .unwrap_or("placidus")
            .to_string();

        Ok(Self {
            day: day as u32,
            month: month as u32,
            year: year as i32,
            hour: hour as u32,
            min: min as u32,
            lat,
            lon,
            tzone,
            house_type,
        })
    }

    /// Upstream JSON body in the field names the calculation backend expects.
    pub fn to_body(&self) -> Value {
        json!({
            "day": self.day,
            "month": self.month,
            "year": self.year,
            "hour": self.hour,
            "min": self.min,
            "lat": self.lat,
            "lon": self.lon,
            "tzone": self.tzone,
            "house_type": self.house_type,
        })
    }

    /// Prefixed fields (`p_day`, `s_day`, ...) for two-person endpoints.
    pub fn to_prefixed_body(&self, prefix: &str) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(format!("{prefix}day"), json!(self.day));
        map.insert(format!("{prefix}month"), json!(self.month));
        map.insert(format!("{prefix}year"), json!(self.year));
        map.insert(format!("{prefix}hour"), json!(self.hour));
        map.insert(format!("{prefix}min"), json!(self.min));
        map.insert(format!("{prefix}lat"), json!(self.lat));
        map.insert(format!("{prefix}lon"), json!(self.lon));
        map.insert(format!("{prefix}tzone"), json!(self.tzone));
        Value::Object(map)
    }

    pub fn birth_line(&self) -> String {
        format!(
            "{:02}-{:02}-{} {:02}:{:02} ({}{:.1})",
            self.day,
            self.month,
            self.year,
            self.hour,
            self.min,
            if self.tzone >= 0.0 { "+" } else { "" },
            self.tzone
        )
    }
}

/// One person of a two-person (synastry / match-making) request.
/// `date_of_birth` is `DD-MM-YYYY`; `time_of_birth` is `HH:MM` with an
/// optional ` AM`/` PM` suffix.
#[derive(Debug, Clone)]
pub struct PersonParameters {
    pub name: String,
    pub birth: BirthParameters,
}

impl PersonParameters {
    pub fn from_body(body: &Value, field: &str) -> Result<Self> {
        let person = body
            .get(field)
            .ok_or_else(|| ReportError::MissingField(field.to_string()))?;
        let name = person
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ReportError::MissingField(format!("{field}.name")))?
            .to_string();
        let dob = person
            .get("date_of_birth")
            .and_then(Value::as_str)
            .ok_or_else(|| ReportError::MissingField(format!("{field}.date_of_birth")))?;
        let tob = person
            .get("time_of_birth")
            .and_then(Value::as_str)
            .ok_or_else(|| ReportError::MissingField(format!("{field}.time_of_birth")))?;

        let (day, month, year) = parse_dob(dob)
            .ok_or_else(|| range_err(&format!("{field}.date_of_birth"), "expected DD-MM-YYYY"))?;
        let (hour, min) = parse_tob(tob).ok_or_else(|| {
            range_err(&format!("{field}.time_of_birth"), "expected HH:MM[ AM/PM]")
        })?;

        let merged = json!({
            "day": day, "month": month, "year": year,
            "hour": hour, "min": min,
            "lat": person.get("lat").cloned().unwrap_or(Value::Null),
            "lon": person.get("lon").cloned().unwrap_or(Value::Null),
            "tzone": person.get("tzone").cloned().unwrap_or(Value::Null),
        });
        let birth = BirthParameters::from_body(&merged).map_err(|e| match e {
            ReportError::MissingField(f) => ReportError::MissingField(format!("{field}.{f}")),
            ReportError::OutOfRange { field: f, reason } => ReportError::OutOfRange {
                field: format!("{field}.{f}"),
                reason,
            },
            other => other,
        })?;

        Ok(Self { name, birth })
    }
}

fn parse_dob(dob: &str) -> Option<(u32, u32, i32)> {
    let mut parts = dob.split('-');
    let day = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim().parse().ok()?;
    let year = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((day, month, year))
}

fn parse_tob(tob: &str) -> Option<(u32, u32)> {
    let tob = tob.trim();
    let (clock, meridiem) = match tob.split_once(' ') {
        Some((c, m)) => (c, Some(m.trim().to_ascii_uppercase())),
        None => (tob, None),
    };
    let (h, m) = clock.split_once(':')?;
    let mut hour: u32 = h.trim().parse().ok()?;
    let min: u32 = m.trim().parse().ok()?;
    match meridiem.as_deref() {
        Some("AM") => {
            if hour == 12 {
                hour = 0;
            }
        }
        Some("PM") => {
            if hour != 12 {
                hour += 12;
            }
        }
        Some(_) => return None,
        None => {}
    }
    Some((hour, min))
}

/// Outcome of one upstream call. Never an Err: failures are recorded,
/// not propagated, so a batch always settles completely.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub key: String,
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl FetchResult {
    pub fn ok(key: impl Into<String>, data: Value) -> Self {
        Self {
            key: key.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Pass,
    Partial,
    Fail,
}

/// Diagnostic triage of a fan-out batch. Never used to block rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FetchSummary {
    pub status: FetchStatus,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failed_keys: Vec<String>,
}

impl FetchSummary {
    pub fn from_results(results: &[FetchResult]) -> Self {
        let total = results.len();
        let succeeded = results.iter().filter(|r| r.success).count();
        let failed_keys: Vec<String> = results
            .iter()
            .filter(|r| !r.success)
            .map(|r| r.key.clone())
            .collect();
        let status = if succeeded == total && total > 0 {
            FetchStatus::Pass
        } else if succeeded > 0 {
            FetchStatus::Partial
        } else {
            FetchStatus::Fail
        };
        Self {
            status,
            total,
            succeeded,
            failed: failed_keys.len(),
            failed_keys,
        }
    }
}

/// Everything fetched for one report instance. Built once, read-only
/// afterwards, discarded with the request. Missing keys are expected;
/// accessors return options and renderers substitute placeholders.
#[derive(Debug, Default)]
pub struct AggregatedReportData {
    map: HashMap<String, Value>,
}

impl AggregatedReportData {
    pub fn from_results(results: Vec<FetchResult>) -> Self {
        let mut map = HashMap::new();
        for r in results {
            if let (true, Some(data)) = (r.success, r.data) {
                map.insert(r.key, data);
            }
        }
        Self { map }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.map.insert(key.into(), value);
    }

    pub fn merge(&mut self, other: AggregatedReportData) {
        self.map.extend(other.map);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Walks `key` then each path segment; `None` at the first absence.
    pub fn at(&self, key: &str, path: &[&str]) -> Option<&Value> {
        let mut cur = self.map.get(key)?;
        for seg in path {
            cur = match cur {
                Value::Object(m) => m.get(*seg)?,
                Value::Array(a) => a.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if cur.is_null() {
            None
        } else {
            Some(cur)
        }
    }

    pub fn str_at(&self, key: &str, path: &[&str]) -> Option<String> {
        self.at(key, path).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn array_at(&self, key: &str, path: &[&str]) -> Option<&Vec<Value>> {
        self.at(key, path)?.as_array()
    }

    /// Display helper: the value at the path, or "N/A".
    pub fn display_at(&self, key: &str, path: &[&str]) -> String {
        self.str_at(key, path).unwrap_or_else(|| "N/A".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Finished report: PDF bytes plus the computed attachment filename.
#[derive(Debug)]
pub struct ReportOutput {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// `<Subject>_<Report>.pdf` with whitespace collapsed to underscores.
pub fn pdf_filename(subject: &str, report: &str) -> String {
    let subject: String = subject.split_whitespace().collect::<Vec<_>>().join("_");
    let subject = if subject.is_empty() {
        "Horoscope".to_string()
    } else {
        subject
    };
    format!("{subject}_{report}.pdf")
}
