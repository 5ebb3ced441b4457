use crate::types::{JobRecord, SourceFailure, SourceSpec, WorkType};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Upstream field aliases, first present wins.
mod keys {
    pub const SOURCE_ID: &[&str] = &["SourceID"];
    pub const TITLE: &[&str] = &["Title"];
    pub const WORK_TYPE: &[&str] = &["WorkType"];
    pub const STATUS: &[&str] = &["StatusString"];
    pub const VMS_NAME: &[&str] = &["SourceName"];
    pub const POSITIONS: &[&str] = &["Positions"];
    pub const PROFESSION: &[&str] = &["Degree"];
    pub const SPECIALTY: &[&str] = &["JobSpecialty", "speciality"];
    pub const FACILITY: &[&str] = &["Facility", "facility"];
    pub const ADDRESS: &[&str] = &["Address", "facilityAddress"];
    pub const CITY: &[&str] = &["City", "city"];
    pub const STATE: &[&str] = &["State", "state"];
    pub const SHIFT: &[&str] = &["Shift", "shift"];
    pub const WEEKS: &[&str] = &["DurationWeeks", "weeks"];
    pub const BILL_RATE: &[&str] = &["BillRate", "billrate"];
    pub const ON_CALL_RATE: &[&str] = &["OnCallRate"];
    pub const BONUS: &[&str] = &["Bonus"];
    pub const GUARANTEED_HOURS: &[&str] = &["GuaranteedHours"];
    pub const POST_DATE: &[&str] = &["PostDate"];
    pub const START_DATE: &[&str] = &["StartDate", "startDate", "FormattedStartDate"];
    pub const END_DATE: &[&str] = &["EndDate", "endDate"];
    pub const DESCRIPTION: &[&str] = &["Note"];
    pub const FLAG_NOTE: &[&str] = &["CustomField5"];
    pub const HOT: &[&str] = &["HotFL"];
    pub const AUTO_OFFER: &[&str] = &["AutoOffer_Fl"];
}

/// Stateless: the same body always yields the same records.
pub struct JobParser;

impl JobParser {
    /// Parse a response body of the form `[[{record}, ...], ...]`.
    ///
    /// Every record is normalized and classified against the source's rule;
    /// filtering is left to the aggregator. Elements that are not objects
    /// are skipped.
    pub fn parse_records(body: &str, spec: &SourceSpec) -> Result<Vec<JobRecord>, SourceFailure> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| SourceFailure::Shape(format!("body is not JSON: {e}")))?;

        let items = Self::record_array(&document)?;

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(fields) => records.push(Self::normalize(fields, spec)),
                None => debug!("Skipping non-object element {} from {}", index, spec.id),
            }
        }

        info!("Parsed {} records from {}", records.len(), spec.id);
        Ok(records)
    }

    fn record_array(document: &Value) -> Result<&Vec<Value>, SourceFailure> {
        let outer = document
            .as_array()
            .ok_or_else(|| SourceFailure::Shape("top level is not an array".to_string()))?;

        let first = outer
            .first()
            .ok_or_else(|| SourceFailure::Shape("top level array is empty".to_string()))?;

        first
            .as_array()
            .ok_or_else(|| SourceFailure::Shape("first element is not an array".to_string()))
    }

    pub fn normalize(fields: &Map<String, Value>, spec: &SourceSpec) -> JobRecord {
        let raw_work_type = text(fields, keys::WORK_TYPE).unwrap_or_default();
        let work_type = WorkType::classify(&raw_work_type, &spec.rule);

        let mut record = JobRecord::new(
            spec.id.clone(),
            text(fields, keys::SOURCE_ID).unwrap_or_default(),
            raw_work_type,
            work_type,
        );

        record.title = text(fields, keys::TITLE);
        record.status = text(fields, keys::STATUS);
        record.vms_name = text(fields, keys::VMS_NAME);
        record.open_positions = count(fields, keys::POSITIONS);
        record.profession = text(fields, keys::PROFESSION);
        record.specialty = text(fields, keys::SPECIALTY);
        record.facility = text(fields, keys::FACILITY);
        record.address = text(fields, keys::ADDRESS);
        record.city = text(fields, keys::CITY);
        record.state = text(fields, keys::STATE);
        record.shift = text(fields, keys::SHIFT);
        record.duration_weeks = count(fields, keys::WEEKS);
        record.bill_rate = amount(fields, keys::BILL_RATE);
        record.on_call_rate = amount(fields, keys::ON_CALL_RATE);
        record.bonus = text(fields, keys::BONUS);
        record.guaranteed_hours = text(fields, keys::GUARANTEED_HOURS);
        record.post_date = text(fields, keys::POST_DATE);
        record.start_date = text(fields, keys::START_DATE);
        record.end_date = text(fields, keys::END_DATE);
        record.description = text(fields, keys::DESCRIPTION);
        record.flag_note = text(fields, keys::FLAG_NOTE);
        record.is_hot = flag(fields, keys::HOT);
        record.is_auto_offer = flag(fields, keys::AUTO_OFFER);

        record
    }
}

fn lookup<'a>(fields: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn text(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    let value = match lookup(fields, aliases)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn amount(fields: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    let value = match lookup(fields, aliases)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_start_matches('$').replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn count(fields: &Map<String, Value>, aliases: &[&str]) -> Option<u32> {
    let value = amount(fields, aliases)?;
    (value.fract() == 0.0 && value <= u32::MAX as f64).then_some(value as u32)
}

fn flag(fields: &Map<String, Value>, aliases: &[&str]) -> bool {
    match lookup(fields, aliases) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "y")
        }
        _ => false,
    }
}
