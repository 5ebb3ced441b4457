//! Cell formatting for presenters.
//!
//! Nothing here fails: unparseable dates and absent values turn into
//! placeholders so a bad field never drops its row.

use crate::types::{ColumnSpec, JobRecord, RenderRule};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const NOT_AVAILABLE: &str = "NA";
pub const INVALID_DATE: &str = "Invalid Date";
pub const NO_DESCRIPTION: &str = "No description available.";

/// Status label to badge color. Unlisted statuses are treated as open.
pub const STATUS_PALETTE: &[(&str, &str)] = &[
    ("Closed", "#c62828"),
    ("On Hold", "#ff9800"),
    ("Pending", "#999999"),
    ("Interviews occurring", "#03a9f4"),
    ("Cancelled", "#ef5350"),
    ("Filled", "#01579b"),
    ("Engagement Pending", "#9c27b0"),
    ("Temp Block", "#0000ff"),
];
pub const DEFAULT_STATUS_COLOR: &str = "#2e7d32";

pub const NOTE_BADGE: &str = "[note]";
pub const AUTO_OFFER_BADGE: &str = "[auto-offer]";
pub const HOT_BADGE: &str = "🌟";

pub fn status_color(status: &str) -> &'static str {
    STATUS_PALETTE
        .iter()
        .find(|(label, _)| *label == status)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_STATUS_COLOR)
}

pub fn status_label(status: &str) -> &str {
    if status == "O" {
        "Open"
    } else {
        status
    }
}

/// Vendor work type codes as shown in the detail view.
pub fn work_type_label(raw: &str) -> &str {
    match raw {
        "1" => "Travel",
        "2" => "Perm",
        "3" => "Per Diem",
        "" => NOT_AVAILABLE,
        other => other,
    }
}

/// Best-effort date parsing over the formats vendors send.
pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %I:%M:%S %p",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%Y/%m/%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    None
}

/// `MM/DD/YY` for table cells.
pub fn format_short_date(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => " ".to_string(),
        Some(value) => parse_display_date(value)
            .map(|date| date.format("%m/%d/%y").to_string())
            .unwrap_or_else(|| INVALID_DATE.to_string()),
    }
}

/// `MM-DD-YYYY` for the detail view.
pub fn format_long_date(value: Option<&str>) -> String {
    value
        .and_then(parse_display_date)
        .map(|date| date.format("%m-%d-%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

pub fn money(value: Option<String>) -> String {
    format!("$ {}", value.as_deref().unwrap_or(NOT_AVAILABLE))
}

fn number<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Plain value of a column key, before any render rule.
pub fn column_value(record: &JobRecord, key: &str) -> Option<String> {
    match key {
        "SourceID" => Some(record.source_id.clone()).filter(|id| !id.is_empty()),
        "WorkType" => Some(record.raw_work_type.clone()).filter(|raw| !raw.is_empty()),
        "SourceName" => record.vms_name.clone(),
        "StatusString" => record.status.clone(),
        "Positions" => number(record.open_positions),
        "Degree" => record.profession.clone(),
        "JobSpecialty" => record.specialty.clone(),
        "Facility" => record.facility.clone(),
        "Address" => record.address.clone(),
        "City" => record.city.clone(),
        "State" => record.state.clone(),
        "Shift" => record.shift.clone(),
        "DurationWeeks" => number(record.duration_weeks),
        "BillRate" => number(record.bill_rate),
        "StartDate" => record.start_date.clone(),
        "PostDate" => record.post_date.clone(),
        "EndDate" => record.end_date.clone(),
        "Title" => record.title.clone(),
        _ => None,
    }
}

pub fn render_cell(column: &ColumnSpec, record: &JobRecord) -> String {
    let value = column_value(record, &column.key);
    match column.render {
        Some(RenderRule::ShortDate) => format_short_date(value.as_deref()),
        Some(RenderRule::StatusBadge) => render_status(value.as_deref(), record),
        None => value.unwrap_or_default(),
    }
}

fn render_status(status: Option<&str>, record: &JobRecord) -> String {
    let mut cell = status.map(status_label).unwrap_or_default().to_string();
    let badges = [
        (record.flag_note.is_some(), NOTE_BADGE),
        (record.is_auto_offer, AUTO_OFFER_BADGE),
        (record.is_hot, HOT_BADGE),
    ];
    for (_, badge) in badges.iter().filter(|(on, _)| *on) {
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(badge);
    }
    cell
}

/// Expanded row: the description and labelled fields in two columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub description: String,
    pub left: Vec<(&'static str, String)>,
    pub right: Vec<(&'static str, String)>,
}

impl DetailView {
    pub fn from_record(record: &JobRecord) -> Self {
        let source_id = Some(record.source_id.as_str()).filter(|id| !id.is_empty());

        let left = vec![
            ("Job-ID", or_na(source_id)),
            ("Job-Title", or_na(record.title.as_deref())),
            ("Job Type", work_type_label(&record.raw_work_type).to_string()),
            ("Job Status", or_na(record.status.as_deref())),
            ("Job Profession", or_na(record.profession.as_deref())),
            ("Job Speciality", or_na(record.specialty.as_deref())),
            ("Job Facility", or_na(record.facility.as_deref())),
            ("Job Guaranteed Hours", or_na(record.guaranteed_hours.as_deref())),
        ];

        let right = vec![
            ("Job City", or_na(record.city.as_deref())),
            ("Job State", or_na(record.state.as_deref())),
            ("Job On Call Rate", money(number(record.on_call_rate))),
            ("Job Bill Rate", money(number(record.bill_rate))),
            ("VMS Name", or_na(record.vms_name.as_deref())),
            ("Job Start Date", format_long_date(record.start_date.as_deref())),
            ("Job End Date", format_long_date(record.end_date.as_deref())),
            ("Job Posted On", format_long_date(record.post_date.as_deref())),
            ("Job Bonus", money(record.bonus.clone())),
        ];

        Self {
            description: record
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            left,
            right,
        }
    }

    /// Labelled fields in display order, left column first.
    pub fn fields(&self) -> impl Iterator<Item = &(&'static str, String)> {
        self.left.iter().chain(self.right.iter())
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields()
            .find(|(name, _)| *name == label)
            .map(|(_, value)| value.as_str())
    }
}
