use serde::{Deserialize, Serialize};

/// Read-only request method an upstream source is queried with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FetchMethod {
    #[default]
    Get,
}

/// Raw `WorkType` values a source uses for permanent placement.
/// Values are compared exactly, the way each vendor spells them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkTypeRule {
    pub accepted: Vec<String>,
}

impl WorkTypeRule {
    pub fn new<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepts(&self, raw: &str) -> bool {
        self.accepted.iter().any(|value| value == raw)
    }
}

/// One upstream endpoint contributing job records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub method: FetchMethod,
    #[serde(rename = "accepted_work_types")]
    pub rule: WorkTypeRule,
    /// A failed read on a critical source can abort the whole aggregation,
    /// depending on the configured failure policy.
    #[serde(default)]
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "raw", rename_all = "snake_case")]
pub enum WorkType {
    Permanent,
    Travel,
    PerDiem,
    Other(String),
}

impl WorkType {
    /// Classify a raw vendor value. The source rule decides what counts as
    /// permanent; the numeric vendor codes cover the rest.
    pub fn classify(raw: &str, rule: &WorkTypeRule) -> Self {
        if rule.accepts(raw) {
            return WorkType::Permanent;
        }
        match raw {
            "1" => WorkType::Travel,
            "3" => WorkType::PerDiem,
            other => WorkType::Other(other.to_string()),
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, WorkType::Permanent)
    }
}

/// One normalized job listing ready for display.
///
/// Fields shown as table columns serialize under their column key, so a
/// table widget can read `record[column.key]` directly. The camelCase
/// names are still accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Id of the source spec that produced this record.
    pub origin: String,
    #[serde(rename = "SourceID", alias = "sourceId")]
    pub source_id: String,
    pub title: Option<String>,
    #[serde(rename = "WorkType", alias = "rawWorkType")]
    pub raw_work_type: String,
    /// Classified work type; the `WorkType` key carries the raw vendor value.
    #[serde(rename = "workCategory")]
    pub work_type: WorkType,
    #[serde(rename = "StatusString", alias = "status")]
    pub status: Option<String>,
    #[serde(rename = "SourceName", alias = "vmsName")]
    pub vms_name: Option<String>,
    #[serde(rename = "Positions", alias = "openPositions")]
    pub open_positions: Option<u32>,
    #[serde(rename = "Degree", alias = "profession")]
    pub profession: Option<String>,
    #[serde(rename = "JobSpecialty", alias = "specialty")]
    pub specialty: Option<String>,
    #[serde(rename = "Facility", alias = "facility")]
    pub facility: Option<String>,
    #[serde(rename = "Address", alias = "address")]
    pub address: Option<String>,
    #[serde(rename = "City", alias = "city")]
    pub city: Option<String>,
    #[serde(rename = "State", alias = "state")]
    pub state: Option<String>,
    #[serde(rename = "Shift", alias = "shift")]
    pub shift: Option<String>,
    #[serde(rename = "DurationWeeks", alias = "durationWeeks")]
    pub duration_weeks: Option<u32>,
    #[serde(rename = "BillRate", alias = "billRate")]
    pub bill_rate: Option<f64>,
    pub on_call_rate: Option<f64>,
    pub bonus: Option<String>,
    pub guaranteed_hours: Option<String>,
    #[serde(rename = "PostDate", alias = "postDate")]
    pub post_date: Option<String>,
    #[serde(rename = "StartDate", alias = "startDate")]
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Vendor-supplied HTML, kept verbatim.
    pub description: Option<String>,
    pub flag_note: Option<String>,
    pub is_hot: bool,
    pub is_auto_offer: bool,
}

impl JobRecord {
    /// A record with only its identity filled in.
    pub fn new(
        origin: impl Into<String>,
        source_id: impl Into<String>,
        raw_work_type: impl Into<String>,
        work_type: WorkType,
    ) -> Self {
        Self {
            origin: origin.into(),
            source_id: source_id.into(),
            title: None,
            raw_work_type: raw_work_type.into(),
            work_type,
            status: None,
            vms_name: None,
            open_positions: None,
            profession: None,
            specialty: None,
            facility: None,
            address: None,
            city: None,
            state: None,
            shift: None,
            duration_weeks: None,
            bill_rate: None,
            on_call_rate: None,
            bonus: None,
            guaranteed_hours: None,
            post_date: None,
            start_date: None,
            end_date: None,
            description: None,
            flag_note: None,
            is_hot: false,
            is_auto_offer: false,
        }
    }
}

/// How a presenter should draw a cell beyond printing its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderRule {
    /// `MM/DD/YY`, blank when absent, `Invalid Date` when unparseable.
    ShortDate,
    /// Colored status label followed by flag badges.
    StatusBadge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterVariant {
    #[default]
    Text,
    Autocomplete,
    MultiSelect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub width: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderRule>,
    pub filter: FilterVariant,
    pub click_to_copy: bool,
}

/// Ordered list of displayed columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnManifest {
    pub columns: Vec<ColumnSpec>,
}

impl ColumnManifest {
    pub fn column(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.key == key)
    }
}

// Presenters are sinks: they receive the full aggregated sequence once per
// fetch cycle and own every interactive concern (sorting, filtering,
// grouping, pagination) themselves.
pub trait Presenter {
    fn present(&mut self, manifest: &ColumnManifest, records: &[JobRecord]) -> anyhow::Result<()>;
}
