use crate::types::{ColumnManifest, ColumnSpec, FilterVariant, RenderRule};

fn column(key: &str, label: &str, width: u16, filter: FilterVariant) -> ColumnSpec {
    ColumnSpec {
        key: key.to_string(),
        label: label.to_string(),
        width,
        render: None,
        filter,
        click_to_copy: true,
    }
}

fn rendered(mut spec: ColumnSpec, rule: RenderRule) -> ColumnSpec {
    spec.render = Some(rule);
    spec
}

/// Columns of the permanent jobs table, in display order.
pub fn default_manifest() -> ColumnManifest {
    use FilterVariant::{Autocomplete, MultiSelect, Text};

    let mut start_date =
        rendered(column("StartDate", "Start Date", 110, Text), RenderRule::ShortDate);
    start_date.click_to_copy = false;
    let mut post_date = rendered(column("PostDate", "Post Date", 110, Text), RenderRule::ShortDate);
    post_date.click_to_copy = false;

    ColumnManifest {
        columns: vec![
            column("SourceID", "Job-Id", 95, Text),
            column("WorkType", "Type", 90, Autocomplete),
            column("SourceName", "VMS", 90, Autocomplete),
            rendered(column("StatusString", "Status", 170, MultiSelect), RenderRule::StatusBadge),
            column("Positions", "Open Position", 90, Autocomplete),
            column("Degree", "Profession", 90, Autocomplete),
            column("JobSpecialty", "Speciality", 150, Autocomplete),
            column("Facility", "Facility", 150, Autocomplete),
            column("Address", "Facility Address", 150, Autocomplete),
            column("City", "City", 150, Autocomplete),
            column("State", "State", 100, Autocomplete),
            column("Shift", "Shift", 150, Autocomplete),
            column("DurationWeeks", "Weeks", 100, Autocomplete),
            column("BillRate", "Bill Rate", 90, Autocomplete),
            start_date,
            post_date,
        ],
    }
}
