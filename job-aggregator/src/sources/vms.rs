use crate::types::{FetchMethod, SourceSpec, WorkTypeRule};

pub const DEFAULT_BASE_URL: &str = "https://api.theartemis.ai/api/allvms/dumpByVMS/";

/// The vendor management systems the dashboard reads by default.
/// Each one spells "permanent placement" differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmsPreset {
    Ahsa,
    StaffingEngine,
    Focusone,
}

impl VmsPreset {
    pub const ALL: [VmsPreset; 3] =
        [VmsPreset::Ahsa, VmsPreset::StaffingEngine, VmsPreset::Focusone];

    pub fn id(&self) -> &'static str {
        match self {
            VmsPreset::Ahsa => "ahsa",
            VmsPreset::StaffingEngine => "staffing-engine",
            VmsPreset::Focusone => "focusone",
        }
    }

    /// Path segment under the dump endpoint
    pub fn vms_name(&self) -> &'static str {
        match self {
            VmsPreset::Ahsa => "AHSA",
            VmsPreset::StaffingEngine => "StaffingEngine",
            VmsPreset::Focusone => "Focusone",
        }
    }

    pub fn permanent_work_type(&self) -> &'static str {
        match self {
            VmsPreset::Ahsa => "Perm",
            VmsPreset::StaffingEngine => "Permanent",
            VmsPreset::Focusone => "Direct Hire",
        }
    }

    /// Focusone is awaited as the load-bearing source: its failure aborts
    /// under the critical-only policy.
    pub fn is_critical(&self) -> bool {
        matches!(self, VmsPreset::Focusone)
    }

    pub fn spec(&self, base_url: &str) -> SourceSpec {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        SourceSpec {
            id: self.id().to_string(),
            name: self.vms_name().to_string(),
            url: format!("{}{}", base, self.vms_name()),
            method: FetchMethod::Get,
            rule: WorkTypeRule::new([self.permanent_work_type()]),
            critical: self.is_critical(),
        }
    }

    /// All presets in declaration order
    pub fn default_sources(base_url: &str) -> Vec<SourceSpec> {
        Self::ALL.iter().map(|preset| preset.spec(base_url)).collect()
    }
}
