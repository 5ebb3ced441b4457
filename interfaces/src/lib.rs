pub mod defs;

pub use defs::{
    ColumnManifest, ColumnSpec, FetchMethod, FilterVariant, JobRecord, Presenter, RenderRule,
    SourceSpec, WorkType, WorkTypeRule,
};
