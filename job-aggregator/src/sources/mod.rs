pub mod http_source;
pub mod vms;

pub use http_source::HttpJobSource;
pub use vms::VmsPreset;
