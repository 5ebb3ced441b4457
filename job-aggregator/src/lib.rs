pub mod types;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod traits;
pub mod sources;
pub mod aggregator;
pub mod state;
pub mod display;
pub mod manifest;
pub mod presenter;

pub use types::*;
pub use config::AggregatorConfig;
pub use fetcher::Fetcher;
pub use parser::JobParser;
pub use traits::{JobSource, SourceHealth};
pub use sources::{HttpJobSource, VmsPreset};
pub use aggregator::JobAggregator;
pub use state::{Dashboard, DisplayPhase, DisplaySnapshot, DisplayState};
pub use manifest::default_manifest;
pub use presenter::{JsonPresenter, PageSize, Pagination, TablePresenter};
