// Shared by the wasm front end and the CLI
pub mod cache;
pub mod charts;
pub mod endpoint;
pub mod error;
pub mod hover;
pub mod image;
pub mod nav;
pub mod page;
pub mod record;
pub mod render;
pub mod telemetry;
pub mod view;

pub use cache::{PlayerCache, RecordSource};
pub use endpoint::Endpoint;
pub use error::{ApiError, ChartError};
pub use page::Page;
pub use record::{Metric, PlayerRecord};
pub use telemetry::{ClientEvent, TelemetrySink};
