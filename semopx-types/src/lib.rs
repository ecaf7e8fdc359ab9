//! Semopx-specific data transfer objects, errors, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod documents;
mod error;
mod record;
mod request;
mod session;

pub use config::{BackoffConfig, SemopxConfig};
pub use connector::ConnectorKey;
pub use documents::{IndexItem, IndexPage, Pagination, ResultDocument, ResultRow};
pub use error::SemopxError;
pub use record::{PriceRecord, PriceReport};
pub use request::{FetchRequest, Granularity, IndexQuery};
pub use session::SessionKind;
