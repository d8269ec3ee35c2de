pub mod fetcher;
pub mod paginator;
pub mod port;
pub mod router;

pub use crate::domain::model::{CertificateRecord, Envelope, QueryDescriptor, QueryType};
pub use crate::domain::ports::PageSource;
pub use crate::utils::error::Result;
