pub mod error;
pub mod follow_ups;
pub mod local_client;
pub mod service;
pub mod shaper;
pub mod summary;

pub use error::DomainError;
pub use local_client::StudentRecordsLocalClient;
pub use service::Service;
pub use shaper::ResultShaper;
