pub mod memory;
pub mod static_identity;

pub use memory::{InMemoryAccessor, Snapshot};
pub use static_identity::StaticIdentityProvider;
