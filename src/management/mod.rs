mod credential;
mod memory;

pub use credential::Credential;
pub use credential::CredentialStore;
pub use credential::PgCredentialStore;
pub use credential::StoreError;
pub use memory::MemoryCredentialStore;
