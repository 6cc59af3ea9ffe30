pub mod credentials;
pub mod metrics;
pub mod providers;

pub use credentials::CredentialSource;
