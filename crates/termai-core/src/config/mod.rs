//! Configuration types

pub mod provider;

pub use provider::{ProviderConfig, resolve_env_api_key, standard_env_vars};
