pub mod app_config;
pub mod brand_context;
pub mod config;
pub mod policy;

pub use app_config::{AppConfig, Environment};
pub use brand_context::{BrandContext, Faq, Product};
pub use config::{load_app_config, load_app_config_from_env};
pub use policy::{FailurePolicies, FailurePolicy, Field};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
