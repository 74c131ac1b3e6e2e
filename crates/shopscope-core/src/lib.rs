mod app_config;
mod config;
mod error;
pub mod record;
pub mod repository;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use record::{
    ContactInfo, ImportantLink, Policy, PolicyKind, ProductListing, QaPair, SocialHandle,
    SocialPlatform, StoreRecord, StoreRecordBuilder,
};
pub use repository::{InMemoryStoreRepository, StoreRepository};
