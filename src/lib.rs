pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::SiteConfig;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use crate::adapters::http::HttpSubmissionTransport;
pub use crate::core::{
    booking::ConsultationFormController, catalog::PageCatalog, intake::ConsultationIntake,
    links::RelatedLinksSelector, notify::NotificationCenter,
};
pub use utils::error::{Result, SiteError};
