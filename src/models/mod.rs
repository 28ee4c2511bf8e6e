pub mod failure;
pub mod link;
pub mod loaders;
pub mod scrape_config;
pub mod transform;

pub use failure::{Failure, FailureReason};
pub use link::{Link, Record};
pub use loaders::{load_failures, load_links, load_scrape_config, save_failures, save_links};
pub use scrape_config::{CountInfo, FieldRule, FieldRuleSpec, ScrapeConfig, ScrapeConfigFile};
pub use transform::{Transform, TransformRegistry};
