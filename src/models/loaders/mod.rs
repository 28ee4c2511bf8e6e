pub mod json_store;
pub mod toml_loader;

pub use json_store::{load_failures, load_links, save_failures, save_links};
pub use toml_loader::load_scrape_config;
