pub mod export;
pub mod field_extractor;
pub mod links_count;
pub mod progress;

pub use export::{flatten_failures, flatten_links, write_table, Table};
pub use field_extractor::{extract, refine, FieldOutcome};
pub use links_count::{parse_links_count, read_links_count};
pub use progress::{ProgressSink, ScrapeEvent, TracingProgress};
