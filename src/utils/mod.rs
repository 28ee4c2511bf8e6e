pub mod logging;
pub mod pacing;
pub mod text;

pub use logging::truncate_text;
