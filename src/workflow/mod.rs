pub mod description;
pub mod link_ctx;
pub mod link_discovery;

pub use description::{Description, DescriptionPipeline};
pub use link_ctx::LinkCtx;
pub use link_discovery::{Discovered, LinkDiscovery};
