//! HTTP server: shared host, route table and the fluent builder

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::ConfirmRequest;
pub use host::{FormHost, ServerHost};
pub use router::{CONFIRM_PATH, build_routes};
