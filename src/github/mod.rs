pub mod client;
pub mod models;
pub mod parser;
pub mod rate_limit;

pub use client::MetadataClient;
pub use models::RateLimit;
pub use parser::parse_repository_url;
