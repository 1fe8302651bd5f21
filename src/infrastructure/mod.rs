// src/infrastructure/mod.rs
pub mod blob_store;
pub mod config;
pub mod graphql;
pub mod renderer;

pub use blob_store::HttpBlobStore;
pub use config::Config;
pub use graphql::GraphQlGateway;
pub use renderer::ContentRenderer;
