//! Demo backend: serves filtered, sorted and paginated list queries over a static post dataset
//! using the same criteria compiler as the clients.

pub mod config;
pub mod dataset;
pub mod error;
pub mod hello;
pub mod posts;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use posts::{Post, PostsQuery, PostsResponse};
pub use server::{Server, ServerBuilder};
