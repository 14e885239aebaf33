pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod model;

pub use config::ClientConfig;
pub use error::ClientError;
pub use gateway::{Document, Gateway};
pub use http::ZmonClient;
pub use memory::InMemoryGateway;
