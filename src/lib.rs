pub mod access_token;
pub mod api;
pub mod args;
pub mod error;
pub mod server;

pub use error::Error;
