// HTTP module: router assembly and the listening server.

#[path = "server/server.rs"]
pub mod server;

// Re-export middleware interface from the dedicated middleware module
pub use crate::middleware::middleware::Middleware;
pub use crate::middleware::recover_middleware::panics_counter;

// Re-export server types
pub use server::{HttpServer, Server};

// Common controller interface
pub use crate::controller::controller::Controller;
