// Application wiring: storage, HTTP server, lifecycle.

pub mod app;
pub mod server;

pub use app::App;
