// Shared test support code for integration tests.
// Every test starts its own server so roster mutations never leak between tests.

pub mod common;
pub mod server;

pub use common::*;
pub use server::TestServer;
