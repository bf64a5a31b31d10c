#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod controller;
pub mod db;
pub mod http;
pub mod liveness;
pub mod middleware;
pub mod model;
pub mod shutdown;
