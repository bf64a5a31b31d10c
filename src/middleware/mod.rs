// Package middleware provides request middlewares applied to the router.

pub mod middleware;
pub mod recover_middleware;
pub mod trace_middleware;
