//! Integration tests for the activities service.
//!
//! Each case boots the full application on an ephemeral port and drives it
//! over HTTP.

mod cases_root_test;

pub mod support;
