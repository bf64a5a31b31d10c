use super::{Api, Assets, Capacity, Config, Logs, Runtime, ServiceBox, Shutdown};
use std::time::Duration;

/// Creates a new test configuration.
///
/// Uses the built-in activity catalogue and port "0" so the OS picks a
/// free port for each server under test.
pub fn new_test_config() -> Config {
    Config {
        service: ServiceBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            runtime: Some(Runtime { num_cpus: 2 }),
            api: Some(Api {
                name: Some("activities_test".to_string()),
                port: Some("0".to_string()),
            }),
            assets: Some(Assets {
                dir: Some("static".to_string()),
            }),
            capacity: Some(Capacity { enforce: true }),
            shutdown: Some(Shutdown {
                timeout: Some(Duration::from_secs(1)),
            }),
            activities: None,
        },
    }
}
