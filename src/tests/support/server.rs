// Application server bootstrap for integration tests.
use crate::app::App;
use crate::config;
use crate::liveness;
use crate::shutdown::GracefulShutdown;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Running application instance bound to an ephemeral port.
pub struct TestServer {
    addr: String,
    app: App,
    shutdown_token: CancellationToken,
    graceful: Arc<GracefulShutdown>,
}

impl TestServer {
    /// Starts the application with the default test config.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::start_with(config::new_test_config()).await
    }

    /// Starts the application and waits until the health endpoint answers.
    pub async fn start_with(
        cfg: config::Config,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let shutdown_token = CancellationToken::new();
        let probe = Arc::new(liveness::Probe::new());
        let app = App::new(shutdown_token.clone(), cfg, probe).await?;

        let graceful = Arc::new(GracefulShutdown::new(shutdown_token.clone()));
        graceful.add(1);
        app.serve(graceful.clone()).await?;

        // Wait for the listener to be bound
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        let bound = loop {
            if let Some(addr) = app.local_addr() {
                break addr;
            }
            if tokio::time::Instant::now() >= deadline {
                return Err("timed out waiting for server to bind".into());
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        };
        let addr = format!("127.0.0.1:{}", bound.port());

        // Wait for the app to become alive by checking health endpoint
        let health_url = format!("http://{}/healthz", addr);
        loop {
            if let Ok(resp) = reqwest::get(&health_url).await {
                if resp.status().is_success() {
                    break;
                }
            }
            if tokio::time::Instant::now() >= deadline {
                return Err("timed out waiting for server to become alive".into());
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok(Self {
            addr,
            app,
            shutdown_token,
            graceful,
        })
    }

    /// Base URL, e.g. `http://127.0.0.1:40123`.
    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Application under test, for direct storage assertions.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Roster of an activity straight from storage.
    pub fn roster(&self, activity: &str) -> Vec<String> {
        self.app
            .storage()
            .get(activity)
            .map(|a| a.participants)
            .unwrap_or_default()
    }

    /// Stops the server and waits for it to close.
    pub async fn stop(self) {
        self.shutdown_token.cancel();
        let _ = tokio::time::timeout(Duration::from_secs(5), async {
            while self.graceful.pending() > 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
    }
}
