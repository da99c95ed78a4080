//! Shared utilities for integration tests.
//!
//! Each test starts its own server on an ephemeral port; dropping the
//! returned `TestServer` shuts it down.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use docs_frontend::config::{AuthConfig, FrontendConfig};
use docs_frontend::docs::{ContentResolver, DirectorySource, MarkdownRenderer};
use docs_frontend::http::{serve, HttpServer};
use docs_frontend::lifecycle::Shutdown;
use docs_frontend::security::Transport;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[allow(dead_code)]
pub const USERNAME: &str = "reader";
#[allow(dead_code)]
pub const PASSWORD: &str = "let-me-in";
#[allow(dead_code)]
pub const HTTPS_HOST: &str = "docs.example.com:8443";
#[allow(dead_code)]
pub const SOURCE_BASE: &str = "example.org/tool";
#[allow(dead_code)]
pub const SOURCE_REPO: &str = "https://git.example.org/tool";

/// Directory holding the fixture documents.
pub fn testdata_docs() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/doc")
}

/// Configuration used by most tests: credentials required, fixed HTTPS host.
#[allow(dead_code)]
pub fn test_config() -> FrontendConfig {
    let mut config = FrontendConfig::default();
    config.security.https_host = HTTPS_HOST.to_string();
    config.auth = Some(AuthConfig {
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        realm: "docs".to_string(),
    });
    config.vanity.source_base = SOURCE_BASE.to_string();
    config.vanity.source_repo = SOURCE_REPO.to_string();
    config
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: Option<JoinHandle<()>>,
}

impl TestServer {
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server whose requests are tagged with `transport`.
///
/// The sockets are plain TCP either way; tagging as `Tls` exercises the
/// HTTPS code path without certificates.
pub async fn start_server(config: FrontendConfig, transport: Transport) -> TestServer {
    let resolver = ContentResolver::load(
        Arc::new(DirectorySource::new(testdata_docs())),
        Arc::new(MarkdownRenderer::new()),
    )
    .unwrap();
    let server = HttpServer::new(config, Arc::new(resolver)).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server.app(transport);

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let task = tokio::spawn(async move {
        serve(listener, app, rx).await.unwrap();
    });

    TestServer {
        addr,
        shutdown,
        task: Some(task),
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
