//! Shared test doubles for the sync integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use splitsync::{
    AllowListStore, Credentials, RangeFetcher, Result, RouteEntry, SplitTunnelClient, SyncConfig,
    SyncError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Include list held in memory, counting reads and writes
pub struct MemoryStore {
    routes: Mutex<Vec<RouteEntry>>,
    writes: Mutex<Vec<Vec<RouteEntry>>>,
    reads: AtomicUsize,
    fail_reads: bool,
    accept_writes: bool,
}

impl MemoryStore {
    pub fn with_routes(routes: Vec<RouteEntry>) -> Self {
        Self {
            routes: Mutex::new(routes),
            writes: Mutex::new(Vec::new()),
            reads: AtomicUsize::new(0),
            fail_reads: false,
            accept_writes: true,
        }
    }

    pub fn empty() -> Self {
        Self::with_routes(Vec::new())
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::empty()
        }
    }

    pub fn rejecting_writes(routes: Vec<RouteEntry>) -> Self {
        Self {
            accept_writes: false,
            ..Self::with_routes(routes)
        }
    }

    pub fn writes(&self) -> Vec<Vec<RouteEntry>> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Vec<RouteEntry> {
        self.routes.lock().unwrap().clone()
    }
}

#[async_trait]
impl AllowListStore for MemoryStore {
    async fn routes(&self) -> Result<Vec<RouteEntry>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(SyncError::Api {
                code: 500,
                message: "internal error".into(),
            });
        }
        Ok(self.current())
    }

    async fn replace(&self, routes: &[RouteEntry]) -> Result<bool> {
        self.writes.lock().unwrap().push(routes.to_vec());
        if self.accept_writes {
            *self.routes.lock().unwrap() = routes.to_vec();
        }
        Ok(self.accept_writes)
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("acc", "prof", "token")
}

pub fn fetcher() -> RangeFetcher {
    RangeFetcher::new(SplitTunnelClient::new("unused").unwrap())
}

/// Serve a document with the given IPv4 and IPv6 prefixes at `at`
pub async fn serve_ranges(server: &MockServer, at: &str, v4: &[&str], v6: &[&str]) -> String {
    let prefixes: Vec<_> = v4.iter().map(|p| json!({"ipv4Prefix": p})).collect();
    let ipv6: Vec<_> = v6.iter().map(|p| json!({"ipv6Prefix": p})).collect();

    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "syncToken": "1",
            "prefixes": prefixes,
            "ipv6Prefixes": ipv6,
        })))
        .mount(server)
        .await;

    format!("{}{at}", server.uri())
}

/// A configuration reading `sources` with real-looking credentials
pub fn config(sources: Vec<String>) -> SyncConfig {
    SyncConfig::new(credentials()).with_sources(sources)
}
