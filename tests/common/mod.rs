//! Shared helpers for the HTTP, intake and job tests

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum_test::TestServer;
use pizzeria::core::order::{NewOrder, OrderId, PizzaOrder};
use pizzeria::core::service::OrderStore;
use pizzeria::jobs::RecordingJobQueue;
use pizzeria::server::ServerBuilder;
use pizzeria::storage::InMemoryOrderStore;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// In-memory sink for formatted `tracing` output
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Capture every event on the current thread until the guard drops
    ///
    /// `#[tokio::test]` runs on a current-thread runtime, so spawned tasks
    /// are captured too.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }

    /// Index of the first line containing `needle`
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.contains(needle))
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Store whose every operation fails with the same message
#[derive(Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(anyhow!("{}", self.message))
    }
}

#[async_trait]
impl OrderStore for FailingStore {
    async fn insert(&self, _order: NewOrder) -> Result<PizzaOrder> {
        self.fail()
    }

    async fn find(&self, _id: OrderId) -> Result<Option<PizzaOrder>> {
        self.fail()
    }

    async fn list(&self) -> Result<Vec<PizzaOrder>> {
        self.fail()
    }

    async fn update(&self, _id: OrderId, _order: NewOrder) -> Result<Option<PizzaOrder>> {
        self.fail()
    }

    async fn delete(&self, _id: OrderId) -> Result<bool> {
        self.fail()
    }

    async fn count(&self) -> Result<usize> {
        self.fail()
    }

    async fn find_or_create(&self, _order: NewOrder) -> Result<(PizzaOrder, bool)> {
        self.fail()
    }

    async fn delete_all(&self) -> Result<u64> {
        self.fail()
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Test server over an in-memory store and a recording job queue
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryOrderStore>,
    pub jobs: RecordingJobQueue,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryOrderStore::new());
        let jobs = RecordingJobQueue::new();

        let router = ServerBuilder::new()
            .with_shared_store(store.clone())
            .with_job_queue(jobs.clone())
            .build()
            .expect("router should build");

        Self {
            server: TestServer::new(router),
            store,
            jobs,
        }
    }

    /// Server whose store fails every call
    pub fn failing(message: &str) -> TestServer {
        let router = ServerBuilder::new()
            .with_store(FailingStore::new(message))
            .with_job_queue(RecordingJobQueue::new())
            .build()
            .expect("router should build");
        TestServer::new(router)
    }
}
