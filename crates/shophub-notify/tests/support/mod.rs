//! Shared test doubles and helpers for engine integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use shophub_core::config::notifications::NotificationsConfig;
use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::id::{NotificationId, UserId};
use shophub_entity::notification::{Notification, NotificationDraft, NotificationSound};
use shophub_notify::engine::NotificationEngine;
use shophub_notify::identity::IdentitySource;
use shophub_notify::persistence::NotificationPersistence;
use shophub_notify::surface::{AlertSurface, NotificationAudio, TransientAlert};
use shophub_notify::transport::{NotificationTransport, TransportEvent, TransportSubscription};

/// Transport double: hands out an mpsc-backed subscription per connect.
pub struct MockTransport {
    buffer: usize,
    sender: Mutex<Option<mpsc::Sender<TransportEvent>>>,
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub fail_connect: AtomicBool,
}

impl MockTransport {
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer,
            sender: Mutex::new(None),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            fail_connect: AtomicBool::new(false),
        }
    }

    /// Current subscription sender, if connected.
    pub fn sender(&self) -> Option<mpsc::Sender<TransportEvent>> {
        self.sender.lock().unwrap().clone()
    }

    /// Emits an inbound notification on the live subscription.
    pub async fn emit(&self, draft: NotificationDraft) {
        let sender = self.sender().expect("transport not connected");
        sender
            .send(TransportEvent::Notification(draft))
            .await
            .expect("subscription closed");
    }
}

#[async_trait]
impl NotificationTransport for MockTransport {
    async fn connect(&self, _identity: UserId) -> AppResult<TransportSubscription> {
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(AppError::transport("connect refused"));
        }
        let (tx, rx) = mpsc::channel(self.buffer);
        *self.sender.lock().unwrap() = Some(tx);
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(TransportSubscription { events: rx })
    }

    async fn disconnect(&self) -> AppResult<()> {
        self.sender.lock().unwrap().take();
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn trigger_demo_notification(&self) -> AppResult<()> {
        match self.sender() {
            Some(tx) => {
                let draft = NotificationDraft::new("Test notification", "Delivery is working");
                tx.send(TransportEvent::Notification(draft))
                    .await
                    .map_err(|_| AppError::transport("subscription closed"))
            }
            None => Err(AppError::transport("not connected")),
        }
    }
}

/// Persistence double recording every call; optionally failing all of
/// them.
pub struct MockPersistence {
    pub calls: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl MockPersistence {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::persistence("remote unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationPersistence for MockPersistence {
    async fn add(&self, notification: &Notification) -> AppResult<()> {
        self.record(format!("add:{}", notification.title))
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        self.record(format!("mark_read:{id}"))
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        self.record("mark_all_read".to_string())
    }

    async fn clear(&self, id: NotificationId) -> AppResult<()> {
        self.record(format!("clear:{id}"))
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.record("clear_all".to_string())
    }
}

/// Audio double recording preloads and plays.
pub struct MockAudio {
    pub preloads: AtomicUsize,
    pub plays: Mutex<Vec<NotificationSound>>,
    pub fail: AtomicBool,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            preloads: AtomicUsize::new(0),
            plays: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn play_count(&self) -> usize {
        self.plays.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationAudio for MockAudio {
    async fn preload(&self) {
        self.preloads.fetch_add(1, Ordering::SeqCst);
    }

    async fn play(&self, sound: NotificationSound) -> AppResult<()> {
        self.plays.lock().unwrap().push(sound);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::playback("decoder failed"));
        }
        Ok(())
    }
}

/// Alert surface double recording shown alerts.
pub struct MockAlerts {
    pub shown: Mutex<Vec<TransientAlert>>,
}

impl MockAlerts {
    pub fn new() -> Self {
        Self {
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl AlertSurface for MockAlerts {
    fn show(&self, alert: TransientAlert) {
        self.shown.lock().unwrap().push(alert);
    }
}

/// Identity source backed by a watch channel owned by the test.
pub struct WatchIdentitySource {
    rx: watch::Receiver<Option<UserId>>,
}

impl WatchIdentitySource {
    pub fn new() -> (watch::Sender<Option<UserId>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self { rx })
    }
}

impl IdentitySource for WatchIdentitySource {
    fn watch(&self) -> watch::Receiver<Option<UserId>> {
        self.rx.clone()
    }
}

/// An engine wired to mock collaborators.
pub struct TestEngine {
    pub engine: NotificationEngine,
    pub transport: Arc<MockTransport>,
    pub persistence: Arc<MockPersistence>,
    pub audio: Arc<MockAudio>,
    pub alerts: Arc<MockAlerts>,
}

pub fn engine() -> TestEngine {
    engine_with_config(NotificationsConfig::default())
}

pub fn engine_with_config(config: NotificationsConfig) -> TestEngine {
    let transport = Arc::new(MockTransport::new(config.channel_buffer_size));
    let persistence = Arc::new(MockPersistence::new());
    let audio = Arc::new(MockAudio::new());
    let alerts = Arc::new(MockAlerts::new());

    let engine = NotificationEngine::new(
        config,
        transport.clone(),
        persistence.clone(),
        audio.clone(),
        alerts.clone(),
    );

    TestEngine {
        engine,
        transport,
        persistence,
        audio,
        alerts,
    }
}

/// Polls until `predicate` holds, panicking after one second.
pub async fn wait_until(predicate: impl Fn() -> bool) {
    for _ in 0..100 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 1s");
}
