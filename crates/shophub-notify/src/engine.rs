//! Notification engine — binds the subscription lifecycle, the filtering
//! pipeline, and the notification list behind one coordinator.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shophub_core::config::notifications::NotificationsConfig;
use shophub_core::types::id::{NotificationId, UserId};
use shophub_entity::notification::{
    DeliveryFrequency, Notification, NotificationDraft, NotificationPreferences, NotificationSound,
    PreferenceUpdate,
};

use crate::filter;
use crate::identity::IdentitySource;
use crate::list::NotificationList;
use crate::persistence::NotificationPersistence;
use crate::preferences::PreferenceStore;
use crate::surface::{AlertSurface, NotificationAudio, TransientAlert};
use crate::transport::{
    ConnectionStatus, NotificationTransport, TransportEvent, TransportSubscription,
};

/// Per-session notification engine.
///
/// One instance per active session, constructed explicitly and torn down
/// explicitly; no ambient singletons. The UI layer reads through the
/// accessors and mutates only through the operations below. Inbound
/// events flow through the filtering pipeline against a preference
/// snapshot read at decision time.
pub struct NotificationEngine {
    /// State shared with the event pump task.
    shared: Arc<EngineShared>,
    /// Realtime transport.
    transport: Arc<dyn NotificationTransport>,
    /// Engine configuration.
    config: NotificationsConfig,
    /// Currently bound identity and its pump task. The lock serializes
    /// bind/teardown transitions.
    binding: Mutex<Binding>,
}

/// State reachable from both the engine and the pump task.
struct EngineShared {
    /// In-memory notification list, newest first.
    list: NotificationList,
    /// Live preference store.
    prefs: PreferenceStore,
    /// Connection status publisher.
    status: watch::Sender<ConnectionStatus>,
    /// Best-effort persistence.
    persistence: Arc<dyn NotificationPersistence>,
    /// Sound playback.
    audio: Arc<dyn NotificationAudio>,
    /// Transient alert surface.
    alerts: Arc<dyn AlertSurface>,
    /// Bumped on every teardown; pump tasks from older generations stop
    /// applying events.
    generation: AtomicU64,
}

#[derive(Default)]
struct Binding {
    identity: Option<UserId>,
    pump: Option<JoinHandle<()>>,
}

impl NotificationEngine {
    /// Creates an engine wired to the given collaborators, idle and
    /// disconnected.
    pub fn new(
        config: NotificationsConfig,
        transport: Arc<dyn NotificationTransport>,
        persistence: Arc<dyn NotificationPersistence>,
        audio: Arc<dyn NotificationAudio>,
        alerts: Arc<dyn AlertSurface>,
    ) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Disconnected);

        Self {
            shared: Arc::new(EngineShared {
                list: NotificationList::new(config.max_stored),
                prefs: PreferenceStore::new(),
                status,
                persistence,
                audio,
                alerts,
                generation: AtomicU64::new(0),
            }),
            transport,
            config,
            binding: Mutex::new(Binding::default()),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Binds the engine to `identity`.
    ///
    /// A differing identity tears down any existing subscription and
    /// clears the list before the new subscription opens; `None` tears
    /// down and reports disconnected. Rebinding the same identity is a
    /// no-op. Transport failures are logged and reflected only through
    /// the connection status.
    pub async fn bind(&self, identity: Option<UserId>) {
        let mut binding = self.binding.lock().await;
        if binding.identity == identity {
            return;
        }

        self.teardown(&mut binding).await;

        let Some(user_id) = identity else {
            return;
        };

        self.shared.set_status(ConnectionStatus::Connecting);

        if self.config.preload_sounds {
            let audio = Arc::clone(&self.shared.audio);
            tokio::spawn(async move { audio.preload().await });
        }

        let subscription = match self.transport.connect(user_id).await {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to open notification subscription");
                self.shared.set_status(ConnectionStatus::Disconnected);
                return;
            }
        };

        let generation = self.shared.generation.load(Ordering::SeqCst);
        let shared = Arc::clone(&self.shared);
        binding.identity = Some(user_id);
        binding.pump = Some(tokio::spawn(async move {
            pump_events(shared, subscription, generation).await;
        }));

        self.shared.set_status(ConnectionStatus::Connected);
        info!(user_id = %user_id, "Notification subscription opened");
    }

    /// Drives `bind` from an identity source until the source closes,
    /// then tears down.
    pub async fn run(&self, source: &dyn IdentitySource) {
        let mut identities = source.watch();
        loop {
            let identity = *identities.borrow_and_update();
            self.bind(identity).await;
            if identities.changed().await.is_err() {
                break;
            }
        }
        self.shutdown().await;
    }

    /// Tears down any live subscription and returns to idle. The list is
    /// cleared; preferences are retained. Idempotent.
    pub async fn shutdown(&self) {
        let mut binding = self.binding.lock().await;
        self.teardown(&mut binding).await;
    }

    async fn teardown(&self, binding: &mut Binding) {
        // Invalidate the live generation first so a pump mid-step stops
        // applying events before the list is cleared below.
        self.shared.generation.fetch_add(1, Ordering::SeqCst);

        if let Some(pump) = binding.pump.take() {
            pump.abort();
            // Wait until the task has actually stopped; afterwards no
            // stale event can reach the list.
            let _ = pump.await;
        }

        if binding.identity.take().is_some() {
            if let Err(e) = self.transport.disconnect().await {
                warn!(error = %e, "Transport disconnect failed");
            }
            info!("Notification subscription closed");
        }

        self.shared.list.clear();
        self.shared.set_status(ConnectionStatus::Disconnected);
    }

    // ── Operations ───────────────────────────────────────────────

    /// Adds a locally created notification.
    ///
    /// Local adds bypass the inbound pipeline: they always produce a
    /// transient alert and, when a sound is configured, playback. The
    /// persistence call is fire-and-forget.
    pub fn add_notification(&self, draft: NotificationDraft) -> Notification {
        let notification = Notification::from_draft(draft);

        self.shared.list.insert(notification.clone());
        self.shared
            .alerts
            .show(TransientAlert::from_notification(&notification));

        let sound = self.shared.prefs.snapshot().sound;
        if sound.is_audible() {
            spawn_playback(Arc::clone(&self.shared.audio), sound);
        }

        let persistence = Arc::clone(&self.shared.persistence);
        let record = notification.clone();
        tokio::spawn(async move {
            if let Err(e) = persistence.add(&record).await {
                warn!(id = %record.id, error = %e, "Failed to persist notification");
            }
        });

        notification
    }

    /// Marks one notification read. The local mutation happens regardless
    /// of the persistence outcome.
    pub fn mark_as_read(&self, id: NotificationId) {
        let persistence = Arc::clone(&self.shared.persistence);
        tokio::spawn(async move {
            if let Err(e) = persistence.mark_read(id).await {
                warn!(id = %id, error = %e, "Failed to persist mark-read");
            }
        });

        self.shared.list.mark_read(id);
    }

    /// Marks every notification read.
    pub fn mark_all_as_read(&self) {
        let persistence = Arc::clone(&self.shared.persistence);
        tokio::spawn(async move {
            if let Err(e) = persistence.mark_all_read().await {
                warn!(error = %e, "Failed to persist mark-all-read");
            }
        });

        self.shared.list.mark_all_read();
    }

    /// Removes one notification.
    pub fn clear_notification(&self, id: NotificationId) {
        let persistence = Arc::clone(&self.shared.persistence);
        tokio::spawn(async move {
            if let Err(e) = persistence.clear(id).await {
                warn!(id = %id, error = %e, "Failed to persist clear");
            }
        });

        self.shared.list.remove(id);
    }

    /// Removes every notification.
    pub fn clear_all_notifications(&self) {
        let persistence = Arc::clone(&self.shared.persistence);
        tokio::spawn(async move {
            if let Err(e) = persistence.clear_all().await {
                warn!(error = %e, "Failed to persist clear-all");
            }
        });

        self.shared.list.clear();
    }

    /// Applies a shallow preference update. Local mutation only.
    pub fn update_preferences(&self, update: PreferenceUpdate) {
        self.shared.prefs.update(update);
    }

    /// Patches one subscription entry. Local mutation only.
    pub fn update_subscription(&self, category: &str, enabled: bool) {
        self.shared.prefs.set_subscription(category, enabled);
    }

    /// Patches one frequency entry. Local mutation only.
    pub fn update_frequency(&self, category: &str, frequency: DeliveryFrequency) {
        self.shared.prefs.set_frequency(category, frequency);
    }

    /// Asks the transport for a synthetic inbound event.
    pub async fn trigger_test_notification(&self) {
        if let Err(e) = self.transport.trigger_demo_notification().await {
            warn!(error = %e, "Demo notification trigger failed");
        }
    }

    // ── Read accessors ───────────────────────────────────────────

    /// Current notifications, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.shared.list.snapshot()
    }

    /// Count of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.shared.list.unread_count()
    }

    /// Current connection status.
    pub fn connection_status(&self) -> ConnectionStatus {
        *self.shared.status.borrow()
    }

    /// Watch stream of connection status changes.
    pub fn watch_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.shared.status.subscribe()
    }

    /// Current preferences.
    pub fn preferences(&self) -> NotificationPreferences {
        self.shared.prefs.snapshot()
    }
}

impl EngineShared {
    /// Publishes a status change; unchanged values do not notify
    /// watchers.
    fn set_status(&self, status: ConnectionStatus) {
        self.status.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }

    /// Whether `generation` still identifies the live subscription.
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Applies one inbound notification through the filtering pipeline.
    fn apply_inbound(&self, draft: NotificationDraft, generation: u64) {
        // Preferences are read here, at decision time, so an update that
        // completed before this event is always visible to the decision.
        let prefs = self.prefs.snapshot();
        let decision = filter::decide(&draft, &prefs);

        if !decision.admit {
            debug!(category = %draft.category, "Inbound notification dropped by preferences");
            return;
        }

        if !self.is_current(generation) {
            return;
        }

        let notification = Notification::from_draft(draft);
        self.list.insert(notification.clone());

        if decision.show_alert {
            self.alerts
                .show(TransientAlert::from_notification(&notification));
        }
        if decision.play_sound {
            spawn_playback(Arc::clone(&self.audio), prefs.sound);
        }
    }
}

/// Drains a subscription's event stream into the engine state.
async fn pump_events(
    shared: Arc<EngineShared>,
    mut subscription: TransportSubscription,
    generation: u64,
) {
    while let Some(event) = subscription.events.recv().await {
        if !shared.is_current(generation) {
            break;
        }
        match event {
            TransportEvent::Status(status) => shared.set_status(status),
            TransportEvent::Notification(draft) => shared.apply_inbound(draft, generation),
        }
    }

    // The transport closed the stream while we were still live: reflect
    // it in the status rather than leaving a stale indicator.
    if shared.is_current(generation) {
        debug!("Notification event stream ended");
        shared.set_status(ConnectionStatus::Disconnected);
    }
}

fn spawn_playback(audio: Arc<dyn NotificationAudio>, sound: NotificationSound) {
    tokio::spawn(async move {
        if let Err(e) = audio.play(sound).await {
            warn!(sound = sound.as_str(), error = %e, "Notification sound playback failed");
        }
    });
}
