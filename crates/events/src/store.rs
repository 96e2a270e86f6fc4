//! The notification store.
//!
//! A single actor task owns the ordered collection; [`NotificationStore`]
//! handles send it commands over an mpsc channel and await a oneshot ack, so
//! every mutation (including timer-driven expiry) is applied in one place and
//! in arrival order. After each mutation the actor publishes the full
//! collection on a `watch` channel, which backs both the synchronous getters
//! and [`NotificationStore::subscribe`].

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::Utc;
use gestora_core::notification::{Notification, NotificationId, NotificationType, NotifyOptions};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::NotificationStoreConfig;
use crate::scheduler::{ScheduledTask, Scheduler};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

enum Command {
    Add {
        notification: Notification,
        auto_remove: Option<Duration>,
        ack: oneshot::Sender<()>,
    },
    Remove {
        id: NotificationId,
        ack: oneshot::Sender<bool>,
    },
    /// Sent by an auto-removal timer; no-op if the id is already gone.
    Expire { id: NotificationId },
    MarkAsRead {
        id: NotificationId,
        ack: oneshot::Sender<bool>,
    },
    MarkAllAsRead { ack: oneshot::Sender<usize> },
    ClearAll { ack: oneshot::Sender<usize> },
    Shutdown { ack: oneshot::Sender<()> },
}

// ---------------------------------------------------------------------------
// NotificationStore
// ---------------------------------------------------------------------------

/// Handle to the notification store actor.
///
/// Cheap to clone. Operations on unknown ids are silently ignored, and once
/// the actor has shut down every mutation becomes a logged no-op.
#[derive(Clone)]
pub struct NotificationStore {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Vec<Notification>>,
    default_auto_remove: Duration,
}

impl NotificationStore {
    /// Spawn the actor on the current runtime and return a handle to it.
    pub fn spawn(config: NotificationStoreConfig, scheduler: Scheduler) -> (Self, JoinHandle<()>) {
        let (commands, inbox) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(Vec::new());

        let actor = StoreActor {
            notifications: VecDeque::with_capacity(config.max_notifications),
            timers: HashMap::new(),
            max_notifications: config.max_notifications.max(1),
            scheduler,
            expiry: commands.downgrade(),
            state: state_tx,
        };
        let handle = tokio::spawn(actor.run(inbox));

        let store = Self {
            commands,
            state,
            default_auto_remove: config.auto_remove_delay,
        };
        (store, handle)
    }

    /// Add a notification and return its id.
    ///
    /// The record is prepended; if the collection then exceeds capacity the
    /// oldest entries are evicted. Non-persistent records are scheduled for
    /// removal after `options.auto_remove_delay` (or the store default).
    pub async fn add(
        &self,
        message: impl Into<String>,
        notification_type: NotificationType,
        options: NotifyOptions,
    ) -> NotificationId {
        let id = Uuid::now_v7();
        let notification = Notification::new(id, notification_type, message, &options, Utc::now());

        let auto_remove = if notification.persistent {
            None
        } else {
            Some(options.auto_remove_delay.unwrap_or(self.default_auto_remove))
                .filter(|delay| !delay.is_zero())
        };

        self.request(|ack| Command::Add {
            notification,
            auto_remove,
            ack,
        })
        .await;
        id
    }

    /// Remove a notification. Returns `false` if it was not present.
    pub async fn remove(&self, id: NotificationId) -> bool {
        self.request(|ack| Command::Remove { id, ack })
            .await
            .unwrap_or(false)
    }

    /// Mark a notification as read. Returns `false` if it was absent or
    /// already read.
    pub async fn mark_as_read(&self, id: NotificationId) -> bool {
        self.request(|ack| Command::MarkAsRead { id, ack })
            .await
            .unwrap_or(false)
    }

    /// Mark every notification as read. Returns how many changed.
    pub async fn mark_all_as_read(&self) -> usize {
        self.request(|ack| Command::MarkAllAsRead { ack })
            .await
            .unwrap_or(0)
    }

    /// Remove every notification. Returns how many were removed.
    pub async fn clear_all(&self) -> usize {
        self.request(|ack| Command::ClearAll { ack })
            .await
            .unwrap_or(0)
    }

    /// Current collection, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.borrow().clone()
    }

    /// Number of unread notifications, computed on every call.
    pub fn unread_count(&self) -> usize {
        self.state.borrow().iter().filter(|n| !n.read).count()
    }

    /// Subscribe to the collection. The receiver observes every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.state.clone()
    }

    /// Typed producers for each notification type.
    pub fn notify(&self) -> Notify<'_> {
        Notify { store: self }
    }

    /// Stop the actor and cancel all pending auto-removal timers.
    pub async fn shutdown(&self) {
        self.request(|ack| Command::Shutdown { ack }).await;
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Option<T> {
        let (ack, response) = oneshot::channel();
        if self.commands.send(command(ack)).is_err() {
            tracing::warn!("Notification store is closed; command dropped");
            return None;
        }
        response.await.ok()
    }
}

// ---------------------------------------------------------------------------
// Notify
// ---------------------------------------------------------------------------

/// Convenience producers that preset the notification type.
///
/// `error` and `system` notifications are persistent unless the options say
/// otherwise.
pub struct Notify<'a> {
    store: &'a NotificationStore,
}

impl Notify<'_> {
    pub async fn success(&self, message: impl Into<String>, options: NotifyOptions) -> NotificationId {
        self.store.add(message, NotificationType::Success, options).await
    }

    pub async fn error(&self, message: impl Into<String>, options: NotifyOptions) -> NotificationId {
        self.store.add(message, NotificationType::Error, options).await
    }

    pub async fn warning(&self, message: impl Into<String>, options: NotifyOptions) -> NotificationId {
        self.store.add(message, NotificationType::Warning, options).await
    }

    pub async fn info(&self, message: impl Into<String>, options: NotifyOptions) -> NotificationId {
        self.store.add(message, NotificationType::Info, options).await
    }

    pub async fn system(&self, message: impl Into<String>, options: NotifyOptions) -> NotificationId {
        self.store.add(message, NotificationType::System, options).await
    }
}

// ---------------------------------------------------------------------------
// StoreActor
// ---------------------------------------------------------------------------

struct StoreActor {
    notifications: VecDeque<Notification>,
    timers: HashMap<NotificationId, ScheduledTask>,
    max_notifications: usize,
    scheduler: Scheduler,
    /// Weak so pending timers don't keep the actor alive.
    expiry: mpsc::WeakUnboundedSender<Command>,
    state: watch::Sender<Vec<Notification>>,
}

impl StoreActor {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = inbox.recv().await {
            match command {
                Command::Add {
                    notification,
                    auto_remove,
                    ack,
                } => {
                    self.insert(notification, auto_remove);
                    let _ = ack.send(());
                }
                Command::Remove { id, ack } => {
                    let _ = ack.send(self.remove(id));
                }
                Command::Expire { id } => {
                    if self.remove(id) {
                        tracing::debug!(%id, "Notification auto-removed");
                    }
                }
                Command::MarkAsRead { id, ack } => {
                    let _ = ack.send(self.mark_as_read(id));
                }
                Command::MarkAllAsRead { ack } => {
                    let _ = ack.send(self.mark_all_as_read());
                }
                Command::ClearAll { ack } => {
                    let _ = ack.send(self.clear_all());
                }
                Command::Shutdown { ack } => {
                    self.scheduler.shutdown();
                    self.timers.clear();
                    let _ = ack.send(());
                    break;
                }
            }
        }
        tracing::debug!("Notification store stopped");
    }

    fn insert(&mut self, notification: Notification, auto_remove: Option<Duration>) {
        let id = notification.id;
        self.notifications.push_front(notification);

        while self.notifications.len() > self.max_notifications {
            if let Some(evicted) = self.notifications.pop_back() {
                self.cancel_timer(evicted.id);
            }
        }

        if let Some(delay) = auto_remove {
            let expiry = self.expiry.clone();
            let task = self.scheduler.submit(delay, async move {
                if let Some(commands) = expiry.upgrade() {
                    let _ = commands.send(Command::Expire { id });
                }
            });
            self.timers.insert(id, task);
        }

        self.publish();
    }

    fn remove(&mut self, id: NotificationId) -> bool {
        let Some(index) = self.notifications.iter().position(|n| n.id == id) else {
            return false;
        };
        self.notifications.remove(index);
        self.cancel_timer(id);
        self.publish();
        true
    }

    fn mark_as_read(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                self.publish();
                true
            }
            _ => false,
        }
    }

    fn mark_all_as_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.publish();
        }
        changed
    }

    fn clear_all(&mut self) -> usize {
        let removed = self.notifications.len();
        self.notifications.clear();
        for (_, task) in self.timers.drain() {
            task.cancel();
        }
        self.publish();
        removed
    }

    fn cancel_timer(&mut self, id: NotificationId) {
        if let Some(task) = self.timers.remove(&id) {
            task.cancel();
        }
    }

    fn publish(&self) {
        self.state
            .send_replace(self.notifications.iter().cloned().collect());
    }
}
