//! Gestora notification store and business-event alerting.
//!
//! This crate provides the runtime half of the alerting subsystem:
//!
//! - [`Scheduler`] -- delayed task submission with cancellable handles.
//! - [`NotificationStore`] -- bounded, newest-first notification collection
//!   owned by a single actor task; every mutation is serialized.
//! - [`CooldownRegistry`] -- per-entity alert throttling over a durable
//!   [`KeyValueStore`].
//! - [`SnapshotSource`] / [`Snapshot`] -- the data feed the watcher consumes.
//! - [`BusinessEventWatcher`] -- diffs snapshots and emits cooldown-gated
//!   alerts into the store.
//! - [`WatchLoop`] -- periodic driver for the watcher.

pub mod config;
pub mod cooldown;
pub mod error;
pub mod kv;
pub mod poller;
pub mod scheduler;
pub mod source;
pub mod store;
pub mod watcher;

pub use config::{NotificationStoreConfig, WatcherConfig};
pub use cooldown::CooldownRegistry;
pub use error::{KvError, SourceError};
pub use kv::{KeyValueStore, MemoryKvStore, PgKeyValueStore};
pub use poller::WatchLoop;
pub use scheduler::{ScheduledTask, Scheduler};
pub use source::{InMemorySource, PgSnapshotSource, Snapshot, SnapshotSource};
pub use store::{Notify, NotificationStore};
pub use watcher::{BusinessEventWatcher, TickReport};
