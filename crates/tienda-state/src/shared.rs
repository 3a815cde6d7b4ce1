//! # Share-While-Subscribed State
//!
//! Latest-snapshot state holder with reference-counted subscriptions and
//! delayed teardown of the upstream collector.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Share-While-Subscribed Lifecycle                       │
//! │                                                                         │
//! │  subscribe() #1 ──► spawn collector task ──► snapshots flow            │
//! │  subscribe() #2 ──► reuse running collector                            │
//! │       │                                                                 │
//! │  drop #2        ──► still one subscriber, nothing happens              │
//! │  drop #1        ──► zero subscribers: arm grace-window timer           │
//! │       │                                                                 │
//! │       ├── subscribe() within the window ──► timer disarmed,            │
//! │       │                                     collector keeps running    │
//! │       │                                                                 │
//! │       └── window elapses ──► collector aborted                         │
//! │                              (latest snapshot is retained;             │
//! │                               the next subscribe restarts fresh)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The grace window exists so transient resubscribes (a screen rebuilding
//! its observers) reuse the running upstream subscription instead of
//! tearing it down and immediately restarting it.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::Stream;
use tracing::debug;

/// Grace window between the last unsubscribe and collector teardown.
pub const TIMEOUT_MILLIS: u64 = 5_000;

/// Spawns the upstream collector feeding snapshots into the given sender.
type Collector<T> = Box<dyn Fn(watch::Sender<T>) -> JoinHandle<()> + Send + Sync>;

/// Subscriber bookkeeping behind the mutex.
struct Subscribers {
    /// Live subscription guards.
    active: usize,
    /// Bumped on every subscribe and every last-unsubscribe; a pending
    /// teardown only fires if the epoch it captured is still current.
    epoch: u64,
    /// The running collector task, if any.
    collector: Option<JoinHandle<()>>,
}

struct Inner<T> {
    /// Latest snapshot. The watch channel retains it across collector
    /// restarts, so late subscribers replay the last known state.
    tx: watch::Sender<T>,
    start: Collector<T>,
    grace: Duration,
    subscribers: Mutex<Subscribers>,
}

/// Latest-snapshot holder whose upstream runs only while subscribed.
///
/// ## Usage
/// ```rust,ignore
/// let state = SharedState::new(Default::default(), grace, move |tx| {
///     tokio::spawn(async move {
///         loop { /* collect upstream, tx.send_replace(snapshot) */ }
///     })
/// });
///
/// let mut sub = state.subscribe(); // first subscriber starts the collector
/// let snapshot = sub.next().await;
/// ```
pub struct SharedState<T: Clone + Send + Sync + 'static> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Clone for SharedState<T> {
    fn clone(&self) -> Self {
        SharedState {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SharedState<T> {
    /// Creates a holder with the given initial snapshot and collector
    /// factory. Nothing is spawned until the first subscriber arrives.
    pub fn new(
        initial: T,
        grace: Duration,
        start: impl Fn(watch::Sender<T>) -> JoinHandle<()> + Send + Sync + 'static,
    ) -> Self {
        let (tx, _) = watch::channel(initial);

        SharedState {
            inner: Arc::new(Inner {
                tx,
                start: Box::new(start),
                grace,
                subscribers: Mutex::new(Subscribers {
                    active: 0,
                    epoch: 0,
                    collector: None,
                }),
            }),
        }
    }

    /// Returns the latest snapshot without subscribing.
    ///
    /// Does not start the collector; with no subscriber this is whatever
    /// was last retained (or the initial value).
    pub fn current(&self) -> T {
        self.inner.tx.borrow().clone()
    }

    /// Registers a subscriber, starting the collector if it isn't running.
    pub fn subscribe(&self) -> StateSubscription<T> {
        // Take the receiver before the collector can emit, so the first
        // snapshot is never missed.
        let rx = self.inner.tx.subscribe();

        let mut subs = self
            .inner
            .subscribers
            .lock()
            .expect("Subscriber registry poisoned");
        subs.active += 1;
        subs.epoch += 1;

        if subs.collector.is_none() {
            debug!("First subscriber, starting collector");
            subs.collector = Some((self.inner.start)(self.inner.tx.clone()));
        }

        StateSubscription {
            rx,
            _guard: SubscriptionGuard {
                inner: self.inner.clone(),
            },
        }
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Keeps the subscriber count while alive; arms the teardown timer when the
/// last one drops.
struct SubscriptionGuard<T: Clone + Send + Sync + 'static> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        let mut subs = self
            .inner
            .subscribers
            .lock()
            .expect("Subscriber registry poisoned");
        subs.active -= 1;

        if subs.active > 0 {
            return;
        }

        subs.epoch += 1;
        let armed_epoch = subs.epoch;
        drop(subs);

        debug!("Last subscriber gone, arming teardown timer");
        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(inner.grace).await;

            let mut subs = inner
                .subscribers
                .lock()
                .expect("Subscriber registry poisoned");
            // A resubscribe in the meantime moved the epoch on; this timer
            // no longer speaks for the current state.
            if subs.epoch != armed_epoch || subs.active > 0 {
                return;
            }

            if let Some(collector) = subs.collector.take() {
                debug!("Grace window elapsed, stopping collector");
                collector.abort();
            }
        });
    }
}

/// A live subscription to a [`SharedState`].
///
/// Holds the subscriber count up; drop it to release the upstream (after
/// the grace window, if it was the last one).
pub struct StateSubscription<T: Clone + Send + Sync + 'static> {
    rx: watch::Receiver<T>,
    _guard: SubscriptionGuard<T>,
}

impl<T: Clone + Send + Sync + 'static> StateSubscription<T> {
    /// Returns the latest snapshot.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Waits for a snapshot newer than the last one seen and returns it.
    pub async fn next(&mut self) -> T {
        self.rx.changed().await.ok();
        self.rx.borrow_and_update().clone()
    }

    /// Converts into a [`Stream`] of snapshots.
    ///
    /// Replay-one semantics: the current snapshot is yielded first, then
    /// one item per change. The subscription stays registered for the
    /// stream's lifetime.
    pub fn into_stream(self) -> StateStream<T> {
        StateStream {
            stream: WatchStream::new(self.rx),
            _guard: self._guard,
        }
    }
}

/// Snapshot stream returned by [`StateSubscription::into_stream`].
pub struct StateStream<T: Clone + Send + Sync + 'static> {
    stream: WatchStream<T>,
    _guard: SubscriptionGuard<T>,
}

impl<T: Clone + Send + Sync + 'static> Stream for StateStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().stream).poll_next(cx)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_stream::StreamExt;

    /// SharedState over a counter that records how many times the collector
    /// was started and emits one snapshot per start.
    fn counted_state(starts: Arc<AtomicUsize>) -> SharedState<u64> {
        SharedState::new(0, Duration::from_millis(TIMEOUT_MILLIS), move |tx| {
            let n = starts.fetch_add(1, Ordering::SeqCst) as u64 + 1;
            tokio::spawn(async move {
                tx.send_replace(n * 100);
                std::future::pending::<()>().await;
            })
        })
    }

    #[tokio::test]
    async fn test_first_subscriber_starts_collector_once() {
        let starts = Arc::new(AtomicUsize::new(0));
        let state = counted_state(starts.clone());
        assert_eq!(starts.load(Ordering::SeqCst), 0);

        let mut first = state.subscribe();
        let _second = state.subscribe();

        assert_eq!(first.next().await, 100);
        assert_eq!(starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubscribe_within_grace_window_reuses_collector() {
        let starts = Arc::new(AtomicUsize::new(0));
        let state = counted_state(starts.clone());

        let mut sub = state.subscribe();
        assert_eq!(sub.next().await, 100);
        drop(sub);

        // Come back well inside the 5s window.
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        let sub = state.subscribe();

        // Give the (disarmed) timer time to have fired if it were going to.
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(sub.current(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collector_restarts_after_grace_window() {
        let starts = Arc::new(AtomicUsize::new(0));
        let state = counted_state(starts.clone());

        let mut sub = state.subscribe();
        assert_eq!(sub.next().await, 100);
        drop(sub);

        tokio::time::sleep(Duration::from_millis(TIMEOUT_MILLIS + 1_000)).await;

        // The retained snapshot survives the teardown...
        assert_eq!(state.current(), 100);

        // ...and the next subscriber starts a fresh collector.
        let mut sub = state.subscribe();
        assert_eq!(sub.next().await, 200);
        assert_eq!(starts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stream_replays_current_snapshot_first() {
        let starts = Arc::new(AtomicUsize::new(0));
        let state = counted_state(starts.clone());

        let mut sub = state.subscribe();
        assert_eq!(sub.next().await, 100);

        let mut stream = state.subscribe().into_stream();
        assert_eq!(stream.next().await, Some(100));
    }
}
