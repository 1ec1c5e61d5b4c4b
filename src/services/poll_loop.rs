use std::future::Future;

use metrics::counter;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Fixed-cadence loop shared by the pollers.
///
/// Each tick runs as its own task, so a slow tick never delays the next one;
/// overlapping ticks render in whatever order they resolve. Returns when
/// `shutdown` flips to `true` or its sender is dropped; ticks still in flight
/// are aborted.
pub async fn run_poll_loop<F, Fut>(
    name: &'static str,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
    tick: F,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    if *shutdown.borrow() {
        return;
    }

    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight = JoinSet::new();

    tracing::info!(
        poller = name,
        interval_ms = every.as_millis() as u64,
        "Poller started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                counter!("poll_ticks_total", "poller" => name).increment(1);
                tracing::debug!(poller = name, in_flight = in_flight.len(), "Poll tick");
                in_flight.spawn(tick());
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!(poller = name, error = %e, "Poll tick panicked");
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    in_flight.abort_all();
    tracing::info!(poller = name, "Poller stopped");
}
