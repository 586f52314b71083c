//! Countdown tick loop

use std::sync::Arc;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::{config::TICK_PERIOD, controller::Shared};

/// Publish the remaining time once per tick until the countdown ends or this
/// loop's generation is cancelled.
///
/// The first value is published by the caller before spawning, so the first
/// tick fires one period from now.
pub(crate) async fn countdown_task(shared: Arc<Shared>, generation: u64) {
    debug!("Countdown loop {} started", generation);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    // After a stall, tick once and resume the period from there
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let keep_running = {
            let mut inner = shared.lock();
            shared.step(&mut inner, generation)
        };

        if !keep_running {
            break;
        }
    }

    debug!("Countdown loop {} finished", generation);
}
