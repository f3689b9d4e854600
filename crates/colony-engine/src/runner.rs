//! Host loop: polls the colony's tick gate on a fixed interval.
//!
//! The loop stands in for an animation-frame or timer callback. It offers a
//! callback every `loop_interval_ms`; the colony's own gate decides which
//! callbacks become ticks. The loop ends when the game is over, when the
//! configured tick limit is reached or when the shutdown future resolves.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use colony_core::{Colony, TickSummary};

/// Why the host loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The colony fell.
    GameOver,
    /// `tick.max_ticks` ticks were admitted.
    MaxTicksReached,
    /// The shutdown signal fired.
    Shutdown,
}

/// Outcome of a host loop run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Ticks admitted during this run.
    pub total_ticks: u64,
    /// The last admitted tick, if any.
    pub final_summary: Option<TickSummary>,
}

/// Drive `colony` until it ends, hits the tick limit or `shutdown` resolves.
pub async fn run(colony: &mut Colony, shutdown: impl Future<Output = ()>) -> RunResult {
    let loop_interval_ms = colony.config().tick.loop_interval_ms.max(1);
    let loop_interval = Duration::from_millis(loop_interval_ms);
    let max_ticks = colony.config().tick.max_ticks;
    let mut interval = tokio::time::interval(loop_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(
        loop_interval_ms,
        max_ticks = ?max_ticks,
        "Host loop starting"
    );

    let mut total_ticks: u64 = 0;
    let mut final_summary = None;

    loop {
        tokio::select! {
            () = &mut shutdown => {
                return RunResult { end_reason: EndReason::Shutdown, total_ticks, final_summary };
            }
            _ = interval.tick() => {}
        }

        let Some(summary) = colony.update(Instant::now()) else {
            continue;
        };
        total_ticks = total_ticks.saturating_add(1);
        log_tick(&summary, colony);
        let game_over = summary.game_over;
        final_summary = Some(summary);

        if game_over {
            return RunResult {
                end_reason: EndReason::GameOver,
                total_ticks,
                final_summary,
            };
        }
        if max_ticks.is_some_and(|max| total_ticks >= max) {
            return RunResult {
                end_reason: EndReason::MaxTicksReached,
                total_ticks,
                final_summary,
            };
        }
    }
}

fn log_tick(summary: &TickSummary, colony: &Colony) {
    if let Some(season) = summary.clock.season_changed {
        info!(tick = summary.tick, ?season, "New season");
    }
    if summary.clock.days_elapsed > 0 {
        info!(
            tick = summary.tick,
            day = colony.state().time.day,
            population = colony.state().population(),
            "New day"
        );
    }
    for death in &summary.population.deaths {
        info!(tick = summary.tick, name = %death.name, cause = %death.cause, "Survivor died");
    }
    for alert in colony.resource_alerts() {
        debug!(tick = summary.tick, kind = ?alert.kind, level = ?alert.level, "Resource alert");
    }
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "Host loop finished"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use colony_core::{MemoryStore, NoOpSink, SimulationConfig};

    use super::*;

    fn fast_colony(max_ticks: Option<u64>) -> Colony {
        let mut config = SimulationConfig::default();
        config.tick.min_tick_interval_ms = 10;
        config.tick.loop_interval_ms = 2;
        config.tick.max_ticks = max_ticks;
        Colony::new(config, Box::new(MemoryStore::new()), Box::new(NoOpSink)).unwrap()
    }

    #[tokio::test]
    async fn stops_at_max_ticks() {
        let mut colony = fast_colony(Some(3));
        let result = run(&mut colony, std::future::pending()).await;
        assert_eq!(result.end_reason, EndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 3);
        assert_eq!(result.final_summary.unwrap().tick, 3);
    }

    #[tokio::test]
    async fn stops_on_shutdown() {
        let mut colony = fast_colony(None);
        let result = run(&mut colony, std::future::ready(())).await;
        assert_eq!(result.end_reason, EndReason::Shutdown);
        assert_eq!(result.total_ticks, 0);
    }

    #[tokio::test]
    async fn stops_on_game_over() {
        let mut colony = fast_colony(Some(100)).with_terminal_predicate(|_| true);
        let result = run(&mut colony, std::future::pending()).await;
        assert_eq!(result.end_reason, EndReason::GameOver);
        assert_eq!(result.total_ticks, 1);
        assert!(colony.is_game_over());
    }
}
