// counter.rs — 状态栏统计数字的步进动画

use std::time::{Duration, Instant};

use anyhow::{bail, Result};

/// Rolls an integer from `start` to `end` over a fixed duration, one unit
/// per tick like an odometer. `value_at` is pure in elapsed time, so any
/// repaint rate sees the same sequence and the same terminal value.
#[derive(Debug, Clone, Copy)]
pub struct CounterAnimation {
    start: i64,
    end: i64,
    step_time_ms: u64,
}

impl CounterAnimation {
    pub fn new(start: i64, end: i64, duration_ms: u64) -> Self {
        let range = (end - start).unsigned_abs();
        // 每步至少 1ms；range 为 0 时立即完成
        let step_time_ms = if range == 0 {
            0
        } else {
            (duration_ms / range).max(1)
        };

        Self {
            start,
            end,
            step_time_ms,
        }
    }

    pub fn value_at(&self, elapsed: Duration) -> i64 {
        if self.step_time_ms == 0 {
            return self.end;
        }

        let steps_total = (self.end - self.start).unsigned_abs();
        let steps_done = (elapsed.as_millis() as u64 / self.step_time_ms).min(steps_total);

        if self.end >= self.start {
            self.start + steps_done as i64
        } else {
            self.start - steps_done as i64
        }
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.value_at(elapsed) == self.end
    }

    /// Display form with the trailing plus, e.g. "500+".
    pub fn display_at(&self, elapsed: Duration) -> String {
        format!("{}+", self.value_at(elapsed))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatCounter {
    pub id: &'static str,
    pub animation: CounterAnimation,
}

/// The stat counters shown in the status bar. All of them share one epoch
/// and hold still during a short startup delay.
#[derive(Debug, Clone)]
pub struct CounterBank {
    counters: Vec<StatCounter>,
    epoch: Instant,
    start_delay: Duration,
}

pub const START_DELAY: Duration = Duration::from_millis(1000);

impl CounterBank {
    pub fn builtin(epoch: Instant) -> Self {
        Self {
            counters: vec![
                StatCounter {
                    id: "turnover",
                    animation: CounterAnimation::new(0, 500, 2000),
                },
                StatCounter {
                    id: "companies",
                    animation: CounterAnimation::new(0, 30, 2000),
                },
            ],
            epoch,
            start_delay: START_DELAY,
        }
    }

    /// Every counter id the UI draws must exist. A typo here is a setup
    /// error worth failing on before the window opens.
    pub fn expect_targets(&self, ids: &[&str]) -> Result<()> {
        for id in ids {
            if !self.counters.iter().any(|c| c.id == *id) {
                bail!("status bar references unknown counter {id:?}");
            }
        }
        Ok(())
    }

    pub fn display(&self, id: &str, now: Instant) -> Option<String> {
        let counter = self.counters.iter().find(|c| c.id == id)?;
        let elapsed = now
            .saturating_duration_since(self.epoch)
            .saturating_sub(self.start_delay);
        Some(counter.animation.display_at(elapsed))
    }
}
