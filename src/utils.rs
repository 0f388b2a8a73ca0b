/// Utility functions
use chrono::{DateTime, Duration, Utc};

/// Instants from `start` to `end` inclusive, `step` apart.
///
/// `end` is only yielded when a step lands on it exactly. A non-positive
/// step yields `start` alone.
pub fn stepped_by(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> SteppedInstants {
    SteppedInstants {
        next: (start <= end).then_some(start),
        end,
        step,
    }
}

#[derive(Debug, Clone)]
pub struct SteppedInstants {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl Iterator for SteppedInstants {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.next?;
        self.next = if self.step <= Duration::zero() {
            None
        } else {
            value
                .checked_add_signed(self.step)
                .filter(|next| *next <= self.end)
        };
        Some(value)
    }
}

/// Linear interpolation between `x` and `y`, absent when `t` is.
pub fn lerp(x: f64, y: f64, t: Option<f64>) -> Option<f64> {
    t.map(|t| x * (1.0 - t) + y * t)
}
