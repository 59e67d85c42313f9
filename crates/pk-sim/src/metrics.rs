//! Running counters derived from session events.

/// Monotonic session totals.
///
/// `reward` is the coarse session-level signal: +1 per successful park, −1
/// per rejected assignment.  The decision process computes its own shaped
/// reward on top.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub parked:     u64,
    pub failed:     u64,
    pub departed:   u64,
    /// Wait time of every parked vehicle, in assignment order.
    pub wait_times: Vec<f64>,
    pub reward:     i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_park(&mut self, wait_time: f64) {
        self.parked += 1;
        self.wait_times.push(wait_time);
        self.reward += 1;
    }

    pub fn record_fail(&mut self) {
        self.failed += 1;
        self.reward -= 1;
    }

    pub fn record_departure(&mut self) {
        self.departed += 1;
    }

    /// Mean recorded wait, or 0 before anything has parked.
    pub fn avg_wait(&self) -> f64 {
        if self.wait_times.is_empty() {
            return 0.0;
        }
        self.wait_times.iter().sum::<f64>() / self.wait_times.len() as f64
    }

    /// Assignment attempts so far, successful or not.
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.parked + self.failed
    }

    /// Share of attempts that parked a vehicle, or 0 with no attempts.
    pub fn success_rate(&self) -> f64 {
        match self.attempts() {
            0 => 0.0,
            n => self.parked as f64 / n as f64,
        }
    }
}
