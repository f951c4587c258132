/// Rolling frames-per-second estimate.
///
/// Inter-frame deltas accumulate until their sum exceeds the window, then a
/// single estimate (`1000 / average`) is published and the buffer clears.
/// This throttles how often observers hear about frame timing independent of
/// the tick frequency itself.
#[derive(Clone, Debug)]
pub struct FpsMeter {
    deltas: Vec<f64>,
    window_ms: f64,
}

impl FpsMeter {
    pub const DEFAULT_WINDOW_MS: f64 = 30.0;

    pub fn new() -> Self {
        Self::with_window_ms(Self::DEFAULT_WINDOW_MS)
    }

    pub fn with_window_ms(window_ms: f64) -> Self {
        Self {
            deltas: Vec::new(),
            window_ms,
        }
    }

    /// Record one inter-frame delta in milliseconds. Returns the new
    /// estimate when the window filled.
    pub fn push(&mut self, delta_ms: f64) -> Option<f64> {
        self.deltas.push(delta_ms);
        let sum: f64 = self.deltas.iter().sum();
        if sum < self.window_ms {
            return None;
        }
        let average = sum / self.deltas.len() as f64;
        self.deltas.clear();
        Some(1000.0 / average)
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}
