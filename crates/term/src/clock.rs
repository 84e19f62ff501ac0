//! Fixed-rate tick scheduling.
//!
//! `FrameClock` works on caller-supplied milliseconds since activation, so it
//! is fully deterministic in tests; the host feeds it `Instant::elapsed`.

/// Hands out frame numbers at a fixed rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period_ms: u64,
    next_due_ms: u64,
    next_frame: u64,
}

impl FrameClock {
    /// Clock ticking `fps` times per second (at least once per second).
    pub fn new(fps: u32) -> Self {
        Self {
            period_ms: (1000 / u64::from(fps.max(1))).max(1),
            next_due_ms: 0,
            next_frame: 0,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Frame number if a tick is due at `now_ms`.
    ///
    /// At most one frame is handed out per call. A host that fell behind by
    /// more than a period resynchronizes instead of replaying missed frames.
    pub fn poll(&mut self, now_ms: u64) -> Option<u64> {
        if now_ms < self.next_due_ms {
            return None;
        }
        let frame = self.next_frame;
        self.next_frame += 1;
        self.next_due_ms += self.period_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.period_ms;
        }
        Some(frame)
    }

    /// Milliseconds to wait from `now_ms` until the next tick is due.
    pub fn until_next(&self, now_ms: u64) -> u64 {
        self.next_due_ms.saturating_sub(now_ms)
    }
}
