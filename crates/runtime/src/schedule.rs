/// Cancellable repeating frame task.
///
/// The host asks [`FrameSchedule::is_active`] before requesting the next
/// display refresh. Cancellation is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSchedule {
    started: bool,
    cancelled: bool,
    frames: u64,
}

impl FrameSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.cancelled {
            self.started = true;
        }
    }

    pub fn is_active(&self) -> bool {
        self.started && !self.cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop scheduling frames. Returns `false` if already cancelled.
    pub fn cancel(&mut self) -> bool {
        let was_cancelled = self.cancelled;
        self.cancelled = true;
        !was_cancelled
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// Frames completed under this schedule.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_started() {
        let mut s = FrameSchedule::new();
        assert!(!s.is_active());
        s.start();
        assert!(s.is_active());
    }

    #[test]
    fn cancel_is_one_way() {
        let mut s = FrameSchedule::new();
        s.start();
        assert!(s.cancel());
        assert!(!s.cancel());
        s.start();
        assert!(!s.is_active());
        assert!(s.is_cancelled());
    }
}
