//! Generation-counter debouncing.
//!
//! Each keystroke calls [`Debouncer::schedule`] and sleeps for the debounce delay;
//! after waking, the task only proceeds if its [`Ticket`] is still current, i.e.
//! no newer keystroke arrived in the meantime. The sleeping itself is left to the
//! caller so this works with any timer.

/// Handle returned by [`Debouncer::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede every earlier ticket.
    pub fn schedule(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Invalidate the pending ticket without issuing a new one.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_fires() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule();
        let second = debouncer.schedule();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.is_current(ticket));
        let next = debouncer.schedule();
        assert!(debouncer.is_current(next));
    }
}
