/// Token for the single pending frame callback. Tickets carry the generation
/// of the mount that issued them, so a ticket from an earlier mount never
/// matches after a remount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
    frame: u64,
}

impl FrameTicket {
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// At most one outstanding frame ticket at a time
#[derive(Debug, Default)]
pub struct FrameLoop {
    generation: u64,
    frame: u64,
    pending: Option<FrameTicket>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new generation and schedule its first frame
    pub fn start(&mut self) -> FrameTicket {
        self.generation += 1;
        self.frame = 0;
        self.pending = None;
        self.schedule()
    }

    /// Drop the pending ticket; outstanding copies become stale
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Consume `ticket` if it is the pending one. Stale or already fired tickets
    /// return false.
    pub fn fire(&mut self, ticket: FrameTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Schedule the next frame of the current generation. Returns the existing
    /// ticket if one is already pending.
    pub fn schedule(&mut self) -> FrameTicket {
        if let Some(ticket) = self.pending {
            return ticket;
        }
        self.frame += 1;
        let ticket = FrameTicket {
            generation: self.generation,
            frame: self.frame,
        };
        self.pending = Some(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_fires_once() {
        let mut frames = FrameLoop::new();
        let ticket = frames.start();
        assert!(frames.fire(ticket));
        assert!(!frames.fire(ticket));
        assert!(!frames.is_pending());
    }

    #[test]
    fn schedule_keeps_a_single_ticket() {
        let mut frames = FrameLoop::new();
        let first = frames.start();
        assert_eq!(frames.schedule(), first);

        frames.fire(first);
        let second = frames.schedule();
        assert_eq!(second.frame(), first.frame() + 1);
    }

    #[test]
    fn cancelled_ticket_is_stale_after_restart() {
        let mut frames = FrameLoop::new();
        let old = frames.start();
        frames.cancel();
        assert!(!frames.fire(old));

        let new = frames.start();
        assert_ne!(old, new);
        assert!(!frames.fire(old));
        assert!(frames.fire(new));
    }
}
