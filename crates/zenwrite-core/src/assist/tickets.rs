use serde::{Deserialize, Serialize};

/// Identifies one tool request. Higher tickets were issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides whether a response is still wanted.
///
/// Only the most recently issued ticket is current; answers to older
/// requests arrive too late and are dropped by the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestTickets {
    latest: u64,
}

impl RequestTickets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Drop interest in whatever is in flight.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_is_current() {
        let mut tickets = RequestTickets::new();
        let first = tickets.issue();
        assert!(tickets.is_current(first));
        let second = tickets.issue();
        assert!(!tickets.is_current(first));
        assert!(tickets.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn invalidate_retires_in_flight() {
        let mut tickets = RequestTickets::new();
        let t = tickets.issue();
        tickets.invalidate();
        assert!(!tickets.is_current(t));
    }
}
