//! Per-card request sequencing. Every search gets a ticket; only the newest
//! ticket may write its response back into the card.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self, prompt: impl Into<String>) -> RequestTicket {
        self.latest = self.latest.saturating_add(1);
        RequestTicket {
            seq: self.latest,
            prompt: prompt.into(),
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
