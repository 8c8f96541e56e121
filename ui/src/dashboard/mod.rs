//! The ordered set of cards shown on the dashboard.

mod shell;
pub use shell::DashboardShell;

use std::fmt;

use time::OffsetDateTime;

/// Opaque card identity derived from the creation timestamp (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(i64);

impl CardId {
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Insight,
    Chart,
}

impl CardKind {
    /// Wire-style tag for the card type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insight => "api",
            Self::Chart => "grafico",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    cards: Vec<Card>,
    last_id: Option<CardId>,
}

impl Dashboard {
    pub fn add_insight_card(&mut self) -> CardId {
        self.add_card(CardKind::Insight)
    }

    pub fn add_chart_card(&mut self) -> CardId {
        self.add_card(CardKind::Chart)
    }

    pub fn add_card(&mut self, kind: CardKind) -> CardId {
        self.add_card_at(kind, now_millis())
    }

    /// Two cards created within the same millisecond still get distinct ids.
    fn add_card_at(&mut self, kind: CardKind, millis: i64) -> CardId {
        let id = match self.last_id {
            Some(last) if millis <= last.0 => CardId(last.0 + 1),
            _ => CardId(millis),
        };
        self.last_id = Some(id);
        self.cards.push(Card { id, kind });
        tracing::debug!(card = %id, kind = kind.as_str(), "card added");
        id
    }

    /// Remove the card with `id`. Unknown ids are ignored.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        let removed = self.cards.len() != before;
        if removed {
            tracing::debug!(card = %id, "card removed");
        }
        removed
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
