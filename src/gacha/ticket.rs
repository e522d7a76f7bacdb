use super::types::{ADVANCED, LEGENDARY, NORMAL};

/// Suffix marking a ten-pull ticket type, e.g. `advanced_10`.
pub const BATCH_SUFFIX: &str = "_10";

/// What redeeming a ticket asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketKind {
    Single(String),
    Batch(String),
}

impl TicketKind {
    /// Parse a ticket's `gacha_type` tag. Only the three standard contexts
    /// have tickets; anything else is not a ticket.
    pub fn parse(gacha_type: &str) -> Option<Self> {
        let (context, batch) = match gacha_type.strip_suffix(BATCH_SUFFIX) {
            Some(base) => (base, true),
            None => (gacha_type, false),
        };
        if !matches!(context, NORMAL | ADVANCED | LEGENDARY) {
            return None;
        }
        Some(if batch {
            TicketKind::Batch(context.to_string())
        } else {
            TicketKind::Single(context.to_string())
        })
    }

    pub fn context(&self) -> &str {
        match self {
            TicketKind::Single(context) | TicketKind::Batch(context) => context,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, TicketKind::Batch(_))
    }

    /// The `gacha_type` tag this ticket was parsed from.
    pub fn tag(&self) -> String {
        match self {
            TicketKind::Single(context) => context.clone(),
            TicketKind::Batch(context) => format!("{context}{BATCH_SUFFIX}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_tickets() {
        for context in [NORMAL, ADVANCED, LEGENDARY] {
            assert_eq!(
                TicketKind::parse(context),
                Some(TicketKind::Single(context.to_string()))
            );
        }
    }

    #[test]
    fn test_parse_batch_tickets() {
        let ticket = TicketKind::parse("legendary_10").unwrap();
        assert!(ticket.is_batch());
        assert_eq!(ticket.context(), "legendary");
        assert_eq!(ticket.tag(), "legendary_10");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(TicketKind::parse("festival"), None);
        assert_eq!(TicketKind::parse("festival_10"), None);
        assert_eq!(TicketKind::parse("normal_5"), None);
        assert_eq!(TicketKind::parse("_10"), None);
        assert_eq!(TicketKind::parse(""), None);
    }
}
