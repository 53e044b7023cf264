//! Aggregate figures over an event list.

use crate::event::Event;

/// Derived statistics for a list of events. Computing them never touches the list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventStats {
    pub total: usize,
    pub free: usize,
    pub paid: usize,
    /// Σ price × seats sold
    pub revenue: f64,
    /// Σ seats sold
    pub bookings: u64,
    /// Mean ticket price rounded to the nearest whole unit, 0 for no events
    pub average_price: i64,
    /// Events listing more tickets available than seats; their sales count as zero
    pub inconsistent: usize,
}

impl EventStats {
    pub fn compute(events: &[Event]) -> Self {
        let total = events.len();
        let free = events.iter().filter(|e| e.is_free()).count();
        let paid = events.iter().filter(|e| e.is_paid()).count();
        let revenue = events.iter().map(Event::revenue).sum();
        let bookings = events.iter().map(|e| u64::from(e.sold())).sum();
        let inconsistent = events.iter().filter(|e| e.has_excess_availability()).count();

        let average_price = if total == 0 {
            0
        } else {
            let sum: f64 = events.iter().map(|e| e.ticket_price).sum();
            round_half_up(sum / total as f64)
        };

        if inconsistent > 0 {
            tracing::warn!(
                inconsistent,
                "events with more tickets available than capacity; counting their sales as zero"
            );
        }

        EventStats {
            total,
            free,
            paid,
            revenue,
            bookings,
            average_price,
            inconsistent,
        }
    }
}

/// Nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
