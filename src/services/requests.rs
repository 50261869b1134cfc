//! Request generations per fetch category
//!
//! Every fetch takes a ticket. Only the response carrying the latest ticket of
//! its category is applied; older responses are stale and get dropped.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::FetchCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    category: FetchCategory,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: HashMap<FetchCategory, u64>,
    in_flight: HashSet<FetchCategory>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; any ticket issued earlier for the category becomes stale
    pub fn begin(&mut self, category: FetchCategory) -> RequestTicket {
        let generation = self.latest.entry(category).or_insert(0);
        *generation += 1;
        self.in_flight.insert(category);
        debug!("Started {} request #{}", category, generation);
        RequestTicket {
            category,
            generation: *generation,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.get(&ticket.category) == Some(&ticket.generation)
    }

    /// Complete a request. Returns false for a stale ticket, whose response
    /// must be discarded.
    pub fn finish(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                "Discarding stale {} response #{}",
                ticket.category, ticket.generation
            );
            return false;
        }
        self.in_flight.remove(&ticket.category);
        true
    }

    /// Invalidate whatever is outstanding for the category
    pub fn cancel(&mut self, category: FetchCategory) {
        *self.latest.entry(category).or_insert(0) += 1;
        self.in_flight.remove(&category);
    }

    pub fn cancel_all(&mut self) {
        for category in FetchCategory::ALL {
            self.cancel(category);
        }
    }

    #[must_use]
    pub fn is_in_flight(&self, category: FetchCategory) -> bool {
        self.in_flight.contains(&category)
    }
}
