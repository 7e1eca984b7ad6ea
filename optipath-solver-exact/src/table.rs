//! Flat memo arena for the Held-Karp recurrence.
//!
//! A state is a current city plus the set of visited cities. City 0 is
//! always visited, so bit 0 carries no information and is dropped from the
//! index: state `(city, visited)` lives at `city * 2^(n-1) + (visited >> 1)`.

/// Completion cost and chosen successor for every `(city, visited)` state.
///
/// The table is sized once for `cities` locations and owned by a single
/// solve call.
#[derive(Debug)]
pub(crate) struct HeldKarpTable {
    stride: usize,
    costs: Vec<u64>,
    next: Vec<u8>,
}

impl HeldKarpTable {
    /// Allocate a table for `cities` locations.
    ///
    /// Callers must keep `cities` within `1..=MAX_SUPPORTED_LOCATIONS`.
    pub(crate) fn new(cities: usize) -> Self {
        let stride = 1_usize << cities.saturating_sub(1);
        let len = cities * stride;
        Self {
            stride,
            costs: vec![0; len],
            next: vec![0; len],
        }
    }

    /// Number of states the table can hold.
    pub(crate) const fn len(&self) -> usize {
        self.costs.len()
    }

    const fn index(&self, city: usize, visited: usize) -> usize {
        city * self.stride + (visited >> 1)
    }

    /// Record the best completion from `city` having seen `visited`.
    #[expect(
        clippy::indexing_slicing,
        reason = "city and visited are bounded by the table dimensions"
    )]
    pub(crate) fn set(&mut self, city: usize, visited: usize, cost: u64, next: u8) {
        let index = self.index(city, visited);
        self.costs[index] = cost;
        self.next[index] = next;
    }

    /// Completion cost stored for a state.
    #[expect(
        clippy::indexing_slicing,
        reason = "city and visited are bounded by the table dimensions"
    )]
    pub(crate) fn cost(&self, city: usize, visited: usize) -> u64 {
        self.costs[self.index(city, visited)]
    }

    /// Successor city stored for a state.
    #[expect(
        clippy::indexing_slicing,
        reason = "city and visited are bounded by the table dimensions"
    )]
    pub(crate) fn next(&self, city: usize, visited: usize) -> usize {
        usize::from(self.next[self.index(city, visited)])
    }
}
