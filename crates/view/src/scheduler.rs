//! Fetch scheduling: single-flight bookkeeping and stale-response
//! tracking.
//!
//! The controller funnels every reason to fetch (activation, navigation,
//! poll tick, post-mutation refresh) through [`RefreshScheduler`]. The
//! scheduler guarantees at most one logically in-flight fetch. A request
//! for the page already being fetched is queued and replayed once the
//! in-flight fetch resolves (consecutive requests coalesce into that one
//! queued slot). A request for a different page supersedes the in-flight
//! fetch: the generation counter advances, so the older response is
//! recognisably stale on arrival and gets discarded. The last request
//! wins.

use jobdeck_core::types::PageNumber;

/// Decision returned by [`RefreshScheduler::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Start a fetch for this page, tagged with this generation.
    Issue { page: PageNumber, generation: u64 },
    /// A fetch for the same page is already outstanding; the request was
    /// queued behind it.
    Queued,
}

/// Single-flight fetch ledger.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    /// Page of the newest issued fetch.
    page: PageNumber,
    /// Generation of the newest issued fetch. Responses carrying an
    /// older generation are stale.
    generation: u64,
    in_flight: bool,
    /// A same-page refresh arrived while a fetch was outstanding.
    queued: bool,
}

impl RefreshScheduler {
    /// Ask for a fetch of `page`.
    pub fn request(&mut self, page: PageNumber) -> Dispatch {
        if self.in_flight && page == self.page {
            self.queued = true;
            return Dispatch::Queued;
        }

        self.page = page;
        self.generation += 1;
        self.in_flight = true;
        self.queued = false;
        Dispatch::Issue {
            page,
            generation: self.generation,
        }
    }

    /// Whether a response tagged `generation` is still the current one.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Record completion of the fetch tagged `generation`.
    ///
    /// Stale completions are ignored, since the newer fetch is still
    /// accounted for. Returns the queued follow-up dispatch if a refresh
    /// arrived while the fetch was outstanding.
    pub fn complete(&mut self, generation: u64) -> Option<Dispatch> {
        if generation != self.generation {
            return None;
        }
        self.in_flight = false;
        if self.queued {
            self.queued = false;
            return Some(self.request(self.page));
        }
        None
    }

    /// Whether a fetch is currently outstanding.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
