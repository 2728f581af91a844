//! The reconciled snapshot exposed to presentation.

use jobdeck_core::error::ErrorKind;
use jobdeck_core::job::JobRecord;
use jobdeck_core::paging::PageWindow;
use jobdeck_core::types::JobId;

/// The open edit surface: a draft being composed, optionally targeting
/// an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    /// `Some` when editing an existing record, `None` for a new draft.
    pub target: Option<JobId>,
    /// The record as currently drafted.
    pub draft: JobRecord,
    /// True while the draft is being submitted.
    pub submitting: bool,
}

/// One consistent snapshot of everything presentation needs to render.
///
/// Published over a `watch` channel by the controller task, which is the
/// only writer. Consumers render snapshots; they never mutate records in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Visible records: the current raw page, filtered and ordered.
    pub jobs: Vec<JobRecord>,
    /// Pagination window for the current page.
    pub page: PageWindow,
    /// The active text filter.
    pub query: String,
    /// True while a fetch for the current page is in flight. Suppresses
    /// new fetch initiation but does not invalidate the in-flight one.
    pub loading: bool,
    /// The most recent error, cleared by the next successful operation.
    pub last_error: Option<ErrorKind>,
    /// The record whose detail view is expanded, if any.
    pub selection: Option<JobId>,
    /// The open edit surface, if any.
    pub editor: Option<Editor>,
}
