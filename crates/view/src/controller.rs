//! The collection view controller task.
//!
//! One task owns the authoritative [`ViewState`] and applies every
//! transition sequentially: presentation commands, poll ticks, and fetch
//! completions all funnel into a single `select!` loop, so there are no
//! concurrent writers. Page fetches run as subtasks and re-enter the
//! loop as [`FetchDone`] messages, which lets navigation supersede a
//! slow response; mutations are awaited inline. The poll timer lives
//! inside the task and stops with it on deactivation.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use jobdeck_client::{ClientError, CollectionClient, JobPage};
use jobdeck_core::error::ErrorKind;
use jobdeck_core::filter;
use jobdeck_core::job::JobRecord;
use jobdeck_core::paging::FetchOutcome;
use jobdeck_core::types::{JobId, PageNumber};

use crate::config::DashboardConfig;
use crate::mutation::MutationCoordinator;
use crate::scheduler::{Dispatch, RefreshScheduler};
use crate::state::{Editor, ViewState};

/// Capacity of the presentation command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the internal fetch-completion channel.
const FETCH_CHANNEL_CAPACITY: usize = 8;

/// Requests presentation can issue against the controller.
#[derive(Debug)]
pub enum Command {
    /// Replace the text filter.
    SetQuery(String),
    /// Navigate to an arbitrary page; out-of-range targets are clamped.
    GoToPage(i64),
    /// Navigate forward; a no-op on the last page.
    NextPage,
    /// Navigate backward; a no-op on page 1.
    PrevPage,
    /// Toggle the expanded detail view for a record.
    Select(JobId),
    /// Open the edit surface for an existing record, or for a new draft
    /// when `None`.
    StartEdit(Option<JobId>),
    /// Close the edit surface without submitting.
    CancelEdit,
    /// Validate and submit the draft (create or update).
    Save(JobRecord),
    /// Delete a record. Confirmation happens before this is sent.
    Remove(JobId),
    /// Re-fetch the current page immediately.
    RefreshNow,
}

/// Completion of a spawned page fetch.
struct FetchDone {
    generation: u64,
    page: PageNumber,
    result: Result<JobPage, ClientError>,
}

/// Handle returned by [`JobsController::activate`].
///
/// Presentation keeps the handle for the lifetime of the view and calls
/// [`deactivate`](Self::deactivate) when navigating away; that stops the
/// poll timer and releases the controller task. Results of requests
/// still in flight at that point are discarded.
pub struct ControllerHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<ViewState>,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl ControllerHandle {
    /// A fresh receiver for ViewState snapshots.
    pub fn state(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.send(Command::SetQuery(query.into())).await;
    }

    pub async fn go_to_page(&self, page: i64) {
        self.send(Command::GoToPage(page)).await;
    }

    pub async fn next_page(&self) {
        self.send(Command::NextPage).await;
    }

    pub async fn prev_page(&self) {
        self.send(Command::PrevPage).await;
    }

    pub async fn select(&self, id: JobId) {
        self.send(Command::Select(id)).await;
    }

    pub async fn start_edit(&self, target: Option<JobId>) {
        self.send(Command::StartEdit(target)).await;
    }

    pub async fn cancel_edit(&self) {
        self.send(Command::CancelEdit).await;
    }

    pub async fn save(&self, draft: JobRecord) {
        self.send(Command::Save(draft)).await;
    }

    pub async fn remove(&self, id: JobId) {
        self.send(Command::Remove(id)).await;
    }

    pub async fn refresh_now(&self) {
        self.send(Command::RefreshNow).await;
    }

    /// Deactivate the view: stop the poll timer and wait for the
    /// controller task to finish.
    pub async fn deactivate(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }

    async fn send(&self, command: Command) {
        if self.commands.send(command).await.is_err() {
            tracing::warn!("Controller task is gone; command dropped");
        }
    }
}

/// The controller state machine. Constructed and driven by
/// [`activate`](Self::activate); everything else is internal.
pub struct JobsController {
    client: Arc<dyn CollectionClient>,
    mutations: MutationCoordinator,
    config: DashboardConfig,
    state: ViewState,
    /// The current page exactly as the server returned it; the visible
    /// list in [`ViewState`] is derived from this plus the query.
    raw: Vec<JobRecord>,
    scheduler: RefreshScheduler,
    state_tx: watch::Sender<ViewState>,
    fetch_tx: mpsc::Sender<FetchDone>,
}

impl JobsController {
    /// Activate the view: spawn the controller task, issue the initial
    /// fetch, and start the poll timer.
    pub fn activate(client: Arc<dyn CollectionClient>, config: DashboardConfig) -> ControllerHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (fetch_tx, fetch_rx) = mpsc::channel(FETCH_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(ViewState::default());
        let cancel = CancellationToken::new();

        let controller = Self {
            mutations: MutationCoordinator::new(Arc::clone(&client)),
            client,
            config,
            state: ViewState::default(),
            raw: Vec::new(),
            scheduler: RefreshScheduler::default(),
            state_tx,
            fetch_tx,
        };

        let task = tokio::spawn(controller.run(command_rx, fetch_rx, cancel.clone()));

        ControllerHandle {
            commands: command_tx,
            state: state_rx,
            cancel,
            task,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut fetches: mpsc::Receiver<FetchDone>,
        cancel: CancellationToken,
    ) {
        let mut poll = tokio::time::interval(self.config.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick fires immediately and seeds the view.
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("View deactivated; poll timer released");
                    break;
                }
                _ = poll.tick() => {
                    self.refresh_current("poll");
                }
                Some(done) = fetches.recv() => {
                    self.on_fetch_done(done);
                }
                command = commands.recv() => match command {
                    Some(command) => self.on_command(command).await,
                    None => break,
                },
            }
        }
    }

    // ---- fetching ----

    /// Request a re-fetch of the current page.
    fn refresh_current(&mut self, reason: &'static str) {
        let dispatch = self.scheduler.request(self.state.page.page_number);
        self.dispatch(dispatch, reason);
    }

    /// Act on a scheduler decision: spawn the fetch subtask or note the
    /// queued refresh.
    fn dispatch(&mut self, dispatch: Dispatch, reason: &'static str) {
        match dispatch {
            Dispatch::Issue { page, generation } => {
                tracing::debug!(page, generation, reason, "Issuing collection fetch");
                self.state.loading = true;

                let client = Arc::clone(&self.client);
                let tx = self.fetch_tx.clone();
                tokio::spawn(async move {
                    let result = client.fetch_page(page).await;
                    // The controller may be gone already during shutdown.
                    let _ = tx.send(FetchDone { generation, page, result }).await;
                });
            }
            Dispatch::Queued => {
                tracing::debug!(reason, "Fetch already in flight; refresh queued");
            }
        }
        self.publish();
    }

    /// Apply a completed fetch, discarding it if it has been superseded.
    fn on_fetch_done(&mut self, done: FetchDone) {
        if !self.scheduler.is_current(done.generation) {
            tracing::debug!(
                page = done.page,
                generation = done.generation,
                "Discarding stale fetch response",
            );
            return;
        }

        match done.result {
            Ok(page) => {
                let outcome =
                    self.state
                        .page
                        .apply_fetch(page.results.len(), page.count, page.has_next());
                match outcome {
                    FetchOutcome::ClampedTo(target) => {
                        tracing::info!(target, "Current page emptied; clamping down");
                        let dispatch = self.scheduler.request(target);
                        self.dispatch(dispatch, "clamp");
                        return;
                    }
                    FetchOutcome::Settled => {
                        self.raw = page.results;
                        self.state.last_error = None;
                        self.rebuild_visible();
                    }
                }
            }
            Err(error) => {
                // A failed poll must not stop future polling; surface it
                // and keep the previous data on screen.
                tracing::warn!(page = done.page, error = %error, "Collection fetch failed");
                self.state.last_error = Some(fetch_error_kind(&error));
            }
        }

        if let Some(follow_up) = self.scheduler.complete(done.generation) {
            self.dispatch(follow_up, "queued refresh");
            return;
        }
        self.state.loading = self.scheduler.in_flight();
        self.publish();
    }

    // ---- commands ----

    async fn on_command(&mut self, command: Command) {
        match command {
            Command::SetQuery(query) => {
                self.state.query = query;
                self.rebuild_visible();
                self.publish();
            }
            Command::GoToPage(target) => {
                let target = self.state.page.clamp_target(target);
                self.go_to_page(target);
            }
            Command::NextPage => {
                if self.state.page.can_next() {
                    self.go_to_page(self.state.page.page_number + 1);
                } else {
                    tracing::debug!("Next ignored; already on the last page");
                }
            }
            Command::PrevPage => {
                if self.state.page.can_prev() {
                    self.go_to_page(self.state.page.page_number - 1);
                }
            }
            Command::Select(id) => {
                self.state.selection = if self.state.selection == Some(id) {
                    None
                } else {
                    Some(id)
                };
                self.publish();
            }
            Command::StartEdit(target) => self.start_edit(target),
            Command::CancelEdit => {
                self.state.editor = None;
                self.publish();
            }
            Command::Save(draft) => self.save(draft).await,
            Command::Remove(id) => self.remove(id).await,
            Command::RefreshNow => self.refresh_current("manual"),
        }
    }

    fn go_to_page(&mut self, target: PageNumber) {
        if target == self.state.page.page_number {
            // Already there; the page was fetched on arrival.
            return;
        }
        self.state.page.page_number = target;
        self.refresh_current("navigation");
    }

    fn start_edit(&mut self, target: Option<JobId>) {
        let draft = match target {
            Some(id) => match self.raw.iter().find(|job| job.id == Some(id)) {
                Some(job) => job.clone(),
                None => {
                    tracing::warn!(id, "Cannot edit a record missing from the current page");
                    return;
                }
            },
            None => JobRecord::default(),
        };

        self.state.editor = Some(Editor {
            target,
            draft,
            submitting: false,
        });
        self.publish();
    }

    // ---- mutations ----

    /// Submit the edit surface. A created record may land on a different
    /// page; it becomes visible on the forced refresh of the current
    /// page or on a later poll.
    async fn save(&mut self, draft: JobRecord) {
        let target = self
            .state
            .editor
            .as_ref()
            .and_then(|editor| editor.target)
            .or(draft.id);

        if let Some(editor) = self.state.editor.as_mut() {
            editor.draft = draft.clone();
            editor.submitting = true;
        }
        self.publish();

        let result = self.mutations.save(target, &draft).await;
        match result {
            Ok(op) => {
                tracing::info!(%op, "Mutation acknowledged; refreshing current page");
                self.state.editor = None;
                self.state.last_error = None;
                self.refresh_current("mutation");
            }
            Err(error) => {
                tracing::warn!(error = %error, "Save rejected; view data left untouched");
                if let Some(editor) = self.state.editor.as_mut() {
                    editor.submitting = false;
                }
                self.state.last_error = Some(error);
                self.publish();
            }
        }
    }

    async fn remove(&mut self, id: JobId) {
        let result = self.mutations.remove(id).await;
        match result {
            Ok(op) => {
                tracing::info!(%op, id, "Mutation acknowledged; refreshing current page");
                self.state.last_error = None;
                self.refresh_current("mutation");
            }
            Err(error) => {
                tracing::warn!(id, error = %error, "Delete failed; view data left untouched");
                self.state.last_error = Some(error);
                self.publish();
            }
        }
    }

    // ---- derived state ----

    /// Recompute the visible list from the raw page and query, and drop
    /// a selection that no longer resolves to a visible record.
    fn rebuild_visible(&mut self) {
        self.state.jobs = filter::visible_jobs(&self.raw, &self.state.query);
        if let Some(id) = self.state.selection {
            if !self.state.jobs.iter().any(|job| job.id == Some(id)) {
                self.state.selection = None;
            }
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}

/// Map a client fetch error onto the view taxonomy.
fn fetch_error_kind(error: &ClientError) -> ErrorKind {
    match error {
        ClientError::Decode(e) => ErrorKind::Decode(e.to_string()),
        other => ErrorKind::Network(other.to_string()),
    }
}
