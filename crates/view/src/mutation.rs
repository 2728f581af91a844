//! Sequencing of create/update/delete against the collection client.
//!
//! Each mutation runs `Idle → Submitting → {Succeeded → Refreshing →
//! Idle} | {Failed → Idle}`. The coordinator performs the local
//! required-field check, issues exactly one client call, and maps
//! failures onto the view error taxonomy. The post-success refresh is
//! the controller's job, since it has to go through the scheduler's
//! single-flight accounting. There is no optimistic apply: the client
//! offers no rollback, so the view changes only after the server
//! acknowledges and the refresh lands.

use std::sync::Arc;

use jobdeck_client::{ClientError, CollectionClient};
use jobdeck_core::error::{ErrorKind, MutationOp};
use jobdeck_core::job::JobRecord;
use jobdeck_core::types::JobId;

/// Issues mutations against the collection resource, one at a time.
pub struct MutationCoordinator {
    client: Arc<dyn CollectionClient>,
}

impl MutationCoordinator {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        Self { client }
    }

    /// Create (no target) or update (target present) a record from a
    /// draft.
    ///
    /// Fails with [`ErrorKind::Validation`] before any network call when
    /// a required field is empty after trimming. Returns the operation
    /// performed so the caller can log and refresh.
    pub async fn save(
        &self,
        target: Option<JobId>,
        draft: &JobRecord,
    ) -> Result<MutationOp, ErrorKind> {
        draft.validate_required()?;

        match target {
            Some(id) => {
                self.client
                    .update(id, draft)
                    .await
                    .map_err(|e| failed(MutationOp::Update, e))?;
                Ok(MutationOp::Update)
            }
            None => {
                self.client
                    .create(draft)
                    .await
                    .map_err(|e| failed(MutationOp::Create, e))?;
                Ok(MutationOp::Create)
            }
        }
    }

    /// Delete a record by id.
    ///
    /// Confirmation is an external concern; once invoked the delete is
    /// unconditional.
    pub async fn remove(&self, id: JobId) -> Result<MutationOp, ErrorKind> {
        self.client
            .delete(id)
            .await
            .map_err(|e| failed(MutationOp::Delete, e))?;
        Ok(MutationOp::Delete)
    }
}

fn failed(op: MutationOp, error: ClientError) -> ErrorKind {
    ErrorKind::MutationFailed {
        op,
        detail: error.to_string(),
    }
}
