//! Job posting records and draft validation.

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::types::JobId;

/// A job posting as stored by the collection resource.
///
/// `id` is absent for drafts that have not been created on the server
/// yet; a record without an `id` must never be sent to the update or
/// delete endpoints. `time_posted` is the free-form relative text shown
/// on the source listing (e.g. "2 weeks ago") and is not assumed to be
/// parseable. `scraped_date` is the scrape timestamp, used only for
/// recency ordering when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub time_posted: String,
    #[serde(default)]
    pub description: String,
    /// Source listing URL captured by the scraper; absent on user drafts.
    /// Round-tripped on update so an edit does not drop it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_date: Option<String>,
}

impl JobRecord {
    /// Check that the required fields are non-empty after trimming.
    ///
    /// Runs client-side before any create or update request, so an
    /// incomplete draft never reaches the network.
    pub fn validate_required(&self) -> Result<(), ErrorKind> {
        for (field, value) in [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(ErrorKind::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}
