//! Shared in-memory collection fake for controller tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use jobdeck_client::{ClientError, CollectionClient, JobPage};
use jobdeck_core::job::JobRecord;
use jobdeck_core::types::{JobId, PageNumber};

/// In-memory stand-in for the remote collection.
///
/// Serves fixed-size pages over a mutable record store, with optional
/// per-page latency and scripted failures. Call counters let tests
/// assert how many requests actually went out.
pub struct FakeCollection {
    records: Mutex<Vec<JobRecord>>,
    page_size: usize,
    next_id: AtomicI64,
    delays: Mutex<HashMap<PageNumber, Duration>>,
    fail_fetches: AtomicBool,
    fail_mutations: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl FakeCollection {
    pub fn new(page_size: usize, records: Vec<JobRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            records: Mutex::new(records),
            page_size,
            next_id: AtomicI64::new(next_id),
            delays: Mutex::new(HashMap::new()),
            fail_fetches: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// A complete record that passes draft validation.
    pub fn job(id: JobId, title: &str) -> JobRecord {
        JobRecord {
            id: Some(id),
            title: title.into(),
            company: "Acme".into(),
            location: "Remote".into(),
            time_posted: "1 day ago".into(),
            description: "A job.".into(),
            link: None,
            scraped_date: None,
        }
    }

    /// Delay responses for one page, to simulate a slow fetch.
    pub fn delay_page(&self, page: PageNumber, delay: Duration) {
        self.delays.lock().unwrap().insert(page, delay);
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Append a record server-side, as the scraper would.
    pub fn push(&self, record: JobRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn server_error() -> ClientError {
        ClientError::Status {
            status: 500,
            body: "boom".into(),
        }
    }
}

#[async_trait]
impl CollectionClient for FakeCollection {
    async fn fetch_page(&self, page: PageNumber) -> Result<JobPage, ClientError> {
        let delay = self.delays.lock().unwrap().get(&page).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let records = self.records.lock().unwrap();
        let start = (page as usize - 1) * self.page_size;
        let results: Vec<JobRecord> = records
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let has_more = start + self.page_size < records.len();

        Ok(JobPage {
            results,
            count: records.len() as u64,
            next: has_more.then(|| format!("?page={}", page + 1)),
        })
    }

    async fn create(&self, draft: &JobRecord) -> Result<JobRecord, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let mut created = draft.clone();
        created.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: JobId, record: &JobRecord) -> Result<JobRecord, ClientError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or(ClientError::Status {
                status: 404,
                body: "not found".into(),
            })?;
        *slot = record.clone();
        slot.id = Some(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: JobId) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != Some(id));
        if records.len() == before {
            return Err(ClientError::Status {
                status: 404,
                body: "not found".into(),
            });
        }
        Ok(())
    }
}
