//! Import use case: fetch records from the default list or a course-code lookup and
//! apply them to the store as a full replacement.

use crate::domain::{
    DomainError, ImportRecord, ImportRequest, default_import_records, parse_import_payload,
};
use crate::ports::CourseLookupPort;
use crate::usecases::ScheduleStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ImportService {
    lookup: Arc<dyn CourseLookupPort>,
}

impl ImportService {
    pub fn new(lookup: Arc<dyn CourseLookupPort>) -> Self {
        Self { lookup }
    }

    /// Fetch records for `request`. A blank course code is rejected before any request.
    pub async fn fetch(&self, request: &ImportRequest) -> Result<Vec<ImportRecord>, DomainError> {
        let code = match request {
            ImportRequest::Default => return Ok(default_import_records()),
            ImportRequest::CourseCode(code) => code.trim(),
        };
        if code.is_empty() {
            return Err(DomainError::EmptyCourseCode);
        }

        info!(code, "looking up course schedule");
        let payload = self.lookup.lookup(code).await?;
        let records = parse_import_payload(payload).inspect_err(|e| {
            warn!(code, error = %e, "course lookup returned no schedule");
        })?;
        info!(code, count = records.len(), "course schedule fetched");
        Ok(records)
    }

    /// Runs `fetch` on its own task so the caller keeps ticking while the lookup is pending.
    /// Apply the result through the ticket taken before spawning.
    pub fn spawn_fetch(
        &self,
        request: ImportRequest,
    ) -> JoinHandle<Result<Vec<ImportRecord>, DomainError>> {
        let service = self.clone();
        tokio::spawn(async move { service.fetch(&request).await })
    }

    /// Fetch and apply under a fresh ticket. On failure the schedule is left unchanged.
    /// Returns whether the result was applied (false when superseded).
    pub async fn import_into(
        &self,
        store: &mut ScheduleStore,
        request: &ImportRequest,
    ) -> Result<bool, DomainError> {
        if let ImportRequest::CourseCode(code) = request {
            if code.trim().is_empty() {
                return Err(DomainError::EmptyCourseCode);
            }
        }
        let ticket = store.begin_import();
        match self.fetch(request).await {
            Ok(records) => Ok(store.apply_import(ticket, &records)),
            Err(e) => {
                store.abandon_import(ticket);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExamEntry, default_schedule};
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Lookup that replays a fixed payload and counts calls.
    struct FixedLookup {
        payload: Result<Value, String>,
        calls: AtomicUsize,
    }

    impl FixedLookup {
        fn ok(payload: Value) -> Arc<Self> {
            Arc::new(Self {
                payload: Ok(payload),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                payload: Err("connection refused".into()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl CourseLookupPort for FixedLookup {
        async fn lookup(&self, _code: &str) -> Result<Value, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload.clone().map_err(DomainError::Import)
        }
    }

    /// Lookup that holds its answer until released.
    struct GatedLookup {
        gate: Notify,
    }

    #[async_trait::async_trait]
    impl CourseLookupPort for GatedLookup {
        async fn lookup(&self, _code: &str) -> Result<Value, DomainError> {
            self.gate.notified().await;
            Ok(json!([{"subject": "英文", "startTime": "08:00", "endTime": "09:00"}]))
        }
    }

    #[tokio::test]
    async fn test_store_stays_usable_while_fetch_is_pending() {
        let lookup = Arc::new(GatedLookup {
            gate: Notify::new(),
        });
        let service = ImportService::new(lookup.clone());
        let mut store = ScheduleStore::new(default_schedule());

        let ticket = store.begin_import();
        let handle = service.spawn_fetch(ImportRequest::CourseCode("A123".into()));
        tokio::task::yield_now().await;
        assert!(!handle.is_finished());
        assert_eq!(store.schedule().len(), 3);
        assert!(store.is_import_pending());

        lookup.gate.notify_one();
        let records = handle.await.unwrap().unwrap();
        assert!(store.apply_import(ticket, &records));
        assert_eq!(store.schedule(), &[ExamEntry::new(1, "英文", "08:00", "09:00")]);
    }

    #[tokio::test]
    async fn test_superseded_spawned_fetch_is_dropped() {
        let service = ImportService::new(FixedLookup::ok(json!([
            {"subject": "英文", "startTime": "08:00", "endTime": "09:00"}
        ])));
        let mut store = ScheduleStore::new(default_schedule());

        let first = store.begin_import();
        let slow = service.spawn_fetch(ImportRequest::CourseCode("OLD".into()));
        let second = store.begin_import();
        let fast = service.spawn_fetch(ImportRequest::Default);

        assert!(store.apply_import(second, &fast.await.unwrap().unwrap()));
        assert!(!store.apply_import(first, &slow.await.unwrap().unwrap()));
        assert_eq!(store.schedule(), default_schedule().as_slice());
    }

    #[tokio::test]
    async fn test_default_request_needs_no_lookup() {
        let lookup = FixedLookup::failing();
        let service = ImportService::new(lookup.clone());
        let records = service.fetch(&ImportRequest::Default).await.unwrap();
        assert_eq!(records, default_import_records());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_code_rejected_before_request() {
        let lookup = FixedLookup::ok(json!([]));
        let service = ImportService::new(lookup.clone());
        let err = service
            .fetch(&ImportRequest::CourseCode("   ".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyCourseCode));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_import_into_replaces_schedule() {
        let lookup = FixedLookup::ok(json!([
            {"subject": "英文", "startTime": "08:00", "endTime": "09:00"},
            {"subject": "社會", "startTime": "09:10", "endTime": "10:00"}
        ]));
        let service = ImportService::new(lookup);
        let mut store = ScheduleStore::new(default_schedule());

        let applied = service
            .import_into(&mut store, &ImportRequest::CourseCode("A123".into()))
            .await
            .unwrap();

        assert!(applied);
        assert_eq!(
            store.schedule(),
            &[
                ExamEntry::new(1, "英文", "08:00", "09:00"),
                ExamEntry::new(2, "社會", "09:10", "10:00"),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_schedule_unchanged() {
        let service = ImportService::new(FixedLookup::failing());
        let mut store = ScheduleStore::new(default_schedule());
        let result = service
            .import_into(&mut store, &ImportRequest::CourseCode("A123".into()))
            .await;
        assert!(result.is_err());
        assert_eq!(store.schedule(), default_schedule().as_slice());
        assert!(!store.is_import_pending());
    }

    #[tokio::test]
    async fn test_error_payload_is_failure_not_empty_schedule() {
        let service = ImportService::new(FixedLookup::ok(json!({"error": "Error fetching data"})));
        let mut store = ScheduleStore::new(default_schedule());
        let result = service
            .import_into(&mut store, &ImportRequest::CourseCode("bad".into()))
            .await;
        assert!(matches!(result, Err(DomainError::Import(_))));
        assert_eq!(store.schedule().len(), 3);
    }
}
