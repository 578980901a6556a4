//! Schedule store: the single owner of schedule, attendance and the display toggle.
//!
//! - Editing reducer and import merge are the only writers of the schedule
//! - Every schedule write publishes a snapshot to subscribers (persistence listens)
//! - Imports are ticketed; a response whose ticket was superseded or cancelled is dropped

use crate::domain::{
    Attendance, AttendanceForm, EditingForm, ExamEntry, ImportRecord, Schedule, default_schedule,
    merge_import, reduce_schedule,
};
use crate::ports::SchedulePersistence;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Handle for one in-flight import. Only the most recently issued ticket can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket(u64);

pub struct ScheduleStore {
    schedule: Schedule,
    attendance: Attendance,
    show_schedule: bool,
    import_generation: u64,
    pending_import: Option<u64>,
    subscribers: Vec<mpsc::UnboundedSender<Schedule>>,
}

impl ScheduleStore {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            attendance: Attendance::default(),
            show_schedule: true,
            import_generation: 0,
            pending_import: None,
            subscribers: Vec::new(),
        }
    }

    /// Loads the persisted schedule, falling back to the default list when nothing usable is stored.
    pub async fn load(persistence: &dyn SchedulePersistence) -> Self {
        let schedule = match persistence.load_schedule().await {
            Ok(s) if !s.is_empty() => {
                info!(entries = s.len(), "loaded saved schedule");
                s
            }
            Ok(_) => {
                info!("no saved schedule; using default");
                default_schedule()
            }
            Err(e) => {
                warn!(error = %e, "could not read saved schedule; using default");
                default_schedule()
            }
        };
        Self::new(schedule)
    }

    pub fn schedule(&self) -> &[ExamEntry] {
        &self.schedule
    }

    pub fn attendance(&self) -> &Attendance {
        &self.attendance
    }

    pub fn show_schedule(&self) -> bool {
        self.show_schedule
    }

    /// Receives a snapshot after every schedule write.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Schedule> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
        self.publish();
    }

    /// Form pre-filled with the current state, as the edit dialog opens it. With no exams
    /// stored the dialog starts from a blank form carrying the current attendance and toggle.
    pub fn editing_form(&self) -> EditingForm {
        if self.schedule.is_empty() {
            let mut form = EditingForm::blank();
            form.attendance = AttendanceForm::from(&self.attendance);
            form.show_schedule = self.show_schedule;
            return form;
        }
        EditingForm::from_state(&self.schedule, &self.attendance, self.show_schedule)
    }

    /// Saves an edit: rows fold onto the schedule positionally; attendance and the toggle
    /// are overwritten wholesale.
    pub fn apply_edit(&mut self, form: &EditingForm) {
        let next = reduce_schedule(&self.schedule, &form.rows);
        self.attendance = Attendance::from(&form.attendance);
        self.show_schedule = form.show_schedule;
        info!(
            entries = next.len(),
            present = self.attendance.present,
            total = self.attendance.total,
            "edit saved"
        );
        self.set_schedule(next);
    }

    /// Starts an import. Any earlier ticket stops being able to apply.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.import_generation += 1;
        self.pending_import = Some(self.import_generation);
        ImportTicket(self.import_generation)
    }

    /// Dialog closed; whatever is in flight is discarded on arrival.
    pub fn cancel_import(&mut self) {
        if self.pending_import.take().is_some() {
            debug!("pending import cancelled");
        }
    }

    /// Clears the pending marker after a failed fetch, if `ticket` is still the current one.
    pub fn abandon_import(&mut self, ticket: ImportTicket) {
        if self.pending_import == Some(ticket.0) {
            self.pending_import = None;
        }
    }

    pub fn is_import_pending(&self) -> bool {
        self.pending_import.is_some()
    }

    /// Replaces the schedule with `records` if `ticket` is still current. Returns whether it applied.
    pub fn apply_import(&mut self, ticket: ImportTicket, records: &[ImportRecord]) -> bool {
        if self.pending_import != Some(ticket.0) {
            debug!(
                ticket = ticket.0,
                current = ?self.pending_import,
                "dropping stale import response"
            );
            return false;
        }
        self.pending_import = None;
        info!(entries = records.len(), "import applied");
        self.set_schedule(merge_import(records));
        true
    }

    fn publish(&mut self) {
        self.subscribers
            .retain(|tx| tx.send(self.schedule.clone()).is_ok());
    }
}
