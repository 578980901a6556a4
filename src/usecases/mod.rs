//! Application use cases. Orchestrate domain logic via ports.

pub mod clock_service;
pub mod import_service;
pub mod persistence_listener;
pub mod schedule_store;

pub use clock_service::{ClockFrame, ClockService, CurrentExam, ScheduleLine};
pub use import_service::ImportService;
pub use persistence_listener::PersistenceListener;
pub use schedule_store::{ImportTicket, ScheduleStore};
