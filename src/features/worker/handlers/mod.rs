mod worker_handler;

pub use worker_handler::{index, refresh, report_detail, section, update_status, WorkerState};
