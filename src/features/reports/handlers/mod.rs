mod report_handler;

pub use report_handler::{
    index, my_reports, refresh, report_detail, submit_report, ReportState,
};
