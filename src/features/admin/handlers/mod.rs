mod admin_handler;

pub use admin_handler::{
    add_note, change_user_role, index, refresh, report_detail, section, toggle_user_status,
    update_report, AdminState,
};
