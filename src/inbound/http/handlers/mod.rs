mod logbook;
mod server;
mod timesheet;

pub use logbook::{logbook_create, logbook_list, logbook_review};
pub use server::server_health;
pub use timesheet::{
    approve_all, create_entry, list_entries, submit_to_dean, submit_week, update_entry, week_view,
};
