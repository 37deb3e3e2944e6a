mod approve_all;
mod create_entry;
mod list_entries;
mod submit_to_dean;
mod submit_week;
mod update_entry;
mod week_view;

pub use approve_all::approve_all;
pub use create_entry::create_entry;
pub use list_entries::list_entries;
pub use submit_to_dean::submit_to_dean;
pub use submit_week::submit_week;
pub use update_entry::update_entry;
pub use week_view::week_view;
