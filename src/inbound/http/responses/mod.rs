pub mod bulk;
pub mod entry;
pub mod health;
pub mod logbook;
pub mod shared;
pub mod week;
