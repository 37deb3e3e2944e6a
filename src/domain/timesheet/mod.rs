pub mod data;
pub mod hours;
pub mod permissions;
pub mod ports;
pub mod services;
pub mod transitions;
pub mod week;

pub use data::*;
pub use ports::*;
pub use services::Service;
