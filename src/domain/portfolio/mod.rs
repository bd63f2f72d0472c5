mod catalog;
mod data;
mod ports;
mod reconciliation;
mod services;

pub use catalog::*;
pub use data::*;
pub use ports::*;
pub use reconciliation::*;
pub use services::Service;
