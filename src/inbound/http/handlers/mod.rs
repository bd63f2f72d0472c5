mod portfolio;
mod server;

pub use portfolio::*;
pub use server::*;
