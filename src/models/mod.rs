pub mod accounts;
pub mod transfer;

pub use accounts::*;
pub use transfer::*;
