pub mod executor;
pub mod fixture;
pub mod plan;
pub mod wrapper;

pub use executor::*;
pub use fixture::*;
pub use plan::*;
pub use wrapper::*;
