pub mod params;
pub mod resolver;

pub use params::*;
pub use resolver::*;
