pub mod alloy_factory;
pub mod artifacts;
pub mod memory;
pub mod template;
pub mod traits;

pub use alloy_factory::AlloyComponentFactory;
pub use artifacts::ArtifactStore;
pub use memory::InMemoryFactory;
pub use template::ComponentTemplate;
pub use traits::*;
