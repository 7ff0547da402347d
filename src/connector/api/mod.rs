pub mod container;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use router::build_router;
