//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod resource_crud;
mod resource_repository;

pub use resource_crud::ResourceCrud;
pub use resource_repository::{
    InMemoryResourceRepository, ResourceRepository, ResourceRepositoryError,
};
