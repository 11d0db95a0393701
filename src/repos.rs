pub mod crud_api;
pub use crud_api::{CrudApi, CrudApiClient};

#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub use memory::InMemoryCrudApi;
