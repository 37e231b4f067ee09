//! Household profile data and loading

mod data;
pub mod loader;

pub use data::{Adults, Child, Household, Person, Role};
pub use loader::{load_default_household, load_household, parse_household};
