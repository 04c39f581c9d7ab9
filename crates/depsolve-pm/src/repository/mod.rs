//! The static package catalog searched by the solver.

mod catalog;

pub use catalog::{Catalog, PackageId};
