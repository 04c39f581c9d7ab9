// Package model for catalog entries
//
// A `PackageRecord` is the serialized catalog form; a `Package` is the
// validated form with parsed versions and requirements.

mod package;

pub use package::{Package, PackageRecord};
