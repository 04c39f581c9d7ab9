use std::fmt;

use depsolve_semver::Version;
use indexmap::IndexMap;

use crate::error::Result;
use crate::package::{Package, PackageRecord};

/// Index of a package in its catalog.
///
/// Packages are referenced by identity; two catalog entries with the same
/// name and version are still distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(usize);

impl PackageId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only set of all known packages, kept in input order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    packages: Vec<Package>,
    /// Name -> ids in catalog order
    by_name: IndexMap<String, Vec<PackageId>>,
}

impl Catalog {
    pub fn new(packages: Vec<Package>) -> Self {
        let mut by_name: IndexMap<String, Vec<PackageId>> = IndexMap::new();
        for (index, package) in packages.iter().enumerate() {
            let ids = by_name.entry(package.name.clone()).or_default();
            if ids.iter().any(|id| packages[id.0].version == package.version) {
                log::warn!("Catalog lists {} more than once; the first entry wins lookups", package);
            }
            ids.push(PackageId(index));
        }
        Self { packages, by_name }
    }

    /// Validate serialized records and build a catalog from them
    pub fn from_records(records: Vec<PackageRecord>) -> Result<Self> {
        let packages = records
            .into_iter()
            .map(Package::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(packages))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Get a package by id.
    ///
    /// Panics if the id belongs to another catalog.
    pub fn get(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    /// All package ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = PackageId> + '_ {
        (0..self.packages.len()).map(PackageId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Package)> + '_ {
        self.packages.iter().enumerate().map(|(i, p)| (PackageId(i), p))
    }

    /// Ids of every package called `name`, in catalog order
    pub fn find_by_name(&self, name: &str) -> &[PackageId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First package called `name`, optionally restricted to `version`
    pub fn find(&self, name: &str, version: Option<&Version>) -> Option<PackageId> {
        self.find_by_name(name)
            .iter()
            .copied()
            .find(|id| version.map_or(true, |v| &self.packages[id.0].version == v))
    }

    /// Number of distinct package names
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}
