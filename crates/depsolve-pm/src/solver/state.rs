use depsolve_semver::Version;

use crate::error::{DepsolveError, Result};
use crate::repository::{Catalog, PackageId};

/// One entry of a configuration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// An installed catalog package
    Installed(PackageId),
    /// An initial-state entry that matched nothing in the catalog
    Unresolved,
}

impl Slot {
    pub fn package(&self) -> Option<PackageId> {
        match self {
            Slot::Installed(id) => Some(*id),
            Slot::Unresolved => None,
        }
    }
}

/// An ordered sequence of installed packages.
///
/// Order is the order packages were added during search. Two states are
/// equal only if their slots are equal position by position, so the same
/// set reached in a different order is a different state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfigState {
    slots: Vec<Slot>,
}

impl ConfigState {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn from_packages(ids: impl IntoIterator<Item = PackageId>) -> Self {
        Self {
            slots: ids.into_iter().map(Slot::Installed).collect(),
        }
    }

    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Resolve initial-state entries against the catalog.
    ///
    /// Each entry is `name` (first catalog package of that name) or
    /// `name=version` (exact match). Entries that match nothing become
    /// [`Slot::Unresolved`]; a malformed version is an error.
    pub fn resolve(catalog: &Catalog, entries: &[String]) -> Result<Self> {
        let mut slots = Vec::with_capacity(entries.len());

        for entry in entries {
            let (name, version) = match entry.split_once('=') {
                Some((name, version)) => {
                    let version = Version::parse(version).map_err(|e| DepsolveError::InvalidEntry {
                        entry: entry.clone(),
                        reason: e.to_string(),
                    })?;
                    (name, Some(version))
                }
                None => (entry.as_str(), None),
            };

            if name.is_empty() {
                return Err(DepsolveError::InvalidEntry {
                    entry: entry.clone(),
                    reason: "package name is empty".to_string(),
                });
            }

            match catalog.find(name, version.as_ref()) {
                Some(id) => slots.push(Slot::Installed(id)),
                None => {
                    log::warn!("Initial package {} is not in the catalog", entry);
                    slots.push(Slot::Unresolved);
                }
            }
        }

        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn last(&self) -> Option<&Slot> {
        self.slots.last()
    }

    /// Installed package ids in state order
    pub fn packages(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.slots.iter().filter_map(Slot::package)
    }

    pub fn contains(&self, id: PackageId) -> bool {
        self.slots.contains(&Slot::Installed(id))
    }

    pub fn has_unresolved(&self) -> bool {
        self.slots.contains(&Slot::Unresolved)
    }

    /// A copy of this state with `id` appended
    pub fn with_installed(&self, id: PackageId) -> Self {
        let mut slots = Vec::with_capacity(self.slots.len() + 1);
        slots.extend_from_slice(&self.slots);
        slots.push(Slot::Installed(id));
        Self { slots }
    }

    /// A copy of this state with the first occurrence of `id` removed
    pub fn without(&self, id: PackageId) -> Self {
        let mut slots = self.slots.clone();
        if let Some(pos) = slots.iter().position(|s| *s == Slot::Installed(id)) {
            slots.remove(pos);
        }
        Self { slots }
    }

    /// Render as `name=version` strings, `?` for unresolved slots
    pub fn describe(&self, catalog: &Catalog) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Installed(id) => catalog.get(*id).pretty_string(),
                Slot::Unresolved => "?".to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;

    fn catalog() -> Catalog {
        let v = |s: &str| Version::parse(s).unwrap();
        Catalog::new(vec![
            Package::new("a", v("1.0")),
            Package::new("a", v("2.0")),
            Package::new("b", v("1.0")),
        ])
    }

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_order_matters_for_equality() {
        let a = PackageId::new(0);
        let b = PackageId::new(2);
        let ab = ConfigState::from_packages([a, b]);
        let ba = ConfigState::from_packages([b, a]);
        assert_ne!(ab, ba);
        assert_eq!(ab, ConfigState::new().with_installed(a).with_installed(b));
    }

    #[test]
    fn test_with_and_without() {
        let a = PackageId::new(0);
        let b = PackageId::new(2);
        let state = ConfigState::new().with_installed(a).with_installed(b);
        assert!(state.contains(a));
        assert_eq!(state.last(), Some(&Slot::Installed(b)));

        let removed = state.without(a);
        assert!(!removed.contains(a));
        assert_eq!(removed.packages().collect::<Vec<_>>(), vec![b]);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_resolve_by_name_takes_first() {
        let catalog = catalog();
        let state = ConfigState::resolve(&catalog, &entries(&["a", "b"])).unwrap();
        assert_eq!(state.packages().collect::<Vec<_>>(), vec![PackageId::new(0), PackageId::new(2)]);
    }

    #[test]
    fn test_resolve_exact_version() {
        let catalog = catalog();
        let state = ConfigState::resolve(&catalog, &entries(&["a=2.0"])).unwrap();
        assert_eq!(state.packages().collect::<Vec<_>>(), vec![PackageId::new(1)]);
        assert_eq!(state.describe(&catalog), vec!["a=2.0"]);
    }

    #[test]
    fn test_resolve_unknown_becomes_unresolved_slot() {
        let catalog = catalog();
        let state = ConfigState::resolve(&catalog, &entries(&["a", "zzz", "a=9"])).unwrap();
        assert_eq!(state.len(), 3);
        assert!(state.has_unresolved());
        assert_eq!(state.slots()[1], Slot::Unresolved);
        assert_eq!(state.describe(&catalog), vec!["a=1.0", "?", "?"]);
    }

    #[test]
    fn test_resolve_malformed_version_is_error() {
        let catalog = catalog();
        let err = ConfigState::resolve(&catalog, &entries(&["a=1.x"])).unwrap_err();
        assert!(matches!(err, DepsolveError::InvalidEntry { .. }));
        assert!(ConfigState::resolve(&catalog, &entries(&["=1.0"])).is_err());
    }
}
