use std::fmt;

use depsolve_semver::Requirement;

use super::state::{ConfigState, Slot};
use crate::repository::{Catalog, PackageId};

/// Why a state is not a consistent configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The state holds an initial entry that never resolved
    UnresolvedSlot { position: usize },
    /// A dependency clause of `package` matches no other installed package
    UnmetDependency { package: PackageId, clause: usize },
    /// `package` declares a conflict matched by `other`
    Conflict { package: PackageId, other: PackageId },
}

impl Violation {
    pub fn describe(&self, catalog: &Catalog) -> String {
        match self {
            Violation::UnresolvedSlot { position } => {
                format!("entry #{} does not name a catalog package", position)
            }
            Violation::UnmetDependency { package, clause } => {
                let package = catalog.get(*package);
                let alternatives: Vec<String> =
                    package.depends[*clause].iter().map(Requirement::to_string).collect();
                format!("{} requires one of [{}]", package, alternatives.join(", "))
            }
            Violation::Conflict { package, other } => {
                format!("{} conflicts with {}", catalog.get(*package), catalog.get(*other))
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnresolvedSlot { position } => write!(f, "unresolved entry at position {}", position),
            Violation::UnmetDependency { package, clause } => {
                write!(f, "package {} has unmet dependency clause {}", package, clause)
            }
            Violation::Conflict { package, other } => write!(f, "package {} conflicts with {}", package, other),
        }
    }
}

/// Decides whether a state is internally consistent.
///
/// Dependencies are checked incrementally: only the clauses of the package
/// in the final position are evaluated, against the packages before it.
/// Earlier entries are assumed to have passed when they were appended. After
/// an uninstall the final position holds whatever package is now last.
/// Conflicts are always checked across the whole state.
#[derive(Debug, Clone, Copy)]
pub struct StateValidator<'a> {
    catalog: &'a Catalog,
    full_revalidation: bool,
}

impl<'a> StateValidator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            full_revalidation: false,
        }
    }

    /// Check the dependency clauses of every package instead of only the last.
    pub fn with_full_revalidation(mut self, full: bool) -> Self {
        self.full_revalidation = full;
        self
    }

    pub fn is_valid(&self, state: &ConfigState) -> bool {
        self.check(state).is_ok()
    }

    /// Return the first violation found, if any
    pub fn check(&self, state: &ConfigState) -> Result<(), Violation> {
        let slots = state.slots();
        if slots.is_empty() {
            return Ok(());
        }

        let mut ids = Vec::with_capacity(slots.len());
        for (position, slot) in slots.iter().enumerate() {
            match slot {
                Slot::Installed(id) => ids.push(*id),
                Slot::Unresolved => return Err(Violation::UnresolvedSlot { position }),
            }
        }

        if self.full_revalidation {
            for position in 0..ids.len() {
                self.check_dependencies(&ids, position)?;
            }
        } else {
            self.check_dependencies(&ids, ids.len() - 1)?;
        }

        self.check_conflicts(&ids)
    }

    /// Every clause of the package at `position` must be met by a package at
    /// another position. In incremental mode that is everything before it.
    fn check_dependencies(&self, ids: &[PackageId], position: usize) -> Result<(), Violation> {
        let package = self.catalog.get(ids[position]);

        for (clause_index, clause) in package.depends.iter().enumerate() {
            let met = clause.iter().any(|requirement| {
                ids.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != position)
                    .any(|(_, id)| self.catalog.get(*id).satisfies(requirement))
            });
            if !met {
                return Err(Violation::UnmetDependency {
                    package: ids[position],
                    clause: clause_index,
                });
            }
        }

        Ok(())
    }

    fn check_conflicts(&self, ids: &[PackageId]) -> Result<(), Violation> {
        for &id in ids {
            let package = self.catalog.get(id);
            for conflict in &package.conflicts {
                let hit = ids
                    .iter()
                    .copied()
                    .find(|other| *other != id && self.catalog.get(*other).satisfies(conflict));
                if let Some(other) = hit {
                    return Err(Violation::Conflict { package: id, other });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;
    use depsolve_semver::Version;

    fn pkg(name: &str, version: &str, depends: &[&[&str]], conflicts: &[&str]) -> Package {
        Package::new(name, Version::parse(version).unwrap())
            .with_depends(
                depends
                    .iter()
                    .map(|clause| clause.iter().map(|r| Requirement::parse(r).unwrap()).collect())
                    .collect(),
            )
            .with_conflicts(conflicts.iter().map(|r| Requirement::parse(r).unwrap()).collect())
    }

    fn id(i: usize) -> PackageId {
        PackageId::new(i)
    }

    #[test]
    fn test_empty_state_is_valid() {
        let catalog = Catalog::new(vec![pkg("a", "1", &[&["b"]], &[])]);
        assert!(StateValidator::new(&catalog).is_valid(&ConfigState::new()));
    }

    #[test]
    fn test_unmet_dependency_of_last_package() {
        // a -> b
        let catalog = Catalog::new(vec![pkg("a", "1", &[&["b"]], &[]), pkg("b", "1", &[], &[])]);
        let validator = StateValidator::new(&catalog);

        assert_eq!(
            validator.check(&ConfigState::from_packages([id(0)])),
            Err(Violation::UnmetDependency { package: id(0), clause: 0 })
        );
        assert!(validator.is_valid(&ConfigState::from_packages([id(1), id(0)])));
    }

    #[test]
    fn test_only_last_package_dependencies_checked() {
        // a -> b, but a is not last so its clause is not evaluated
        let catalog = Catalog::new(vec![pkg("a", "1", &[&["b"]], &[]), pkg("c", "1", &[], &[])]);
        let validator = StateValidator::new(&catalog);
        let state = ConfigState::from_packages([id(0), id(1)]);

        assert!(validator.is_valid(&state));
        assert!(!validator.with_full_revalidation(true).is_valid(&state));
    }

    #[test]
    fn test_or_clause_any_alternative() {
        let catalog = Catalog::new(vec![
            pkg("a", "1", &[&["b>=2", "c"]], &[]),
            pkg("b", "1", &[], &[]),
            pkg("c", "1", &[], &[]),
        ]);
        let validator = StateValidator::new(&catalog);
        assert!(!validator.is_valid(&ConfigState::from_packages([id(1), id(0)])));
        assert!(validator.is_valid(&ConfigState::from_packages([id(2), id(0)])));
    }

    #[test]
    fn test_conflict_anywhere_in_state() {
        let catalog = Catalog::new(vec![
            pkg("a", "1", &[], &["b"]),
            pkg("b", "1", &[], &[]),
            pkg("c", "1", &[], &[]),
        ]);
        let validator = StateValidator::new(&catalog);

        for state in [
            ConfigState::from_packages([id(0), id(1), id(2)]),
            ConfigState::from_packages([id(1), id(2), id(0)]),
            ConfigState::from_packages([id(2), id(0), id(1)]),
        ] {
            assert!(!validator.is_valid(&state));
        }
        assert_eq!(
            validator.check(&ConfigState::from_packages([id(1), id(0)])),
            Err(Violation::Conflict { package: id(0), other: id(1) })
        );
        assert!(validator.is_valid(&ConfigState::from_packages([id(0), id(2)])));
    }

    #[test]
    fn test_self_conflict_ignored() {
        // Packages that conflict with their own name only exclude other versions
        let catalog = Catalog::new(vec![pkg("a", "1", &[], &["a"]), pkg("a", "2", &[], &["a"])]);
        let validator = StateValidator::new(&catalog);
        assert!(validator.is_valid(&ConfigState::from_packages([id(0)])));
        assert!(!validator.is_valid(&ConfigState::from_packages([id(0), id(1)])));
    }

    #[test]
    fn test_unresolved_slot_is_invalid() {
        let catalog = Catalog::new(vec![pkg("a", "1", &[], &[])]);
        let validator = StateValidator::new(&catalog);
        let state = ConfigState::from_slots(vec![Slot::Installed(id(0)), Slot::Unresolved]);
        assert_eq!(validator.check(&state), Err(Violation::UnresolvedSlot { position: 1 }));
    }

    #[test]
    fn test_describe_violation() {
        let catalog = Catalog::new(vec![pkg("a", "1", &[&["b", "c>1"]], &["d"]), pkg("d", "2", &[], &[])]);
        let unmet = Violation::UnmetDependency { package: id(0), clause: 0 };
        assert_eq!(unmet.describe(&catalog), "a=1 requires one of [b, c>1]");
        let conflict = Violation::Conflict { package: id(0), other: id(1) };
        assert_eq!(conflict.describe(&catalog), "a=1 conflicts with d=2");
    }
}
