//! Scoped repositories: per-scenario name tables with a resolution policy.
//!
//! Each scenario registers one table. A lookup starts at the asking
//! scenario's table; what happens on a miss depends on the [`Fallback`]
//! policy the repository was created with:
//!
//! - [`Fallback::Ancestors`] walks parent scenarios up to the root, so a
//!   child entry shadows an ancestor entry of the same name and unset names
//!   are inherited. Compare strings resolve this way.
//! - [`Fallback::Local`] stops at the asking scenario. Methods resolve this
//!   way: a method defined only in a parent is not visible to its children.

use std::collections::HashMap;

use crate::scenario::ScenarioId;

/// What a lookup does when the asking scenario has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Continue with the parent scenario, up to the root.
    Ancestors,
    /// Report the name as missing.
    Local,
}

#[derive(Debug, Clone)]
struct Scope<V> {
    parent: Option<ScenarioId>,
    entries: HashMap<String, V>,
}

/// Name tables keyed by scenario, resolved with a fixed [`Fallback`].
#[derive(Debug, Clone)]
pub struct ScopedRepository<V> {
    fallback: Fallback,
    scopes: HashMap<ScenarioId, Scope<V>>,
}

impl<V> ScopedRepository<V> {
    pub fn new(fallback: Fallback) -> Self {
        Self {
            fallback,
            scopes: HashMap::new(),
        }
    }

    /// A repository whose lookups fall back to ancestor scenarios.
    pub fn inheriting() -> Self {
        Self::new(Fallback::Ancestors)
    }

    /// A repository whose lookups never leave the asking scenario.
    pub fn local() -> Self {
        Self::new(Fallback::Local)
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Register the table for `scenario`, replacing any previous one.
    ///
    /// `parent` is remembered for ancestor lookups.
    pub fn register(
        &mut self,
        scenario: ScenarioId,
        parent: Option<ScenarioId>,
        entries: HashMap<String, V>,
    ) {
        if self.scopes.contains_key(&scenario) {
            tracing::debug!(scenario = %scenario, "replacing registered scope");
        }
        self.scopes.insert(scenario, Scope { parent, entries });
    }

    /// Resolve `key` as seen from `scenario`.
    pub fn lookup(&self, scenario: ScenarioId, key: &str) -> Option<&V> {
        let mut current = Some(scenario);
        while let Some(id) = current {
            let scope = self.scopes.get(&id)?;
            if let Some(value) = scope.entries.get(key) {
                return Some(value);
            }
            current = match self.fallback {
                Fallback::Ancestors => scope.parent,
                Fallback::Local => None,
            };
        }
        None
    }

    /// Is `key` resolvable from `scenario`?
    pub fn contains(&self, scenario: ScenarioId, key: &str) -> bool {
        self.lookup(scenario, key).is_some()
    }

    /// Is a table registered for `scenario`?
    pub fn is_registered(&self, scenario: ScenarioId) -> bool {
        self.scopes.contains_key(&scenario)
    }

    /// Names defined directly in `scenario`, sorted.
    pub fn local_names(&self, scenario: ScenarioId) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .scopes
            .get(&scenario)
            .map(|s| s.entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Drop every registered table.
    pub fn reset(&mut self) {
        self.scopes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ScenarioId = ScenarioId::ROOT;
    const B: ScenarioId = ScenarioId::new(1);
    const C: ScenarioId = ScenarioId::new(2);

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// A ← B ← C, with `x` defined in A only.
    fn chain(fallback: Fallback) -> ScopedRepository<String> {
        let mut repo = ScopedRepository::new(fallback);
        repo.register(A, None, table(&[("x", "1")]));
        repo.register(B, Some(A), table(&[]));
        repo.register(C, Some(B), table(&[]));
        repo
    }

    #[test]
    fn inheriting_finds_ancestor_entry() {
        let repo = chain(Fallback::Ancestors);
        assert_eq!(repo.lookup(B, "x").map(String::as_str), Some("1"));
        assert_eq!(repo.lookup(C, "x").map(String::as_str), Some("1"));
    }

    #[test]
    fn child_entry_shadows_without_leaking_up() {
        let mut repo = chain(Fallback::Ancestors);
        repo.register(B, Some(A), table(&[("x", "2")]));

        assert_eq!(repo.lookup(B, "x").map(String::as_str), Some("2"));
        assert_eq!(repo.lookup(C, "x").map(String::as_str), Some("2"));
        assert_eq!(repo.lookup(A, "x").map(String::as_str), Some("1"));
    }

    #[test]
    fn root_miss_is_not_found() {
        let repo = chain(Fallback::Ancestors);
        assert_eq!(repo.lookup(C, "missing"), None);
    }

    #[test]
    fn local_does_not_inherit() {
        let repo = chain(Fallback::Local);
        assert_eq!(repo.lookup(A, "x").map(String::as_str), Some("1"));
        assert_eq!(repo.lookup(B, "x"), None);
        assert!(!repo.contains(C, "x"));
    }

    #[test]
    fn unregistered_scenario_resolves_nothing() {
        let repo = chain(Fallback::Ancestors);
        assert_eq!(repo.lookup(ScenarioId::new(9), "x"), None);
    }

    #[test]
    fn register_twice_replaces_table() {
        let mut repo: ScopedRepository<String> = ScopedRepository::inheriting();
        repo.register(A, None, table(&[("x", "1"), ("y", "1")]));
        repo.register(A, None, table(&[("x", "2")]));

        assert_eq!(repo.lookup(A, "x").map(String::as_str), Some("2"));
        assert_eq!(repo.lookup(A, "y"), None);
        assert_eq!(repo.local_names(A), vec!["x"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut repo = chain(Fallback::Ancestors);
        repo.reset();
        assert!(!repo.is_registered(A));
        assert_eq!(repo.lookup(A, "x"), None);
    }

    #[test]
    fn constructors_set_policy() {
        assert_eq!(ScopedRepository::<()>::inheriting().fallback(), Fallback::Ancestors);
        assert_eq!(ScopedRepository::<()>::local().fallback(), Fallback::Local);
    }
}
