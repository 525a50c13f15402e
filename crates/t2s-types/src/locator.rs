//! Element locators used by the `select` action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an element is looked up on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Id,
    Name,
    Xpath,
}

impl SelectorKind {
    /// All selector kinds, in the order they are documented.
    pub const ALL: [SelectorKind; 3] = [SelectorKind::Id, SelectorKind::Name, SelectorKind::Xpath];

    /// The keyword used for this kind in scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorKind::Id => "id",
            SelectorKind::Name => "name",
            SelectorKind::Xpath => "xpath",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selector keyword that is not `id`, `name` or `xpath`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Selector kind '{0}' is unknown; expected one of id, name, xpath.")]
pub struct UnknownSelectorKind(pub String);

impl FromStr for SelectorKind {
    type Err = UnknownSelectorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSelectorKind(s.to_string()))
    }
}

/// A selector kind paired with the value to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub kind: SelectorKind,
    pub value: String,
}

impl Locator {
    pub fn new(kind: SelectorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Id, value)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Name, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Xpath, value)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("id".parse::<SelectorKind>(), Ok(SelectorKind::Id));
        assert_eq!("name".parse::<SelectorKind>(), Ok(SelectorKind::Name));
        assert_eq!("xpath".parse::<SelectorKind>(), Ok(SelectorKind::Xpath));
    }

    #[test]
    fn kinds_are_case_sensitive() {
        let err = "ID".parse::<SelectorKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Selector kind 'ID' is unknown; expected one of id, name, xpath."
        );
    }

    #[test]
    fn locator_display() {
        assert_eq!(Locator::xpath("//a[1]").to_string(), "xpath '//a[1]'");
    }
}
