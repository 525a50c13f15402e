//! The page driver interface.
//!
//! Actions never talk to a browser directly. Everything page-related goes
//! through a [`PageDriver`], which is supplied by the caller when a run
//! starts. Construction of actions never touches the driver, so a whole
//! scenario tree can be validated before any page is opened.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locator::Locator;

/// Opaque handle to an element, minted by the driver that found it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element(pub String);

impl Element {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures reported by a page driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("could not open '{url}': {reason}")]
    Navigation { url: String, reason: String },
    #[error("element {0} is no longer attached to the page")]
    Stale(Element),
    #[error("element {0} does not accept text input")]
    NotEditable(Element),
    #[error("text of element {0} cannot be read")]
    Unreadable(Element),
    #[error("no page is open")]
    NoPage,
    #[error("driver failure: {0}")]
    Other(String),
}

/// Browser capability used by actions at execution time.
///
/// Implementations are stateful (the current page, typed input) and are
/// driven by exactly one action at a time.
pub trait PageDriver {
    /// Load `url` as the current page.
    fn open(&mut self, url: &str) -> Result<(), DriverError>;

    /// Locate one element. `Ok(None)` means nothing matched.
    fn find(&mut self, locator: &Locator) -> Result<Option<Element>, DriverError>;

    /// Click an element.
    fn click(&mut self, element: &Element) -> Result<(), DriverError>;

    /// Append `text` to an input or textarea.
    fn type_text(&mut self, element: &Element, text: &str) -> Result<(), DriverError>;

    /// Visible text of an element.
    fn text(&mut self, element: &Element) -> Result<String, DriverError>;

    /// Checked state of an element; `None` when the element is not checkable.
    fn checked(&mut self, element: &Element) -> Result<Option<bool>, DriverError>;

    /// Source of the current page.
    fn page_source(&mut self) -> Result<String, DriverError>;
}

impl<D: PageDriver + ?Sized> PageDriver for Box<D> {
    fn open(&mut self, url: &str) -> Result<(), DriverError> {
        (**self).open(url)
    }

    fn find(&mut self, locator: &Locator) -> Result<Option<Element>, DriverError> {
        (**self).find(locator)
    }

    fn click(&mut self, element: &Element) -> Result<(), DriverError> {
        (**self).click(element)
    }

    fn type_text(&mut self, element: &Element, text: &str) -> Result<(), DriverError> {
        (**self).type_text(element, text)
    }

    fn text(&mut self, element: &Element) -> Result<String, DriverError> {
        (**self).text(element)
    }

    fn checked(&mut self, element: &Element) -> Result<Option<bool>, DriverError> {
        (**self).checked(element)
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        (**self).page_source()
    }
}
