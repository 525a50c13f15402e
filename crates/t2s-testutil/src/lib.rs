//! Test utilities for t2s.
//!
//! - [`FakePage`]: an in-memory [`PageDriver`] with scripted elements that
//!   records every call it receives
//! - [`fixture`]: a text format describing a suite directory, loaded into a
//!   `MemoryFs`

pub mod fixture;

use std::collections::HashMap;

use t2s_types::{DriverError, Element, Locator, PageDriver};

pub use fixture::{Fixture, parse_fixture};

/// One element a [`FakePage`] can find.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeElement {
    pub text: String,
    /// `None` for elements that are not checkboxes or radios.
    pub checked: Option<bool>,
    /// Whether `type` may append to the text.
    pub editable: bool,
}

impl FakeElement {
    /// A read-only element showing `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// An empty input.
    pub fn input() -> Self {
        Self {
            editable: true,
            ..Self::default()
        }
    }

    /// A checkbox in the given state.
    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::default()
        }
    }
}

/// Scriptable page driver.
///
/// Element handles are the locator's display form, so a test can look an
/// element up again with the same [`Locator`] it registered it under.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    elements: HashMap<String, FakeElement>,
    pages: HashMap<String, String>,
    current: Option<String>,
    /// Every driver call, in order, e.g. `open file://x.html`, `click id 'ok'`.
    pub calls: Vec<String>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `locator` resolve to `element`.
    pub fn with_element(mut self, locator: Locator, element: FakeElement) -> Self {
        self.elements.insert(locator.to_string(), element);
        self
    }

    /// Serve `source` when `url` is opened. Unknown URLs open an empty page.
    pub fn with_page(mut self, url: impl Into<String>, source: impl Into<String>) -> Self {
        self.pages.insert(url.into(), source.into());
        self
    }

    /// Current state of the element registered under `locator`.
    pub fn element(&self, locator: &Locator) -> Option<&FakeElement> {
        self.elements.get(&locator.to_string())
    }

    /// URL of the current page.
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn element_mut(&mut self, element: &Element) -> Result<&mut FakeElement, DriverError> {
        self.elements
            .get_mut(&element.0)
            .ok_or_else(|| DriverError::Stale(element.clone()))
    }
}

impl PageDriver for FakePage {
    fn open(&mut self, url: &str) -> Result<(), DriverError> {
        self.calls.push(format!("open {url}"));
        self.current = Some(url.to_string());
        Ok(())
    }

    fn find(&mut self, locator: &Locator) -> Result<Option<Element>, DriverError> {
        self.calls.push(format!("find {locator}"));
        let handle = locator.to_string();
        Ok(self
            .elements
            .contains_key(&handle)
            .then(|| Element::new(handle)))
    }

    fn click(&mut self, element: &Element) -> Result<(), DriverError> {
        self.calls.push(format!("click {element}"));
        let target = self.element_mut(element)?;
        if let Some(checked) = target.checked.as_mut() {
            *checked = !*checked;
        }
        Ok(())
    }

    fn type_text(&mut self, element: &Element, text: &str) -> Result<(), DriverError> {
        self.calls.push(format!("type {element} {text}"));
        let target = self.element_mut(element)?;
        if !target.editable {
            return Err(DriverError::NotEditable(element.clone()));
        }
        target.text.push_str(text);
        Ok(())
    }

    fn text(&mut self, element: &Element) -> Result<String, DriverError> {
        self.calls.push(format!("text {element}"));
        Ok(self.element_mut(element)?.text.clone())
    }

    fn checked(&mut self, element: &Element) -> Result<Option<bool>, DriverError> {
        self.calls.push(format!("checked {element}"));
        Ok(self.element_mut(element)?.checked)
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        self.calls.push("page_source".to_string());
        let url = self.current.as_ref().ok_or(DriverError::NoPage)?;
        Ok(self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| "<html></html>".to_string()))
    }
}
