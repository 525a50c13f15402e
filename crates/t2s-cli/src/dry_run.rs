//! A page driver that touches no browser.
//!
//! Every locator matches, text is empty and nothing is checked. Useful for
//! exercising a suite's control flow: methods, compare-string resolution
//! and screenshots all run for real.

use t2s_types::{DriverError, Element, Locator, PageDriver};

#[derive(Debug, Default)]
pub struct DryRunPage {
    current: Option<String>,
}

impl DryRunPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageDriver for DryRunPage {
    fn open(&mut self, url: &str) -> Result<(), DriverError> {
        tracing::debug!(url, "dry run: open");
        self.current = Some(url.to_string());
        Ok(())
    }

    fn find(&mut self, locator: &Locator) -> Result<Option<Element>, DriverError> {
        Ok(Some(Element::new(locator.to_string())))
    }

    fn click(&mut self, _element: &Element) -> Result<(), DriverError> {
        Ok(())
    }

    fn type_text(&mut self, _element: &Element, _text: &str) -> Result<(), DriverError> {
        Ok(())
    }

    fn text(&mut self, _element: &Element) -> Result<String, DriverError> {
        Ok(String::new())
    }

    fn checked(&mut self, _element: &Element) -> Result<Option<bool>, DriverError> {
        Ok(Some(false))
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        let url = self.current.as_deref().ok_or(DriverError::NoPage)?;
        Ok(format!("<!-- dry run of {url} -->\n<html></html>\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_is_found_and_unchecked() {
        let mut page = DryRunPage::new();
        let el = page.find(&Locator::xpath("//nothing")).unwrap().unwrap();
        assert_eq!(page.text(&el).unwrap(), "");
        assert_eq!(page.checked(&el).unwrap(), Some(false));
    }

    #[test]
    fn page_source_requires_open() {
        let mut page = DryRunPage::new();
        assert_eq!(page.page_source(), Err(DriverError::NoPage));
        page.open("file://x.html").unwrap();
        assert!(page.page_source().unwrap().contains("file://x.html"));
    }
}
