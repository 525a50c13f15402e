//! t2s-types: pure data types shared between the t2s kernel and page drivers.
//!
//! A page driver implementation only needs this crate:
//!
//! - **Locator**: how a script asks for an element (`id`, `name`, `xpath`)
//! - **PageDriver**: the browser-facing capability actions call into
//! - **Journal types**: the structured log records a run produces

mod driver;
mod journal;
mod locator;

pub use driver::{DriverError, Element, PageDriver};
pub use journal::{JournalEntry, Level};
pub use locator::{Locator, SelectorKind, UnknownSelectorKind};
