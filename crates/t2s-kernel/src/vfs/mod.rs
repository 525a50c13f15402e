//! Filesystem access for scenario discovery and screenshots.
//!
//! All paths handed to a [`Filesystem`] are relative to the suite root:
//!
//! ```text
//! <root>/                     # Filesystem root
//! ├── t2s.toml                # optional config
//! ├── screenshot_*.html       # screenshot output
//! └── tests/                  # top-level scenario
//!     ├── compare-strings.t2s
//!     ├── methods/
//!     └── checkout/           # child scenario
//! ```
//!
//! - **LocalFs**: the real directory tree under the configured root
//! - **MemoryFs**: in-memory tree for tests and fixtures

mod local;
mod memory;
mod traits;

pub use local::LocalFs;
pub use memory::MemoryFs;
pub use traits::{DirEntry, DirEntryKind, Filesystem};
