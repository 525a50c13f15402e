//! t2s-kernel: the core of t2s.
//!
//! This crate provides:
//!
//! - **Parser**: one command per line, compiled into action chains
//! - **Actions**: the closed command set, its factory and its execution
//! - **Scenario tree**: directory layout mirrored into scenarios, with
//!   scoped method and compare-string repositories
//! - **Engine**: walks the tree and runs each test against a page driver
//! - **VFS**: local and in-memory filesystems behind one trait
//!
//! [`Suite`] ties them together.

pub mod actions;
pub mod compare_strings;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod journal;
pub mod parser;
pub mod repository;
pub mod scenario;
pub mod suite;
pub mod vfs;

pub use actions::{Action, ActionChain, ActionKind};
pub use config::{ConfigError, SuiteConfig};
pub use context::RunContext;
pub use engine::{Engine, RunSummary};
pub use error::{BuildError, ExecutionError, InitiationError, ParseError, ParseFailure};
pub use journal::Journal;
pub use repository::{Fallback, ScopedRepository};
pub use scenario::{ScenarioId, ScenarioTree, TestScenario, TreeBuilder};
pub use suite::Suite;
