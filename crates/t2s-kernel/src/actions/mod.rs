//! Actions: the executable steps a script line compiles to.
//!
//! The command set is closed, so an action is an [`ActionKind`] variant
//! rather than an open trait object. [`create`] is the only way to build
//! one from script text, and it validates parameters up front.
//!
//! | command | parameters |
//! |---|---|
//! | `open` | url |
//! | `select` | `id`\|`name`\|`xpath` value |
//! | `click` | — |
//! | `type` | text |
//! | `read` | varName |
//! | `assertEquals` | [`true`\|`false`] compareKey varName |
//! | `assertReadEquals` | [`true`\|`false`] varName varName |
//! | `assertChecked` | [`true`\|`false`] |
//! | `screenshot` | [identifier] |
//! | `method` | methodName |
//! | `comment` | free text |

mod exec;
mod factory;

pub(crate) use exec::execute;
pub use factory::{COMMANDS, ParseScope, create};

use t2s_types::Locator;

use crate::scenario::ScenarioId;

/// Kind-specific, immutable parameters of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Open {
        url: String,
    },
    Select {
        locator: Locator,
    },
    Click,
    Type {
        text: String,
    },
    Read {
        variable: String,
    },
    /// Compare a compare string against a read variable.
    AssertEquals {
        expect_match: bool,
        key: String,
        variable: String,
    },
    /// Compare two read variables.
    AssertReadEquals {
        expect_match: bool,
        expected: String,
        variable: String,
    },
    AssertChecked {
        expect_checked: bool,
    },
    Screenshot {
        identifier: Option<String>,
    },
    Method {
        name: String,
    },
    Comment {
        text: String,
    },
}

impl ActionKind {
    /// The script command this kind is written as.
    pub fn command(&self) -> &'static str {
        match self {
            ActionKind::Open { .. } => "open",
            ActionKind::Select { .. } => "select",
            ActionKind::Click => "click",
            ActionKind::Type { .. } => "type",
            ActionKind::Read { .. } => "read",
            ActionKind::AssertEquals { .. } => "assertEquals",
            ActionKind::AssertReadEquals { .. } => "assertReadEquals",
            ActionKind::AssertChecked { .. } => "assertChecked",
            ActionKind::Screenshot { .. } => "screenshot",
            ActionKind::Method { .. } => "method",
            ActionKind::Comment { .. } => "comment",
        }
    }
}

/// One step of a chain, bound to the scenario it was parsed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Scenario whose repositories this action resolves names against.
    pub scenario: ScenarioId,
    /// 1-based line in the source file.
    pub line: usize,
    /// The trimmed source line, used when journaling the step.
    pub source: String,
    pub kind: ActionKind,
}

/// Ordered, append-only sequence of actions from one script file.
///
/// A chain is never empty: a script without actionable lines yields no
/// chain at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionChain {
    actions: Vec<Action>,
}

impl ActionChain {
    /// Start a chain with its first action.
    pub fn new(first: Action) -> Self {
        Self {
            actions: vec![first],
        }
    }

    /// Append an action at the tail.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false; present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn head(&self) -> &Action {
        &self.actions[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }
}

impl<'a> IntoIterator for &'a ActionChain {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
