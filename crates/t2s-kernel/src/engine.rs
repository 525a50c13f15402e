//! Execution engine: walks a [`ScenarioTree`] and runs its chains.
//!
//! Per scenario, exactly one of these happens:
//!
//! 1. it has tests: run them in discovery order and skip its children;
//! 2. it has children: run each child, depth first;
//! 3. otherwise: warn that the scenario is empty.
//!
//! Per test the engine journals a start line, walks the chain, and journals
//! an end line. An [`ExecutionError`] stops the rest of that chain only;
//! the next test still runs.

use serde::Serialize;
use t2s_types::{Level, PageDriver};
use tracing::info_span;

use crate::actions::{self, ActionChain};
use crate::context::RunContext;
use crate::error::ExecutionError;
use crate::scenario::{ScenarioId, ScenarioTree, Test};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Scenarios visited, including empty ones.
    pub scenarios: usize,
    /// Tests started.
    pub tests: usize,
    /// Tests stopped by an execution error.
    pub aborted: usize,
    /// Severe journal entries recorded during the run.
    pub severe: usize,
}

impl RunSummary {
    /// True when no test aborted and nothing severe was journaled.
    pub fn is_clean(&self) -> bool {
        self.aborted == 0 && self.severe == 0
    }
}

/// Runs a built tree against a [`RunContext`].
pub struct Engine<'t> {
    tree: &'t ScenarioTree,
    max_method_depth: usize,
}

impl<'t> Engine<'t> {
    pub fn new(tree: &'t ScenarioTree) -> Self {
        Self {
            tree,
            max_method_depth: 32,
        }
    }

    /// Limit how deeply `method` calls may nest.
    pub fn with_max_method_depth(mut self, depth: usize) -> Self {
        self.max_method_depth = depth;
        self
    }

    pub fn tree(&self) -> &'t ScenarioTree {
        self.tree
    }

    pub fn max_method_depth(&self) -> usize {
        self.max_method_depth
    }

    /// Run the whole tree from its root scenario.
    pub fn run<D: PageDriver>(&self, ctx: &mut RunContext<D>) -> RunSummary {
        let severe_before = ctx.journal.count(Level::Severe);
        let mut summary = RunSummary::default();
        if !self.tree.is_empty() {
            self.run_scenario(ScenarioId::ROOT, ctx, &mut summary);
        }
        summary.severe = ctx.journal.count(Level::Severe) - severe_before;
        summary
    }

    /// Run one scenario and, if it has no tests, its children.
    pub fn run_scenario<D: PageDriver>(
        &self,
        id: ScenarioId,
        ctx: &mut RunContext<D>,
        summary: &mut RunSummary,
    ) {
        let Some(scenario) = self.tree.get(id) else {
            tracing::warn!(scenario = %id, "no such scenario");
            return;
        };
        let name = scenario.name();
        let _span = info_span!("scenario", name = %name).entered();
        summary.scenarios += 1;

        if !scenario.tests.is_empty() {
            ctx.journal.info(format!("scenario '{name}' started"));
            for test in &scenario.tests {
                self.run_test(test, ctx, summary);
            }
            ctx.journal.info(format!("scenario '{name}' finished"));
        } else if !scenario.children.is_empty() {
            ctx.journal.info(format!("scenario '{name}' started"));
            for &child in &scenario.children {
                self.run_scenario(child, ctx, summary);
            }
            ctx.journal.info(format!("scenario '{name}' finished"));
        } else {
            ctx.journal.warning(format!("scenario '{name}' is empty"));
        }
    }

    /// Start, walk the chain, end.
    pub fn run_test<D: PageDriver>(
        &self,
        test: &Test,
        ctx: &mut RunContext<D>,
        summary: &mut RunSummary,
    ) {
        let _span = info_span!("test", name = %test.name).entered();
        summary.tests += 1;
        ctx.journal.info(format!("test '{}' started", test.name));

        match &test.chain {
            None => ctx.journal.warning(format!("test '{}' is empty", test.name)),
            Some(chain) => {
                if let Err(err) = self.execute_chain(chain, ctx) {
                    summary.aborted += 1;
                    ctx.journal
                        .severe(format!("test '{}' aborted: {err}", test.name));
                }
            }
        }

        ctx.journal.info(format!("test '{}' finished", test.name));
    }

    /// Execute every action of `chain` in order, stopping at the first error.
    pub fn execute_chain<D: PageDriver>(
        &self,
        chain: &ActionChain,
        ctx: &mut RunContext<D>,
    ) -> Result<(), ExecutionError> {
        for action in chain {
            actions::execute(self, action, ctx)?;
        }
        Ok(())
    }
}
