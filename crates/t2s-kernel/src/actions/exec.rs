//! Executing one action against a [`RunContext`].
//!
//! Two failure tiers meet here. Missing prerequisites and driver failures
//! are returned as [`ExecutionError`] and stop the test. Assertion results,
//! an empty `select`, a non-checkable element and `assertChecked` without a
//! selection are journaled as severe and execution continues.

use chrono::Local;
use t2s_types::{Element, PageDriver};

use super::{Action, ActionKind};
use crate::context::RunContext;
use crate::engine::Engine;
use crate::error::ExecutionError;

pub(crate) fn execute<D: PageDriver>(
    engine: &Engine<'_>,
    action: &Action,
    ctx: &mut RunContext<D>,
) -> Result<(), ExecutionError> {
    ctx.journal.info(action.source.clone());
    tracing::debug!(line = action.line, command = action.kind.command(), "executing");

    match &action.kind {
        ActionKind::Open { url } => ctx.page.open(url)?,

        ActionKind::Select { locator } => {
            let found = ctx.page.find(locator)?;
            if found.is_none() {
                ctx.journal.severe(format!("no element found for {locator}"));
            }
            ctx.select(found);
        }

        ActionKind::Click => {
            let element = selected(ctx)?;
            ctx.page.click(&element)?;
        }

        ActionKind::Type { text } => {
            let element = selected(ctx)?;
            ctx.page.type_text(&element, text)?;
        }

        ActionKind::Read { variable } => {
            let element = selected(ctx)?;
            let text = ctx.page.text(&element)?;
            ctx.set_variable(variable.as_str(), text);
        }

        ActionKind::AssertEquals {
            expect_match,
            key,
            variable,
        } => {
            let expected = engine
                .tree()
                .compare_string(action.scenario, key)
                .ok_or_else(|| ExecutionError::UnknownCompareString(key.clone()))?
                .to_string();
            let actual = variable_value(ctx, variable)?;
            report_equality(ctx, "assertEquals", *expect_match, &expected, &actual);
        }

        ActionKind::AssertReadEquals {
            expect_match,
            expected,
            variable,
        } => {
            let expected = variable_value(ctx, expected)?;
            let actual = variable_value(ctx, variable)?;
            report_equality(ctx, "assertReadEquals", *expect_match, &expected, &actual);
        }

        ActionKind::AssertChecked { expect_checked } => {
            let Some(element) = ctx.selected().cloned() else {
                ctx.journal.severe(ExecutionError::NoElementSelected.to_string());
                return Ok(());
            };
            match ctx.page.checked(&element)? {
                None => ctx.journal.severe("element is not checkable"),
                Some(state) if state == *expect_checked => ctx.journal.info("assertChecked passed"),
                Some(_) => {
                    let wanted = if *expect_checked { "checked" } else { "unchecked" };
                    ctx.journal.severe(format!(
                        "assertChecked failed: expected element to be {wanted}"
                    ));
                }
            }
        }

        ActionKind::Screenshot { identifier } => {
            let source = ctx.page.page_source()?;
            let file_name = screenshot_name(identifier.as_deref(), &timestamp());
            let path = ctx.screenshot_dir().join(file_name);
            ctx.fs()
                .write(&path, source.as_bytes())
                .map_err(|source| ExecutionError::Screenshot {
                    path: ctx.fs().absolute(&path),
                    source,
                })?;
            let written = ctx.fs().absolute(&path);
            ctx.journal
                .info(format!("screenshot written to {}", written.display()));
        }

        ActionKind::Method { name } => {
            let limit = engine.max_method_depth();
            if ctx.method_depth() >= limit {
                return Err(ExecutionError::MethodDepthExceeded {
                    name: name.clone(),
                    limit,
                });
            }
            let method = engine
                .tree()
                .method(action.scenario, name)
                .ok_or_else(|| ExecutionError::MethodNotFound(name.clone()))?;

            ctx.journal.info(format!("method '{name}' started"));
            match &method.chain {
                None => ctx.journal.warning(format!("method '{name}' is empty")),
                Some(chain) => {
                    ctx.enter_method();
                    let result = engine.execute_chain(chain, ctx);
                    ctx.leave_method();
                    if let Err(err) = result {
                        ctx.journal.warning(format!("method '{name}' aborted"));
                        return Err(err);
                    }
                }
            }
            ctx.journal.info(format!("method '{name}' finished"));
        }

        ActionKind::Comment { .. } => {}
    }

    Ok(())
}

fn selected<D: PageDriver>(ctx: &RunContext<D>) -> Result<Element, ExecutionError> {
    ctx.selected().cloned().ok_or(ExecutionError::NoElementSelected)
}

fn variable_value<D: PageDriver>(ctx: &RunContext<D>, name: &str) -> Result<String, ExecutionError> {
    ctx.variable(name)
        .map(str::to_string)
        .ok_or_else(|| ExecutionError::UnknownVariable(name.to_string()))
}

fn report_equality<D: PageDriver>(
    ctx: &mut RunContext<D>,
    command: &str,
    expect_match: bool,
    expected: &str,
    actual: &str,
) {
    if (expected == actual) == expect_match {
        ctx.journal.info(format!("{command} passed"));
        return;
    }
    let relation = if expect_match { "to equal" } else { "not to equal" };
    ctx.journal.severe(format!(
        "{command} failed: expected '{expected}' {relation} '{actual}'"
    ));
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S%3f").to_string()
}

/// `screenshot_[<identifier>_]<timestamp>.html`
fn screenshot_name(identifier: Option<&str>, timestamp: &str) -> String {
    match identifier {
        Some(id) => format!("screenshot_{id}_{timestamp}.html"),
        None => format!("screenshot_{timestamp}.html"),
    }
}
