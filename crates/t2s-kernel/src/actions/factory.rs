//! Action factory: command name + raw parameters → [`ActionKind`].
//!
//! Parameter syntax belongs to each command. Constructors only validate
//! shape; nothing here touches the page driver.

use std::collections::HashSet;

use t2s_types::Locator;

use super::ActionKind;
use crate::error::InitiationError;
use crate::scenario::ScenarioId;

/// What a constructor may consult about the scenario being parsed.
#[derive(Debug, Clone, Copy)]
pub struct ParseScope<'a> {
    pub scenario: ScenarioId,
    /// Method names registered in this scenario (no ancestors).
    pub methods: &'a HashSet<String>,
}

type Constructor = fn(&ParseScope<'_>, &str) -> Result<ActionKind, InitiationError>;

/// Dispatch table of every command the interpreter understands.
const TABLE: [(&str, Constructor); 11] = [
    ("open", open),
    ("select", select),
    ("click", click),
    ("type", type_text),
    ("read", read),
    ("assertEquals", assert_equals),
    ("assertReadEquals", assert_read_equals),
    ("assertChecked", assert_checked),
    ("screenshot", screenshot),
    ("method", method),
    ("comment", comment),
];

/// Every command name, in table order.
pub const COMMANDS: [&str; 11] = {
    let mut names = [""; 11];
    let mut i = 0;
    while i < TABLE.len() {
        names[i] = TABLE[i].0;
        i += 1;
    }
    names
};

/// Construct the action for `command` with its raw parameter string.
pub fn create(
    scope: &ParseScope<'_>,
    command: &str,
    params: &str,
) -> Result<ActionKind, InitiationError> {
    let (_, constructor) = TABLE
        .iter()
        .find(|(name, _)| *name == command)
        .ok_or_else(|| InitiationError::UnknownAction(command.to_string()))?;
    constructor(scope, params)
}

fn open(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let url = required("open", "url", params)?;
    Ok(ActionKind::Open {
        url: url.to_string(),
    })
}

fn select(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let params = required("select", "byKind", params)?;
    let (kind, value) = params.split_once(' ').unwrap_or((params, ""));
    let kind = kind.parse()?;
    let value = required("select", "value", value)?;
    Ok(ActionKind::Select {
        locator: Locator::new(kind, value),
    })
}

fn click(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    no_parameters("click", params)?;
    Ok(ActionKind::Click)
}

fn type_text(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    // Typed text is taken verbatim; only an all-blank string is rejected.
    if params.trim().is_empty() {
        return Err(InitiationError::MissingParameter {
            action: "type",
            parameter: "text",
        });
    }
    Ok(ActionKind::Type {
        text: params.to_string(),
    })
}

fn read(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let variable = single_token("read", "varName", params)?;
    Ok(ActionKind::Read { variable })
}

fn assert_equals(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let (expect_match, key, variable) = flagged_pair("assertEquals", params)?;
    Ok(ActionKind::AssertEquals {
        expect_match,
        key,
        variable,
    })
}

fn assert_read_equals(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let (expect_match, expected, variable) = flagged_pair("assertReadEquals", params)?;
    Ok(ActionKind::AssertReadEquals {
        expect_match,
        expected,
        variable,
    })
}

fn assert_checked(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let tokens: Vec<&str> = params.split_whitespace().collect();
    let expect_checked = match tokens.as_slice() {
        [] => true,
        [flag] => parse_flag("assertChecked", flag)?,
        _ => {
            return Err(InitiationError::ParameterCount {
                action: "assertChecked",
                expected: "0 or 1",
                got: tokens.len(),
            });
        }
    };
    Ok(ActionKind::AssertChecked { expect_checked })
}

fn screenshot(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let identifier = params.trim();
    if identifier.is_empty() {
        return Ok(ActionKind::Screenshot { identifier: None });
    }
    if identifier.contains(['/', '\\']) {
        return Err(InitiationError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(ActionKind::Screenshot {
        identifier: Some(identifier.to_string()),
    })
}

fn method(scope: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    let name = single_token("method", "methodName", params)?;
    if !scope.methods.contains(&name) {
        return Err(InitiationError::MethodNotFound(name));
    }
    Ok(ActionKind::Method { name })
}

fn comment(_: &ParseScope<'_>, params: &str) -> Result<ActionKind, InitiationError> {
    Ok(ActionKind::Comment {
        text: params.trim().to_string(),
    })
}

fn required<'p>(
    action: &'static str,
    parameter: &'static str,
    params: &'p str,
) -> Result<&'p str, InitiationError> {
    let trimmed = params.trim();
    if trimmed.is_empty() {
        Err(InitiationError::MissingParameter { action, parameter })
    } else {
        Ok(trimmed)
    }
}

fn no_parameters(action: &'static str, params: &str) -> Result<(), InitiationError> {
    let trimmed = params.trim();
    if trimmed.is_empty() {
        Ok(())
    } else {
        Err(InitiationError::UnexpectedParameters {
            action,
            got: trimmed.to_string(),
        })
    }
}

fn single_token(
    action: &'static str,
    parameter: &'static str,
    params: &str,
) -> Result<String, InitiationError> {
    let tokens: Vec<&str> = params.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(InitiationError::MissingParameter { action, parameter }),
        [token] => Ok(token.to_string()),
        _ => Err(InitiationError::ParameterCount {
            action,
            expected: "1",
            got: tokens.len(),
        }),
    }
}

fn parse_flag(action: &'static str, token: &str) -> Result<bool, InitiationError> {
    match token {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(InitiationError::InvalidFlag {
            action,
            got: other.to_string(),
        }),
    }
}

/// `[true|false] first second`, flag defaulting to `true`.
fn flagged_pair(
    action: &'static str,
    params: &str,
) -> Result<(bool, String, String), InitiationError> {
    let tokens: Vec<&str> = params.split_whitespace().collect();
    match tokens.as_slice() {
        [first, second] => Ok((true, first.to_string(), second.to_string())),
        [flag, first, second] => Ok((
            parse_flag(action, flag)?,
            first.to_string(),
            second.to_string(),
        )),
        _ => Err(InitiationError::ParameterCount {
            action,
            expected: "2 or 3",
            got: tokens.len(),
        }),
    }
}
