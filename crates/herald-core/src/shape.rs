//! Shape validation for loaded handler manifests.
//!
//! [`validate`] classifies one raw manifest against the contract its
//! directory implies and produces a [`HandlerDescriptor`] or a
//! [`ShapeError`]. Classification is pure; the caller decides what to log
//! and always keeps operating with the strictly smaller valid set.
//!
//! # Accepted contracts
//!
//! Command manifests expose an identifier through `data.name` or a plain
//! `name`, and an entry point through `execute` or `run` (`execute`
//! preferred when both are present):
//!
//! ```json
//! { "data": { "name": "ping", "description": "health check" },
//!   "execute": { "action": "reply", "content": "Pong!" } }
//! ```
//!
//! Event manifests expose a plain `name`, an `execute` entry point, and an
//! optional `once` flag read by JSON truthiness:
//!
//! ```json
//! { "name": "ready", "once": true,
//!   "execute": { "action": "log", "message": "gateway ready" } }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::descriptor::{Action, HandlerDescriptor, HandlerKind};

/// Why a loaded manifest was rejected.
///
/// Rejection is non-fatal by design: the caller logs the filename plus this
/// error and drops the manifest from further processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// The manifest is not a JSON object.
    #[error("manifest must be a JSON object")]
    NotAnObject,

    /// One or more required fields are absent.
    #[error("missing required field(s): {}", fields.join(", "))]
    MissingFields {
        /// The missing field names.
        fields: Vec<&'static str>,
    },

    /// The entry point is present but not a valid action.
    #[error("invalid entry point: {reason}")]
    InvalidEntry {
        /// Why the entry point failed to parse.
        reason: String,
    },
}

/// Validates a loaded manifest against the given contract.
pub fn validate(kind: HandlerKind, value: &Value) -> Result<HandlerDescriptor, ShapeError> {
    if !value.is_object() {
        return Err(ShapeError::NotAnObject);
    }

    match kind {
        HandlerKind::Command => validate_command(value),
        HandlerKind::Event => validate_event(value),
    }
}

fn validate_command(value: &Value) -> Result<HandlerDescriptor, ShapeError> {
    let identifier = value
        .get("data")
        .and_then(|data| data.get("name"))
        .and_then(Value::as_str)
        .or_else(|| value.get("name").and_then(Value::as_str))
        .filter(|name| !name.is_empty());

    // `execute` wins when both are declared.
    let entry = value.get("execute").or_else(|| value.get("run"));

    let (identifier, entry) = match (identifier, entry) {
        (Some(identifier), Some(entry)) => (identifier, entry),
        (identifier, entry) => {
            let mut fields = Vec::new();
            if identifier.is_none() {
                fields.push("name");
            }
            if entry.is_none() {
                fields.push("execute");
            }
            return Err(ShapeError::MissingFields { fields });
        }
    };

    let action = parse_action(entry)?;
    if contains_dispatch(&action) {
        return Err(ShapeError::InvalidEntry {
            reason: "the dispatch action is only valid for event handlers".into(),
        });
    }

    Ok(HandlerDescriptor::command(
        identifier,
        action,
        value.get("data").cloned(),
    ))
}

fn validate_event(value: &Value) -> Result<HandlerDescriptor, ShapeError> {
    let identifier = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());
    let entry = value.get("execute");

    let (identifier, entry) = match (identifier, entry) {
        (Some(identifier), Some(entry)) => (identifier, entry),
        (identifier, entry) => {
            let mut fields = Vec::new();
            if identifier.is_none() {
                fields.push("name");
            }
            if entry.is_none() {
                fields.push("execute");
            }
            return Err(ShapeError::MissingFields { fields });
        }
    };

    let once = value.get("once").is_some_and(truthy);
    let action = parse_action(entry)?;

    Ok(HandlerDescriptor::event(identifier, once, action))
}

fn parse_action(entry: &Value) -> Result<Action, ShapeError> {
    serde_json::from_value(entry.clone()).map_err(|err| ShapeError::InvalidEntry {
        reason: err.to_string(),
    })
}

fn contains_dispatch(action: &Action) -> bool {
    match action {
        Action::Dispatch => true,
        Action::Sequence { steps } => steps.iter().any(contains_dispatch),
        _ => false,
    }
}

/// JSON truthiness, matching the loose boolean coercion of the manifest
/// format: `false`, `0`, `""` and `null` are falsy; everything else is
/// truthy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply_entry() -> Value {
        json!({ "action": "reply", "content": "Pong!" })
    }

    #[test]
    fn command_with_structured_metadata() {
        let manifest = json!({
            "data": { "name": "ping", "description": "health check" },
            "execute": reply_entry(),
        });

        let descriptor = validate(HandlerKind::Command, &manifest).unwrap();
        assert_eq!(descriptor.kind(), HandlerKind::Command);
        assert_eq!(descriptor.identifier(), "ping");
        assert!(descriptor.metadata().is_some());
    }

    #[test]
    fn command_with_plain_name() {
        let manifest = json!({ "name": "ping", "execute": reply_entry() });

        let descriptor = validate(HandlerKind::Command, &manifest).unwrap();
        assert_eq!(descriptor.identifier(), "ping");
        assert!(descriptor.metadata().is_none());
    }

    #[test]
    fn run_accepted_as_execute_alias() {
        let manifest = json!({ "name": "ping", "run": reply_entry() });
        assert!(validate(HandlerKind::Command, &manifest).is_ok());
    }

    #[test]
    fn execute_preferred_over_run() {
        let manifest = json!({
            "name": "ping",
            "execute": { "action": "reply", "content": "from execute" },
            "run": { "action": "reply", "content": "from run" },
        });

        let descriptor = validate(HandlerKind::Command, &manifest).unwrap();
        assert_eq!(
            descriptor.action(),
            &Action::Reply {
                content: "from execute".into(),
                ephemeral: false,
            }
        );
    }

    #[test]
    fn command_missing_name_and_entry_lists_both() {
        let manifest = json!({ "description": "not a handler" });

        let err = validate(HandlerKind::Command, &manifest).unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingFields {
                fields: vec!["name", "execute"],
            }
        );
    }

    #[test]
    fn command_empty_identifier_rejected() {
        let manifest = json!({ "name": "", "execute": reply_entry() });

        let err = validate(HandlerKind::Command, &manifest).unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingFields {
                fields: vec!["name"],
            }
        );
    }

    #[test]
    fn command_rejects_dispatch_action() {
        let manifest = json!({ "name": "loop", "execute": { "action": "dispatch" } });
        let err = validate(HandlerKind::Command, &manifest).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidEntry { .. }));
    }

    #[test]
    fn command_rejects_dispatch_nested_in_sequence() {
        let manifest = json!({
            "name": "loop",
            "execute": { "action": "sequence", "steps": [{ "action": "dispatch" }] },
        });
        let err = validate(HandlerKind::Command, &manifest).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidEntry { .. }));
    }

    #[test]
    fn malformed_entry_point_rejected() {
        let manifest = json!({ "name": "ping", "execute": { "action": "teleport" } });
        let err = validate(HandlerKind::Command, &manifest).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidEntry { .. }));
    }

    #[test]
    fn event_once_defaults_to_false() {
        let manifest = json!({
            "name": "ready",
            "execute": { "action": "log", "message": "up" },
        });

        let descriptor = validate(HandlerKind::Event, &manifest).unwrap();
        assert_eq!(descriptor.kind(), HandlerKind::Event);
        assert!(!descriptor.once());
    }

    #[test]
    fn event_once_uses_truthiness_coercion() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("yes"), true),
            (json!({}), true),
            (json!(false), false),
            (json!(0), false),
            (json!(""), false),
            (json!(null), false),
        ] {
            let manifest = json!({
                "name": "ready",
                "once": raw,
                "execute": { "action": "log", "message": "up" },
            });
            let descriptor = validate(HandlerKind::Event, &manifest).unwrap();
            assert_eq!(descriptor.once(), expected, "once = {manifest}");
        }
    }

    #[test]
    fn event_does_not_accept_run_alias() {
        let manifest = json!({ "name": "ready", "run": reply_entry() });

        let err = validate(HandlerKind::Event, &manifest).unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingFields {
                fields: vec!["execute"],
            }
        );
    }

    #[test]
    fn event_may_declare_dispatch() {
        let manifest = json!({
            "name": "interaction_create",
            "execute": { "action": "dispatch" },
        });
        let descriptor = validate(HandlerKind::Event, &manifest).unwrap();
        assert_eq!(descriptor.action(), &Action::Dispatch);
    }

    #[test]
    fn non_object_manifest_rejected() {
        let err = validate(HandlerKind::Command, &json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err, ShapeError::NotAnObject);
    }
}
