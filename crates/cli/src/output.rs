use hostguard_domain::{ConfigError, DomainError};
use serde::Serialize;
use serde_json::{json, Value};
use std::process::ExitCode;

/// Success document printed on stdout.
pub fn success(command: &str, result: impl Serialize) -> anyhow::Result<Value> {
    Ok(json!({
        "ok": true,
        "command": command,
        "result": serde_json::to_value(result)?,
    }))
}

pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(domain) = err.downcast_ref::<DomainError>() {
        return domain.kind();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "config";
    }
    "internal"
}

pub fn exit_code(kind: &str) -> u8 {
    match kind {
        "validation" => 2,
        "permission" => 3,
        "corruption" => 4,
        "lock_timeout" => 5,
        "not_found" => 6,
        _ => 1,
    }
}

pub fn failure(err: &anyhow::Error) -> (Value, ExitCode) {
    let kind = error_kind(err);
    let mut doc = json!({
        "ok": false,
        "kind": kind,
        "message": format!("{:#}", err),
    });

    match err.downcast_ref::<DomainError>() {
        Some(DomainError::Corruption { markers, .. }) => {
            doc["markers"] = json!(markers);
        }
        Some(DomainError::Validation { invalid, .. }) => {
            doc["invalid"] = json!(invalid);
        }
        _ => {}
    }

    (doc, ExitCode::from(exit_code(kind)))
}
