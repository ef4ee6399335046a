//! Helpers to read the controller's JSON answers.
//!
//! Show command output uses human readable keys (`"IP Address"`,
//! `"All Switches"`). [`normalize_keys`] turns them into identifiers
//! (`IP_Address`, `All_Switches`) before anything looks them up.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const GLOBAL_RESULT: &str = "_global_result";

/// Replaces every run of non-alphanumeric characters in object keys with a
/// single `_` and trims trailing underscores, recursively.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .into_iter()
                .map(|(key, value)| (normalize_key(&key), normalize_keys(value)))
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_separator = false;
    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_separator = false;
        } else if !in_separator {
            out.push('_');
            in_separator = true;
        }
    }
    out.trim_end_matches('_').to_string()
}

/// Checks the `_global_result` block of a configuration answer.
///
/// A numeric `status` (number or digit string) decides: zero is success.
/// Without one, `status_str` must read exactly "success", case aside. A
/// missing block is an error too, reported with the whole answer.
pub fn check_global_result(value: &Value) -> Result<(), ApiError> {
    let Some(global) = value.get(GLOBAL_RESULT) else {
        return Err(ApiError::Rejected(value.to_string()));
    };
    let message: Option<&str> = global.get("status_str").and_then(Value::as_str);
    let code: Option<i64> = global.get("status").and_then(|status| match status {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });

    let accepted: bool = match code {
        Some(code) => code == 0,
        None => message.is_some_and(|m| m.trim().eq_ignore_ascii_case("success")),
    };

    match (accepted, message) {
        (true, _) => Ok(()),
        (false, Some(message)) => Err(ApiError::Rejected(message.to_string())),
        (false, None) => Err(ApiError::Rejected(global.to_string())),
    }
}

/// Session token of a login answer.
pub fn login_token(value: &Value) -> Option<String> {
    value
        .get(GLOBAL_RESULT)
        .and_then(|global| global.get("UIDARUBA"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct SwitchListing {
    #[serde(rename = "All_Switches")]
    all_switches: Vec<SwitchEntry>,
}

#[derive(Debug, Deserialize)]
struct SwitchEntry {
    #[serde(rename = "IP_Address", default)]
    ip_address: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
}

/// Addresses of the switches listed as `up` in a normalized `show switches` answer.
pub fn switches_up(value: &Value) -> Result<Vec<String>, ApiError> {
    if value.get("All_Switches").is_none() {
        return Err(ApiError::Response("`show switches` without All_Switches table".to_string()));
    }
    let listing: SwitchListing = SwitchListing::deserialize(value)?;

    let addresses: Vec<String> = listing
        .all_switches
        .into_iter()
        .filter(|switch| switch.status.as_deref() == Some("up"))
        .filter_map(|switch| switch.ip_address)
        .collect();

    Ok(addresses)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_become_identifiers() {
        assert_eq!(normalize_key("IP Address"), "IP_Address");
        assert_eq!(normalize_key("Config ID  (hash)"), "Config_ID_hash");
        assert_eq!(normalize_key("_data"), "_data");
        assert_eq!(normalize_key("Status"), "Status");
    }

    #[test]
    fn normalization_is_recursive() {
        let raw = json!({
            "All Switches": [{ "IP Address": "10.0.0.2", "Status": "up" }],
            "_meta": ["Name"],
        });
        let normalized = normalize_keys(raw);

        assert_eq!(normalized["All_Switches"][0]["IP_Address"], "10.0.0.2");
        assert_eq!(normalized["_meta"][0], "Name");
    }

    #[test]
    fn global_result_needs_success() {
        assert!(check_global_result(&json!({ "_global_result": { "status": "0", "status_str": "Success" } })).is_ok());

        let rejected = check_global_result(&json!({ "_global_result": { "status": "1", "status_str": "Entry not found" } }));
        assert!(matches!(rejected, Err(ApiError::Rejected(msg)) if msg == "Entry not found"));

        assert!(check_global_result(&json!({ "other": 1 })).is_err());
    }

    #[test]
    fn unsuccessful_message_is_a_rejection() {
        let answer = json!({ "_global_result": { "status": 1, "status_str": "Unsuccessful: user entry not found" } });
        let rejected = check_global_result(&answer);
        assert!(matches!(rejected, Err(ApiError::Rejected(msg)) if msg.starts_with("Unsuccessful")));

        let no_code = json!({ "_global_result": { "status_str": "Unsuccessful" } });
        assert!(check_global_result(&no_code).is_err());
    }

    #[test]
    fn status_code_decides_over_message() {
        assert!(check_global_result(&json!({ "_global_result": { "status": 0, "status_str": "Done" } })).is_ok());
        assert!(check_global_result(&json!({ "_global_result": { "status": "0" } })).is_ok());
        assert!(check_global_result(&json!({ "_global_result": { "status": "2", "status_str": "Success" } })).is_err());
        assert!(check_global_result(&json!({ "_global_result": { "status_str": "SUCCESS" } })).is_ok());
    }

    #[test]
    fn token_from_login_answer() {
        let answer = json!({ "_global_result": { "status": "0", "UIDARUBA": "abc123" } });
        assert_eq!(login_token(&answer).as_deref(), Some("abc123"));
        assert_eq!(login_token(&json!({ "_global_result": { "UIDARUBA": "" } })), None);
    }

    #[test]
    fn only_switches_up_are_listed() {
        let answer = json!({
            "All_Switches": [
                { "IP_Address": "10.0.0.2", "Status": "up" },
                { "IP_Address": "10.0.0.3", "Status": "down" },
                { "IP_Address": "10.0.0.4", "Status": "up" },
            ]
        });
        assert_eq!(switches_up(&answer).unwrap(), vec!["10.0.0.2", "10.0.0.4"]);
        assert!(switches_up(&json!({})).is_err());
    }
}
