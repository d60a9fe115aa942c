//! Wire payload translation and field validation.
//!
//! Accepts the two shapes collaborators send: a bare JSON array of
//! tasks, or an object with `tasks` plus optional `strategy` and
//! `weights` keys. Field-level validation happens here, before anything
//! reaches the engine: importance must lie in 1-10, hours must be
//! non-negative, dates must be ISO formatted. Identifiers and
//! dependency entries may arrive as strings or integers and are
//! stringified. Every invalid task is reported with its index, all at
//! once.

use chrono::NaiveDate;
use serde_json::Value;
use taskrank_core::{Task, ValidationError, WeightOverrides};

/// A decoded request payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// The validated task batch
    pub tasks: Vec<Task>,
    /// Strategy name, when the payload carried one
    pub strategy: Option<String>,
    /// Weight overrides, when the payload carried them
    pub weights: Option<WeightOverrides>,
}

/// Parse and validate a JSON payload.
pub fn parse(input: &str) -> Result<Payload, String> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| format!("invalid JSON: {e}"))?;

    let (raw_tasks, strategy, weights) = match value {
        Value::Array(items) => (items, None, None),
        Value::Object(mut obj) => {
            let tasks = match obj.remove("tasks") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(
                        "request must be a list of tasks or an object with a \"tasks\" key"
                            .to_string(),
                    )
                }
            };
            let strategy = obj
                .get("strategy")
                .and_then(Value::as_str)
                .map(str::to_string);
            let weights = match obj.remove("weights") {
                Some(w) if !w.is_null() => Some(
                    serde_json::from_value::<WeightOverrides>(w)
                        .map_err(|e| format!("invalid weights: {e}"))?,
                ),
                _ => None,
            };
            (tasks, strategy, weights)
        }
        _ => {
            return Err(
                "request must be a list of tasks or an object with a \"tasks\" key".to_string(),
            )
        }
    };

    let mut tasks = Vec::with_capacity(raw_tasks.len());
    let mut errors: Vec<String> = Vec::new();
    for (index, raw) in raw_tasks.iter().enumerate() {
        match task_from_value(index, raw) {
            Ok(task) => tasks.push(task),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    if errors.is_empty() {
        Ok(Payload {
            tasks,
            strategy,
            weights,
        })
    } else {
        Err(errors.join("\n"))
    }
}

/// Parse repeated `factor=value` flags into a partial weight vector.
pub fn parse_weight_flags(flags: &[String]) -> Result<WeightOverrides, String> {
    let mut overrides = WeightOverrides::default();
    for flag in flags {
        let (factor, value) = flag
            .split_once('=')
            .ok_or_else(|| format!("invalid weight '{flag}': expected factor=value"))?;
        let value: f64 = value
            .parse()
            .map_err(|_| format!("invalid weight value in '{flag}'"))?;
        match factor {
            "urgency" => overrides.urgency = Some(value),
            "importance" => overrides.importance = Some(value),
            "effort" => overrides.effort = Some(value),
            "dependency" | "dependencies" => overrides.dependency = Some(value),
            other => {
                return Err(format!(
                    "unknown factor '{other}': expected urgency, importance, effort, or dependency"
                ))
            }
        }
    }
    Ok(overrides)
}

fn task_from_value(index: usize, raw: &Value) -> Result<Task, Vec<String>> {
    let Some(obj) = raw.as_object() else {
        return Err(vec![format!("task {index}: expected a JSON object")]);
    };
    let mut errors: Vec<ValidationError> = Vec::new();

    let title = match obj.get("title").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            errors.push(ValidationError::MissingTitle);
            String::new()
        }
    };

    // Ids may be strings or integers; a missing id falls back to the title.
    let id = match obj.get("id") {
        Some(v) => match id_like(v) {
            Some(id) => id,
            None => {
                errors.push(ValidationError::InvalidValue {
                    field: "id".to_string(),
                    message: "must be a string or integer".to_string(),
                });
                String::new()
            }
        },
        None => title.clone(),
    };

    let due_date = match obj.get("due_date") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(ValidationError::InvalidDate { value: s.clone() });
                None
            }
        },
        Some(_) => {
            errors.push(ValidationError::InvalidValue {
                field: "due_date".to_string(),
                message: "must be a string or null".to_string(),
            });
            None
        }
    };

    let estimated_hours = match obj.get("estimated_hours") {
        None | Some(Value::Null) => 1.0,
        Some(v) => match v.as_f64() {
            Some(h) if h >= 0.0 => h,
            Some(h) => {
                errors.push(ValidationError::NegativeHours(h));
                1.0
            }
            None => {
                errors.push(ValidationError::InvalidValue {
                    field: "estimated_hours".to_string(),
                    message: "must be a number".to_string(),
                });
                1.0
            }
        },
    };

    let importance = match obj.get("importance") {
        None | Some(Value::Null) => 5,
        Some(v) => match v.as_i64() {
            Some(i) if (1..=10).contains(&i) => i,
            Some(i) => {
                errors.push(ValidationError::ImportanceOutOfRange(i));
                5
            }
            None => {
                errors.push(ValidationError::InvalidValue {
                    field: "importance".to_string(),
                    message: "must be an integer".to_string(),
                });
                5
            }
        },
    };

    let dependencies = match obj.get("dependencies") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut deps = Vec::with_capacity(items.len());
            for item in items {
                match id_like(item) {
                    Some(dep) => deps.push(dep),
                    None => errors.push(ValidationError::InvalidValue {
                        field: "dependencies".to_string(),
                        message: "entries must be strings or integers".to_string(),
                    }),
                }
            }
            deps
        }
        Some(_) => {
            errors.push(ValidationError::InvalidValue {
                field: "dependencies".to_string(),
                message: "must be an array".to_string(),
            });
            Vec::new()
        }
    };

    if !errors.is_empty() {
        return Err(errors
            .into_iter()
            .map(|e| format!("task {index}: {e}"))
            .collect());
    }

    Ok(Task {
        id,
        title,
        due_date,
        estimated_hours,
        importance,
        dependencies,
    })
}

fn id_like(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
