//! Rationale rendering for scored tasks.
//!
//! Explanations are driven entirely by the structured flags and sub-score
//! values carried on the task: the strings are rendered from those values
//! and never parsed back into data. Two renderings exist: a terse
//! note list for the full analysis output, and a friendlier sentence for
//! the top-N suggestion view.

use crate::scoring::{HIGH_IMPORTANCE, QUICK_WIN_HOURS};
use crate::task::{Task, TaskFlags};

/// Derive the qualitative flags for a task from its input fields and
/// the values derived during scoring.
pub fn flags_for(
    task: &Task,
    days_until_due: Option<i64>,
    blocking: usize,
    in_cycle: bool,
) -> TaskFlags {
    TaskFlags {
        circular_dependency: in_cycle,
        past_due: days_until_due.is_some_and(|d| d < 0),
        no_due_date: days_until_due.is_none(),
        quick_win: task.estimated_hours <= QUICK_WIN_HOURS,
        high_importance: task.importance >= HIGH_IMPORTANCE,
        blocks: blocking,
    }
}

/// Render the note list shown on every scored task. Falls back to a
/// generic note when no qualitative condition applies.
pub fn explanation(flags: &TaskFlags, days_until_due: Option<i64>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if flags.circular_dependency {
        parts.push("Part of a circular dependency (needs resolution).".to_string());
    }
    if let Some(days) = days_until_due {
        if days < 0 {
            parts.push(format!("Past due by {} day(s).", days.unsigned_abs()));
        }
    } else {
        parts.push("No due date specified (treated as lower urgency).".to_string());
    }
    if flags.quick_win {
        parts.push("Quick win (low estimated effort).".to_string());
    }
    if flags.high_importance {
        parts.push("High importance.".to_string());
    }
    if flags.blocks > 0 {
        parts.push(format!("Blocks {} task(s).", flags.blocks));
    }

    if parts.is_empty() {
        "Balanced by scores.".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Render the friendlier sentence used by the suggestion view.
pub fn why(flags: &TaskFlags, days_until_due: Option<i64>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if flags.circular_dependency {
        parts.push(
            "This task is part of a circular dependency; resolving it will unblock others."
                .to_string(),
        );
    }
    if let Some(days) = days_until_due {
        if days < 0 {
            parts.push(format!("It is past due by {} day(s).", days.unsigned_abs()));
        } else if days <= 2 {
            parts.push(format!("Due in {days} day(s) (urgent)."));
        }
    }
    if flags.blocks > 0 {
        parts.push(format!("Blocks {} other task(s).", flags.blocks));
    }
    if flags.quick_win {
        parts.push("Quick win (low estimated hours).".to_string());
    }

    if parts.is_empty() {
        "Selected based on combined urgency, importance and effort.".to_string()
    } else {
        parts.join(" ")
    }
}
