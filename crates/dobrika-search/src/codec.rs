//! Stored payload codec.
//!
//! Every indexed document stores one payload: its fields joined by `'\n'`
//! in a fixed order.
//!
//! | Position | Field |
//! |----------|-------|
//! | 0 | `task_name` |
//! | 1 | `task_desc` |
//! | 2 | `task_id` |
//! | 3.. | `task_tags`, in order |
//!
//! Search routines recover the task id from position 2, so the order is a
//! storage contract. Fields are not escaped; [`validate`] rejects records
//! that would shift field boundaries.

use dobrika_core::{Error, Result};

use crate::document::TaskRecord;

/// Separator between payload fields.
pub const FIELD_SEPARATOR: char = '\n';

/// Payload position of the task name.
pub const NAME_FIELD: usize = 0;

/// Payload position of the task description.
pub const DESC_FIELD: usize = 1;

/// Payload position of the task id.
pub const TASK_ID_FIELD: usize = 2;

/// Payload position of the first tag.
pub const FIRST_TAG_FIELD: usize = 3;

/// Encode a task into its stored payload.
pub fn encode(task: &TaskRecord) -> String {
    let mut payload = String::with_capacity(
        task.task_name.len()
            + task.task_desc.len()
            + task.task_id.len()
            + task.task_tags.iter().map(|t| t.len() + 1).sum::<usize>()
            + 2,
    );
    payload.push_str(&task.task_name);
    payload.push(FIELD_SEPARATOR);
    payload.push_str(&task.task_desc);
    payload.push(FIELD_SEPARATOR);
    payload.push_str(&task.task_id);
    for tag in &task.task_tags {
        payload.push(FIELD_SEPARATOR);
        payload.push_str(tag);
    }
    payload
}

/// Field at zero-based `index`, or `""` when the payload has fewer fields.
pub fn field_at(payload: &str, index: usize) -> &str {
    payload.split(FIELD_SEPARATOR).nth(index).unwrap_or("")
}

/// Task id stored in a payload.
pub fn task_id(payload: &str) -> &str {
    field_at(payload, TASK_ID_FIELD)
}

/// Reject records the payload format cannot represent.
///
/// Every field must be free of [`FIELD_SEPARATOR`], and the task id must be
/// non-empty since it is the replacement key.
pub fn validate(task: &TaskRecord) -> Result<()> {
    if task.task_id.is_empty() {
        return Err(Error::validation_field("task_id", "must not be empty"));
    }

    let fields = [
        ("task_name", task.task_name.as_str()),
        ("task_desc", task.task_desc.as_str()),
        ("task_id", task.task_id.as_str()),
    ];
    for (name, value) in fields {
        if value.contains(FIELD_SEPARATOR) {
            return Err(Error::validation_field(name, "must not contain newlines"));
        }
    }
    if let Some(pos) = task.task_tags.iter().position(|t| t.contains(FIELD_SEPARATOR)) {
        return Err(Error::validation_field(
            format!("task_tags[{pos}]"),
            "must not contain newlines",
        ));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
