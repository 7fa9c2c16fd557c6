use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::patch::error::PatchError;

/// One edit from a yang-patch edit list.
///
/// Every edit names an operation and a target resource relative to the
/// request URI. Operations carrying data (create, insert, merge,
/// replace) also carry a value; insert additionally says where in a
/// user-ordered list the value lands.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub id: Option<String>,
    pub operation: EditOperation,
    pub target: String,
    pub value: Option<Value>,
    pub point: Option<String>,
    pub where_: Option<InsertWhere>,
}

impl Edit {
    /// Label for logs and error wrapping: the edit-id when present, the
    /// list position otherwise.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{index}"),
        }
    }

    pub(crate) fn from_entry(entry: &Value) -> Result<Edit, PatchError> {
        let Some(entry) = entry.as_object() else {
            return Err(PatchError::malformed("each \"edit\" entry must be an object"));
        };

        let id = optional_scalar(entry, "edit-id")?;
        let operation: EditOperation = scalar_field(entry, "operation")?.parse()?;
        let target = scalar_field(entry, "target")?.to_string();

        let value = entry.get("value").cloned();
        if operation.requires_value() && value.is_none() {
            return Err(PatchError::malformed(format!(
                "\"value\" is required for \"{operation}\" edits"
            )));
        }

        let (point, where_) = if operation == EditOperation::Insert {
            let point = scalar_field(entry, "point")?.to_string();
            let where_ = scalar_field(entry, "where")?.parse()?;
            (Some(point), Some(where_))
        } else {
            (None, None)
        };

        Ok(Edit {
            id,
            operation,
            target,
            value,
            point,
            where_,
        })
    }
}

/// Pull the edit list out of the yang-patch container. A patch without
/// an edit list is valid and holds zero edits.
pub(crate) fn extract_edits(node: &Map<String, Value>) -> Result<Vec<Edit>, PatchError> {
    match node.get("edit") {
        None => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries.iter().map(Edit::from_entry).collect(),
        Some(_) => Err(PatchError::malformed(
            "\"edit\" must be a list of edit entries",
        )),
    }
}

/// Fetch a field that must appear exactly once as a string value.
fn scalar_field<'v>(entry: &'v Map<String, Value>, name: &str) -> Result<&'v str, PatchError> {
    match entry.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(PatchError::malformed(format!(
            "edit field \"{name}\" must be a single string value"
        ))),
        None => Err(PatchError::malformed(format!(
            "edit field \"{name}\" is missing"
        ))),
    }
}

pub(super) fn optional_scalar(
    entry: &Map<String, Value>,
    name: &str,
) -> Result<Option<String>, PatchError> {
    match entry.get(name) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PatchError::malformed(format!(
            "field \"{name}\" must be a single string value"
        ))),
        None => Ok(None),
    }
}

/// Edit operations defined by the yang-patch model. All seven parse;
/// `move` is rejected at translation time as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    Create,
    Delete,
    Insert,
    Merge,
    Move,
    Remove,
    Replace,
}

impl EditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Create => "create",
            EditOperation::Delete => "delete",
            EditOperation::Insert => "insert",
            EditOperation::Merge => "merge",
            EditOperation::Move => "move",
            EditOperation::Remove => "remove",
            EditOperation::Replace => "replace",
        }
    }

    pub(crate) fn requires_value(&self) -> bool {
        matches!(
            self,
            EditOperation::Create
                | EditOperation::Insert
                | EditOperation::Merge
                | EditOperation::Replace
        )
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditOperation {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(EditOperation::Create),
            "delete" => Ok(EditOperation::Delete),
            "insert" => Ok(EditOperation::Insert),
            "merge" => Ok(EditOperation::Merge),
            "move" => Ok(EditOperation::Move),
            "remove" => Ok(EditOperation::Remove),
            "replace" => Ok(EditOperation::Replace),
            _ => Err(PatchError::malformed(format!(
                "unknown edit operation {s:?}"
            ))),
        }
    }
}

/// Placement keyword of an insert edit, relative to a user-ordered list
/// or leaf-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertWhere {
    Before,
    After,
    First,
    Last,
}

impl InsertWhere {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertWhere::Before => "before",
            InsertWhere::After => "after",
            InsertWhere::First => "first",
            InsertWhere::Last => "last",
        }
    }
}

impl fmt::Display for InsertWhere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertWhere {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(InsertWhere::Before),
            "after" => Ok(InsertWhere::After),
            "first" => Ok(InsertWhere::First),
            "last" => Ok(InsertWhere::Last),
            _ => Err(PatchError::malformed(format!(
                "unknown insert position {s:?}"
            ))),
        }
    }
}
