mod create;
mod delete;
mod edit;
mod error;
mod insert;
mod merge;
mod replace;
#[cfg(test)]
pub mod test_util;

pub use create::create;
pub use delete::{delete, remove};
pub use edit::{Edit, EditOperation, InsertWhere};
pub use error::PatchError;
pub use insert::insert;
pub use merge::merge;
pub use replace::replace;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    api::DataApi,
    context::PatchContext,
    path::ApiPath,
    resolve::{KeyLeaf, PathBinder},
    value::PatchValue,
};

/// Schema path of the resource a yang-patch message body must carry.
pub const YANG_PATCH_RESOURCE: &str = "ietf-yang-patch:yang-patch";

const SINGLE_RESOURCE_REASON: &str =
    "The message-body MUST contain exactly one instance of the expected data resource";

const SINGLE_INSTANCE_REASON: &str =
    "the edit \"value\" must contain exactly one instance of the target resource";

/// A validated yang-patch body: its optional patch-id and the ordered
/// edit list.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchDocument {
    pub patch_id: Option<String>,
    pub edits: Vec<Edit>,
}

impl PatchDocument {
    /// Validate the body shape and pull out the edit list.
    ///
    /// RFC 8072 section 2.1: the message body MUST identify exactly one
    /// resource instance, the yang-patch container itself.
    pub fn parse(body: &Value) -> Result<PatchDocument, PatchError> {
        let node = validate_body(body)?;
        let patch_id = edit::optional_scalar(node, "patch-id")?;
        let edits = edit::extract_edits(node)?;
        Ok(PatchDocument { patch_id, edits })
    }
}

/// Apply a yang-patch body against the resource the request context
/// addresses.
///
/// Edits run in document order and the first failure aborts the rest.
/// Nothing is rolled back: edits that already completed stay applied,
/// and the reported error names the edit it happened in.
pub fn apply<B: PathBinder, A: DataApi>(
    ctx: &PatchContext,
    body: &Value,
    binder: &B,
    api: &mut A,
) -> Result<(), PatchError> {
    let doc = PatchDocument::parse(body)?;
    debug!(
        uri = %ctx.uri,
        media_out = ctx.media_out.mime(),
        patch_id = doc.patch_id.as_deref().unwrap_or("-"),
        edits = doc.edits.len(),
        "applying yang-patch"
    );

    for (index, edit) in doc.edits.iter().enumerate() {
        let label = edit.label(index);
        debug!(edit = %label, operation = %edit.operation, target = %edit.target, "translating edit");
        dispatch(ctx, binder, api, edit).map_err(|e| e.in_edit(&label))?;
    }
    Ok(())
}

fn validate_body(body: &Value) -> Result<&Map<String, Value>, PatchError> {
    let Some(members) = body.as_object() else {
        return Err(PatchError::malformed(SINGLE_RESOURCE_REASON));
    };

    let mut members = members.iter();
    let (name, node) = match (members.next(), members.next()) {
        (Some(member), None) => member,
        _ => return Err(PatchError::malformed(SINGLE_RESOURCE_REASON)),
    };

    if name != YANG_PATCH_RESOURCE {
        return Err(PatchError::malformed(format!(
            "unexpected resource {name:?}, expected \"{YANG_PATCH_RESOURCE}\""
        )));
    }

    let Some(node) = node.as_object() else {
        return Err(PatchError::malformed(
            "the yang-patch resource must be a container",
        ));
    };
    Ok(node)
}

/// Translate one edit into data-resource calls. Structural and path
/// errors surface before any call goes out for the edit.
fn dispatch<B: PathBinder, A: DataApi>(
    ctx: &PatchContext,
    binder: &B,
    api: &mut A,
    edit: &Edit,
) -> Result<(), PatchError> {
    match edit.operation {
        EditOperation::Create => {
            let parts = prepare(ctx, binder, edit)?;
            create::create(ctx, api, parts.value, parts.fields)
        }
        EditOperation::Delete => {
            ApiPath::parse(&edit.target)?;
            delete::delete(ctx, api, &edit.target)
        }
        EditOperation::Insert => {
            let parts = prepare(ctx, binder, edit)?;
            let (point, where_) = insert_params(edit)?;
            ApiPath::parse(point)?;
            insert::insert(ctx, api, parts.value, parts.fields, where_, point)
        }
        EditOperation::Merge => {
            let parts = prepare(ctx, binder, edit)?;
            merge::merge(
                ctx,
                api,
                &edit.target,
                parts.value,
                parts.key.as_ref(),
                parts.fields,
            )
        }
        EditOperation::Move => Err(PatchError::unsupported(edit.operation)),
        EditOperation::Remove => {
            ApiPath::parse(&edit.target)?;
            delete::remove(ctx, api, &edit.target)
        }
        EditOperation::Replace => {
            let parts = prepare(ctx, binder, edit)?;
            replace::replace(ctx, api, &edit.target, parts.value, parts.fields)
        }
    }
}

struct EditParts<'e> {
    value: PatchValue,
    key: Option<KeyLeaf>,
    fields: &'e Map<String, Value>,
}

/// Shared front half of the value-carrying operations: validate the
/// target, bind it to a schema node, check the value instance against
/// the binding, and set up the wrapper payload.
fn prepare<'e, B: PathBinder>(
    ctx: &PatchContext,
    binder: &B,
    edit: &'e Edit,
) -> Result<EditParts<'e>, PatchError> {
    ApiPath::parse(&edit.target)?;
    let bound = binder.bind(&format!("{}{}", ctx.data_path()?, edit.target))?;

    let (instance, fields) = split_value(edit)?;
    if instance != bound.element {
        return Err(PatchError::malformed(format!(
            "value instance {instance:?} does not match the target resource {:?}",
            bound.element
        )));
    }

    let value = PatchValue::new(ctx.module()?, &bound.element);
    Ok(EditParts {
        value,
        key: bound.key,
        fields,
    })
}

/// The edit value must wrap exactly one instance of the target
/// resource: a single member holding either a container object or a
/// one-element list-shaped array. Returns the instance name and its
/// child fields.
fn split_value(edit: &Edit) -> Result<(&str, &Map<String, Value>), PatchError> {
    let Some(value) = &edit.value else {
        return Err(PatchError::malformed(format!(
            "\"value\" is required for \"{}\" edits",
            edit.operation
        )));
    };
    let Some(members) = value.as_object() else {
        return Err(PatchError::malformed(SINGLE_INSTANCE_REASON));
    };

    let mut members = members.iter();
    let (name, instance) = match (members.next(), members.next()) {
        (Some(member), None) => member,
        _ => return Err(PatchError::malformed(SINGLE_INSTANCE_REASON)),
    };

    let fields = match instance {
        Value::Object(fields) => fields,
        Value::Array(items) => match items.as_slice() {
            [Value::Object(fields)] => fields,
            _ => return Err(PatchError::malformed(SINGLE_INSTANCE_REASON)),
        },
        _ => return Err(PatchError::malformed(SINGLE_INSTANCE_REASON)),
    };

    Ok((name.as_str(), fields))
}

fn insert_params(edit: &Edit) -> Result<(&str, InsertWhere), PatchError> {
    match (&edit.point, edit.where_) {
        (Some(point), Some(where_)) => Ok((point.as_str(), where_)),
        _ => Err(PatchError::malformed(
            "insert edits require both \"point\" and \"where\"",
        )),
    }
}
