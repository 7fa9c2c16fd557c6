use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    api::{DataApi, Media},
    context::PatchContext,
    patch::error::PatchError,
    path,
    value::PatchValue,
};

/// The "replace" operation replaces the target data resource with the
/// edit's value.
///
/// The target location MUST exist for the operation to be successful.
///
/// For example:
///
/// { "edit-id": "edit2", "operation": "replace", "target": "/album=Deliverance",
///   "value": { "album": { "name": "Deliverance", "year": 2002 } } }
///
/// Realized as a delete of the existing instance followed by a create
/// at its enclosing resource, so the value must carry the key leaf and
/// every mandatory sibling of the new instance. The failed delete of a
/// missing target short-circuits before anything is created.
pub fn replace<A: DataApi>(
    ctx: &PatchContext,
    api: &mut A,
    target: &str,
    mut value: PatchValue,
    fields: &Map<String, Value>,
) -> Result<(), PatchError> {
    // The enclosing resource is derived up front; a fragment that has no
    // parent fails the edit before any call goes out.
    let parent = path::strip_after_last_slash(target)?;
    let delete_uri = format!("{}{}", ctx.uri, target);
    let create_uri = format!("{}{}", ctx.uri, parent);

    trace!(uri = %delete_uri, "replace: delete");
    api.delete(ctx, &delete_uri, Media::Json)?;

    for (name, child) in fields {
        value.splice(name, child);
    }
    let payload = value.encode_plain().map_err(PatchError::encode)?;

    trace!(uri = %create_uri, %payload, "replace: create");
    api.create(ctx, &create_uri, &ctx.query, &payload, Media::Json)?;
    Ok(())
}
