use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    api::{DataApi, Media},
    context::PatchContext,
    patch::error::PatchError,
    value::PatchValue,
};

/// The "create" operation creates the target data resource, only if it
/// does not already exist.
///
/// All of the edit's value children travel in one POST against the
/// request URI; the container that URI addresses decides where the new
/// instance lands.
///
/// For example:
///
/// { "edit-id": "edit1", "operation": "create", "target": "/album=Blackwater%20Park",
///   "value": { "album": { "name": "Blackwater Park", "year": 2001 } } }
pub fn create<A: DataApi>(
    ctx: &PatchContext,
    api: &mut A,
    mut value: PatchValue,
    fields: &Map<String, Value>,
) -> Result<(), PatchError> {
    for (name, child) in fields {
        value.splice(name, child);
    }
    let payload = value.encode_plain().map_err(PatchError::encode)?;

    trace!(uri = %ctx.uri, %payload, "create");
    api.create(ctx, &ctx.uri, &ctx.query, &payload, Media::Json)?;
    Ok(())
}
