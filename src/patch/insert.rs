use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    api::{DataApi, Media, QueryAttrs},
    context::PatchContext,
    patch::edit::InsertWhere,
    patch::error::PatchError,
    value::PatchValue,
};

/// The "insert" operation inserts the edit's value into a user-ordered
/// list or leaf-list, at the position the "where" keyword names.
///
/// For example:
///
/// { "edit-id": "edit1", "operation": "insert", "target": "/song=1",
///   "point": "/song=3", "where": "before",
///   "value": { "song": { "index": 1, "id": "/library/Foo" } } }
///
/// The value travels list-shaped and the call carries insert/point
/// attributes in place of the caller's query vector (RFC 8040 section
/// 4.8.5). The point attribute is the full data path of the reference
/// entry: the request's data path with the point fragment appended.
pub fn insert<A: DataApi>(
    ctx: &PatchContext,
    api: &mut A,
    mut value: PatchValue,
    fields: &Map<String, Value>,
    where_: InsertWhere,
    point: &str,
) -> Result<(), PatchError> {
    let mut attrs = QueryAttrs::new();
    attrs.push("insert", where_.as_str());
    attrs.push("point", format!("{}{}", ctx.data_path()?, point));

    for (name, child) in fields {
        value.splice(name, child);
    }
    let payload = value.encode_list().map_err(PatchError::encode)?;

    trace!(uri = %ctx.uri, %attrs, %payload, "insert");
    api.create(ctx, &ctx.uri, &attrs, &payload, Media::Json)?;
    Ok(())
}
