use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    api::{DataApi, Media},
    context::PatchContext,
    patch::error::PatchError,
    resolve::KeyLeaf,
    value::PatchValue,
};

/// The "merge" operation merges the edit's value with the target data
/// resource.
///
/// For example:
///
/// { "edit-id": "edit2", "operation": "merge", "target": "/song=6",
///   "value": { "song": { "index": 6, "id": "/library/Bar" } } }
///
/// Each value child becomes its own single-field merge write against
/// the full target URI, so an edit with N children issues N calls. When
/// the target is a list entry, every payload also carries the entry's
/// key leaf so the write addresses the right instance.
pub fn merge<A: DataApi>(
    ctx: &PatchContext,
    api: &mut A,
    target: &str,
    value: PatchValue,
    key: Option<&KeyLeaf>,
    fields: &Map<String, Value>,
) -> Result<(), PatchError> {
    let uri = format!("{}{}", ctx.uri, target);

    for (name, child) in fields {
        let mut single = value.clone();
        if let Some(key) = key {
            single.splice(&key.name, &Value::String(key.value.clone()));
        }
        single.splice(name, child);
        let payload = single.encode_plain().map_err(PatchError::encode)?;

        trace!(%uri, %payload, "merge");
        api.write(ctx, &uri, &ctx.query, &payload, Media::Json, true)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use crate::{
        api::{ApiError, DataCall, QueryAttrs, Recorder},
        patch::test_util::{FailingApi, ctx, fields},
    };

    use super::*;

    fn song_key() -> KeyLeaf {
        KeyLeaf {
            name: "index".to_string(),
            value: "6".to_string(),
        }
    }

    #[test]
    fn merge_issues_one_write_per_value_child() {
        let ctx = ctx("/restconf/data/example-jukebox:jukebox/playlist=Foo-One");
        let mut api = Recorder::new();
        let value = PatchValue::new("example-jukebox", "song");
        let key = song_key();
        let children = fields(json!({ "id": "/library/Bar", "length": 205 }));

        let_assert!(Ok(()) = merge(&ctx, &mut api, "/song=6", value, Some(&key), &children));

        let uri = "/restconf/data/example-jukebox:jukebox/playlist=Foo-One/song=6";
        check!(
            api.calls
                == vec![
                    DataCall::write(
                        uri,
                        &QueryAttrs::new(),
                        r#"{"example-jukebox:song":{"index":"6","id":"/library/Bar"}}"#,
                        true,
                    ),
                    DataCall::write(
                        uri,
                        &QueryAttrs::new(),
                        r#"{"example-jukebox:song":{"index":"6","length":205}}"#,
                        true,
                    ),
                ]
        );
    }

    #[test]
    fn merge_into_a_container_carries_no_key_leaf() {
        let ctx = ctx("/restconf/data/ietf-system:system");
        let mut api = Recorder::new();
        let value = PatchValue::new("ietf-system", "clock");
        let children = fields(json!({ "timezone-name": "Europe/Stockholm" }));

        let_assert!(Ok(()) = merge(&ctx, &mut api, "/clock", value, None, &children));

        check!(
            api.calls
                == vec![DataCall::write(
                    "/restconf/data/ietf-system:system/clock",
                    &QueryAttrs::new(),
                    r#"{"ietf-system:clock":{"timezone-name":"Europe/Stockholm"}}"#,
                    true,
                )]
        );
    }

    #[test]
    fn merge_with_no_children_issues_no_calls() {
        let ctx = ctx("/restconf/data/m:c");
        let mut api = Recorder::new();
        let value = PatchValue::new("m", "entry");
        let children = fields(json!({}));

        let_assert!(Ok(()) = merge(&ctx, &mut api, "/entry=1", value, None, &children));

        check!(api.calls == vec![]);
    }

    #[test]
    fn merge_stops_at_the_first_failing_write() {
        let ctx = ctx("/restconf/data/m:c");
        let mut api = FailingApi::fail_at(1, ApiError::invalid_value("bad leaf"));
        let value = PatchValue::new("m", "entry");
        let children = fields(json!({ "a": 1, "b": 2, "c": 3 }));

        let result = merge(&ctx, &mut api, "/entry=1", value, None, &children);

        check!(result == Err(PatchError::Api(ApiError::invalid_value("bad leaf"))));
        check!(api.calls.len() == 2);
    }
}
