use tracing::trace;

use crate::{
    api::{DataApi, Media},
    context::PatchContext,
    patch::error::PatchError,
};

/// The "delete" operation deletes the target data resource, only if it
/// currently exists. A missing target fails the edit with data-missing.
///
/// For example:
///
/// { "edit-id": "edit3", "operation": "delete", "target": "/song=9" }
pub fn delete<A: DataApi>(
    ctx: &PatchContext,
    api: &mut A,
    target: &str,
) -> Result<(), PatchError> {
    let uri = format!("{}{}", ctx.uri, target);

    trace!(%uri, "delete");
    api.delete(ctx, &uri, Media::Json)?;
    Ok(())
}

/// The "remove" operation removes the target data resource if it
/// exists; yang-patch tolerates a missing target here, where delete
/// does not.
///
/// The data API reports absence the same way it reports any other
/// delete failure, so remove currently issues the identical call and a
/// missing target still fails the edit.
// TODO: swallow data-missing failures here once DataApi reports absence
// distinctly from other delete errors.
pub fn remove<A: DataApi>(
    ctx: &PatchContext,
    api: &mut A,
    target: &str,
) -> Result<(), PatchError> {
    delete(ctx, api, target)
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use crate::{
        api::{ApiError, DataCall, Recorder},
        patch::test_util::{FailingApi, ctx},
    };

    use super::*;

    #[test]
    fn delete_targets_the_request_uri_plus_fragment() {
        let ctx = ctx("/restconf/data/example-jukebox:jukebox/playlist=Foo-One");
        let mut api = Recorder::new();

        let_assert!(Ok(()) = delete(&ctx, &mut api, "/song=9"));

        check!(
            api.calls
                == vec![DataCall::delete(
                    "/restconf/data/example-jukebox:jukebox/playlist=Foo-One/song=9"
                )]
        );
    }

    #[test]
    fn delete_of_a_missing_target_should_fail() {
        let ctx = ctx("/restconf/data/m:c");
        let mut api = FailingApi::fail_at(0, ApiError::data_missing("/m:c/x=1"));

        let result = delete(&ctx, &mut api, "/x=1");

        check!(result == Err(PatchError::Api(ApiError::data_missing("/m:c/x=1"))));
    }

    #[test]
    fn remove_issues_the_same_call_as_delete() {
        let ctx = ctx("/restconf/data/m:c");
        let mut deletes = Recorder::new();
        let mut removes = Recorder::new();

        let_assert!(Ok(()) = delete(&ctx, &mut deletes, "/x=1"));
        let_assert!(Ok(()) = remove(&ctx, &mut removes, "/x=1"));

        check!(deletes.calls == removes.calls);
    }

    #[test]
    fn remove_of_a_missing_target_still_fails() {
        let ctx = ctx("/restconf/data/m:c");
        let mut api = FailingApi::fail_at(0, ApiError::data_missing("/m:c/x=1"));

        let result = remove(&ctx, &mut api, "/x=1");

        check!(result == Err(PatchError::Api(ApiError::data_missing("/m:c/x=1"))));
    }
}
