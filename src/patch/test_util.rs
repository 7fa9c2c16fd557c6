//! Shared doubles for the edit-translation tests.

use serde_json::{Map, Value};

use crate::{
    api::{ApiError, DataApi, DataCall, Media, QueryAttrs},
    context::PatchContext,
};

pub fn ctx(uri: &str) -> PatchContext {
    PatchContext::new(uri)
}

/// Children of a JSON object literal, for handing to the op functions.
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object literal, got {other}"),
    }
}

/// Records calls like `Recorder` but fails the nth call (0-based) with
/// the given error. The failing call is still recorded.
pub struct FailingApi {
    pub calls: Vec<DataCall>,
    fail_at: usize,
    error: ApiError,
}

impl FailingApi {
    pub fn fail_at(call: usize, error: ApiError) -> Self {
        FailingApi {
            calls: Vec::new(),
            fail_at: call,
            error,
        }
    }

    fn outcome(&self) -> Result<(), ApiError> {
        if self.calls.len() == self.fail_at + 1 {
            Err(self.error.clone())
        } else {
            Ok(())
        }
    }
}

impl DataApi for FailingApi {
    fn create(
        &mut self,
        _ctx: &PatchContext,
        uri: &str,
        attrs: &QueryAttrs,
        payload: &str,
        _format: Media,
    ) -> Result<(), ApiError> {
        self.calls.push(DataCall::create(uri, attrs, payload));
        self.outcome()
    }

    fn delete(&mut self, _ctx: &PatchContext, uri: &str, _format: Media) -> Result<(), ApiError> {
        self.calls.push(DataCall::delete(uri));
        self.outcome()
    }

    fn write(
        &mut self,
        _ctx: &PatchContext,
        uri: &str,
        attrs: &QueryAttrs,
        payload: &str,
        _format: Media,
        merge: bool,
    ) -> Result<(), ApiError> {
        self.calls.push(DataCall::write(uri, attrs, payload, merge));
        self.outcome()
    }
}
