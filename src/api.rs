use std::fmt;

use serde::Serialize;

use crate::context::PatchContext;

/// Encoding of payloads handed to the data API and of the response the
/// original caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    Json,
    Xml,
}

impl Media {
    pub fn mime(&self) -> &'static str {
        match self {
            Media::Json => "application/yang-data+json",
            Media::Xml => "application/yang-data+xml",
        }
    }
}

/// Datastore addressing mode of the request URI: the unified data
/// resource (RFC 8040) or a specific datastore resource (RFC 8527).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceKind {
    #[default]
    Data,
    Datastore,
}

/// Ordered name/value query attributes forwarded with a call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryAttrs(Vec<(String, String)>);

impl QueryAttrs {
    pub fn new() -> Self {
        QueryAttrs(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for QueryAttrs {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        QueryAttrs(iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect())
    }
}

impl fmt::Display for QueryAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Why a data-resource call failed, labeled with the RESTCONF error
/// tag the transport would report for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    DataMissing,
    InvalidValue,
    OperationFailed,
}

impl ApiErrorKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ApiErrorKind::DataMissing => "data-missing",
            ApiErrorKind::InvalidValue => "invalid-value",
            ApiErrorKind::OperationFailed => "operation-failed",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{kind}: {reason}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub reason: String,
}

impl ApiError {
    pub fn data_missing(resource: &str) -> Self {
        ApiError {
            kind: ApiErrorKind::DataMissing,
            reason: format!("{resource} does not exist"),
        }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        ApiError {
            kind: ApiErrorKind::InvalidValue,
            reason: reason.into(),
        }
    }

    pub fn operation_failed(reason: impl Into<String>) -> Self {
        ApiError {
            kind: ApiErrorKind::OperationFailed,
            reason: reason.into(),
        }
    }
}

/// Low-level RESTCONF data-resource operations a patch translates into.
///
/// `format` selects the payload and response encoding for the call; the
/// patch handlers always pass JSON. Implementations route to the
/// unified data resource or to a named datastore according to
/// [`PatchContext::resource`].
pub trait DataApi {
    /// Create a child resource under `uri` from `payload`. Fails when
    /// the resource already exists.
    fn create(
        &mut self,
        ctx: &PatchContext,
        uri: &str,
        attrs: &QueryAttrs,
        payload: &str,
        format: Media,
    ) -> Result<(), ApiError>;

    /// Remove the resource at `uri`. Fails when it does not exist.
    fn delete(&mut self, ctx: &PatchContext, uri: &str, format: Media) -> Result<(), ApiError>;

    /// Write `payload` at `uri`, merging with the existing instance
    /// when `merge` is set and replacing it otherwise.
    fn write(
        &mut self,
        ctx: &PatchContext,
        uri: &str,
        attrs: &QueryAttrs,
        payload: &str,
        format: Media,
        merge: bool,
    ) -> Result<(), ApiError>;
}

/// One translated data-resource call, as captured by [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DataCall {
    Create {
        uri: String,
        attrs: QueryAttrs,
        payload: String,
    },
    Delete {
        uri: String,
    },
    Write {
        uri: String,
        attrs: QueryAttrs,
        payload: String,
        merge: bool,
    },
}

impl DataCall {
    pub fn create(uri: &str, attrs: &QueryAttrs, payload: &str) -> Self {
        DataCall::Create {
            uri: uri.to_string(),
            attrs: attrs.clone(),
            payload: payload.to_string(),
        }
    }

    pub fn delete(uri: &str) -> Self {
        DataCall::Delete {
            uri: uri.to_string(),
        }
    }

    pub fn write(uri: &str, attrs: &QueryAttrs, payload: &str, merge: bool) -> Self {
        DataCall::Write {
            uri: uri.to_string(),
            attrs: attrs.clone(),
            payload: payload.to_string(),
            merge,
        }
    }
}

impl fmt::Display for DataCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCall::Create {
                uri,
                attrs,
                payload,
            } => {
                write_method(f, "POST", uri, attrs)?;
                write!(f, " {payload}")
            }
            DataCall::Delete { uri } => write!(f, "DELETE {uri}"),
            DataCall::Write {
                uri,
                attrs,
                payload,
                merge,
            } => {
                write_method(f, if *merge { "PATCH" } else { "PUT" }, uri, attrs)?;
                write!(f, " {payload}")
            }
        }
    }
}

fn write_method(
    f: &mut fmt::Formatter<'_>,
    method: &str,
    uri: &str,
    attrs: &QueryAttrs,
) -> fmt::Result {
    write!(f, "{method} {uri}")?;
    if !attrs.is_empty() {
        write!(f, "?{attrs}")?;
    }
    Ok(())
}

/// [`DataApi`] double that records every call instead of touching a
/// datastore. Backs the dry-run CLI and the translation tests.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DataCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }
}

impl DataApi for Recorder {
    fn create(
        &mut self,
        _ctx: &PatchContext,
        uri: &str,
        attrs: &QueryAttrs,
        payload: &str,
        _format: Media,
    ) -> Result<(), ApiError> {
        self.calls.push(DataCall::create(uri, attrs, payload));
        Ok(())
    }

    fn delete(&mut self, _ctx: &PatchContext, uri: &str, _format: Media) -> Result<(), ApiError> {
        self.calls.push(DataCall::delete(uri));
        Ok(())
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn media_names_the_yang_data_mime_types() {
        check!(Media::Json.mime() == "application/yang-data+json");
        check!(Media::Xml.mime() == "application/yang-data+xml");
    }

    #[test]
    fn query_attrs_format_as_a_query_string() {
        let attrs =
            QueryAttrs::from_iter([("insert", "before"), ("point", "/mod:list/entry=a")]);

        check!(attrs.to_string() == "insert=before&point=/mod:list/entry=a");
        check!(attrs.get("insert") == Some("before"));
        check!(attrs.get("depth") == None);
    }

    #[test]
    fn data_call_display_shows_method_uri_and_payload() {
        let call = DataCall::create(
            "/restconf/data/m:c",
            &QueryAttrs::from_iter([("insert", "first")]),
            r#"{"m:x":{}}"#,
        );
        check!(call.to_string() == r#"POST /restconf/data/m:c?insert=first {"m:x":{}}"#);

        let call = DataCall::delete("/restconf/data/m:c/x=1");
        check!(call.to_string() == "DELETE /restconf/data/m:c/x=1");

        let call = DataCall::write("/restconf/data/m:c", &QueryAttrs::new(), "{}", true);
        check!(call.to_string() == "PATCH /restconf/data/m:c {}");
    }

    #[test]
    fn recorder_keeps_calls_in_issue_order() {
        let ctx = PatchContext::new("/restconf/data/m:c");
        let mut recorder = Recorder::new();

        let _ = recorder.delete(&ctx, "/restconf/data/m:c/x=1", Media::Json);
        let _ = recorder.create(&ctx, "/restconf/data/m:c", &QueryAttrs::new(), "{}", Media::Json);

        check!(
            recorder.calls
                == vec![
                    DataCall::delete("/restconf/data/m:c/x=1"),
                    DataCall::create("/restconf/data/m:c", &QueryAttrs::new(), "{}"),
                ]
        );
    }
}
