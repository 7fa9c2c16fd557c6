use crate::api::{Media, QueryAttrs, ResourceKind};
use crate::path::{self, PathError};

/// Context of the PATCH request being translated.
///
/// `uri` is the full request path including the API root (for example
/// `/restconf/data/...`); `offset` says how many leading segments that
/// root occupies. Derived calls reuse `uri` verbatim, while module and
/// schema lookups work on the data path with the root stripped.
#[derive(Debug, Clone)]
pub struct PatchContext {
    pub uri: String,
    pub offset: usize,
    pub query: QueryAttrs,
    pub pretty: bool,
    pub media_out: Media,
    pub resource: ResourceKind,
}

impl PatchContext {
    pub fn new(uri: impl Into<String>) -> Self {
        PatchContext {
            uri: uri.into(),
            offset: 0,
            query: QueryAttrs::new(),
            pretty: false,
            media_out: Media::Json,
            resource: ResourceKind::Data,
        }
    }

    /// Request path with the API root stripped, starting at the topmost
    /// data node.
    pub fn data_path(&self) -> Result<&str, PathError> {
        path::strip_leading_segments(&self.uri, self.offset)
    }

    /// Module prefix of the topmost data node of the request path.
    pub fn module(&self) -> Result<&str, PathError> {
        path::module_of(self.data_path()?)
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn data_path_strips_the_api_root() {
        let mut ctx = PatchContext::new("/restconf/data/example-jukebox:jukebox/playlist=Foo-One");
        ctx.offset = 2;

        check!(ctx.data_path() == Ok("/example-jukebox:jukebox/playlist=Foo-One"));
        check!(ctx.module() == Ok("example-jukebox"));
    }

    #[test]
    fn data_path_with_zero_offset_is_the_request_path() {
        let ctx = PatchContext::new("/example-jukebox:jukebox");

        check!(ctx.data_path() == Ok("/example-jukebox:jukebox"));
    }

    #[test]
    fn module_requires_a_prefix_on_the_topmost_node() {
        let mut ctx = PatchContext::new("/restconf/data/jukebox");
        ctx.offset = 2;

        check!(ctx.module() == Err(PathError::missing_module("jukebox")));
    }

    #[test]
    fn data_path_past_the_end_of_the_uri_should_fail() {
        let mut ctx = PatchContext::new("/restconf");
        ctx.offset = 2;

        check!(ctx.data_path() == Err(PathError::offset_out_of_range("/restconf", 2)));
    }
}
