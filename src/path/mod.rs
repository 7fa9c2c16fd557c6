mod error;
mod parser;

pub use error::PathError;

/// One segment of a RESTCONF api-path: an optionally module-qualified
/// node name, plus key values when the segment addresses a list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub module: Option<String>,
    pub name: String,
    pub keys: Vec<String>,
}

/// A parsed api-path fragment (RFC 8040 section 3.5.3).
///
/// Parsing validates the shape and decodes percent-escapes in key
/// values. The raw fragment string remains the currency for URI
/// construction; the parsed form exists for validation and for key
/// extraction during schema binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<Segment>,
}

impl ApiPath {
    pub fn parse(input: &str) -> Result<ApiPath, PathError> {
        match parser::parse_api_path(input) {
            Ok(("", segments)) => Ok(ApiPath { segments }),
            Ok((rest, _)) => Err(error::trailing_input_error(input, rest)),
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                Err(error::convert_verbose_error(input, e))
            }
            Err(nom::Err::Incomplete(_)) => Err(PathError::invalid_syntax(
                input.len(),
                "unexpected end of input",
            )),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The deepest segment, `None` for the root path `/`.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl TryFrom<&str> for ApiPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ApiPath::parse(value)
    }
}

/// Truncate an api-path fragment just past its last '/' separator,
/// yielding the enclosing resource of the deepest segment.
pub fn strip_after_last_slash(fragment: &str) -> Result<&str, PathError> {
    match fragment.rfind('/') {
        Some(index) => Ok(&fragment[..=index]),
        None => Err(PathError::no_separator(fragment)),
    }
}

/// Skip the leading `offset` segments of a request path, leaving the
/// data path that starts at the topmost data node.
pub fn strip_leading_segments(path: &str, offset: usize) -> Result<&str, PathError> {
    let mut rest = path;
    for _ in 0..offset {
        let tail = rest
            .get(1..)
            .ok_or_else(|| PathError::offset_out_of_range(path, offset))?;
        match tail.find('/') {
            Some(index) => rest = &tail[index..],
            None => return Err(PathError::offset_out_of_range(path, offset)),
        }
    }
    Ok(rest)
}

/// Module prefix of the first segment, which RESTCONF requires on the
/// topmost data node of a data path.
pub fn module_of(data_path: &str) -> Result<&str, PathError> {
    let first = data_path
        .strip_prefix('/')
        .unwrap_or(data_path)
        .split('/')
        .next()
        .unwrap_or("");

    match first.split_once(':') {
        Some((module, _)) if !module.is_empty() => Ok(module),
        _ => Err(PathError::missing_module(first)),
    }
}
