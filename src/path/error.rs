use nom_language::error::{VerboseError, VerboseErrorKind};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid api-path syntax at position {position}: {message}")]
    InvalidSyntax { position: usize, message: String },

    #[error("Cannot derive a parent from {fragment:?}: no '/' separator")]
    NoSeparator { fragment: String },

    #[error("Path {path:?} has fewer than {offset} segments to skip")]
    OffsetOutOfRange { path: String, offset: usize },

    #[error("Root segment {segment:?} carries no module prefix")]
    MissingModule { segment: String },
}

impl PathError {
    pub fn invalid_syntax(position: usize, message: impl Into<String>) -> Self {
        PathError::InvalidSyntax {
            position,
            message: message.into(),
        }
    }

    pub fn no_separator(fragment: &str) -> Self {
        PathError::NoSeparator {
            fragment: fragment.to_string(),
        }
    }

    pub fn offset_out_of_range(path: &str, offset: usize) -> Self {
        PathError::OffsetOutOfRange {
            path: path.to_string(),
            offset,
        }
    }

    pub fn missing_module(segment: &str) -> Self {
        PathError::MissingModule {
            segment: segment.to_string(),
        }
    }
}

pub(super) fn convert_verbose_error(input: &str, err: VerboseError<&str>) -> PathError {
    let Some((fragment, kind)) = err.errors.last() else {
        return PathError::InvalidSyntax {
            position: 0,
            message: "invalid api-path syntax".to_string(),
        };
    };

    let position = input.len() - fragment.len();

    let message = match kind {
        VerboseErrorKind::Context(ctx) => ctx.to_string(),
        VerboseErrorKind::Char(c) => format!("expected '{}'", c),
        VerboseErrorKind::Nom(nom_err) => format!("parser error: {:?}", nom_err),
    };

    PathError::InvalidSyntax { position, message }
}

pub(super) fn trailing_input_error(input: &str, rest: &str) -> PathError {
    let position = input.len().saturating_sub(rest.len());

    let message = match rest.chars().next() {
        Some(c) => format!(
            "unexpected character '{}' after a complete segment. Fix: remove it or check the segment syntax at this position.",
            c
        ),
        None => "unexpected end of input".to_string(),
    };

    PathError::InvalidSyntax { position, message }
}
