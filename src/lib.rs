//! YANG PATCH (RFC 8072) edit translation for RESTCONF data resources.
//!
//! A yang-patch body carries an ordered list of edits against the
//! configuration subtree addressed by the request URI. This crate
//! validates the body, extracts the edits, and translates each one into
//! calls on a lower-level data-resource API ([`api::DataApi`]): create,
//! delete, and write. Schema knowledge comes in through
//! [`resolve::PathBinder`]; YANG compilation, wire handling, and the
//! datastore itself live behind those seams, not here.
//!
//! Translation is fail-fast: the first failing edit aborts the rest of
//! the patch, and edits already applied stay applied.

pub mod api;
pub mod context;
pub mod patch;
pub mod path;
pub mod resolve;
pub mod value;
