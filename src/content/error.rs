//! Errors raised while assembling the post collection

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("duplicate path {path:?} in {first} and {second}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("path {path:?} in {source_file} is reserved for the index page")]
    ReservedPath { path: String, source_file: String },

    #[error("path {path:?} in {source_file} leaves the output directory")]
    PathEscapesOutput { path: String, source_file: String },

    #[error("duplicate id {id:?} in {first} and {second}")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}
