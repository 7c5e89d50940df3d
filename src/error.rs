//! Error types shared by every tree variant.

use std::error;
use std::fmt;
use std::result;

/// The error type for structural and set-level tree operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Error {
    /// A required node argument was absent where the operation has no defined
    /// meaning for "no node". Carries the name of the offending parameter.
    NullArgument(&'static str),
    /// An insertion found its key already present in the tree.
    KeyAlreadyExists,
    /// A removal did not find its key in the tree.
    KeyNotFound,
    /// A subtree replacement would have attached a node below one of its own
    /// descendants, disconnecting part of the tree.
    CycleError,
    /// A rotation was requested on a node lacking the child it pivots on.
    MissingChild,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NullArgument(param) => write!(f, "`{}` is not allowed to be absent", param),
            Error::KeyAlreadyExists => write!(f, "key already exists in the tree"),
            Error::KeyNotFound => write!(f, "key not found in the tree"),
            Error::CycleError => write!(f, "replacement node is an ancestor of the replaced node"),
            Error::MissingChild => write!(f, "node to rotate is missing the required child"),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
