use std::io;
use thiserror::Error;

/// Error types for M2 skeletal evaluation and mesh editing
#[derive(Error, Debug)]
pub enum AnimError {
    /// I/O Error while listing a texture search directory
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bone index outside the bone table
    #[error("Bone index {index} out of range ({count} bones)")]
    BoneIndexOutOfRange { index: usize, count: usize },

    /// A bone names a parent that does not exist
    #[error("Bone {bone} references missing parent {parent}")]
    InvalidParent { bone: usize, parent: usize },

    /// The parent chain of a bone loops back on itself
    #[error("Parent cycle detected at bone {bone}")]
    ParentCycle { bone: usize },

    /// Bones passed to a skeleton differ from the ones it was built from
    #[error("Skeleton built for {expected} bones, got {actual}")]
    SkeletonMismatch { expected: usize, actual: usize },

    /// A vertex index outside the vertex buffer
    #[error("Vertex index {index} out of range ({count} vertices)")]
    VertexIndexOutOfRange { index: usize, count: usize },
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
