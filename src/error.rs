//! Error types for umbra.
//!
//! Most problems in this crate are recoverable and surface as empty results
//! plus a log message. The variants here cover the cases a caller has to act
//! on: rejected topology, full arenas, bad options and failed validation.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or querying a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A face tried to reuse an ordered half-edge that another face already
    /// owns, and the build was configured to reject that.
    #[error("half-edge from point {head} to point {tail} already belongs to another face")]
    NonManifoldEdge {
        /// Index of the head point.
        head: usize,
        /// Index of the tail point.
        tail: usize,
    },

    /// An arena has no index left below the sentinel of the mesh's index
    /// type.
    #[error("{element} arena is full ({capacity} slots)")]
    CapacityExceeded {
        /// Which arena ran out.
        element: &'static str,
        /// Slots the index type can address.
        capacity: usize,
    },

    /// Connectivity is inconsistent.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::NonManifoldEdge { head: 3, tail: 7 };
        let msg = err.to_string();
        assert!(msg.contains("point 3"));
        assert!(msg.contains("point 7"));

        let err = MeshError::CapacityExceeded {
            element: "face",
            capacity: 65535,
        };
        assert_eq!(err.to_string(), "face arena is full (65535 slots)");

        let err = MeshError::invalid_param("extrusion_distance", -1.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter: extrusion_distance = -1 (must be positive)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
