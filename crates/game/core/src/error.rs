//! Error types shared across the engine.
//!
//! Geometry and occupancy signals represent programmer error: callers are
//! expected to rule them out with the matching queries (`contains`,
//! `check_valid_move`) before acting. The one expected, recoverable
//! condition — "this move is illegal" — is a boolean everywhere, never an
//! error value.

use crate::point::Point;

/// A position or shape that violates component geometry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("point {point} is outside the component")]
    OutOfBounds { point: Point },

    #[error("room extent {width}x{height} must be at least 1x1")]
    DegenerateRoom { width: u32, height: u32 },

    #[error("room tile count {actual} does not match extent {expected}")]
    TileCountMismatch { expected: usize, actual: usize },

    #[error("door {door} is not on the room boundary")]
    DoorOffBoundary { door: Point },

    #[error("door {door} is already connected to a hall")]
    DoorInUse { door: Point },

    #[error("hall segment {from} -> {to} is not axis-aligned")]
    MisalignedSegment { from: Point, to: Point },

    #[error("hall tile count {actual} does not match path length {expected}")]
    PathLengthMismatch { expected: usize, actual: usize },

    #[error("hall endpoints are already connected")]
    AlreadyConnected,

    #[error("hall is not connected to rooms")]
    Unconnected,
}

/// A content operation that the addressed tile cannot honour.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OccupancyError {
    #[error("wall tiles hold no content")]
    Wall,

    #[error("no actor to remove")]
    ActorAbsent,

    #[error("no item to remove")]
    ItemAbsent,

    #[error("actor {name:?} is not in this component")]
    ActorNotFound { name: String },
}
