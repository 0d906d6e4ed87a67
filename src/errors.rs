//! Crate-wide error type.
//!
//! Every recoverable failure (malformed FEN, inconsistent positions, bad
//! square notation, illegal move requests) is reported through `ChessError`.
//! Internal invariant violations are not represented here; they panic.

/// Unified error for position import, notation parsing and move requests.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The FEN text could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// The position parsed but violates a board invariant.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// A square string was not `a1`..`h8` (or an index was out of range).
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A long-algebraic move string was malformed.
    #[error("invalid move notation: {0}")]
    InvalidMoveNotation(String),

    /// The requested move is not in the legal move set.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: String, to: String },
}

pub type ChessResult<T> = Result<T, ChessError>;
