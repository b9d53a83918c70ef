use thiserror::Error;

/// Failures of the warp engine.
///
/// Points that fall outside the source mesh are not errors; they come back
/// as `None` from the projection functions. The only hard failure is a
/// structurally inconsistent grid pair, which the caller must fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarpError {
    /// A triangle was located in the source grid but its id has no
    /// counterpart in the destination grid. The two grids of a warp must
    /// share the same triangle ids cell for cell.
    #[error("triangle {0:?} has no counterpart in the destination grid")]
    MissingDestinationTriangle(String),
}
