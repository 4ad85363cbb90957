/// Errors that can occur while removing border-connected regions.
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// Error related to the grid, e.g. an access outside of its bounds.
    #[error(transparent)]
    GridError(#[from] unblack_grid::GridError),

    /// The search stack could not grow.
    #[error("Failed to grow the search stack. {0}")]
    AllocationFailed(#[from] std::collections::TryReserveError),
}
