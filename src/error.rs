/// Errors surfaced by selector and label parsing.
///
/// The engine and the search strategies themselves cannot fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid move label: {0:?} (expected left, right, up or down)")]
    InvalidMove(String),
    #[error("unknown heuristic: {0:?} (expected empty_tiles, max_tile, monotonicity or clustering)")]
    UnknownHeuristic(String),
    #[error("unknown strategy: {0:?} (expected bfs, dfs or astar)")]
    UnknownStrategy(String),
}
