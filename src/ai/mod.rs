pub mod eval;
pub mod search;

pub use search::{SearchResult, Searcher, best_move};
