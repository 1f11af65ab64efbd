use crate::board::Board;

/// Static evaluation: disc differential from Dark's point of view.
/// Dark maximizes this value, Light minimizes it.
pub fn evaluate(board: &Board) -> i32 {
    let (dark, light) = board.disc_counts();
    dark as i32 - light as i32
}
