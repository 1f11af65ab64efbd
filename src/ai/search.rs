use std::time::Duration;

use web_time::Instant;

use crate::ai::eval::evaluate;
use crate::board::{BOARD_SIZE, Board, mask_to_indices};
use crate::types::{Position, Side};

const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// Outcome of a search. `best_move` is `None` at a leaf, a terminal node,
/// or when the side to move had to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Position>,
    pub nodes: u64,
    /// Set when a deadline cut the root move list short.
    pub timed_out: bool,
}

/// Minimax value of `board` searched `depth` plies with `side` to move.
pub fn best_move(board: &Board, side: Side, depth: u8) -> SearchResult {
    Searcher::new(depth).search(board, side)
}

/// Depth-bounded alpha-beta searcher with an optional wall-clock budget.
pub struct Searcher {
    max_depth: u8,
    timeout: Option<Duration>,
    start_time: Instant,
    nodes: u64,
    timed_out: bool,
}

impl Searcher {
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth,
            timeout: None,
            start_time: Instant::now(),
            nodes: 0,
            timed_out: false,
        }
    }

    /// The budget is only checked between root moves, and the first root
    /// move is always searched to completion.
    pub fn with_timeout(max_depth: u8, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::new(max_depth)
        }
    }

    pub fn search(&mut self, board: &Board, side: Side) -> SearchResult {
        self.start_time = Instant::now();
        self.nodes = 0;
        self.timed_out = false;

        let (score, best) = self.minimax(board, side, self.max_depth, MIN_SCORE, MAX_SCORE, true);
        let result = SearchResult {
            score,
            best_move: best.map(|idx| Position::from_index(idx as usize)),
            nodes: self.nodes,
            timed_out: self.timed_out,
        };

        log::debug!(
            "search {:?} depth={} score={} move={:?} nodes={} timed_out={}",
            side,
            self.max_depth,
            result.score,
            result.best_move,
            result.nodes,
            result.timed_out
        );
        result
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    fn minimax(
        &mut self,
        board: &Board,
        side: Side,
        depth: u8,
        alpha: i32,
        beta: i32,
        is_root: bool,
    ) -> (i32, Option<u8>) {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return (evaluate(board), None);
        }

        let legal = board.legal_moves(side);
        if legal == 0 {
            // Pass: the opponent moves on the same board, one ply deeper.
            let (score, _) = self.minimax(board, side.opponent(), depth - 1, alpha, beta, false);
            return (score, None);
        }

        let maximizing = side == Side::Dark;
        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };
        let mut best_move = None;
        let mut alpha = alpha;
        let mut beta = beta;

        for (i, mv) in mask_to_indices(legal).into_iter().enumerate() {
            if is_root && i > 0 && self.deadline_passed() {
                self.timed_out = true;
                log::trace!("search deadline hit after {i} root moves");
                break;
            }

            let mut next = *board;
            let (row, col) = (mv as usize / BOARD_SIZE, mv as usize % BOARD_SIZE);
            if next.apply_move(row, col, side).is_err() {
                debug_assert!(false, "legal mask produced an illegal move");
                continue;
            }
            let (score, _) = self.minimax(&next, side.opponent(), depth - 1, alpha, beta, false);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }

    fn deadline_passed(&self) -> bool {
        self.timeout
            .is_some_and(|timeout| self.start_time.elapsed() >= timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BOARD: u64 = u64::MAX;

    fn sq(row: usize, col: usize) -> u64 {
        1u64 << (row * BOARD_SIZE + col)
    }

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    /// Plain minimax without pruning, same pass handling and tie-break.
    fn reference(board: &Board, side: Side, depth: u8) -> (i32, Option<Position>) {
        if depth == 0 || board.is_terminal() {
            return (evaluate(board), None);
        }
        let moves = board.legal_positions(side);
        if moves.is_empty() {
            return (reference(board, side.opponent(), depth - 1).0, None);
        }
        let mut best: Option<(i32, Position)> = None;
        for mv in moves {
            let mut next = *board;
            next.apply_move(mv.row as usize, mv.col as usize, side).unwrap();
            let (score, _) = reference(&next, side.opponent(), depth - 1);
            let better = match best {
                None => true,
                Some((b, _)) if side == Side::Dark => score > b,
                Some((b, _)) => score < b,
            };
            if better {
                best = Some((score, mv));
            }
        }
        let (score, mv) = best.unwrap();
        (score, Some(mv))
    }

    /// Positions reached by always playing the last legal move.
    fn sample_positions(plies: usize) -> Vec<(Board, Side)> {
        let mut out = Vec::new();
        let mut board = Board::new();
        let mut side = Side::Dark;
        for _ in 0..plies {
            out.push((board, side));
            match board.legal_positions(side).last() {
                Some(mv) => {
                    board
                        .apply_move(mv.row as usize, mv.col as usize, side)
                        .unwrap();
                }
                None if board.is_terminal() => break,
                None => {}
            }
            side = side.opponent();
        }
        out
    }

    #[test]
    fn depth_zero_returns_static_eval_without_move() {
        let result = best_move(&Board::new(), Side::Dark, 0);

        assert_eq!(result.score, 0);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn terminal_board_returns_static_eval_without_move() {
        let board = Board::from_bitboards(sq(0, 0) | sq(7, 7), sq(3, 3)).unwrap();

        let result = best_move(&board, Side::Light, 3);

        assert_eq!(result.score, 1);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn tie_breaks_to_first_row_major_move() {
        let board = Board::new();

        // Every opening move scores the same one ply ahead.
        let dark = best_move(&board, Side::Dark, 1);
        assert_eq!(dark.score, 3);
        assert_eq!(dark.best_move, Some(pos(2, 3)));

        let light = best_move(&board, Side::Light, 1);
        assert_eq!(light.score, -3);
        assert_eq!(light.best_move, Some(pos(2, 4)));
    }

    #[test]
    fn depth_one_matches_brute_force() {
        for (board, side) in sample_positions(24) {
            let mut expected: Option<(i32, Position)> = None;
            for mv in board.legal_positions(side) {
                let mut next = board;
                next.apply_move(mv.row as usize, mv.col as usize, side).unwrap();
                let score = evaluate(&next);
                let better = match expected {
                    None => true,
                    Some((b, _)) if side == Side::Dark => score > b,
                    Some((b, _)) => score < b,
                };
                if better {
                    expected = Some((score, mv));
                }
            }

            let result = best_move(&board, side, 1);
            if let Some((score, mv)) = expected {
                assert_eq!(result.score, score);
                assert_eq!(result.best_move, Some(mv));
            }
        }
    }

    #[test]
    fn pruning_does_not_change_minimax_result() {
        for (board, side) in sample_positions(16) {
            for depth in 1..=3 {
                let result = best_move(&board, side, depth);
                let (score, mv) = reference(&board, side, depth);
                assert_eq!((result.score, result.best_move), (score, mv), "depth {depth}");
            }
        }
    }

    #[test]
    fn search_is_deterministic_and_leaves_board_untouched() {
        let mut board = Board::new();
        board.apply_move(2, 3, Side::Dark).unwrap();
        let before = board;

        let first = best_move(&board, Side::Light, 3);
        let second = best_move(&board, Side::Light, 3);

        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn blocked_side_passes_and_consumes_a_ply() {
        // Dark cannot move; light can take the corner and everything with it.
        let dark = sq(0, 1);
        let light = FULL_BOARD ^ sq(0, 0) ^ dark;
        let board = Board::from_bitboards(dark, light).unwrap();

        let shallow = best_move(&board, Side::Dark, 1);
        assert_eq!(shallow.score, 1 - 62);
        assert_eq!(shallow.best_move, None);

        let deep = best_move(&board, Side::Dark, 2);
        assert_eq!(deep.score, -64);
        assert_eq!(deep.best_move, None);

        let light_move = best_move(&board, Side::Light, 1);
        assert_eq!(light_move.best_move, Some(pos(0, 0)));
    }

    #[test]
    fn expired_deadline_still_completes_first_root_move() {
        let mut searcher = Searcher::with_timeout(3, Duration::ZERO);

        let result = searcher.search(&Board::new(), Side::Dark);

        assert_eq!(result.best_move, Some(pos(2, 3)));
        assert!(result.timed_out);
        assert!(searcher.timed_out());
        assert!(result.nodes > 1);
    }

    #[test]
    fn generous_deadline_matches_unbounded_search() {
        let board = Board::new();
        let mut searcher = Searcher::with_timeout(3, Duration::from_secs(60));

        let bounded = searcher.search(&board, Side::Dark);
        let unbounded = best_move(&board, Side::Dark, 3);

        assert!(!bounded.timed_out);
        assert_eq!(bounded, unbounded);
    }
}
