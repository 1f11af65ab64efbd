use crate::error::{OthelloError, Result};
use crate::types::{Cell, Position, Side};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Othello board state represented by two disjoint bitboards.
///
/// Bit `row * 8 + col` is set in `dark` or `light` when that side owns the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    dark: u64,
    light: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=light, (3,4)=dark, (4,3)=dark, (4,4)=light.
    pub fn new() -> Self {
        Self {
            dark: bit(28) | bit(35),
            light: bit(27) | bit(36),
        }
    }

    /// Builds an arbitrary position. The two masks must not share a square.
    pub fn from_bitboards(dark: u64, light: u64) -> Result<Self> {
        let overlap = dark & light;
        if overlap != 0 {
            return Err(OthelloError::OverlappingDiscs(overlap));
        }
        Ok(Self { dark, light })
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        let square = bit(checked_index(row, col)?);
        Ok(if self.dark & square != 0 {
            Cell::Dark
        } else if self.light & square != 0 {
            Cell::Light
        } else {
            Cell::Empty
        })
    }

    /// True iff `(row, col)` is empty and placing `side` there captures at least one disc.
    pub fn is_valid_move(&self, row: usize, col: usize, side: Side) -> Result<bool> {
        let pos = checked_index(row, col)?;
        let (me, opp) = self.split(side);
        Ok(collect_flips(pos, me, opp) != 0)
    }

    /// Places one disc and flips captured discs.
    /// Returns the flipped bit mask. An illegal move leaves the board untouched.
    pub fn apply_move(&mut self, row: usize, col: usize, side: Side) -> Result<u64> {
        let pos = checked_index(row, col)?;
        let (me, opp) = self.split(side);

        let flips = collect_flips(pos, me, opp);
        if flips == 0 {
            return Err(OthelloError::InvalidMove { row, col, side });
        }

        let next_me = me | bit(pos) | flips;
        let next_opp = opp & !flips;

        match side {
            Side::Dark => {
                self.dark = next_me;
                self.light = next_opp;
            }
            Side::Light => {
                self.light = next_me;
                self.dark = next_opp;
            }
        }

        Ok(flips)
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Legal moves for `side` in row-major order.
    pub fn legal_positions(&self, side: Side) -> Vec<Position> {
        mask_to_indices(self.legal_moves(side))
            .into_iter()
            .map(|idx| Position::from_index(idx as usize))
            .collect()
    }

    pub fn has_legal_move(&self, side: Side) -> bool {
        self.legal_moves(side) != 0
    }

    /// Neither side can move. Covers both the full board and the mutual block.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Side::Dark) && !self.has_legal_move(Side::Light)
    }

    /// Returns `(dark_count, light_count)`.
    pub fn disc_counts(&self) -> (u8, u8) {
        (self.dark.count_ones() as u8, self.light.count_ones() as u8)
    }

    pub fn empty_count(&self) -> u8 {
        let (dark, light) = self.disc_counts();
        NUM_SQUARES as u8 - dark - light
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.dark & square) != 0 {
                1
            } else if (self.light & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }

    fn split(&self, side: Side) -> (u64, u64) {
        match side {
            Side::Dark => (self.dark, self.light),
            Side::Light => (self.light, self.dark),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Squares flipped by `me` playing at `pos`. Zero means the move is illegal.
fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    let move_bit = bit(pos);
    if ((me | opp) & move_bit) != 0 {
        return 0;
    }

    let (row, col) = pos_to_row_col(pos);
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else if (me & square) != 0 {
                flips |= line;
                break;
            } else {
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

pub(crate) fn mask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        out.push(bits.trailing_zeros() as u8);
        bits &= bits - 1;
    }

    out
}

fn checked_index(row: usize, col: usize) -> Result<usize> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(OthelloError::OutOfBounds { row, col });
    }
    Ok(row * BOARD_SIZE + col)
}

fn bit(pos: usize) -> u64 {
    1u64 << pos
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
