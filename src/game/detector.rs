//! Sequence, win and fork detection along the four board axes.
//!
//! Every scan treats the origin position as already holding `symbol`; the
//! slot itself is never read. That lets the same scans answer "what if this
//! piece were the opponent's" without touching the board.

use serde::Serialize;

use super::{Board, Position, Slot, Symbol, COLS};

/// Pieces in a row needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Vertical,
    Horizontal,
    DiagonalUp,
    DiagonalDown,
}

impl Axis {
    /// Fixed scan order; the first axis to qualify is the one reported.
    pub const ALL: [Axis; 4] = [
        Axis::Vertical,
        Axis::Horizontal,
        Axis::DiagonalUp,
        Axis::DiagonalDown,
    ];

    /// Unit step `(dc, dr)` in the positive direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Vertical => (0, 1),
            Axis::Horizontal => (1, 0),
            Axis::DiagonalUp => (1, 1),
            Axis::DiagonalDown => (1, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
            Axis::DiagonalUp => "diagonal-up",
            Axis::DiagonalDown => "diagonal-down",
        }
    }
}

impl Board {
    /// Length of the `symbol` run through `pos` along `axis`, counting the
    /// origin. With `gap_allowed > 0` each direction may hop one empty slot
    /// when the slot beyond it continues the run.
    pub fn run_length(
        &self,
        pos: Position,
        symbol: Symbol,
        axis: Axis,
        gap_allowed: usize,
    ) -> usize {
        let (dc, dr) = axis.step();
        1 + self.count_direction(pos, symbol, dc, dr, gap_allowed)
            + self.count_direction(pos, symbol, -dc, -dr, gap_allowed)
    }

    fn count_direction(
        &self,
        pos: Position,
        symbol: Symbol,
        dc: isize,
        dr: isize,
        gap_allowed: usize,
    ) -> usize {
        let target = symbol.to_slot();
        let mut gaps_left = gap_allowed.min(1);
        let mut count = 0;
        let mut cursor = pos;

        while let Some(next) = cursor.offset(dc, dr) {
            match self.at(next) {
                Some(slot) if slot == target => count += 1,
                Some(Slot::Empty) if gaps_left > 0 => {
                    let beyond = next.offset(dc, dr).and_then(|p| self.at(p));
                    if beyond != Some(target) {
                        break;
                    }
                    gaps_left -= 1;
                }
                _ => break,
            }
            cursor = next;
        }
        count
    }

    /// Every axis whose run through `pos` reaches `length`, in scan order.
    pub fn sequence_axes(
        &self,
        pos: Position,
        symbol: Symbol,
        length: usize,
        gap_allowed: usize,
    ) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL
            .into_iter()
            .filter(move |&axis| self.run_length(pos, symbol, axis, gap_allowed) >= length)
    }

    /// First axis (in scan order) with a run of at least `length` through `pos`.
    pub fn has_sequence(
        &self,
        pos: Position,
        symbol: Symbol,
        length: usize,
        gap_allowed: usize,
    ) -> Option<Axis> {
        self.sequence_axes(pos, symbol, length, gap_allowed).next()
    }

    /// Axis of a four-in-a-row through `pos` for `symbol`, if any.
    pub fn check_win(&self, pos: Position, symbol: Symbol) -> Option<Axis> {
        self.has_sequence(pos, symbol, WIN_LENGTH, 0)
    }

    /// Whether dropping a piece of `symbol` in any open column would yield a
    /// run of `length`. The board is unchanged on return.
    pub fn opponent_can_create_sequence(
        &mut self,
        symbol: Symbol,
        length: usize,
        gap_allowed: usize,
    ) -> bool {
        (0..COLS).any(|col| match self.speculate(col, symbol) {
            Some(trial) => trial
                .has_sequence(trial.position(), symbol, length, gap_allowed)
                .is_some(),
            None => false,
        })
    }

    /// Two or more axes each carrying a run of three through `pos`.
    pub fn creates_fork(&self, pos: Position, symbol: Symbol) -> bool {
        self.sequence_axes(pos, symbol, 3, 0).nth(1).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_all(board: &mut Board, moves: &[(usize, Symbol)]) {
        for &(col, symbol) in moves {
            board.place(col, symbol).unwrap();
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.place(col, Symbol::A).unwrap();
        }
        assert_eq!(board.check_win(Position::new(3, 0), Symbol::A), Some(Axis::Horizontal));
        assert_eq!(board.check_win(Position::new(1, 0), Symbol::A), Some(Axis::Horizontal));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.place(3, Symbol::B).unwrap();
        }
        assert_eq!(board.check_win(Position::new(3, 3), Symbol::B), Some(Axis::Vertical));
    }

    #[test]
    fn test_diagonal_up_win() {
        use Symbol::{A, B};
        let mut board = Board::new();
        drop_all(
            &mut board,
            &[(0, A), (1, B), (1, A), (2, B), (2, B), (2, A), (3, B), (3, B), (3, B), (3, A)],
        );
        assert_eq!(board.get(3, 3), Slot::A);
        assert_eq!(board.check_win(Position::new(3, 3), A), Some(Axis::DiagonalUp));
        assert_eq!(board.check_win(Position::new(0, 0), A), Some(Axis::DiagonalUp));
    }

    #[test]
    fn test_diagonal_down_win() {
        use Symbol::{A, B};
        let mut board = Board::new();
        drop_all(
            &mut board,
            &[(6, A), (5, B), (5, A), (4, B), (4, B), (4, A), (3, B), (3, B), (3, B), (3, A)],
        );
        assert_eq!(board.check_win(Position::new(3, 3), A), Some(Axis::DiagonalDown));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, Symbol::A).unwrap();
        }
        assert_eq!(board.check_win(Position::new(1, 0), Symbol::A), None);
    }

    #[test]
    fn test_scan_order_prefers_vertical() {
        let mut board = Board::new();
        // A column of three at col 3 and a row of three ending at (3, 0).
        drop_all(
            &mut board,
            &[(1, Symbol::A), (2, Symbol::A), (3, Symbol::A), (3, Symbol::A), (3, Symbol::A)],
        );
        let axes: Vec<Axis> = board.sequence_axes(Position::new(3, 0), Symbol::A, 3, 0).collect();
        assert_eq!(axes, vec![Axis::Vertical, Axis::Horizontal]);
        assert_eq!(board.has_sequence(Position::new(3, 0), Symbol::A, 3, 0), Some(Axis::Vertical));
    }

    #[test]
    fn test_gap_tolerance() {
        let mut board = Board::new();
        // Row 0: [A, _, A, A]
        drop_all(&mut board, &[(0, Symbol::A), (2, Symbol::A), (3, Symbol::A)]);
        let origin = Position::new(3, 0);
        assert_eq!(board.has_sequence(origin, Symbol::A, 3, 1), Some(Axis::Horizontal));
        assert_eq!(board.has_sequence(origin, Symbol::A, 3, 0), None);
        assert_eq!(board.run_length(origin, Symbol::A, Axis::Horizontal, 0), 2);
        assert_eq!(board.run_length(origin, Symbol::A, Axis::Horizontal, 1), 3);
    }

    #[test]
    fn test_gap_is_not_counted_without_continuation() {
        let mut board = Board::new();
        // Row 0: [_, _, A, A]; the empty slots have no piece beyond them.
        drop_all(&mut board, &[(2, Symbol::A), (3, Symbol::A)]);
        assert_eq!(board.run_length(Position::new(3, 0), Symbol::A, Axis::Horizontal, 1), 2);
    }

    #[test]
    fn test_only_one_gap_per_direction() {
        let mut board = Board::new();
        // Row 0: [A, _, A, _, A]
        drop_all(&mut board, &[(0, Symbol::A), (2, Symbol::A), (4, Symbol::A)]);
        assert_eq!(board.run_length(Position::new(4, 0), Symbol::A, Axis::Horizontal, 1), 2);
        assert_eq!(board.run_length(Position::new(2, 0), Symbol::A, Axis::Horizontal, 1), 3);
    }

    #[test]
    fn test_scans_stop_at_edges() {
        let mut board = Board::new();
        // Pieces at the right edge must not wrap into column 0.
        drop_all(&mut board, &[(0, Symbol::A), (5, Symbol::A), (6, Symbol::A)]);
        assert_eq!(board.run_length(Position::new(6, 0), Symbol::A, Axis::Horizontal, 1), 2);
    }

    #[test]
    fn test_opponent_can_create_sequence_leaves_board_untouched() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, Symbol::B), (1, Symbol::B), (2, Symbol::B)]);
        let before = board;

        assert!(board.opponent_can_create_sequence(Symbol::B, 4, 0));
        assert_eq!(board, before);
        assert!(!board.opponent_can_create_sequence(Symbol::A, 2, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn test_opponent_sequence_with_gap() {
        let mut board = Board::new();
        // B at cols 0 and 3; a drop at col 1 gives [B, B, _, B].
        drop_all(&mut board, &[(0, Symbol::B), (3, Symbol::B)]);
        assert!(!board.opponent_can_create_sequence(Symbol::B, 3, 0));
        assert!(board.opponent_can_create_sequence(Symbol::B, 3, 1));
    }

    #[test]
    fn test_creates_fork() {
        let mut board = Board::new();
        // Horizontal A at cols 1, 2 and vertical A at col 3 under the origin.
        drop_all(
            &mut board,
            &[(1, Symbol::A), (2, Symbol::A), (3, Symbol::A), (3, Symbol::A)],
        );
        // Origin (3, 1) pairs with (3, 0) vertically only: not yet a fork.
        assert!(!board.creates_fork(Position::new(3, 1), Symbol::A));
        // A third piece on col 3 gives (3, 0) a vertical and a horizontal three.
        board.place(3, Symbol::A).unwrap();
        assert!(board.creates_fork(Position::new(3, 0), Symbol::A));
    }

    #[test]
    fn test_single_axis_is_not_a_fork() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, Symbol::A), (1, Symbol::A), (2, Symbol::A)]);
        assert!(!board.creates_fork(Position::new(2, 0), Symbol::A));
    }
}
