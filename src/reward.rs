//! Heuristic reward shaping for the learning agent's moves.
//!
//! The weights are a tunable heuristic, not an optimal shaping. They live in
//! [`RewardWeights`] so a config file can retune them without touching the
//! control flow in [`RewardShaper::reward`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{Axis, Board, Position, Symbol, ROWS, WIN_LENGTH};

pub const WIN_VERTICAL_BONUS: f32 = 20.0;
pub const WIN_OTHER_BONUS: f32 = 25.0;
pub const BLOCK_BONUS: f32 = 5.0;
pub const THREE_FLAT_BONUS: f32 = 2.5;
pub const THREE_VERTICAL_BONUS: f32 = 2.0;
pub const TWO_BONUS: f32 = 0.5;
pub const ALLOW_THREE_PENALTY: f32 = -3.0;
pub const ALLOW_TWO_PENALTY: f32 = -0.8;
pub const FORK_BONUS: f32 = 3.0;
pub const CENTER_BONUS: f32 = 0.3;
pub const NEAR_CENTER_BONUS: f32 = 0.2;
pub const ROW_BIAS: f32 = 0.5;
pub const THREAT_GAP: usize = 1;

const CENTER_COLUMN: usize = 3;

/// Shaping weights, loadable from the `[shaping]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    /// Completing four in a column
    pub win_vertical: f32,
    /// Completing four on a row or diagonal
    pub win_other: f32,
    /// Taking the slot where the opponent would have won
    pub block: f32,
    /// Three in a row on at least one non-vertical axis
    pub three_flat: f32,
    /// Three in a row on the vertical axis only
    pub three_vertical: f32,
    pub two: f32,
    /// Opponent can make three next turn (should be <= 0)
    pub allow_three: f32,
    /// Opponent can make two next turn (should be <= 0)
    pub allow_two: f32,
    pub fork: f32,
    pub center: f32,
    pub near_center: f32,
    /// Scales the non-win sum by `1 + row_bias * (1 - (row + 1) / 6)`
    pub row_bias: f32,
    /// Gap tolerance for the opponent-three lookahead
    pub threat_gap: usize,
}

impl Default for RewardWeights {
    fn default() -> Self {
        RewardWeights {
            win_vertical: WIN_VERTICAL_BONUS,
            win_other: WIN_OTHER_BONUS,
            block: BLOCK_BONUS,
            three_flat: THREE_FLAT_BONUS,
            three_vertical: THREE_VERTICAL_BONUS,
            two: TWO_BONUS,
            allow_three: ALLOW_THREE_PENALTY,
            allow_two: ALLOW_TWO_PENALTY,
            fork: FORK_BONUS,
            center: CENTER_BONUS,
            near_center: NEAR_CENTER_BONUS,
            row_bias: ROW_BIAS,
            threat_gap: THREAT_GAP,
        }
    }
}

impl RewardWeights {
    /// Height multiplier applied to the non-win sum for a piece on `row`.
    pub fn row_multiplier(&self, row: usize) -> f32 {
        1.0 + self.row_bias * (1.0 - (row + 1) as f32 / ROWS as f32)
    }

    /// Upper bound on what a non-winning move can earn.
    pub fn max_shaped_reward(&self) -> f32 {
        let shape = self.three_flat.max(self.three_vertical).max(self.two).max(0.0);
        let position = self.center.max(self.near_center).max(0.0);
        let sum = self.block.max(0.0) + shape + self.fork.max(0.0) + position;
        sum * self.row_multiplier(0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bonuses = [
            ("block", self.block),
            ("three_flat", self.three_flat),
            ("three_vertical", self.three_vertical),
            ("two", self.two),
            ("fork", self.fork),
            ("center", self.center),
            ("near_center", self.near_center),
            ("row_bias", self.row_bias),
        ];
        for (name, value) in bonuses {
            if !(value >= 0.0) {
                return Err(ConfigError::Validation(format!("shaping.{name} must be >= 0")));
            }
        }
        if self.allow_three > 0.0 || self.allow_two > 0.0 {
            return Err(ConfigError::Validation(
                "shaping.allow_three and shaping.allow_two must be <= 0".into(),
            ));
        }
        let ceiling = self.max_shaped_reward();
        if self.win_vertical <= ceiling || self.win_other <= ceiling {
            return Err(ConfigError::Validation(format!(
                "shaping win bonuses must exceed the largest non-win reward ({ceiling:.2})"
            )));
        }
        Ok(())
    }
}

/// Scores one of the agent's moves after it has been placed on the board.
#[derive(Debug, Clone, Default)]
pub struct RewardShaper {
    weights: RewardWeights,
}

impl RewardShaper {
    pub fn new(weights: RewardWeights) -> Self {
        RewardShaper { weights }
    }

    /// Reward for `me` having just dropped into `action`, landing on `row`.
    ///
    /// Opponent lookahead places and removes pieces through
    /// [`Board::speculate`]; the board is identical on return.
    pub fn reward(
        &self,
        action: usize,
        row: usize,
        me: Symbol,
        opponent: Symbol,
        board: &mut Board,
    ) -> f32 {
        let w = &self.weights;
        let pos = Position::new(action, row);

        if let Some(axis) = board.has_sequence(pos, me, WIN_LENGTH, 0) {
            return match axis {
                Axis::Vertical => w.win_vertical,
                _ => w.win_other,
            };
        }

        let mut reward = 0.0;

        // The scan ignores the origin slot, so this asks whether the opponent
        // would have won here.
        if board.check_win(pos, opponent).is_some() {
            reward += w.block;
        }

        let threes: Vec<Axis> = board.sequence_axes(pos, me, 3, 0).collect();
        if threes.iter().any(|&axis| axis != Axis::Vertical) {
            reward += w.three_flat;
        } else if !threes.is_empty() {
            reward += w.three_vertical;
        } else if board.has_sequence(pos, me, 2, 0).is_some() {
            reward += w.two;
        }

        if board.opponent_can_create_sequence(opponent, 3, w.threat_gap) {
            reward += w.allow_three;
        } else if board.opponent_can_create_sequence(opponent, 2, 0) {
            reward += w.allow_two;
        }

        if board.creates_fork(pos, me) {
            reward += w.fork;
        }

        match action.abs_diff(CENTER_COLUMN) {
            0 => reward += w.center,
            1 => reward += w.near_center,
            _ => {}
        }

        let shaped = reward * w.row_multiplier(row);
        log::trace!("shaped reward {shaped:.3} for column {action} row {row}");
        shaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, DRAW_SEQUENCE};

    fn shaper() -> RewardShaper {
        RewardShaper::default()
    }

    /// Drop `moves` and score the last one for its mover.
    fn score_last(moves: &[(usize, Symbol)]) -> (f32, Board) {
        let mut board = Board::new();
        let mut last = (0, 0, Symbol::A);
        for &(col, symbol) in moves {
            let row = board.place(col, symbol).unwrap();
            last = (col, row, symbol);
        }
        let (col, row, me) = last;
        let before = board;
        let reward = shaper().reward(col, row, me, me.other(), &mut board);
        assert_eq!(board, before, "shaping must not leave pieces behind");
        (reward, board)
    }

    #[test]
    fn test_default_weights_are_valid() {
        RewardWeights::default().validate().expect("defaults should validate");
    }

    #[test]
    fn test_non_vertical_win_outweighs_vertical_win() {
        use Symbol::{A, B};
        let (horizontal, _) = score_last(&[(0, A), (0, B), (1, A), (1, B), (2, A), (2, B), (3, A)]);
        let (vertical, _) = score_last(&[(3, A), (0, B), (3, A), (0, B), (3, A), (1, B), (3, A)]);
        assert_eq!(horizontal, WIN_OTHER_BONUS);
        assert_eq!(vertical, WIN_VERTICAL_BONUS);
        assert!(horizontal > vertical);
    }

    #[test]
    fn test_block_is_rewarded() {
        use Symbol::{A, B};
        // B threatens col 3 on row 0; A takes it.
        let (blocked, _) = score_last(&[(0, B), (6, A), (1, B), (6, A), (2, B), (3, A)]);
        assert!(blocked >= BLOCK_BONUS, "got {blocked}");
    }

    #[test]
    fn test_center_preferred_over_edge_on_empty_board() {
        let (center, _) = score_last(&[(3, Symbol::A)]);
        let (near, _) = score_last(&[(2, Symbol::A)]);
        let (edge, _) = score_last(&[(0, Symbol::A)]);
        assert!(center > near && near > edge);
        assert!((center - CENTER_BONUS * RewardWeights::default().row_multiplier(0)).abs() < 1e-6);
        assert_eq!(edge, 0.0);
    }

    #[test]
    fn test_leaving_a_threat_is_penalised() {
        use Symbol::{A, B};
        // B has two on row 0; A plays far away.
        let (reward, _) = score_last(&[(1, B), (2, B), (6, A)]);
        assert!(reward < 0.0, "got {reward}");
    }

    #[test]
    fn test_fork_is_rewarded() {
        use Symbol::{A, B};
        // (3, 0) closes a row of three and sits under a column of three.
        let mut board = Board::new();
        for &col in &[1, 2, 3, 3, 3] {
            board.place(col, A).unwrap();
        }
        assert!(board.creates_fork(Position::new(3, 0), A));

        let w = RewardWeights::default();
        let reward = shaper().reward(3, 0, A, B, &mut board);
        let expected = (w.three_flat + w.fork + w.center) * w.row_multiplier(0);
        assert!((reward - expected).abs() < 1e-5, "got {reward}, expected {expected}");
    }

    #[test]
    fn test_board_is_untouched_across_a_full_game() {
        use Symbol::{A, B};
        let mut board = Board::new();
        let mut me = A;
        for &col in &DRAW_SEQUENCE {
            let row = board.place(col, me).unwrap();
            let before = board;
            let _ = shaper().reward(col, row, me, me.other(), &mut board);
            assert_eq!(board, before);
            me = if me == A { B } else { A };
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_win_is_the_largest_reward() {
        use Symbol::{A, B};
        let w = RewardWeights::default();
        let ceiling = w.max_shaped_reward();
        assert!(w.win_vertical > ceiling && w.win_other > ceiling);

        // Every non-winning move of a long game stays below the win bonus.
        let mut board = Board::new();
        let mut me = A;
        for &col in &DRAW_SEQUENCE {
            let row = board.place(col, me).unwrap();
            let reward = shaper().reward(col, row, me, me.other(), &mut board);
            assert!(reward < w.win_vertical.min(w.win_other));
            me = if me == A { B } else { A };
        }

        // Every column of an empty board, too.
        for col in 0..COLS {
            let mut board = Board::new();
            let row = board.place(col, A).unwrap();
            assert!(shaper().reward(col, row, A, B, &mut board) < w.win_vertical);
        }
    }

    #[test]
    fn test_validation_rejects_win_below_ceiling() {
        let weights = RewardWeights {
            win_vertical: 1.0,
            ..RewardWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_positive_penalty() {
        let weights = RewardWeights {
            allow_two: 0.5,
            ..RewardWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_row_multiplier_range() {
        let w = RewardWeights::default();
        assert!((w.row_multiplier(ROWS - 1) - 1.0).abs() < 1e-6);
        assert!(w.row_multiplier(0) > w.row_multiplier(3));
    }
}
