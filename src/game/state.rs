use super::{Axis, Board, MoveError, Observation, Position, Symbol, COLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Symbol),
    Draw,
}

/// Lifecycle of one game between resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    InProgress,
    Terminal(GameOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] MoveError),

    #[error("game is over; reset before stepping again")]
    GameOver,
}

/// A move that has been applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub symbol: Symbol,
    /// Axis of the four-in-a-row this move completed, if it won.
    pub win_axis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Symbol,
    starting_player: Symbol,
    outcome: Option<GameOutcome>,
    last_move: Option<Move>,
    move_count: usize,
}

impl GameState {
    /// Create an empty game where `starting_player` moves first
    pub fn new(starting_player: Symbol) -> Self {
        GameState {
            board: Board::new(),
            current_player: starting_player,
            starting_player,
            outcome: None,
            last_move: None,
            move_count: 0,
        }
    }

    /// Clear the board and hand the move back to the starting player
    pub fn reset(&mut self) {
        self.board.reset();
        self.current_player = self.starting_player;
        self.outcome = None;
        self.last_move = None;
        self.move_count = 0;
    }

    /// Change who moves first; applies from the next `reset`.
    pub fn set_starting_player(&mut self, symbol: Symbol) {
        self.starting_player = symbol;
    }

    pub fn current_player(&self) -> Symbol {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Winning symbol; `None` while playing and on a draw
    pub fn winner(&self) -> Option<Symbol> {
        match self.outcome {
            Some(GameOutcome::Winner(symbol)) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Axis of the winning line, if the game was won
    pub fn win_axis(&self) -> Option<Axis> {
        self.last_move.and_then(|m| m.win_axis)
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn phase(&self) -> Phase {
        match self.outcome {
            Some(outcome) => Phase::Terminal(outcome),
            None if self.move_count == 0 => Phase::Ready,
            None => Phase::InProgress,
        }
    }

    /// Columns that still have an open row
    pub fn valid_actions(&self) -> Vec<usize> {
        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Board as seen by `perspective`
    pub fn observation(&self, perspective: Symbol) -> Observation {
        self.board.observation(perspective)
    }

    /// Drop the current player's piece in `column`, settle win/draw, and pass
    /// the turn unless the game ended.
    pub fn apply_move(&mut self, column: usize) -> Result<Move, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }

        let symbol = self.current_player;
        let row = self.board.place(column, symbol)?;
        let win_axis = self.board.check_win(Position::new(column, row), symbol);
        let applied = Move {
            column,
            row,
            symbol,
            win_axis,
        };

        if win_axis.is_some() {
            self.outcome = Some(GameOutcome::Winner(symbol));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.current_player = symbol.other();
        }

        self.last_move = Some(applied);
        self.move_count += 1;
        Ok(applied)
    }

    /// Board rendered with the given glyphs for A and B
    pub fn render(&self, glyphs: [char; 2]) -> String {
        self.board.render(glyphs)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Symbol::A)
    }
}
