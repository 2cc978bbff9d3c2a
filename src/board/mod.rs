pub mod error;
pub mod game_move;
pub mod lines;
pub mod othello;
pub mod side;

use std::fmt;
use std::str::FromStr;

use crate::alpha_beta_searcher::GameBoard;
use crate::chess::ChessBoard;

use error::MoveError;
use game_move::{Move, MoveList};
use lines::{FourInARow, TicTacToe};
use othello::{BigOthello, SmallOthello};
use side::Side;

/// The games the engine plays.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameKind {
    TicTacToe,
    FourInARow,
    Othello5,
    Othello8,
    Chess,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::TicTacToe,
        GameKind::FourInARow,
        GameKind::Othello5,
        GameKind::Othello8,
        GameKind::Chess,
    ];

    /// Row of this game in per-game tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::FourInARow => "four-in-a-row",
            GameKind::Othello5 => "othello5",
            GameKind::Othello8 => "othello8",
            GameKind::Chess => "chess",
        };
        write!(f, "{}", name)
    }
}

// used for parsing cli args
impl FromStr for GameKind {
    type Err = &'static str;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "tictactoe" => Ok(GameKind::TicTacToe),
            "four-in-a-row" => Ok(GameKind::FourInARow),
            "othello5" => Ok(GameKind::Othello5),
            "othello8" | "othello" => Ok(GameKind::Othello8),
            "chess" => Ok(GameKind::Chess),
            _ => Err("invalid game; options are: tictactoe, four-in-a-row, othello5, othello8, chess"),
        }
    }
}

/// A position in any of the supported games.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Position {
    TicTacToe(TicTacToe),
    FourInARow(FourInARow),
    Othello5(SmallOthello),
    Othello8(BigOthello),
    Chess(ChessBoard),
}

macro_rules! delegate_to_variants {
    ($self:ident, $board:ident => $body:expr) => {
        match $self {
            Position::TicTacToe($board) => $body,
            Position::FourInARow($board) => $body,
            Position::Othello5($board) => $body,
            Position::Othello8($board) => $body,
            Position::Chess($board) => $body,
        }
    };
}

macro_rules! map_variants {
    ($self:ident, $board:ident => $body:expr) => {
        match $self {
            Position::TicTacToe($board) => Position::TicTacToe($body),
            Position::FourInARow($board) => Position::FourInARow($body),
            Position::Othello5($board) => Position::Othello5($body),
            Position::Othello8($board) => Position::Othello8($body),
            Position::Chess($board) => Position::Chess($body),
        }
    };
}

impl Position {
    pub fn new_game(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => Position::TicTacToe(TicTacToe::new()),
            GameKind::FourInARow => Position::FourInARow(FourInARow::new()),
            GameKind::Othello5 => Position::Othello5(SmallOthello::starting_position()),
            GameKind::Othello8 => Position::Othello8(BigOthello::starting_position()),
            GameKind::Chess => Position::Chess(ChessBoard::starting_position()),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Position::TicTacToe(_) => GameKind::TicTacToe,
            Position::FourInARow(_) => GameKind::FourInARow,
            Position::Othello5(_) => GameKind::Othello5,
            Position::Othello8(_) => GameKind::Othello8,
            Position::Chess(_) => GameKind::Chess,
        }
    }

    fn cell_count(&self) -> usize {
        match self {
            Position::TicTacToe(_) => TicTacToe::CELLS,
            Position::FourInARow(_) => FourInARow::CELLS,
            Position::Othello5(_) => SmallOthello::CELLS,
            Position::Othello8(_) => BigOthello::CELLS,
            Position::Chess(_) => 64,
        }
    }

    /// Renders a move the way [`Position::parse_move`] reads it: `pass`, a cell
    /// number for placement games, or coordinates such as `e2e4` for chess.
    pub fn describe_move(&self, game_move: Move) -> String {
        if game_move.is_pass() {
            return "pass".to_string();
        }
        match self {
            Position::Chess(_) => ChessBoard::describe_move(game_move),
            _ => game_move.cell().to_string(),
        }
    }

    /// Reads a move typed by a player. Legality is checked for chess only, since
    /// coordinates alone cannot tell a castle from a plain king move; placement
    /// moves are checked when applied.
    pub fn parse_move(&self, input: &str, side: Side) -> Result<Move, MoveError> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("pass") {
            return Ok(Move::PASS);
        }
        if let Position::Chess(board) = self {
            return board.parse_move(trimmed, side);
        }
        match trimmed.parse::<usize>() {
            Ok(cell) if cell < self.cell_count() => Ok(Move::place(cell)),
            _ => Err(MoveError::Unparseable {
                input: input.to_string(),
            }),
        }
    }
}

impl GameBoard for Position {
    fn is_terminal(&self) -> bool {
        delegate_to_variants!(self, board => board.is_terminal())
    }

    fn evaluate(&self) -> i32 {
        delegate_to_variants!(self, board => board.evaluate())
    }

    fn legal_moves(&self, side: Side) -> MoveList {
        delegate_to_variants!(self, board => board.legal_moves(side))
    }

    fn make_move(&self, game_move: Move, side: Side) -> Self {
        map_variants!(self, board => board.make_move(game_move, side))
    }

    fn is_in_check(&self, side: Side) -> bool {
        delegate_to_variants!(self, board => board.is_in_check(side))
    }

    fn is_exhausted(&self) -> bool {
        delegate_to_variants!(self, board => board.is_exhausted())
    }

    fn final_score(&self) -> i32 {
        delegate_to_variants!(self, board => board.final_score())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        delegate_to_variants!(self, board => write!(f, "{}", board))
    }
}
