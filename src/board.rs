use std::fmt;

/// Represents the two players of the game.
///
/// `Nought` renders as `'O'` and encodes as `-1`; `Cross` renders as `'X'`
/// and encodes as `+1`. An empty cell is `None` and encodes as `0`, so a
/// cell value is always one of `{-1, 0, +1}`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Player {
    /// The `'O'` player, encoded as `-1`.
    Nought,
    /// The `'X'` player, encoded as `+1`.
    Cross,
}

impl Player {
    /// Returns the signed encoding of this player, `-1` or `+1`.
    pub const fn value(self) -> i32 {
        match self {
            Player::Nought => -1,
            Player::Cross => 1,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Nought => Player::Cross,
            Player::Cross => Player::Nought,
        }
    }

    /// Returns the console glyph for this player.
    pub const fn symbol(self) -> char {
        match self {
            Player::Nought => 'O',
            Player::Cross => 'X',
        }
    }
}

/// Returns the signed encoding of a cell: `0` for empty, otherwise the
/// occupying player's value.
pub const fn cell_value(cell: Option<Player>) -> i32 {
    match cell {
        None => 0,
        Some(player) => player.value(),
    }
}

/// Returns the console glyph for a cell: a blank for empty, otherwise the
/// occupying player's symbol.
pub const fn cell_symbol(cell: Option<Player>) -> char {
    match cell {
        None => ' ',
        Some(player) => player.symbol(),
    }
}

/// A Tic-Tac-Toe game state.
///
/// The board is a fixed 3x3 grid of cells, each empty or occupied by one of
/// the two players. A move is a `(row, column)` pair with both coordinates
/// in `0..3`. Cloning a board produces an independent deep copy; mutating
/// the clone never affects the original.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TicTacToe {
    grid: [[Option<Player>; 3]; 3],
}

impl TicTacToe {
    /// Creates a new board with all nine cells empty.
    pub const fn new() -> Self {
        Self {
            grid: [[None; 3]; 3],
        }
    }

    /// Returns the cell at the given coordinates.
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.grid[row][col]
    }

    /// Plays a move for the given player.
    ///
    /// If the target cell is empty it is set to `player` and `Some(player)`
    /// is returned. If the cell is already occupied the board is left
    /// untouched and `None` is returned; callers must check the return
    /// value, no panic is raised for an illegal play.
    pub fn play(&mut self, position: (usize, usize), player: Player) -> Option<Player> {
        let (row, col) = position;
        match self.grid[row][col] {
            None => {
                self.grid[row][col] = Some(player);
                Some(player)
            }
            Some(_) => None,
        }
    }

    /// Returns the player occupying the first complete line, or `None` if
    /// no line is complete.
    ///
    /// Lines are scanned in a fixed order: rows top to bottom, then columns
    /// left to right, then the main diagonal, then the anti-diagonal. The
    /// first match wins, even on a hand-built board that completes more
    /// than one line.
    pub fn winner(&self) -> Option<Player> {
        for row in 0..3 {
            if let Some(player) = self.grid[row][0] {
                if self.grid[row][1] == Some(player) && self.grid[row][2] == Some(player) {
                    return Some(player);
                }
            }
        }

        for col in 0..3 {
            if let Some(player) = self.grid[0][col] {
                if self.grid[1][col] == Some(player) && self.grid[2][col] == Some(player) {
                    return Some(player);
                }
            }
        }

        if let Some(player) = self.grid[0][0] {
            if self.grid[1][1] == Some(player) && self.grid[2][2] == Some(player) {
                return Some(player);
            }
        }

        if let Some(player) = self.grid[0][2] {
            if self.grid[1][1] == Some(player) && self.grid[2][0] == Some(player) {
                return Some(player);
            }
        }

        None
    }

    /// Returns `true` iff every cell is occupied, independent of whether a
    /// line is complete. Check `winner()` first to tell a full winning
    /// board from a true draw.
    pub fn is_draw(&self) -> bool {
        self.grid.iter().flatten().all(|cell| cell.is_some())
    }

    /// Returns `true` once the game is over, by win or by draw.
    pub fn is_finished(&self) -> bool {
        self.winner().is_some() || self.is_draw()
    }

    /// Returns the empty cells in row-major order, or an empty list once
    /// the game is over.
    ///
    /// The order matters: the solver's tie-break keeps the first best child
    /// it encounters, so children must be generated row 0 col 0 first.
    pub fn available_moves(&self) -> Vec<(usize, usize)> {
        if self.is_finished() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                if self.grid[row][col].is_none() {
                    moves.push((row, col));
                }
            }
        }
        moves
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        TicTacToe::new()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            writeln!(
                f,
                " {} | {} | {}",
                cell_symbol(self.grid[row][0]),
                cell_symbol(self.grid[row][1]),
                cell_symbol(self.grid[row][2]),
            )?;
            if row != 2 {
                writeln!(f, "-----------")?;
            }
        }
        Ok(())
    }
}
