use crate::board::TicTacToe;

/// Represents a single position in the game tree.
///
/// Each node owns an independent copy of the board it represents and
/// records the move that produced it from its parent. The parent link
/// itself lives in the surrounding tree arena, so no ownership cycle
/// exists between a node and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameNode {
    /// The game state that this node represents.
    pub board: TicTacToe,
    /// The move that led to this node's state from its parent, as a
    /// `(row, column)` pair. `None` for the root node.
    pub last_move: Option<(usize, usize)>,
    /// The ply distance of the node from the root.
    pub height: u32,
}

impl GameNode {
    /// Creates a node for a position reached by playing `last_move`.
    pub fn new(board: TicTacToe, last_move: (usize, usize), height: u32) -> Self {
        Self {
            board,
            last_move: Some(last_move),
            height,
        }
    }

    /// Creates the root node of a search tree from the current board.
    pub fn root(board: TicTacToe) -> Self {
        Self {
            board,
            last_move: None,
            height: 0,
        }
    }
}

impl Default for GameNode {
    fn default() -> Self {
        GameNode::root(TicTacToe::default())
    }
}
