//! A small and simple library for minimax game-tree search.
//!
//! This library implements the minimax algorithm, with and without alpha-beta
//! pruning, over a Tic-Tac-Toe game tree. The tree is expanded level by level
//! from the current position, leaves are scored by a fixed positional
//! heuristic, and the search resolves the tree to pick the best move for the
//! configured side.
//!
//! # Example
//!
//! ```rust
//! use minimax_lib::board::{Player, TicTacToe};
//! use minimax_lib::solver::{Algorithm, DEFAULT_SEARCH_DEPTH, Solver};
//!
//! // Create a new Tic-Tac-Toe board and let the opponent open
//! let mut board = TicTacToe::new();
//! board.play((0, 0), Player::Nought);
//!
//! // Create and configure a new solver using the builder
//! let mut solver = Solver::builder(board)
//!     .with_algorithm(Algorithm::AlphaBeta)
//!     .with_search_depth(DEFAULT_SEARCH_DEPTH)
//!     .with_ai_player(Player::Cross)
//!     .build();
//!
//! // Get the best reply
//! let best_move = solver.best_move();
//!
//! println!("The best move is: {:?}", best_move);
//! ```

/// Contains the board state and the player enum that define the game.
pub mod board;
/// Contains the `GameNode` struct, which represents a node in the search tree.
pub mod node;
/// The core module of the library, containing the `Solver` implementation.
pub mod solver;
