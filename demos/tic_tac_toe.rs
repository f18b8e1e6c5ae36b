extern crate minimax_lib;

use minimax_lib::board::{Player, TicTacToe};
use minimax_lib::solver::{Algorithm, DEFAULT_SEARCH_DEPTH, choose_ai_move};

fn main() {
    // Create a new Tic-Tac-Toe board
    let mut board = TicTacToe::new();
    let mut player = Player::Cross;

    println!("{board}");

    // Let the solver play both sides until the game is over
    while !board.is_finished() {
        let best_move = choose_ai_move(&board, player, Algorithm::AlphaBeta, DEFAULT_SEARCH_DEPTH)
            .expect("an unfinished board always has a move");
        board.play(best_move, player);
        println!("{} plays {:?}", player.symbol(), best_move);
        println!("{board}");
        player = player.opponent();
    }

    match board.winner() {
        Some(winner) => println!("{} wins!", winner.symbol()),
        None => println!("The game is a draw."),
    }
}
