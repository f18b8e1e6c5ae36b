use crate::board::{Player, TicTacToe, cell_value};
use crate::node::GameNode;
use id_tree::InsertBehavior::{AsRoot, UnderNode};
use id_tree::{Node, NodeId, Tree, TreeBuilder};

/// The default lookahead: two plies of search below each candidate move.
pub const DEFAULT_SEARCH_DEPTH: u32 = 2;

/// The game-tree search algorithms the solver can run.
///
/// Both variants compute the same value at the root; alpha-beta pruning only
/// skips subtrees that cannot change the result.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Algorithm {
    /// Plain minimax, visiting every pre-expanded child.
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
}

/// Scores a board with the fixed positional weighting scheme.
///
/// The score is `10 * winner + 5 * center + 3 * (sum of the four corners)`
/// over the signed cell encoding, so positions favourable to `Cross` score
/// positive and positions favourable to `Nought` score negative. The same
/// function scores terminal positions and cutoff positions when the search
/// runs out of depth; it is a pure function of the board contents.
pub fn evaluate(board: &TicTacToe) -> i32 {
    let mut score = 10 * board.winner().map_or(0, Player::value);
    score += 5 * cell_value(board.cell(1, 1));
    score += 3 * cell_value(board.cell(0, 0));
    score += 3 * cell_value(board.cell(0, 2));
    score += 3 * cell_value(board.cell(2, 0));
    score += 3 * cell_value(board.cell(2, 2));
    score
}

/// The main struct for running a minimax game-tree search.
///
/// It holds the position to search from, the search tree, and the
/// configuration for the search. The tree is rebuilt from the position on
/// every call to [`Solver::best_move`] and discarded with the solver; no
/// subtree survives across turns.
pub struct Solver {
    board: TicTacToe,
    tree: Tree<GameNode>,
    root_id: NodeId,
    algorithm: Algorithm,
    search_depth: u32,
    ai_player: Player,
}

impl Default for Solver {
    fn default() -> Self {
        SolverBuilder::new(TicTacToe::default()).build()
    }
}

/// A builder for creating instances of `Solver`.
///
/// This provides a convenient way to configure the search with different
/// parameters.
pub struct SolverBuilder {
    board: TicTacToe,
    algorithm: Algorithm,
    search_depth: u32,
    ai_player: Player,
}

impl SolverBuilder {
    /// Creates a new builder with the given position to search from.
    pub fn new(board: TicTacToe) -> Self {
        Self {
            board,
            algorithm: Algorithm::AlphaBeta,
            search_depth: DEFAULT_SEARCH_DEPTH,
            ai_player: Player::Cross,
        }
    }

    /// Sets the search algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the search depth below each candidate move.
    pub fn with_search_depth(mut self, search_depth: u32) -> Self {
        self.search_depth = search_depth;
        self
    }

    /// Sets the side the solver picks moves for.
    pub fn with_ai_player(mut self, ai_player: Player) -> Self {
        self.ai_player = ai_player;
        self
    }

    /// Builds the `Solver` instance with the configured parameters.
    pub fn build(self) -> Solver {
        Solver::new(self.board, self.algorithm, self.search_depth, self.ai_player)
    }
}

impl Solver {
    /// Returns a new builder for `Solver`.
    pub fn builder(board: TicTacToe) -> SolverBuilder {
        SolverBuilder::new(board)
    }

    /// Creates a new `Solver` instance.
    ///
    /// It is recommended to use the builder pattern via `Solver::builder()`
    /// instead.
    pub fn new(
        board: TicTacToe,
        algorithm: Algorithm,
        search_depth: u32,
        ai_player: Player,
    ) -> Self {
        let mut tree: Tree<GameNode> = TreeBuilder::new().build();
        let root_id = tree
            .insert(Node::new(GameNode::root(board.clone())), AsRoot)
            .unwrap();

        Self {
            board,
            tree,
            root_id,
            algorithm,
            search_depth,
            ai_player,
        }
    }

    /// Creates a solver with the default configuration for the given position.
    pub fn from_board(board: TicTacToe) -> Self {
        SolverBuilder::new(board).build()
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<GameNode> {
        &self.tree
    }

    /// Returns a reference to the root node of the search tree.
    pub fn get_root(&self) -> &Node<GameNode> {
        self.tree.get(&self.root_id).unwrap()
    }

    /// Returns the id of the root node of the search tree.
    pub fn get_root_id(&self) -> &NodeId {
        &self.root_id
    }

    /// Expands a node by creating one child per empty cell of its board.
    ///
    /// Children are generated in row-major order (row 0 col 0 first); each
    /// child owns an independent board copy with the move applied for
    /// `next_player`. A finished board produces no children. Expanding a
    /// node twice is a programming error and panics.
    pub fn expand(&mut self, node_id: &NodeId, next_player: Player) {
        let node = self.tree.get(node_id).unwrap();
        if !node.children().is_empty() {
            panic!("BUG: expanding already expanded node");
        }

        let children_height = node.data().height + 1;
        let parent_board = node.data().board.clone();
        let moves = parent_board.available_moves();

        let mut new_nodes = Vec::with_capacity(moves.len());
        for possible_move in moves {
            let mut board_clone = parent_board.clone();
            board_clone.play(possible_move, next_player);
            new_nodes.push(GameNode::new(board_clone, possible_move, children_height));
        }

        for game_node in new_nodes {
            self.tree
                .insert(Node::new(game_node), UnderNode(node_id))
                .unwrap();
        }
    }

    /// Grows the tree to the depth the configured search needs.
    ///
    /// Builds `search_depth + 1` plies below the root, the AI side moving
    /// first and the mover alternating per ply, so that every line the
    /// search can reach before its depth runs out is materialized. Keeping
    /// expansion and search depth coupled here means the two can never
    /// drift apart.
    pub fn expand_to_depth(&mut self) {
        let mut frontier = vec![self.root_id.clone()];
        let mut mover = self.ai_player;

        for _ in 0..=self.search_depth {
            let mut next_frontier = Vec::new();
            for node_id in &frontier {
                self.expand(node_id, mover);
                let children = self.tree.get(node_id).unwrap().children();
                next_frontier.extend(children.iter().cloned());
            }
            frontier = next_frontier;
            mover = mover.opponent();
        }
    }

    /// Evaluates a pre-expanded node with plain minimax.
    ///
    /// Recursion stops and the node is scored by [`evaluate`] when the
    /// depth reaches zero or the node's game is finished; otherwise the
    /// maximum (or minimum) over the children is returned with the depth
    /// decreased and the `maximizing` flag flipped. Children must already
    /// exist down to the requested depth; the search never expands nodes
    /// itself.
    pub fn minimax(&self, node_id: &NodeId, depth: u32, maximizing: bool) -> i32 {
        let node = self.tree.get(node_id).unwrap();
        if depth == 0 || node.data().board.is_finished() {
            return evaluate(&node.data().board);
        }

        if maximizing {
            let mut value = i32::MIN;
            for child_id in node.children() {
                value = value.max(self.minimax(child_id, depth - 1, false));
            }
            value
        } else {
            let mut value = i32::MAX;
            for child_id in node.children() {
                value = value.min(self.minimax(child_id, depth - 1, true));
            }
            value
        }
    }

    /// Evaluates a pre-expanded node with alpha-beta minimax.
    ///
    /// Same terminal rule and result as [`Solver::minimax`]; `alpha` and
    /// `beta` bound the window of values still worth exploring, and
    /// iteration over the children stops as soon as `beta <= alpha` —
    /// the remaining children are never visited.
    pub fn alpha_beta(
        &self,
        node_id: &NodeId,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        let node = self.tree.get(node_id).unwrap();
        if depth == 0 || node.data().board.is_finished() {
            return evaluate(&node.data().board);
        }

        if maximizing {
            let mut value = i32::MIN;
            for child_id in node.children() {
                value = value.max(self.alpha_beta(child_id, depth - 1, alpha, beta, false));
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for child_id in node.children() {
                value = value.min(self.alpha_beta(child_id, depth - 1, alpha, beta, true));
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }

    /// Runs the configured algorithm on a pre-expanded node.
    ///
    /// Alpha-beta starts from the full `i32` window, the finite stand-in
    /// for unbounded alpha and beta.
    pub fn search(&self, node_id: &NodeId, depth: u32, maximizing: bool) -> i32 {
        match self.algorithm {
            Algorithm::Minimax => self.minimax(node_id, depth, maximizing),
            Algorithm::AlphaBeta => self.alpha_beta(node_id, depth, i32::MIN, i32::MAX, maximizing),
        }
    }

    /// Picks the best move for the configured AI side, or `None` when the
    /// game is already over.
    ///
    /// Rebuilds the tree from the position, expands it to the configured
    /// depth, scores each root child with the configured search (the
    /// opponent moves next below a root child) and keeps the child with the
    /// strictly best value. The strict comparison makes ties fall to the
    /// earliest child in row-major order, so repeated calls always return
    /// the same move.
    pub fn best_move(&mut self) -> Option<(usize, usize)> {
        self.rebuild_tree();
        self.expand_to_depth();

        // Cross maximizes the signed score, Nought minimizes it.
        let ai_maximizes = self.ai_player == Player::Cross;
        let mut best_value = if ai_maximizes { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        let children = self.get_root().children().clone();
        for child_id in &children {
            let value = self.search(child_id, self.search_depth, !ai_maximizes);
            let improved = match ai_maximizes {
                true => value > best_value,
                false => value < best_value,
            };
            if improved {
                best_value = value;
                best_move = self.tree.get(child_id).unwrap().data().last_move;
            }
        }

        best_move
    }

    /// Returns the moves leading from the root to the given node, in play
    /// order, by walking the parent links. Useful for debugging a search.
    pub fn line_of_play(&self, node_id: &NodeId) -> Vec<(usize, usize)> {
        let mut moves = Vec::new();
        let mut current = node_id.clone();

        loop {
            let node = self.tree.get(&current).unwrap();
            if let Some(position) = node.data().last_move {
                moves.push(position);
            }
            match node.parent() {
                Some(parent) => current = parent.clone(),
                None => break,
            }
        }

        moves.reverse();
        moves
    }

    fn rebuild_tree(&mut self) {
        let mut tree: Tree<GameNode> = TreeBuilder::new().build();
        let root_id = tree
            .insert(Node::new(GameNode::root(self.board.clone())), AsRoot)
            .unwrap();
        self.tree = tree;
        self.root_id = root_id;
    }
}

/// Picks the best move for `ai_player` on the given board.
///
/// Convenience wrapper that builds a [`Solver`] for one decision; the
/// opponent is the other side of the two-player game. Returns `None` when
/// the game is already over.
pub fn choose_ai_move(
    board: &TicTacToe,
    ai_player: Player,
    algorithm: Algorithm,
    search_depth: u32,
) -> Option<(usize, usize)> {
    let mut solver = Solver::builder(board.clone())
        .with_algorithm(algorithm)
        .with_search_depth(search_depth)
        .with_ai_player(ai_player)
        .build();
    solver.best_move()
}

#[cfg(test)]
mod tests {
    use crate::board::{Player, TicTacToe};
    use crate::solver::{Algorithm, DEFAULT_SEARCH_DEPTH, Solver, choose_ai_move, evaluate};

    fn board_from_moves(moves: &[((usize, usize), Player)]) -> TicTacToe {
        let mut board = TicTacToe::new();
        for &(position, player) in moves {
            assert_eq!(board.play(position, player), Some(player));
        }
        board
    }

    #[test]
    fn evaluate_empty_board_is_zero() {
        assert_eq!(evaluate(&TicTacToe::new()), 0);
    }

    #[test]
    fn evaluate_scores_the_center() {
        let board = board_from_moves(&[((1, 1), Player::Cross)]);
        assert_eq!(evaluate(&board), 5);

        let board = board_from_moves(&[((1, 1), Player::Nought)]);
        assert_eq!(evaluate(&board), -5);
    }

    #[test]
    fn evaluate_scores_corners_and_winner() {
        // X wins the top row and holds the two top corners: 10 + 3 + 3
        let board = board_from_moves(&[
            ((0, 0), Player::Cross),
            ((0, 1), Player::Cross),
            ((0, 2), Player::Cross),
        ]);
        assert_eq!(evaluate(&board), 16);

        // O wins the left column and holds the two left corners: -10 - 3 - 3
        let board = board_from_moves(&[
            ((0, 0), Player::Nought),
            ((1, 0), Player::Nought),
            ((2, 0), Player::Nought),
        ]);
        assert_eq!(evaluate(&board), -16);
    }

    #[test]
    fn evaluate_is_pure() {
        let board = board_from_moves(&[
            ((1, 1), Player::Cross),
            ((0, 0), Player::Nought),
            ((2, 2), Player::Cross),
        ]);
        assert_eq!(evaluate(&board), evaluate(&board));
    }

    #[test]
    fn expand_generates_one_child_per_empty_cell_in_row_major_order() {
        // arrange
        let board = board_from_moves(&[((0, 0), Player::Cross), ((1, 1), Player::Nought)]);
        let mut solver = Solver::from_board(board);

        // act
        let root_id = solver.get_root_id().clone();
        solver.expand(&root_id, Player::Cross);

        // assert
        let tree = solver.get_tree();
        let children = solver.get_root().children();
        assert_eq!(children.len(), 7);
        let moves: Vec<_> = children
            .iter()
            .map(|id| tree.get(id).unwrap().data().last_move.unwrap())
            .collect();
        assert_eq!(
            moves,
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn expanded_children_extend_the_parent_by_exactly_their_last_move() {
        // arrange
        let board = board_from_moves(&[((0, 0), Player::Cross), ((1, 1), Player::Nought)]);
        let mut solver = Solver::from_board(board.clone());

        // act
        let root_id = solver.get_root_id().clone();
        solver.expand(&root_id, Player::Cross);

        // assert
        let tree = solver.get_tree();
        for child_id in solver.get_root().children() {
            let child = tree.get(child_id).unwrap().data();
            let mut expected = board.clone();
            expected.play(child.last_move.unwrap(), Player::Cross);
            assert_eq!(child.board, expected);
            assert_eq!(child.height, 1);
        }
        // sibling boards never alias the parent's
        assert_eq!(solver.get_root().data().board, board);
    }

    #[test]
    #[should_panic(expected = "BUG: expanding already expanded node")]
    fn expanding_a_node_twice_panics() {
        let mut solver = Solver::from_board(TicTacToe::new());
        let root_id = solver.get_root_id().clone();
        solver.expand(&root_id, Player::Cross);
        solver.expand(&root_id, Player::Cross);
    }

    #[test]
    fn expand_produces_no_children_for_a_finished_game() {
        let board = board_from_moves(&[
            ((0, 0), Player::Cross),
            ((0, 1), Player::Cross),
            ((0, 2), Player::Cross),
        ]);
        let mut solver = Solver::from_board(board);
        let root_id = solver.get_root_id().clone();
        solver.expand(&root_id, Player::Nought);
        assert!(solver.get_root().children().is_empty());
    }

    #[test]
    fn minimax_and_alpha_beta_agree_at_the_root() {
        // arrange
        let board = board_from_moves(&[
            ((0, 0), Player::Nought),
            ((0, 1), Player::Nought),
            ((1, 1), Player::Cross),
        ]);
        let mut solver = Solver::builder(board)
            .with_search_depth(DEFAULT_SEARCH_DEPTH)
            .with_ai_player(Player::Cross)
            .build();
        solver.expand_to_depth();

        // assert
        for child_id in solver.get_root().children() {
            let plain = solver.minimax(child_id, DEFAULT_SEARCH_DEPTH, false);
            let pruned =
                solver.alpha_beta(child_id, DEFAULT_SEARCH_DEPTH, i32::MIN, i32::MAX, false);
            assert_eq!(plain, pruned);
        }
    }

    #[test]
    fn both_algorithms_pick_the_same_move() {
        let board = board_from_moves(&[
            ((1, 0), Player::Nought),
            ((1, 1), Player::Nought),
            ((0, 0), Player::Cross),
        ]);
        let plain = choose_ai_move(&board, Player::Cross, Algorithm::Minimax, 2);
        let pruned = choose_ai_move(&board, Player::Cross, Algorithm::AlphaBeta, 2);
        assert_eq!(plain, pruned);
    }

    #[test]
    fn best_move_takes_an_immediate_win() {
        // X X _        X to move wins at (0, 2)
        // O O _
        // _ _ _
        let board = board_from_moves(&[
            ((0, 0), Player::Cross),
            ((0, 1), Player::Cross),
            ((1, 0), Player::Nought),
            ((1, 1), Player::Nought),
        ]);
        let best = choose_ai_move(&board, Player::Cross, Algorithm::AlphaBeta, 2);
        assert_eq!(best, Some((0, 2)));
    }

    #[test]
    fn best_move_blocks_an_immediate_threat() {
        // X _ _        O threatens (1, 2); X must block it
        // O O _
        // _ _ _
        let board = board_from_moves(&[
            ((1, 0), Player::Nought),
            ((1, 1), Player::Nought),
            ((0, 0), Player::Cross),
        ]);
        let best = choose_ai_move(&board, Player::Cross, Algorithm::AlphaBeta, 2);
        assert_eq!(best, Some((1, 2)));
    }

    #[test]
    fn best_move_works_for_the_minimizing_side() {
        // O O _        O to move wins at (0, 2)
        // _ X _
        // _ _ X
        let board = board_from_moves(&[
            ((0, 0), Player::Nought),
            ((0, 1), Player::Nought),
            ((1, 1), Player::Cross),
            ((2, 2), Player::Cross),
        ]);
        let best = choose_ai_move(&board, Player::Nought, Algorithm::AlphaBeta, 2);
        assert_eq!(best, Some((0, 2)));
    }

    #[test]
    fn best_move_is_deterministic() {
        let board = board_from_moves(&[((0, 1), Player::Nought)]);

        let first = choose_ai_move(&board, Player::Cross, Algorithm::AlphaBeta, 2);
        let second = choose_ai_move(&board, Player::Cross, Algorithm::AlphaBeta, 2);
        assert_eq!(first, second);

        let mut solver = Solver::from_board(board);
        assert_eq!(solver.best_move(), first);
        assert_eq!(solver.best_move(), first);
    }

    #[test]
    fn best_move_is_none_once_the_game_is_over() {
        let won = board_from_moves(&[
            ((0, 0), Player::Cross),
            ((1, 1), Player::Cross),
            ((2, 2), Player::Cross),
        ]);
        assert_eq!(choose_ai_move(&won, Player::Nought, Algorithm::Minimax, 2), None);

        let drawn = board_from_moves(&[
            ((0, 0), Player::Cross),
            ((0, 1), Player::Nought),
            ((0, 2), Player::Cross),
            ((1, 0), Player::Nought),
            ((1, 1), Player::Nought),
            ((1, 2), Player::Cross),
            ((2, 0), Player::Nought),
            ((2, 1), Player::Cross),
            ((2, 2), Player::Nought),
        ]);
        assert_eq!(choose_ai_move(&drawn, Player::Cross, Algorithm::AlphaBeta, 2), None);
    }

    #[test]
    fn line_of_play_walks_the_parent_links() {
        // arrange
        let mut solver = Solver::from_board(TicTacToe::new());
        solver.expand_to_depth();

        // act: follow the first child twice
        let tree = solver.get_tree();
        let first = solver.get_root().children()[0].clone();
        let second = tree.get(&first).unwrap().children()[0].clone();

        // assert
        assert_eq!(solver.line_of_play(&second), vec![(0, 0), (0, 1)]);
        assert_eq!(tree.get(&second).unwrap().data().height, 2);
    }
}
