use crate::board::Board;
use crate::session_rng::SessionRng;
use crate::types::{Difficulty, Mark, MoveError};
use crate::win_detector::{check_win, has_won};

/// Exhaustive minimax over every empty cell. The full 3x3 tree stays under
/// 9! nodes, so no pruning or depth cutoff is needed. Ties keep the first
/// cell in ascending index order.
pub fn best_move(board: &Board, bot_mark: Mark, opponent_mark: Mark) -> Result<usize, MoveError> {
    if check_win(board).is_some() {
        return Err(MoveError::NoMovesAvailable);
    }

    let mut best_score = i32::MIN;
    let mut best_index = None;

    for index in board.available_moves() {
        let mut candidate = *board;
        candidate.set(index, bot_mark);

        let score = minimax(&candidate, bot_mark, opponent_mark, false);
        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }

    best_index.ok_or(MoveError::NoMovesAvailable)
}

fn minimax(board: &Board, bot_mark: Mark, opponent_mark: Mark, is_maximizing: bool) -> i32 {
    if has_won(board, bot_mark) {
        return 1;
    }
    if has_won(board, opponent_mark) {
        return -1;
    }
    if board.is_full() {
        return 0;
    }

    if is_maximizing {
        let mut best = i32::MIN;
        for index in board.available_moves() {
            let mut candidate = *board;
            candidate.set(index, bot_mark);
            best = best.max(minimax(&candidate, bot_mark, opponent_mark, false));
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in board.available_moves() {
            let mut candidate = *board;
            candidate.set(index, opponent_mark);
            best = best.min(minimax(&candidate, bot_mark, opponent_mark, true));
        }
        best
    }
}

pub fn random_move(board: &Board, rng: &mut SessionRng) -> Result<usize, MoveError> {
    let moves = board.available_moves();
    if moves.is_empty() {
        return Err(MoveError::NoMovesAvailable);
    }
    Ok(moves[rng.random_range(0..moves.len())])
}

pub fn select_move(
    board: &Board,
    difficulty: Difficulty,
    bot_mark: Mark,
    opponent_mark: Mark,
    rng: &mut SessionRng,
) -> Result<usize, MoveError> {
    // Drawn per move: a Hard opponent can follow a perfect move with a
    // random one inside the same game.
    if rng.random::<f64>() < difficulty.optimal_play_chance() {
        best_move(board, bot_mark, opponent_mark)
    } else {
        random_move(board, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::win_detector::is_draw;

    fn board_from(cells: [Mark; 9]) -> Board {
        Board::from_cells(cells)
    }

    #[test]
    fn test_best_move_completes_own_row() {
        use Mark::{Empty as E, O, X};
        let board = board_from([X, X, E, E, O, E, E, E, O]);
        assert_eq!(best_move(&board, X, O), Ok(2));
    }

    #[test]
    fn test_best_move_blocks_opponent_threat() {
        use Mark::{Empty as E, O, X};
        // O threatens 3-4-5; blocking at 5 is the only non-losing reply.
        let board = board_from([X, E, E, O, O, E, E, E, X]);
        assert_eq!(best_move(&board, X, O), Ok(5));
    }

    #[test]
    fn test_best_move_on_empty_board_keeps_first_tied_index() {
        let board = Board::new();
        assert_eq!(best_move(&board, Mark::X, Mark::O), Ok(0));
    }

    #[test]
    fn test_best_move_fails_on_full_board() {
        use Mark::{O, X};
        let board = board_from([X, X, O, O, O, X, X, O, X]);
        assert_eq!(best_move(&board, X, O), Err(MoveError::NoMovesAvailable));
    }

    #[test]
    fn test_best_move_fails_on_decided_board() {
        use Mark::{Empty as E, O, X};
        let board = board_from([X, X, X, O, O, E, E, E, E]);
        assert_eq!(best_move(&board, O, X), Err(MoveError::NoMovesAvailable));
    }

    #[test]
    fn test_optimal_self_play_always_draws() {
        let mut board = Board::new();
        let mut mark = Mark::X;
        while check_win(&board).is_none() && !board.is_full() {
            let opponent = mark.opponent().unwrap();
            let index = best_move(&board, mark, opponent).unwrap();
            board = board.with_move(index, mark).unwrap();
            mark = opponent;
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_random_move_only_picks_empty_cells() {
        let mut rng = SessionRng::new(7);
        let board = Board::new()
            .with_move(0, Mark::X)
            .unwrap()
            .with_move(4, Mark::O)
            .unwrap();
        for _ in 0..100 {
            let index = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty_cell(index));
        }
    }

    #[test]
    fn test_random_move_returns_the_single_empty_cell() {
        use Mark::{Empty as E, O, X};
        let board = board_from([X, X, O, O, O, X, X, O, E]);
        let mut rng = SessionRng::new(1);
        for _ in 0..20 {
            assert_eq!(random_move(&board, &mut rng), Ok(8));
        }
    }

    #[test]
    fn test_random_move_fails_on_full_board() {
        use Mark::{O, X};
        let board = board_from([X, X, O, O, O, X, X, O, X]);
        let mut rng = SessionRng::new(1);
        assert_eq!(
            random_move(&board, &mut rng),
            Err(MoveError::NoMovesAvailable)
        );
    }

    #[test]
    fn test_select_move_easy_never_consults_search() {
        use Mark::{Empty as E, O, X};
        // The minimax move here is 2; Easy must still pick uniformly, so
        // over many draws some other empty cell shows up.
        let board = board_from([X, X, E, E, O, E, E, E, O]);
        let mut rng = SessionRng::new(3);
        let mut saw_non_optimal = false;
        for _ in 0..100 {
            let index = select_move(&board, Difficulty::Easy, X, O, &mut rng).unwrap();
            assert!(board.is_empty_cell(index));
            if index != 2 {
                saw_non_optimal = true;
            }
        }
        assert!(saw_non_optimal);
    }

    #[test]
    fn test_select_move_optimal_always_takes_the_win() {
        use Mark::{Empty as E, O, X};
        let board = board_from([X, X, E, E, O, E, E, E, O]);
        let mut rng = SessionRng::new(3);
        for _ in 0..20 {
            assert_eq!(select_move(&board, Difficulty::Optimal, X, O, &mut rng), Ok(2));
        }
    }

    #[test]
    fn test_select_move_mixed_tiers_stay_legal() {
        let board = Board::new().with_move(4, Mark::X).unwrap();
        let mut rng = SessionRng::new(11);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            for _ in 0..50 {
                let index = select_move(&board, difficulty, Mark::O, Mark::X, &mut rng).unwrap();
                assert!(board.is_empty_cell(index));
            }
        }
    }
}
