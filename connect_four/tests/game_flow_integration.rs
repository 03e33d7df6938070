/// Integration tests for complete games on the board engine
///
/// These tests play whole games through the public API and check win
/// detection, turn rotation and the terminal phase.
use connect_four::{Board, BoardError, Cell, Phase, Player, Position};

fn play(board: &mut Board, columns: &[usize]) -> Vec<Position> {
    columns
        .iter()
        .map(|&column| board.insert_move(column).unwrap())
        .collect()
}

#[test]
fn test_player_one_stack_wins_on_fourth_placement() {
    // Player One fills column 0 rows 5..2, Player Two answers in column 6.
    let mut board = Board::standard();
    play(&mut board, &[0, 6, 0, 6, 0, 6]);
    assert_eq!(board.winner(), None);
    assert_eq!(board.get(3, 0), Some(Cell::One));

    let position = board.insert_move(0).unwrap();
    assert_eq!(position, Position::new(2, 0));
    assert_eq!(board.winner(), Some(Player::One));
}

#[test]
fn test_constructed_board_scenario() {
    // Three Player One marks at column 0 rows 5, 4, 3 and Player One to move.
    let mut cells = vec![Cell::Empty; 42];
    for row in [5, 4, 3] {
        cells[row * 7] = Cell::One;
    }
    let mut board = Board::from_cells(7, 6, cells, Player::One, None).unwrap();
    assert_eq!(board.winner(), None);

    board.insert_move(0).unwrap();
    assert_eq!(board.winner(), Some(Player::One));
}

#[test]
fn test_player_two_wins_on_diagonal() {
    let mut board = Board::standard();
    // Builds a / diagonal for Player Two from (5,1) to (2,4).
    play(
        &mut board,
        &[0, 1, 2, 2, 3, 3, 4, 3, 4, 4, 0],
    );
    assert_eq!(board.winner(), None);
    assert_eq!(board.active_player(), Player::Two);
    board.insert_move(4).unwrap();
    assert_eq!(board.get(2, 4), Some(Cell::Two));
    assert_eq!(board.winner(), Some(Player::Two));
    assert_eq!(board.phase(), Phase::Decided(Player::Two));
}

#[test]
fn test_decided_game_rejects_every_column() {
    let mut board = Board::standard();
    play(&mut board, &[0, 1, 0, 1, 0, 1, 0]);
    let decided = board.clone();
    for column in 0..7 {
        assert_eq!(
            board.insert_move(column),
            Err(BoardError::GameAlreadyDecided(Player::One))
        );
    }
    assert_eq!(board, decided);
}

#[test]
fn test_turns_alternate_through_rejections() {
    let mut board = Board::new(4, 1).unwrap();
    board.insert_move(0).unwrap();
    assert_eq!(board.active_player(), Player::Two);
    assert_eq!(board.insert_move(0), Err(BoardError::ColumnFull(0)));
    assert_eq!(
        board.insert_move(9),
        Err(BoardError::InvalidColumn { column: 9, width: 4 })
    );
    // A rejected move does not pass the turn.
    assert_eq!(board.active_player(), Player::Two);
    board.insert_move(1).unwrap();
    assert_eq!(board.get(0, 1), Some(Cell::Two));
}

#[test]
fn test_snapshot_board_continues_play() {
    let json = r#"{
        "id": "7",
        "player": 1,
        "next": 1,
        "winner": null,
        "width": 4,
        "height": 4,
        "cells": [0,0,0,0, 0,0,0,0, 0,0,0,0, 1,1,1,2]
    }"#;
    let snapshot: connect_four::Snapshot = serde_json::from_str(json).unwrap();
    let mut board = snapshot.board().unwrap();
    assert_eq!(board.active_player(), Player::One);
    board.insert_move(0).unwrap();
    assert_eq!(board.winner(), None);
    board.insert_move(3).unwrap();
    assert_eq!(board.get(2, 3), Some(Cell::Two));
}
