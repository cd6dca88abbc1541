//! Full games driven end-to-end: description text in, win/loss out.

use warren_core::{Actor, Point};
use warren_runtime::{GameManager, GameStatus, plan_move};

/// Two open 4x4 rooms joined by a bent hall; the key sits in the players'
/// room, the exit in the adversaries' room.
const TWO_ROOM: &str = r#"(
    rooms: [
        (origin: (0, 0), layout: [
            "....",
            "....",
            "....",
            "....",
        ]),
        (origin: (5, 7), layout: [
            "....",
            "....",
            "....",
            "....",
        ]),
    ],
    halls: [
        (from: (room: 0, door: (3, 2)), to: (room: 1, door: (6, 7)), waypoints: [(6, 2)]),
    ],
    items: [
        (kind: Key, position: (0, 3)),
        (kind: Exit, position: (8, 10)),
    ],
)"#;

/// Scripted sprint from the auto-placement spot at the origin to the key,
/// through the hall, and onto the exit.
const WINNING_RUN: [Point; 10] = [
    Point::new(0, 2),
    Point::new(0, 3),
    Point::new(2, 3),
    Point::new(3, 2),
    Point::new(5, 2),
    Point::new(6, 3),
    Point::new(6, 5),
    Point::new(6, 7),
    Point::new(6, 9),
    Point::new(8, 9),
];

#[test]
fn a_scripted_player_wins_two_levels_back_to_back() {
    let mut game = GameManager::from_descriptions(
        &[TWO_ROOM, TWO_ROOM],
        vec![Actor::player("ada")],
        Vec::new(),
    )
    .expect("descriptions parse");

    for level in 0..2 {
        assert_eq!(game.level_index(), level);
        for step in WINNING_RUN {
            assert!(game.check_valid_move("ada", step), "step to {step}");
            game.player_move("ada", step).expect("scripted step");
        }
        game.player_move("ada", Point::new(8, 10)).expect("exit");
    }

    assert_eq!(game.status(), GameStatus::Won);
    let Actor::Player { progress, .. } = &game.players()[0] else {
        panic!("roster holds a player");
    };
    assert_eq!(progress.keys_found, 2);
    assert_eq!(progress.exits_reached, 2);
    assert_eq!(progress.times_ejected, 0);
}

#[test]
fn a_hunting_ghost_ends_an_idle_game() {
    let mut game = GameManager::from_descriptions(
        &[TWO_ROOM],
        vec![Actor::player("ada")],
        vec![Actor::ghost("casper")],
    )
    .expect("description parses");

    // The ghost starts in the far room and has to cross the hall.
    assert_eq!(
        game.current_level().find_actor("casper"),
        Some(Point::new(5, 7))
    );

    let mut turns = 0;
    while game.status() == GameStatus::Playing {
        turns += 1;
        assert!(turns < 40, "the chase must terminate");

        let ghost = game.adversaries()[0].clone();
        let step =
            plan_move(game.current_level(), &ghost).expect("a hunting ghost always has a move");
        game.adversary_move("casper", step).expect("planned move");
    }

    assert_eq!(game.status(), GameStatus::Lost);
    let Actor::Player { progress, .. } = &game.players()[0] else {
        panic!("roster holds a player");
    };
    assert_eq!(progress.times_ejected, 1);
    assert_eq!(progress.exits_reached, 0);
}

#[test]
fn broken_descriptions_are_reported() {
    let result = GameManager::from_descriptions(
        &["(rooms: [)"],
        vec![Actor::player("ada")],
        Vec::new(),
    );
    assert!(result.is_err());
}
