//! End-to-end scenarios on small hand-built levels: movement across
//! component boundaries, key/exit progression, elimination, and the
//! player-centred visibility window.

use warren_core::{
    Actor, Bounds, EntityType, InteractionResult, Item, Level, LevelStatus, Point, Room,
};

/// Two open 4x4 rooms joined by a bent hall: doors (3,2) and (6,7),
/// waypoint (6,2).
fn canonical_level() -> Level {
    let mut builder = Level::builder();
    let first = builder.add_room(Room::open(Point::ORIGIN, 4, 4).expect("valid extent"));
    let second = builder.add_room(Room::open(Point::new(5, 7), 4, 4).expect("valid extent"));
    builder
        .connect(
            Point::new(3, 2),
            first,
            Point::new(6, 7),
            second,
            vec![Point::new(6, 2)],
        )
        .expect("doors are aligned through the waypoint");
    builder.add_item(Item::key(Point::new(1, 1)));
    builder.add_item(Item::exit(Point::new(7, 8)));
    builder.build().expect("items land on spaces")
}

/// One large open room covering both the key at (4,17) and the exit at
/// (7,11).
fn key_and_exit_level() -> Level {
    let mut builder = Level::builder();
    builder.add_room(Room::open(Point::new(2, 9), 8, 10).expect("valid extent"));
    builder.add_item(Item::key(Point::new(4, 17)));
    builder.add_item(Item::exit(Point::new(7, 11)));
    builder.build().expect("items land on spaces")
}

#[test]
fn hall_moves_validate_against_distance_and_path() {
    let mut level = canonical_level();
    let ada = Actor::player("ada");
    level
        .place_actor(ada.clone(), Point::new(4, 2))
        .expect("hall cell is free");

    // Three orthogonal steps away: over the distance cap.
    assert!(!level.check_valid_move(&ada, Point::new(6, 3)));
    // Two steps back through the door into the room.
    assert!(level.check_valid_move(&ada, Point::new(2, 2)));
}

#[test]
fn moves_cross_component_boundaries() {
    let mut level = canonical_level();
    let ada = Actor::player("ada");
    level
        .place_actor(ada.clone(), Point::new(2, 2))
        .expect("room cell is free");

    assert!(level.check_valid_move(&ada, Point::new(4, 2)));
    let outcome = level
        .player_action(&ada, Point::new(4, 2))
        .expect("validated move applies");
    assert_eq!(outcome, InteractionResult::None);
    assert_eq!(level.find_actor("ada"), Some(Point::new(4, 2)));
    assert_eq!(level.entity_type_at(Point::new(2, 2)), EntityType::Space);
    assert_eq!(level.entity_type_at(Point::new(4, 2)), EntityType::Player);
}

#[test]
fn key_pickup_unlocks_the_exit() {
    let mut level = key_and_exit_level();
    let ada = Actor::player("ada");
    level
        .place_actor(ada.clone(), Point::new(4, 16))
        .expect("room cell is free");

    assert!(level.check_valid_move(&ada, Point::new(4, 17)));
    let outcome = level
        .player_action(&ada, Point::new(4, 17))
        .expect("validated move applies");

    assert_eq!(outcome, InteractionResult::FoundKey);
    assert!(level.exit_unlocked());
    assert!(
        level.items().iter().all(|item| item.position() != Point::new(4, 17)),
        "the key leaves the item registry"
    );
    assert_eq!(level.entity_type_at(Point::new(4, 17)), EntityType::Player);
}

#[test]
fn locked_exit_downgrades_to_a_plain_step() {
    let mut level = key_and_exit_level();
    let ada = Actor::player("ada");
    level
        .place_actor(ada.clone(), Point::new(7, 12))
        .expect("room cell is free");

    let outcome = level
        .player_action(&ada, Point::new(7, 11))
        .expect("stepping onto the locked exit is still legal");
    assert_eq!(outcome, InteractionResult::None);
    assert!(!level.level_exited());
    assert_eq!(level.status(), LevelStatus::Active);
}

#[test]
fn exiting_after_the_key_wins_the_level() {
    let mut level = key_and_exit_level();
    let ada = Actor::player("ada");
    level
        .place_actor(ada.clone(), Point::new(4, 16))
        .expect("room cell is free");

    level
        .player_action(&ada, Point::new(4, 17))
        .expect("key pickup");

    for step in [
        Point::new(6, 17),
        Point::new(6, 15),
        Point::new(6, 13),
        Point::new(6, 11),
    ] {
        assert!(level.check_valid_move(&ada, step), "step to {step}");
        level.player_action(&ada, step).expect("open floor");
    }

    let outcome = level
        .player_action(&ada, Point::new(7, 11))
        .expect("unlocked exit");
    assert_eq!(outcome, InteractionResult::Exit);
    assert!(level.level_exited());
    assert_eq!(level.find_actor("ada"), None);
    assert_eq!(level.live_players().count(), 0);
    assert_eq!(level.status(), LevelStatus::Won);
}

#[test]
fn elimination_of_the_last_player_loses_the_level() {
    let mut level = canonical_level();
    let ada = Actor::player("ada");
    let ghost = Actor::ghost("casper");
    level
        .place_actor(ada.clone(), Point::new(2, 2))
        .expect("room cell is free");
    level
        .place_actor(ghost.clone(), Point::new(2, 3))
        .expect("room cell is free");

    assert!(level.check_valid_move(&ghost, Point::new(2, 2)));
    let outcome = level
        .adversary_action(&ghost, Point::new(2, 2))
        .expect("validated move applies");

    assert_eq!(outcome, InteractionResult::RemovePlayer);
    assert_eq!(level.find_actor("ada"), None);
    assert_eq!(level.entity_type_at(Point::new(2, 2)), EntityType::Ghost);
    assert_eq!(level.status(), LevelStatus::Lost);
}

#[test]
fn ejected_players_do_not_win_the_level_alone() {
    let mut level = key_and_exit_level();
    let ada = Actor::player("ada");
    let brendan = Actor::player("brendan");
    let ghost = Actor::ghost("casper");
    level
        .place_actor(ada.clone(), Point::new(4, 16))
        .expect("room cell is free");
    level
        .place_actor(brendan.clone(), Point::new(3, 10))
        .expect("room cell is free");
    level
        .place_actor(ghost.clone(), Point::new(3, 11))
        .expect("room cell is free");

    level
        .adversary_action(&ghost, Point::new(3, 10))
        .expect("adjacent player");
    assert_eq!(level.status(), LevelStatus::Active);

    level
        .adversary_action(&ghost, Point::new(3, 11))
        .expect("step back");
    level
        .adversary_action(&ghost, Point::new(4, 11))
        .expect("open floor");

    // Ada walks into the ghost: self-removal, and with no exit reached the
    // emptied level reads Lost.
    for step in [Point::new(4, 14), Point::new(4, 12)] {
        level.player_action(&ada, step).expect("open floor");
    }
    let outcome = level
        .player_action(&ada, Point::new(4, 11))
        .expect("ghost is a legal destination");
    assert_eq!(outcome, InteractionResult::RemovePlayer);
    assert_eq!(level.status(), LevelStatus::Lost);
}

#[test]
fn player_window_is_five_by_five_with_empty_padding() {
    let mut level = canonical_level();
    let ada = Actor::player("ada");
    level
        .place_actor(ada.clone(), Point::new(4, 2))
        .expect("hall cell is free");

    let window = level.player_map("ada").expect("ada is live");
    assert_eq!(
        window.bounds(),
        Bounds::spanning(Point::new(2, 0), Point::new(6, 4))
    );

    use EntityType::{Empty, HallSpace, Player, Space};
    let expected = [
        [Space, Space, Empty, Empty, Empty],
        [Space, Space, Empty, Empty, Empty],
        [Space, Space, Player, HallSpace, HallSpace],
        [Space, Space, Empty, Empty, HallSpace],
        [Empty, Empty, Empty, Empty, HallSpace],
    ];
    for (row, expected_row) in window.rows().zip(expected) {
        assert_eq!(row, expected_row);
    }
}

#[test]
fn visibility_queries_crop_to_the_window() {
    let mut level = canonical_level();
    let ada = Actor::player("ada");
    let ghost = Actor::ghost("casper");
    level
        .place_actor(ada.clone(), Point::new(2, 2))
        .expect("room cell is free");
    level
        .place_actor(ghost.clone(), Point::new(2, 0))
        .expect("room cell is free");

    // Window around (2,2) spans (0,0)..(4,4).
    let doors = level.visible_doors("ada").expect("ada is live");
    assert_eq!(doors, vec![Point::new(3, 2)]);

    let items = level.visible_items("ada").expect("ada is live");
    assert_eq!(items, vec![Item::key(Point::new(1, 1))]);

    let actors = level.visible_actors("ada").expect("ada is live");
    let names: Vec<&str> = actors.iter().map(|(actor, _)| actor.name()).collect();
    assert_eq!(names, vec!["ada", "casper"]);

    // From the middle of the hall nothing of this is in view.
    let brendan = Actor::player("brendan");
    level
        .place_actor(brendan.clone(), Point::new(6, 4))
        .expect("hall cell is free");
    assert!(level.visible_doors("brendan").expect("live").is_empty());
    assert!(level.visible_items("brendan").expect("live").is_empty());
}
