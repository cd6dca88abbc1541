//! Per-actor-kind move rules.
//!
//! Movement legality is decided in two stages: a Manhattan-distance cap per
//! actor kind, then a path-legality search over the tags of the bounding
//! sub-grid between source and destination. Distance within the cap is
//! necessary but not sufficient; the search is the sufficient condition.
//!
//! Interactions are a pure function from (mover kind, destination tag) to
//! outcome; an illegal destination simply has no outcome.

use std::collections::VecDeque;

use strum::Display;

use crate::actor::Actor;
use crate::config::GameConfig;
use crate::entity::EntityType;
use crate::point::{Bounds, Point};

/// Outcome of applying a move onto a destination tile.
///
/// `Teleport` and `DamagePlayer` are defined for rule variants no current
/// actor kind produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionResult {
    None,
    FoundKey,
    Exit,
    RemovePlayer,
    Teleport,
    DamagePlayer,
}

/// Maximum Manhattan distance the actor may cover in one turn.
pub fn max_stride(actor: &Actor) -> u32 {
    if actor.is_player() {
        GameConfig::PLAYER_STRIDE
    } else {
        GameConfig::ADVERSARY_STRIDE
    }
}

/// The destination→outcome table. `None` means the destination is illegal
/// for this mover.
pub fn interaction_on(actor: &Actor, destination: EntityType) -> Option<InteractionResult> {
    if actor.is_player() {
        match destination {
            EntityType::Space | EntityType::HallSpace => Some(InteractionResult::None),
            EntityType::Key => Some(InteractionResult::FoundKey),
            EntityType::Exit => Some(InteractionResult::Exit),
            EntityType::Ghost | EntityType::Zombie => Some(InteractionResult::RemovePlayer),
            _ => None,
        }
    } else {
        match destination {
            EntityType::Space | EntityType::HallSpace => Some(InteractionResult::None),
            EntityType::Player => Some(InteractionResult::RemovePlayer),
            _ => None,
        }
    }
}

/// True when the actor may cross a cell with this tag on the way to its
/// destination. Players may pass through other players (the stride allows
/// it); nothing passes through walls or out-of-level cells.
fn passable_en_route(actor: &Actor, tag: EntityType) -> bool {
    interaction_on(actor, tag).is_some() || (actor.is_player() && tag == EntityType::Player)
}

/// Rectangular matrix of tags, addressed by absolute position.
///
/// Positions outside the matrix read [`EntityType::Empty`], which no actor
/// can cross, so the matrix doubles as the search fence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagGrid {
    bounds: Bounds,
    tags: Vec<EntityType>,
}

impl TagGrid {
    /// Samples `tag_at` over every position of `bounds` in row-major order.
    pub fn collect(bounds: Bounds, mut tag_at: impl FnMut(Point) -> EntityType) -> Self {
        let tags = bounds.points().map(&mut tag_at).collect();
        Self { bounds, tags }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn get(&self, p: Point) -> EntityType {
        if !self.bounds.contains(p) {
            return EntityType::Empty;
        }
        let dx = (p.x - self.bounds.min().x) as usize;
        let dy = (p.y - self.bounds.min().y) as usize;
        self.tags[dy * self.bounds.width() as usize + dx]
    }

    /// Rows from top (minimum y) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[EntityType]> {
        self.tags.chunks(self.bounds.width() as usize)
    }
}

/// Path-legality search over the bounding sub-grid of source and
/// destination.
///
/// Breadth-first over orthogonal steps fenced by the grid; intermediate
/// cells must be crossable for the mover, and the destination itself must
/// have an outcome in the interaction table. For a stride-1 mover the
/// search degenerates to the destination check.
pub fn path_exists(grid: &TagGrid, actor: &Actor, from: Point, to: Point) -> bool {
    if interaction_on(actor, grid.get(to)).is_none() {
        return false;
    }

    let mut frontier = VecDeque::from([from]);
    let mut visited = vec![from];
    while let Some(cursor) = frontier.pop_front() {
        if cursor == to {
            return true;
        }
        for next in cursor.neighbors() {
            if !grid.bounds().contains(next) || visited.contains(&next) {
                continue;
            }
            if next == to || passable_en_route(actor, grid.get(next)) {
                visited.push(next);
                frontier.push_back(next);
            }
        }
    }
    false
}

/// Full legality check: distance cap plus path legality.
pub fn check_move(grid: &TagGrid, actor: &Actor, from: Point, to: Point) -> bool {
    from.manhattan_distance(to) <= max_stride(actor) && path_exists(grid, actor, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(min: Point, width: u32, rows: &[&[EntityType]]) -> TagGrid {
        let bounds = Bounds::anchored(min, width, rows.len() as u32);
        let flat: Vec<EntityType> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        TagGrid::collect(bounds, |p| {
            let dx = (p.x - min.x) as usize;
            let dy = (p.y - min.y) as usize;
            flat[dy * width as usize + dx]
        })
    }

    use EntityType::{Empty, Exit, Ghost, HallSpace, Key, Player, Space, Wall, Zombie};

    #[test]
    fn player_interaction_table() {
        let player = Actor::player("ada");
        assert_eq!(
            interaction_on(&player, Space),
            Some(InteractionResult::None)
        );
        assert_eq!(
            interaction_on(&player, HallSpace),
            Some(InteractionResult::None)
        );
        assert_eq!(
            interaction_on(&player, Key),
            Some(InteractionResult::FoundKey)
        );
        assert_eq!(interaction_on(&player, Exit), Some(InteractionResult::Exit));
        assert_eq!(
            interaction_on(&player, Ghost),
            Some(InteractionResult::RemovePlayer)
        );
        assert_eq!(
            interaction_on(&player, Zombie),
            Some(InteractionResult::RemovePlayer)
        );
        assert_eq!(interaction_on(&player, Wall), None);
        assert_eq!(interaction_on(&player, Player), None);
        assert_eq!(interaction_on(&player, Empty), None);
    }

    #[test]
    fn adversary_interaction_table() {
        let ghost = Actor::ghost("casper");
        assert_eq!(interaction_on(&ghost, Space), Some(InteractionResult::None));
        assert_eq!(
            interaction_on(&ghost, HallSpace),
            Some(InteractionResult::None)
        );
        assert_eq!(
            interaction_on(&ghost, Player),
            Some(InteractionResult::RemovePlayer)
        );
        assert_eq!(interaction_on(&ghost, Key), None);
        assert_eq!(interaction_on(&ghost, Exit), None);
        assert_eq!(interaction_on(&ghost, Wall), None);
        assert_eq!(interaction_on(&ghost, Ghost), None);
        assert_eq!(interaction_on(&ghost, Zombie), None);
    }

    #[test]
    fn strides_differ_by_kind() {
        assert_eq!(max_stride(&Actor::player("ada")), 2);
        assert_eq!(max_stride(&Actor::ghost("casper")), 1);
        assert_eq!(max_stride(&Actor::zombie("shambler")), 1);
    }

    #[test]
    fn straight_path_through_open_floor() {
        let g = grid(Point::ORIGIN, 3, &[&[Space, Space, Space]]);
        let player = Actor::player("ada");
        assert!(check_move(&g, &player, Point::new(0, 0), Point::new(2, 0)));
    }

    #[test]
    fn wall_between_blocks_the_only_path() {
        let g = grid(Point::ORIGIN, 3, &[&[Space, Wall, Space]]);
        let player = Actor::player("ada");
        assert!(!check_move(&g, &player, Point::new(0, 0), Point::new(2, 0)));
    }

    #[test]
    fn bent_path_inside_the_bounding_grid_is_legal() {
        let g = grid(
            Point::ORIGIN,
            2,
            &[&[Space, Wall], &[Space, Space]],
        );
        let player = Actor::player("ada");
        // (0,0) -> (1,1) must route through (0,1).
        assert!(check_move(&g, &player, Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn players_pass_through_players_but_may_not_land_on_them() {
        let g = grid(Point::ORIGIN, 3, &[&[Space, Player, Space]]);
        let player = Actor::player("ada");
        assert!(check_move(&g, &player, Point::new(0, 0), Point::new(2, 0)));
        assert!(!check_move(&g, &player, Point::new(0, 0), Point::new(1, 0)));
    }

    #[test]
    fn distance_cap_applies_before_the_search() {
        let g = grid(Point::ORIGIN, 4, &[&[Space, Space, Space, Space]]);
        let player = Actor::player("ada");
        assert!(!check_move(&g, &player, Point::new(0, 0), Point::new(3, 0)));

        let ghost = Actor::ghost("casper");
        assert!(!check_move(&g, &ghost, Point::new(0, 0), Point::new(2, 0)));
        assert!(check_move(&g, &ghost, Point::new(0, 0), Point::new(1, 0)));
    }

    #[test]
    fn adversary_check_degenerates_to_the_destination_cell() {
        let g = grid(Point::ORIGIN, 2, &[&[Ghost, Player]]);
        let ghost = Actor::ghost("casper");
        assert!(check_move(&g, &ghost, Point::new(0, 0), Point::new(1, 0)));

        let g = grid(Point::ORIGIN, 2, &[&[Ghost, Key]]);
        assert!(!check_move(&g, &ghost, Point::new(0, 0), Point::new(1, 0)));
    }

    #[test]
    fn out_of_grid_cells_read_empty_and_block() {
        let g = grid(Point::ORIGIN, 1, &[&[Space]]);
        assert_eq!(g.get(Point::new(5, 5)), Empty);
        let player = Actor::player("ada");
        assert!(!check_move(&g, &player, Point::new(0, 0), Point::new(1, 0)));
    }
}
