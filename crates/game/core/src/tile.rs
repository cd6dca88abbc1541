use crate::actor::Actor;
use crate::entity::EntityType;
use crate::error::OccupancyError;
use crate::item::Item;

/// One grid cell.
///
/// A wall never holds content and rejects every content operation. A space
/// holds at most one actor and one item concurrently. Placement overwrites
/// unconditionally; removal of an absent occupant is an error. The
/// asymmetry is deliberate and covered by tests — callers at the level
/// layer only remove what they previously observed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Wall,
    Space {
        item: Option<Item>,
        actor: Option<Actor>,
    },
}

impl Tile {
    pub const fn wall() -> Self {
        Tile::Wall
    }

    /// An empty walkable cell.
    pub const fn space() -> Self {
        Tile::Space {
            item: None,
            actor: None,
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// The tag for this cell in room context: the occupying actor wins,
    /// then a resting item, then the bare floor.
    pub fn entity_type(&self) -> EntityType {
        match self {
            Tile::Wall => EntityType::Wall,
            Tile::Space { actor: Some(a), .. } => a.entity_type(),
            Tile::Space {
                actor: None,
                item: Some(i),
            } => i.entity_type(),
            Tile::Space {
                actor: None,
                item: None,
            } => EntityType::Space,
        }
    }

    pub fn actor(&self) -> Result<Option<&Actor>, OccupancyError> {
        match self {
            Tile::Wall => Err(OccupancyError::Wall),
            Tile::Space { actor, .. } => Ok(actor.as_ref()),
        }
    }

    pub fn item(&self) -> Result<Option<&Item>, OccupancyError> {
        match self {
            Tile::Wall => Err(OccupancyError::Wall),
            Tile::Space { item, .. } => Ok(item.as_ref()),
        }
    }

    /// Places an actor, silently replacing any prior occupant.
    pub fn place_actor(&mut self, incoming: Actor) -> Result<(), OccupancyError> {
        match self {
            Tile::Wall => Err(OccupancyError::Wall),
            Tile::Space { actor, .. } => {
                *actor = Some(incoming);
                Ok(())
            }
        }
    }

    /// Places an item, silently replacing any prior item.
    pub fn place_item(&mut self, incoming: Item) -> Result<(), OccupancyError> {
        match self {
            Tile::Wall => Err(OccupancyError::Wall),
            Tile::Space { item, .. } => {
                *item = Some(incoming);
                Ok(())
            }
        }
    }

    /// Removes and returns the occupying actor; removing from an empty
    /// space is an error, unlike placement.
    pub fn remove_actor(&mut self) -> Result<Actor, OccupancyError> {
        match self {
            Tile::Wall => Err(OccupancyError::Wall),
            Tile::Space { actor, .. } => actor.take().ok_or(OccupancyError::ActorAbsent),
        }
    }

    /// Removes and returns the resting item; removing from an empty space
    /// is an error.
    pub fn remove_item(&mut self) -> Result<Item, OccupancyError> {
        match self {
            Tile::Wall => Err(OccupancyError::Wall),
            Tile::Space { item, .. } => item.take().ok_or(OccupancyError::ItemAbsent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn wall_rejects_every_content_operation() {
        let mut tile = Tile::wall();
        assert_eq!(tile.actor(), Err(OccupancyError::Wall));
        assert_eq!(tile.item(), Err(OccupancyError::Wall));
        assert_eq!(
            tile.place_actor(Actor::player("ada")),
            Err(OccupancyError::Wall)
        );
        assert_eq!(
            tile.place_item(Item::key(Point::ORIGIN)),
            Err(OccupancyError::Wall)
        );
        assert_eq!(tile.remove_actor(), Err(OccupancyError::Wall));
        assert_eq!(tile.remove_item(), Err(OccupancyError::Wall));
    }

    #[test]
    fn space_holds_one_actor_and_one_item_concurrently() {
        let mut tile = Tile::space();
        tile.place_item(Item::key(Point::new(4, 17)))
            .expect("item placement on space");
        tile.place_actor(Actor::player("ada"))
            .expect("actor placement on space");

        assert_eq!(tile.entity_type(), EntityType::Player);
        assert!(tile.item().expect("space query").is_some());
    }

    #[test]
    fn placement_overwrites_silently() {
        let mut tile = Tile::space();
        tile.place_actor(Actor::player("ada"))
            .expect("first placement");
        tile.place_actor(Actor::ghost("casper"))
            .expect("overwrite placement");

        let occupant = tile.actor().expect("space query").expect("occupant");
        assert_eq!(occupant.name(), "casper");
    }

    #[test]
    fn removal_from_empty_space_is_an_error() {
        let mut tile = Tile::space();
        assert_eq!(tile.remove_actor(), Err(OccupancyError::ActorAbsent));
        assert_eq!(tile.remove_item(), Err(OccupancyError::ItemAbsent));
    }

    #[test]
    fn tag_prefers_actor_over_item_over_floor() {
        let mut tile = Tile::space();
        assert_eq!(tile.entity_type(), EntityType::Space);

        tile.place_item(Item::exit(Point::new(7, 11)))
            .expect("item placement");
        assert_eq!(tile.entity_type(), EntityType::Exit);

        tile.place_actor(Actor::zombie("shambler"))
            .expect("actor placement");
        assert_eq!(tile.entity_type(), EntityType::Zombie);

        tile.remove_actor().expect("occupant present");
        assert_eq!(tile.entity_type(), EntityType::Exit);
    }
}
