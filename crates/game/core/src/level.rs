//! Level orchestration.
//!
//! A [`Level`] owns the component arena, the live-actor registries, the item
//! registry, and the two monotone flags (`exit_unlocked`, `level_exited`).
//! Drivers validate a move with [`Level::check_valid_move`], apply it with
//! [`Level::player_action`] / [`Level::adversary_action`], then poll
//! [`Level::status`]. A rejected move is never applied, so there is no
//! partial mutation to roll back.

use arrayvec::ArrayVec;

use crate::actor::Actor;
use crate::component::{ComponentError, ComponentId, Hall, LevelComponent, Room};
use crate::config::GameConfig;
use crate::entity::EntityType;
use crate::error::{GeometryError, OccupancyError};
use crate::item::{Item, ItemKind};
use crate::point::{Bounds, Point};
use crate::rules::{self, InteractionResult, TagGrid};

/// Win/loss state, computed on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelStatus {
    /// At least one player is still live.
    Active,
    /// All players gone and someone reached the exit.
    Won,
    /// All players gone and nobody reached the exit.
    Lost,
}

/// Error raised by level operations. These signal programmer error; the
/// expected "move is illegal" condition is the `false` branch of
/// [`Level::check_valid_move`], never an error value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Occupancy(#[from] OccupancyError),

    #[error("no component contains {point}")]
    NoComponentAt { point: Point },

    #[error("actor {name:?} is not live in this level")]
    ActorNotLive { name: String },

    #[error("{name:?} may not move onto {destination}")]
    IllegalMove { name: String, destination: Point },

    #[error("component {id} is not a room")]
    NotARoom { id: ComponentId },

    #[error("level has no rooms to place actors into")]
    NoRooms,

    #[error("room {room} has no free space left")]
    NoFreeSpace { room: ComponentId },

    #[error("live-player registry is full")]
    TooManyPlayers,
}

impl From<ComponentError> for LevelError {
    fn from(error: ComponentError) -> Self {
        match error {
            ComponentError::Geometry(e) => LevelError::Geometry(e),
            ComponentError::Occupancy(e) => LevelError::Occupancy(e),
        }
    }
}

/// Registry entry for an actor currently in the level: the actor value plus
/// a pointer to the component holding its tile.
#[derive(Clone, Debug, PartialEq, Eq)]
struct LiveActor {
    actor: Actor,
    component: ComponentId,
}

/// One level of the dungeon: rooms and halls stitched into a shared
/// coordinate space, populated by actors and items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    components: Vec<LevelComponent>,
    /// Live players in insertion order; insertion order is turn order.
    players: ArrayVec<LiveActor, { GameConfig::MAX_PLAYERS }>,
    /// Live adversaries in insertion order.
    adversaries: Vec<LiveActor>,
    items: Vec<Item>,
    exit_unlocked: bool,
    level_exited: bool,
}

impl Level {
    pub fn builder() -> LevelBuilder {
        LevelBuilder::new()
    }

    // ------------------------------------------------------------------
    // Geometry and lookup
    // ------------------------------------------------------------------

    fn component(&self, id: ComponentId) -> &LevelComponent {
        &self.components[id.0]
    }

    fn component_mut(&mut self, id: ComponentId) -> &mut LevelComponent {
        &mut self.components[id.0]
    }

    /// The component whose footprint covers `p`, if any. A position belongs
    /// to at most one component.
    pub fn component_at(&self, p: Point) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|component| component.contains(p))
            .map(ComponentId)
    }

    /// True when `p` lies inside a hall component. Movement heuristics use
    /// this to keep room-bound adversaries out of corridors.
    pub fn in_hall(&self, p: Point) -> bool {
        self.component_at(p)
            .is_some_and(|id| self.component(id).as_hall().is_some())
    }

    /// The tag at `p`, with positions outside every component reading
    /// [`EntityType::Empty`].
    pub fn entity_type_at(&self, p: Point) -> EntityType {
        match self.component_at(p) {
            Some(id) => self
                .component(id)
                .entity_type_at(p)
                .unwrap_or(EntityType::Empty),
            None => EntityType::Empty,
        }
    }

    /// Union of every component's bounding rectangle.
    pub fn bounds(&self) -> Bounds {
        let mut components = self.components.iter();
        let first = components
            .next()
            .map(LevelComponent::bounds)
            .unwrap_or_else(|| Bounds::spanning(Point::ORIGIN, Point::ORIGIN));
        components.fold(first, |acc, component| acc.union(component.bounds()))
    }

    /// Samples the level's tags over `bounds`.
    pub fn tag_grid(&self, bounds: Bounds) -> TagGrid {
        TagGrid::collect(bounds, |p| self.entity_type_at(p))
    }

    /// The full rendered grid over the level's bounding box.
    pub fn map(&self) -> TagGrid {
        self.tag_grid(self.bounds())
    }

    // ------------------------------------------------------------------
    // Registries
    // ------------------------------------------------------------------

    pub fn live_players(&self) -> impl Iterator<Item = &Actor> {
        self.players.iter().map(|entry| &entry.actor)
    }

    pub fn live_adversaries(&self) -> impl Iterator<Item = &Actor> {
        self.adversaries.iter().map(|entry| &entry.actor)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn exit_unlocked(&self) -> bool {
        self.exit_unlocked
    }

    pub fn level_exited(&self) -> bool {
        self.level_exited
    }

    fn live_entry(&self, name: &str) -> Option<&LiveActor> {
        self.players
            .iter()
            .chain(self.adversaries.iter())
            .find(|entry| entry.actor.name() == name)
    }

    /// Level-wide position of a live actor.
    pub fn find_actor(&self, name: &str) -> Option<Point> {
        let entry = self.live_entry(name)?;
        self.component(entry.component).find_actor(name).ok()
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Explicitly places an actor, registering it as live. The position
    /// must lie in some component and must not be a wall.
    pub fn place_actor(&mut self, actor: Actor, at: Point) -> Result<(), LevelError> {
        if actor.is_player() && self.players.is_full() {
            return Err(LevelError::TooManyPlayers);
        }
        let component = self
            .component_at(at)
            .ok_or(LevelError::NoComponentAt { point: at })?;
        self.component_mut(component).place_actor(at, actor.clone())?;

        let entry = LiveActor { actor, component };
        if entry.actor.is_player() {
            self.players.push(entry);
        } else {
            self.adversaries.push(entry);
        }
        Ok(())
    }

    /// Auto-placement: players go into the room whose top-left corner is
    /// closest to the coordinate origin (ties broken toward smaller y),
    /// adversaries into the farthest room (ties toward larger y). Within
    /// the chosen room each actor takes the first free space in row-major
    /// order.
    pub fn place_actors(
        &mut self,
        players: Vec<Actor>,
        adversaries: Vec<Actor>,
    ) -> Result<(), LevelError> {
        fn origin_distance(origin: Point) -> u64 {
            let (x, y) = (origin.x as i64, origin.y as i64);
            (x * x + y * y) as u64
        }

        let rooms: Vec<(ComponentId, Point)> = self
            .components
            .iter()
            .enumerate()
            .filter_map(|(index, component)| {
                component
                    .as_room()
                    .map(|room| (ComponentId(index), room.origin()))
            })
            .collect();

        let near = rooms
            .iter()
            .min_by_key(|(_, origin)| (origin_distance(*origin), origin.y))
            .map(|&(id, _)| id)
            .ok_or(LevelError::NoRooms)?;
        let far = rooms
            .iter()
            .max_by_key(|(_, origin)| (origin_distance(*origin), origin.y))
            .map(|&(id, _)| id)
            .ok_or(LevelError::NoRooms)?;

        for player in players {
            let spot = self.first_free_space(near)?;
            self.place_actor(player, spot)?;
        }
        for adversary in adversaries {
            let spot = self.first_free_space(far)?;
            self.place_actor(adversary, spot)?;
        }
        Ok(())
    }

    fn first_free_space(&self, room: ComponentId) -> Result<Point, LevelError> {
        self.component(room)
            .as_room()
            .ok_or(LevelError::NotARoom { id: room })?
            .first_free_space()
            .ok_or(LevelError::NoFreeSpace { room })
    }

    // ------------------------------------------------------------------
    // Move validation
    // ------------------------------------------------------------------

    /// Read-only legality check: distance cap plus path legality over the
    /// bounding sub-grid, with out-of-level cells tagged `Empty`. Never
    /// mutates state; an unknown or dead actor simply has no legal moves.
    pub fn check_valid_move(&self, actor: &Actor, destination: Point) -> bool {
        let Some(source) = self.find_actor(actor.name()) else {
            return false;
        };
        if source.manhattan_distance(destination) > rules::max_stride(actor) {
            return false;
        }
        let grid = self.tag_grid(Bounds::spanning(source, destination));
        rules::path_exists(&grid, actor, source, destination)
    }

    // ------------------------------------------------------------------
    // Turn actions
    // ------------------------------------------------------------------

    /// Applies a player's move and resolves its interaction.
    pub fn player_action(
        &mut self,
        actor: &Actor,
        destination: Point,
    ) -> Result<InteractionResult, LevelError> {
        let index = self
            .players
            .iter()
            .position(|entry| entry.actor.name() == actor.name())
            .ok_or_else(|| LevelError::ActorNotLive {
                name: actor.name().to_owned(),
            })?;
        self.resolve_action(true, index, destination)
    }

    /// Applies an adversary's move and resolves its interaction.
    pub fn adversary_action(
        &mut self,
        actor: &Actor,
        destination: Point,
    ) -> Result<InteractionResult, LevelError> {
        let index = self
            .adversaries
            .iter()
            .position(|entry| entry.actor.name() == actor.name())
            .ok_or_else(|| LevelError::ActorNotLive {
                name: actor.name().to_owned(),
            })?;
        self.resolve_action(false, index, destination)
    }

    fn resolve_action(
        &mut self,
        is_player: bool,
        index: usize,
        destination: Point,
    ) -> Result<InteractionResult, LevelError> {
        let entry = if is_player {
            &self.players[index]
        } else {
            &self.adversaries[index]
        };
        let name = entry.actor.name().to_owned();
        let source_component = entry.component;

        // Resolve the destination component, reusing the source component
        // when it already covers the destination.
        let dest_component = if self.component(source_component).contains(destination) {
            source_component
        } else {
            self.component_at(destination)
                .ok_or(LevelError::NoComponentAt { point: destination })?
        };

        // Interaction from the destination tag; players see a locked exit
        // as plain floor.
        let dest_tag = self.component(dest_component).entity_type_at(destination)?;
        let entry_actor = if is_player {
            &self.players[index].actor
        } else {
            &self.adversaries[index].actor
        };
        let mut outcome = rules::interaction_on(entry_actor, dest_tag).ok_or(
            LevelError::IllegalMove {
                name: name.clone(),
                destination,
            },
        )?;
        if is_player && outcome == InteractionResult::Exit && !self.exit_unlocked {
            outcome = InteractionResult::None;
        }

        // An adversary's victim must be identified now: the placement below
        // overwrites the destination tile's occupant.
        let victim = if !is_player && outcome == InteractionResult::RemovePlayer {
            self.component(dest_component)
                .tile(destination)?
                .actor()?
                .map(|occupant| occupant.name().to_owned())
        } else {
            None
        };

        // Lift the actor off its source tile.
        let source = self.component(source_component).find_actor(&name)?;
        let actor = self.component_mut(source_component).remove_actor(source)?;

        let removed_from_play = is_player
            && matches!(
                outcome,
                InteractionResult::Exit | InteractionResult::RemovePlayer
            );
        if removed_from_play {
            self.players.remove(index);
        } else {
            // Placement overwrites: an adversary landing on a player clears
            // that player's tile occupancy in the same stroke.
            self.component_mut(dest_component)
                .place_actor(destination, actor)?;
            if is_player {
                self.players[index].component = dest_component;
            } else {
                self.adversaries[index].component = dest_component;
            }
        }

        // Side effects.
        match outcome {
            InteractionResult::FoundKey => {
                self.component_mut(dest_component).remove_item(destination)?;
                self.items.retain(|item| item.position() != destination);
                self.exit_unlocked = true;
            }
            InteractionResult::Exit if is_player => {
                self.level_exited = true;
            }
            InteractionResult::RemovePlayer if !is_player => {
                // The victim's tile occupancy was already overwritten by the
                // placement above; only the registry entry remains.
                if let Some(victim_name) = victim
                    && let Some(victim_index) = self
                        .players
                        .iter()
                        .position(|entry| entry.actor.name() == victim_name)
                {
                    self.players.remove(victim_index);
                }
            }
            _ => {}
        }

        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // State queries
    // ------------------------------------------------------------------

    /// Active while any player is live; afterwards Won exactly when some
    /// player reached the exit.
    pub fn status(&self) -> LevelStatus {
        if !self.players.is_empty() {
            LevelStatus::Active
        } else if self.level_exited {
            LevelStatus::Won
        } else {
            LevelStatus::Lost
        }
    }

    pub fn is_over(&self) -> bool {
        self.status() != LevelStatus::Active
    }

    /// Consistency probe for external assertions: exactly one exit, a key
    /// unless the exit is already unlocked, every live actor drawn from the
    /// supplied roster, and the flag implication `level_exited ⇒
    /// exit_unlocked`. Violations are reported, not raised.
    pub fn check_valid_level_state(&self, players: &[Actor], adversaries: &[Actor]) -> bool {
        let exits = self
            .items
            .iter()
            .filter(|item| item.kind() == ItemKind::Exit)
            .count();
        let keys = self
            .items
            .iter()
            .filter(|item| item.kind() == ItemKind::Key)
            .count();
        let items_ok = exits == 1 && (keys == 1 || (keys == 0 && self.exit_unlocked));

        let known = |entry: &LiveActor, roster: &[Actor]| {
            roster
                .iter()
                .any(|actor| actor.name() == entry.actor.name())
        };
        let roster_ok = self.players.iter().all(|entry| known(entry, players))
            && self
                .adversaries
                .iter()
                .all(|entry| known(entry, adversaries));

        let flags_ok = !self.level_exited || self.exit_unlocked;

        items_ok && roster_ok && flags_ok
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    fn player_position(&self, name: &str) -> Result<Point, LevelError> {
        let entry = self
            .players
            .iter()
            .find(|entry| entry.actor.name() == name)
            .ok_or_else(|| LevelError::ActorNotLive {
                name: name.to_owned(),
            })?;
        Ok(self.component(entry.component).find_actor(name)?)
    }

    fn view_window(&self, name: &str) -> Result<Bounds, LevelError> {
        Ok(Bounds::window(
            self.player_position(name)?,
            GameConfig::VIEW_RADIUS,
        ))
    }

    /// The square window of tags centred on the named player, out-of-level
    /// cells tagged `Empty`.
    pub fn player_map(&self, name: &str) -> Result<TagGrid, LevelError> {
        Ok(self.tag_grid(self.view_window(name)?))
    }

    /// Doors within the named player's window.
    pub fn visible_doors(&self, name: &str) -> Result<Vec<Point>, LevelError> {
        let window = self.view_window(name)?;
        Ok(self
            .components
            .iter()
            .filter_map(LevelComponent::as_room)
            .flat_map(Room::doors)
            .map(|(door, _)| door)
            .filter(|&door| window.contains(door))
            .collect())
    }

    /// Items within the named player's window.
    pub fn visible_items(&self, name: &str) -> Result<Vec<Item>, LevelError> {
        let window = self.view_window(name)?;
        Ok(self
            .items
            .iter()
            .copied()
            .filter(|item| window.contains(item.position()))
            .collect())
    }

    /// Live actors (and their positions) within the named player's window.
    pub fn visible_actors(&self, name: &str) -> Result<Vec<(Actor, Point)>, LevelError> {
        let window = self.view_window(name)?;
        let mut seen = Vec::new();
        for entry in self.players.iter().chain(self.adversaries.iter()) {
            if let Ok(at) = self.component(entry.component).find_actor(entry.actor.name())
                && window.contains(at)
            {
                seen.push((entry.actor.clone(), at));
            }
        }
        Ok(seen)
    }
}

/// Assembles a level: rooms first, then hall connections, then items.
///
/// The builder is consumed by one of the three `build*` forms — bare,
/// auto-populated, or restored from explicit positions and flags.
#[derive(Debug, Default)]
pub struct LevelBuilder {
    components: Vec<LevelComponent>,
    items: Vec<Item>,
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room to the arena.
    pub fn add_room(&mut self, room: Room) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(room.into());
        id
    }

    /// Synthesizes a hall between two room doors and registers it at both
    /// ends.
    pub fn connect(
        &mut self,
        start_door: Point,
        start_room: ComponentId,
        end_door: Point,
        end_room: ComponentId,
        waypoints: Vec<Point>,
    ) -> Result<ComponentId, LevelError> {
        let hall = Hall::between(start_door, start_room, end_door, end_room, waypoints)?;
        self.attach_hall(hall)
    }

    /// Registers an already-connected hall (bootstrap form) at both of its
    /// rooms' doors.
    pub fn attach_hall(&mut self, hall: Hall) -> Result<ComponentId, LevelError> {
        let id = ComponentId(self.components.len());
        let (start_door, start_room) = (hall.start_door()?, hall.start_room()?);
        let (end_door, end_room) = (hall.end_door()?, hall.end_room()?);

        self.room_mut(start_room)?.connect_hall(start_door, id)?;
        self.room_mut(end_room)?.connect_hall(end_door, id)?;
        self.components.push(hall.into());
        Ok(id)
    }

    fn room_mut(&mut self, id: ComponentId) -> Result<&mut Room, LevelError> {
        self.components
            .get_mut(id.0)
            .and_then(LevelComponent::as_room_mut)
            .ok_or(LevelError::NotARoom { id })
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Construction form (a): components and items only. Every item is
    /// placed onto its home component.
    pub fn build(self) -> Result<Level, LevelError> {
        let mut level = Level {
            components: self.components,
            players: ArrayVec::new(),
            adversaries: Vec::new(),
            items: Vec::new(),
            exit_unlocked: false,
            level_exited: false,
        };
        for item in self.items {
            let at = item.position();
            let component = level
                .component_at(at)
                .ok_or(LevelError::NoComponentAt { point: at })?;
            level.component_mut(component).place_item(at, item)?;
            level.items.push(item);
        }
        Ok(level)
    }

    /// Construction form (b): auto-placed actor lists.
    pub fn build_populated(
        self,
        players: Vec<Actor>,
        adversaries: Vec<Actor>,
    ) -> Result<Level, LevelError> {
        let mut level = self.build()?;
        level.place_actors(players, adversaries)?;
        Ok(level)
    }

    /// Construction form (c): full-state reconstruction from explicit
    /// positions and flags, used by replay and trace tooling.
    pub fn build_restored(
        self,
        players: Vec<(Actor, Point)>,
        adversaries: Vec<(Actor, Point)>,
        exit_unlocked: bool,
        level_exited: bool,
    ) -> Result<Level, LevelError> {
        let mut level = self.build()?;
        for (actor, at) in players.into_iter().chain(adversaries) {
            level.place_actor(actor, at)?;
        }
        level.exit_unlocked = exit_unlocked;
        level.level_exited = level_exited;
        Ok(level)
    }
}
