use strum::Display;

/// Classification of a tile's current content, used for rendering and for
/// the move-legality rules.
///
/// The tag is derived, never stored: a tile reports Wall/Space plus whatever
/// occupies it, and the owning component supplies context (`HallSpace` for a
/// corridor floor, `Empty` for positions outside every component).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityType {
    Wall,
    Space,
    HallSpace,
    Key,
    Exit,
    Player,
    Ghost,
    Zombie,
    Empty,
}
