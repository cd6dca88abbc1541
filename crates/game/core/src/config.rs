/// Game configuration constants.
///
/// All rule parameters are compile-time constants; nothing here is tuned at
/// runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    /// Hard cap on simultaneously live players; enforced by the sequencer
    /// and mirrored by the bounded live-player registry.
    pub const MAX_PLAYERS: usize = 4;

    /// Maximum Manhattan distance a player may move in one turn.
    pub const PLAYER_STRIDE: u32 = 2;

    /// Maximum Manhattan distance an adversary may move in one turn.
    pub const ADVERSARY_STRIDE: u32 = 1;

    /// Half-width of the square visibility window around a player
    /// (radius 2 ⇒ a 5x5 window).
    pub const VIEW_RADIUS: u32 = 2;
}
