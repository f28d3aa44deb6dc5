//! Player identification, turn order, and per-player storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## Turn order
//!
//! Every "each player" or "each opponent" loop in the engine is encoded
//! explicitly as a queue of players built by [`PlayerId::turn_order_from`],
//! never derived from map iteration order.
//!
//! ## PlayerMap
//!
//! Per-player data backed by `Vec` for O(1) access, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player after this one in seating order.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }

    /// All players in turn order, starting with `start`.
    ///
    /// ```
    /// use ccg_rules::core::PlayerId;
    ///
    /// let order: Vec<_> = PlayerId::turn_order_from(PlayerId::new(2), 4).collect();
    /// assert_eq!(order, vec![PlayerId(2), PlayerId(3), PlayerId(0), PlayerId(1)]);
    /// ```
    pub fn turn_order_from(start: PlayerId, player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(move |offset| PlayerId(((start.index() + offset) % player_count) as u8))
    }

    /// Opponents of `self` in turn order, starting with the next player.
    pub fn opponents(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        Self::turn_order_from(self, player_count).skip(1)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use ccg_rules::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::new(3, |_| 20);
/// life[PlayerId::new(1)] -= 4;
/// assert_eq!(life[PlayerId::new(1)], 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's data, or `None` for an id outside the game.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a player's data mutably, or `None` for an id outside the game.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Check whether `player` is seated in this game.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
