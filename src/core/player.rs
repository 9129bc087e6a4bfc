//! Seats at the table.
//!
//! ## PlayerId
//!
//! A seat number, 0-based, in turn order. The dice pass from seat `n` to
//! seat `n + 1` and wrap back to seat 0.
//!
//! ## PlayerMap
//!
//! One entry per seat (score sheets, final-round flags, seat names),
//! indexed by `PlayerId`. A table is never empty.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat number in turn order. Displayed 1-based ("Player 1").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Seat `id`.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around a table of `player_count`.
    /// An empty table has no next seat, so the dice stay put.
    ///
    /// ```
    /// use farkle_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        match (self.index() + 1).checked_rem(player_count) {
            Some(seat) => Self(seat as u8),
            None => self,
        }
    }

    /// Whether this seat exists at a table of `player_count`.
    #[must_use]
    pub const fn is_seated(self, player_count: usize) -> bool {
        self.index() < player_count
    }

    /// Every seat at a table of `player_count`, in turn order.
    ///
    /// ```
    /// use farkle_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(seats.first(), Some(&PlayerId::new(0)));
    /// assert_eq!(seats.last(), Some(&PlayerId::new(3)));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(usize::from(u8::MAX)) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", u16::from(self.0) + 1)
    }
}

/// Per-seat data, one entry for every seat at the table.
///
/// ```
/// use farkle_engine::core::{PlayerId, PlayerMap};
///
/// let mut banked: PlayerMap<u32> = PlayerMap::with_value(3, 0);
/// banked[PlayerId::new(1)] += 350;
/// assert_eq!(banked[PlayerId::new(1)], 350);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Fill every seat from `factory`.
    ///
    /// # Panics
    ///
    /// If `player_count` is 0 or above 255. Settings validation keeps
    /// tables within 1-8.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= usize::from(u8::MAX), "At most 255 players supported");

        Self {
            seats: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Every seat starts with `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Every seat starts with `T::default()`.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Entry for `player`.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    /// Mutable entry for `player`.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    /// `(seat, entry)` pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
