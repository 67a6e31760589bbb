use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{PlayerError, Result};
use crate::library::Track;

/// Ordered tracks plus the index of the active one.
///
/// A store always holds at least one track: `load` refuses an empty list, so
/// `active` is always a valid index into `order`.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    /// Display order (shuffled or not).
    order: Vec<Track>,
    /// Scan order, kept so shuffle can be undone without rescanning.
    baseline: Vec<Track>,
    active: usize,
    shuffled: bool,
}

impl PlaylistStore {
    /// Build a store from `tracks` in their given order, active on the first.
    pub fn load(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self {
            baseline: tracks.clone(),
            order: tracks,
            active: 0,
            shuffled: false,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Tracks in display order.
    pub fn tracks(&self) -> &[Track] {
        &self.order
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn active_track(&self) -> &Track {
        &self.order[self.active]
    }

    /// Move the active index by `delta`, wrapping at both ends
    /// (`-1` from the first track lands on the last). Returns the new index.
    pub fn advance(&mut self, delta: isize) -> usize {
        let len = self.order.len() as isize;
        self.active = (self.active as isize + delta).rem_euclid(len) as usize;
        self.active
    }

    /// Make the track at `index` (display order) the active one.
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        if index >= self.order.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.order.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    /// Toggle shuffle using the thread-local RNG.
    pub fn toggle_shuffle(&mut self) {
        self.toggle_shuffle_with(&mut rand::rng());
    }

    /// Toggle shuffle, drawing the permutation from `rng`.
    ///
    /// Turning shuffle on moves the active track to the front and permutes the
    /// rest behind it. Turning it off restores scan order and finds the active
    /// track again by path. Either way the active track itself never changes.
    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shuffled {
            let current = self.order[self.active].path.clone();
            self.order = self.baseline.clone();
            self.active = self
                .order
                .iter()
                .position(|t| t.path == current)
                .unwrap_or(0);
        } else {
            let mut rest = self.order.clone();
            let current = rest.remove(self.active);
            rest.shuffle(rng);
            rest.insert(0, current);
            self.order = rest;
            self.active = 0;
        }
        self.shuffled = !self.shuffled;
    }
}
