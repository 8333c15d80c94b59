/// FIFO waiting pool of players seeking a match.
///
/// Insertion order is pairing priority and an id appears at most once. Pairing takes the two
/// earliest ids under the pool lock, so concurrent callers never both consume the same player.
use std::collections::VecDeque;
use std::sync::Mutex;
use log::debug;

use crate::config::matchmaking::PLAYERS_PER_MATCH;
use crate::game::types::PlayerId;
use crate::server::error::{ArenaError, ArenaResult};
use crate::server::sync_utils::lock;

#[derive(Default)]
pub struct WaitingPool {
    queue: Mutex<VecDeque<PlayerId>>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player once `admit` accepts them.
    ///
    /// `admit` runs with the pool locked, so no pairing can slip between the check and the
    /// insert. Returns whether the player was newly added (an id already waiting is left in
    /// place) and their zero-based position.
    pub fn enqueue_if(
        &self,
        id: PlayerId,
        admit: impl FnOnce(&PlayerId) -> ArenaResult<()>,
    ) -> ArenaResult<(bool, usize)> {
        let mut queue = lock(&self.queue);
        admit(&id)?;
        if let Some(position) = queue.iter().position(|waiting| waiting == &id) {
            return Ok((false, position));
        }
        debug!("[Matchmaking] Player {} joined the waiting pool ({} waiting)", id, queue.len() + 1);
        queue.push_back(id);
        Ok((true, queue.len() - 1))
    }

    /// Remove the two earliest players and hand them to `on_pair` while the pool is still locked.
    ///
    /// Leaves the pool untouched and returns `None` when fewer than two players are waiting.
    pub fn dequeue_pair_with<T>(&self, on_pair: impl FnOnce(PlayerId, PlayerId) -> T) -> Option<T> {
        let mut queue = lock(&self.queue);
        if queue.len() < PLAYERS_PER_MATCH {
            return None;
        }
        let first = queue.pop_front()?;
        let second = queue.pop_front()?;
        debug!("[Matchmaking] Paired {} with {} ({} still waiting)", first, second, queue.len());
        Some(on_pair(first, second))
    }

    /// Withdraw a specific player before they are paired.
    pub fn remove(&self, id: &PlayerId) -> ArenaResult<()> {
        self.withdraw_with(id, |waiting| {
            if waiting {
                Ok(())
            } else {
                Err(ArenaError::NotWaiting(id.clone()))
            }
        })
    }

    /// Run `release` with the pool locked, telling it whether `id` is waiting, and drop the
    /// player from the pool only if it succeeds.
    pub fn withdraw_with<T>(&self, id: &PlayerId, release: impl FnOnce(bool) -> ArenaResult<T>) -> ArenaResult<T> {
        let mut queue = lock(&self.queue);
        let index = queue.iter().position(|waiting| waiting == id);
        let released = release(index.is_some())?;
        if let Some(index) = index {
            queue.remove(index);
            debug!("[Matchmaking] Player {} left the waiting pool ({} waiting)", id, queue.len());
        }
        Ok(released)
    }

    /// Zero-based position of a waiting player.
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        lock(&self.queue).iter().position(|waiting| waiting == id)
    }

    pub fn len(&self) -> usize {
        lock(&self.queue).len()
    }
}
