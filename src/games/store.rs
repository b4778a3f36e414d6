//! In-memory game store
//!
//! Each game row (game plus its participants) lives behind its own async
//! mutex. Holding the row lock is the per-game critical section for joins
//! and for the check-and-settle sequence; different games never contend.
//! Valid for single-instance deployments; a multi-instance deployment
//! would put the `version` stamp behind a database conditional write.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::games::types::{Game, Participant};

/// A game and its participants, mutated only under the row lock.
#[derive(Debug)]
pub struct GameRow {
    pub game: Game,
    /// Join order; the first entry is the creator.
    pub participants: Vec<Participant>,
}

impl GameRow {
    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn participant_mut(&mut self, user_id: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.user_id == user_id)
    }

    pub fn all_completed(&self) -> bool {
        self.participants.iter().all(|p| p.completed_at.is_some())
    }

    /// Bump the version stamp after any write.
    pub fn touch(&mut self) {
        self.game.version += 1;
    }
}

pub struct GameStore {
    rows: DashMap<String, Arc<Mutex<GameRow>>>,
    match_codes: DashMap<String, String>,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            match_codes: DashMap::new(),
        }
    }

    /// Claim a match code for a game. Returns false if the code is taken.
    pub fn register_match_code(&self, code: &str, game_id: &str) -> bool {
        match self.match_codes.entry(code.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(game_id.to_string());
                true
            }
        }
    }

    pub fn insert(&self, row: GameRow) -> Arc<Mutex<GameRow>> {
        let game_id = row.game.id.clone();
        let handle = Arc::new(Mutex::new(row));
        self.rows.insert(game_id, Arc::clone(&handle));
        handle
    }

    pub fn get(&self, game_id: &str) -> Option<Arc<Mutex<GameRow>>> {
        self.rows.get(game_id).map(|row| Arc::clone(&row))
    }

    pub fn by_match_code(&self, code: &str) -> Option<Arc<Mutex<GameRow>>> {
        let game_id = self.match_codes.get(code)?.clone();
        self.get(&game_id)
    }

    pub fn game_ids(&self) -> Vec<String> {
        self.rows.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
