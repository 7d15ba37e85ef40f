//! Rating period resolution
//!
//! Collects a period's games and rates every participant against the
//! pre-period snapshot, so the order games were recorded in has no effect.

use crate::rating::glicko2::{glicko2_update, Glicko2Entry};
use crate::types::{PlayerId, Score};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// A game recorded during a period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodGame {
    pub black: PlayerId,
    pub white: PlayerId,
    /// Black's score; white scores `1 - black_score`
    pub black_score: Score,
}

/// Games of one rating period
#[derive(Debug, Clone, Default)]
pub struct RatingPeriod {
    games: Vec<PeriodGame>,
    /// Starting state for participants missing from the snapshot
    default_entry: Glicko2Entry,
}

impl RatingPeriod {
    pub fn new(default_entry: Glicko2Entry) -> Self {
        Self {
            games: Vec::new(),
            default_entry,
        }
    }

    pub fn record(&mut self, black: PlayerId, white: PlayerId, black_score: Score) {
        self.games.push(PeriodGame {
            black,
            white,
            black_score,
        });
    }

    pub fn games(&self) -> &[PeriodGame] {
        &self.games
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn snapshot_of(
        &self,
        snapshot: &HashMap<PlayerId, Glicko2Entry>,
        player: PlayerId,
    ) -> Glicko2Entry {
        snapshot.get(&player).copied().unwrap_or(self.default_entry)
    }

    /// Rate every player in `snapshot` and every participant of the period.
    ///
    /// Players with games are updated once with all of them; snapshot players
    /// without games have their deviation expanded by one period.
    pub fn resolve(
        &self,
        snapshot: &HashMap<PlayerId, Glicko2Entry>,
    ) -> HashMap<PlayerId, Glicko2Entry> {
        let mut matches: BTreeMap<PlayerId, Vec<(Glicko2Entry, Score)>> = BTreeMap::new();
        for game in &self.games {
            let black = self.snapshot_of(snapshot, game.black);
            let white = self.snapshot_of(snapshot, game.white);
            matches
                .entry(game.black)
                .or_default()
                .push((white, game.black_score));
            matches
                .entry(game.white)
                .or_default()
                .push((black, 1.0 - game.black_score));
        }

        let mut resolved: HashMap<PlayerId, Glicko2Entry> = snapshot
            .iter()
            .filter(|(player, _)| !matches.contains_key(player))
            .map(|(&player, entry)| (player, entry.expand_deviation_because_no_games_played(1)))
            .collect();

        for (player, player_matches) in &matches {
            let before = self.snapshot_of(snapshot, *player);
            let after = glicko2_update(&before, player_matches);
            trace!(player, games = player_matches.len(), rating = after.rating, "player rated");
            resolved.insert(*player, after);
        }

        debug!(
            games = self.games.len(),
            players = resolved.len(),
            "Rating period resolved"
        );
        resolved
    }
}
