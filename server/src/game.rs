//! C3: per-room game lifecycle — bag, racks, turn pointer, move
//! application, and end-of-game detection.

use crate::{
    error::ErrorCode,
    models::{ActionKind, BoardView, GameStateView, MoveSummaryView, PlacementView, PlayerStats, TileView},
};
use rand::Rng;
use scrabble::{
    board::Board,
    dictionary::Dictionary,
    letter_bag::{Bag, Language},
    play::Action,
    rack::Rack,
    rules,
};
use std::{collections::HashMap, time::Duration};

/// A player's game-scoped state: their rack, running score, and aggregate
/// stats. Lobby-scoped attributes (nickname, connectivity, ready) live in
/// `server::registry`, not here — C3 has no dependency on C4.
#[derive(Debug, Clone)]
pub struct PlayerGameState {
    /// The player's current rack.
    pub rack: Rack,
    /// The player's cumulative score this game.
    pub score: i32,
    /// The player's aggregate stats this game.
    pub stats: PlayerStats,
}

/// The outcome of a successfully applied [`GameState::play_move`].
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The move log entry just recorded.
    pub move_summary: MoveSummaryView,
    /// Whether this move ended the game.
    pub game_ended: bool,
}

/// A room's in-progress (or finished) game.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    bag: Bag,
    order: Vec<String>,
    players: HashMap<String, PlayerGameState>,
    turn_index: usize,
    turn_ends_at_ms: u64,
    turn_duration_ms: u64,
    move_log: Vec<MoveSummaryView>,
    consecutive_passes: u32,
    version: u64,
    finished: bool,
}
impl GameState {
    /// Starts a new game for `order` (player ids, in turn order), dealing
    /// racks from a freshly shuffled bag.
    pub fn start(
        order: Vec<String>,
        language: Language,
        turn_duration: Duration,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Self {
        let mut bag = Bag::new(language, rng);
        let players = order
            .iter()
            .map(|id| {
                let rack = Rack::new(&mut bag);
                (
                    id.clone(),
                    PlayerGameState {
                        rack,
                        score: 0,
                        stats: PlayerStats::default(),
                    },
                )
            })
            .collect();
        let turn_duration_ms = turn_duration.as_millis() as u64;

        Self {
            board: Board::default(),
            bag,
            order,
            players,
            turn_index: 0,
            turn_ends_at_ms: now_ms + turn_duration_ms,
            turn_duration_ms,
            move_log: Vec::new(),
            consecutive_passes: 0,
            version: 1,
            finished: false,
        }
    }
    /// The id of the player whose turn it currently is.
    pub fn active_player_id(&self) -> &str {
        &self.order[self.turn_index]
    }
    /// Whether the game has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
    /// The game's monotonically increasing version.
    pub fn version(&self) -> u64 {
        self.version
    }
    /// When the current turn expires, in milliseconds since the Unix
    /// epoch.
    pub fn turn_ends_at_ms(&self) -> u64 {
        self.turn_ends_at_ms
    }
    /// Every player's final score, valid once [`Self::is_finished`].
    pub fn scores(&self) -> impl Iterator<Item = (&str, i32)> {
        self.players.iter().map(|(id, p)| (id.as_str(), p.score))
    }
    /// Every player's final stats, valid once [`Self::is_finished`].
    pub fn stats(&self) -> impl Iterator<Item = (&str, &PlayerStats)> {
        self.players.iter().map(|(id, p)| (id.as_str(), &p.stats))
    }
    /// Builds a personalized view of this state: `recipient`'s rack is
    /// populated, everyone else's stays private.
    pub fn view_for(&self, recipient: &str) -> GameStateView {
        GameStateView {
            board: BoardView::from(&self.board),
            active_player_id: self.active_player_id().to_string(),
            turn_ends_at: self.turn_ends_at_ms,
            turn_duration_ms: self.turn_duration_ms,
            bag_remaining: self.bag.len(),
            move_log: self.move_log.clone(),
            consecutive_passes: self.consecutive_passes,
            version: self.version,
            rack: self.players.get(recipient).map(|p| {
                p.rack.iter().copied().map(TileView::from).collect()
            }),
        }
    }
    /// Applies `action` on behalf of `player_id`. Preconditions this
    /// enforces itself: the game isn't finished, and it's `player_id`'s
    /// turn. Callers (the session coordinator) check room membership
    /// before reaching here.
    pub fn play_move(
        &mut self,
        player_id: &str,
        action: Action,
        dictionary: &dyn Dictionary,
        exchange_counts_as_pass: bool,
        max_consecutive_passes: u32,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Result<MoveOutcome, ErrorCode> {
        if self.finished {
            return Err(ErrorCode::InvalidState);
        }
        if player_id != self.active_player_id() {
            return Err(ErrorCode::NotYourTurn);
        }

        let turn_number = self.move_log.len() as u32 + 1;

        match action {
            Action::Pass => {
                self.players
                    .get_mut(player_id)
                    .expect("active player exists")
                    .stats
                    .passes += 1;
                self.consecutive_passes += 1;

                self.move_log.push(MoveSummaryView {
                    player_id: player_id.to_string(),
                    action: ActionKind::Pass,
                    words: vec![],
                    score_delta: 0,
                    placements: vec![],
                    turn_number,
                    created_at: now_ms,
                });
            }
            Action::Exchange(ids) => {
                let player = self.players.get_mut(player_id).expect("active player exists");
                player
                    .rack
                    .exchange(&ids, &mut self.bag, rng)
                    .map_err(ErrorCode::from)?;
                player.stats.passes += 1;

                self.consecutive_passes = match exchange_counts_as_pass {
                    true => self.consecutive_passes + 1,
                    false => 0,
                };

                self.move_log.push(MoveSummaryView {
                    player_id: player_id.to_string(),
                    action: ActionKind::Exchange,
                    words: vec![],
                    score_delta: 0,
                    placements: vec![],
                    turn_number,
                    created_at: now_ms,
                });
            }
            Action::Play(placements) => {
                let player = self.players.get(player_id).expect("active player exists");
                let outcome = rules::validate_play(&self.board, &player.rack, dictionary, &placements)
                    .map_err(ErrorCode::from)?;

                {
                    let player = self.players.get_mut(player_id).expect("active player exists");
                    rules::apply_play(&mut self.board, &mut player.rack, &mut self.bag, &placements);

                    player.score += outcome.score as i32;
                    player.stats.words_played += 1;
                    player.stats.total_turns += 1;
                    if outcome.score > player.stats.best_word_score {
                        player.stats.best_word_score = outcome.score;
                        player.stats.best_word = outcome.words.first().cloned();
                    }
                }
                self.consecutive_passes = 0;

                let placement_views = placements
                    .iter()
                    .map(|placement| {
                        let tile = self
                            .board
                            .at(placement.pos)
                            .expect("apply_play just placed this tile");
                        PlacementView {
                            x: placement.pos.x,
                            y: placement.pos.y,
                            tile: TileView::from(tile),
                        }
                    })
                    .collect();

                self.move_log.push(MoveSummaryView {
                    player_id: player_id.to_string(),
                    action: ActionKind::Play,
                    words: outcome.words,
                    score_delta: outcome.score,
                    placements: placement_views,
                    turn_number,
                    created_at: now_ms,
                });
            }
        }

        self.advance_turn(now_ms);

        if self.consecutive_passes >= max_consecutive_passes || self.bag_empty_and_a_rack_empty() {
            self.finish();
        }

        Ok(MoveOutcome {
            move_summary: self.move_log.last().expect("just pushed").clone(),
            game_ended: self.finished,
        })
    }
    /// Removes `player_id` from the game's turn order and player map, e.g.
    /// when a member leaves a room mid-game. Callers are responsible for
    /// forcing a `pass` on `player_id`'s behalf first if they were the
    /// active player, so the turn they were mid-way through is resolved
    /// before they're dropped. If this empties the turn order the game is
    /// marked finished; otherwise the turn pointer is re-anchored to
    /// whichever player was active going in, so removing a player who
    /// isn't currently active never skips or repeats a turn.
    pub fn remove_player(&mut self, player_id: &str) {
        let Some(_) = self.order.iter().position(|id| id == player_id) else {
            return;
        };
        let active_id = (!self.finished).then(|| self.active_player_id().to_string());

        self.order.retain(|id| id != player_id);
        self.players.remove(player_id);

        if self.order.is_empty() {
            self.finished = true;
            return;
        }

        self.turn_index = match active_id {
            Some(active_id) => self.order.iter().position(|id| *id == active_id).unwrap_or(0),
            None => self.turn_index.min(self.order.len() - 1),
        };
    }
    fn bag_empty_and_a_rack_empty(&self) -> bool {
        self.bag.is_empty() && self.players.values().any(|p| p.rack.is_empty())
    }
    fn advance_turn(&mut self, now_ms: u64) {
        self.turn_index = (self.turn_index + 1) % self.order.len();
        self.turn_ends_at_ms = now_ms + self.turn_duration_ms;
        self.version += 1;
    }
    /// Applies the end-of-game scoring adjustment: every player loses the
    /// face value of their remaining rack; a single finisher (empty rack)
    /// additionally gains everyone else's remaining rack value.
    fn finish(&mut self) {
        let rack_sums: HashMap<String, u32> = self
            .players
            .iter()
            .map(|(id, p)| (id.clone(), p.rack.tile_sum()))
            .collect();
        let empty_rack_ids: Vec<&String> = self
            .players
            .iter()
            .filter(|(_, p)| p.rack.is_empty())
            .map(|(id, _)| id)
            .collect();

        for (id, player) in self.players.iter_mut() {
            player.score -= rack_sums[id] as i32;
        }

        if let [winner_id] = empty_rack_ids[..] {
            let bonus: u32 = rack_sums
                .iter()
                .filter(|(id, _)| id.as_str() != winner_id.as_str())
                .map(|(_, &v)| v)
                .sum();
            self.players.get_mut(winner_id).expect("winner exists").score += bonus as i32;
        }

        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use scrabble::dictionary::PermissiveDictionary;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn players() -> Vec<String> {
        vec!["a".into(), "b".into()]
    }

    #[test]
    fn start_deals_full_racks_and_sets_turn_zero() {
        let state = GameState::start(players(), Language::English, Duration::from_secs(120), &mut rng(), 0);
        assert_eq!(state.active_player_id(), "a");
        assert_eq!(state.version(), 1);
        assert_eq!(state.view_for("a").rack.unwrap().len(), 7);
        assert!(state.view_for("b").rack.is_some());
    }

    #[test]
    fn pass_advances_turn_and_counts_consecutive_passes() {
        let mut state = GameState::start(players(), Language::English, Duration::from_secs(120), &mut rng(), 0);
        let outcome = state
            .play_move("a", Action::Pass, &PermissiveDictionary, true, 6, &mut rng(), 1_000)
            .unwrap();
        assert!(!outcome.game_ended);
        assert_eq!(state.active_player_id(), "b");
        assert_eq!(state.version(), 2);
    }

    #[test]
    fn wrong_player_rejected() {
        let mut state = GameState::start(players(), Language::English, Duration::from_secs(120), &mut rng(), 0);
        let result = state.play_move("b", Action::Pass, &PermissiveDictionary, true, 6, &mut rng(), 0);
        assert_eq!(result.unwrap_err(), ErrorCode::NotYourTurn);
    }

    #[test]
    fn remove_player_reanchors_turn_to_the_same_active_player() {
        let mut state = GameState::start(
            vec!["a".into(), "b".into(), "c".into()],
            Language::English,
            Duration::from_secs(120),
            &mut rng(),
            0,
        );
        state
            .play_move("a", Action::Pass, &PermissiveDictionary, true, 6, &mut rng(), 0)
            .unwrap();
        assert_eq!(state.active_player_id(), "b");

        state.remove_player("a");
        assert_eq!(state.active_player_id(), "b");
        assert_eq!(state.players.len(), 2);
    }

    #[test]
    fn removing_last_player_finishes_the_game() {
        let mut state = GameState::start(players(), Language::English, Duration::from_secs(120), &mut rng(), 0);
        state.remove_player("a");
        state.remove_player("b");
        assert!(state.is_finished());
    }

    #[test]
    fn six_passes_ends_game_and_docks_rack_value() {
        let mut state = GameState::start(players(), Language::English, Duration::from_secs(120), &mut rng(), 0);
        let mut ended = false;
        for i in 0..6 {
            let player = if i % 2 == 0 { "a" } else { "b" };
            let outcome = state
                .play_move(player, Action::Pass, &PermissiveDictionary, true, 6, &mut rng(), 0)
                .unwrap();
            ended = outcome.game_ended;
        }
        assert!(ended);
        assert!(state.is_finished());
        // Nobody emptied their rack, so scores are <= 0 (docked only).
        assert!(state.scores().all(|(_, score)| score <= 0));
    }
}
