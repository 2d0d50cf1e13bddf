//! Tick-driven turn coordinator.
//!
//! One [`Coordinator`] owns one session: the published [`GameState`], the seats and
//! their strategies, the dice source, undo history and every pacing timer. It is the
//! only writer. An external loop calls [`Coordinator::tick`] once per frame and forwards
//! user input through the action methods (or [`Coordinator::handle_message`] for wire
//! JSON). Nothing blocks: the roll animation, automated-turn delays, hold/score previews
//! and the turn banner are deadlines compared against the tick clock.
//!
//! A human action arriving while a roll animates, during a banner, or on an automated
//! turn is rejected, never queued.

use serde::Serialize;
use thiserror::Error;

use yh_core::{
    apply_hold_mask, can_roll, can_select_category, can_toggle_hold, initial_state,
    legal_categories, potential_score, roll, score_in_context, select_category, toggle_hold,
    Action, Category, ChanceConfig, ChanceMode, Config, ConfigError, GameState, HoldMask,
    PacingPreset, PlayerConfig, MAX_PLAYERS,
};
use yh_logging::{EventRecordV1, GameEvent, NdjsonError, NdjsonWriter};
use yh_strategy::Strategy;

use crate::pacing::Pacing;
use crate::protocol::ClientAction;
use crate::snapshot::{
    DieView, LastTurn, PlayerView, PotentialScore, ScorecardView, Snapshot, TurnBanner,
};
use crate::undo::UndoStack;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session needs at least one player")]
    NoPlayers,
    #[error("too many players: {count} (max {max})")]
    TooManyPlayers { count: usize, max: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Externally visible stage of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No roll yet this turn.
    AwaitingRoll,
    /// Roll animation in progress; the new dice are not published yet.
    Rolling,
    AwaitingHoldOrRoll,
    /// All three rolls used.
    AwaitingScore,
    TurnTransition,
    GameOver,
    /// An internally inconsistent state was produced. Only `reset` is accepted.
    Faulted,
}

#[derive(Debug, Default, Clone)]
pub struct CoordinatorStats {
    pub ticks: u64,
    /// Published engine transitions.
    pub transitions: u64,
    pub ai_decisions: u64,
    /// Human actions refused by a precondition.
    pub rejected: u64,
    pub undos: u64,
}

/// In-flight roll: already computed, published when the animation ends.
#[derive(Debug, Clone)]
struct PendingRoll {
    state: GameState,
    due: u64,
}

/// What an automated seat is doing between decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AiStep {
    /// Counting down `ai_delay`.
    Waiting { due: Option<u64> },
    /// Chosen holds are applied and visible; roll when due.
    ShowHolds { due: u64 },
    /// Chosen category is visible; commit when due.
    ShowScore { category: Category, due: u64 },
}

struct Seat {
    config: PlayerConfig,
    strategy: Option<Strategy>,
}

pub struct Coordinator {
    state: GameState,
    seats: Vec<Seat>,
    chance: ChanceMode,
    pacing: Pacing,
    undo: UndoStack,
    transition_ticks: u32,

    now: u64,
    rolling: Option<PendingRoll>,
    transition_until: Option<u64>,
    ai_step: AiStep,
    ai_reason: String,

    confirm_zero: Option<Category>,
    selected: Option<Category>,
    last_turn: Option<LastTurn>,
    fault: Option<String>,

    events: Vec<EventRecordV1>,
    stats: CoordinatorStats,
}

fn strategy_seed(seed: u64, seat: usize) -> u64 {
    seed ^ 0x9E37_79B9_7F4A_7C15u64.wrapping_mul(seat as u64 + 1)
}

impl Coordinator {
    /// Start a session for `config.players`. Multiplayer sessions open with a banner.
    pub fn new(config: Config) -> Result<Self, SessionError> {
        let count = config.players.len();
        if count == 0 {
            return Err(SessionError::NoPlayers);
        }
        if count > MAX_PLAYERS {
            return Err(SessionError::TooManyPlayers {
                count,
                max: MAX_PLAYERS,
            });
        }
        config.validate()?;

        let seed = config.session.seed.unwrap_or_else(rand::random);
        let chance = match config.session.chance {
            ChanceConfig::Rng => ChanceMode::rng(seed),
            ChanceConfig::EventKeyed => ChanceMode::event_keyed(seed),
        };
        let seats = config
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| Seat {
                config: p.clone(),
                strategy: p
                    .controller
                    .strategy()
                    .map(|kind| Strategy::new(kind, &config.strategies, strategy_seed(seed, i))),
            })
            .collect();

        let mut c = Self {
            state: initial_state(count),
            seats,
            chance,
            pacing: Pacing::new(config.pacing.clone()),
            undo: UndoStack::new(config.session.undo_depth),
            transition_ticks: config.session.turn_transition_ticks,
            now: 0,
            rolling: None,
            transition_until: None,
            ai_step: AiStep::Waiting { due: None },
            ai_reason: String::new(),
            confirm_zero: None,
            selected: None,
            last_turn: None,
            fault: None,
            events: Vec::new(),
            stats: CoordinatorStats::default(),
        };
        c.begin_turn();
        Ok(c)
    }

    /// Session with default settings for `players`.
    pub fn with_players(players: Vec<PlayerConfig>) -> Result<Self, SessionError> {
        Self::new(Config::with_players(players))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &CoordinatorStats {
        &self.stats
    }

    /// Ticks since the session was created.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerConfig> {
        self.seats.iter().map(|s| &s.config)
    }

    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn phase(&self) -> Phase {
        if self.fault.is_some() {
            Phase::Faulted
        } else if self.state.game_over {
            Phase::GameOver
        } else if self.transition_until.is_some() {
            Phase::TurnTransition
        } else if self.rolling.is_some() {
            Phase::Rolling
        } else if self.state.rolls_used == 0 {
            Phase::AwaitingRoll
        } else if can_roll(&self.state) {
            Phase::AwaitingHoldOrRoll
        } else {
            Phase::AwaitingScore
        }
    }

    pub fn is_human_turn(&self) -> bool {
        self.seats[self.state.current_player].config.is_human()
    }

    pub fn has_any_ai(&self) -> bool {
        self.seats.iter().any(|s| s.strategy.is_some())
    }

    pub fn can_undo(&self) -> bool {
        self.human_ready() && !self.undo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Human input is accepted only on a human turn with nothing animating.
    fn human_ready(&self) -> bool {
        matches!(
            self.phase(),
            Phase::AwaitingRoll | Phase::AwaitingHoldOrRoll | Phase::AwaitingScore
        ) && self.is_human_turn()
    }

    fn reject(&mut self) -> bool {
        self.stats.rejected += 1;
        false
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(EventRecordV1::now(event));
    }

    /// Buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<EventRecordV1> {
        std::mem::take(&mut self.events)
    }

    /// Drain buffered events into `writer`. Returns how many were written.
    pub fn write_events(&mut self, writer: &mut NdjsonWriter) -> Result<usize, NdjsonError> {
        let events = self.drain_events();
        writer.write_all(&events)?;
        Ok(events.len())
    }

    /// Validate and install `next`. An invalid state faults the session instead.
    pub(crate) fn publish(&mut self, next: GameState) -> bool {
        if let Err(e) = next.validate() {
            self.fault = Some(e.to_string());
            self.rolling = None;
            self.transition_until = None;
            self.ai_step = AiStep::Waiting { due: None };
            self.emit(GameEvent::Fault {
                message: e.to_string(),
            });
            return false;
        }
        self.state = next;
        self.stats.transitions += 1;
        true
    }

    /// Banner (multiplayer only) and `turn_start` for the current player.
    fn begin_turn(&mut self) {
        if self.seats.len() > 1 && self.transition_ticks > 0 {
            self.transition_until = Some(self.now + u64::from(self.transition_ticks));
        }
        self.emit_turn_start();
    }

    fn emit_turn_start(&mut self) {
        let player = self.state.current_player;
        self.emit(GameEvent::TurnStart {
            player,
            name: self.seats[player].config.name.clone(),
            round: self.state.current_round,
        });
    }

    fn start_roll(&mut self) {
        let next = roll(&self.state, &mut self.chance);
        self.rolling = Some(PendingRoll {
            state: next,
            due: self.now + u64::from(self.pacing.ticks().roll_animation),
        });
    }

    fn finish_roll(&mut self, pending: PendingRoll) {
        if self.publish(pending.state) {
            self.emit(GameEvent::Roll {
                player: self.state.current_player,
                round: self.state.current_round,
                roll: self.state.rolls_used,
                dice: self.state.faces(),
            });
        }
    }

    fn emit_hold(&mut self) {
        self.emit(GameEvent::Hold {
            player: self.state.current_player,
            held: self.state.held_mask().indices().collect(),
        });
    }

    /// Commit `category` for the acting player and hand the turn on.
    fn commit_score(&mut self, category: Category) -> bool {
        let player = self.state.current_player;
        let next = select_category(&self.state, category);
        if next.log.len() == self.state.log.len() || !self.publish(next) {
            return false;
        }
        if let Some(rec) = self.state.log.last().cloned() {
            self.emit(GameEvent::Score {
                player: rec.player,
                round: rec.round,
                category: rec.category,
                score: rec.score,
                yahtzee_bonus: rec.yahtzee_bonus,
            });
            self.last_turn = Some(LastTurn {
                player,
                name: self.seats[player].config.name.clone(),
                category: rec.category,
                score: rec.score,
            });
        }
        self.on_turn_scored();
        true
    }

    fn on_turn_scored(&mut self) {
        self.ai_step = AiStep::Waiting { due: None };
        self.ai_reason.clear();
        self.confirm_zero = None;
        self.selected = None;
        self.undo.clear();
        if self.state.game_over {
            self.emit(GameEvent::GameOver {
                grand_totals: self.state.grand_totals(),
            });
            return;
        }
        self.begin_turn();
    }

    /// Advance the clock by one tick and run whatever is due.
    ///
    /// Order: turn banner, roll animation, automated hold preview, automated score
    /// preview, then the automated player's paced decision. Each tick does at most one
    /// of these.
    pub fn tick(&mut self) {
        self.now += 1;
        self.stats.ticks += 1;
        if self.fault.is_some() || self.state.game_over {
            return;
        }

        if let Some(due) = self.transition_until {
            if self.now >= due {
                self.transition_until = None;
            }
            return;
        }

        if let Some(pending) = self.rolling.take() {
            if self.now >= pending.due {
                self.finish_roll(pending);
            } else {
                self.rolling = Some(pending);
            }
            return;
        }

        match self.ai_step {
            AiStep::ShowHolds { due } => {
                if self.now >= due {
                    self.ai_step = AiStep::Waiting { due: None };
                    self.start_roll();
                }
                return;
            }
            AiStep::ShowScore { category, due } => {
                if self.now >= due {
                    self.ai_step = AiStep::Waiting { due: None };
                    self.commit_score(category);
                }
                return;
            }
            AiStep::Waiting { .. } => {}
        }

        if self.seats[self.state.current_player].strategy.is_some() {
            self.tick_ai();
        }
    }

    fn tick_ai(&mut self) {
        let ticks = self.pacing.ticks();
        let due = match self.ai_step {
            AiStep::Waiting { due: Some(d) } => d,
            _ => self.now + u64::from(ticks.ai_delay.saturating_sub(1)),
        };
        if self.now < due {
            self.ai_step = AiStep::Waiting { due: Some(due) };
            return;
        }
        self.ai_step = AiStep::Waiting { due: None };

        if self.state.rolls_used == 0 {
            self.start_roll();
            return;
        }

        let player = self.state.current_player;
        let Some(strategy) = self.seats[player].strategy.as_mut() else {
            return;
        };
        let decision = strategy.decide(&self.state);
        self.stats.ai_decisions += 1;
        self.ai_reason = decision.reason;

        let show_until = self.now + u64::from(ticks.hold_show);
        match decision.action {
            Action::Reroll { hold } if can_roll(&self.state) => {
                self.ai_show_holds(hold, show_until)
            }
            Action::Reroll { .. } => {
                // No rolls left: first legal category.
                let faces = self.state.faces();
                let legal = legal_categories(&faces, self.state.current_scorecard());
                if let Some(category) = legal.first() {
                    self.ai_step = AiStep::ShowScore {
                        category,
                        due: show_until,
                    };
                }
            }
            Action::Score(category) => {
                self.ai_step = AiStep::ShowScore {
                    category,
                    due: show_until,
                };
            }
        }
    }

    fn ai_show_holds(&mut self, hold: HoldMask, due: u64) {
        let next = apply_hold_mask(&self.state, hold);
        if next != self.state {
            if !self.publish(next) {
                return;
            }
            self.emit_hold();
        }
        self.ai_step = AiStep::ShowHolds { due };
    }

    /// Human roll request. The new dice appear once the animation ends.
    pub fn roll(&mut self) -> bool {
        if !self.human_ready() || !can_roll(&self.state) {
            return self.reject();
        }
        self.undo.push(self.state.clone());
        self.confirm_zero = None;
        self.start_roll();
        true
    }

    pub fn toggle_hold(&mut self, die_index: usize) -> bool {
        if !self.human_ready() || !can_toggle_hold(&self.state, die_index) {
            return self.reject();
        }
        let prev = self.state.clone();
        if !self.publish(toggle_hold(&prev, die_index)) {
            return false;
        }
        self.undo.push(prev);
        self.confirm_zero = None;
        self.emit_hold();
        true
    }

    /// Human score request. A choice that would score 0 opens a confirmation prompt
    /// instead of committing; returns true only when the score was committed.
    pub fn request_score(&mut self, category: Category) -> bool {
        if !self.human_ready() || !can_select_category(&self.state, category) {
            return self.reject();
        }
        let points =
            score_in_context(category, &self.state.faces(), self.state.current_scorecard());
        if points == 0 {
            self.confirm_zero = Some(category);
            return false;
        }
        self.selected = Some(category);
        self.commit_human_score(category)
    }

    /// Scoring ends the turn, which clears the undo history, so nothing is pushed here.
    fn commit_human_score(&mut self, category: Category) -> bool {
        self.commit_score(category) || self.reject()
    }

    /// Resolve a pending zero-score prompt: `true` commits it, `false` dismisses it.
    pub fn confirm_zero(&mut self, accept: bool) -> bool {
        let Some(category) = self.confirm_zero.take() else {
            return false;
        };
        if !accept {
            return true;
        }
        if !self.human_ready() || !can_select_category(&self.state, category) {
            return self.reject();
        }
        self.commit_human_score(category)
    }

    pub fn pending_zero_confirmation(&self) -> Option<Category> {
        self.confirm_zero
    }

    /// Move the category cursor to the next (`+1`) or previous (`-1`) open category of
    /// the current player, wrapping. From no selection it starts at the first or last
    /// open category.
    pub fn navigate(&mut self, direction: i32) -> Option<Category> {
        if self.fault.is_some() || direction == 0 {
            return self.selected;
        }
        let open: Vec<Category> = self.state.current_scorecard().open().iter().collect();
        if open.is_empty() {
            self.selected = None;
            return None;
        }
        let forward = direction > 0;
        let n = open.len();
        let next = match self.selected.and_then(|c| open.iter().position(|&o| o == c)) {
            Some(pos) if forward => (pos + 1) % n,
            Some(pos) => (pos + n - 1) % n,
            None if forward => 0,
            None => n - 1,
        };
        self.selected = Some(open[next]);
        self.selected
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected
    }

    /// Restore the state before the last human transition of this turn.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return self.reject();
        }
        let Some(prev) = self.undo.pop() else {
            return self.reject();
        };
        self.state = prev;
        self.confirm_zero = None;
        self.stats.undos += 1;
        self.emit(GameEvent::Undo {
            player: self.state.current_player,
            rolls_used: self.state.rolls_used,
        });
        true
    }

    /// New game with the same seats. Cancels every timer and clears a fault.
    pub fn reset(&mut self) {
        self.state = initial_state(self.seats.len());
        self.rolling = None;
        self.transition_until = None;
        self.ai_step = AiStep::Waiting { due: None };
        self.ai_reason.clear();
        self.confirm_zero = None;
        self.selected = None;
        self.last_turn = None;
        self.fault = None;
        self.undo.clear();
        self.emit(GameEvent::Reset {
            players: self.seats.len(),
        });
        self.begin_turn();
    }

    /// `+1` faster, `-1` slower. False at either end.
    pub fn adjust_pacing(&mut self, direction: i32) -> bool {
        self.pacing.adjust(direction)
    }

    pub fn speed(&self) -> PacingPreset {
        self.pacing.preset()
    }

    /// Apply one wire action. Returns whether it changed anything.
    pub fn apply_client_action(&mut self, action: ClientAction) -> bool {
        match action {
            ClientAction::Roll => self.roll(),
            ClientAction::Hold { die_index } => self.toggle_hold(die_index),
            ClientAction::Score { category } => match Category::from_name(&category) {
                Some(c) => self.request_score(c) || self.confirm_zero == Some(c),
                None => self.reject(),
            },
            ClientAction::ConfirmZeroYes => self.confirm_zero(true),
            ClientAction::ConfirmZeroNo => self.confirm_zero(false),
            ClientAction::NavigateCategory { direction } => {
                let before = self.selected;
                self.navigate(direction) != before
            }
            ClientAction::Undo => self.undo(),
            ClientAction::Reset => {
                self.reset();
                true
            }
            ClientAction::SpeedUp => self.adjust_pacing(1),
            ClientAction::SpeedDown => self.adjust_pacing(-1),
        }
    }

    /// Parse and apply one JSON wire message. Unparseable messages are ignored.
    pub fn handle_message(&mut self, msg: &str) -> bool {
        match ClientAction::parse(msg) {
            Ok(action) => self.apply_client_action(action),
            Err(_) => self.reject(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let card = self.state.current_scorecard();
        let faces = self.state.faces();
        let potential_scores = if self.state.rolls_used > 0 && !self.state.game_over {
            card.open()
                .iter()
                .map(|category| PotentialScore {
                    category,
                    score: potential_score(category, &faces, card),
                })
                .collect()
        } else {
            Vec::new()
        };
        let turn_transition = self.transition_until.map(|_| {
            let next = self.state.current_player;
            TurnBanner {
                next_player: next,
                next_player_name: self.seats[next].config.name.clone(),
                round: self.state.current_round,
                last_turn: self.last_turn.clone(),
            }
        });
        let ai_score_choice = match self.ai_step {
            AiStep::ShowScore { category, .. } => Some(category),
            _ => None,
        };

        Snapshot {
            phase: self.phase(),
            dice: self.state.dice.iter().copied().map(DieView::from).collect(),
            rolls_used: self.state.rolls_used,
            rolls_remaining: self.state.rolls_remaining(),
            current_round: self.state.current_round,
            game_over: self.state.game_over,
            is_rolling: self.rolling.is_some(),
            can_roll: self.human_ready() && can_roll(&self.state),
            can_undo: self.can_undo(),
            is_human_turn: self.is_human_turn(),
            has_any_ai: self.has_any_ai(),
            ai_reason: self.ai_reason.clone(),
            ai_score_choice,
            scorecard: ScorecardView::from(card),
            potential_scores,
            num_players: self.seats.len(),
            current_player_index: self.state.current_player,
            players: self.seats.iter().map(|s| PlayerView::from(&s.config)).collect(),
            all_scorecards: self
                .state
                .scorecards
                .iter()
                .map(|c| ScorecardView::from(c.as_ref()))
                .collect(),
            turn_transition,
            last_turn: self.last_turn.clone(),
            speed: self.pacing.preset(),
            confirm_zero_category: self.confirm_zero,
            selected_category: self.selected,
            fault: self.fault.clone(),
        }
    }
}
