//! Session module - the owned game session and its state machine.
//!
//! A session moves through Idle -> Running -> Paused -> GameOver; restart
//! re-enters Running with a full reset. The session owns the board, the
//! active player, the preview queue and the hold slot; the loop drives it
//! through [`GameSession::tick`] and [`GameSession::apply_action`].

use arrayvec::ArrayVec;

use linefall_types::{
    ClearBreakdown, GameAction, Spin, BOARD_WIDTH, LOCK_REWARD, QUEUE_MIN_LEN,
};

use crate::board::Board;
use crate::collision::collides;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::rotation::resolve_rotation;
use crate::scoring;
use crate::sweep::{sweep, EffectSink};

/// The active falling piece and its grid offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl Player {
    /// Place a piece at the spawn position: horizontally centered, row 0.
    fn spawn(piece: Piece) -> Self {
        let x = ((BOARD_WIDTH - piece.size()) / 2) as i8;
        Self { piece, x, y: 0 }
    }
}

/// Accumulated session statistics, finalized at game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub breakdown: ClearBreakdown,
    pub elapsed_ms: u64,
}

/// Complete game session state.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    player: Option<Player>,
    queue: ArrayVec<Piece, QUEUE_MIN_LEN>,
    hold: Option<Piece>,
    can_hold: bool,
    rng: SimpleRng,
    stats: SessionStats,
    /// Gravity accumulator; frozen while paused.
    gravity_ms: u32,
    started: bool,
    paused: bool,
    game_over: bool,
    /// Final stats, produced exactly once per game (consumed by the caller).
    final_report: Option<SessionStats>,
}

impl GameSession {
    /// Create an idle session with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            player: None,
            queue: ArrayVec::new(),
            hold: None,
            can_hold: true,
            rng: SimpleRng::new(seed),
            stats: SessionStats {
                level: 1,
                ..SessionStats::default()
            },
            gravity_ms: 0,
            started: false,
            paused: false,
            game_over: false,
            final_report: None,
        }
    }

    /// Start the game and spawn the first piece.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Option<Player> {
        self.player
    }

    pub fn hold_piece(&self) -> Option<&Piece> {
        self.hold.as_ref()
    }

    /// Upcoming pieces, head first.
    pub fn queue(&self) -> &[Piece] {
        &self.queue
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn lines(&self) -> u32 {
        self.stats.lines
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    /// Take the final stats report. Returns Some exactly once per game over.
    pub fn take_final_report(&mut self) -> Option<SessionStats> {
        self.final_report.take()
    }

    /// Row where the active piece would land (for the ghost outline).
    pub fn ghost_y(&self) -> Option<i8> {
        let player = self.player?;
        let mut y = player.y;
        while !collides(&self.board, &player.piece, player.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Advance timers and apply gravity.
    pub fn tick(&mut self, elapsed_ms: u32, fx: &mut dyn EffectSink) {
        if !self.started || self.game_over {
            return;
        }
        // Session time keeps accruing across pauses (wall-clock playtime).
        self.stats.elapsed_ms += u64::from(elapsed_ms);
        if self.paused {
            return;
        }

        self.gravity_ms += elapsed_ms;
        if self.gravity_ms > scoring::gravity_interval_ms(self.stats.level) {
            self.down_step(fx);
        }
    }

    /// Apply a player action. Gameplay actions are only processed while
    /// running and not paused.
    pub fn apply_action(&mut self, action: GameAction, fx: &mut dyn EffectSink) -> bool {
        match action {
            GameAction::Pause => {
                if self.started && !self.game_over {
                    self.paused = !self.paused;
                    return true;
                }
                false
            }
            GameAction::Restart => {
                if self.started {
                    self.restart();
                    return true;
                }
                false
            }
            _ if !self.started || self.paused || self.game_over => false,
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::SoftDrop => {
                self.down_step(fx);
                true
            }
            GameAction::HardDrop => self.hard_drop(fx),
            GameAction::RotateCw => self.try_rotate(Spin::Cw),
            GameAction::RotateCcw => self.try_rotate(Spin::Ccw),
            GameAction::Hold => self.hold_swap(),
        }
    }

    /// One downward step: on collision the piece locks, lines are swept, the
    /// lock point is awarded and the next piece spawns.
    fn down_step(&mut self, fx: &mut dyn EffectSink) {
        self.gravity_ms = 0;
        let Some(mut player) = self.player else {
            return;
        };
        player.y += 1;
        if collides(&self.board, &player.piece, player.x, player.y) {
            self.settle(fx);
            self.stats.score += LOCK_REWARD;
            self.spawn();
        } else {
            self.player = Some(player);
        }
    }

    /// Drop to the landing row, then lock immediately. Awards 2 points per
    /// row descended and no lock point.
    fn hard_drop(&mut self, fx: &mut dyn EffectSink) -> bool {
        let Some(mut player) = self.player else {
            return false;
        };
        let mut rows: u32 = 0;
        while !collides(&self.board, &player.piece, player.x, player.y + 1) {
            player.y += 1;
            rows += 1;
        }
        self.player = Some(player);
        self.stats.score += scoring::hard_drop_score(rows);
        self.settle(fx);
        self.spawn();
        self.gravity_ms = 0;
        true
    }

    /// Merge the active piece into the board, sweep and score.
    fn settle(&mut self, fx: &mut dyn EffectSink) {
        let Some(player) = self.player.take() else {
            return;
        };
        for (cx, cy) in player.piece.filled() {
            let bx = player.x + cx as i8;
            let by = player.y + cy as i8;
            self.board.set(bx, by, Some(player.piece.kind()));
        }

        let cleared = sweep(&mut self.board, fx);
        if cleared > 0 {
            // The clear is scored at the level it was made on.
            self.stats.score += scoring::line_clear_score(cleared, self.stats.level);
            self.stats.lines += cleared;
            self.stats.level = scoring::level_for_lines(self.stats.lines);
            self.stats.breakdown.record(cleared);
        }
    }

    /// Spawn the next piece from the queue. A colliding spawn ends the game.
    fn spawn(&mut self) {
        self.refill_queue();
        let piece = self.queue.remove(0);
        let player = Player::spawn(piece);
        self.can_hold = true;
        self.player = Some(player);
        if collides(&self.board, &player.piece, player.x, player.y) {
            self.game_over = true;
            self.final_report = Some(self.stats);
        }
    }

    fn refill_queue(&mut self) {
        while self.queue.len() < QUEUE_MIN_LEN {
            let kind = self.rng.piece_kind();
            self.queue.push(Piece::of(kind));
        }
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(mut player) = self.player else {
            return false;
        };
        player.x += dx;
        if collides(&self.board, &player.piece, player.x, player.y) {
            return false;
        }
        self.player = Some(player);
        true
    }

    fn try_rotate(&mut self, spin: Spin) -> bool {
        let Some(player) = self.player.as_mut() else {
            return false;
        };
        resolve_rotation(&self.board, &mut player.piece, &mut player.x, player.y, spin)
    }

    /// Swap the active piece with the held piece (or the queue head when no
    /// piece is held). Allowed at most once per spawn.
    fn hold_swap(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(player) = self.player else {
            return false;
        };

        let incoming = match self.hold.take() {
            Some(held) => held,
            None => {
                self.refill_queue();
                self.queue.remove(0)
            }
        };
        self.hold = Some(player.piece);
        self.player = Some(Player::spawn(incoming));
        self.can_hold = false;
        true
    }

    /// Full reset into a fresh running game, keeping the RNG sequence going.
    fn restart(&mut self) {
        let seed = self.rng.state();
        *self = Self::new(seed);
        self.start();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
