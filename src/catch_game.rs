//! Timed catch game.
//!
//! Objects spawn above the playfield, fall at a constant rate and disappear
//! when they leave the bottom edge or when the player catches them. Three
//! periodic effects drive a session: the countdown, the spawner and the
//! movement step. They share one logical timeline: [`GameSession::advance`]
//! walks through every instant at which at least one of them is due and
//! applies the due effects in the fixed order countdown, movement, spawn.
//! Once the countdown ends the session nothing else runs, even effects due
//! at the same instant.

use std::time::Duration;

use crate::clock::{Periodic, TimeStep};
use crate::random::RandomSource;
use crate::rewards::{Celebration, PointsSink};

pub const SESSION_SECS: u32 = 30;
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(800);
pub const MOVE_INTERVAL: Duration = Duration::from_millis(50);

/// Vertical position of a fresh object, in percent of playfield height.
pub const SPAWN_Y: f64 = -10.0;
/// Vertical distance covered per movement step.
pub const FALL_STEP: f64 = 2.0;
/// Objects at or below this line have left the playfield.
pub const EXPIRY_Y: f64 = 110.0;
pub const SPAWN_X_MIN: f64 = 10.0;
pub const SPAWN_X_SPAN: f64 = 80.0;
/// Samples above this value spawn a rewarding object (70% of the time).
pub const PENALIZING_SHARE: f64 = 0.3;

pub const CATCH_REWARD: u32 = 10;
pub const CATCH_PENALTY: u32 = 5;
/// Final scores strictly above this earn points and a celebration.
pub const REWARD_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Category {
    Rewarding,
    Penalizing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallingObject {
    pub id: u64,
    /// Horizontal position in percent of playfield width, fixed at spawn.
    pub x: f64,
    /// Vertical position in percent of playfield height.
    pub y: f64,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    Rewarded,
    Penalized,
    /// No live object has this id (already caught or expired).
    Missed,
    /// The session is not running.
    Inactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub spawned: u32,
    pub rewarding_caught: u32,
    pub penalizing_caught: u32,
    pub expired: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    /// Points credited to the wallet, if the score qualified.
    pub points_awarded: Option<u32>,
    pub stats: GameStats,
}

#[derive(Debug)]
pub struct GameSession<R: RandomSource, P: PointsSink> {
    phase: Phase,
    score: u32,
    remaining_secs: u32,
    objects: Vec<FallingObject>,
    next_id: u64,
    countdown: Periodic,
    spawner: Periodic,
    movement: Periodic,
    stats: GameStats,
    summary: Option<GameSummary>,
    celebrations: Vec<Celebration>,
    rng: R,
    sink: P,
}

impl<R: RandomSource, P: PointsSink> GameSession<R, P> {
    pub fn new(rng: R, sink: P) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            remaining_secs: SESSION_SECS,
            objects: Vec::new(),
            next_id: 0,
            countdown: Periodic::new(COUNTDOWN_INTERVAL),
            spawner: Periodic::new(SPAWN_INTERVAL),
            movement: Periodic::new(MOVE_INTERVAL),
            stats: GameStats::default(),
            summary: None,
            celebrations: Vec::new(),
            rng,
            sink,
        }
    }

    /// Begins a fresh session. Ignored while a session is already running.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Active {
            log::debug!("game start ignored: already active");
            return false;
        }
        self.score = 0;
        self.remaining_secs = SESSION_SECS;
        self.objects.clear();
        self.stats = GameStats::default();
        self.summary = None;
        self.celebrations.clear();
        self.cancel_timers();
        self.phase = Phase::Active;
        log::info!("game started, {}s on the clock", SESSION_SECS);
        true
    }

    /// Abandons a running session without a reward, back to `Idle`.
    pub fn stop(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.cancel_timers();
        self.objects.clear();
        self.phase = Phase::Idle;
        log::debug!("game stopped with {}s left", self.remaining_secs);
    }

    pub fn catch(&mut self, id: u64) -> CatchOutcome {
        if self.phase != Phase::Active {
            return CatchOutcome::Inactive;
        }
        let Some(pos) = self.objects.iter().position(|o| o.id == id) else {
            return CatchOutcome::Missed;
        };
        let caught = self.objects.remove(pos);
        match caught.category {
            Category::Rewarding => {
                self.score += CATCH_REWARD;
                self.stats.rewarding_caught += 1;
                CatchOutcome::Rewarded
            }
            Category::Penalizing => {
                self.score = self.score.saturating_sub(CATCH_PENALTY);
                self.stats.penalizing_caught += 1;
                CatchOutcome::Penalized
            }
        }
    }

    fn cancel_timers(&mut self) {
        self.countdown.reset();
        self.spawner.reset();
        self.movement.reset();
    }

    fn on_countdown(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.end();
        }
    }

    fn on_move(&mut self) {
        for object in &mut self.objects {
            object.y += FALL_STEP;
        }
        let before = self.objects.len();
        self.objects.retain(|o| o.y < EXPIRY_Y);
        self.stats.expired += (before - self.objects.len()) as u32;
    }

    fn on_spawn(&mut self) {
        let x = SPAWN_X_MIN + self.rng.next_unit() * SPAWN_X_SPAN;
        let category = if self.rng.next_unit() > PENALIZING_SHARE {
            Category::Rewarding
        } else {
            Category::Penalizing
        };
        self.objects.push(FallingObject {
            id: self.next_id,
            x,
            y: SPAWN_Y,
            category,
        });
        self.next_id += 1;
        self.stats.spawned += 1;
    }

    fn end(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.phase = Phase::Ended;
        self.cancel_timers();

        let points_awarded = (self.score > REWARD_THRESHOLD).then(|| self.score / 2);
        if let Some(points) = points_awarded {
            self.celebrations.push(Celebration::Large);
            self.sink.credit_points(points);
        }
        self.summary = Some(GameSummary {
            score: self.score,
            points_awarded,
            stats: self.stats,
        });
        log::info!(
            "game ended with score {} ({} caught, {} expired)",
            self.score,
            self.stats.rewarding_caught + self.stats.penalizing_caught,
            self.stats.expired
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Final result of the last finished session.
    pub fn summary(&self) -> Option<GameSummary> {
        self.summary
    }

    pub fn drain_celebrations(&mut self) -> Vec<Celebration> {
        std::mem::take(&mut self.celebrations)
    }
}

impl<R: RandomSource, P: PointsSink> TimeStep for GameSession<R, P> {
    fn advance(&mut self, elapsed: Duration) {
        let mut left = elapsed;
        while self.phase == Phase::Active {
            let step = self
                .countdown
                .until_due()
                .min(self.movement.until_due())
                .min(self.spawner.until_due());
            if step > left {
                self.countdown.elapse(left);
                self.movement.elapse(left);
                self.spawner.elapse(left);
                break;
            }
            left -= step;

            let tick = self.countdown.elapse(step) > 0;
            let mv = self.movement.elapse(step) > 0;
            let spawn = self.spawner.elapse(step) > 0;

            if tick {
                self.on_countdown();
            }
            if mv && self.phase == Phase::Active {
                self.on_move();
            }
            if spawn && self.phase == Phase::Active {
                self.on_spawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};
    use crate::rewards::Wallet;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started<'a>(values: Vec<f64>, wallet: &'a Wallet) -> GameSession<ScriptedRandom, &'a Wallet> {
        let mut game = GameSession::new(ScriptedRandom::new(values), wallet);
        assert!(game.start());
        game
    }

    #[test]
    fn new_session_is_idle() {
        let wallet = Wallet::new(0);
        let mut game = GameSession::new(ScriptedRandom::new(Vec::<f64>::new()), &wallet);

        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.catch(0), CatchOutcome::Inactive);
        game.advance(Duration::from_secs(5));
        assert!(game.objects().is_empty());
        assert_eq!(game.remaining_secs(), SESSION_SECS);
    }

    #[test]
    fn start_is_ignored_while_active() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);
        game.advance(ms(2000));

        assert!(!game.start());
        assert_eq!(game.remaining_secs(), 28);
    }

    #[test]
    fn spawn_uses_random_position_and_category() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![0.5, 0.9, 0.0, 0.3], &wallet);

        game.advance(ms(799));
        assert!(game.objects().is_empty());

        game.advance(ms(1));
        assert_eq!(
            game.objects(),
            &[FallingObject {
                id: 0,
                x: 50.0,
                y: SPAWN_Y,
                category: Category::Rewarding
            }]
        );

        game.advance(ms(800));
        let second = &game.objects()[1];
        assert_eq!(second.x, 10.0);
        assert_eq!(second.category, Category::Penalizing);
    }

    #[test]
    fn objects_fall_and_expire() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);

        game.advance(ms(850));
        assert_eq!(game.objects()[0].y, SPAWN_Y + FALL_STEP);

        // 59 steps after spawning the first object sits just above the bottom edge
        game.advance(ms(2900));
        let first = game.objects().iter().find(|o| o.id == 0).unwrap();
        assert_eq!(first.y, 108.0);

        game.advance(ms(50));
        assert!(game.objects().iter().all(|o| o.id != 0));
        assert_eq!(game.stats().expired, 1);
        assert_eq!(game.catch(0), CatchOutcome::Missed);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn catching_scores_and_removes() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![0.5, 0.9, 0.5, 0.1], &wallet);
        game.advance(ms(1600));

        assert_eq!(game.catch(0), CatchOutcome::Rewarded);
        assert_eq!(game.score(), 10);
        assert_eq!(game.catch(0), CatchOutcome::Missed);
        assert_eq!(game.score(), 10);

        assert_eq!(game.catch(1), CatchOutcome::Penalized);
        assert_eq!(game.score(), 5);
        assert!(game.objects().is_empty());
    }

    #[test]
    fn penalty_is_floored_at_zero() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![0.5, 0.1], &wallet);
        game.advance(ms(800));

        assert_eq!(game.catch(0), CatchOutcome::Penalized);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn session_ends_after_thirty_seconds() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);

        game.advance(ms(29_999));
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.remaining_secs(), 1);

        game.advance(ms(1));
        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.remaining_secs(), 0);

        let frozen = game.objects().to_vec();
        game.advance(Duration::from_secs(10));
        assert_eq!(game.objects(), frozen.as_slice());
        assert_eq!(game.remaining_secs(), 0);

        let id = frozen[0].id;
        assert_eq!(game.catch(id), CatchOutcome::Inactive);
        assert!(wallet.credits().is_empty());
    }

    #[test]
    fn effects_due_with_final_tick_do_not_run() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);

        game.advance(ms(29_950));
        let before = game.objects().to_vec();
        game.advance(ms(50));

        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.objects(), before.as_slice());
    }

    #[test]
    fn high_score_credits_half_once() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);

        for _ in 0..6 {
            game.advance(ms(800));
            let newest = game.objects().last().unwrap().id;
            assert_eq!(game.catch(newest), CatchOutcome::Rewarded);
        }
        assert_eq!(game.score(), 60);

        game.advance(Duration::from_secs(30));
        game.advance(Duration::from_secs(30));

        assert_eq!(wallet.credits(), vec![30]);
        assert_eq!(game.drain_celebrations(), vec![Celebration::Large]);
        assert_eq!(
            game.summary().map(|s| s.points_awarded),
            Some(Some(30))
        );
    }

    #[test]
    fn threshold_score_is_not_rewarded() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);

        for _ in 0..5 {
            game.advance(ms(800));
            let newest = game.objects().last().unwrap().id;
            game.catch(newest);
        }
        game.advance(Duration::from_secs(30));

        assert_eq!(game.summary().map(|s| s.score), Some(50));
        assert!(wallet.credits().is_empty());
        assert!(game.drain_celebrations().is_empty());
    }

    #[test]
    fn restart_after_end_resets_everything() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![0.5, 0.9], &wallet);
        game.advance(ms(800));
        game.catch(0);
        game.advance(Duration::from_secs(30));
        assert_eq!(game.phase(), Phase::Ended);

        assert!(game.start());
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.score(), 0);
        assert_eq!(game.remaining_secs(), SESSION_SECS);
        assert!(game.objects().is_empty());
        assert_eq!(game.summary(), None);
        assert_eq!(game.stats(), GameStats::default());
    }

    #[test]
    fn stop_returns_to_idle_without_reward() {
        let wallet = Wallet::new(0);
        let mut game = started(vec![], &wallet);
        game.advance(ms(5000));
        game.stop();

        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.objects().is_empty());
        game.advance(Duration::from_secs(60));
        assert!(wallet.credits().is_empty());
        assert!(game.start());
    }

    #[test]
    fn one_large_step_matches_many_small_steps() {
        let wallet = Wallet::new(0);
        let mut coarse = GameSession::new(SeededRandom::new(42), &wallet);
        let mut fine = GameSession::new(SeededRandom::new(42), &wallet);
        coarse.start();
        fine.start();

        coarse.advance(ms(12_345));
        for _ in 0..12_345 / 15 {
            fine.advance(ms(15));
        }
        fine.advance(ms(12_345 % 15));

        assert_eq!(coarse.remaining_secs(), fine.remaining_secs());
        assert_eq!(coarse.objects(), fine.objects());
        assert_eq!(coarse.stats(), fine.stats());
    }
}
