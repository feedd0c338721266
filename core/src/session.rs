use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Any state goes back to NotStarted on restart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No reveal yet, mines are not placed
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        use GameStatus::*;
        match self {
            NotStarted => false,
            InProgress => false,
            Won => true,
            Lost => true,
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One game from the first click to a win or loss, plus pause and restart.
///
/// The session owns its board and timer and is their only mutator. Callers
/// read state through the accessors and act through [`Session::reveal`] and
/// [`Session::toggle_mark`], which return `Ok(None)` while the game is paused
/// or over.
#[derive(Clone, Debug)]
pub struct Session<R = ClassicRules, C = SystemClock> {
    settings: SessionSettings,
    rules: R,
    board: Board,
    timer: Timer<C>,
    status: GameStatus,
    paused: bool,
    remaining_flags: CellCount,
    rng: SmallRng,
}

impl<R: Rules> Session<R> {
    pub fn new(settings: SessionSettings, rules: R) -> Result<Self> {
        Self::with_clock(settings, rules, None, SystemClock)
    }

    /// Session whose boards are drawn from a fixed seed, restarts included.
    pub fn with_seed(settings: SessionSettings, rules: R, seed: u64) -> Result<Self> {
        Self::with_clock(settings, rules, Some(seed), SystemClock)
    }
}

impl<R: Rules, C: Clock> Session<R, C> {
    pub fn with_clock(
        settings: SessionSettings,
        rules: R,
        seed: Option<u64>,
        clock: C,
    ) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed.unwrap_or_else(entropy_seed));
        let board = Board::with_rng(settings, SmallRng::from_rng(&mut rng))?;
        log::debug!(
            "New session {}x{} with {} mines",
            settings.width,
            settings.height,
            settings.mine_count
        );
        Ok(Self {
            settings,
            rules,
            board,
            timer: Timer::with_clock(clock),
            status: GameStatus::NotStarted,
            paused: false,
            remaining_flags: settings.mine_count,
            rng,
        })
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    /// Flags the player can still place, what a HUD shows as mines left.
    pub fn remaining_flags(&self) -> CellCount {
        self.remaining_flags
    }

    pub fn used_flags(&self) -> CellCount {
        self.settings.mine_count - self.remaining_flags
    }

    /// Whether reveal and mark actions are currently accepted.
    pub fn can_act(&self) -> bool {
        !self.paused && !self.status.is_final()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Option<ActionResult>> {
        if !self.can_act() {
            log::debug!("Reveal at {:?} rejected in {:?}", coords, self.status);
            return Ok(None);
        }

        let result = self.rules.reveal(&mut self.board, coords)?;

        if self.status.is_initial() {
            self.status = GameStatus::InProgress;
            self.timer.start();
            log::debug!("Game started at {:?}", coords);
        }

        if result.exploded {
            self.finish(GameStatus::Lost);
        } else if result.won {
            self.finish(GameStatus::Won);
        }

        Ok(Some(result))
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<Option<FlagDelta>> {
        if !self.can_act() {
            log::debug!("Mark at {:?} rejected in {:?}", coords, self.status);
            return Ok(None);
        }

        let delta = self.rules.toggle_mark(&mut self.board, coords)?;
        if !delta.is_neutral() {
            self.apply_flag_delta(delta);
        }
        Ok(Some(delta))
    }

    fn apply_flag_delta(&mut self, delta: FlagDelta) {
        let max = i32::from(self.settings.mine_count);
        let next = i32::from(self.remaining_flags) - i32::from(delta.value());
        let clamped = next.clamp(0, max);
        if clamped != next {
            log::warn!("Flag counter clamped from {} to {}", next, clamped);
        }
        self.remaining_flags = CellCount::try_from(clamped).unwrap_or_default();
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.timer.pause();
        log::debug!(
            "Game ended {:?} after {} seconds",
            status,
            self.timer.elapsed_seconds()
        );
    }

    /// Pauses a game in progress, otherwise does nothing.
    pub fn pause(&mut self) {
        if self.paused || !matches!(self.status, GameStatus::InProgress) {
            return;
        }
        self.paused = true;
        self.timer.pause();
    }

    /// Clears the pause flag, and restarts the clock if the game is still in progress.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if matches!(self.status, GameStatus::InProgress) {
            self.timer.resume();
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Starts over on a fresh board with the same settings.
    pub fn restart(&mut self) {
        let rng = SmallRng::from_rng(&mut self.rng);
        self.board.reset_with_rng(rng);
        self.reset_state();
        log::debug!("Session restarted");
    }

    /// Switches to new settings and restarts, leaving the session untouched if they are invalid.
    pub fn set_settings(&mut self, settings: SessionSettings) -> Result<()> {
        settings.validate()?;
        let board = Board::with_rng(settings, SmallRng::from_rng(&mut self.rng))?;
        self.settings = settings;
        self.board = board;
        self.reset_state();
        log::debug!(
            "Session switched to {}x{} with {} mines",
            settings.width,
            settings.height,
            settings.mine_count
        );
        Ok(())
    }

    fn reset_state(&mut self) {
        self.timer.reset();
        self.status = GameStatus::NotStarted;
        self.paused = false;
        self.remaining_flags = self.settings.mine_count;
    }
}
