//! Frame controller
//!
//! Owns the scene and the session and decides, each display refresh, whether
//! the scene advances. All mutation happens synchronously inside `frame` and
//! the key/dialog handlers; nothing runs concurrently.

use crate::config::GameConfig;
use crate::session::{Dialog, DismissAction, Outcome, Session, SessionPhase};
use crate::sim::{GameEvent, Scene, TickInput};

/// A running game instance
pub struct Game {
    pub config: GameConfig,
    pub scene: Scene,
    pub session: Session,
    /// Frame time not yet simulated (below the physics step floor)
    accumulator: f32,
    /// Seed of the current scene
    seed: u64,
}

impl Game {
    /// Build the first scene and show the start screen
    pub fn new(config: GameConfig, seed: u64, dialog: &mut impl Dialog) -> Self {
        let scene = Scene::new(&config, seed);
        let mut session = Session::new();
        session.start(dialog);
        log::info!(
            "Game ready: {}x{}, {} lanes, seed {}",
            config.width,
            config.height,
            config.lane_count(),
            seed
        );
        Self {
            config,
            scene,
            session,
            accumulator: 0.0,
            seed,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One display refresh: at most one simulation step
    ///
    /// Returns the events of the step, if one ran.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &TickInput,
        dialog: &mut impl Dialog,
    ) -> Vec<GameEvent> {
        if !self.session.is_running() {
            return Vec::new();
        }

        self.accumulator += dt.max(0.0);
        if self.accumulator < self.config.min_step_secs() {
            return Vec::new();
        }
        let step = self.accumulator;
        self.accumulator = 0.0;

        let events = self.scene.step(input, step);
        for event in &events {
            match *event {
                GameEvent::Crushed { block_id } => {
                    if self.session.finish(Outcome::Lost, dialog) {
                        log::info!("Crushed by block {}", block_id);
                    }
                }
                GameEvent::ReachedTop => {
                    if self.session.finish(Outcome::Won, dialog) {
                        log::info!("Reached the top after {:.1}s", self.scene.time_ms / 1000.0);
                    }
                }
                GameEvent::BlockSpawned { .. } | GameEvent::BlockDestroyed { .. } => {}
            }
        }
        events
    }

    /// Pause key went down
    pub fn on_pause_key(&mut self, dialog: &mut impl Dialog) {
        if let Some(action) = self.session.handle_pause_key(dialog) {
            self.apply_dismiss(action);
        }
    }

    /// Dialog's primary button
    pub fn dismiss(&mut self, dialog: &mut impl Dialog) -> Option<DismissAction> {
        let action = self.session.dismiss(dialog)?;
        self.apply_dismiss(action);
        Some(action)
    }

    fn apply_dismiss(&mut self, action: DismissAction) {
        // Frame time that piled up behind the dialog is never simulated
        self.accumulator = 0.0;
        if action == DismissAction::Restart {
            self.restart();
        }
    }

    /// Fresh scene with the next seed
    fn restart(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.scene = Scene::new(&self.config, self.seed);
        log::info!("Scene restarted with seed: {}", self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RecordingDialog;
    use crate::sim::SpawnTimer;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> (Game, RecordingDialog) {
        let mut dialog = RecordingDialog::default();
        let game = Game::new(GameConfig::default(), 4242, &mut dialog);
        (game, dialog)
    }

    fn run(game: &mut Game, dialog: &mut RecordingDialog, frames: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(game.frame(DT, &TickInput::default(), dialog));
        }
        events
    }

    #[test]
    fn test_start_screen_halts_simulation() {
        let (mut game, mut dialog) = game();
        assert_eq!(game.phase(), SessionPhase::Initial);
        let shown = dialog.shown.unwrap();
        assert_eq!((shown.title, shown.button), ("Drop And Climb", "Start"));

        let before = game.scene.player.pos;
        let events = run(&mut game, &mut dialog, 120);
        assert!(events.is_empty());
        assert_eq!(game.scene.player.pos, before);
        assert_eq!(game.scene.time_ms, 0.0);
    }

    #[test]
    fn test_start_runs_and_spawns_every_interval() {
        let (mut game, mut dialog) = game();
        assert_eq!(game.dismiss(&mut dialog), Some(DismissAction::Resume));
        assert_eq!(game.phase(), SessionPhase::Running);
        assert!(dialog.shown.is_none());

        let events = run(&mut game, &mut dialog, 61);
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BlockSpawned { .. }))
            .count();
        assert_eq!(spawned, 2);
    }

    #[test]
    fn test_escape_pauses_and_resumes_exactly() {
        let (mut game, mut dialog) = game();
        game.dismiss(&mut dialog);
        run(&mut game, &mut dialog, 10);

        game.on_pause_key(&mut dialog);
        assert_eq!(game.phase(), SessionPhase::Paused);
        assert!(game.session.escape_closes_dialog());
        let shown = dialog.shown.unwrap();
        assert_eq!((shown.title, shown.button), ("Paused", "Resume"));

        let pos = game.scene.player.pos;
        let vel = game.scene.player.vel;
        let blocks: Vec<_> = game.scene.blocks.iter().map(|b| (b.pos, b.vel)).collect();
        let time = game.scene.time_ms;
        run(&mut game, &mut dialog, 120);

        game.on_pause_key(&mut dialog);
        assert_eq!(game.phase(), SessionPhase::Running);
        assert!(dialog.shown.is_none());
        assert_eq!(game.scene.player.pos, pos);
        assert_eq!(game.scene.player.vel, vel);
        let after: Vec<_> = game.scene.blocks.iter().map(|b| (b.pos, b.vel)).collect();
        assert_eq!(after, blocks);
        assert_eq!(game.scene.time_ms, time);
    }

    #[test]
    fn test_reaching_ceiling_wins_and_restarts() {
        let (mut game, mut dialog) = game();
        game.dismiss(&mut dialog);
        run(&mut game, &mut dialog, 40);
        assert!(game.scene.time_ms > 0.0);

        // Clear the column the player teleports into
        game.scene
            .blocks
            .retain(|b| b.right() < 370.0 || b.left() > 430.0);
        game.scene.spawner = SpawnTimer::new(1.0e9);
        game.scene.player.reset_center(Vec2::new(400.0, 52.0));
        game.scene.player.vel = Vec2::new(0.0, -600.0);
        let events = game.frame(DT, &TickInput::default(), &mut dialog);
        assert!(events.contains(&GameEvent::ReachedTop));
        assert_eq!(game.phase(), SessionPhase::Won);
        let shown = dialog.shown.unwrap();
        assert_eq!((shown.title, shown.button), ("You Win!", "Play Again"));

        // Halted while the dialog is up
        let time = game.scene.time_ms;
        run(&mut game, &mut dialog, 30);
        assert_eq!(game.scene.time_ms, time);

        // Escape can't skip the win screen
        game.on_pause_key(&mut dialog);
        assert_eq!(game.phase(), SessionPhase::Won);

        let seed = game.seed();
        assert_eq!(game.dismiss(&mut dialog), Some(DismissAction::Restart));
        assert_eq!(game.phase(), SessionPhase::Initial);
        assert_eq!(dialog.shown.unwrap().title, "Drop And Climb");
        assert_eq!(game.seed(), seed + 1);
        assert_eq!(game.scene.block_count(), 1);
        assert_eq!(game.scene.time_ms, 0.0);
        assert_eq!(game.scene.player.center(), Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_crush_loses() {
        let (mut game, mut dialog) = game();
        game.dismiss(&mut dialog);
        run(&mut game, &mut dialog, 30);

        game.scene.blocks.clear();
        game.scene.spawner = SpawnTimer::new(1.0e9);
        let config = game.config.clone();
        let mut block = crate::sim::spawner::spawn_block(999, 0, &config);
        let player = &game.scene.player;
        block.reset_center(Vec2::new(player.center().x, player.top() - 27.0));
        block.vel = Vec2::new(0.0, 300.0);
        game.scene.blocks.push(block);

        game.frame(DT, &TickInput::default(), &mut dialog);
        assert_eq!(game.phase(), SessionPhase::Lost);
        let shown = dialog.shown.unwrap();
        assert_eq!((shown.title, shown.button), ("Game Over!", "Play Again"));
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut dialog = RecordingDialog::default();
        let config = GameConfig {
            physics_fps: 30.0,
            ..GameConfig::default()
        };
        let mut game = Game::new(config, 1, &mut dialog);
        game.dismiss(&mut dialog);

        assert!(game.frame(0.02, &TickInput::default(), &mut dialog).is_empty());
        assert_eq!(game.scene.time_ms, 0.0);
        game.frame(0.02, &TickInput::default(), &mut dialog);
        assert!((game.scene.time_ms - 40.0).abs() < 1e-3);
    }
}
