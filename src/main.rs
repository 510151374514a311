//! Headless demo: the autopilot plays a session on a simulated clock

use space_impact::Game;
use space_impact::audio::LogAudio;
use space_impact::consts::SIM_STEP_MS;
use space_impact::input::Autopilot;
use space_impact::persistence::{FileBackend, Storage};
use space_impact::platform;
use space_impact::render::{RenderView, Renderer};
use space_impact::sim::{Command, GamePhase};
use space_impact::ui::LogUi;

/// Keeps simple per-frame statistics instead of drawing
#[derive(Debug, Default)]
struct StatsRenderer {
    frames: u64,
    peak_enemies: usize,
    peak_particles: usize,
}

impl Renderer for StatsRenderer {
    fn draw(&mut self, view: &RenderView<'_>) {
        self.frames += 1;
        self.peak_enemies = self.peak_enemies.max(view.enemies.len());
        self.peak_particles = self.peak_particles.max(view.particles.len());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = platform::seed();
    let demo_secs = platform::demo_seconds();
    let save_path = platform::save_path();
    log::info!("Space Impact demo starting (seed {seed}, {demo_secs}s, save {})", save_path.display());

    let storage = Storage::open(Box::new(FileBackend::new(save_path)));
    let mut game = Game::new(seed, storage)
        .with_audio(Box::new(LogAudio))
        .with_ui(Box::new(LogUi));

    game.command(Command::Start);

    let input = Autopilot;
    let mut renderer = StatsRenderer::default();
    let total_frames = (demo_secs as f64 * 1000.0 / SIM_STEP_MS) as u64;
    let mut time = 0.0;

    for _ in 0..total_frames {
        game.frame(time, &input, &mut renderer);
        time += SIM_STEP_MS;

        match game.state().phase {
            GamePhase::LevelComplete => {
                game.command(Command::NextLevel);
            }
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    if game.state().phase != GamePhase::GameOver {
        game.forfeit();
    }

    let state = game.state();
    log::info!(
        "Demo finished: {:?} on level {} with score {} and {} lives after {} ticks",
        state.phase,
        state.level,
        state.score,
        state.lives,
        state.time_ticks
    );
    log::info!(
        "{} frames drawn, peak {} hostiles, peak {} particles",
        renderer.frames,
        renderer.peak_enemies,
        renderer.peak_particles
    );
    log::info!("Top score on record: {}", game.storage().top_score());

    match serde_json::to_string(&RenderView::from_state(state)) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize final frame: {err}"),
    }
}
