use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use raylib::prelude::*;

use dream_maze::audio::AudioManager;
use dream_maze::core::config::{GameConfig, Variant};
use dream_maze::core::process_events::process_events;
use dream_maze::core::session::{Session, SessionEvent};
use dream_maze::render::framebuffer::Framebuffer;
use dream_maze::render::hud;
use dream_maze::render::render3d::render_3d;
use dream_maze::render::textures::TextureManager;

// Logical resolution; the window shows it scaled up.
const VIEW_W: u32 = 320;
const VIEW_H: u32 = 200;

#[derive(Parser, Debug)]
#[command(name = "dream_maze")]
#[command(author, version, about = "Find the way out of four ever larger mazes", long_about = None)]
struct Args {
    /// Built-in level table
    #[arg(long, value_enum, default_value_t = Variant::Dream)]
    variant: Variant,

    /// Level table in TOML; overrides --variant
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Seed for maze generation (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding banana.png, door.png and music.mp3
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    /// Generate missing sprites instead of failing
    #[arg(long)]
    procedural_sprites: bool,

    /// Skip background music
    #[arg(long)]
    mute: bool,

    #[arg(long, default_value_t = 640)]
    width: i32,

    #[arg(long, default_value_t = 400)]
    height: i32,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.levels {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::preset(args.variant),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("{}: seed {seed}, start size {}", config.title, config.initial_size);

    let texman = if config.uses_sprites() {
        TextureManager::load(&args.assets_dir, args.procedural_sprites)?
    } else {
        TextureManager::procedural()
    };

    // Kept alive for the whole run; dropping it stops the music.
    let _audio = if config.music && !args.mute {
        let mut audio = AudioManager::new()?;
        audio.play_music_loop(&args.assets_dir.join("music.mp3"))?;
        Some(audio)
    } else {
        None
    };

    let (mut window, raylib_thread) = raylib::init()
        .size(args.width, args.height)
        .title(&config.title)
        .build();
    window.set_target_fps(60);

    let mut framebuffer = Framebuffer::new(VIEW_W, VIEW_H);
    let blank = Image::gen_image_color(VIEW_W as i32, VIEW_H as i32, Color::BLACK);
    let mut view_tex = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| format!("cannot create view texture: {e}"))?;
    let scale = (args.width as f32 / VIEW_W as f32).min(args.height as f32 / VIEW_H as f32);

    let mut flicker_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut session = Session::new(config, ChaCha8Rng::seed_from_u64(seed));

    while !window.window_should_close() {
        let input = process_events(&window);
        match session.update(&input) {
            Some(SessionEvent::LevelUp { level, size }) => info!("entering level {level} ({size}x{size})"),
            Some(SessionEvent::Finished) => info!("all levels cleared"),
            Some(SessionEvent::Restarted) => info!("restarting from level 1"),
            None => {}
        }

        if !session.is_finished() {
            render_3d(
                &mut framebuffer,
                session.grid(),
                &session.player,
                session.config(),
                session.level_config(),
                &texman,
                &mut flicker_rng,
            );
            framebuffer.upload_to_texture(&mut view_tex);
        }

        let mut d = window.begin_drawing(&raylib_thread);
        if session.is_finished() {
            hud::draw_ending(&mut d, &session.config().ending, VIEW_W as i32, scale);
        } else {
            d.clear_background(Color::BLACK);
            d.draw_texture_ex(&view_tex, Vector2::zero(), 0.0, scale, Color::WHITE);
            hud::draw_status(&mut d, session.level(), &session.level_config().message, scale);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("startup failed: {e}");
        std::process::exit(1);
    }
}
