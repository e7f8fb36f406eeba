#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Tilerun simulation headlessly.

mod checkpoint_transfer;
mod config;
mod demo;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tilerun_core::{
    frames_for_entity, AssetLookup, Command, EntityKind, EntitySnapshot, EntityView, Event,
    Facing, PhysicsClass, TileFieldView, Vec2,
};
use tilerun_system_enemy_ai::EnemyAi;
use tilerun_world::{self as world, query, World};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use demo::DemoAssets;

/// Distance within which the autopilot shoots at enemies.
const PLAYER_FIRE_RANGE: f32 = 320.0;

#[derive(Debug, Parser)]
#[command(name = "tilerun", about = "Runs the Tilerun platformer simulation headlessly")]
struct CliArgs {
    /// Simulation tuning file in TOML format.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Simulated duration of one frame in milliseconds.
    #[arg(long = "frame-ms", default_value_t = 16)]
    frame_ms: u64,
    /// Checkpoint string to restore before the first frame.
    #[arg(long, value_name = "CHECKPOINT")]
    resume: Option<String>,
    /// Prints a checkpoint string after the run.
    #[arg(long)]
    export_checkpoint: bool,
    /// Enables debug logging unless RUST_LOG overrides it.
    #[arg(long, short)]
    verbose: bool,
}

/// Entry point for the Tilerun command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = config::load(args.config.as_deref())?;
    let tile_length = config.world.tile_length;
    let mut world = World::with_config(config).context("invalid simulation config")?;
    let ai = EnemyAi::new(query::config(&world).ai.clone());
    let assets = DemoAssets::new();

    let mut events = Vec::new();
    for command in demo::level_commands(tile_length) {
        world::apply(&mut world, command, &mut events);
    }
    if let Some(resume) = args.resume.as_deref() {
        let snapshot =
            checkpoint_transfer::decode(resume).context("failed to decode resume checkpoint")?;
        world::apply(
            &mut world,
            Command::RestoreCheckpoint { snapshot },
            &mut events,
        );
    }
    events.clear();

    let dt = Duration::from_millis(args.frame_ms);
    let mut frames = 0;
    for frame in 0..args.ticks {
        let view = query::entity_view(&world);
        let tiles = query::tile_view(&world);
        let mut commands = Vec::new();
        ai.handle(&view, query::boss_phase(&world), tiles, &mut commands);
        if let Some(player) = view.player().filter(|player| player.is_alive()) {
            drive_player(player, &view, tiles, &mut commands);
        }
        commands.push(Command::Tick { dt });

        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        frames = frame + 1;

        let mut finished = false;
        for event in events.drain(..) {
            finished |= report(frame, &event, &view);
        }
        if finished {
            break;
        }
    }

    print_summary(&world, &assets, frames);
    if args.export_checkpoint {
        let encoded = checkpoint_transfer::encode(&query::checkpoint_snapshot(&world))
            .context("failed to export checkpoint")?;
        println!("{encoded}");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Scripted stand-in for player input: run right, hop hazards, shoot the nearest foe.
fn drive_player(
    player: &EntitySnapshot,
    view: &EntityView,
    tiles: TileFieldView<'_>,
    out: &mut Vec<Command>,
) {
    let body = &player.body;
    out.push(Command::Steer {
        entity: player.id,
        velocity_x: player.speed,
        facing: Facing::Right,
    });

    let ahead = Vec2::new(
        body.position.x + 2.0 * body.radius,
        body.position.y + 1.5 * body.radius,
    );
    if tiles.physics_class_at(ahead) != PhysicsClass::Ground {
        out.push(Command::Jump { entity: player.id });
    }

    if !player.attack_ready() {
        return;
    }
    let nearest = view
        .iter()
        .filter(|entity| entity.kind != EntityKind::Player && entity.is_alive())
        .map(|entity| (entity.body.position, entity.body.position.distance(body.position)))
        .filter(|(_, distance)| *distance <= PLAYER_FIRE_RANGE)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((target, _)) = nearest {
        out.push(Command::FireBullet {
            shooter: player.id,
            target,
        });
    }
}

/// Logs one event, returning whether the run should stop.
fn report(frame: u32, event: &Event, before: &EntityView) -> bool {
    let kind_of = |entity| before.get(entity).map(|snapshot| snapshot.kind);
    match event {
        Event::EntityDied { entity, cause } => {
            info!(frame, entity = entity.get(), kind = ?kind_of(*entity), ?cause, "entity died");
            if kind_of(*entity) == Some(EntityKind::Player) {
                warn!(frame, "player died, stopping run");
                return true;
            }
        }
        Event::BossDefeated { .. } => {
            info!(frame, "boss defeated, stopping run");
            return true;
        }
        Event::CheckpointActivated { index } => info!(frame, index, "checkpoint reached"),
        Event::BossPhaseChanged { phase } => info!(frame, ?phase, "boss changed phase"),
        Event::EntityDamaged { entity, health } => {
            debug!(frame, entity = entity.get(), health, "entity damaged");
        }
        Event::EntityStateChanged { entity, from, to } => {
            debug!(frame, entity = entity.get(), ?from, ?to, "locomotion changed");
        }
        _ => {}
    }
    false
}

fn print_summary<L: AssetLookup>(world: &World, assets: &L, frames: u32) {
    let view = query::entity_view(world);
    println!(
        "ran {frames} frames ({:.2}s simulated), last checkpoint: {:?}, boss phase: {:?}",
        query::elapsed(world),
        query::last_checkpoint(world),
        query::boss_phase(world),
    );
    for entity in view.iter() {
        let asset = assets
            .entity_asset(entity.asset)
            .map_or("unknown", |asset| asset.name.as_str());
        let frames = frames_for_entity(assets, entity)
            .map_or_else(|| "-".to_owned(), |frames| frames.get().to_string());
        println!(
            "#{id:<2} {kind:<6} {asset:<8} health {health:>2}/{max:<2} state {state:<6} overlay {overlay:<5} frames {frames} at ({x:.1}, {y:.1})",
            id = entity.id.get(),
            kind = format!("{:?}", entity.kind),
            health = entity.body.health,
            max = entity.max_health,
            state = format!("{:?}", entity.state),
            overlay = entity
                .overlay
                .map_or_else(|| "-".to_owned(), |overlay| format!("{overlay:?}")),
            x = entity.body.position.x,
            y = entity.body.position.y,
        );
    }
}
