//! Built-in level and asset library used by the headless runner.

use std::collections::HashMap;

use tilerun_core::{
    AssetId, AssetLookup, Command, EntityAsset, EntitySpawn, Facing, FrameSetId, PhysicsType,
    TileCell, Vec2,
};

/// Number of tile columns in the demo level.
pub(crate) const COLUMNS: u32 = 48;
/// Number of tile rows in the demo level.
pub(crate) const ROWS: u32 = 12;

const FLOOR_ROW: u32 = ROWS - 1;
const GAP: std::ops::RangeInclusive<u32> = 14..=15;
const SPIKES: std::ops::RangeInclusive<u32> = 26..=27;
const PLATFORM: std::ops::RangeInclusive<u32> = 18..=21;
const PLATFORM_ROW: u32 = 8;
const ARENA_START: u32 = 40;

const TERRAIN_TILESET: u16 = 0;
const HAZARD_TILESET: u16 = 1;

const HERO: AssetId = AssetId::new(1);
const SLIME: AssetId = AssetId::new(2);
const ARCHER: AssetId = AssetId::new(3);
const BAT: AssetId = AssetId::new(4);
const WARDEN: AssetId = AssetId::new(5);

/// Commands that build the demo level from scratch.
pub(crate) fn level_commands(tile_length: f32) -> Vec<Command> {
    let at = |column: f32, row: f32| Vec2::new(column * tile_length, row * tile_length);

    vec![
        Command::ConfigureLevel {
            columns: COLUMNS,
            rows: ROWS,
            cells: cells(),
        },
        Command::SpawnEntity {
            spawn: EntitySpawn::player(at(1.5, 10.5)).with_asset(HERO),
        },
        Command::SpawnEntity {
            spawn: EntitySpawn::enemy(at(8.5, 10.5), PhysicsType::Ground)
                .with_asset(SLIME)
                .with_patrol(5.0 * tile_length, 12.0 * tile_length),
        },
        Command::SpawnEntity {
            spawn: EntitySpawn::enemy(at(19.5, 7.5), PhysicsType::Ground)
                .with_asset(ARCHER)
                .with_shoot_cooldown(1.5)
                .with_facing(Facing::Right),
        },
        Command::SpawnEntity {
            spawn: EntitySpawn::enemy(at(30.5, 5.5), PhysicsType::Flying)
                .with_asset(BAT)
                .with_speed(90.0),
        },
        Command::SpawnEntity {
            spawn: EntitySpawn::boss(at(44.5, 9.5)).with_asset(WARDEN),
        },
        Command::PlaceCheckpoint {
            position: at(12.5, 10.5),
        },
        Command::PlaceCheckpoint {
            position: at(36.5, 10.5),
        },
    ]
}

/// Row-major packed cells of the demo level.
fn cells() -> Vec<TileCell> {
    let mut cells = vec![TileCell::EMPTY; (COLUMNS * ROWS) as usize];
    let index = |column: u32, row: u32| (row * COLUMNS + column) as usize;

    for column in 0..COLUMNS {
        let cell = if GAP.contains(&column) {
            TileCell::EMPTY
        } else if SPIKES.contains(&column) {
            TileCell::encode(HAZARD_TILESET, 2, 0)
        } else if column >= ARENA_START {
            // The boss arena still uses the old sentinel encoding.
            TileCell::LEGACY_GROUND
        } else {
            TileCell::encode(TERRAIN_TILESET, 1, (column % 4) as u16)
        };
        cells[index(column, FLOOR_ROW)] = cell;
    }
    for column in PLATFORM {
        cells[index(column, PLATFORM_ROW)] = TileCell::encode(TERRAIN_TILESET, 1, 8);
    }
    cells
}

/// In-memory asset library with one frame set per locomotion state.
#[derive(Debug)]
pub(crate) struct DemoAssets {
    assets: HashMap<AssetId, EntityAsset>,
}

impl DemoAssets {
    pub(crate) fn new() -> Self {
        let names = [
            (HERO, "hero"),
            (SLIME, "slime"),
            (ARCHER, "archer"),
            (BAT, "bat"),
            (WARDEN, "warden"),
        ];
        let assets = names
            .into_iter()
            .map(|(id, name)| {
                let base = id.get() * 10;
                let asset = EntityAsset {
                    name: name.to_owned(),
                    idle: FrameSetId::new(base),
                    walk: FrameSetId::new(base + 1),
                    ascend: FrameSetId::new(base + 2),
                    fall: FrameSetId::new(base + 3),
                };
                (id, asset)
            })
            .collect();
        Self { assets }
    }
}

impl AssetLookup for DemoAssets {
    fn entity_asset(&self, id: AssetId) -> Option<&EntityAsset> {
        self.assets.get(&id)
    }
}
