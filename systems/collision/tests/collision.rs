use tilerun_core::{PhysicsBody, PhysicsType, TileCell, TileFieldView, Vec2};
use tilerun_system_collision::{check_ground_below, resolve, Contacts};

const TILE: f32 = 32.0;

fn grid(columns: u32, rows: u32, solid: &[(u32, u32, TileCell)]) -> Vec<TileCell> {
    let mut cells = vec![TileCell::EMPTY; (columns * rows) as usize];
    for &(column, row, cell) in solid {
        cells[(row * columns + column) as usize] = cell;
    }
    cells
}

fn body(position: Vec2, velocity: Vec2) -> PhysicsBody {
    PhysicsBody {
        physics_type: PhysicsType::Ground,
        base_position: position,
        position,
        velocity,
        radius: 8.0,
        health: 3,
    }
}

#[test]
fn sinking_body_is_pushed_onto_ground_surface() {
    let ground = TileCell::encode(0, 1, 4);
    let cells = grid(3, 3, &[(1, 2, ground)]);
    let view = TileFieldView::new(&cells, 3, 3, TILE);
    let mut subject = body(Vec2::new(48.0, 59.0), Vec2::new(0.0, 120.0));

    let contacts = resolve(view, &mut subject);

    assert_eq!(
        contacts,
        Contacts {
            ground: 1,
            death: false
        }
    );
    assert!((subject.position.y - 56.0).abs() < 1e-4);
    assert_eq!(subject.position.x, 48.0);
    assert_eq!(subject.velocity.y, 0.0);
    assert!(check_ground_below(view, subject.position, subject.radius));
}

#[test]
fn wall_pushes_sideways_and_stops_horizontal_motion() {
    let cells = grid(3, 3, &[(1, 0, TileCell::LEGACY_GROUND), (1, 1, TileCell::LEGACY_GROUND)]);
    let view = TileFieldView::new(&cells, 3, 3, TILE);
    let mut subject = body(Vec2::new(27.0, 40.0), Vec2::new(90.0, 10.0));

    let contacts = resolve(view, &mut subject);

    assert_eq!(contacts.ground, 1);
    assert!((subject.position.x - 24.0).abs() < 1e-4);
    assert_eq!(subject.velocity.x, 0.0);
    assert_eq!(subject.velocity.y, 10.0);
}

#[test]
fn death_tile_kills_without_moving() {
    let cells = grid(2, 2, &[(0, 1, TileCell::encode(5, 2, 0))]);
    let view = TileFieldView::new(&cells, 2, 2, TILE);
    let start = Vec2::new(16.0, 30.0);
    let mut subject = body(start, Vec2::new(0.0, 50.0));

    let contacts = resolve(view, &mut subject);

    assert!(contacts.death);
    assert_eq!(contacts.ground, 0);
    assert_eq!(subject.health, 0);
    assert_eq!(subject.position, start);
    assert_eq!(subject.velocity, Vec2::new(0.0, 50.0));
}

#[test]
fn later_tiles_see_position_corrected_by_earlier_ones() {
    let cells = grid(
        2,
        3,
        &[(0, 2, TileCell::LEGACY_GROUND), (1, 2, TileCell::LEGACY_GROUND)],
    );
    let view = TileFieldView::new(&cells, 2, 3, TILE);
    let mut subject = body(Vec2::new(32.0, 60.0), Vec2::new(0.0, 30.0));

    let contacts = resolve(view, &mut subject);

    // The left tile lifts the body; the right tile is then merely tangent.
    assert_eq!(contacts.ground, 1);
    assert!((subject.position.y - 56.0).abs() < 1e-4);
}

#[test]
fn unassigned_physics_bits_and_empty_cells_are_ignored() {
    let cells = grid(2, 2, &[(0, 1, TileCell::encode(1, 9, 3)), (1, 1, TileCell::from_raw(7))]);
    let view = TileFieldView::new(&cells, 2, 2, TILE);
    let start = Vec2::new(32.0, 36.0);
    let mut subject = body(start, Vec2::new(5.0, 5.0));

    let contacts = resolve(view, &mut subject);

    assert_eq!(contacts, Contacts::default());
    assert_eq!(subject.position, start);
    assert_eq!(subject.health, 3);
}

#[test]
fn body_outside_grid_collides_with_nothing() {
    let cells = grid(2, 2, &[(0, 0, TileCell::LEGACY_GROUND)]);
    let view = TileFieldView::new(&cells, 2, 2, TILE);
    let start = Vec2::new(-100.0, -100.0);
    let mut subject = body(start, Vec2::ZERO);

    assert_eq!(resolve(view, &mut subject), Contacts::default());
    assert_eq!(subject.position, start);
    assert!(!check_ground_below(view, Vec2::new(-40.0, 10.0), 8.0));
}

#[test]
fn ground_probe_only_samples_bottom_centre() {
    let cells = grid(3, 2, &[(0, 1, TileCell::LEGACY_GROUND), (2, 1, TileCell::LEGACY_DEATH)]);
    let view = TileFieldView::new(&cells, 3, 2, TILE);

    assert!(check_ground_below(view, Vec2::new(16.0, 24.0), 8.0));
    // Hanging over the ledge: the circle still touches tile (0, 1) but the
    // bottom-centre sample lands in the empty tile next to it.
    assert!(!check_ground_below(view, Vec2::new(36.0, 24.0), 8.0));
    assert!(!check_ground_below(view, Vec2::new(80.0, 24.0), 8.0));
}
