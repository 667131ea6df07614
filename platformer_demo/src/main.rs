//! Platformer demo application
//!
//! Headless walk-through of the collision engine: builds a level from ASCII
//! rows, merges its tiles into hitboxes, and lets a player rectangle fall,
//! land and pace between walls for a few seconds of simulated frames.
//!
//! Usage: `platformer_demo [config.toml|config.ron]`

use hitbox_engine::prelude::*;
use hitbox_engine::foundation::logging;
use hitbox_engine::physics::LayerId;

const LEVEL: [&str; 7] = [
    "#..................#",
    "#..................#",
    "#.......BB.........#",
    "#......====........#",
    "#..................#",
    "#............#.^^..#",
    "####################",
];

const FRAMES: usize = 240;
const DT: f32 = 1.0 / 60.0;
const GRAVITY: f32 = 600.0;
const WALK_SPEED: f32 = 60.0;
const SPAWN: (f32, f32) = (24.0, 16.0);

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Level error: {0}")]
    Tilemap(#[from] TilemapError),

    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),
}

/// Player motion state, updated from resolved contacts
struct Player {
    velocity: Vec2,
    grounded: bool,
    landings: usize,
    turns: usize,
}

impl ContactHandler for Player {
    fn on_up(&mut self, _collider: ShapeHandle) {
        self.velocity.y = 0.0;
    }

    fn on_down(&mut self, _collider: ShapeHandle) {
        self.grounded = true;
        self.velocity.y = 0.0;
    }

    fn on_left(&mut self, _collider: ShapeHandle) {
        self.velocity.x = WALK_SPEED;
        self.turns += 1;
    }

    fn on_right(&mut self, _collider: ShapeHandle) {
        self.velocity.x = -WALK_SPEED;
        self.turns += 1;
    }
}

fn load_config() -> Result<CollisionConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            Ok(CollisionConfig::load_from_file(path)?)
        }
        None => Ok(CollisionConfig::default()),
    }
}

fn build_level(world: &mut CollisionWorld) -> Result<TileHitboxes, DemoError> {
    let cell = world.config().tilemap.cell_size;
    let replacements = HitboxReplacements::from([
        ('#', TileTemplate::new("ground", cell)),
        ('=', TileTemplate::new("ground", IVec2::new(cell.x, cell.y / 2))),
        ('B', TileTemplate::new("breakable", cell)),
        ('^', TileTemplate::new("spike", IVec2::new(cell.x, cell.y / 2))
            .with_offset(IVec2::new(0, cell.y / 2))
            .on_layer(LayerId::ONE)),
    ]);

    let grid = TileGrid::from_rows(&LEVEL, &replacements, '.')?;
    let settings = world.config().tilemap.clone();
    let hitboxes = TileHitboxes::generate(world, &grid, &settings);

    let keys = TileGrid::from_chars(&LEVEL, '.')?;
    let mut walls = TileGrid::new(keys.width(), keys.height());
    for (x, y, _) in keys.iter().filter(|(_, _, key)| **key == 'B') {
        walls.set(x, y, Some(()));
    }
    for section in find_sections(&walls) {
        log::info!(
            "Breakable section at {:?}, size {:?}",
            section.position(settings.cell_size, settings.origin),
            section.size(settings.cell_size)
        );
    }

    Ok(hitboxes)
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    let mut world = CollisionWorld::with_config(config);
    let hitboxes = build_level(&mut world)?;

    let body = Space::new(Vec2::new(SPAWN.0, SPAWN.1), Vec2::new(10.0, 14.0)).into_shared();
    let player = world.spawn(ShapeDesc::rectangle(&body).with_tag("player").with_secondary_layer(LayerId::ONE));
    let mut state = Player {
        velocity: Vec2::new(WALK_SPEED, 0.0),
        grounded: false,
        landings: 0,
        turns: 0,
    };

    for frame in 0..FRAMES {
        state.velocity.y += GRAVITY * DT;
        body.borrow_mut().translate(state.velocity * DT);
        let was_grounded = std::mem::take(&mut state.grounded);

        let report = world.advanced_check(player, "ground");
        if report.side != Side::None {
            log::trace!("Frame {}: settled on {:?} across {} contact(s)", frame, report.side, report.len());
        }
        for collision in &report.collisions {
            let velocity = state.velocity;
            world.apply_collision(player, collision, velocity, &mut state)?;
        }
        if state.grounded && !was_grounded {
            state.landings += 1;
            log::debug!("Frame {}: landed at y = {:.1}", frame, body.borrow().position.y);
        }

        if world.check_on_layer(player, LayerId::ONE, "spike") {
            log::warn!("Frame {}: player hit spikes, respawning", frame);
            let mut space = body.borrow_mut();
            space.position = Vec2::new(SPAWN.0, SPAWN.1);
            state.velocity = Vec2::new(WALK_SPEED, 0.0);
        }
    }

    let position = body.borrow().position;
    log::info!(
        "Finished {} frames at ({:.1}, {:.1}): {} landing(s), {} turn(s), grounded = {}",
        FRAMES,
        position.x,
        position.y,
        state.landings,
        state.turns,
        state.grounded
    );

    let mut debug = DebugDrawSystem::new();
    world.debug(&mut debug);
    log::info!("Debug pass produced {} shape(s)", debug.shape_count());

    let removed = hitboxes.remove_all(&mut world);
    log::info!("Unloaded {} level hitbox(es)", removed);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting platformer demo");

    match run() {
        Ok(()) => {
            log::info!("Platformer demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Platformer demo failed: {:?}", e);
            Err(e.into())
        }
    }
}
