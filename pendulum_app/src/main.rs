//! Pendulum demo
//!
//! A swinging chain sweeps past a static wall chain. Every frame the
//! pendulum's host rotates a little further and the demo reports the first
//! hit on the environment layer; halfway through, the pendulum is hidden for
//! a moment to show the skipped-query outcome. Run with
//! `RUST_LOG=info cargo run --bin pendulum_demo`.

use chain_collider::foundation::logging;
use chain_collider::prelude::*;
use log::info;

const FRAMES: u32 = 120;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut world = CollisionWorld::new();

    // Static vertical wall at x = 1.5. Rectangular hull: the wall never
    // rotates, so the tighter fit is free.
    let wall_host = SharedHost::new(Vec3::new(1.5, 0.0, 0.0));
    let wall = world.attach(
        ColliderConfig {
            segments: vec![
                SegmentConfig::new(Vec3::new(0.0, -2.0, 0.0)),
                SegmentConfig::new(Vec3::new(0.0, 0.0, 0.0)),
                SegmentConfig::new(Vec3::new(0.0, 2.0, 0.0)),
            ],
            layer_mask: CollisionLayers::ENVIRONMENT,
            collision_mask: CollisionLayers::NONE,
            width: 0.1,
            hull: HullShape::Rectangular,
        },
        Box::new(wall_host),
    )?;

    // Swinging two-meter chain anchored at the origin. Circular hull: the
    // radius is rotation-invariant, so spinning every frame costs nothing.
    let pendulum_host = SharedHost::new(Vec3::zeros());
    let pendulum = world.attach(
        ColliderConfig {
            segments: vec![
                SegmentConfig::new(Vec3::zeros()),
                SegmentConfig::new(Vec3::new(1.0, 0.0, 0.0)),
                SegmentConfig::new(Vec3::new(2.0, 0.0, 0.0)),
            ],
            layer_mask: CollisionLayers::PLAYER,
            collision_mask: CollisionLayers::ENVIRONMENT,
            width: 0.05,
            hull: HullShape::Circular,
        },
        Box::new(pendulum_host.clone()),
    )?;

    for frame in 0..FRAMES {
        let angle = frame as f32 * (std::f32::consts::TAU / FRAMES as f32);
        pendulum_host.set_rotation(angle);

        // Briefly hide the pendulum to demonstrate the tri-state outcome.
        pendulum_host.set_visible(!(55..60).contains(&frame));

        match world.hit_test_first(pendulum, None)? {
            QueryOutcome::Skipped => info!("frame {frame:3}: pendulum hidden, query skipped"),
            QueryOutcome::Completed(Some(hit)) => info!(
                "frame {frame:3}: segment {} hit {:?} segment {} separation ({:.3}, {:.3})",
                hit.self_index, hit.target, hit.target_index, hit.separation.x, hit.separation.y
            ),
            QueryOutcome::Completed(None) => {}
        }
    }

    let stats = world.stats();
    info!(
        "{FRAMES} frames: {} broad tests, {} broad rejects, {} narrow tests",
        stats.broad_tests, stats.broad_rejects, stats.narrow_tests
    );

    world.detach(pendulum)?;
    world.detach(wall)?;
    Ok(())
}
