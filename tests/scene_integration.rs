//! Integration tests for the shipped scene and the game loop built on it

use boxshot::scene::SceneBuilder;
use boxshot::systems::SimulationSystem;
use boxshot_core::{Scene, StepConfig, Weapon};
use boxshot_input::{CameraControl, PlayerController};
use boxshot_math::Vec3;
use boxshot_render::Camera;

#[test]
fn test_arena_file_matches_builtin_layout() {
    let file = Scene::load("scenes/arena.ron").unwrap();
    let builtin = Scene::default();

    assert_eq!(file.name, builtin.name);
    assert_eq!(file.player, builtin.player);
    assert_eq!(file.physics, builtin.physics);
    assert_eq!(file.ground, builtin.ground);
    assert_eq!(file.lighting, builtin.lighting);
    assert_eq!(file.boxes.len(), builtin.boxes.len());
    for (a, b) in file.boxes.iter().zip(&builtin.boxes) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.size, b.size);
    }
}

#[test]
fn test_missing_scene_falls_back_to_builtin() {
    let scene = Scene::load_or_default("scenes/missing.ron");
    assert_eq!(scene, Scene::default());
}

#[test]
fn test_boxes_settle_and_can_be_shot() {
    let scene = Scene::load("scenes/arena.ron").unwrap();
    let mut world = SceneBuilder::from_scene(&scene, StepConfig::damped()).build();
    let mut sim = SimulationSystem::new();
    let mut camera = Camera::new();
    let mut controller = PlayerController::new();
    let mut weapon = Weapon::new(scene.player.weapon());

    for _ in 0..300 {
        sim.tick(1.0 / 60.0, &mut world, &mut camera, &mut controller, &mut weapon, true);
    }

    for (_, entity) in world.get_by_tag("dynamic") {
        let p = entity.transform.position;
        assert!((p.z - 0.5).abs() < 0.05, "box resting at {:?}", p);
    }

    // The eye sits above the resting boxes, so a level shot needs a lower origin.
    let mut low_camera = Camera::new();
    low_camera.set_position(Vec3::new(0.0, 0.0, 0.5));
    low_camera.rotate(std::f32::consts::FRAC_PI_2, 0.0);

    assert!(matches!(sim.reload(&mut weapon), boxshot_core::ReloadOutcome::Started { .. }));
    for _ in 0..130 {
        sim.tick(1.0 / 60.0, &mut world, &mut camera, &mut controller, &mut weapon, true);
    }
    assert_eq!(weapon.clip(), 20);

    let shot = sim.fire(&world, &low_camera, &mut weapon);
    let hit = shot.hit.expect("level shot should hit the box at x = 5");
    assert!((hit.point.x - 4.5).abs() < 0.05);
    assert_eq!(weapon.clip(), 19);
}
