use impulse2d::{Body, Color, PhysicsWorld, Vec2};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_physics_world_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<PhysicsWorld>();
    assert_sync_send::<Body>();
}

#[test]
fn test_shared_physics_world_across_threads() {
    let mut world = PhysicsWorld::new(1.0 / 60.0);
    let id = world.add_actor(
        Body::circle(Vec2::new(0.0, 10.0), Vec2::ZERO, 1.0, 1.0, Color::WHITE).unwrap(),
    );
    let world = Arc::new(Mutex::new(world));

    let mut handles = vec![];
    for _ in 0..4 {
        let world_clone = Arc::clone(&world);
        let handle = thread::spawn(move || {
            let mut world = world_clone.lock().unwrap();
            world.update(1.0 / 60.0);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let world = world.lock().unwrap();
    assert!(world.body(id).unwrap().position.y < 10.0);
}
