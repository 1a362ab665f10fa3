use impulse2d::*;

#[test]
fn settings_roundtrip_through_json() {
    let settings = WorldSettings::default()
        .with_gravity(Vec2::new(0.0, -1.62))
        .with_bounds(SimulationBounds::new(Vec2::splat(-50.0), Vec2::splat(50.0)));

    let json = serde_json::to_string(&settings).unwrap();
    let parsed: WorldSettings = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, settings);
    assert!(PhysicsWorld::with_settings(parsed).is_ok());
}

#[test]
fn partial_settings_fill_in_defaults() {
    let parsed: WorldSettings =
        serde_json::from_str(r#"{ "gravity": [0.0, -3.0], "resolver": { "slop": 0.05 } }"#).unwrap();

    assert_eq!(parsed.gravity, Vec2::new(0.0, -3.0));
    assert_eq!(parsed.time_step, WorldSettings::default().time_step);
    assert_eq!(parsed.resolver.slop, 0.05);
    assert!(parsed.resolver.friction_enabled);
}

#[test]
fn invalid_settings_are_rejected() {
    let settings = WorldSettings {
        time_step: -0.1,
        ..WorldSettings::default()
    };
    assert!(matches!(
        PhysicsWorld::with_settings(settings),
        Err(PhysicsError::InvalidSettings(_))
    ));
}

#[test]
fn bodies_serialize_with_their_shape() {
    let body = Body::obb(Vec2::new(1.0, 2.0), Vec2::X, Vec2::new(0.5, 1.5), 0.25, 3.0, Color::RED)
        .unwrap();

    let json = serde_json::to_string(&body).unwrap();
    let parsed: Body = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, body);
    assert_eq!(parsed.kind(), ShapeKind::Obb);
}
