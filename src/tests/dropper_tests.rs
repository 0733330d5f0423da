#[cfg(test)]
mod tests {
    use crate::components::{Fruit, FruitKind, Input, Position, Preview, Viewport};
    use crate::config::gameplay::{DropperConfig, MovementAxis, ViewportConfig};
    use crate::dropper::{
        Bounds, Dropper, drop_pending, dropper_movement_system, dropper_release_system,
        preview_follow_system,
    };
    use crate::session::Session;
    use crate::tests::test_utils::create_test_world;
    use bevy_ecs::prelude::*;

    fn settings() -> DropperConfig {
        DropperConfig {
            speed: 10.0,
            smoothing: 0.5,
            padding: 0.25,
            half_width: 0.5,
            half_height: 0.5,
            start_y: 4.0,
            ..DropperConfig::default()
        }
    }

    fn world_with_dropper(config: &DropperConfig) -> World {
        let mut world = create_test_world(&["A", "B", "C"]);
        world.insert_resource(Dropper::new(
            config,
            &ViewportConfig::default(),
            FruitKind::new("A"),
        ));
        world
    }

    #[test]
    fn test_bounds_shrink_by_footprint_and_padding() {
        let bounds = Bounds::from_view((5.0, 8.0), (0.5, 0.5), 0.25);

        assert!((bounds.max_x - 4.25).abs() < f32::EPSILON);
        assert!((bounds.min_x + 4.25).abs() < f32::EPSILON);
        assert!((bounds.max_y - 7.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bounds_collapse_when_too_narrow() {
        let bounds = Bounds::from_view((0.5, 0.5), (1.0, 1.0), 0.25);

        assert_eq!(bounds.clamp_x(3.0), 0.0);
        assert_eq!(bounds.clamp_x(-3.0), 0.0);
    }

    #[test]
    fn test_smoothing_approaches_raw_input() {
        let mut dropper = Dropper::new(&settings(), &ViewportConfig::default(), "A".into());
        let bounds = Bounds::from_view((100.0, 100.0), (0.5, 0.5), 0.0);

        dropper.step((1.0, 0.0), 0.0, bounds);
        assert!((dropper.smoothed.0 - 0.5).abs() < 1e-6);

        dropper.step((1.0, 0.0), 0.0, bounds);
        assert!((dropper.smoothed.0 - 0.75).abs() < 1e-6);

        // Zero elapsed time means no travel even with input
        assert_eq!(dropper.position.x, 0.0);
    }

    #[test]
    fn test_position_never_leaves_bounds() {
        let mut world = world_with_dropper(&settings());
        let limit = 5.0 - 0.5 - 0.25;

        for direction in [1.0_f32, -1.0] {
            world.resource_mut::<Input>().movement = (direction * 1000.0, 0.0);
            for _ in 0..200 {
                dropper_movement_system(&mut world, 0.5);
                let x = world.resource::<Dropper>().position.x;
                assert!(x <= limit + 1e-4 && x >= -limit - 1e-4, "x escaped to {x}");
            }
            let x = world.resource::<Dropper>().position.x;
            assert!((x.abs() - limit).abs() < 1e-4);
        }
    }

    #[test]
    fn test_horizontal_axis_keeps_height() {
        let mut world = world_with_dropper(&settings());
        world.resource_mut::<Input>().movement = (0.0, -50.0);

        for _ in 0..20 {
            dropper_movement_system(&mut world, 0.1);
        }

        assert_eq!(world.resource::<Dropper>().position.y, 4.0);
    }

    #[test]
    fn test_planar_axis_clamps_both() {
        let config = DropperConfig {
            axis: MovementAxis::Planar,
            ..settings()
        };
        let mut world = world_with_dropper(&config);
        world.resource_mut::<Input>().movement = (50.0, -50.0);

        for _ in 0..200 {
            dropper_movement_system(&mut world, 0.2);
        }

        let position = world.resource::<Dropper>().position;
        assert!((position.x - 4.25).abs() < 1e-4);
        assert!((position.y + 7.25).abs() < 1e-4);
    }

    #[test]
    fn test_missing_viewport_uses_last_known_bounds() {
        let mut world = world_with_dropper(&settings());
        world.insert_resource(Viewport {
            half_width: 2.0,
            half_height: 2.0,
        });
        dropper_movement_system(&mut world, 0.0);

        world.remove_resource::<Viewport>();
        world.resource_mut::<Input>().movement = (100.0, 0.0);
        for _ in 0..50 {
            dropper_movement_system(&mut world, 0.5);
        }

        // 2.0 - 0.5 - 0.25 from the last viewport, not the default 5.0
        assert!((world.resource::<Dropper>().position.x - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_missing_viewport_without_history_uses_fallback() {
        let mut world = world_with_dropper(&settings());
        world.remove_resource::<Viewport>();
        world.resource_mut::<Input>().movement = (100.0, 0.0);

        for _ in 0..50 {
            dropper_movement_system(&mut world, 0.5);
        }

        assert!((world.resource::<Dropper>().position.x - 4.25).abs() < 1e-4);
    }

    #[test]
    fn test_release_drops_and_reselects_once() {
        let mut world = world_with_dropper(&settings());

        world.resource_mut::<Input>().press_started = true;
        assert!(dropper_release_system(&mut world).is_none());

        world.resource_mut::<Input>().press_ended = true;
        let dropped = dropper_release_system(&mut world).expect("release should drop");

        assert_eq!(
            world.get::<Fruit>(dropped).map(|f| f.kind.as_str()),
            Some("A")
        );
        assert_eq!(world.get::<Position>(dropped), Some(&Position::new(0.0, 4.0)));

        // Sequential selector in the test world yields A first
        assert_eq!(world.resource::<Dropper>().pending_kind, FruitKind::new("A"));

        // No further drop without a fresh release
        assert!(dropper_release_system(&mut world).is_none());
        assert_eq!(world.query::<&Fruit>().iter(&world).count(), 1);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut world = world_with_dropper(&settings());
        world.resource_mut::<Input>().press_ended = true;

        assert!(dropper_release_system(&mut world).is_none());
        assert_eq!(world.query::<&Fruit>().iter(&world).count(), 0);
    }

    #[test]
    fn test_paused_session_blocks_movement_and_drops() {
        let mut world = world_with_dropper(&settings());
        world.resource_mut::<Session>().pause();

        world.resource_mut::<Input>().movement = (10.0, 0.0);
        dropper_movement_system(&mut world, 1.0);
        assert_eq!(world.resource::<Dropper>().position.x, 0.0);

        {
            let mut input = world.resource_mut::<Input>();
            input.press_started = true;
            input.press_ended = true;
        }
        assert!(dropper_release_system(&mut world).is_none());
        assert_eq!(world.query::<&Fruit>().iter(&world).count(), 0);
    }

    #[test]
    fn test_stopped_session_blocks_drops() {
        let mut world = world_with_dropper(&settings());
        world.resource_mut::<Session>().stop();

        assert!(drop_pending(&mut world).is_ok());
        world.resource_mut::<Input>().press_started = true;
        world.resource_mut::<Input>().press_ended = true;
        assert!(dropper_release_system(&mut world).is_none());
        assert!(!world.resource::<Dropper>().pointer_active);
    }

    #[test]
    fn test_preview_replaced_on_each_drop() {
        let mut world = world_with_dropper(&settings());

        drop_pending(&mut world).unwrap();
        let first = world.resource::<Dropper>().preview.expect("preview enabled");

        drop_pending(&mut world).unwrap();
        let second = world.resource::<Dropper>().preview.expect("preview enabled");

        assert_ne!(first, second);
        assert!(world.get::<Preview>(first).is_none());
        assert_eq!(world.query::<&Preview>().iter(&world).count(), 1);

        let pending = world.resource::<Dropper>().pending_kind.clone();
        assert_eq!(world.get::<Preview>(second).map(|p| &p.kind), Some(&pending));
    }

    #[test]
    fn test_preview_disabled() {
        let mut config = settings();
        config.preview.enabled = false;
        let mut world = world_with_dropper(&config);

        drop_pending(&mut world).unwrap();

        assert!(world.resource::<Dropper>().preview.is_none());
        assert_eq!(world.query::<&Preview>().iter(&world).count(), 0);
    }

    #[test]
    fn test_preview_follows_dropper() {
        let mut world = world_with_dropper(&settings());
        drop_pending(&mut world).unwrap();

        world.resource_mut::<Input>().movement = (1.0, 0.0);
        for _ in 0..10 {
            dropper_movement_system(&mut world, 0.05);
        }
        preview_follow_system(&mut world);

        let dropper = world.resource::<Dropper>();
        let expected = dropper.preview_position();
        let preview = dropper.preview.unwrap();
        assert_eq!(world.get::<Position>(preview), Some(&expected));
    }
}
