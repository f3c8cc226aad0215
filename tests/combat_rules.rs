mod common;

use bevy::prelude::*;
use common::*;
use masquerade_arena::domain::simulation::{
    BulletPool, FireBullet, Player, PlayerCommand, Shape, ShapeWithMask,
};
use rstest::rstest;

fn shoot_at(app: &mut App, aim: Vec2) {
    app.world_mut().send_event(PlayerCommand::Fire { aim });
    run_frames(app, 4);
}

#[rstest]
#[case::different_shape(Shape::Circle, None, Shape::Square, 1)]
#[case::masked_kill(Shape::Circle, Some(Shape::Square), Shape::Triangle, 2)]
#[case::own_kind(Shape::Circle, None, Shape::Circle, -1)]
#[case::own_kind_while_masked(Shape::Circle, Some(Shape::Triangle), Shape::Circle, -1)]
fn player_kill_scoring(
    #[case] player_true: Shape,
    #[case] player_mask: Option<Shape>,
    #[case] victim: Shape,
    #[case] expected: i32,
) {
    let mut app = arena(10);
    let player = set_player_shape(&mut app, masked(player_true, player_mask));
    let ai = spawn_inert_ai(&mut app, Vec2::new(3.0, 0.0), ShapeWithMask::new(victim), 0.0);
    run_frames(&mut app, 2);

    shoot_at(&mut app, Vec2::new(3.0, 0.0));

    assert!(app.world().get_entity(ai).is_none(), "victim survived");
    assert_eq!(app.world().get::<Player>(player).unwrap().score, expected);
    assert_eq!(app.world().resource::<BulletPool>().active(), 0);
    assert_eq!(
        app.world().get::<ShapeWithMask>(player).unwrap().mask(),
        player_mask
    );
}

#[rstest]
#[case::same_shape_witness(Shape::Square, true)]
#[case::other_shape_witness(Shape::Circle, false)]
fn witnesses_break_matching_masks(#[case] witness_shows: Shape, #[case] broken: bool) {
    let mut app = arena(11);
    let player = set_player_shape(&mut app, masked(Shape::Circle, Some(Shape::Square)));
    let victim = spawn_inert_ai(
        &mut app,
        Vec2::new(3.0, 0.0),
        ShapeWithMask::new(Shape::Triangle),
        10.0,
    );
    let witness = spawn_inert_ai(
        &mut app,
        Vec2::new(3.0, 4.0),
        ShapeWithMask::new(witness_shows),
        0.0,
    );
    run_frames(&mut app, 2);

    shoot_at(&mut app, Vec2::new(3.0, 0.0));

    assert!(app.world().get_entity(victim).is_none());
    assert!(app.world().get_entity(witness).is_some());
    let shape = app.world().get::<ShapeWithMask>(player).unwrap();
    assert_eq!(shape.has_mask(), !broken);
    assert_eq!(shape.true_shape(), Shape::Circle);
    assert_eq!(app.world().get::<Player>(player).unwrap().score, 2);
}

#[test]
fn foreign_bullets_wound_the_player() {
    let mut app = arena(12);
    let player = player(&mut app);

    app.world_mut().send_event(FireBullet {
        position: Vec2::new(1.0, 0.0),
        velocity: Vec2::new(-10.0, 0.0),
        owner: None,
    });
    run_frames(&mut app, 3);

    let p = app.world().get::<Player>(player).unwrap();
    assert_eq!(p.hp, 4);
    assert_eq!(p.score, 0);
}

#[test]
fn orphan_bullet_kills_without_scoring() {
    let mut app = arena(13);
    let player = set_player_shape(&mut app, masked(Shape::Circle, Some(Shape::Square)));
    let ai = spawn_inert_ai(&mut app, Vec2::new(-5.0, 3.0), ShapeWithMask::new(Shape::Square), 0.0);
    run_frames(&mut app, 2);

    app.world_mut().send_event(FireBullet {
        position: Vec2::new(-6.0, 3.0),
        velocity: Vec2::new(10.0, 0.0),
        owner: None,
    });
    run_frames(&mut app, 3);

    assert!(app.world().get_entity(ai).is_none());
    let p = app.world().get::<Player>(player).unwrap();
    assert_eq!(p.score, 0);
    assert!(app.world().get::<ShapeWithMask>(player).unwrap().has_mask());
}

#[test]
fn bullets_never_hit_their_owner() {
    let mut app = arena(14);
    let player = player(&mut app);

    app.world_mut().send_event(FireBullet {
        position: Vec2::ZERO,
        velocity: Vec2::new(10.0, 0.0),
        owner: Some(player),
    });
    run_frames(&mut app, 6);

    assert_eq!(app.world().get::<Player>(player).unwrap().hp, 5);
    assert_eq!(app.world().resource::<BulletPool>().active(), 0);
}

#[test]
fn mask_purchase_and_removal() {
    let mut app = arena(15);
    let player = set_player_shape(&mut app, masked(Shape::Triangle, None));

    app.world_mut().send_event(PlayerCommand::ApplyMask);
    run_frames(&mut app, 1);
    assert!(!app.world().get::<ShapeWithMask>(player).unwrap().has_mask());

    app.world_mut().get_mut::<Player>(player).unwrap().score = 6;
    app.world_mut().send_event(PlayerCommand::ApplyMask);
    run_frames(&mut app, 1);
    let shape = *app.world().get::<ShapeWithMask>(player).unwrap();
    assert!(shape.has_mask());
    assert_ne!(shape.masked_shape(), Shape::Triangle);
    assert_eq!(app.world().get::<Player>(player).unwrap().score, 1);

    app.world_mut().send_event(PlayerCommand::RemoveMask);
    run_frames(&mut app, 1);
    assert!(!app.world().get::<ShapeWithMask>(player).unwrap().has_mask());
    assert_eq!(app.world().get::<Player>(player).unwrap().score, 1);
}

#[test]
fn fast_bullets_cannot_skip_over_a_target() {
    let mut app = arena(16);
    let ai = spawn_inert_ai(&mut app, Vec2::new(5.0, 0.0), ShapeWithMask::new(Shape::Square), 0.0);
    run_frames(&mut app, 2);

    // 1.5 units per frame: the end points 4.3 and 5.8 both sit outside the
    // combined radius, only the path between them crosses it.
    app.world_mut().send_event(FireBullet {
        position: Vec2::new(2.8, 0.0),
        velocity: Vec2::new(30.0, 0.0),
        owner: None,
    });
    run_frames(&mut app, 1);
    assert!(app.world().get_entity(ai).is_some());
    run_frames(&mut app, 1);

    assert!(app.world().get_entity(ai).is_none(), "bullet tunnelled through");
    assert_eq!(app.world().resource::<BulletPool>().active(), 0);
}
