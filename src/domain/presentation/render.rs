//! Meshes for combatants and bullets.
//!
//! AIs draw the shape they display. The player draws its true shape, with a
//! translucent child showing the mask while one is worn.

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::sprite::Mesh2dHandle;

use crate::domain::simulation::bullet::BULLET_RADIUS;
use crate::domain::simulation::{Bullet, Combatant, Player, Shape, ShapeWithMask};

const MASK_ALPHA: f32 = 0.5;

#[derive(Resource)]
pub struct ShapeAssets {
    meshes: [Mesh2dHandle; 3],
    solid: [Handle<ColorMaterial>; 3],
    translucent: [Handle<ColorMaterial>; 3],
    bullet_mesh: Mesh2dHandle,
    bullet_material: Handle<ColorMaterial>,
}

impl ShapeAssets {
    fn mesh(&self, shape: Shape) -> Mesh2dHandle {
        self.meshes[shape.index()].clone()
    }

    fn solid(&self, shape: Shape) -> Handle<ColorMaterial> {
        self.solid[shape.index()].clone()
    }

    fn translucent(&self, shape: Shape) -> Handle<ColorMaterial> {
        self.translucent[shape.index()].clone()
    }
}

/// Child entity drawing the player's mask.
#[derive(Component)]
pub struct MaskOverlay(pub Entity);

pub fn load_shape_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let mut mesh_for = |shape: Shape| -> Mesh2dHandle {
        let handle = match shape {
            Shape::Circle => meshes.add(Circle::new(0.5)),
            Shape::Square => meshes.add(Rectangle::new(0.9, 0.9)),
            Shape::Triangle => meshes.add(Triangle2d::new(
                Vec2::new(0.0, 0.55),
                Vec2::new(-0.5, -0.4),
                Vec2::new(0.5, -0.4),
            )),
        };
        Mesh2dHandle(handle)
    };
    let shape_meshes = Shape::ALL.map(&mut mesh_for);
    let solid = Shape::ALL.map(|s| materials.add(s.color()));
    let translucent = Shape::ALL.map(|s| materials.add(s.color().with_alpha(MASK_ALPHA)));

    commands.insert_resource(ShapeAssets {
        meshes: shape_meshes,
        solid,
        translucent,
        bullet_mesh: Mesh2dHandle(meshes.add(Circle::new(BULLET_RADIUS))),
        bullet_material: materials.add(Color::srgb(1.0, 0.9, 0.4)),
    });
}

pub fn attach_bullet_visuals(
    mut commands: Commands,
    assets: Res<ShapeAssets>,
    bullets: Query<Entity, Added<Bullet>>,
) {
    for entity in &bullets {
        commands
            .entity(entity)
            .insert((assets.bullet_mesh.clone(), assets.bullet_material.clone()));
    }
}

pub fn sync_shape_visuals(
    mut commands: Commands,
    assets: Res<ShapeAssets>,
    changed: Query<
        (Entity, &ShapeWithMask, Has<Player>, Option<&MaskOverlay>),
        (With<Combatant>, Or<(Added<Combatant>, Changed<ShapeWithMask>)>),
    >,
) {
    for (entity, shape, is_player, overlay) in &changed {
        if !is_player {
            let shown = shape.masked_shape();
            commands
                .entity(entity)
                .insert((assets.mesh(shown), assets.solid(shown)));
            continue;
        }

        let body = shape.true_shape();
        commands
            .entity(entity)
            .insert((assets.mesh(body), assets.solid(body)));

        let mask = shape.mask().unwrap_or(body);
        let visibility = if shape.has_mask() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let overlay_parts = (assets.mesh(mask), assets.translucent(mask), visibility);

        match overlay {
            Some(MaskOverlay(child)) => {
                if let Some(mut child) = commands.get_entity(*child) {
                    child.insert(overlay_parts);
                }
            }
            None => {
                let child = commands
                    .spawn((
                        overlay_parts,
                        Transform::from_xyz(0.0, 0.0, 0.1).with_scale(Vec3::splat(1.2)),
                        GlobalTransform::default(),
                        InheritedVisibility::default(),
                        ViewVisibility::default(),
                    ))
                    .id();
                commands
                    .entity(entity)
                    .add_child(child)
                    .insert(MaskOverlay(child));
            }
        }
    }
}
