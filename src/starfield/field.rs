use bevy::prelude::*;

use super::config::MotionConfig;
use super::config::StarfieldConfig;
use super::generator::ParticleSet;
use super::generator::Shell;
use super::generator::generate_particles;
use super::motion::FieldOrientation;
use super::motion::MaterialPulse;
use super::sprite::soft_point_sprite;
use crate::traits::TransformExt;

/// Root of the field; its rotation is the field orientation and every star is its child
#[derive(Component, Debug)]
pub struct StarField;

#[derive(Component, Debug)]
pub struct Star;

/// Render resources owned by one mount. Released explicitly on unmount so a remount never
/// leaves the previous mesh, material or sprite resident.
#[derive(Resource, Debug, Clone)]
pub struct StarfieldAssets {
    pub mesh:     Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub sprite:   Handle<Image>,
}

/// Builds the field: particles once, one shared sprite/mesh/material, one entity per star
pub fn mount_starfield(
    mut commands: Commands,
    config: Res<StarfieldConfig>,
    motion: Res<MotionConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let particles = generate_particles(
        config.star_count,
        Shell {
            inner_radius: config.inner_radius,
            outer_radius: config.outer_radius,
        },
        config.seed,
    );
    if particles.is_empty() {
        warn!("mounting an empty starfield, only the backdrop will show");
    } else {
        info!(
            "mounting starfield: {} stars, seed {}",
            particles.len(),
            particles.seed()
        );
    }

    let pulse = MaterialPulse::at_rest(&motion);
    let sprite = images.add(soft_point_sprite(config.sprite_size));
    let mesh = meshes.add(Rectangle::new(1.0, 1.0));
    // additive and unlit, drawn in the transparent pass so it never writes depth
    let material = materials.add(StandardMaterial {
        base_color: config.star_color.with_alpha(pulse.opacity),
        base_color_texture: Some(sprite.clone()),
        unlit: true,
        fog_enabled: false,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    let field = commands
        .spawn((
            Name::new("StarField"),
            StarField,
            FieldOrientation::default(),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let stars: Vec<_> = particles
        .positions()
        .iter()
        .map(|&position| {
            (
                Star,
                ChildOf(field),
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_trs(position, Quat::IDENTITY, Vec3::splat(pulse.size)),
            )
        })
        .collect();
    commands.spawn_batch(stars);

    commands.insert_resource(pulse);
    commands.insert_resource(particles);
    commands.insert_resource(StarfieldAssets {
        mesh,
        material,
        sprite,
    });
}

/// Despawns the field (stars go with it) and frees everything the mount allocated
pub fn unmount_starfield(
    mut commands: Commands,
    fields: Query<Entity, With<StarField>>,
    assets: Option<Res<StarfieldAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    info!("unmounting starfield");
    for entity in &fields {
        commands.entity(entity).despawn();
    }

    if let Some(assets) = assets {
        meshes.remove(&assets.mesh);
        materials.remove(&assets.material);
        images.remove(&assets.sprite);
    }

    commands.remove_resource::<StarfieldAssets>();
    commands.remove_resource::<ParticleSet>();
    commands.remove_resource::<MaterialPulse>();
}
