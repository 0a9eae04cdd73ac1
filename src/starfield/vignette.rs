use bevy::prelude::*;

use super::constants::VIGNETTE_SIZE;
use super::sprite::vignette_image;
use super::visibility::VisibilityGate;

/// Darkened window edges drawn over the field. Part of the mounted field, so it fades with the
/// visibility gate and goes away on unmount.
#[derive(Component, Debug)]
pub struct Vignette;

#[derive(Resource, Debug, Clone)]
pub struct VignetteImage(pub Handle<Image>);

pub fn spawn_vignette(
    mut commands: Commands,
    gate: Res<VisibilityGate>,
    mut images: ResMut<Assets<Image>>,
) {
    let image = images.add(vignette_image(VIGNETTE_SIZE));
    commands.spawn((
        Name::new("Vignette"),
        Vignette,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        ImageNode::new(image.clone()).with_color(vignette_tint(&gate)),
    ));
    commands.insert_resource(VignetteImage(image));
}

pub fn despawn_vignette(
    mut commands: Commands,
    vignettes: Query<Entity, With<Vignette>>,
    image: Option<Res<VignetteImage>>,
    mut images: ResMut<Assets<Image>>,
) {
    for entity in &vignettes {
        commands.entity(entity).despawn();
    }
    if let Some(image) = image {
        images.remove(&image.0);
    }
    commands.remove_resource::<VignetteImage>();
}

pub fn fade_vignette(gate: Res<VisibilityGate>, mut vignettes: Query<&mut ImageNode, With<Vignette>>) {
    let tint = vignette_tint(&gate);
    for mut node in &mut vignettes {
        if node.color != tint {
            node.color = tint;
        }
    }
}

fn vignette_tint(gate: &VisibilityGate) -> Color { Color::WHITE.with_alpha(gate.opacity()) }
