use bevy::prelude::*;
use bevy::ui::BackgroundGradient;
use bevy::ui::ColorStop;
use bevy::ui::LinearGradient;

use super::PageLayout;
use crate::scroll::ScrollState;

/// Thin bar along the top edge whose width is the raw scroll progress
#[derive(Component, Debug)]
pub struct ScrollProgressBar;

/// Left-to-right gradient through the layout's bar colours, evenly spaced
pub fn bar_gradient(layout: &PageLayout) -> BackgroundGradient {
    let stops = layout
        .bar_colors
        .iter()
        .copied()
        .map(ColorStop::auto)
        .collect();
    BackgroundGradient::from(LinearGradient::new(LinearGradient::TO_RIGHT, stops))
}

pub fn spawn_progress_bar(mut commands: Commands, layout: Res<PageLayout>) {
    commands.spawn((
        Name::new("ScrollProgressBar"),
        ScrollProgressBar,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            width: Val::Percent(0.0),
            height: Val::Px(2.0),
            ..default()
        },
        bar_gradient(&layout),
        GlobalZIndex(60),
    ));
}

pub fn update_progress_bar(
    scroll: Res<ScrollState>,
    layout: Res<PageLayout>,
    mut bars: Query<(&mut Node, &mut BackgroundGradient), With<ScrollProgressBar>>,
) {
    let width = Val::Percent(scroll.progress() * 100.0);
    for (mut node, mut gradient) in &mut bars {
        if node.width != width {
            node.width = width;
        }
        if layout.is_changed() {
            *gradient = bar_gradient(&layout);
        }
    }
}
