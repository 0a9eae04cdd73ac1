//! Starback - the animated starfield backdrop of a single-page portfolio, built with Bevy 0.18
//!
//! - A fixed field of soft additive point sprites on random spherical shells
//! - Pointer-driven rotation, camera parallax and a size/opacity pulse
//! - Scroll-driven camera zoom through a spring-smoothed scroll signal
//! - A visibility gate that fades the field out past the first page sections
//! - Bevy Remote Protocol (BRP) support for debugging

mod input;
mod page;
mod schedule;
mod scroll;
mod starfield;
mod state;
mod traits;

use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::window::PresentMode;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;
use bevy_window_manager::WindowManagerPlugin;

use crate::input::InputPlugin;
use crate::page::PagePlugin;
use crate::schedule::SchedulePlugin;
use crate::scroll::ScrollPlugin;
use crate::starfield::StarfieldPlugin;
use crate::state::StatePlugin;

fn main() {
    let mut app = App::new();

    // Get effective port from BrpExtrasPlugin to include in window title if non-default
    let brp_plugin = BrpExtrasPlugin::default();
    let (effective_port, _) = brp_plugin.get_effective_port();
    let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
        "starback".to_string()
    } else {
        format!("starback - {effective_port}")
    };

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(WindowManagerPlugin);

    #[cfg(target_arch = "wasm32")]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            present_mode: PresentMode::AutoVsync,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }));

    app.add_plugins((
        EguiPlugin::default(),
        brp_plugin,
        InputPlugin,
        PagePlugin,
        SchedulePlugin,
        ScrollPlugin,
        StarfieldPlugin,
        StatePlugin,
    ))
    .run();
}
