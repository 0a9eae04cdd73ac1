mod camera;
mod config;
mod constants;
mod field;
mod generator;
mod motion;
mod render_loop;
mod sprite;
mod vignette;
mod visibility;
mod zoom;

use bevy::prelude::*;

pub use camera::StarfieldCamera;
use config::StarfieldConfigPlugin;
pub use visibility::VisibilityGate;

use crate::schedule::FrameSet;
use crate::scroll::SmoothedScroll;
use crate::state::StarfieldLifecycle;

pub struct StarfieldPlugin;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(StarfieldConfigPlugin)
            .add_plugins(RenderLoopPlugin);
    }
}

/// Mount/unmount and the per-frame systems, without the inspector windows
pub struct RenderLoopPlugin;

impl Plugin for RenderLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisibilityGate>()
            .init_resource::<render_loop::PointerState>()
            .init_resource::<zoom::TargetDepth>()
            .add_systems(
                OnEnter(StarfieldLifecycle::Uninitialized),
                (
                    field::mount_starfield,
                    camera::spawn_starfield_camera,
                    vignette::spawn_vignette,
                ),
            )
            .add_systems(
                OnEnter(StarfieldLifecycle::Unmounted),
                (
                    field::unmount_starfield,
                    camera::despawn_starfield_camera,
                    vignette::despawn_vignette,
                ),
            )
            .add_systems(
                Update,
                render_loop::capture_pointer.in_set(FrameSet::UserInput),
            )
            .add_systems(
                Update,
                (
                    render_loop::tick_visibility_gate,
                    zoom::track_scroll_depth.run_if(resource_changed::<SmoothedScroll>),
                )
                    .in_set(FrameSet::FieldSignals),
            )
            .add_systems(
                Update,
                (
                    render_loop::rotate_field,
                    render_loop::parallax_camera,
                    render_loop::pulse_material,
                    zoom::zoom_camera,
                )
                    .chain()
                    .in_set(FrameSet::RenderLoop),
            )
            .add_systems(
                Update,
                (
                    render_loop::orient_stars,
                    render_loop::apply_material_opacity,
                    render_loop::apply_gate_visibility,
                    camera::update_backdrop,
                    vignette::fade_vignette,
                )
                    .in_set(FrameSet::Presentation),
            );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraOrder {
    Starfield,
    Page,
}

impl CameraOrder {
    pub const fn order(self) -> isize {
        match self {
            Self::Starfield => 0,
            Self::Page => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::asset::AssetEvent;
    use bevy::asset::AssetPlugin;
    use bevy::ecs::message::MessageReader;
    use bevy::input::mouse::AccumulatedMouseScroll;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use bevy::window::CursorEntered;
    use bevy::window::CursorLeft;
    use bevy::window::CursorMoved;
    use bevy::window::PrimaryWindow;
    use bevy::window::WindowResolution;

    use super::config::MotionConfig;
    use super::config::StarfieldConfig;
    use super::field::Star;
    use super::field::StarField;
    use super::field::StarfieldAssets;
    use super::generator::ParticleSet;
    use super::motion::FieldOrientation;
    use super::motion::MaterialPulse;
    use super::render_loop::PointerState;
    use super::vignette::Vignette;
    use super::vignette::VignetteImage;
    use super::zoom::TargetDepth;
    use super::*;
    use crate::page::PageLayout;
    use crate::schedule::SchedulePlugin;
    use crate::scroll::ScrollSignalPlugin;
    use crate::scroll::ScrollState;
    use crate::state::StatePlugin;
    use crate::state::toggle_mount;

    const STARS: usize = 64;

    /// Counts `AssetEvent::Modified` for star materials, i.e. material uploads
    #[derive(Resource, Default)]
    struct MaterialWrites(usize);

    fn count_material_writes(
        mut events: MessageReader<AssetEvent<StandardMaterial>>,
        mut writes: ResMut<MaterialWrites>,
    ) {
        writes.0 += events
            .read()
            .filter(|event| matches!(event, AssetEvent::Modified { .. }))
            .count();
    }

    fn starfield_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, AssetPlugin::default()))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Image>()
            .add_message::<CursorMoved>()
            .add_message::<CursorLeft>()
            .add_message::<CursorEntered>()
            .init_resource::<AccumulatedMouseScroll>()
            .init_resource::<ClearColor>()
            .init_resource::<PageLayout>()
            .insert_resource(StarfieldConfig {
                star_count: STARS,
                seed: Some(7),
                ..default()
            })
            .init_resource::<MotionConfig>()
            .init_resource::<MaterialWrites>()
            .add_plugins((StatePlugin, SchedulePlugin, ScrollSignalPlugin, RenderLoopPlugin))
            .add_systems(Last, count_material_writes);
        app.world_mut().spawn((
            Window {
                resolution: WindowResolution::new(800, 600),
                ..default()
            },
            PrimaryWindow,
        ));
        // mount, then the first running frame
        app.update();
        app.update();
        app
    }

    fn run_frames(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.update();
        }
    }

    fn primary_window(app: &mut App) -> Entity {
        let world = app.world_mut();
        world
            .query_filtered::<Entity, With<PrimaryWindow>>()
            .single(world)
            .expect("one primary window")
    }

    fn move_cursor(app: &mut App, position: Vec2) {
        let window = primary_window(app);
        app.world_mut().write_message(CursorMoved {
            window,
            position,
            delta: None,
        });
    }

    fn leave_window(app: &mut App) {
        let window = primary_window(app);
        app.world_mut().write_message(CursorLeft { window });
    }

    fn enter_window(app: &mut App) {
        let window = primary_window(app);
        app.world_mut().write_message(CursorEntered { window });
    }

    fn pointer(app: &App) -> Option<Vec2> { app.world().resource::<PointerState>().ndc }

    fn star_positions(app: &mut App) -> Vec<Vec3> {
        let world = app.world_mut();
        world
            .query_filtered::<&Transform, With<Star>>()
            .iter(world)
            .map(|transform| transform.translation)
            .collect()
    }

    fn orientation(app: &mut App) -> FieldOrientation {
        let world = app.world_mut();
        *world
            .query_filtered::<&FieldOrientation, With<StarField>>()
            .single(world)
            .expect("one field")
    }

    fn field_visibility(app: &mut App) -> Visibility {
        let world = app.world_mut();
        *world
            .query_filtered::<&Visibility, With<StarField>>()
            .single(world)
            .expect("one field")
    }

    fn camera_translation(app: &mut App) -> Vec3 {
        let world = app.world_mut();
        world
            .query_filtered::<&Transform, With<StarfieldCamera>>()
            .single(world)
            .expect("one starfield camera")
            .translation
    }

    fn vignette_alpha(app: &mut App) -> f32 {
        let world = app.world_mut();
        world
            .query_filtered::<&ImageNode, With<Vignette>>()
            .single(world)
            .expect("one vignette")
            .color
            .alpha()
    }

    fn hide(app: &mut App) {
        app.world_mut()
            .resource_mut::<VisibilityGate>()
            .set_visible(false);
    }

    #[test]
    fn mount_spawns_every_particle_once() {
        let mut app = starfield_app();
        let positions = star_positions(&mut app);
        assert_eq!(positions.len(), STARS);
        assert_eq!(app.world().resource::<ParticleSet>().len(), STARS);

        run_frames(&mut app, 30);
        assert_eq!(star_positions(&mut app), positions);
        assert_eq!(app.world().resource::<ParticleSet>().seed(), 7);
    }

    #[test]
    fn pointer_move_aims_the_field() {
        let mut app = starfield_app();
        move_cursor(&mut app, Vec2::new(600.0, 150.0));
        app.update();

        assert_eq!(pointer(&app), Some(Vec2::new(0.5, 0.5)));
        let target = orientation(&mut app).target;
        assert!((target.x - 0.175).abs() < 1e-6);
        assert!((target.y - -0.275).abs() < 1e-6);
    }

    #[test]
    fn leaving_right_after_an_edge_move_clears_the_pointer() {
        let mut app = starfield_app();
        move_cursor(&mut app, Vec2::new(700.0, 300.0));
        app.update();
        run_frames(&mut app, 30);
        assert!(camera_translation(&mut app).x > 1.0);

        // the last move lands on the edge and the leave follows in the same frame
        move_cursor(&mut app, Vec2::new(799.0, 300.0));
        leave_window(&mut app);
        app.update();
        assert_eq!(pointer(&app), None);

        run_frames(&mut app, 300);
        assert!(camera_translation(&mut app).x.abs() < 1e-3);
        let pulse = *app.world().resource::<MaterialPulse>();
        assert!((pulse.size - 1.1).abs() < 1e-3);
    }

    #[test]
    fn coming_back_in_the_same_frame_keeps_the_pointer() {
        let mut app = starfield_app();
        leave_window(&mut app);
        enter_window(&mut app);
        move_cursor(&mut app, Vec2::new(600.0, 150.0));
        app.update();
        assert_eq!(pointer(&app), Some(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn hidden_field_ignores_the_pointer() {
        let mut app = starfield_app();
        app.insert_resource(VisibilityGate::new(false));
        move_cursor(&mut app, Vec2::new(600.0, 150.0));
        app.update();

        assert_eq!(pointer(&app), None);
        assert_eq!(orientation(&mut app).target, Vec2::ZERO);
    }

    #[test]
    fn scrolling_to_the_bottom_zooms_the_camera_out() {
        let mut app = starfield_app();
        assert_eq!(app.world().resource::<TargetDepth>().0, 120.0);

        app.world_mut()
            .resource_mut::<ScrollState>()
            .scroll_to_bottom();
        let mut previous = camera_translation(&mut app).z;
        for _ in 0..200 {
            app.update();
            let depth = camera_translation(&mut app).z;
            assert!(depth >= previous && depth <= 180.0, "camera depth went to {depth}");
            previous = depth;
        }

        assert_eq!(app.world().resource::<TargetDepth>().0, 180.0);
        assert!((previous - 180.0).abs() < 1e-2);
    }

    #[test]
    fn material_is_only_written_when_its_alpha_changes() {
        let mut app = starfield_app();
        run_frames(&mut app, 5);
        let settled = app.world().resource::<MaterialWrites>().0;
        run_frames(&mut app, 10);
        assert_eq!(app.world().resource::<MaterialWrites>().0, settled);

        hide(&mut app);
        run_frames(&mut app, 3);
        assert!(app.world().resource::<MaterialWrites>().0 > settled);
    }

    #[test]
    fn hiding_keeps_positions_and_rotation() {
        let mut app = starfield_app();
        let positions = star_positions(&mut app);
        let before = orientation(&mut app);
        assert_eq!(vignette_alpha(&mut app), 1.0);

        hide(&mut app);
        // 0.5 s fade at 50 ms per frame
        run_frames(&mut app, 15);
        assert_eq!(app.world().resource::<VisibilityGate>().opacity(), 0.0);
        assert_eq!(field_visibility(&mut app), Visibility::Hidden);
        assert_eq!(vignette_alpha(&mut app), 0.0);

        let hidden = orientation(&mut app);
        assert!(
            hidden.rotation.y > before.rotation.y,
            "drift keeps running while hidden"
        );

        app.world_mut()
            .resource_mut::<VisibilityGate>()
            .set_visible(true);
        app.update();
        assert_eq!(field_visibility(&mut app), Visibility::Inherited);
        assert!(vignette_alpha(&mut app) > 0.0);
        assert!(orientation(&mut app).rotation.y > hidden.rotation.y);
        assert_eq!(star_positions(&mut app), positions);
    }

    #[test]
    fn unmount_releases_sprite_mesh_material_and_vignette() {
        let mut app = starfield_app();
        let assets = app.world().resource::<StarfieldAssets>().clone();
        let vignette = app.world().resource::<VignetteImage>().0.clone();

        app.world_mut()
            .run_system_cached(toggle_mount)
            .expect("toggle runs");
        app.update();

        let world = app.world();
        assert!(world.resource::<Assets<Mesh>>().get(&assets.mesh).is_none());
        assert!(
            world
                .resource::<Assets<StandardMaterial>>()
                .get(&assets.material)
                .is_none()
        );
        let images = world.resource::<Assets<Image>>();
        assert!(images.get(&assets.sprite).is_none());
        assert!(images.get(&vignette).is_none());
        assert!(!world.contains_resource::<StarfieldAssets>());
        assert!(!world.contains_resource::<ParticleSet>());
        assert!(!world.contains_resource::<VignetteImage>());
        assert!(star_positions(&mut app).is_empty());

        let world = app.world_mut();
        let leftovers = world
            .query_filtered::<Entity, Or<(With<StarfieldCamera>, With<Vignette>)>>()
            .iter(world)
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn remount_builds_the_same_seeded_field() {
        let mut app = starfield_app();
        let first = app.world().resource::<ParticleSet>().positions().to_vec();

        app.world_mut()
            .run_system_cached(toggle_mount)
            .expect("toggle runs");
        app.update();
        app.world_mut()
            .run_system_cached(toggle_mount)
            .expect("toggle runs");
        app.update();

        assert_eq!(app.world().resource::<ParticleSet>().positions(), first);
        assert_eq!(star_positions(&mut app).len(), STARS);
    }
}
