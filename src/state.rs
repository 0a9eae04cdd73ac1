use bevy::dev_tools::states::*;
use bevy::prelude::*;

pub struct StatePlugin;

impl Plugin for StatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<StarfieldLifecycle>()
            .add_systems(
                Update,
                start_render_loop.run_if(in_state(StarfieldLifecycle::Uninitialized)),
            )
            .add_systems(Update, log_transitions::<StarfieldLifecycle>);
    }
}

/// Lifecycle of the starfield backdrop.
///
/// `OnEnter(Uninitialized)` mounts the field (particles, sprite, camera), the first frame after
/// that moves to `Running`, and `OnEnter(Unmounted)` tears everything down again. The per-frame
/// systems only run in `Running`, so after teardown they are simply no longer invoked.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Reflect, States)]
pub enum StarfieldLifecycle {
    #[default]
    Uninitialized,
    Running,
    Unmounted,
}

impl StarfieldLifecycle {
    /// Where the remount control takes us from `self`: a mounted field is torn down, a torn
    /// down one is mounted fresh.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unmounted => Self::Uninitialized,
            Self::Uninitialized | Self::Running => Self::Unmounted,
        }
    }
}

fn start_render_loop(mut next_state: ResMut<NextState<StarfieldLifecycle>>) {
    debug!("starfield mounted, starting render loop");
    next_state.set(StarfieldLifecycle::Running);
}

/// Flips between mounted and unmounted; wired to the remount action
pub fn toggle_mount(
    state: Res<State<StarfieldLifecycle>>,
    mut next_state: ResMut<NextState<StarfieldLifecycle>>,
) {
    let next = state.get().toggled();
    debug!("starfield lifecycle {:?} -> {next:?}", state.get());
    next_state.set(next);
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, StatePlugin));
        app
    }

    fn current(app: &App) -> StarfieldLifecycle {
        *app.world().resource::<State<StarfieldLifecycle>>().get()
    }

    #[test]
    fn toggled_alternates_between_mounted_and_unmounted() {
        assert_eq!(
            StarfieldLifecycle::Running.toggled(),
            StarfieldLifecycle::Unmounted
        );
        assert_eq!(
            StarfieldLifecycle::Uninitialized.toggled(),
            StarfieldLifecycle::Unmounted
        );
        assert_eq!(
            StarfieldLifecycle::Unmounted.toggled(),
            StarfieldLifecycle::Uninitialized
        );
    }

    #[test]
    fn first_frame_after_mount_starts_running() {
        let mut app = lifecycle_app();
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Uninitialized);
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Running);
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Running);
    }

    #[test]
    fn remount_goes_through_uninitialized_again() {
        let mut app = lifecycle_app();
        app.update();
        app.update();

        app.world_mut()
            .run_system_cached(toggle_mount)
            .expect("toggle runs");
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Unmounted);
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Unmounted);

        app.world_mut()
            .run_system_cached(toggle_mount)
            .expect("toggle runs");
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Uninitialized);
        app.update();
        assert_eq!(current(&app), StarfieldLifecycle::Running);
    }
}
