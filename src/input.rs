//! Keyboard controls for the page: scrolling, starfield remount and the inspector windows.
//! Bindings live on a single `PageControls` context entity.

use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use crate::state::toggle_mount;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin)
            .add_input_context::<PageControls>()
            .init_resource::<InspectorToggles>()
            .add_systems(Startup, spawn_page_controls)
            .add_observer(on_remount)
            .add_observer(on_toggle_starfield_inspector)
            .add_observer(on_toggle_motion_inspector)
            .add_observer(on_toggle_page_inspector);
    }
}

/// Input context carrying every page-level action
#[derive(Component)]
pub struct PageControls;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ScrollPageDown;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ScrollPageUp;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ScrollLineDown;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ScrollLineUp;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ScrollToTop;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ScrollToBottom;

#[derive(InputAction)]
#[action_output(bool)]
struct Remount;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleStarfieldInspector;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleMotionInspector;

#[derive(InputAction)]
#[action_output(bool)]
struct TogglePageInspector;

fn spawn_page_controls(mut commands: Commands) {
    commands.spawn((
        Name::new("PageControls"),
        PageControls,
        actions!(PageControls[
            (Action::<ScrollPageDown>::new(), bindings![KeyCode::PageDown, KeyCode::Space]),
            (Action::<ScrollPageUp>::new(), bindings![KeyCode::PageUp]),
            (Action::<ScrollLineDown>::new(), bindings![KeyCode::ArrowDown]),
            (Action::<ScrollLineUp>::new(), bindings![KeyCode::ArrowUp]),
            (Action::<ScrollToTop>::new(), bindings![KeyCode::Home]),
            (Action::<ScrollToBottom>::new(), bindings![KeyCode::End]),
            (Action::<Remount>::new(), bindings![KeyCode::F5]),
            (Action::<ToggleStarfieldInspector>::new(), bindings![KeyCode::F1]),
            (Action::<ToggleMotionInspector>::new(), bindings![KeyCode::F2]),
            (Action::<TogglePageInspector>::new(), bindings![KeyCode::F3]),
        ]),
    ));
}

/// Which inspector windows are open
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct InspectorToggles {
    pub starfield: bool,
    pub motion:    bool,
    pub page:      bool,
}

/// Which inspector a `toggle_active` run condition watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inspector {
    Starfield,
    Motion,
    Page,
}

impl InspectorToggles {
    const fn get(self, inspector: Inspector) -> bool {
        match inspector {
            Inspector::Starfield => self.starfield,
            Inspector::Motion => self.motion,
            Inspector::Page => self.page,
        }
    }
}

/// Run condition for `ResourceInspectorPlugin`s, true while the inspector is toggled on
pub fn toggle_active(inspector: Inspector) -> impl Fn(Res<InspectorToggles>) -> bool + Clone {
    move |toggles: Res<InspectorToggles>| toggles.get(inspector)
}

fn on_remount(_remount: On<Start<Remount>>, mut commands: Commands) {
    commands.run_system_cached(toggle_mount);
}

fn on_toggle_starfield_inspector(
    _toggle: On<Start<ToggleStarfieldInspector>>,
    mut toggles: ResMut<InspectorToggles>,
) {
    toggles.starfield = !toggles.starfield;
}

fn on_toggle_motion_inspector(
    _toggle: On<Start<ToggleMotionInspector>>,
    mut toggles: ResMut<InspectorToggles>,
) {
    toggles.motion = !toggles.motion;
}

fn on_toggle_page_inspector(
    _toggle: On<Start<TogglePageInspector>>,
    mut toggles: ResMut<InspectorToggles>,
) {
    toggles.page = !toggles.page;
}
