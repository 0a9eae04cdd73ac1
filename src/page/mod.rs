mod progress_bar;
mod sections;

use bevy::color::palettes::tailwind;
use bevy::prelude::*;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
pub use sections::ActiveSection;
pub use sections::PageSection;
pub use sections::SectionSlot;

use crate::input::Inspector;
use crate::input::toggle_active;
use crate::schedule::FrameSet;
use crate::starfield::CameraOrder;
use crate::starfield::StarfieldCamera;

/// The page around the starfield: its layout, the section observer that drives the starfield's
/// visibility, the scroll progress bar and the UI camera.
pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<PageLayout>::default().run_if(toggle_active(Inspector::Page)),
        )
        .add_plugins(SectionObserverPlugin)
        .add_systems(Startup, (spawn_page_camera, progress_bar::spawn_progress_bar))
        .add_systems(
            Update,
            (
                update_page_background,
                page_camera_clear,
                progress_bar::update_progress_bar,
            )
                .in_set(FrameSet::PageSignals),
        );
    }
}

/// Layout and section observer without the camera, UI and inspector
pub struct SectionObserverPlugin;

impl Plugin for SectionObserverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageLayout>()
            .init_resource::<ActiveSection>()
            .add_systems(
                Update,
                sections::observe_sections.in_set(FrameSet::PageSignals),
            );
    }
}

/// Shape of the virtual document being scrolled
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
pub struct PageLayout {
    pub sections:   Vec<SectionSlot>,
    /// Shown wherever the starfield is faded out or unmounted
    pub background: Color,
    /// Left to right stops of the scroll progress bar
    pub bar_colors: Vec<Color>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            sections:   vec![
                SectionSlot::new(PageSection::Home, 1.0, true),
                SectionSlot::new(PageSection::About, 1.0, true),
                SectionSlot::new(PageSection::Skills, 1.5, true),
                SectionSlot::new(PageSection::Coursework, 1.0, false),
                SectionSlot::new(PageSection::Projects, 1.5, false),
                SectionSlot::new(PageSection::Contact, 1.0, false),
            ],
            background: Color::from(tailwind::SLATE_950),
            bar_colors: vec![
                Color::from(tailwind::SKY_400),
                Color::from(tailwind::FUCHSIA_400),
                Color::from(tailwind::INDIGO_400),
            ],
        }
    }
}

impl PageLayout {
    /// Total height in logical pixels for a viewport of `viewport_height`
    pub fn document_height(&self, viewport_height: f32) -> f32 {
        self.sections
            .iter()
            .map(|slot| slot.height.max(1.0) * viewport_height)
            .sum()
    }

    pub fn shows_starfield(&self, section: PageSection) -> bool {
        self.sections
            .iter()
            .any(|slot| slot.section == section && slot.starfield)
    }
}

/// Camera for the page overlay, drawn above the starfield
#[derive(Component, Debug)]
struct PageCamera;

fn spawn_page_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("PageCamera"),
        PageCamera,
        Camera2d,
        Camera {
            order: CameraOrder::Page.order(),
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
    ));
}

fn update_page_background(layout: Res<PageLayout>, mut clear_color: ResMut<ClearColor>) {
    if layout.is_changed() {
        clear_color.0 = layout.background;
    }
}

/// With the starfield mounted its camera clears the frame; without it the page camera has to
fn page_camera_clear(
    starfield: Query<(), With<StarfieldCamera>>,
    mut cameras: Query<&mut Camera, With<PageCamera>>,
) {
    let should_clear = starfield.is_empty();
    for mut camera in &mut cameras {
        let clears = !matches!(camera.clear_color, ClearColorConfig::None);
        if clears != should_clear {
            camera.clear_color = if should_clear {
                ClearColorConfig::Default
            } else {
                ClearColorConfig::None
            };
        }
    }
}
