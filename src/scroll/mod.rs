//! The document scroll position and its smoothed counterpart.
//!
//! `ScrollState` is the raw signal: an offset into the virtual page, driven by the mouse wheel
//! and the page keys, normalized to progress in [0, 1]. `SmoothedScroll` follows it through a
//! spring and is what the starfield zoom subscribes to.

mod spring;

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::input::mouse::MouseScrollUnit;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_enhanced_input::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
pub use spring::SpringConfig;
use spring::SpringState;

use crate::input::Inspector;
use crate::input::ScrollLineDown;
use crate::input::ScrollLineUp;
use crate::input::ScrollPageDown;
use crate::input::ScrollPageUp;
use crate::input::ScrollToBottom;
use crate::input::ScrollToTop;
use crate::input::toggle_active;
use crate::page::PageLayout;
use crate::schedule::FrameSet;

/// Logical pixels one wheel notch or arrow key moves the page
pub const LINE_HEIGHT: f32 = 40.0;

/// Share of the viewport a page key moves, leaving some overlap for context
pub const PAGE_FRACTION: f32 = 0.9;

pub struct ScrollPlugin;

impl Plugin for ScrollPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<SpringConfig>::default()
                .run_if(toggle_active(Inspector::Page)),
        )
        .add_plugins(ScrollSignalPlugin)
        .add_observer(on_page_down)
        .add_observer(on_page_up)
        .add_observer(on_line_down)
        .add_observer(on_line_up)
        .add_observer(on_scroll_to_top)
        .add_observer(on_scroll_to_bottom);
    }
}

/// Scroll state and smoothing without the input bindings and inspector
pub struct ScrollSignalPlugin;

impl Plugin for ScrollSignalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpringConfig>()
            .init_resource::<ScrollState>()
            .init_resource::<SmoothedScroll>()
            .add_systems(
                Update,
                (sync_document_size, read_mouse_wheel)
                    .chain()
                    .in_set(FrameSet::UserInput),
            )
            .add_systems(Update, smooth_scroll.in_set(FrameSet::PageSignals));
    }
}

/// Raw document scroll position
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct ScrollState {
    offset:          f32,
    viewport_height: f32,
    document_height: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset:          0.0,
            viewport_height: 1.0,
            document_height: 1.0,
        }
    }
}

impl ScrollState {
    pub const fn offset(&self) -> f32 { self.offset }

    pub const fn viewport_height(&self) -> f32 { self.viewport_height }

    pub fn max_offset(&self) -> f32 { (self.document_height - self.viewport_height).max(0.0) }

    /// Scroll progress in [0, 1]; a document that fits the viewport is always at 0
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max <= 0.0 {
            0.0
        } else {
            (self.offset / max).clamp(0.0, 1.0)
        }
    }

    /// New viewport/document geometry, keeping the offset inside the document
    pub fn resize(&mut self, viewport_height: f32, document_height: f32) {
        self.viewport_height = viewport_height.max(0.0);
        self.document_height = document_height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    pub const fn scroll_to_top(&mut self) { self.offset = 0.0; }

    pub fn scroll_to_bottom(&mut self) { self.offset = self.max_offset(); }
}

/// Spring-filtered scroll progress. Only written when the value moves, so
/// `resource_changed::<SmoothedScroll>` fires exactly on change.
#[derive(Resource, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct SmoothedScroll {
    state: SpringState,
}

impl SmoothedScroll {
    pub const fn value(&self) -> f32 { self.state.value }
}

fn sync_document_size(
    layout: Res<PageLayout>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scroll: ResMut<ScrollState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport_height = window.height();
    let document_height = layout.document_height(viewport_height);
    if scroll.viewport_height != viewport_height || scroll.document_height != document_height {
        scroll.resize(viewport_height, document_height);
    }
}

/// Wheel delta in logical pixels, positive scrolls down the page
pub fn wheel_to_pixels(unit: MouseScrollUnit, delta_y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -delta_y * LINE_HEIGHT,
        MouseScrollUnit::Pixel => -delta_y,
    }
}

fn read_mouse_wheel(wheel: Res<AccumulatedMouseScroll>, mut scroll: ResMut<ScrollState>) {
    if wheel.delta.y != 0.0 {
        scroll.scroll_by(wheel_to_pixels(wheel.unit, wheel.delta.y));
    }
}

fn smooth_scroll(
    time: Res<Time>,
    config: Res<SpringConfig>,
    scroll: Res<ScrollState>,
    mut smoothed: ResMut<SmoothedScroll>,
) {
    let next = smoothed
        .state
        .step(scroll.progress(), time.delta_secs(), &config);
    smoothed.set_if_neq(SmoothedScroll { state: next });
}

fn on_page_down(_scroll: On<Start<ScrollPageDown>>, mut scroll: ResMut<ScrollState>) {
    let page = scroll.viewport_height() * PAGE_FRACTION;
    scroll.scroll_by(page);
}

fn on_page_up(_scroll: On<Start<ScrollPageUp>>, mut scroll: ResMut<ScrollState>) {
    let page = scroll.viewport_height() * PAGE_FRACTION;
    scroll.scroll_by(-page);
}

fn on_line_down(_scroll: On<Start<ScrollLineDown>>, mut scroll: ResMut<ScrollState>) {
    scroll.scroll_by(LINE_HEIGHT);
}

fn on_line_up(_scroll: On<Start<ScrollLineUp>>, mut scroll: ResMut<ScrollState>) {
    scroll.scroll_by(-LINE_HEIGHT);
}

fn on_scroll_to_top(_scroll: On<Start<ScrollToTop>>, mut scroll: ResMut<ScrollState>) {
    scroll.scroll_to_top();
}

fn on_scroll_to_bottom(_scroll: On<Start<ScrollToBottom>>, mut scroll: ResMut<ScrollState>) {
    scroll.scroll_to_bottom();
}
