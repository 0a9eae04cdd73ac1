use bevy::prelude::*;

use crate::state::StarfieldLifecycle;

/// Per-frame ordering for the page and the starfield render loop.
///
/// Input handlers write plain state, page signals derive scroll progress and the active
/// section from it, field signals turn those into a target depth and a fade, the render loop
/// mutates field, camera and material in order, and presentation pushes the result onto the
/// entities that get drawn.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FrameSet {
    UserInput,
    PageSignals,
    FieldSignals,
    RenderLoop,
    Presentation,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::UserInput,
                FrameSet::PageSignals,
                FrameSet::FieldSignals,
                FrameSet::RenderLoop,
                FrameSet::Presentation,
            )
                .chain(),
        )
        // the page keeps scrolling while the starfield is torn down, but nothing that touches
        // the field, its camera or its material may run unless it is mounted and running
        .configure_sets(
            Update,
            FrameSet::RenderLoop.run_if(in_state(StarfieldLifecycle::Running)),
        )
        .configure_sets(
            Update,
            FrameSet::Presentation.run_if(in_state(StarfieldLifecycle::Running)),
        );
    }
}
