use bevy::prelude::*;

use super::PageLayout;
use crate::scroll::ScrollState;
use crate::starfield::VisibilityGate;

/// Sections of the portfolio page, top to bottom
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSection {
    #[default]
    Home,
    About,
    Skills,
    Coursework,
    Projects,
    Contact,
}

/// One section's slot in the document
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SectionSlot {
    pub section:   PageSection,
    /// Height in viewport heights; every section is at least one screen tall
    pub height:    f32,
    /// Whether the starfield shows while this section is active
    pub starfield: bool,
}

impl SectionSlot {
    pub const fn new(section: PageSection, height: f32, starfield: bool) -> Self {
        Self {
            section,
            height,
            starfield,
        }
    }
}

/// Section the viewport is currently on
#[derive(Resource, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Resource)]
pub struct ActiveSection(pub PageSection);

/// The section whose span holds the viewport's vertical midline. Past the end of the document
/// the last section stays active.
pub fn section_at(layout: &PageLayout, offset: f32, viewport_height: f32) -> PageSection {
    let midline = viewport_height.mul_add(0.5, offset);
    let mut bottom = 0.0;
    for slot in &layout.sections {
        bottom += slot.height.max(1.0) * viewport_height;
        if midline < bottom {
            return slot.section;
        }
    }
    layout
        .sections
        .last()
        .map_or(PageSection::default(), |slot| slot.section)
}

/// The page's section observer: tracks the active section and feeds the starfield's
/// visibility gate. The very first observation is applied without a fade.
pub fn observe_sections(
    layout: Res<PageLayout>,
    scroll: Res<ScrollState>,
    mut active: ResMut<ActiveSection>,
    mut gate: ResMut<VisibilityGate>,
    mut observed: Local<bool>,
) {
    let section = section_at(&layout, scroll.offset(), scroll.viewport_height());
    let visible = layout.shows_starfield(section);

    if !*observed {
        *observed = true;
        *gate = VisibilityGate::new(visible);
    } else if gate.visible() != visible {
        gate.set_visible(visible);
    }

    if active.0 != section {
        debug!("active section {:?} -> {section:?}, starfield visible: {visible}", active.0);
        active.0 = section;
    }
}

#[cfg(test)]
mod tests {
    use bevy::time::TimeUpdateStrategy;

    use super::*;

    const VIEWPORT: f32 = 1000.0;

    #[test]
    fn midline_picks_the_section() {
        let layout = PageLayout::default();
        assert_eq!(section_at(&layout, 0.0, VIEWPORT), PageSection::Home);
        assert_eq!(section_at(&layout, 499.0, VIEWPORT), PageSection::Home);
        assert_eq!(section_at(&layout, 500.0, VIEWPORT), PageSection::About);
        // skills spans 2000..3500
        assert_eq!(section_at(&layout, 2900.0, VIEWPORT), PageSection::Skills);
        assert_eq!(section_at(&layout, 3000.0, VIEWPORT), PageSection::Coursework);
    }

    #[test]
    fn bottom_of_the_page_is_the_last_section() {
        let layout = PageLayout::default();
        let document = layout.document_height(VIEWPORT);
        assert_eq!(
            section_at(&layout, document - VIEWPORT, VIEWPORT),
            PageSection::Contact
        );
        assert_eq!(section_at(&layout, document * 3.0, VIEWPORT), PageSection::Contact);
    }

    #[test]
    fn starfield_shows_on_the_first_three_sections_only() {
        let layout = PageLayout::default();
        assert!(layout.shows_starfield(PageSection::Home));
        assert!(layout.shows_starfield(PageSection::About));
        assert!(layout.shows_starfield(PageSection::Skills));
        assert!(!layout.shows_starfield(PageSection::Coursework));
        assert!(!layout.shows_starfield(PageSection::Projects));
        assert!(!layout.shows_starfield(PageSection::Contact));
    }

    fn observer_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(
                std::time::Duration::from_millis(100),
            ))
            .init_resource::<PageLayout>()
            .init_resource::<ActiveSection>()
            .init_resource::<VisibilityGate>()
            .add_systems(Update, observe_sections);
        let document = app
            .world()
            .resource::<PageLayout>()
            .document_height(VIEWPORT);
        let mut scroll = ScrollState::default();
        scroll.resize(VIEWPORT, document);
        app.insert_resource(scroll);
        app
    }

    #[test]
    fn scrolling_past_skills_hides_the_starfield() {
        let mut app = observer_app();
        app.update();
        assert!(app.world().resource::<VisibilityGate>().visible());

        app.world_mut()
            .resource_mut::<ScrollState>()
            .scroll_by(4000.0);
        app.update();
        assert_eq!(
            app.world().resource::<ActiveSection>().0,
            PageSection::Projects
        );
        let gate = app.world().resource::<VisibilityGate>();
        assert!(!gate.visible());
        assert!(gate.is_fading());
    }

    #[test]
    fn first_observation_snaps_without_fading() {
        let mut app = observer_app();
        app.world_mut()
            .resource_mut::<ScrollState>()
            .scroll_by(4000.0);
        app.update();
        let gate = app.world().resource::<VisibilityGate>();
        assert!(!gate.visible());
        assert!(!gate.is_fading());
        assert_eq!(gate.opacity(), 0.0);
    }
}
