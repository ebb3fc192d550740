//! Presentation lifecycle and view state.
//!
//! The runtime feeds [`Event`]s into [`Deck::dispatch`] and executes the
//! returned [`Effect`]s. Nothing else mutates the deck.

use std::collections::BTreeSet;

use crate::slide::{Presentation, SlideContent};

const EMPTY_ERROR_FALLBACK: &str = "Failed to generate presentation. Please try again.";
const NO_SLIDES_MESSAGE: &str = "generation service returned no slides";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mount,
    Regenerate,
    GenerationSucceeded(Presentation),
    GenerationFailed(String),
    Next,
    Previous,
    JumpTo(usize),
    ToggleNotes,
    ToggleFullscreen,
    /// The window reports its actual fullscreen state.
    FullscreenChanged(bool),
    ImageLoaded(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartGeneration,
    SetFullscreen(bool),
}

/// What the user is looking at while a presentation is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    current_index: usize,
    notes_visible: bool,
    fullscreen: bool,
    image_loaded: BTreeSet<usize>,
}

impl ViewState {
    fn new(fullscreen: bool) -> Self {
        Self {
            fullscreen,
            ..Self::default()
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn notes_visible(&self) -> bool {
        self.notes_visible
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_image_loaded(&self, index: usize) -> bool {
        self.image_loaded.contains(&index)
    }

    pub fn next(&mut self, len: usize) {
        if self.current_index + 1 < len {
            self.current_index += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    pub fn jump_to(&mut self, index: usize, len: usize) {
        if index < len {
            self.current_index = index;
        } else {
            log::warn!("ignoring jump to slide {index}, presentation has {len} slides");
        }
    }

    pub fn toggle_notes(&mut self) {
        self.notes_visible = !self.notes_visible;
    }

    pub fn mark_image_loaded(&mut self, index: usize) {
        self.image_loaded.insert(index);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Lifecycle {
    #[default]
    Idle,
    /// `previous` holds the last presentation while a regeneration is in flight.
    Loading { previous: Option<Presentation> },
    Success {
        presentation: Presentation,
        view: ViewState,
    },
    Error { message: String },
}

/// Single owner of the lifecycle and, while loaded, the view state.
#[derive(Debug, Default)]
pub struct Deck {
    lifecycle: Lifecycle,
    /// Last fullscreen state reported by the window, kept across presentations.
    fullscreen: bool,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Idle | Lifecycle::Loading { .. })
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        match &self.lifecycle {
            Lifecycle::Success { presentation, .. } => Some(presentation),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<&ViewState> {
        match &self.lifecycle {
            Lifecycle::Success { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn current_slide(&self) -> Option<&SlideContent> {
        match &self.lifecycle {
            Lifecycle::Success { presentation, view } => presentation.get(view.current_index),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Mount => {
                if matches!(self.lifecycle, Lifecycle::Idle) {
                    self.lifecycle = Lifecycle::Loading { previous: None };
                    return vec![Effect::StartGeneration];
                }
                vec![]
            }
            Event::Regenerate => self.regenerate(),
            Event::GenerationSucceeded(slides) => {
                if !matches!(self.lifecycle, Lifecycle::Loading { .. }) {
                    log::debug!("dropping generation result outside of loading");
                    return vec![];
                }
                if slides.is_empty() {
                    self.fail(NO_SLIDES_MESSAGE.to_string());
                    return vec![];
                }
                self.lifecycle = Lifecycle::Success {
                    presentation: slides,
                    view: ViewState::new(self.fullscreen),
                };
                vec![]
            }
            Event::GenerationFailed(message) => {
                if matches!(self.lifecycle, Lifecycle::Loading { .. }) {
                    self.fail(message);
                } else {
                    log::debug!("dropping generation failure outside of loading");
                }
                vec![]
            }
            Event::FullscreenChanged(on) => {
                self.fullscreen = on;
                if let Lifecycle::Success { view, .. } = &mut self.lifecycle {
                    view.fullscreen = on;
                }
                vec![]
            }
            Event::ToggleFullscreen => match &self.lifecycle {
                Lifecycle::Success { view, .. } => vec![Effect::SetFullscreen(!view.fullscreen)],
                _ => vec![],
            },
            event => {
                if let Lifecycle::Success { presentation, view } = &mut self.lifecycle {
                    let len = presentation.len();
                    match event {
                        Event::Next => view.next(len),
                        Event::Previous => view.previous(),
                        Event::JumpTo(index) => view.jump_to(index, len),
                        Event::ToggleNotes => view.toggle_notes(),
                        Event::ImageLoaded(index) => view.mark_image_loaded(index),
                        _ => {}
                    }
                }
                vec![]
            }
        }
    }

    fn regenerate(&mut self) -> Vec<Effect> {
        match std::mem::take(&mut self.lifecycle) {
            Lifecycle::Success { presentation, .. } => {
                self.lifecycle = Lifecycle::Loading {
                    previous: Some(presentation),
                };
                vec![Effect::StartGeneration]
            }
            Lifecycle::Error { .. } => {
                self.lifecycle = Lifecycle::Loading { previous: None };
                vec![Effect::StartGeneration]
            }
            other => {
                self.lifecycle = other;
                vec![]
            }
        }
    }

    fn fail(&mut self, message: String) {
        let message = if message.trim().is_empty() {
            EMPTY_ERROR_FALLBACK.to_string()
        } else {
            message
        };
        log::error!("generation failed: {message}");
        self.lifecycle = Lifecycle::Error { message };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GenerationError, parse_slides};
    use crate::slide::sample_presentation;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays queued generation outcomes and counts calls.
    struct ScriptedSource {
        outcomes: RefCell<VecDeque<crate::generation::Result<Presentation>>>,
        calls: RefCell<usize>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<crate::generation::Result<Presentation>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }

        fn next_outcome(&self) -> crate::generation::Result<Presentation> {
            *self.calls.borrow_mut() += 1;
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(GenerationError::EmptyResponse))
        }
    }

    /// Dispatch an event and run any generation effects synchronously.
    fn drive(deck: &mut Deck, source: &ScriptedSource, event: Event) -> Vec<Effect> {
        let effects = deck.dispatch(event);
        let mut rest = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartGeneration => {
                    let follow_up = match source.next_outcome() {
                        Ok(slides) => Event::GenerationSucceeded(slides),
                        Err(e) => Event::GenerationFailed(e.to_string()),
                    };
                    rest.extend(deck.dispatch(follow_up));
                }
                other => rest.push(other),
            }
        }
        rest
    }

    fn loaded(len: usize) -> Deck {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        deck.dispatch(Event::GenerationSucceeded(sample_presentation(len)));
        deck
    }

    fn error_of(deck: &Deck) -> Option<&str> {
        match deck.lifecycle() {
            Lifecycle::Error { message } => Some(message),
            _ => None,
        }
    }

    fn index(deck: &Deck) -> usize {
        deck.view().unwrap().current_index()
    }

    #[test]
    fn test_starts_idle() {
        let deck = Deck::new();
        assert_eq!(deck.lifecycle(), &Lifecycle::Idle);
        assert!(deck.is_loading());
    }

    #[test]
    fn test_mount_starts_generation() {
        let mut deck = Deck::new();
        assert_eq!(deck.dispatch(Event::Mount), vec![Effect::StartGeneration]);
        assert_eq!(deck.lifecycle(), &Lifecycle::Loading { previous: None });
    }

    #[test]
    fn test_mount_only_from_idle() {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        assert!(deck.dispatch(Event::Mount).is_empty());
        let mut deck = loaded(3);
        assert!(deck.dispatch(Event::Mount).is_empty());
        assert!(deck.presentation().is_some());
    }

    #[test]
    fn test_success_installs_presentation() {
        let deck = loaded(4);
        assert_eq!(deck.presentation().unwrap().len(), 4);
        let view = deck.view().unwrap();
        assert_eq!(view.current_index(), 0);
        assert!(!view.notes_visible());
        assert!(!view.is_image_loaded(0));
    }

    #[test]
    fn test_failure_stores_message() {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        deck.dispatch(Event::GenerationFailed("quota exceeded".to_string()));
        assert_eq!(error_of(&deck), Some("quota exceeded"));
        assert!(deck.presentation().is_none());
        assert!(deck.view().is_none());
    }

    #[test]
    fn test_failure_with_empty_message_uses_fallback() {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        deck.dispatch(Event::GenerationFailed(String::new()));
        assert_eq!(error_of(&deck), Some(EMPTY_ERROR_FALLBACK));
    }

    #[test]
    fn test_zero_slides_is_an_error() {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        deck.dispatch(Event::GenerationSucceeded(Vec::new()));
        assert_eq!(error_of(&deck), Some(NO_SLIDES_MESSAGE));
    }

    #[test]
    fn test_results_outside_loading_are_ignored() {
        let mut deck = Deck::new();
        deck.dispatch(Event::GenerationSucceeded(sample_presentation(2)));
        assert_eq!(deck.lifecycle(), &Lifecycle::Idle);

        let mut deck = loaded(2);
        deck.dispatch(Event::GenerationFailed("late".to_string()));
        assert!(deck.presentation().is_some());
        deck.dispatch(Event::GenerationSucceeded(sample_presentation(7)));
        assert_eq!(deck.presentation().unwrap().len(), 2);
    }

    #[test]
    fn test_regenerate_from_error_clears_message() {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        deck.dispatch(Event::GenerationFailed("boom".to_string()));
        assert_eq!(
            deck.dispatch(Event::Regenerate),
            vec![Effect::StartGeneration]
        );
        assert_eq!(deck.lifecycle(), &Lifecycle::Loading { previous: None });
        assert_eq!(error_of(&deck), None);
    }

    #[test]
    fn test_regenerate_from_success_keeps_previous() {
        let mut deck = loaded(3);
        assert_eq!(
            deck.dispatch(Event::Regenerate),
            vec![Effect::StartGeneration]
        );
        assert_eq!(
            deck.lifecycle(),
            &Lifecycle::Loading {
                previous: Some(sample_presentation(3))
            }
        );
    }

    #[test]
    fn test_regenerate_while_loading_is_noop() {
        let mut deck = Deck::new();
        assert!(deck.dispatch(Event::Regenerate).is_empty());
        assert_eq!(deck.lifecycle(), &Lifecycle::Idle);

        deck.dispatch(Event::Mount);
        assert!(deck.dispatch(Event::Regenerate).is_empty());
        assert_eq!(deck.lifecycle(), &Lifecycle::Loading { previous: None });
    }

    #[test]
    fn test_next_stops_at_last_slide() {
        let mut deck = loaded(3);
        deck.dispatch(Event::Next);
        deck.dispatch(Event::Next);
        assert_eq!(index(&deck), 2);
        deck.dispatch(Event::Next);
        assert_eq!(index(&deck), 2);
    }

    #[test]
    fn test_previous_stops_at_first_slide() {
        let mut deck = loaded(3);
        deck.dispatch(Event::Previous);
        assert_eq!(index(&deck), 0);
        deck.dispatch(Event::Next);
        deck.dispatch(Event::Previous);
        assert_eq!(index(&deck), 0);
    }

    #[test]
    fn test_jump_to_every_valid_index() {
        let mut deck = loaded(10);
        for i in (0..10).rev() {
            deck.dispatch(Event::JumpTo(i));
            assert_eq!(index(&deck), i);
        }
    }

    #[test]
    fn test_jump_out_of_range_is_ignored() {
        let mut deck = loaded(5);
        deck.dispatch(Event::JumpTo(3));
        deck.dispatch(Event::JumpTo(5));
        assert_eq!(index(&deck), 3);
    }

    #[test]
    fn test_toggle_notes_is_involution() {
        let mut deck = loaded(2);
        deck.dispatch(Event::ToggleNotes);
        assert!(deck.view().unwrap().notes_visible());
        deck.dispatch(Event::ToggleNotes);
        assert!(!deck.view().unwrap().notes_visible());
    }

    #[test]
    fn test_mark_image_loaded_is_idempotent_and_local() {
        let mut deck = loaded(4);
        deck.dispatch(Event::ImageLoaded(2));
        let once = deck.view().unwrap().clone();
        deck.dispatch(Event::ImageLoaded(2));
        let view = deck.view().unwrap();
        assert_eq!(view, &once);
        assert!(view.is_image_loaded(2));
        for j in [0, 1, 3] {
            assert!(!view.is_image_loaded(j));
        }
    }

    #[test]
    fn test_toggle_fullscreen_waits_for_window() {
        let mut deck = loaded(2);
        assert_eq!(
            deck.dispatch(Event::ToggleFullscreen),
            vec![Effect::SetFullscreen(true)]
        );
        // Not flipped until the window confirms.
        assert!(!deck.view().unwrap().fullscreen());
        deck.dispatch(Event::FullscreenChanged(true));
        assert!(deck.view().unwrap().fullscreen());
        assert_eq!(
            deck.dispatch(Event::ToggleFullscreen),
            vec![Effect::SetFullscreen(false)]
        );
    }

    #[test]
    fn test_fullscreen_survives_regeneration() {
        let mut deck = loaded(2);
        deck.dispatch(Event::FullscreenChanged(true));
        deck.dispatch(Event::Regenerate);
        deck.dispatch(Event::GenerationSucceeded(sample_presentation(2)));
        assert!(deck.view().unwrap().fullscreen());
    }

    #[test]
    fn test_view_events_ignored_outside_success() {
        let mut deck = Deck::new();
        deck.dispatch(Event::Mount);
        for event in [
            Event::Next,
            Event::Previous,
            Event::JumpTo(0),
            Event::ToggleNotes,
            Event::ImageLoaded(0),
        ] {
            assert!(deck.dispatch(event).is_empty());
        }
        assert!(deck.dispatch(Event::ToggleFullscreen).is_empty());
        assert_eq!(deck.lifecycle(), &Lifecycle::Loading { previous: None });
    }

    #[test]
    fn test_regeneration_resets_view() {
        let mut deck = loaded(10);
        deck.dispatch(Event::JumpTo(6));
        deck.dispatch(Event::ImageLoaded(6));
        deck.dispatch(Event::ImageLoaded(0));
        deck.dispatch(Event::ToggleNotes);

        deck.dispatch(Event::Regenerate);
        deck.dispatch(Event::GenerationSucceeded(sample_presentation(10)));

        let view = deck.view().unwrap();
        assert_eq!(view.current_index(), 0);
        assert!(!view.notes_visible());
        assert!((0..10).all(|i| !view.is_image_loaded(i)));
    }

    #[test]
    fn test_scenario_startup_success() {
        let source = ScriptedSource::new(vec![Ok(sample_presentation(10))]);
        let mut deck = Deck::new();
        drive(&mut deck, &source, Event::Mount);

        assert_eq!(source.calls(), 1);
        assert!(matches!(deck.lifecycle(), Lifecycle::Success { .. }));
        assert_eq!(index(&deck), 0);
        assert_eq!(deck.current_slide().unwrap().title, "Slide 0");
    }

    #[test]
    fn test_scenario_malformed_then_retry() {
        let parse_error = parse_slides("[{\"title\": \"oops\"").unwrap_err();
        let expected = parse_error.to_string();
        let source = ScriptedSource::new(vec![Err(parse_error), Ok(sample_presentation(10))]);
        let mut deck = Deck::new();

        drive(&mut deck, &source, Event::Mount);
        assert_eq!(error_of(&deck), Some(expected.as_str()));
        assert!(deck.presentation().is_none());

        drive(&mut deck, &source, Event::Regenerate);
        assert_eq!(source.calls(), 2);
        assert_eq!(deck.presentation().unwrap().len(), 10);
    }

    #[test]
    fn test_scenario_walk_to_the_end() {
        let source = ScriptedSource::new(vec![Ok(sample_presentation(10))]);
        let mut deck = Deck::new();
        drive(&mut deck, &source, Event::Mount);

        for _ in 0..9 {
            drive(&mut deck, &source, Event::Next);
        }
        assert_eq!(index(&deck), 9);
        drive(&mut deck, &source, Event::Next);
        assert_eq!(index(&deck), 9);
        assert_eq!(deck.current_slide().unwrap().title, "Slide 9");
    }

    #[test]
    fn test_scenario_empty_response() {
        let source = ScriptedSource::new(vec![Err(GenerationError::EmptyResponse)]);
        let mut deck = Deck::new();
        drive(&mut deck, &source, Event::Mount);
        assert_eq!(
            error_of(&deck),
            Some("no response from generation service")
        );
    }
}
