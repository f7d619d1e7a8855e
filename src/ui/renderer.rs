//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the layout for the current screen
//!
//! # Example
//!
//! ```rust
//! use unimatch::app::{AppState, SessionSettings};
//! use unimatch::ui::render;
//!
//! let state = AppState::new(SessionSettings::default());
//! let mut out = Vec::new();
//! render(&state, &mut out, 80)?;
//! assert!(String::from_utf8_lossy(&out).contains("UniMatch"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::{EmptyState, Screen, UIViewModel};
use std::io::{self, Write};

/// Renders the current session to `out`, `cols` cells wide.
///
/// Does not clear the screen or manage cursor position.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render<W: Write + ?Sized>(state: &AppState, out: &mut W, cols: usize) -> io::Result<()> {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, out, cols)
}

/// Renders a view model with the layout matching its screen.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_viewmodel<W: Write + ?Sized>(vm: &UIViewModel, out: &mut W, cols: usize) -> io::Result<()> {
    match &vm.screen {
        Screen::Deck(deck) => components::render_deck_mode(out, &vm.header, deck, &vm.footer, cols),
        Screen::Shortlist(shortlist) => {
            components::render_shortlist_mode(out, &vm.header, shortlist, &vm.footer, cols)
        }
        Screen::Empty(empty) => components::render_message_mode(out, &vm.header, empty, true, &vm.footer, cols),
        Screen::Quiz => {
            let prompt = EmptyState {
                message: "Encontre sua universidade na Itália".to_string(),
                subtitle: "Responda o quiz para começar".to_string(),
            };
            components::render_message_mode(out, &vm.header, &prompt, false, &vm.footer, cols)
        }
        Screen::Loading => {
            let loading = EmptyState {
                message: "Buscando universidades…".to_string(),
                subtitle: String::new(),
            };
            components::render_message_mode(out, &vm.header, &loading, false, &vm.footer, cols)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionSettings;
    use crate::domain::{Candidate, QuizAnswers, Region};

    fn rendered(state: &AppState) -> String {
        let mut out = Vec::new();
        render(state, &mut out, 80).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn deck_screen_shows_active_card_and_progress() {
        let mut state = AppState::new(SessionSettings::default());
        state.submit(&QuizAnswers::default());
        state.load_candidates(vec![
            Candidate::new("0", "Politecnico di Torino", "Torino", Region::North),
            Candidate::new("1", "Università di Pisa", "Pisa", Region::Center),
        ]);
        let text = rendered(&state);
        assert!(text.contains("0/2"));
        assert!(text.contains('♥'));
    }

    #[test]
    fn no_matches_screen_offers_retry() {
        let mut state = AppState::new(SessionSettings::default());
        state.submit(&QuizAnswers::default());
        state.load_candidates(Vec::new());
        let text = rendered(&state);
        assert!(text.contains("Nenhuma universidade encontrada"));
        assert!(text.contains("Tentar Novamente"));
    }
}
