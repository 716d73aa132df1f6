//! Per-screen state: the search term and the game shown in the detail modal.

use thiserror::Error;
use tracing::{debug, info};

use crate::{filter::filter_catalog, models::GameRecord, trailer::trailer_search_url};

/// Which game, if any, the detail modal is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Nothing selected; modal closed.
    #[default]
    Idle,
    /// Modal open on the given game.
    Viewing(GameRecord),
}

/// Rejected state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// `select` was called while the modal was already open.
    #[error("already viewing {name}; dismiss it first")]
    AlreadyViewing {
        /// Name of the game currently shown.
        name: String,
    },
}

/// Transient state owned by the catalog screen.
///
/// Created fresh when the screen mounts and dropped when it unmounts. The modal
/// is open exactly when a game is selected, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenState {
    search_term: String,
    selection: Selection,
}

impl ScreenState {
    /// Fresh mount-time state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current search text, exactly as typed.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Current selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The game shown in the modal, if any.
    pub fn selected_game(&self) -> Option<&GameRecord> {
        match &self.selection {
            Selection::Idle => None,
            Selection::Viewing(game) => Some(game),
        }
    }

    /// Whether the detail modal is showing.
    pub fn modal_open(&self) -> bool {
        matches!(self.selection, Selection::Viewing(_))
    }

    /// Replace the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        debug!(term = %self.search_term, "Search term changed");
    }

    /// Append one character to the search term.
    pub fn push_search_char(&mut self, ch: char) {
        self.search_term.push(ch);
        debug!(term = %self.search_term, "Search term changed");
    }

    /// Remove the last character; returns `false` when the term was already empty.
    pub fn pop_search_char(&mut self) -> bool {
        let popped = self.search_term.pop().is_some();
        if popped {
            debug!(term = %self.search_term, "Search term changed");
        }
        popped
    }

    /// Empty the search term.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    /// Games visible for the current search term.
    pub fn visible_games<'a>(&self, games: &'a [GameRecord]) -> Vec<&'a GameRecord> {
        filter_catalog(games, &self.search_term)
    }

    /// Open the modal on `game`. Only allowed while idle.
    pub fn select(&mut self, game: GameRecord) -> Result<(), SelectionError> {
        if let Selection::Viewing(current) = &self.selection {
            return Err(SelectionError::AlreadyViewing {
                name: current.name.clone(),
            });
        }
        info!(game_id = game.id, name = %game.name, "Game selected");
        self.selection = Selection::Viewing(game);
        Ok(())
    }

    /// Close the modal and clear the selection. Returns `false` if nothing was open.
    pub fn dismiss(&mut self) -> bool {
        match std::mem::take(&mut self.selection) {
            Selection::Idle => false,
            Selection::Viewing(game) => {
                info!(game_id = game.id, "Selection dismissed");
                true
            }
        }
    }

    /// Trailer search link for the selected game, built on demand.
    pub fn trailer_link(&self, base_url: &str) -> Option<String> {
        self.selected_game()
            .map(|game| trailer_search_url(base_url, &game.name))
    }

    /// Back to mount-time defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
