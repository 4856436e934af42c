//! Per-card expand/collapse state.
//!
//! Each rendered card owns one [`CardState`]. [`CardDeck`] holds the states of
//! the cards currently mounted, keyed by record code.

use std::collections::HashMap;

/// Expand/collapse state of a single card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardState {
    /// Name truncated to one line, tags hidden.
    #[default]
    Collapsed,
    /// Name shown in full, tags visible when present.
    Expanded,
}

impl CardState {
    /// Flip between collapsed and expanded. No guards.
    pub const fn toggle(&mut self) {
        *self = match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        };
    }

    /// Whether the card is expanded.
    #[must_use]
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    /// Maximum number of lines the name label may use; `None` is unconstrained.
    #[must_use]
    pub const fn name_line_limit(self) -> Option<usize> {
        match self {
            Self::Collapsed => Some(1),
            Self::Expanded => None,
        }
    }

    /// What: Decide whether the tag section is drawn below the date.
    ///
    /// Inputs:
    /// - `categories`: Tokenized categories of the card's record
    ///
    /// Output:
    /// - `true` only when expanded and the record has a category column
    #[must_use]
    pub const fn shows_tags(self, categories: Option<&[String]>) -> bool {
        self.is_expanded() && categories.is_some()
    }
}

/// States of the mounted cards, keyed by record code.
///
/// A key missing from the deck reads as [`CardState::Collapsed`], which is the
/// state a freshly mounted card starts in.
#[derive(Clone, Debug, Default)]
pub struct CardDeck {
    /// Mounted cards that have diverged from the initial state or been touched.
    cards: HashMap<String, CardState>,
}

impl CardDeck {
    /// Current state of the card for `code`.
    #[must_use]
    pub fn state(&self, code: &str) -> CardState {
        self.cards.get(code).copied().unwrap_or_default()
    }

    /// What: Toggle one card.
    ///
    /// Inputs:
    /// - `code`: Record key of the card
    ///
    /// Output:
    /// - The card's new state
    ///
    /// Details:
    /// - Mounts the card on first use; other cards are untouched.
    pub fn toggle(&mut self, code: &str) -> CardState {
        let state = self.cards.entry(code.to_string()).or_default();
        state.toggle();
        *state
    }

    /// What: Unmount cards whose records left the list.
    ///
    /// Inputs:
    /// - `live_codes`: Codes of the records currently rendered
    ///
    /// Output:
    /// - Number of cards dropped
    ///
    /// Details:
    /// - A dropped card that comes back later starts collapsed again.
    pub fn reconcile<'a, I>(&mut self, live_codes: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let live: std::collections::HashSet<&str> = live_codes.into_iter().collect();
        let before = self.cards.len();
        self.cards.retain(|code, _| live.contains(code.as_str()));
        before - self.cards.len()
    }

    /// Number of cards with tracked state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no card has tracked state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Cards start collapsed and two toggles restore the original state.
    ///
    /// Inputs:
    /// - Fresh `CardState`.
    ///
    /// Output:
    /// - `Expanded` after one toggle, `Collapsed` after two.
    fn toggle_twice_is_identity() {
        let mut s = CardState::default();
        assert_eq!(s, CardState::Collapsed);
        s.toggle();
        assert_eq!(s, CardState::Expanded);
        s.toggle();
        assert_eq!(s, CardState::Collapsed);
    }

    #[test]
    /// What: The rendering contract follows the state.
    ///
    /// Inputs:
    /// - Both states, with and without categories.
    ///
    /// Output:
    /// - One-line name only while collapsed; tags only while expanded with categories.
    fn rendering_contract_follows_state() {
        let tags = vec!["Food".to_string()];
        assert_eq!(CardState::Collapsed.name_line_limit(), Some(1));
        assert_eq!(CardState::Expanded.name_line_limit(), None);
        assert!(!CardState::Collapsed.shows_tags(Some(tags.as_slice())));
        assert!(CardState::Expanded.shows_tags(Some(tags.as_slice())));
        assert!(!CardState::Expanded.shows_tags(None));
    }

    #[test]
    /// What: Toggling one card leaves the others alone.
    ///
    /// Inputs:
    /// - Deck with cards `A` and `B`; toggle `A`.
    ///
    /// Output:
    /// - `A` expanded, `B` collapsed.
    fn deck_cards_are_independent() {
        let mut deck = CardDeck::default();
        assert_eq!(deck.toggle("A"), CardState::Expanded);
        assert_eq!(deck.state("A"), CardState::Expanded);
        assert_eq!(deck.state("B"), CardState::Collapsed);
    }

    #[test]
    /// What: Unmounted cards lose their state and remount collapsed.
    ///
    /// Inputs:
    /// - Expanded `A` and `B`; reconcile with only `B` live; then `A` reappears.
    ///
    /// Output:
    /// - One card dropped; `A` reads collapsed, `B` stays expanded.
    fn reconcile_resets_remounted_cards() {
        let mut deck = CardDeck::default();
        deck.toggle("A");
        deck.toggle("B");
        assert_eq!(deck.reconcile(["B"]), 1);
        assert_eq!(deck.state("A"), CardState::Collapsed);
        assert_eq!(deck.state("B"), CardState::Expanded);
        assert_eq!(deck.reconcile(["A", "B"]), 0);
        assert_eq!(deck.state("A"), CardState::Collapsed);
        assert_eq!(deck.len(), 1);
    }
}
