use async_trait::async_trait;

use crate::core::{
    DictionaryLanguage,
    FavoriteItem,
    Grade,
    KhmineError,
};

use super::scheduler::{
    next_review_state,
    ReviewUpdate,
};

/// Anything reviewable in a session: the raw card, or a richer item (card
/// plus its fetched description) that knows how to swap the card out.
pub trait ReviewItem: Clone {
    fn card(&self) -> &FavoriteItem;
    fn with_card(&self, card: FavoriteItem) -> Self;
}

impl ReviewItem for FavoriteItem {
    fn card(&self) -> &FavoriteItem {
        self
    }

    fn with_card(&self, card: FavoriteItem) -> Self {
        card
    }
}

/// Discriminated session state. "Due" tracks whether any card in the deck
/// is due at the time of the last transition; "Front"/"Back" is whether the
/// answer side of the selected card is revealed.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewGameState<T> {
    NoDueNothingSelected { items: Vec<T> },
    NoDueSelectedFront { items: Vec<T>, selected: usize },
    NoDueSelectedBack { items: Vec<T>, selected: usize },
    HaveDueSelectedFront { items: Vec<T>, selected: usize },
    HaveDueSelectedBack { items: Vec<T>, selected: usize },
}

impl<T> Default for ReviewGameState<T> {
    fn default() -> Self {
        ReviewGameState::NoDueNothingSelected { items: Vec::new() }
    }
}

fn has_due<T: ReviewItem>(items: &[T], now: i64) -> bool {
    items.iter().any(|item| item.card().is_due(now))
}

fn earliest_due_index<T: ReviewItem>(items: &[T], now: i64) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.card().is_due(now))
        .min_by_key(|(_, item)| item.card().due)
        .map(|(index, _)| index)
}

impl<T: ReviewItem> ReviewGameState<T> {
    /// Partitions the deck: the earliest due card is auto-selected (front
    /// side), or nothing is selected when no card is due.
    pub fn init(items: Vec<T>, now: i64) -> Self {
        match earliest_due_index(&items, now) {
            Some(selected) => ReviewGameState::HaveDueSelectedFront { items, selected },
            None => ReviewGameState::NoDueNothingSelected { items },
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ReviewGameState::NoDueNothingSelected { items }
            | ReviewGameState::NoDueSelectedFront { items, .. }
            | ReviewGameState::NoDueSelectedBack { items, .. }
            | ReviewGameState::HaveDueSelectedFront { items, .. }
            | ReviewGameState::HaveDueSelectedBack { items, .. } => items,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            ReviewGameState::NoDueNothingSelected { .. } => None,
            ReviewGameState::NoDueSelectedFront { selected, .. }
            | ReviewGameState::NoDueSelectedBack { selected, .. }
            | ReviewGameState::HaveDueSelectedFront { selected, .. }
            | ReviewGameState::HaveDueSelectedBack { selected, .. } => Some(*selected),
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_index().and_then(|index| self.items().get(index))
    }

    /// Time has advanced; cards may have crossed their due date. Only the
    /// front states re-partition, and the selection is kept. A revealed
    /// answer is never hidden by the clock.
    pub fn tick(self, now: i64) -> Self {
        match self {
            ReviewGameState::NoDueSelectedFront { items, selected }
            | ReviewGameState::HaveDueSelectedFront { items, selected } => {
                if has_due(&items, now) {
                    ReviewGameState::HaveDueSelectedFront { items, selected }
                } else {
                    ReviewGameState::NoDueSelectedFront { items, selected }
                }
            }
            other => other,
        }
    }

    /// Explicit pick from the "nothing selected" state.
    pub fn select_card(self, index: usize, now: i64) -> Self {
        match self {
            ReviewGameState::NoDueNothingSelected { items } if index < items.len() => {
                Self::selected_front(items, index, now)
            }
            other => other,
        }
    }

    /// Switches to another card from any selected state, hiding a revealed
    /// answer.
    pub fn select_other_card(self, index: usize, now: i64) -> Self {
        match self {
            ReviewGameState::NoDueSelectedFront { items, .. }
            | ReviewGameState::NoDueSelectedBack { items, .. }
            | ReviewGameState::HaveDueSelectedFront { items, .. }
            | ReviewGameState::HaveDueSelectedBack { items, .. }
                if index < items.len() =>
            {
                Self::selected_front(items, index, now)
            }
            other => other,
        }
    }

    /// Shows the answer side. No-op on back states and when nothing is
    /// selected.
    pub fn reveal(self) -> Self {
        match self {
            ReviewGameState::NoDueSelectedFront { items, selected } => {
                ReviewGameState::NoDueSelectedBack { items, selected }
            }
            ReviewGameState::HaveDueSelectedFront { items, selected } => {
                ReviewGameState::HaveDueSelectedBack { items, selected }
            }
            other => other,
        }
    }

    fn selected_front(items: Vec<T>, selected: usize, now: i64) -> Self {
        if has_due(&items, now) {
            ReviewGameState::HaveDueSelectedFront { items, selected }
        } else {
            ReviewGameState::NoDueSelectedFront { items, selected }
        }
    }

    /// Folds a committed rating back in. The rated card is replaced wherever
    /// it appears; if it is still the revealed card the session re-partitions
    /// (advancing to the next due card or finishing for the day), otherwise
    /// the current view is kept and only the card data changes.
    fn apply_review(self, pending: &PendingRate, now: i64) -> Self {
        let matches = |item: &T| {
            item.card().word == pending.word && item.card().language == pending.language
        };
        let update_items = |items: Vec<T>| -> Vec<T> {
            items
                .into_iter()
                .map(|item| {
                    if matches(&item) {
                        let card = pending.update.apply_to(item.card());
                        item.with_card(card)
                    } else {
                        item
                    }
                })
                .collect()
        };

        match self {
            ReviewGameState::NoDueSelectedBack { items, selected }
            | ReviewGameState::HaveDueSelectedBack { items, selected }
                if items.get(selected).map(&matches).unwrap_or(false) =>
            {
                Self::init(update_items(items), now)
            }
            ReviewGameState::NoDueNothingSelected { items } => {
                ReviewGameState::NoDueNothingSelected {
                    items: update_items(items),
                }
            }
            ReviewGameState::NoDueSelectedFront { items, selected } => {
                ReviewGameState::NoDueSelectedFront {
                    items: update_items(items),
                    selected,
                }
            }
            ReviewGameState::NoDueSelectedBack { items, selected } => {
                ReviewGameState::NoDueSelectedBack {
                    items: update_items(items),
                    selected,
                }
            }
            ReviewGameState::HaveDueSelectedFront { items, selected } => {
                ReviewGameState::HaveDueSelectedFront {
                    items: update_items(items),
                    selected,
                }
            }
            ReviewGameState::HaveDueSelectedBack { items, selected } => {
                ReviewGameState::HaveDueSelectedBack {
                    items: update_items(items),
                    selected,
                }
            }
        }
    }
}

/// A rating that has been computed but not yet persisted. Produced by
/// [`ReviewSession::begin_rate`], consumed by `complete_rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRate {
    pub word: String,
    pub language: DictionaryLanguage,
    pub update: ReviewUpdate,
}

/// Persistence boundary for committed ratings.
#[async_trait]
pub trait ReviewStore {
    async fn commit_review(
        &self,
        word: &str,
        language: DictionaryLanguage,
        update: &ReviewUpdate,
    ) -> Result<(), KhmineError>;
}

/// A study session: the pure state machine plus the single-flight guard for
/// the asynchronous rating commit.
#[derive(Debug, Clone)]
pub struct ReviewSession<T> {
    state: ReviewGameState<T>,
    rate_in_flight: bool,
}

impl<T: ReviewItem> ReviewSession<T> {
    pub fn new(items: Vec<T>, now: i64) -> Self {
        ReviewSession {
            state: ReviewGameState::init(items, now),
            rate_in_flight: false,
        }
    }

    pub fn state(&self) -> &ReviewGameState<T> {
        &self.state
    }

    pub fn is_rating(&self) -> bool {
        self.rate_in_flight
    }

    pub fn tick(&mut self, now: i64) {
        self.state = std::mem::take(&mut self.state).tick(now);
    }

    pub fn select_card(&mut self, index: usize, now: i64) {
        self.state = std::mem::take(&mut self.state).select_card(index, now);
    }

    pub fn select_other_card(&mut self, index: usize, now: i64) {
        self.state = std::mem::take(&mut self.state).select_other_card(index, now);
    }

    pub fn reveal(&mut self) {
        self.state = std::mem::take(&mut self.state).reveal();
    }

    /// Starts a rating: computes the scheduling update for the revealed card
    /// and raises the in-flight guard. Returns `None` when no answer is
    /// revealed or another rating has not resolved yet; the caller then
    /// drops the request.
    pub fn begin_rate(&mut self, grade: Grade, now: i64) -> Option<PendingRate> {
        if self.rate_in_flight {
            return None;
        }

        let item = match &self.state {
            ReviewGameState::NoDueSelectedBack { items, selected }
            | ReviewGameState::HaveDueSelectedBack { items, selected } => items.get(*selected)?,
            _ => return None,
        };

        let card = item.card();
        let pending = PendingRate {
            word: card.word.clone(),
            language: card.language,
            update: next_review_state(card, grade, now),
        };
        self.rate_in_flight = true;
        Some(pending)
    }

    /// The persistence write succeeded; fold the update into the session.
    pub fn complete_rate(&mut self, pending: PendingRate, now: i64) {
        self.rate_in_flight = false;
        self.state = std::mem::take(&mut self.state).apply_review(&pending, now);
    }

    /// The persistence write failed; the session keeps its pre-rating state
    /// so the user can retry.
    pub fn fail_rate(&mut self) {
        self.rate_in_flight = false;
    }

    /// Rates the revealed card and commits the update through `store`.
    /// Dropped (returns `Ok`, no effect) when no card is revealed or a
    /// previous rating is still in flight.
    pub async fn rate<S>(
        &mut self,
        grade: Grade,
        now: i64,
        store: &S,
    ) -> Result<(), KhmineError>
    where
        S: ReviewStore + ?Sized,
    {
        let Some(pending) = self.begin_rate(grade, now) else {
            tracing::debug!("rating dropped: nothing revealed or a rating is in flight");
            return Ok(());
        };

        match store
            .commit_review(&pending.word, pending.language, &pending.update)
            .await
        {
            Ok(()) => {
                self.complete_rate(pending, now);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(word = %pending.word, %error, "failed to commit rating");
                self.fail_rate();
                Err(error)
            }
        }
    }
}
