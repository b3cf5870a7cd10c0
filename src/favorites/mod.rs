use async_trait::async_trait;

use crate::{
    anki::{
        next_review_state,
        ReviewStore,
    },
    core::{
        DictionaryLanguage,
        FavoriteItem,
        Grade,
        HistoryEntry,
        KhmineError,
    },
};

/// Persistence collaborator for favorites and lookup history. Rating commits
/// come in through the [`ReviewStore`] supertrait, so one backend serves
/// both the favorites screen and the review session.
#[async_trait]
pub trait FavoriteStore: ReviewStore {
    async fn get_favorites(&self) -> Result<Vec<FavoriteItem>, KhmineError>;
    async fn save_favorite(&self, item: &FavoriteItem) -> Result<(), KhmineError>;
    async fn remove_favorite(
        &self,
        word: &str,
        language: DictionaryLanguage,
    ) -> Result<bool, KhmineError>;
    async fn clear_all_favorites(&self) -> Result<(), KhmineError>;

    async fn get_history(&self) -> Result<Vec<HistoryEntry>, KhmineError>;
    async fn add_history_entry(&self, entry: &HistoryEntry) -> Result<(), KhmineError>;
    async fn remove_history_entry(
        &self,
        word: &str,
        language: DictionaryLanguage,
    ) -> Result<(), KhmineError>;
    async fn clear_history(&self) -> Result<(), KhmineError>;
}

fn is_same(item: &FavoriteItem, word: &str, language: DictionaryLanguage) -> bool {
    item.word == word && item.language == language
}

/// In-memory favorites with optimistic updates: every mutation applies to
/// the local list first, then attempts the store write, and restores the
/// pre-change snapshot when the write fails. The error is propagated so the
/// caller can notify the user.
///
/// Mutations are serialized by exclusive access (`&mut self`); there is no
/// internal locking.
#[derive(Debug, Clone, Default)]
pub struct FavoritesState {
    favorites: Vec<FavoriteItem>,
}

impl FavoritesState {
    pub fn new(favorites: Vec<FavoriteItem>) -> Self {
        FavoritesState { favorites }
    }

    pub async fn load<S>(store: &S) -> Result<Self, KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        Ok(FavoritesState {
            favorites: store.get_favorites().await?,
        })
    }

    pub fn favorites(&self) -> &[FavoriteItem] {
        &self.favorites
    }

    pub fn is_favorite(&self, word: &str, language: DictionaryLanguage) -> bool {
        self.favorites.iter().any(|item| is_same(item, word, language))
    }

    /// Favorites a word. Re-favoriting an existing `(word, language)` pair
    /// replaces it with a fresh card rather than duplicating it.
    pub async fn add<S>(
        &mut self,
        word: &str,
        language: DictionaryLanguage,
        now: i64,
        store: &S,
    ) -> Result<(), KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let snapshot = self.favorites.clone();

        let item = FavoriteItem::new(word, language, now);
        self.favorites.retain(|existing| !is_same(existing, word, language));
        self.favorites.insert(0, item.clone());

        if let Err(error) = store.save_favorite(&item).await {
            tracing::warn!(word, %error, "failed to add favorite, rolling back");
            self.favorites = snapshot;
            return Err(error);
        }
        Ok(())
    }

    /// Unfavorites a word. Returns whether the store knew the record.
    pub async fn remove<S>(
        &mut self,
        word: &str,
        language: DictionaryLanguage,
        store: &S,
    ) -> Result<bool, KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let snapshot = self.favorites.clone();
        self.favorites.retain(|existing| !is_same(existing, word, language));

        match store.remove_favorite(word, language).await {
            Ok(removed) => Ok(removed),
            Err(error) => {
                tracing::warn!(word, %error, "failed to remove favorite, rolling back");
                self.favorites = snapshot;
                Err(error)
            }
        }
    }

    /// Returns `true` when the word ends up favorited.
    pub async fn toggle<S>(
        &mut self,
        word: &str,
        language: DictionaryLanguage,
        now: i64,
        store: &S,
    ) -> Result<bool, KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        if self.is_favorite(word, language) {
            self.remove(word, language, store).await?;
            Ok(false)
        } else {
            self.add(word, language, now, store).await?;
            Ok(true)
        }
    }

    pub async fn clear_all<S>(&mut self, store: &S) -> Result<(), KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let snapshot = std::mem::take(&mut self.favorites);

        if let Err(error) = store.clear_all_favorites().await {
            tracing::warn!(%error, "failed to clear favorites, rolling back");
            self.favorites = snapshot;
            return Err(error);
        }
        Ok(())
    }

    /// Rates a favorited card outside a session (the word-detail view's
    /// rating buttons). Same optimistic pattern: the scheduled update is
    /// applied locally, then committed.
    pub async fn review<S>(
        &mut self,
        word: &str,
        language: DictionaryLanguage,
        grade: Grade,
        now: i64,
        store: &S,
    ) -> Result<FavoriteItem, KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let index = self
            .favorites
            .iter()
            .position(|item| is_same(item, word, language))
            .ok_or_else(|| KhmineError::CardNotFound {
                word: word.to_string(),
                language,
            })?;

        let snapshot = self.favorites.clone();
        let update = next_review_state(&self.favorites[index], grade, now);
        let updated = update.apply_to(&self.favorites[index]);
        self.favorites[index] = updated.clone();

        if let Err(error) = store.commit_review(word, language, &update).await {
            tracing::warn!(word, %error, "failed to commit review, rolling back");
            self.favorites = snapshot;
            return Err(error);
        }
        Ok(updated)
    }
}

/// Lookup history, same optimistic discipline as [`FavoritesState`].
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    entries: Vec<HistoryEntry>,
}

impl HistoryState {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        HistoryState { entries }
    }

    pub async fn load<S>(store: &S) -> Result<Self, KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        Ok(HistoryState {
            entries: store.get_history().await?,
        })
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Records a lookup, moving a repeated word to the top.
    pub async fn add<S>(
        &mut self,
        word: &str,
        language: DictionaryLanguage,
        now: i64,
        store: &S,
    ) -> Result<(), KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let snapshot = self.entries.clone();

        let entry = HistoryEntry {
            word: word.to_string(),
            language,
            timestamp: now,
        };
        self.entries
            .retain(|existing| !(existing.word == word && existing.language == language));
        self.entries.insert(0, entry.clone());

        if let Err(error) = store.add_history_entry(&entry).await {
            tracing::warn!(word, %error, "failed to record history entry, rolling back");
            self.entries = snapshot;
            return Err(error);
        }
        Ok(())
    }

    pub async fn remove<S>(
        &mut self,
        word: &str,
        language: DictionaryLanguage,
        store: &S,
    ) -> Result<(), KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let snapshot = self.entries.clone();
        self.entries
            .retain(|existing| !(existing.word == word && existing.language == language));

        if let Err(error) = store.remove_history_entry(word, language).await {
            tracing::warn!(word, %error, "failed to remove history entry, rolling back");
            self.entries = snapshot;
            return Err(error);
        }
        Ok(())
    }

    pub async fn clear<S>(&mut self, store: &S) -> Result<(), KhmineError>
    where
        S: FavoriteStore + ?Sized,
    {
        let snapshot = std::mem::take(&mut self.entries);

        if let Err(error) = store.clear_history().await {
            tracing::warn!(%error, "failed to clear history, rolling back");
            self.entries = snapshot;
            return Err(error);
        }
        Ok(())
    }
}
