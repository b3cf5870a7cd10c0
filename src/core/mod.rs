pub mod errors;
pub mod models;
pub mod utils;

pub use errors::KhmineError;
pub use models::{
    DictionaryLanguage,
    FavoriteItem,
    Grade,
    HistoryEntry,
};
