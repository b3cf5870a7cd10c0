pub mod anki;
pub mod colorize;
pub mod core;
pub mod dictionary;
pub mod favorites;
pub mod segmentation;
