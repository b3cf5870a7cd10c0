pub mod classify;
pub mod engine;
pub mod enhanced;
pub mod segments;

pub use engine::SegmentationMode;
pub use enhanced::{
    enhance_segments,
    khmer_words_of_segments,
    EnhancedKhmerWord,
    EnhancedTextSegment,
};
pub use segments::{
    generate_segments,
    TextSegment,
};

#[cfg(test)]
mod segmentation_tests;
