pub mod cleaner;
pub mod resampler;

pub use cleaner::{Cleaner, CleaningReport};
pub use resampler::Resampler;
