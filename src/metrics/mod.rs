pub mod episode;

pub use episode::{EpisodeMetrics, format_elapsed};
