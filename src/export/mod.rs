pub mod gif;

pub use gif::{export_history_gif, ExportError, GifOutcome, GifSettings};
