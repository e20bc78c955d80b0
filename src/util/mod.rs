pub mod paths;

pub use paths::{data_dir, log_file_path, logs_dir};
