use std::path::PathBuf;

/// Application data directory (~/.agent-reel)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".agent-reel")
}

/// Log directory (~/.agent-reel/logs)
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Log file path (~/.agent-reel/logs/agent-reel.log)
pub fn log_file_path() -> PathBuf {
    logs_dir().join("agent-reel.log")
}
