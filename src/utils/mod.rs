pub mod config;

// Re-export commonly used types for convenience
pub use config::Config;
