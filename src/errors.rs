use thiserror::Error;

pub type WautoResult<T, E = WautoError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WautoError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("config error: {0}")]
  Config(#[from] toml::de::Error),

  #[error("weggli not found; install it with `cargo install weggli`")]
  ToolMissing,

  #[error("the provided path was invalid: {0}")]
  InvalidPath(String),

  #[error("check '{0}' requires a function name (pass --function <NAME>)")]
  MissingFunction(&'static str),

  #[error("weggli timed out after {0}s")]
  ToolTimeout(u64),

  #[error("other: {0}")]
  Other(String),
}
