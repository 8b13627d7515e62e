use crate::checks::Severity;
use crate::errors::WautoResult;
use console::style;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use toml;

static DEFAULT_CONFIG_TOML: &str = include_str!("../../default-wauto.conf");

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ToolConfig {
    /// Explicit path to the weggli binary. Empty means auto-locate
    /// (`~/.cargo/bin/weggli`, then `$PATH`).
    pub path: String,

    /// Extra arguments appended to every weggli invocation.
    pub extra_args: Vec<String>,

    /// Kill a weggli run that takes longer than this many seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            path: String::from(""),
            extra_args: vec![],
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScannerConfig {
    /// The minimum severity of checks to run.
    pub min_severity: Severity,

    /// Lines of context before each match (weggli -B).
    pub context_before: Option<u32>,

    /// Lines of context after each match (weggli -A).
    pub context_after: Option<u32>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::Low,
            context_before: None,
            context_after: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Suppress the per-check banners, leaving only weggli's own output.
    pub quiet: bool,

    /// Print the full weggli command line before running it.
    pub show_commands: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            show_commands: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub tool: ToolConfig,
    pub scanner: ScannerConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load(config_dir: &Path) -> WautoResult<Self> {
        let mut config = Config::default();

        let default_config_path = config_dir.join("wauto.conf");
        if !default_config_path.exists() {
            create_example_config(config_dir)?;
        }

        let user_config_path = config_dir.join("wauto.local");
        if user_config_path.exists() {
            let user_config_content = fs::read_to_string(&user_config_path)?;
            let user_config: Config = toml::from_str(&user_config_content)?;

            config = merge_configs(config, user_config);

            println!(
                "{}: Loaded user config from: {}\n",
                style("note").green().bold(),
                style(user_config_path.display())
                    .underlined()
                    .white()
                    .bold()
            );
        } else {
            tracing::debug!(
                "no user config at {}, using defaults",
                user_config_path.display()
            );
        }

        Ok(config)
    }
}

fn create_example_config(config_dir: &Path) -> WautoResult<()> {
    let example_path = config_dir.join("wauto.conf");
    if !example_path.exists() {
        fs::write(&example_path, DEFAULT_CONFIG_TOML)?;
        tracing::debug!("Example config created at: {}", example_path.display());
    }
    Ok(())
}

/// Merge user config into default config, concatenating extra_args and
/// overriding everything else.
fn merge_configs(mut default: Config, user: Config) -> Config {
    // --- ToolConfig ---
    default.tool.path = user.tool.path;
    default.tool.timeout_secs = user.tool.timeout_secs;
    default.tool.extra_args.extend(user.tool.extra_args);
    default.tool.extra_args.dedup();

    // --- ScannerConfig ---
    default.scanner.min_severity = user.scanner.min_severity;
    default.scanner.context_before = user.scanner.context_before;
    default.scanner.context_after = user.scanner.context_after;

    // --- OutputConfig ---
    default.output.quiet = user.output.quiet;
    default.output.show_commands = user.output.show_commands;

    default
}

#[test]
fn merge_configs_overrides_scalars_and_extends_args() {
    let default_cfg = Config::default();

    let mut user_cfg = Config::default();
    user_cfg.tool.path = "/opt/weggli".into();
    user_cfg.tool.extra_args = vec!["--color".into()];
    user_cfg.scanner.min_severity = Severity::High;
    user_cfg.output.quiet = true;

    let merged = merge_configs(default_cfg, user_cfg);

    assert_eq!(merged.tool.path, "/opt/weggli");
    assert_eq!(merged.tool.extra_args, vec!["--color".to_string()]);
    assert_eq!(merged.scanner.min_severity, Severity::High);
    assert!(merged.output.quiet);
    assert!(!merged.output.show_commands);
}

#[test]
fn load_creates_example_and_reads_user_overrides() {
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg_path = cfg_dir.path();

    let user_toml = r#"
        [tool]
        timeout_secs = 30

        [scanner]
        min_severity = "medium"
        context_after = 2

        [output]
        show_commands = true
    "#;
    fs::write(cfg_path.join("wauto.local"), user_toml).unwrap();

    let cfg = Config::load(cfg_path).expect("Config::load should succeed");

    assert!(cfg_path.join("wauto.conf").is_file());

    assert_eq!(cfg.tool.timeout_secs, Some(30));
    assert_eq!(cfg.scanner.min_severity, Severity::Medium);
    assert_eq!(cfg.scanner.context_after, Some(2));
    assert!(cfg.output.show_commands);

    assert!(!cfg.output.quiet);
    assert_eq!(cfg.scanner.context_before, None);
}

#[test]
fn embedded_default_config_parses_to_defaults() {
    let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
    assert_eq!(parsed.tool.path, Config::default().tool.path);
    assert_eq!(parsed.scanner.min_severity, Severity::Low);
}
