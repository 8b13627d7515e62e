use crate::checks::{Check, FUNCTION_PLACEHOLDER};
use crate::errors::{WautoError, WautoResult};
use crate::utils::Config;
use console::style;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

// External tools can stall; poll in small increments instead of blocking
// on wait() when a timeout is configured.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of one weggli invocation.
#[derive(Debug)]
pub struct CheckReport {
    pub check_id: &'static str,
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

impl CheckReport {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Locate the weggli binary: config override, then `~/.cargo/bin`,
/// then `$PATH`.
pub fn locate_tool(cfg: &Config) -> Option<PathBuf> {
    if !cfg.tool.path.is_empty() {
        let p = PathBuf::from(&cfg.tool.path);
        if p.is_file() {
            return Some(p);
        }
        tracing::warn!("configured tool.path does not exist: {}", p.display());
    }

    let exe = format!("weggli{}", std::env::consts::EXE_SUFFIX);

    if let Some(dirs) = directories::BaseDirs::new() {
        let cargo_bin = dirs.home_dir().join(".cargo").join("bin").join(&exe);
        if cargo_bin.is_file() {
            return Some(cargo_bin);
        }
    }

    let path_var = std::env::var_os("PATH")?;
    search_dirs(std::env::split_paths(&path_var), &exe)
}

fn search_dirs(dirs: impl IntoIterator<Item = PathBuf>, exe: &str) -> Option<PathBuf> {
    dirs.into_iter().map(|d| d.join(exe)).find(|c| c.is_file())
}

/// Build the full argument vector for one check. The query goes second to
/// last, the target path last; no shell is involved.
pub fn build_args(
    check: &Check,
    target: &Path,
    cfg: &Config,
    function: Option<&str>,
) -> WautoResult<Vec<OsString>> {
    let query = if check.needs_function() {
        let name = function.ok_or(WautoError::MissingFunction(check.id))?;
        check.query.replace(FUNCTION_PLACEHOLDER, name)
    } else {
        check.query.to_owned()
    };

    let mut args: Vec<OsString> = Vec::new();
    for a in check.extra_args {
        args.push(a.into());
    }
    if let Some(n) = cfg.scanner.context_before {
        args.push("-B".into());
        args.push(n.to_string().into());
    }
    if let Some(n) = cfg.scanner.context_after {
        args.push("-A".into());
        args.push(n.to_string().into());
    }
    for a in &cfg.tool.extra_args {
        args.push(a.into());
    }
    args.push(query.into());
    args.push(target.as_os_str().to_owned());
    Ok(args)
}

/// Run one check against `target`, streaming weggli's output through to
/// the terminal.
pub fn run_check(
    check: &'static Check,
    target: &Path,
    cfg: &Config,
    function: Option<&str>,
) -> WautoResult<CheckReport> {
    let bin = locate_tool(cfg).ok_or(WautoError::ToolMissing)?;
    let args = build_args(check, target, cfg, function)?;

    if cfg.output.show_commands {
        let rendered = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{} {} {}",
            style("$").dim(),
            style(bin.display()).dim(),
            style(rendered).dim()
        );
    }

    tracing::debug!("running check '{}' against {}", check.id, target.display());

    let start = Instant::now();
    let mut child = Command::new(&bin).args(&args).stdin(Stdio::null()).spawn()?;

    let status = match cfg.tool.timeout_secs {
        None => child.wait()?,
        Some(limit) => {
            let deadline = Duration::from_secs(limit);
            loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if start.elapsed() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(WautoError::ToolTimeout(limit));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    };

    Ok(CheckReport {
        check_id: check.id,
        exit_code: status.code(),
        duration: start.elapsed(),
    })
}

/// Capture `weggli --version` for the doctor report.
pub fn probe_version(bin: &Path) -> WautoResult<String> {
    let out = Command::new(bin).arg("--version").output()?;
    let text = String::from_utf8_lossy(&out.stdout);
    Ok(text.trim().to_owned())
}

// --------------------------------------------------------------------------
// Tests
// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks;

    #[test]
    fn args_end_with_query_then_path() {
        let check = checks::find("memcpy").unwrap();
        let cfg = Config::default();
        let args = build_args(check, Path::new("src"), &cfg, None).unwrap();

        assert_eq!(args.len(), 2);
        assert_eq!(args[0], OsString::from(check.query));
        assert_eq!(args[1], OsString::from("src"));
    }

    #[test]
    fn cpp_checks_carry_their_fixed_flags() {
        let cfg = Config::default();

        let weak = checks::find("weak").unwrap();
        let args = build_args(weak, Path::new("."), &cfg, None).unwrap();
        assert_eq!(args[0], OsString::from("--cpp"));

        let iter = checks::find("iter").unwrap();
        let args = build_args(iter, Path::new("."), &cfg, None).unwrap();
        assert_eq!(args[0], OsString::from("-X"));
    }

    #[test]
    fn context_and_extra_args_come_before_the_query() {
        let check = checks::find("wild").unwrap();
        let mut cfg = Config::default();
        cfg.scanner.context_before = Some(2);
        cfg.scanner.context_after = Some(3);
        cfg.tool.extra_args = vec!["--color".into()];

        let args = build_args(check, Path::new("proj"), &cfg, None).unwrap();
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            rendered,
            vec!["-B", "2", "-A", "3", "--color", check.query, "proj"]
        );
    }

    #[test]
    fn function_name_is_substituted_into_the_query() {
        let check = checks::find("no-return-check").unwrap();
        let cfg = Config::default();

        let args = build_args(check, Path::new("."), &cfg, Some("malloc")).unwrap();
        let query = args[0].to_string_lossy();
        assert_eq!(query, "{ strict: malloc(_);}");
        assert!(!query.contains(FUNCTION_PLACEHOLDER));
    }

    #[test]
    fn missing_function_is_an_error() {
        let check = checks::find("no-return-check").unwrap();
        let cfg = Config::default();

        let err = build_args(check, Path::new("."), &cfg, None).unwrap_err();
        assert!(matches!(err, WautoError::MissingFunction("no-return-check")));
    }

    #[test]
    fn search_dirs_finds_only_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let bin_dir = tmp.path().join("bin");
        std::fs::create_dir(&bin_dir).unwrap();
        std::fs::write(bin_dir.join("weggli"), b"").unwrap();

        let dirs = vec![tmp.path().join("missing"), bin_dir.clone()];
        assert_eq!(
            search_dirs(dirs.clone(), "weggli"),
            Some(bin_dir.join("weggli"))
        );
        assert_eq!(search_dirs(dirs, "other-tool"), None);
    }

    #[cfg(unix)]
    #[test]
    fn run_check_kills_the_tool_on_timeout() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let shim = tmp.path().join("weggli");
        std::fs::write(&shim, "#!/bin/sh\nsleep 5\n").unwrap();
        std::fs::set_permissions(&shim, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut cfg = Config::default();
        cfg.tool.path = shim.to_string_lossy().into_owned();
        cfg.tool.timeout_secs = Some(0);

        let check = checks::find("memcpy").unwrap();
        let err = run_check(check, tmp.path(), &cfg, None).unwrap_err();
        assert!(matches!(err, WautoError::ToolTimeout(0)));
    }

    #[test]
    fn locate_tool_honours_explicit_config_path() {
        let tmp = tempfile::tempdir().unwrap();
        let fake = tmp.path().join("weggli");
        std::fs::write(&fake, b"").unwrap();

        let mut cfg = Config::default();
        cfg.tool.path = fake.to_string_lossy().into_owned();

        assert_eq!(locate_tool(&cfg), Some(fake));
    }
}
