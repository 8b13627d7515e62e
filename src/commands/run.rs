use crate::checks::{self, Check};
use crate::cli::CheckId;
use crate::errors::{WautoError, WautoResult};
use crate::runner;
use crate::utils::Config;
use console::style;
use std::path::Path;

/// Entry point called by the CLI.
pub fn handle(
    check: CheckId,
    path: &str,
    function: Option<&str>,
    config: &Config,
) -> WautoResult<()> {
    let target = Path::new(path);
    if !target.exists() {
        println!(
            "{}",
            style(format!("The provided path was invalid: {path}")).red()
        );
        return Err(WautoError::InvalidPath(path.to_owned()));
    }

    let running_all = check == CheckId::All;
    let mut ran = 0usize;

    for check in select(check) {
        if check.severity < config.scanner.min_severity {
            tracing::debug!("skipping '{}': below minimum severity", check.id);
            continue;
        }

        // Under `all`, a missing --function only costs the one check that
        // needs it; a direct run of that check is an error instead.
        if running_all && check.needs_function() && function.is_none() {
            println!(
                "{}: skipping {} (no --function given)\n",
                style("note").green().bold(),
                style(check.id).bold()
            );
            continue;
        }

        if !config.output.quiet {
            println!(
                "{} {}  [{}]  {}",
                style("Running").green().bold(),
                style(check.id).bold(),
                check.severity,
                check.description
            );
        }

        let report = runner::run_check(check, target, config, function)?;
        ran += 1;

        if !report.succeeded() {
            println!(
                "{}: {} exited with {:?}",
                style("warning").yellow().bold(),
                style(report.check_id).bold(),
                report.exit_code
            );
        }
        if !config.output.quiet {
            println!(
                "{} {} in {:.3}s\n",
                style("Completed").green(),
                style(report.check_id).bold(),
                report.duration.as_secs_f32()
            );
        }
    }

    if !config.output.quiet {
        println!("{} check(s) run against {}", ran, style(path).underlined());
    }
    Ok(())
}

/// Resolve a CLI check id to the catalog entries it covers.
fn select(check: CheckId) -> Vec<&'static Check> {
    match check.as_check_id() {
        Some(id) => checks::find(id).into_iter().collect(),
        None => checks::all(),
    }
}

// --------------------------------------------------------------------------
// Tests
// --------------------------------------------------------------------------

#[test]
fn select_resolves_single_checks_and_all() {
    let single = select(CheckId::Memcpy);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].id, "memcpy");

    let all = select(CheckId::All);
    assert_eq!(all.len(), checks::all().len());
}

#[test]
fn invalid_path_is_rejected_before_running_anything() {
    let cfg = Config::default();
    let err = handle(CheckId::Memcpy, "definitely/not/a/real/path", None, &cfg).unwrap_err();
    assert!(matches!(err, WautoError::InvalidPath(_)));
}

#[cfg(unix)]
#[test]
fn all_without_function_skips_the_function_check() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let log = tmp.path().join("invocations.log");
    let shim = tmp.path().join("weggli");
    std::fs::write(
        &shim,
        format!("#!/bin/sh\necho \"$@\" >> {}\n", log.display()),
    )
    .unwrap();
    std::fs::set_permissions(&shim, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut cfg = Config::default();
    cfg.tool.path = shim.to_string_lossy().into_owned();
    cfg.output.quiet = true;

    handle(CheckId::All, &tmp.path().to_string_lossy(), None, &cfg).unwrap();

    let recorded = std::fs::read_to_string(&log).unwrap();
    assert_eq!(
        recorded.lines().count(),
        checks::all().len() - 1,
        "every check except the function one should have run"
    );
    assert!(
        !recorded.contains("strict:"),
        "the no-return-check query must never reach the tool"
    );
}
