//! Severity gate: what to show and whether the run fails.
//!
//! The configured severity name maps to the ordinal *just below* it, so both
//! questions reduce to `severity.ordinal() > threshold`: the named level is
//! the lowest one that blocks.

use crate::error::ConfigError;
use crate::models::{Severity, Violation};
use std::str::FromStr;

pub const DISPLAY_ALL: &str = "all";
pub const DISPLAY_BLOCKING: &str = "blocking";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    All,
    Blocking,
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DISPLAY_ALL => Ok(DisplayMode::All),
            DISPLAY_BLOCKING => Ok(DisplayMode::Blocking),
            other => Err(ConfigError::UnknownDisplayMode(other.to_string())),
        }
    }
}

pub fn resolve_threshold(name: &str) -> Result<i8, ConfigError> {
    Severity::from_name(name)
        .map(|s| s.ordinal() - 1)
        .ok_or_else(|| ConfigError::UnknownSeverity(name.to_string()))
}

pub fn is_blocking(violation: &Violation, threshold: i8) -> bool {
    violation.severity.ordinal() > threshold
}

/// Violations to hand to the reporter. Order is preserved.
pub fn filter_for_display(
    violations: &[Violation],
    mode: DisplayMode,
    threshold: i8,
) -> Vec<Violation> {
    match mode {
        DisplayMode::All => violations.to_vec(),
        DisplayMode::Blocking => violations
            .iter()
            .filter(|v| is_blocking(v, threshold))
            .cloned()
            .collect(),
    }
}

/// `1` when any violation blocks, else `0`. Must be given the unfiltered list.
pub fn decide_exit_code(violations: &[Violation], threshold: i8) -> i32 {
    if violations.iter().any(|v| is_blocking(v, threshold)) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(path: &str, severity: Severity) -> Violation {
        Violation::new(path, 1, 0, "m", severity)
    }

    fn mixed() -> Vec<Violation> {
        vec![
            v("a", Severity::Info),
            v("b", Severity::Error),
            v("c", Severity::Ignore),
            v("d", Severity::Warning),
            v("e", Severity::Error),
        ]
    }

    #[test]
    fn test_threshold_is_one_below_ordinal() {
        assert_eq!(resolve_threshold("ignore"), Ok(-1));
        assert_eq!(resolve_threshold("info"), Ok(0));
        assert_eq!(resolve_threshold("warning"), Ok(1));
        assert_eq!(resolve_threshold("error"), Ok(2));
    }

    #[test]
    fn test_unknown_severity_name() {
        assert_eq!(
            resolve_threshold("fatal"),
            Err(ConfigError::UnknownSeverity("fatal".into()))
        );
        assert!(resolve_threshold("Warning").is_err());
    }

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("all".parse::<DisplayMode>(), Ok(DisplayMode::All));
        assert_eq!("blocking".parse::<DisplayMode>(), Ok(DisplayMode::Blocking));
        assert_eq!(
            "some".parse::<DisplayMode>(),
            Err(ConfigError::UnknownDisplayMode("some".into()))
        );
    }

    #[test]
    fn test_display_all_is_identity() {
        let t = resolve_threshold("error").unwrap();
        assert_eq!(filter_for_display(&mixed(), DisplayMode::All, t), mixed());
    }

    #[test]
    fn test_blocking_filter_is_stable() {
        let t = resolve_threshold("warning").unwrap();
        let kept: Vec<String> = filter_for_display(&mixed(), DisplayMode::Blocking, t)
            .into_iter()
            .map(|v| v.source_path)
            .collect();
        assert_eq!(kept, vec!["b", "d", "e"]);
    }

    #[test]
    fn test_blocking_filter_is_idempotent() {
        for name in ["ignore", "info", "warning", "error"] {
            let t = resolve_threshold(name).unwrap();
            let once = filter_for_display(&mixed(), DisplayMode::Blocking, t);
            let twice = filter_for_display(&once, DisplayMode::Blocking, t);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_ignore_threshold_blocks_everything() {
        let t = resolve_threshold("ignore").unwrap();
        assert_eq!(decide_exit_code(&[v("a", Severity::Ignore)], t), 1);
    }

    #[test]
    fn test_exit_code_monotonic_in_severity() {
        for name in ["ignore", "info", "warning", "error"] {
            let t = resolve_threshold(name).unwrap();
            for (i, low) in Severity::ALL.iter().enumerate() {
                for high in &Severity::ALL[i..] {
                    if decide_exit_code(&[v("x", *low)], t) == 1 {
                        assert_eq!(decide_exit_code(&[v("x", *high)], t), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_exit_code_ignores_display_filtering() {
        // Blocking display at "error" hides the warning, but a "warning"
        // threshold on the full list still fails.
        let all = vec![v("a", Severity::Warning)];
        let error = resolve_threshold("error").unwrap();
        let shown = filter_for_display(&all, DisplayMode::Blocking, error);
        assert!(shown.is_empty());
        assert_eq!(decide_exit_code(&all, resolve_threshold("warning").unwrap()), 1);
    }

    #[test]
    fn test_empty_list_passes() {
        assert_eq!(decide_exit_code(&[], -1), 0);
    }
}
