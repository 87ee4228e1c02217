//! End-to-end tests for the film-suggest command line.
//!
//! The interactive UI needs a terminal, so these stick to the paths that
//! exit before it starts: help, version, `--print-config` and errors.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn film_suggest() -> Command {
    Command::cargo_bin("film-suggest").unwrap()
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

mod help {
    use super::*;

    #[test]
    fn test_help_lists_flags() {
        film_suggest()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--reset-on-close"))
            .stdout(predicate::str::contains("--reset-on-select"))
            .stdout(predicate::str::contains("--no-minimal"))
            .stdout(predicate::str::contains("--not-filterable"))
            .stdout(predicate::str::contains("--position"))
            .stdout(predicate::str::contains("--config"))
            .stdout(predicate::str::contains("--log-file"));
    }

    #[test]
    fn test_version() {
        film_suggest()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("film-suggest"));
    }
}

mod print_config {
    use super::*;

    #[test]
    fn test_defaults() {
        film_suggest()
            .arg("--print-config")
            .env_remove("FILM_SUGGEST_POSITION")
            .env_remove("FILM_SUGGEST_CONFIG")
            .assert()
            .success()
            .stdout(predicate::str::contains("filterable = true"))
            .stdout(predicate::str::contains("minimal = true"))
            .stdout(predicate::str::contains("position = \"bottom-left\""));
    }

    #[test]
    fn test_flags() {
        film_suggest()
            .args([
                "--print-config",
                "--no-minimal",
                "--not-filterable",
                "--reset-on-select",
                "--position",
                "top-right",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("filterable = false"))
            .stdout(predicate::str::contains("minimal = false"))
            .stdout(predicate::str::contains("reset_on_select = true"))
            .stdout(predicate::str::contains("position = \"top-right\""));
    }

    #[test]
    fn test_file_values() {
        let file = config_file("reset_on_close = true\nposition = \"top-left\"\nmax_visible = 5\n");
        film_suggest()
            .arg("--print-config")
            .arg("--config")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("reset_on_close = true"))
            .stdout(predicate::str::contains("position = \"top-left\""))
            .stdout(predicate::str::contains("max_visible = 5"));
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = config_file("position = \"top-left\"\n");
        film_suggest()
            .args(["--print-config", "--position", "bottom-right", "--config"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("position = \"bottom-right\""));
    }

    #[test]
    fn test_position_from_env() {
        film_suggest()
            .arg("--print-config")
            .env("FILM_SUGGEST_POSITION", "top")
            .assert()
            .success()
            .stdout(predicate::str::contains("position = \"top-left\""));
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_unknown_position_flag() {
        film_suggest()
            .args(["--position", "middle"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("middle"));
    }

    #[test]
    fn test_missing_config_file() {
        film_suggest()
            .args(["--print-config", "--config", "/nonexistent/film-suggest.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read"));
    }

    #[test]
    fn test_malformed_config_file() {
        let file = config_file("minimal = \"sometimes\"\n");
        film_suggest()
            .arg("--print-config")
            .arg("--config")
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse"));
    }

    #[test]
    fn test_zero_rows() {
        film_suggest()
            .args(["--print-config", "--max-visible", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("max_visible must be at least 1"));
    }
}
