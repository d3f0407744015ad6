use std::fmt;
use std::path::PathBuf;

use crate::api::StoreApi;
use crate::config::{StoredeskConfig, load_config, resolve_config_path};
use crate::http::HttpStoreApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

const CHECK_CONFIG_EXISTS: &str = "config file exists";
const CHECK_CONFIG_VALID: &str = "config parses and validates";
const CHECK_BACKEND: &str = "backend reachable";

pub fn run_doctor() -> DoctorReport {
    run_doctor_with_connector(resolve_config_path(), &|config: &StoredeskConfig| {
        Box::new(HttpStoreApi::new(&config.api)) as Box<dyn StoreApi>
    })
}

pub fn run_doctor_with_connector(
    config_path: anyhow::Result<PathBuf>,
    connect: &dyn Fn(&StoredeskConfig) -> Box<dyn StoreApi>,
) -> DoctorReport {
    let mut checks = Vec::new();

    let config_path = match config_path {
        Ok(path) => path,
        Err(error) => {
            checks.push(fail_check("config path resolves", error.to_string()));
            push_skipped_checks(
                &mut checks,
                &[CHECK_CONFIG_EXISTS, CHECK_CONFIG_VALID, CHECK_BACKEND],
                "config path could not be resolved",
            );
            return DoctorReport { checks };
        }
    };

    if !config_path.exists() {
        checks.push(fail_check(
            CHECK_CONFIG_EXISTS,
            format!("expected at {}", config_path.display()),
        ));
        push_skipped_checks(
            &mut checks,
            &[CHECK_CONFIG_VALID, CHECK_BACKEND],
            "config file is missing",
        );
        return DoctorReport { checks };
    }

    checks.push(pass_check(
        CHECK_CONFIG_EXISTS,
        format!("found at {}", config_path.display()),
    ));

    match load_config(&config_path) {
        Ok(config) => {
            checks.push(pass_check(CHECK_CONFIG_VALID, "config is valid"));
            let api = connect(&config);
            checks.push(check_backend(api.as_ref(), config.api.origin()));
        }
        Err(error) => {
            checks.push(fail_check(CHECK_CONFIG_VALID, error.to_string()));
            checks.push(skipped_check(CHECK_BACKEND, "config is invalid"));
        }
    }

    DoctorReport { checks }
}

fn check_backend(api: &dyn StoreApi, origin: &str) -> DoctorCheck {
    match api.list_stores() {
        Ok(stores) => pass_check(
            CHECK_BACKEND,
            format!("GET {origin}/api/stores returned {} store(s)", stores.len()),
        ),
        Err(error) => fail_check(CHECK_BACKEND, error.to_string()),
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn skipped_check(name: &str, reason: &str) -> DoctorCheck {
    fail_check(name, format!("skipped because {reason}"))
}

fn push_skipped_checks(checks: &mut Vec<DoctorCheck>, names: &[&str], reason: &str) {
    checks.extend(
        names
            .iter()
            .copied()
            .map(|name| skipped_check(name, reason)),
    );
}
