//! Doctor command for installation diagnostics
//!
//! Checks that the configuration is sane, that progress can be persisted
//! and read back, and that module pages and the launcher are reachable.

use colored::*;
use std::path::Path;

use crate::cli::Config;
use crate::navigation::NavigationTarget;
use crate::progress::{FileStorage, ModuleId, ProgressSet, ProgressStorage};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config(),
            self.check_state_dir(),
            self.check_progress_record(),
            self.check_module_pages(),
            self.check_launcher(),
        ]
    }

    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    /// The state directory must accept a scratch file
    fn check_state_dir(&self) -> HealthCheck {
        let state_dir = self.config.state_dir();

        if let Err(e) = std::fs::create_dir_all(&state_dir) {
            return HealthCheck::new(
                "State Directory",
                HealthStatus::Fail(format!("Cannot create {}: {}", state_dir.display(), e)),
            );
        }

        let scratch = state_dir.join(".suraksha_write_check");
        match std::fs::write(&scratch, "ok") {
            Ok(()) => {
                let _ = std::fs::remove_file(&scratch);
                HealthCheck::new("State Directory", HealthStatus::Pass)
            }
            Err(e) => HealthCheck::new(
                "State Directory",
                HealthStatus::Fail(format!("No write permission in {}: {}", state_dir.display(), e)),
            ),
        }
    }

    fn check_progress_record(&self) -> HealthCheck {
        let storage = FileStorage::new(self.config.state_dir());

        match storage.read() {
            Ok(None) => HealthCheck::new(
                "Progress Record",
                HealthStatus::Warn("No progress recorded yet".to_string()),
            ),
            Ok(Some(record)) => match ProgressSet::from_json(&record) {
                Ok(_) => HealthCheck::new("Progress Record", HealthStatus::Pass),
                Err(e) => HealthCheck::new(
                    "Progress Record",
                    HealthStatus::Warn(format!("Malformed record, will reset to empty ({})", e)),
                ),
            },
            Err(e) => HealthCheck::new("Progress Record", HealthStatus::Fail(e.to_string())),
        }
    }

    fn check_module_pages(&self) -> HealthCheck {
        let missing: Vec<String> = ModuleId::ALL
            .iter()
            .map(|m| NavigationTarget::for_module(&self.config.navigation.module_base, *m).path)
            .filter(|path| !Path::new(path).exists())
            .collect();

        if missing.is_empty() {
            HealthCheck::new("Module Pages", HealthStatus::Pass)
        } else {
            HealthCheck::new(
                "Module Pages",
                HealthStatus::Warn(format!("Missing: {}", missing.join(", "))),
            )
        }
    }

    fn check_launcher(&self) -> HealthCheck {
        let Some(launcher) = self.config.navigation.launcher.as_deref() else {
            return HealthCheck::new(
                "Launcher",
                HealthStatus::Warn("None configured, pages are only printed".to_string()),
            );
        };

        let program = launcher.split_whitespace().next().unwrap_or(launcher);
        if which::which(program).is_ok() {
            HealthCheck::new("Launcher", HealthStatus::Pass)
        } else {
            HealthCheck::new(
                "Launcher",
                HealthStatus::Fail(format!("'{}' is not an executable on PATH", program)),
            )
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "Suraksha Diagnostics".bold().cyan());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(60));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow().to_string(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red().to_string(),
            };
            println!("{:<20} {}", check.name, message);
        }

        println!();
    }

    /// True when no check failed; warnings are tolerated
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
