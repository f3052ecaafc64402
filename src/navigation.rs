//! Outbound navigation to module pages
//!
//! A module command acknowledges first and navigates after a short delay.
//! The delay runs as a one-shot tokio task; every scheduled navigation is
//! independent of the others and keeps its own abort handle.

use std::process::{Child, Command as ProcessCommand};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::*;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{Result, SurakshaError};
use crate::progress::ModuleId;

/// Page a module command navigates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub module: ModuleId,
    pub path: String,
}

impl NavigationTarget {
    /// `<base>/<module>.html`
    pub fn for_module(base: &str, module: ModuleId) -> Self {
        let base = base.trim_end_matches('/');
        let path = if base.is_empty() {
            format!("{}.html", module)
        } else {
            format!("{}/{}.html", base, module)
        };
        Self { module, path }
    }
}

/// Performs the navigation once the delay has elapsed
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &NavigationTarget) -> Result<()>;
}

/// Prints the page path and optionally hands it to a launcher command
///
/// Launched processes are kept until they exit so none is left as a zombie.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    launcher: Option<String>,
    launched: Mutex<Vec<Child>>,
}

impl TerminalNavigator {
    pub fn new(launcher: Option<String>) -> Self {
        Self {
            launcher,
            launched: Mutex::new(Vec::new()),
        }
    }

    /// Collect launcher processes that have exited; returns how many still run
    pub fn reap(&self) -> usize {
        let mut launched = self.launched.lock().unwrap_or_else(|e| e.into_inner());
        launched.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "Launcher exited");
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(pid = child.id(), error = %e, "Could not poll launcher");
                false
            }
        });
        launched.len()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, target: &NavigationTarget) -> Result<()> {
        println!("{} Opening {}", "→".cyan(), target.path.bold());

        let Some(launcher) = self.launcher.as_deref() else {
            println!(
                "  {}",
                format!(
                    "When you finish, come back with: suraksha --achieved {}",
                    target.module
                )
                .dimmed()
            );
            return Ok(());
        };

        let mut parts = launcher.split_whitespace();
        let program = parts.next().ok_or_else(|| SurakshaError::Navigation {
            target: target.path.clone(),
            reason: "launcher is empty".to_string(),
        })?;

        let child = ProcessCommand::new(program)
            .args(parts)
            .arg(&target.path)
            .spawn()
            .map_err(|e| SurakshaError::Navigation {
                target: target.path.clone(),
                reason: format!("{}: {}", program, e),
            })?;

        info!(path = %target.path, launcher = %program, "Module page launched");
        self.launched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(child);
        self.reap();
        Ok(())
    }
}

/// Handle to one pending navigation
pub struct ScheduledNavigation {
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort before the delay elapses; no-op once it has fired
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the navigation to fire (or for its cancellation)
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

/// Schedules delayed navigations on the tokio runtime
pub struct NavigationScheduler {
    navigator: Arc<dyn Navigator>,
    pending: Vec<ScheduledNavigation>,
}

impl NavigationScheduler {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            pending: Vec::new(),
        }
    }

    /// Fire `target` after `delay`
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, target: NavigationTarget, delay: Duration) -> &ScheduledNavigation {
        debug!(path = %target.path, delay_ms = delay.as_millis() as u64, "Navigation scheduled");

        let navigator = Arc::clone(&self.navigator);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = navigator.navigate(&target) {
                warn!(error = %e, "Navigation failed");
                println!("{} {}", "✗".red(), e.to_string().red());
            }
        });

        self.pending.retain(|n| !n.is_finished());
        self.pending.push(ScheduledNavigation { handle });
        &self.pending[self.pending.len() - 1]
    }

    /// Navigations that have not fired yet
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|n| !n.is_finished()).count()
    }

    /// Wait until every scheduled navigation has fired
    pub async fn settle(&mut self) {
        for navigation in self.pending.drain(..) {
            navigation.wait().await;
        }
    }
}
