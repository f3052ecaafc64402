//! Interactive terminal for the awareness journey
//!
//! Reads a line, interprets it against the session, performs the returned
//! effects and prints whatever the transcript gained.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;
pub mod transcript;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::bootstrap::BootReport;
use crate::cli::Config;
use crate::navigation::{NavigationScheduler, Navigator, TerminalNavigator};
use crate::repl::commands::{CommandHandler, Effect, Outcome};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
pub use crate::repl::session::{SessionState, View};

/// REPL session coordinator
///
/// Owns the session state and everything needed to drive it from a
/// terminal: input, interpreter, display and navigation scheduling.
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session: SessionState,
    display_manager: DisplayManager,
    scheduler: NavigationScheduler,
}

impl ReplSession {
    /// Create a session driven by `config`, without persistent history
    pub fn new(config: &Config, session: SessionState) -> Result<Self> {
        let navigator = Arc::new(TerminalNavigator::new(config.navigation.launcher.clone()));
        Self::build(InputHandler::new()?, config, session, navigator)
    }

    /// Create a session with persistent command history
    pub fn with_history(config: &Config, session: SessionState, history_path: PathBuf) -> Result<Self> {
        let navigator = Arc::new(TerminalNavigator::new(config.navigation.launcher.clone()));
        Self::build(InputHandler::with_history(history_path)?, config, session, navigator)
    }

    /// Create a session with a custom navigator
    pub fn with_navigator(
        config: &Config,
        session: SessionState,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Self::build(InputHandler::new()?, config, session, navigator)
    }

    fn build(
        input_handler: InputHandler,
        config: &Config,
        session: SessionState,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Ok(ReplSession {
            input_handler,
            command_handler: CommandHandler::with_settings(config.interpreter_settings()),
            session,
            display_manager: DisplayManager::new(config.boot_reveal_interval()),
            scheduler: NavigationScheduler::new(navigator),
        })
    }

    /// Render the bootstrap result: welcome view first, then any entries
    /// the bootstrap appended below it
    pub async fn start(&mut self, report: &BootReport) -> Result<()> {
        self.apply(&report.effects).await;
        self.display_manager.refresh(&self.session);
        Ok(())
    }

    /// Read a line of input from user; `None` when the user leaves
    pub fn read_input(&mut self) -> Result<Option<String>> {
        self.input_handler.read_line()
    }

    /// Interpret one line and render its effects
    ///
    /// Pending navigations are allowed to fire before this returns so the
    /// next prompt is drawn after them.
    pub async fn handle_input(&mut self, input: &str) -> Result<Outcome> {
        let outcome = self.command_handler.interpret(input, &mut self.session);
        self.apply(&outcome.effects).await;
        self.display_manager.refresh(&self.session);
        self.scheduler.settle().await;
        Ok(outcome)
    }

    async fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Navigate { target, delay } => {
                    self.scheduler.schedule(target.clone(), *delay);
                }
                Effect::ResetScreen => {
                    if let Err(e) = self.display_manager.reset_screen(&self.session) {
                        debug!(error = %e, "Screen reset not supported");
                    }
                }
                Effect::RevealBoot => self.display_manager.reveal_welcome(&self.session).await,
            }
        }
    }

    /// Run until the user leaves
    pub async fn run(&mut self) -> Result<()> {
        // rustyline already leaves the typed line on screen
        self.display_manager.set_echo(false);
        while let Some(line) = self.read_input()? {
            self.handle_input(&line).await?;
        }

        self.scheduler.settle().await;
        if let Err(e) = self.save() {
            warn!(error = %e, "Could not save command history");
        }
        Ok(())
    }

    /// Save command history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }
}
