//! Command interpreter for the Suraksha terminal
//!
//! The vocabulary is closed and flat: every token is matched exactly after
//! trimming and lowercasing, and anything else becomes `Unrecognized`,
//! which gets a friendly redirect instead of an error.

use std::time::Duration;

use tracing::debug;

use crate::navigation::NavigationTarget;
use crate::progress::ModuleId;
use crate::repl::session::{SessionState, View};
use crate::repl::transcript::{EntryKind, TranscriptEntry};

/// Prompt shown before every echoed command
pub const PROMPT: &str = "citizen@suraksha:~$";

/// Periodic nudge appended as the transcript grows
pub const HINT: &str = "Hint: Try learn | scan | protect | rights | quiz | panic";

/// Parsed terminal command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Module(ModuleId),
    Panic,
    Exit,
    Clear,
    /// Blank input; echoed and otherwise ignored
    Empty,
    Unrecognized { input: String },
}

impl Command {
    /// Parse raw input; never fails
    pub fn parse(raw: &str) -> Command {
        let token = normalize(raw);

        match token.as_str() {
            "" => Command::Empty,
            "help" => Command::Help,
            "panic" => Command::Panic,
            "exit" => Command::Exit,
            "clear" => Command::Clear,
            other => match ModuleId::from_token(other) {
                Some(module) => Command::Module(module),
                None => Command::Unrecognized { input: token },
            },
        }
    }
}

/// Trim and lowercase raw input
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Side effect the terminal driver must perform after interpreting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Navigate to a module page once `delay` has elapsed
    Navigate {
        target: NavigationTarget,
        delay: Duration,
    },
    /// Wipe the rendered transcript region
    ResetScreen,
    /// Show the welcome view with the staggered boot sequence
    RevealBoot,
}

/// Result of interpreting one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub command: Command,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn new(command: Command) -> Self {
        Self {
            command,
            effects: Vec::new(),
        }
    }

    /// Navigation this outcome schedules, if any
    pub fn navigation(&self) -> Option<&NavigationTarget> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Navigate { target, .. } => Some(target),
            _ => None,
        })
    }
}

/// Interpreter tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterSettings {
    /// Wait between the acknowledgement and the navigation
    pub navigation_delay: Duration,
    /// Directory holding the module pages
    pub module_base: String,
    /// Append the hint whenever the entry count is a multiple of this
    pub hint_every: usize,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self {
            navigation_delay: Duration::from_millis(600),
            module_base: "modules".to_string(),
            hint_every: 5,
        }
    }
}

/// Command handler for parsing and executing terminal commands
#[derive(Debug, Clone, Default)]
pub struct CommandHandler {
    settings: InterpreterSettings,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: InterpreterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &InterpreterSettings {
        &self.settings
    }

    pub fn parse(&self, input: &str) -> Command {
        Command::parse(input)
    }

    /// Parse and execute one line of input
    pub fn interpret(&self, raw: &str, session: &mut SessionState) -> Outcome {
        let command = self.parse(raw);
        self.execute(command, session)
    }

    /// Execute a parsed command against the session
    ///
    /// Progress is never touched here: module completion is reported back
    /// through the bootstrap signal, not by launching a module.
    pub fn execute(&self, command: Command, session: &mut SessionState) -> Outcome {
        debug!(command = ?command, "Executing command");
        let mut outcome = Outcome::new(command.clone());

        let output = match &command {
            Command::Exit => {
                session.reset_to_welcome();
                session.render_tier();
                outcome.effects.push(Effect::ResetScreen);
                outcome.effects.push(Effect::RevealBoot);
                return outcome;
            }
            Command::Clear => {
                session.clear_transcript();
                outcome.effects.push(Effect::ResetScreen);
                return outcome;
            }
            Command::Help => Some(help_entry()),
            Command::Module(module) => {
                outcome.effects.push(Effect::Navigate {
                    target: NavigationTarget::for_module(&self.settings.module_base, *module),
                    delay: self.settings.navigation_delay,
                });
                Some(acknowledgement_entry(*module))
            }
            Command::Panic => Some(panic_entry()),
            Command::Unrecognized { input } => Some(unrecognized_entry(input)),
            Command::Empty => None,
        };

        session.set_view(View::Transcript);
        session.append(echo_entry(&command));
        if let Some(entry) = output {
            session.append(entry);
        }

        let count = session.transcript().len();
        if self.settings.hint_every > 0 && count > 0 && count % self.settings.hint_every == 0 {
            session.append(TranscriptEntry::line(EntryKind::Hint, HINT));
        }

        outcome
    }
}

fn echo_entry(command: &Command) -> TranscriptEntry {
    let token = match command {
        Command::Help => "help",
        Command::Module(module) => module.as_str(),
        Command::Panic => "panic",
        Command::Exit => "exit",
        Command::Clear => "clear",
        Command::Empty => "",
        Command::Unrecognized { input } => input.as_str(),
    };
    TranscriptEntry::line(EntryKind::Echo, format!("{} {}", PROMPT, token).trim_end())
}

/// Static command reference
pub fn help_entry() -> TranscriptEntry {
    let mut lines = vec!["Your Journey to Safety:".to_string()];
    for module in ModuleId::ALL {
        lines.push(format!(
            "{:<8}→ Step {}: {}",
            module.as_str(),
            module.step(),
            module.summary()
        ));
    }
    lines.push(String::new());
    lines.push(format!("{:<8}→ Immediate help: Cyber Bureau 1144", "panic"));
    lines.push(format!("{:<8}→ Clear terminal display", "clear"));
    lines.push(format!("{:<8}→ Return to welcome screen", "exit"));
    TranscriptEntry::new(EntryKind::Help, lines)
}

fn acknowledgement_entry(module: ModuleId) -> TranscriptEntry {
    TranscriptEntry::line(
        EntryKind::Acknowledgement,
        format!(
            "Initializing {} module. Stay focused, Citizen. Your safety is our priority.",
            module.as_str().to_uppercase()
        ),
    )
}

/// Emergency contacts; available regardless of progress
pub fn panic_entry() -> TranscriptEntry {
    TranscriptEntry::new(
        EntryKind::Panic,
        vec![
            "NEPAL CYBER BUREAU - EMERGENCY HELP".to_string(),
            "If you feel unsafe online, help is available. You are not alone.".to_string(),
            "📞 Call 1144 (Toll Free)".to_string(),
            "📧 Email: cyberbureau@nepalpolice.gov.np".to_string(),
            "The Electronic Transactions Act (2063) protects your rights. Report early, save all evidence."
                .to_string(),
        ],
    )
}

fn unrecognized_entry(input: &str) -> TranscriptEntry {
    TranscriptEntry::line(
        EntryKind::Unrecognized,
        format!(
            "I don't recognize '{}'. If you're lost, type 'help' or try one of the modules. I'm here to guide you to safety.",
            input
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::SafetyTier;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Command::parse("  HELP "), Command::Help);
        assert_eq!(Command::parse("Learn"), Command::Module(ModuleId::Learn));
        assert_eq!(Command::parse("\tquiz\n"), Command::Module(ModuleId::Quiz));
        assert_eq!(Command::parse("PANIC"), Command::Panic);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn test_parse_unrecognized_keeps_normalized_token() {
        assert_eq!(
            Command::parse(" XYZ "),
            Command::Unrecognized {
                input: "xyz".to_string()
            }
        );
        // no arguments in this vocabulary
        assert_eq!(
            Command::parse("learn now"),
            Command::Unrecognized {
                input: "learn now".to_string()
            }
        );
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();

        handler.interpret("HELP", &mut session);

        let entries = session.transcript().entries();
        assert_eq!(entries[0].text(), "citizen@suraksha:~$ help");
        let help = &entries[1];
        assert_eq!(help.kind, EntryKind::Help);
        for token in ["learn", "scan", "protect", "rights", "quiz", "panic", "clear", "exit"] {
            assert!(
                help.lines.iter().any(|l| l.starts_with(token)),
                "help is missing {}",
                token
            );
        }
    }

    #[test]
    fn test_module_command_schedules_navigation() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();

        let outcome = handler.interpret("learn", &mut session);

        assert_eq!(
            outcome.effects,
            vec![Effect::Navigate {
                target: NavigationTarget::for_module("modules", ModuleId::Learn),
                delay: Duration::from_millis(600),
            }]
        );
        assert_eq!(outcome.navigation().unwrap().path, "modules/learn.html");
        assert!(session
            .transcript()
            .last()
            .unwrap()
            .contains("Initializing LEARN module"));
        assert_eq!(session.completed_count(), 0);
    }

    #[test]
    fn test_panic_block() {
        let mut session = SessionState::in_memory();
        CommandHandler::new().interpret("panic", &mut session);

        let block = session.transcript().last().unwrap();
        assert_eq!(block.kind, EntryKind::Panic);
        assert!(block.contains("1144"));
        assert!(block.contains("cyberbureau@nepalpolice.gov.np"));
        assert!(block.contains("Electronic Transactions Act"));
    }

    #[test]
    fn test_unrecognized_names_token() {
        let mut session = SessionState::in_memory();
        let outcome = CommandHandler::new().interpret("xyz", &mut session);

        assert!(outcome.effects.is_empty());
        let entry = session.transcript().last().unwrap();
        assert_eq!(entry.kind, EntryKind::Unrecognized);
        assert!(entry.contains("'xyz'"));
        assert_eq!(session.completed_count(), 0);
    }

    #[test]
    fn test_empty_input_only_echoes() {
        let mut session = SessionState::in_memory();
        CommandHandler::new().interpret("   ", &mut session);

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().entries()[0].text(), PROMPT);
        assert_eq!(session.view(), View::Transcript);
    }

    #[test]
    fn test_clear_empties_without_echo() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();
        handler.interpret("help", &mut session);

        let outcome = handler.interpret("clear", &mut session);

        assert!(session.transcript().is_empty());
        assert_eq!(session.view(), View::Transcript);
        assert_eq!(outcome.effects, vec![Effect::ResetScreen]);
    }

    #[test]
    fn test_exit_restores_welcome_and_renders_tier() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();
        handler.interpret("panic", &mut session);
        session.store_mut().mark_complete(ModuleId::Scan).unwrap();

        let outcome = handler.interpret("exit", &mut session);

        assert!(session.transcript().is_empty());
        assert_eq!(session.view(), View::Welcome);
        assert_eq!(session.rendered_tier(), Some(SafetyTier::Learner));
        assert_eq!(outcome.effects, vec![Effect::ResetScreen, Effect::RevealBoot]);
    }

    #[test]
    fn test_hint_on_multiples_of_five() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();

        // echo + output = 2 entries per command
        handler.interpret("help", &mut session);
        handler.interpret("panic", &mut session);
        assert_eq!(session.transcript().count_of(EntryKind::Hint), 0);

        // fifth entry is the empty command's echo
        handler.interpret("", &mut session);
        assert_eq!(session.transcript().len(), 6);
        assert_eq!(session.transcript().last().unwrap().text(), HINT);
    }

    #[test]
    fn test_hint_period_is_configurable() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::with_settings(InterpreterSettings {
            hint_every: 2,
            ..Default::default()
        });

        handler.interpret("xyz", &mut session);
        assert_eq!(session.transcript().last().unwrap().kind, EntryKind::Hint);
    }

    #[test]
    fn test_custom_module_base_and_delay() {
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::with_settings(InterpreterSettings {
            navigation_delay: Duration::from_millis(50),
            module_base: "pages".to_string(),
            hint_every: 5,
        });

        let outcome = handler.interpret("rights", &mut session);
        assert_eq!(
            outcome.effects,
            vec![Effect::Navigate {
                target: NavigationTarget::for_module("pages", ModuleId::Rights),
                delay: Duration::from_millis(50),
            }]
        );
    }
}
