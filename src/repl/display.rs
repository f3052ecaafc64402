//! Display manager for the terminal UI
//!
//! Renders the welcome view, the safety shield line and transcript entries.
//! The terminal is append-only, so the manager remembers how much of the
//! transcript it has printed and only wipes the screen when the transcript
//! was replaced rather than appended to.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use std::io;
use std::time::Duration;

use crate::progress::{ModuleId, ProgressSet};
use crate::repl::commands::PROMPT;
use crate::repl::session::SessionState;
use crate::repl::transcript::{EntryKind, TranscriptEntry};
use crate::safety::{SafetyTier, Severity};

/// Intro shown at the top of the welcome view
pub const INTRO: [&str; 3] = [
    "This helps Nepali citizens stay safe online.",
    "Suraksha OS is your personal guide to navigating the digital world in Nepal. \
Addressing real cyber threats affecting our citizens, we'll build your \"Digital Shield\" together.",
    "Complete modules below to strengthen your Digital Shield.",
];

/// Lines revealed one by one when the welcome view appears
pub const BOOT_SEQUENCE: [&str; 3] = [
    "Initializing Nepal Citizen Protection Protocol...",
    "Loading Educational Journey [ETA Act Compliance]...",
    "System Ready. You are currently in the safety gateway.",
];

/// Display manager for terminal UI
pub struct DisplayManager {
    reveal_interval: Duration,
    /// Entries of the current transcript generation already printed
    rendered: usize,
    generation: u64,
    /// Print echo entries; off when the line editor already shows the input
    echo: bool,
}

impl DisplayManager {
    pub fn new(reveal_interval: Duration) -> Self {
        DisplayManager {
            reveal_interval,
            rendered: 0,
            generation: 0,
            echo: true,
        }
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    /// Show the welcome view, revealing the boot lines with a per-line stagger
    pub async fn reveal_welcome(&mut self, session: &SessionState) {
        println!();
        println!("{}", INTRO[0].bold());
        println!("{}", INTRO[1]);
        println!("{}", INTRO[2].green().dimmed());
        println!(
            "{}",
            "Type a command below to begin your journey (try 'help').".italic()
        );
        println!();

        for (index, line) in BOOT_SEQUENCE.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.reveal_interval).await;
            }
            if index == BOOT_SEQUENCE.len() - 1 {
                println!("{}", line.green());
            } else {
                println!("{}", line);
            }
        }

        println!();
        println!("Welcome back, Citizen.");
        if let Some(tier) = session.rendered_tier() {
            println!("Your Current Safety Shield: {}", Self::format_tier(tier));
        }
        println!();
        println!(
            "Explore the modules to strengthen your shield. If you ever feel unsafe, type {}.",
            "panic".red().bold()
        );
        println!();

        self.sync(session);
    }

    /// Wipe the terminal before a replaced transcript is drawn
    pub fn reset_screen(&mut self, session: &SessionState) -> io::Result<()> {
        self.sync(session);
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Print transcript entries not yet on screen
    pub fn refresh(&mut self, session: &SessionState) {
        for line in self.pending_lines(session) {
            println!("{}", line);
        }
        self.rendered = session.transcript().len();
    }

    /// Styled lines the next `refresh` prints
    pub fn pending_lines(&mut self, session: &SessionState) -> Vec<String> {
        self.sync(session);
        session
            .transcript()
            .entries()
            .iter()
            .skip(self.rendered)
            .filter(|entry| self.echo || entry.kind != EntryKind::Echo)
            .flat_map(Self::format_entry)
            .collect()
    }

    fn sync(&mut self, session: &SessionState) {
        let generation = session.transcript().generation();
        if generation != self.generation {
            self.generation = generation;
            self.rendered = 0;
        }
    }

    /// Entries printed so far for the current transcript
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Tier label styled by severity
    pub fn format_tier(tier: SafetyTier) -> String {
        let text = tier.to_string();
        match tier.severity() {
            Severity::Danger => text.red().to_string(),
            Severity::Warning => text.yellow().to_string(),
            Severity::Success => text.green().to_string(),
            Severity::SuccessEmphasized => text.green().bold().underline().to_string(),
        }
    }

    /// Styled lines for one transcript entry
    pub fn format_entry(entry: &TranscriptEntry) -> Vec<String> {
        match entry.kind {
            EntryKind::Echo => entry
                .lines
                .iter()
                .map(|line| match line.strip_prefix(PROMPT) {
                    Some(rest) => format!("{}{}", PROMPT.green().bold(), rest),
                    None => line.clone(),
                })
                .collect(),
            EntryKind::Help => entry
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        return line.yellow().to_string();
                    }
                    match line.split_once('→') {
                        Some((command, purpose)) => {
                            let styled = format!("  {}→{}", command.cyan(), purpose);
                            if command.trim() == "clear" || command.trim() == "exit" {
                                styled.dimmed().to_string()
                            } else {
                                styled
                            }
                        }
                        None => line.clone(),
                    }
                })
                .collect(),
            EntryKind::Panic => {
                let last = entry.lines.len().saturating_sub(1);
                entry
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let body = if i == 0 {
                            line.red().bold().to_string()
                        } else if i == last {
                            line.dimmed().to_string()
                        } else {
                            line.clone()
                        };
                        format!("{} {}", "│".red(), body)
                    })
                    .collect()
            }
            EntryKind::Unrecognized => entry.lines.iter().map(|l| l.red().to_string()).collect(),
            EntryKind::Hint => entry
                .lines
                .iter()
                .map(|l| l.dimmed().italic().to_string())
                .collect(),
            EntryKind::Congratulation => entry.lines.iter().map(|l| l.green().to_string()).collect(),
            EntryKind::Celebration => entry
                .lines
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    if i == 0 {
                        l.green().bold().to_string()
                    } else {
                        l.green().to_string()
                    }
                })
                .collect(),
            EntryKind::Acknowledgement => entry.lines.clone(),
        }
    }

    /// Progress summary for the `status` subcommand
    pub fn show_status(&self, progress: &ProgressSet) {
        let tier = crate::safety::tier_for(progress.len());
        println!("\n{}", "Digital Shield Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        println!("  Safety Shield: {}", Self::format_tier(tier));
        println!(
            "  Completed:     {}/{}",
            progress.len().to_string().green(),
            ModuleId::ALL.len()
        );
        println!();

        for module in ModuleId::ALL {
            let mark = if progress.contains(module) {
                "✓".green()
            } else {
                "·".dimmed()
            };
            println!(
                "  {} Step {}: {:<8} {}",
                mark,
                module.step(),
                module.as_str(),
                module.summary().dimmed()
            );
        }
        println!();
    }

}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::{help_entry, panic_entry, CommandHandler};

    #[test]
    fn test_display_manager_creation() {
        let manager = DisplayManager::default();
        assert_eq!(manager.rendered(), 0);
        assert_eq!(manager.reveal_interval, Duration::from_millis(400));
    }

    #[test]
    fn test_refresh_prints_only_new_entries() {
        let mut manager = DisplayManager::default();
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();

        handler.interpret("help", &mut session);
        manager.refresh(&session);
        assert_eq!(manager.rendered(), 2);

        handler.interpret("panic", &mut session);
        manager.refresh(&session);
        assert_eq!(manager.rendered(), 4);
    }

    #[test]
    fn test_refresh_restarts_after_clear() {
        let mut manager = DisplayManager::default();
        let mut session = SessionState::in_memory();
        let handler = CommandHandler::new();

        handler.interpret("help", &mut session);
        manager.refresh(&session);

        handler.interpret("clear", &mut session);
        handler.interpret("xyz", &mut session);
        manager.refresh(&session);
        assert_eq!(manager.rendered(), 2);
    }

    #[test]
    fn test_echo_lines_printed_by_default() {
        let mut manager = DisplayManager::default();
        let mut session = SessionState::in_memory();
        CommandHandler::new().interpret("help", &mut session);

        let lines = manager.pending_lines(&session);
        assert_eq!(lines.len(), help_entry().lines.len() + 1);
        assert!(lines[0].ends_with(" help"));
    }

    #[test]
    fn test_echo_lines_skipped_when_editor_shows_input() {
        let mut manager = DisplayManager::default();
        manager.set_echo(false);
        let mut session = SessionState::in_memory();
        CommandHandler::new().interpret("help", &mut session);

        let lines = manager.pending_lines(&session);
        assert_eq!(lines.len(), help_entry().lines.len());

        manager.refresh(&session);
        assert_eq!(manager.rendered(), 2);
        assert_eq!(session.transcript().count_of(EntryKind::Echo), 1);
    }

    #[test]
    fn test_format_help_keeps_every_line() {
        let lines = DisplayManager::format_entry(&help_entry());
        assert_eq!(lines.len(), help_entry().lines.len());
        assert!(lines.iter().any(|l| l.contains("Step 5")));
    }

    #[test]
    fn test_format_panic_is_boxed() {
        let lines = DisplayManager::format_entry(&panic_entry());
        assert!(lines.iter().all(|l| l.contains('│')));
        assert!(lines.iter().any(|l| l.contains("1144")));
    }

    #[test]
    fn test_format_echo_keeps_command() {
        let entry = TranscriptEntry::line(EntryKind::Echo, format!("{} scan", PROMPT));
        let lines = DisplayManager::format_entry(&entry);
        assert!(lines[0].ends_with(" scan"));
    }

    #[test]
    fn test_format_tier_mentions_label() {
        assert!(DisplayManager::format_tier(SafetyTier::CitizenGuard).contains("CITIZEN GUARD"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_welcome_marks_transcript_rendered() {
        let mut manager = DisplayManager::default();
        let mut session = SessionState::in_memory();
        session.render_tier();

        manager.reveal_welcome(&session).await;
        assert_eq!(manager.rendered(), 0);
    }
}
