//! Session bootstrap for Suraksha
//!
//! Runs once when the terminal starts: renders the tier for the loaded
//! progress, folds in the "achieved" signal a module page hands back on
//! completion, and asks for the boot reveal.

use tracing::{debug, info, warn};

use crate::progress::{ModuleId, MODULE_COUNT};
use crate::repl::commands::Effect;
use crate::repl::session::SessionState;
use crate::repl::transcript::{EntryKind, TranscriptEntry};
use crate::safety::SafetyTier;

/// Key carrying the completed module in the navigation context
pub const ACHIEVED_KEY: &str = "achieved";

/// Key/value pairs passed in by whoever started this session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationContext {
    params: Vec<(String, String)>,
}

impl NavigationContext {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a query string such as `?achieved=quiz&lang=ne`
    ///
    /// `+` decodes to a space; pairs without `=` get an empty value.
    /// Percent escapes are kept as written, so `achieved=%71uiz` names no
    /// module. Module tokens are plain ASCII and never need escaping.
    pub fn from_query(query: &str) -> Self {
        let params = query
            .trim()
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key.replace('+', " "), value.replace('+', " "))
            })
            .collect();
        Self { params }
    }

    /// Context carrying only an achieved module value
    pub fn with_achieved(value: impl Into<String>) -> Self {
        Self {
            params: vec![(ACHIEVED_KEY.to_string(), value.into())],
        }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn achieved(&self) -> Option<&str> {
        self.get(ACHIEVED_KEY)
    }

    /// Merge another context; existing keys win
    pub fn merge(mut self, other: NavigationContext) -> Self {
        for (key, value) in other.params {
            if self.get(&key).is_none() {
                self.params.push((key, value));
            }
        }
        self
    }
}

/// What the bootstrap did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootReport {
    /// Tier rendered after reconciliation (None without a tier region)
    pub tier: Option<SafetyTier>,
    /// Recognized module from the signal
    pub achieved: Option<ModuleId>,
    /// The signal added a module that was not complete before
    pub newly_completed: bool,
    /// This start moved progress onto the final module
    pub celebrated: bool,
    pub effects: Vec<Effect>,
}

/// Bootstrap coordinator
pub struct SessionBootstrap;

impl SessionBootstrap {
    /// Reconcile the navigation context into the session
    pub fn run(session: &mut SessionState, context: &NavigationContext) -> BootReport {
        let mut report = BootReport {
            tier: session.render_tier(),
            achieved: None,
            newly_completed: false,
            celebrated: false,
            effects: Vec::new(),
        };

        if let Some(value) = context.achieved() {
            match value.parse::<ModuleId>() {
                Ok(module) => Self::record_achievement(session, module, &mut report),
                Err(_) => debug!(value = %value, "Ignoring unrecognized achieved signal"),
            }
        }

        report.effects.push(Effect::RevealBoot);
        report
    }

    fn record_achievement(session: &mut SessionState, module: ModuleId, report: &mut BootReport) {
        let before = session.completed_count();

        if let Err(e) = session.store_mut().mark_complete(module) {
            warn!(module = %module, error = %e, "Could not persist completed module");
        }

        let after = session.completed_count();
        report.achieved = Some(module);
        report.newly_completed = after > before;
        report.tier = session.render_tier();

        info!(module = %module, completed = after, "Achievement received");
        session.append(congratulation_entry(module));

        if before < MODULE_COUNT && after >= MODULE_COUNT {
            report.celebrated = true;
            session.append(celebration_entry());
        }
    }
}

fn congratulation_entry(module: ModuleId) -> TranscriptEntry {
    TranscriptEntry::line(
        EntryKind::Congratulation,
        format!(
            "✔ Great work! You've mastered the '{}' module. You are now one step closer to being digitally secure.",
            module
        ),
    )
}

/// One-time message for completing the whole journey
pub fn celebration_entry() -> TranscriptEntry {
    TranscriptEntry::new(
        EntryKind::Celebration,
        vec![
            "🎉 TRANSFORMATION COMPLETE: You are now a DIGITAL SURAKSHAK!".to_string(),
            "You have the knowledge to protect yourself and your family in Nepal's digital world. Spread the word!"
                .to_string(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{MemoryStorage, ProgressStore};

    fn session_with(completed: &[ModuleId]) -> SessionState {
        let mut store = ProgressStore::open(Box::new(MemoryStorage::new()));
        for module in completed {
            store.mark_complete(*module).unwrap();
        }
        SessionState::new(store)
    }

    #[test]
    fn test_query_parsing() {
        let context = NavigationContext::from_query("?achieved=quiz&lang=ne");
        assert_eq!(context.achieved(), Some("quiz"));
        assert_eq!(context.get("lang"), Some("ne"));
        assert_eq!(context.get("missing"), None);

        let context = NavigationContext::from_query("flag&note=well+done");
        assert_eq!(context.get("flag"), Some(""));
        assert_eq!(context.get("note"), Some("well done"));

        assert_eq!(NavigationContext::from_query(""), NavigationContext::empty());
    }

    #[test]
    fn test_percent_escapes_are_not_decoded() {
        let context = NavigationContext::from_query("achieved=%71uiz");
        assert_eq!(context.achieved(), Some("%71uiz"));

        let mut session = SessionState::in_memory();
        let report = SessionBootstrap::run(&mut session, &context);
        assert_eq!(report.achieved, None);
        assert_eq!(session.completed_count(), 0);
    }

    #[test]
    fn test_merge_prefers_existing() {
        let context = NavigationContext::with_achieved("scan")
            .merge(NavigationContext::from_query("achieved=quiz&lang=ne"));
        assert_eq!(context.achieved(), Some("scan"));
        assert_eq!(context.get("lang"), Some("ne"));
    }

    #[test]
    fn test_fresh_session_is_unverified() {
        let mut session = session_with(&[]);
        let report = SessionBootstrap::run(&mut session, &NavigationContext::empty());

        assert_eq!(report.tier, Some(SafetyTier::Unverified));
        assert_eq!(report.achieved, None);
        assert!(session.transcript().is_empty());
        assert_eq!(report.effects, vec![Effect::RevealBoot]);
    }

    #[test]
    fn test_achievement_is_recorded_and_congratulated() {
        let mut session = session_with(&[]);
        let report = SessionBootstrap::run(&mut session, &NavigationContext::with_achieved("scan"));

        assert_eq!(report.achieved, Some(ModuleId::Scan));
        assert!(report.newly_completed);
        assert!(!report.celebrated);
        assert_eq!(report.tier, Some(SafetyTier::Learner));
        let entry = session.transcript().last().unwrap();
        assert_eq!(entry.kind, EntryKind::Congratulation);
        assert!(entry.contains("'scan'"));
    }

    #[test]
    fn test_final_module_celebrates_once() {
        let mut session = session_with(&[
            ModuleId::Learn,
            ModuleId::Scan,
            ModuleId::Protect,
            ModuleId::Rights,
        ]);

        let report = SessionBootstrap::run(&mut session, &NavigationContext::with_achieved("quiz"));

        assert!(session.store().progress().is_complete());
        assert_eq!(report.tier, Some(SafetyTier::DigitalSurakshak));
        assert!(report.celebrated);
        assert_eq!(session.transcript().count_of(EntryKind::Celebration), 1);
    }

    #[test]
    fn test_repeat_signal_at_max_does_not_celebrate() {
        let mut session = session_with(&ModuleId::ALL);

        let report = SessionBootstrap::run(&mut session, &NavigationContext::with_achieved("quiz"));

        assert!(!report.newly_completed);
        assert!(!report.celebrated);
        assert_eq!(session.transcript().count_of(EntryKind::Congratulation), 1);
        assert_eq!(session.transcript().count_of(EntryKind::Celebration), 0);
    }

    #[test]
    fn test_unrecognized_signal_is_silent() {
        let mut session = session_with(&[ModuleId::Learn]);

        let report = SessionBootstrap::run(&mut session, &NavigationContext::with_achieved("hacking"));

        assert_eq!(report.achieved, None);
        assert_eq!(session.completed_count(), 1);
        assert!(session.transcript().is_empty());
        assert_eq!(report.effects, vec![Effect::RevealBoot]);
    }

    #[test]
    fn test_signal_value_is_normalized() {
        let mut session = session_with(&[]);
        let report = SessionBootstrap::run(&mut session, &NavigationContext::with_achieved(" Rights "));
        assert_eq!(report.achieved, Some(ModuleId::Rights));
    }
}
