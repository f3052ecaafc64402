//! Transcript of interpreter input and output for the current view
//!
//! Append-only. The only ways to shrink it are wholesale: `clear` empties
//! it, `exit` resets it along with the view.

/// What produced an entry; the display styles entries by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Echo of the normalized command after the prompt
    Echo,
    Help,
    /// "Initializing MODULE module" before navigating away
    Acknowledgement,
    Panic,
    Unrecognized,
    /// Low-emphasis periodic nudge
    Hint,
    Congratulation,
    Celebration,
}

/// One rendered block in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub lines: Vec<String>,
}

impl TranscriptEntry {
    pub fn new(kind: EntryKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    /// Single-line entry
    pub fn line(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            lines: vec![text.into()],
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// Ordered entries for the current view
///
/// `generation` increments on every wholesale discard so a renderer can
/// tell an append apart from a replacement.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    generation: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Discard every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of entries of a given kind
    pub fn count_of(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_count() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::line(EntryKind::Echo, "help"));
        transcript.push(TranscriptEntry::line(EntryKind::Hint, "Hint"));
        transcript.push(TranscriptEntry::line(EntryKind::Echo, "scan"));

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.count_of(EntryKind::Echo), 2);
        assert_eq!(transcript.last().unwrap().text(), "scan");
    }

    #[test]
    fn test_clear_bumps_generation() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::line(EntryKind::Echo, "panic"));
        assert_eq!(transcript.generation(), 0);

        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.generation(), 1);
    }

    #[test]
    fn test_entry_text_joins_lines() {
        let entry = TranscriptEntry::new(
            EntryKind::Celebration,
            vec!["first".to_string(), "second".to_string()],
        );
        assert_eq!(entry.text(), "first\nsecond");
        assert!(entry.contains("second"));
        assert!(!entry.contains("third"));
    }
}
