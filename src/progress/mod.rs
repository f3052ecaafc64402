//! Progress tracking for the awareness journey
//!
//! The five modules form a closed set. A citizen's progress is the set of
//! modules they have completed; it only ever grows and is written to disk
//! after every change.

pub mod persistence;
pub mod store;

pub use persistence::{FileStorage, MemoryStorage, ProgressStorage, PROGRESS_RECORD};
pub use store::ProgressStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::errors::Result;

/// Number of modules in the journey
pub const MODULE_COUNT: usize = 5;

/// Awareness module identifier
///
/// Declaration order is the journey order shown in help and status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Learn,
    Scan,
    Protect,
    Rights,
    Quiz,
}

impl ModuleId {
    /// All modules in journey order
    pub const ALL: [ModuleId; MODULE_COUNT] = [
        ModuleId::Learn,
        ModuleId::Scan,
        ModuleId::Protect,
        ModuleId::Rights,
        ModuleId::Quiz,
    ];

    /// Lowercase command token
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Learn => "learn",
            ModuleId::Scan => "scan",
            ModuleId::Protect => "protect",
            ModuleId::Rights => "rights",
            ModuleId::Quiz => "quiz",
        }
    }

    /// Exact token lookup; callers normalize first
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }

    /// 1-based position in the journey
    pub fn step(&self) -> usize {
        match self {
            ModuleId::Learn => 1,
            ModuleId::Scan => 2,
            ModuleId::Protect => 3,
            ModuleId::Rights => 4,
            ModuleId::Quiz => 5,
        }
    }

    /// One-line purpose used in the help reference
    pub fn summary(&self) -> &'static str {
        match self {
            ModuleId::Learn => "Educate yourself on local threats",
            ModuleId::Scan => "Practice detecting scams",
            ModuleId::Protect => "Secure your digital keys",
            ModuleId::Rights => "Know your legal shield (ETA Act)",
            ModuleId::Quiz => "Get your safety certification",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_token(&s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown module '{}'", s.trim()))
    }
}

/// Set of completed modules
///
/// Backed by an ordered set so iteration follows the journey order and
/// duplicates are impossible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSet {
    completed: BTreeSet<ModuleId>,
}

impl ProgressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a module; returns true if it was not already present
    pub fn insert(&mut self, id: ModuleId) -> bool {
        self.completed.insert(id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.completed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// True once every module has been completed
    pub fn is_complete(&self) -> bool {
        self.completed.len() >= MODULE_COUNT
    }

    pub fn iter(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.completed.iter().copied()
    }

    /// Modules not yet completed, in journey order
    pub fn remaining(&self) -> Vec<ModuleId> {
        ModuleId::ALL
            .into_iter()
            .filter(|m| !self.completed.contains(m))
            .collect()
    }

    /// Serialize to the persisted record format: a JSON array of tokens
    pub fn to_json(&self) -> Result<String> {
        let tokens: Vec<&str> = self.iter().map(|m| m.as_str()).collect();
        Ok(serde_json::to_string(&tokens)?)
    }

    /// Parse the persisted record format
    ///
    /// Fails if the record is not a JSON array of strings. Unknown tokens
    /// inside a well-formed array are dropped so the set never leaves the
    /// module universe.
    pub fn from_json(json: &str) -> Result<Self> {
        let tokens: Vec<String> = serde_json::from_str(json)?;
        let mut set = ProgressSet::new();
        for token in tokens {
            match ModuleId::from_token(&token) {
                Some(id) => {
                    set.insert(id);
                }
                None => warn!(token = %token, "Dropping unknown module in progress record"),
            }
        }
        Ok(set)
    }
}

impl FromIterator<ModuleId> for ProgressSet {
    fn from_iter<I: IntoIterator<Item = ModuleId>>(iter: I) -> Self {
        ProgressSet {
            completed: iter.into_iter().collect(),
        }
    }
}
