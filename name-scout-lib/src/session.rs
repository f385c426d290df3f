//! Naming session persistence.
//!
//! Each session is one JSON file under `~/.name-scout/sessions/`, named by
//! its id. Sessions accumulate the brief, every generated candidate, and
//! the latest availability result per name, so an interactive run can be
//! resumed later. Listing returns the ten most recently modified sessions.

use crate::error::NameCheckError;
use crate::types::{GeneratedName, NameBrief, NameCheckResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

const SESSIONS_SUBDIR: &str = ".name-scout/sessions";
const LIST_LIMIT: usize = 10;

/// One saved naming session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,

    /// Creation time, seconds since the unix epoch.
    pub created_at: u64,

    /// Last save time, seconds since the unix epoch.
    pub updated_at: u64,

    pub brief: NameBrief,

    /// Every candidate produced across generation rounds, in order.
    #[serde(default)]
    pub names: Vec<GeneratedName>,

    /// Latest availability result per checked name.
    #[serde(default)]
    pub results: Vec<NameCheckResult>,
}

impl Session {
    /// Start a fresh session around a brief.
    pub fn new(brief: NameBrief) -> Self {
        let now = unix_now();
        Self {
            id: format!("{}-{:04}", now, rand::random::<u16>() % 10_000),
            created_at: now,
            updated_at: now,
            brief,
            names: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Record a round of generated candidates, skipping duplicates.
    pub fn add_names(&mut self, generated: &[GeneratedName]) {
        for candidate in generated {
            let known = self
                .names
                .iter()
                .any(|n| n.name.eq_ignore_ascii_case(&candidate.name));
            if !known {
                self.names.push(candidate.clone());
            }
        }
    }

    /// Record availability results, replacing any earlier result for the
    /// same name.
    pub fn add_results(&mut self, results: &[NameCheckResult]) {
        for result in results {
            if let Some(existing) = self
                .results
                .iter_mut()
                .find(|r| r.name.eq_ignore_ascii_case(&result.name))
            {
                *existing = result.clone();
            } else {
                self.results.push(result.clone());
            }
        }
    }

    /// All candidate names seen so far, for iterative prompts.
    pub fn all_names(&self) -> Vec<String> {
        self.names.iter().map(|n| n.name.clone()).collect()
    }
}

/// A session's identity row, as shown in the resume picker.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub id: String,
    pub description: String,
    pub updated_at: u64,
    pub name_count: usize,
}

/// Filesystem-backed store for naming sessions.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at `~/.name-scout/sessions`.
    pub fn new() -> Result<Self, NameCheckError> {
        let home = env::var_os("HOME")
            .ok_or_else(|| NameCheckError::session("~", "HOME is not set"))?;
        Ok(Self::with_dir(Path::new(&home).join(SESSIONS_SUBDIR)))
    }

    /// Store rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist a session, stamping `updated_at`.
    pub fn save(&self, session: &mut Session) -> Result<(), NameCheckError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| NameCheckError::session(self.dir.display().to_string(), e.to_string()))?;

        session.updated_at = unix_now();
        let path = self.session_path(&session.id);
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| NameCheckError::session(path.display().to_string(), e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| NameCheckError::session(path.display().to_string(), e.to_string()))?;

        debug!(id = %session.id, "session saved");
        Ok(())
    }

    /// Load a session by id.
    pub fn load(&self, id: &str) -> Result<Session, NameCheckError> {
        let path = self.session_path(id);
        let json = fs::read_to_string(&path)
            .map_err(|e| NameCheckError::session(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&json)
            .map_err(|e| NameCheckError::session(path.display().to_string(), e.to_string()))
    }

    /// The ten most recently modified sessions, newest first.
    pub fn list(&self) -> Result<Vec<SessionSummary>, NameCheckError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| NameCheckError::session(self.dir.display().to_string(), e.to_string()))?;

        let mut summaries = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // Unreadable or malformed files are skipped, not fatal to the list.
            let session: Session = match fs::read_to_string(&path)
                .ok()
                .and_then(|json| serde_json::from_str(&json).ok())
            {
                Some(session) => session,
                None => continue,
            };
            summaries.push(SessionSummary {
                id: session.id,
                description: session.brief.description,
                updated_at: session.updated_at,
                name_count: session.names.len(),
            });
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries.truncate(LIST_LIMIT);
        Ok(summaries)
    }

    /// Delete a session by id. Deleting a missing session is not an error.
    pub fn delete(&self, id: &str) -> Result<(), NameCheckError> {
        let path = self.session_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NameCheckError::session(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    fn session_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NameBrief;
    use tempfile::TempDir;

    fn brief(description: &str) -> NameBrief {
        NameBrief::from_args(description, vec![], "modern")
    }

    fn generated(name: &str) -> GeneratedName {
        GeneratedName {
            name: name.to_string(),
            reasoning: None,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());

        let mut session = Session::new(brief("a note-taking app"));
        session.add_names(&[generated("Lumina"), generated("Echo")]);
        store.save(&mut session).unwrap();

        let loaded = store.load(&session.id).unwrap();
        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.brief.description, "a note-taking app");
        assert_eq!(loaded.all_names(), vec!["Lumina", "Echo"]);
    }

    #[test]
    fn add_names_deduplicates_case_insensitively() {
        let mut session = Session::new(brief("x"));
        session.add_names(&[generated("Lumina")]);
        session.add_names(&[generated("lumina"), generated("Echo")]);
        assert_eq!(session.all_names(), vec!["Lumina", "Echo"]);
    }

    #[test]
    fn add_results_replaces_by_name() {
        let mut session = Session::new(brief("x"));
        let first = NameCheckResult::unknown("Lumina");
        let mut second = NameCheckResult::unknown("lumina");
        second.domains.push(crate::types::DomainCheckResult {
            domain: "lumina.com".to_string(),
            available: true,
        });
        session.add_results(&[first]);
        session.add_results(&[second]);
        assert_eq!(session.results.len(), 1);
        assert_eq!(session.results[0].domains.len(), 1);
    }

    #[test]
    fn list_returns_newest_first_and_caps_at_ten() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());

        for i in 0..12 {
            let mut session = Session::new(brief(&format!("project {}", i)));
            session.id = format!("session-{}", i);
            session.updated_at = 1_000 + i;
            let path = tmp.path().join(format!("{}.json", session.id));
            std::fs::write(&path, serde_json::to_string(&session).unwrap()).unwrap();
        }

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 10);
        assert!(listed.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
        assert_eq!(listed[0].updated_at, 1_011);
    }

    #[test]
    fn list_skips_malformed_files() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());
        std::fs::write(tmp.path().join("bad.json"), "not json").unwrap();

        let mut session = Session::new(brief("good"));
        store.save(&mut session).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "good");
    }

    #[test]
    fn delete_missing_session_is_ok() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path());
        store.delete("nope").unwrap();
    }

    #[test]
    fn empty_store_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(tmp.path().join("missing"));
        assert!(store.list().unwrap().is_empty());
    }
}
