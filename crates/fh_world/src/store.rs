//! File layout of a galaxy directory and JSON read/write helpers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fh_core::{Game, Messages, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::galaxy_file::GalaxyFile;

pub const GAME_FILE: &str = "game.json";
pub const SETUP_FILE: &str = "setup.json";
pub const PLAYERS_FILE: &str = "players.json";
const GALAXY_FILE: &str = "galaxy.json";
const LEDGER_FILE: &str = "interspecies.json";
const OUTCOMES_FILE: &str = "interspecies.result.json";

/// One galaxy directory on disk.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Store {
        Store { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn turn_dir(&self, turn: u32) -> PathBuf {
        self.root.join(format!("t{turn:06}"))
    }

    pub fn species_file(&self, turn: u32, number: u32, ext: &str) -> PathBuf {
        self.turn_dir(turn).join(format!("sp{number:02}.{ext}"))
    }

    pub fn message_file(&self, id: u32) -> PathBuf {
        self.root.join(format!("m{id:06}.msg"))
    }

    pub fn has_game(&self) -> bool {
        self.root.join(GAME_FILE).exists()
    }

    pub fn read_game(&self) -> Result<Game> {
        read_json(&self.root.join(GAME_FILE))
    }

    pub fn write_game(&self, game: &Game) -> Result<()> {
        write_json(&self.root.join(GAME_FILE), game)
    }

    pub fn read_galaxy(&self, turn: u32) -> Result<fh_core::Galaxy> {
        let path = self.turn_dir(turn).join(GALAXY_FILE);
        let file: GalaxyFile = read_json(&path)?;
        file.into_galaxy()
            .with_context(|| format!("checking {}", path.display()))
    }

    pub fn write_galaxy(&self, turn: u32, galaxy: &fh_core::Galaxy) -> Result<()> {
        let dir = self.turn_dir(turn);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        write_json(&dir.join(GALAXY_FILE), &GalaxyFile::from_galaxy(galaxy))
    }

    /// Ledger for `turn`. A missing file means no transactions.
    pub fn read_ledger(&self, turn: u32) -> Result<Vec<Transaction>> {
        let path = self.turn_dir(turn).join(LEDGER_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    pub fn write_ledger(&self, turn: u32, ledger: &[Transaction]) -> Result<()> {
        write_json(&self.turn_dir(turn).join(LEDGER_FILE), &ledger)
    }

    /// The ledger of `turn` as it stood after the turn was finished, with
    /// transfer outcomes filled in. Kept apart from the input ledger so the
    /// turn can be finished again.
    pub fn read_outcomes(&self, turn: u32) -> Result<Vec<Transaction>> {
        let path = self.turn_dir(turn).join(OUTCOMES_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    pub fn write_outcomes(&self, turn: u32, ledger: &[Transaction]) -> Result<()> {
        write_json(&self.turn_dir(turn).join(OUTCOMES_FILE), &ledger)
    }

    /// Whether the species left a non-empty orders file for `turn`.
    pub fn has_orders(&self, turn: u32, number: u32) -> bool {
        fs::metadata(self.species_file(turn, number, "ord")).is_ok_and(|m| m.len() > 0)
    }

    /// Every `m<NNNNNN>.msg` body in the galaxy directory.
    pub fn read_messages(&self) -> Result<Messages> {
        let mut messages = Messages::default();
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("listing {}", self.root.display()))?;
        for entry in entries {
            let path = entry?.path();
            let Some(id) = message_id(&path) else {
                continue;
            };
            let body: String = read_json(&path)?;
            messages.insert(id, body);
        }
        Ok(messages)
    }

    pub fn write_message(&self, id: u32, body: &str) -> Result<()> {
        write_json(&self.message_file(id), &body)
    }

    /// Replace a species' event log for `turn`. An empty log removes any
    /// file left by an earlier run of the same turn.
    pub fn write_log(&self, turn: u32, number: u32, text: &str) -> Result<()> {
        let path = self.species_file(turn, number, "log.txt");
        if !text.is_empty() {
            return self.write_text(&path, text);
        }
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        }
        Ok(())
    }

    /// A species' event log for `turn`, if one was written.
    pub fn read_log(&self, turn: u32, number: u32) -> Result<Option<String>> {
        let path = self.species_file(turn, number, "log.txt");
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("reading {}", path.display()))
    }

    pub fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }
}

fn message_id(path: &Path) -> Option<u32> {
    if path.extension()? != "msg" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix('m')?.parse().ok()
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_zero_padded() {
        let store = Store::new("/g");
        assert_eq!(store.turn_dir(7), Path::new("/g/t000007"));
        assert_eq!(store.species_file(3, 2, "rpt"), Path::new("/g/t000003/sp02.rpt"));
        assert_eq!(store.message_file(12), Path::new("/g/m000012.msg"));
    }

    #[test]
    fn only_message_files_have_ids() {
        assert_eq!(message_id(Path::new("/g/m000012.msg")), Some(12));
        assert_eq!(message_id(Path::new("/g/game.json")), None);
        assert_eq!(message_id(Path::new("/g/mail.msg")), None);
    }

    #[test]
    fn missing_ledger_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert!(store.read_ledger(4).unwrap().is_empty());
    }

    #[test]
    fn messages_and_logs_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_message(5, "Hello there.").unwrap();
        let messages = store.read_messages().unwrap();
        assert_eq!(messages.get(&5).map(String::as_str), Some("Hello there."));

        store.write_log(1, 2, "first\n").unwrap();
        store.write_log(1, 2, "second\n").unwrap();
        assert_eq!(store.read_log(1, 2).unwrap().as_deref(), Some("second\n"));
        assert_eq!(store.read_log(1, 3).unwrap(), None);
    }

    #[test]
    fn empty_log_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.write_log(1, 2, "stale\n").unwrap();
        store.write_log(1, 2, "").unwrap();
        assert_eq!(store.read_log(1, 2).unwrap(), None);
        store.write_log(1, 3, "").unwrap();
        assert!(!store.species_file(1, 3, "log.txt").exists());
    }

    #[test]
    fn outcomes_do_not_touch_the_input_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let mut offer = Transaction::new(fh_core::TransactionKind::TechTransfer);
        offer.value = 3;
        store.write_ledger(2, std::slice::from_ref(&offer)).unwrap();
        offer.number_1 = -1;
        store.write_outcomes(2, &[offer]).unwrap();

        assert_eq!(store.read_ledger(2).unwrap()[0].number_1, 0);
        assert_eq!(store.read_outcomes(2).unwrap()[0].number_1, -1);
        assert!(store.read_outcomes(3).unwrap().is_empty());
    }
}
