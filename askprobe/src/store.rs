use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use shared::Hotel;

#[derive(Deserialize, Serialize, Debug, Default)]
struct ConfigData {
    #[serde(default)]
    questions: Vec<String>,
    #[serde(default)]
    hotels: Vec<Hotel>,
}

/// JSON-file-backed table of questions and hotels.
///
/// The whole file is loaded at open and rewritten after every successful
/// mutation, so disk and memory agree as soon as a mutating call returns.
/// Single-writer by assumption: the store itself does no locking.
pub struct ConfigStore {
    path: PathBuf,
    data: ConfigData,
}

impl ConfigStore {
    /// Opens the store at `path`. A missing file yields an empty store
    /// (nothing is written until the first mutation). A file that exists
    /// but does not parse is an error, not an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Could not read config file {}", path.display()))?;
            serde_json::from_str(&raw)
                .into_diagnostic()
                .wrap_err_with(|| format!("Could not parse config file {}", path.display()))?
        } else {
            ConfigData::default()
        };

        Ok(Self { path, data })
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.data).into_diagnostic()?;
        fs::write(&self.path, raw)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not write config file {}", self.path.display()))
    }

    pub fn questions(&self) -> &[String] {
        &self.data.questions
    }

    /// Returns `Ok(false)` if the question already exists.
    pub fn add_question(&mut self, question: &str) -> Result<bool> {
        if self.data.questions.iter().any(|q| q == question) {
            return Ok(false);
        }
        self.data.questions.push(question.to_owned());
        self.persist()?;
        Ok(true)
    }

    /// Replaces `old` in place, keeping its position. Returns `Ok(false)`
    /// if `old` is absent. The new text is not checked for duplication.
    pub fn update_question(&mut self, old: &str, new: &str) -> Result<bool> {
        match self.data.questions.iter_mut().find(|q| *q == old) {
            Some(slot) => {
                *slot = new.to_owned();
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_question(&mut self, question: &str) -> Result<bool> {
        match self.data.questions.iter().position(|q| q == question) {
            Some(index) => {
                self.data.questions.remove(index);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.data.hotels
    }

    /// Returns `Ok(false)` if a hotel with the same name already exists.
    pub fn add_hotel(&mut self, hotel: Hotel) -> Result<bool> {
        if self.data.hotels.iter().any(|h| h.name == hotel.name) {
            return Ok(false);
        }
        self.data.hotels.push(hotel);
        self.persist()?;
        Ok(true)
    }

    /// Replaces the record named `name` wholesale. Returns `Ok(false)` if
    /// no such hotel exists.
    pub fn update_hotel(&mut self, name: &str, hotel: Hotel) -> Result<bool> {
        match self.data.hotels.iter_mut().find(|h| h.name == name) {
            Some(slot) => {
                *slot = hotel;
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_hotel(&mut self, name: &str) -> Result<bool> {
        match self.data.hotels.iter().position(|h| h.name == name) {
            Some(index) => {
                self.data.hotels.remove(index);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
