// Agent save files and token loading
use crate::error::{Error, Result};
use crate::models::{Agent, Contract, Registration};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything needed to resume play as an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub token: String,
    pub agent: Agent,
    #[serde(default)]
    pub contract: Option<Contract>,
    #[serde(default)]
    pub faction: Option<Value>,
    #[serde(default)]
    pub ship: Option<Value>,
}

impl From<Registration> for SaveData {
    fn from(registration: Registration) -> Self {
        Self {
            token: registration.token,
            agent: registration.agent,
            contract: registration.contract,
            faction: registration.faction,
            ship: registration.ship,
        }
    }
}

impl SaveData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::decode(format!("save file {}: {e}", path.display()))
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        fs::write(path, contents)?;
        Ok(())
    }

    /// `<save_dir>/<AGENT>.json`
    pub fn path_in(&self, save_dir: impl AsRef<Path>) -> PathBuf {
        save_dir.as_ref().join(format!("{}.json", self.agent.symbol))
    }

    /// Write to `<save_dir>/<AGENT>.json` and return the path.
    pub fn save_in(&self, save_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.path_in(save_dir);
        self.save(&path)?;
        info!(agent = %self.agent.symbol, path = %path.display(), "saved agent");
        Ok(path)
    }
}

/// Read a token file, trimming surrounding whitespace.
pub fn load_agent_token(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let token = fs::read_to_string(path)
        .map_err(|e| Error::configuration(format!("failed to read {}: {e}", path.display())))?
        .trim()
        .to_string();

    if token.is_empty() {
        return Err(Error::configuration(format!("{} is empty", path.display())));
    }
    Ok(token)
}
