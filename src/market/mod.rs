pub mod card;
pub mod format;
pub mod skills;
pub mod vocation;

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use skills::SkillMap;

const OUTFIT_URL: &str = "https://static.tibia.com/images/charactertrade/outfits";
const ITEM_URL: &str = "https://static.tibia.com/images/charactertrade/objects";
const AUCTION_URL: &str = "https://www.tibia.com/charactertrade/?subtopic=currentcharactertrades&page=details";

/// A character up for auction, as listed in the snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u64,
    pub nickname: String,
    pub outfit_id: String,
    pub current_bid: u64,
    #[serde(default)]
    pub has_been_bidded: bool,
    /// Unix timestamp (seconds)
    pub auction_end: u64,
    pub level: u32,
    pub vocation_id: u8,
    pub server_id: u32,
    pub skills: SkillMap,
    #[serde(default)]
    pub items: Vec<u32>,
    #[serde(default)]
    pub charms: Vec<String>,
}

impl Character {
    pub fn outfit_url(&self) -> String {
        format!("{}/{}.gif", OUTFIT_URL, self.outfit_id)
    }

    pub fn auction_url(&self) -> String {
        format!("{}&auctionid={}&source=overview", AUCTION_URL, self.id)
    }
}

pub fn item_url(item: u32) -> String {
    format!("{}/{}.gif", ITEM_URL, item)
}

/// Numeric id + display string pair used by the server listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Labeled {
    #[serde(rename = "type")]
    pub kind: u8,
    pub string: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Europe,
    NorthAmerica,
    Brazil,
}

impl Region {
    pub fn from_type(kind: u8) -> Self {
        match kind {
            0 => Region::Europe,
            1 => Region::NorthAmerica,
            _ => Region::Brazil,
        }
    }

    /// Short flag label shown next to the server name
    pub fn flag(self) -> &'static str {
        match self {
            Region::Europe => "EU",
            Region::NorthAmerica => "NA",
            Region::Brazil => "BR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub server_id: u32,
    pub server_name: String,
    pub server_location: Labeled,
    pub pvp_type: Labeled,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub battleye: bool,
}

impl Server {
    pub fn region(&self) -> Region {
        Region::from_type(self.server_location.kind)
    }
}

/// Servers keyed by id. Passed to whatever needs a lookup.
#[derive(Debug, Clone, Default)]
pub struct ServerIndex(HashMap<u32, Server>);

impl ServerIndex {
    pub fn get(&self, server_id: u32) -> Option<&Server> {
        self.0.get(&server_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Server> for ServerIndex {
    fn from_iter<I: IntoIterator<Item = Server>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| (s.server_id, s)).collect())
    }
}

/// Everything the browser shows, read once from a JSON file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub characters: Vec<Character>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Snapshot {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub async fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let snapshot = Self::from_json(&content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            "Loaded {} characters on {} servers from {}",
            snapshot.characters.len(),
            snapshot.servers.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Split into the character list and a server lookup table
    pub fn into_parts(self) -> (Vec<Character>, ServerIndex) {
        (self.characters, self.servers.into_iter().collect())
    }
}
