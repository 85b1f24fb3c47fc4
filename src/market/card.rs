//! Display model for a single auction card
//!
//! Built from a [`Character`] plus the server lookup table; the UI only
//! formats what is in here.

use super::format::number_with_commas;
use super::skills::DominantSkill;
use super::vocation::vocation_name;
use super::{item_url, Character, Region, ServerIndex};

/// Featured item slots are padded up to this many placeholders
pub const FEATURED_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSlot {
    Featured { item: u32, url: String },
    Empty,
}

impl ItemSlot {
    pub fn alt(&self) -> &'static str {
        match self {
            ItemSlot::Featured { .. } => "Featured item",
            ItemSlot::Empty => "No item",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: String,
    pub level: u32,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCard {
    pub id: u64,
    pub nickname: String,
    pub level: u32,
    pub vocation: &'static str,
    pub server_name: String,
    pub region: Region,
    pub region_name: String,
    pub experimental: bool,
    pub pvp_type: String,
    pub battleye: bool,
    pub bid_label: &'static str,
    pub bid: String,
    pub auction_end: u64,
    pub items: Vec<ItemSlot>,
    pub skills: Vec<SkillEntry>,
    pub charms: Vec<String>,
    pub outfit_url: String,
    pub auction_url: String,
    pub favorite: bool,
}

impl CharacterCard {
    /// Returns `None` when the character's server is unknown; such
    /// listings are not shown.
    pub fn build(
        character: &Character,
        servers: &ServerIndex,
        dominant: &mut DominantSkill,
        favorite: bool,
    ) -> Option<Self> {
        let server = servers.get(character.server_id)?;

        let highlighted = match dominant.get(&character.skills) {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::warn!("{} ({}): {}", character.nickname, character.id, e);
                None
            }
        };

        let skills = character
            .skills
            .iter()
            .map(|(name, skill)| SkillEntry {
                name: name.to_string(),
                level: skill.level,
                highlighted: highlighted.as_deref() == Some(name),
            })
            .collect();

        Some(Self {
            id: character.id,
            nickname: character.nickname.clone(),
            level: character.level,
            vocation: vocation_name(character.vocation_id, character.level),
            server_name: server.server_name.clone(),
            region: server.region(),
            region_name: server.server_location.string.clone(),
            experimental: server.experimental,
            pvp_type: server.pvp_type.string.clone(),
            battleye: server.battleye,
            bid_label: if character.has_been_bidded { "Current Bid" } else { "Minimum Bid" },
            bid: number_with_commas(character.current_bid),
            auction_end: character.auction_end,
            items: item_slots(&character.items),
            skills,
            charms: character.charms.clone(),
            outfit_url: character.outfit_url(),
            auction_url: character.auction_url(),
            favorite,
        })
    }

    /// `Level 350 - Elite Knight`
    pub fn level_line(&self) -> String {
        format!("Level {} - {}", self.level, self.vocation)
    }

    pub fn highlighted_skill(&self) -> Option<&SkillEntry> {
        self.skills.iter().find(|s| s.highlighted)
    }
}

fn item_slots(items: &[u32]) -> Vec<ItemSlot> {
    let mut slots: Vec<ItemSlot> = items
        .iter()
        .map(|&item| ItemSlot::Featured { item, url: item_url(item) })
        .collect();

    while slots.len() < FEATURED_SLOTS {
        slots.push(ItemSlot::Empty);
    }
    slots
}
