use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::market::card::CharacterCard;
use crate::market::skills::DominantSkill;
use crate::market::vocation::VocationFilter;
use crate::market::{Character, ServerIndex};
use crate::paginator::Paginator;

/// Status messages disappear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Drawer, // Favourites side drawer
    Help,
}

/// Which characters make up the current dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListFilter {
    pub vocation: VocationFilter,
    pub favorites_only: bool,
}

pub struct App {
    pub popup: Popup,

    characters: Vec<Character>,
    servers: ServerIndex,

    // Current dataset: indices into `characters` after filtering
    pub filter: ListFilter,
    dataset: Vec<usize>,

    paginator: Paginator,
    pub selected: usize, // Row within the current page

    pub favorites: HashSet<u64>,
    highlights: HashMap<u64, DominantSkill>,

    // Cards for the visible page, rebuilt on page or dataset change
    pub cards: Vec<CharacterCard>,
    // Cards for the favourites drawer
    pub favorite_cards: Vec<CharacterCard>,
    pub drawer_selected: usize,

    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(characters: Vec<Character>, servers: ServerIndex, items_per_page: usize) -> Self {
        let paginator = Paginator::new(items_per_page, characters.len())
            .with_on_page_change(|index| tracing::info!("Showing page {}", index + 1));

        let mut app = Self {
            popup: Popup::None,
            characters,
            servers,
            filter: ListFilter::default(),
            dataset: Vec::new(),
            paginator,
            selected: 0,
            favorites: HashSet::new(),
            highlights: HashMap::new(),
            cards: Vec::new(),
            favorite_cards: Vec::new(),
            drawer_selected: 0,
            status_message: None,
            status_message_time: None,
        };

        app.rebuild_dataset();
        app
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn dataset_len(&self) -> usize {
        self.dataset.len()
    }

    pub fn selected_card(&self) -> Option<&CharacterCard> {
        self.cards.get(self.selected)
    }

    /// Re-apply the filter. A new dataset always starts on the first page.
    fn rebuild_dataset(&mut self) {
        let filter = self.filter;
        let favorites = &self.favorites;
        self.dataset = self
            .characters
            .iter()
            .enumerate()
            .filter(|(_, c)| filter.vocation.matches(c.vocation_id))
            .filter(|(_, c)| !filter.favorites_only || favorites.contains(&c.id))
            .map(|(i, _)| i)
            .collect();

        self.paginator.replace_dataset(self.dataset.len());
        tracing::debug!(
            "Dataset rebuilt: {} of {} characters ({:?})",
            self.dataset.len(),
            self.characters.len(),
            self.filter
        );
        self.rebuild_cards();
    }

    /// Build cards for the current page, skipping characters whose server
    /// is unknown
    fn rebuild_cards(&mut self) {
        let bounds = self.paginator.page_bounds();
        let page: Vec<usize> = self.dataset[bounds].to_vec();

        let cards: Vec<CharacterCard> = page.into_iter().filter_map(|i| self.card_for(i)).collect();
        self.cards = cards;
        self.selected = 0;
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Jump to a page by index. Out-of-range requests are ignored.
    pub fn go_to_page(&mut self, index: usize) -> Option<usize> {
        let moved = self.paginator.go_to(index);
        self.after_navigation(moved);
        moved
    }

    fn rebuild_favorite_cards(&mut self) {
        let favorites: Vec<usize> = self
            .characters
            .iter()
            .enumerate()
            .filter(|(_, c)| self.favorites.contains(&c.id))
            .map(|(i, _)| i)
            .collect();

        let cards: Vec<CharacterCard> = favorites.into_iter().filter_map(|i| self.card_for(i)).collect();
        self.favorite_cards = cards;
        self.drawer_selected = self
            .drawer_selected
            .min(self.favorite_cards.len().saturating_sub(1));
    }

    fn card_for(&mut self, index: usize) -> Option<CharacterCard> {
        let character = &self.characters[index];
        let favorite = self.favorites.contains(&character.id);
        let dominant = self.highlights.entry(character.id).or_default();
        CharacterCard::build(character, &self.servers, dominant, favorite)
    }

    fn after_navigation(&mut self, moved: Option<usize>) {
        if moved.is_some() {
            self.rebuild_cards();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::Drawer => self.handle_drawer_key(key),
            Popup::None => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        let before = self.paginator.index();
        if self.paginator.handle_key(key) {
            if self.paginator.index() != before {
                self.rebuild_cards();
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Home | KeyCode::Char('g') => {
                let moved = self.paginator.first();
                self.after_navigation(moved);
            }
            KeyCode::End | KeyCode::Char('G') => {
                let moved = self.paginator.last();
                self.after_navigation(moved);
            }
            KeyCode::PageUp => {
                let moved = self.paginator.previous();
                self.after_navigation(moved);
            }
            KeyCode::PageDown => {
                let moved = self.paginator.next();
                self.after_navigation(moved);
            }

            KeyCode::Char('j') | KeyCode::Down => {
                if !self.cards.is_empty() {
                    self.selected = (self.selected + 1) % self.cards.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.cards.is_empty() {
                    self.selected = self
                        .selected
                        .checked_sub(1)
                        .unwrap_or(self.cards.len() - 1);
                }
            }

            KeyCode::Char('f') => self.toggle_favorite(),
            KeyCode::Char('F') => {
                self.filter.favorites_only = !self.filter.favorites_only;
                self.rebuild_dataset();
                let msg = if self.filter.favorites_only { "Showing favourites" } else { "Showing all characters" };
                self.set_status(msg);
            }
            KeyCode::Char('v') => {
                self.filter.vocation = self.filter.vocation.next();
                self.rebuild_dataset();
                self.set_status(self.filter.vocation.label());
            }

            KeyCode::Char('d') => {
                self.rebuild_favorite_cards();
                self.popup = Popup::Drawer;
            }

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn handle_drawer_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('d') | KeyCode::Char('q') => self.popup = Popup::None,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.favorite_cards.is_empty() {
                    self.drawer_selected = (self.drawer_selected + 1) % self.favorite_cards.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.favorite_cards.is_empty() {
                    self.drawer_selected = self
                        .drawer_selected
                        .checked_sub(1)
                        .unwrap_or(self.favorite_cards.len() - 1);
                }
            }
            // Remove from favourites without leaving the drawer
            KeyCode::Char('f') | KeyCode::Delete | KeyCode::Backspace => {
                if let Some(card) = self.favorite_cards.get(self.drawer_selected) {
                    let id = card.id;
                    let name = card.nickname.clone();
                    self.favorites.remove(&id);
                    self.set_status(format!("Removed {} from favourites", name));
                    self.after_favorites_changed();
                    self.rebuild_favorite_cards();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn toggle_favorite(&mut self) {
        let Some(card) = self.cards.get(self.selected) else {
            return;
        };
        let (id, name) = (card.id, card.nickname.clone());

        if self.favorites.remove(&id) {
            self.set_status(format!("Removed {} from favourites", name));
        } else {
            self.favorites.insert(id);
            self.set_status(format!("Added {} to favourites", name));
        }

        let selected = self.selected;
        self.after_favorites_changed();
        if !self.filter.favorites_only {
            self.selected = selected.min(self.cards.len().saturating_sub(1));
        }
    }

    /// Favourites-only view swaps datasets; otherwise just refresh the stars
    fn after_favorites_changed(&mut self) {
        if self.filter.favorites_only {
            self.rebuild_dataset();
        } else {
            for card in &mut self.cards {
                card.favorite = self.favorites.contains(&card.id);
            }
        }
    }

    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Snapshot;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// `count` knights on server 1, the first `druids` of them druids instead
    fn app_with(count: usize, druids: usize, per_page: usize) -> App {
        let characters = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":{},"nickname":"Char {}","outfitId":"128_0","currentBid":100,"auctionEnd":0,
                        "level":100,"vocationId":{},"serverId":1,"skills":{{"magic":{{"level":5}},"sword":{{"level":{}}}}}}}"#,
                    i,
                    i,
                    if i < druids { 4 } else { 1 },
                    i
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        let json = format!(
            r#"{{"servers":[{{"serverId":1,"serverName":"Antica","serverLocation":{{"type":0,"string":"Europe"}},"pvpType":{{"type":1,"string":"Open PvP"}}}}],"characters":[{}]}}"#,
            characters
        );
        let (characters, servers) = Snapshot::from_json(&json).unwrap().into_parts();
        App::new(characters, servers, per_page)
    }

    #[test]
    fn test_first_page_cards() {
        let app = app_with(101, 0, 25);
        assert_eq!(app.paginator().page_count(), 5);
        assert_eq!(app.cards.len(), 25);
        assert_eq!(app.paginator().tracker_text(), "1 - 25 of 101");
    }

    #[test]
    fn test_arrow_keys_page() {
        let mut app = app_with(101, 0, 25);

        app.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(app.paginator().index(), 0);

        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.paginator().index(), 1);
        assert_eq!(app.cards[0].nickname, "Char 25");

        app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(app.paginator().index(), 4);
        assert_eq!(app.cards.len(), 1);
        assert_eq!(app.paginator().visible_range(), Some((101, 101)));
    }

    #[test]
    fn test_go_to_page_rebuilds_cards() {
        let mut app = app_with(30, 0, 10);
        assert_eq!(app.go_to_page(2), Some(2));
        assert_eq!(app.cards[0].nickname, "Char 20");

        app.selected = 3;
        assert_eq!(app.go_to_page(7), None);
        assert_eq!(app.paginator().index(), 2);
        assert_eq!(app.cards[0].nickname, "Char 20");
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn test_paging_keys() {
        let mut app = app_with(30, 0, 10);

        // Boundaries are no-ops
        app.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(app.paginator().index(), 0);
        app.handle_key(key(KeyCode::PageUp)).unwrap();
        assert_eq!(app.paginator().index(), 0);

        app.handle_key(key(KeyCode::PageDown)).unwrap();
        assert_eq!(app.paginator().index(), 1);
        assert_eq!(app.cards[0].nickname, "Char 10");

        app.handle_key(key(KeyCode::Char('G'))).unwrap();
        assert_eq!(app.paginator().index(), 2);
        assert_eq!(app.cards[0].nickname, "Char 20");
        app.handle_key(key(KeyCode::PageDown)).unwrap();
        assert_eq!(app.paginator().index(), 2);

        app.handle_key(key(KeyCode::PageUp)).unwrap();
        assert_eq!(app.paginator().index(), 1);
        app.handle_key(key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.paginator().index(), 0);
        assert_eq!(app.cards[0].nickname, "Char 0");

        app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(app.paginator().index(), 2);
        app.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(app.paginator().index(), 0);
    }

    #[test]
    fn test_status_message_expires() {
        let mut app = app_with(3, 0, 10);
        app.set_status("hello");
        app.tick();
        assert_eq!(app.status_message.as_deref(), Some("hello"));

        app.status_message_time = Instant::now().checked_sub(STATUS_TIMEOUT);
        app.tick();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut app = app_with(60, 12, 10);
        app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(app.paginator().index(), 5);

        // All -> Knights
        app.handle_key(key(KeyCode::Char('v'))).unwrap();
        assert_eq!(app.paginator().index(), 0);
        assert_eq!(app.dataset_len(), 48);

        // Knights -> Paladins: nothing left, nothing navigable
        app.handle_key(key(KeyCode::Char('v'))).unwrap();
        assert_eq!(app.dataset_len(), 0);
        assert!(app.cards.is_empty());
        assert!(app.paginator().controls().iter().all(|c| !c.enabled));
    }

    #[test]
    fn test_favorites_only() {
        let mut app = app_with(30, 0, 10);
        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.favorites.len(), 2);
        assert!(app.cards[0].favorite);

        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Char('F'))).unwrap();
        assert_eq!(app.paginator().index(), 0);
        assert_eq!(app.dataset_len(), 2);
        assert_eq!(app.cards.len(), 2);
    }

    #[test]
    fn test_drawer_lists_favorites() {
        let mut app = app_with(5, 0, 10);
        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        app.handle_key(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.popup, Popup::Drawer);
        assert_eq!(app.favorite_cards.len(), 1);

        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.paginator().index(), 0);

        app.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert!(app.favorites.is_empty());
        assert!(app.favorite_cards.is_empty());
        assert!(!app.cards[0].favorite);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_highlight_follows_dominant_skill() {
        let app = app_with(10, 0, 10);
        // Char 0 has sword 0 < magic 5
        assert_eq!(app.cards[0].highlighted_skill().unwrap().name, "magic");
        assert_eq!(app.cards[9].highlighted_skill().unwrap().name, "sword");
    }
}
