//! Vocation ids as they appear in auction listings

/// Characters below this level are listed with their base vocation
pub const PROMOTION_LEVEL: u32 = 20;

/// Display name for a vocation id at the given level
pub fn vocation_name(vocation_id: u8, level: u32) -> &'static str {
    let promoted = level >= PROMOTION_LEVEL;
    match (vocation_id, promoted) {
        (0, _) => "None",
        (1, true) => "Elite Knight",
        (2, true) => "Royal Paladin",
        (3, true) => "Master Sorcerer",
        (4, true) => "Elder Druid",
        (1, false) => "Knight",
        (2, false) => "Paladin",
        (3, false) => "Sorcerer",
        (4, false) => "Druid",
        _ => "Unknown",
    }
}

/// Vocation filter applied to the character list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VocationFilter {
    #[default]
    All,
    Knight,
    Paladin,
    Sorcerer,
    Druid,
    NoVocation,
}

impl VocationFilter {
    pub fn next(self) -> Self {
        match self {
            VocationFilter::All => VocationFilter::Knight,
            VocationFilter::Knight => VocationFilter::Paladin,
            VocationFilter::Paladin => VocationFilter::Sorcerer,
            VocationFilter::Sorcerer => VocationFilter::Druid,
            VocationFilter::Druid => VocationFilter::NoVocation,
            VocationFilter::NoVocation => VocationFilter::All,
        }
    }

    pub fn matches(self, vocation_id: u8) -> bool {
        match self {
            VocationFilter::All => true,
            VocationFilter::Knight => vocation_id == 1,
            VocationFilter::Paladin => vocation_id == 2,
            VocationFilter::Sorcerer => vocation_id == 3,
            VocationFilter::Druid => vocation_id == 4,
            VocationFilter::NoVocation => vocation_id == 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VocationFilter::All => "All vocations",
            VocationFilter::Knight => "Knights",
            VocationFilter::Paladin => "Paladins",
            VocationFilter::Sorcerer => "Sorcerers",
            VocationFilter::Druid => "Druids",
            VocationFilter::NoVocation => "No vocation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promoted_names() {
        assert_eq!(vocation_name(1, 20), "Elite Knight");
        assert_eq!(vocation_name(2, 100), "Royal Paladin");
        assert_eq!(vocation_name(3, 500), "Master Sorcerer");
        assert_eq!(vocation_name(4, 20), "Elder Druid");
        assert_eq!(vocation_name(0, 300), "None");
    }

    #[test]
    fn test_low_level_names() {
        assert_eq!(vocation_name(1, 19), "Knight");
        assert_eq!(vocation_name(2, 8), "Paladin");
        assert_eq!(vocation_name(3, 1), "Sorcerer");
        assert_eq!(vocation_name(4, 15), "Druid");
        assert_eq!(vocation_name(0, 5), "None");
    }

    #[test]
    fn test_unknown_vocation() {
        assert_eq!(vocation_name(9, 50), "Unknown");
    }

    #[test]
    fn test_filter_cycle() {
        let mut filter = VocationFilter::default();
        let mut seen = vec![filter];
        for _ in 0..5 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(filter.next(), VocationFilter::All);
        assert_eq!(seen.len(), 6);

        assert!(VocationFilter::All.matches(3));
        assert!(VocationFilter::Druid.matches(4));
        assert!(!VocationFilter::Druid.matches(3));
        assert!(VocationFilter::NoVocation.matches(0));
    }
}
