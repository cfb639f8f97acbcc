use std::collections::BTreeSet;
use std::io;

/// A persisted set of favourite team ids.
pub trait FavouritesStore {
    fn all(&self) -> BTreeSet<u32>;

    fn contains(&self, team_id: u32) -> bool;

    /// Returns whether the set changed.
    fn add(&mut self, team_id: u32) -> io::Result<bool>;

    /// Returns whether the set changed.
    fn remove(&mut self, team_id: u32) -> io::Result<bool>;

    /// Add the team if absent, remove it otherwise. Returns the new membership.
    fn toggle(&mut self, team_id: u32) -> io::Result<bool> {
        if self.contains(team_id) {
            self.remove(team_id)?;
            Ok(false)
        } else {
            self.add(team_id)?;
            Ok(true)
        }
    }
}

/// Favourites that live only as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFavourites {
    ids: BTreeSet<u32>,
}

impl From<BTreeSet<u32>> for MemoryFavourites {
    fn from(ids: BTreeSet<u32>) -> Self {
        Self { ids }
    }
}

impl FavouritesStore for MemoryFavourites {
    fn all(&self) -> BTreeSet<u32> {
        self.ids.clone()
    }

    fn contains(&self, team_id: u32) -> bool {
        self.ids.contains(&team_id)
    }

    fn add(&mut self, team_id: u32) -> io::Result<bool> {
        Ok(self.ids.insert(team_id))
    }

    fn remove(&mut self, team_id: u32) -> io::Result<bool> {
        Ok(self.ids.remove(&team_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_twice_keeps_one_entry() {
        let mut favs = MemoryFavourites::default();
        assert!(favs.add(247).unwrap());
        assert!(!favs.add(247).unwrap());
        assert_eq!(favs.all().len(), 1);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut favs = MemoryFavourites::default();
        assert!(favs.toggle(257).unwrap());
        assert!(favs.contains(257));
        assert!(!favs.toggle(257).unwrap());
        assert!(!favs.contains(257));
        assert!(!favs.remove(257).unwrap());
    }
}
