use log::{debug, warn};
use stands_api::favourites::FavouritesStore;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// Favourites persisted as a JSON list of team ids. Every change rewrites the file.
#[derive(Debug)]
pub struct FileFavourites {
    path: PathBuf,
    ids: BTreeSet<u32>,
}

impl FileFavourites {
    /// A missing file is an empty set; an unreadable one is logged and ignored.
    pub fn load(path: PathBuf) -> Self {
        let ids = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<u32>>(&content) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!("ignoring corrupt favourites file {}: {e}", path.display());
                    BTreeSet::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                warn!("could not read favourites file {}: {e}", path.display());
                BTreeSet::new()
            }
        };
        debug!("{} favourite(s) loaded from {}", ids.len(), path.display());
        Self { path, ids }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string(&self.ids).map_err(io::Error::other)?;
        std::fs::write(&self.path, payload)
    }
}

impl FavouritesStore for FileFavourites {
    fn all(&self) -> BTreeSet<u32> {
        self.ids.clone()
    }

    fn contains(&self, team_id: u32) -> bool {
        self.ids.contains(&team_id)
    }

    fn add(&mut self, team_id: u32) -> io::Result<bool> {
        if !self.ids.insert(team_id) {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            self.ids.remove(&team_id);
            return Err(e);
        }
        Ok(true)
    }

    fn remove(&mut self, team_id: u32) -> io::Result<bool> {
        if !self.ids.remove(&team_id) {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            self.ids.insert(team_id);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stands-test-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("nested").join("favourites.json")
    }

    #[test]
    fn missing_file_is_empty() {
        let favs = FileFavourites::load(scratch_path("missing"));
        assert!(favs.all().is_empty());
    }

    #[test]
    fn changes_are_written_as_sorted_json_list() {
        let path = scratch_path("write");
        let mut favs = FileFavourites::load(path.clone());
        assert!(favs.add(257).unwrap());
        assert!(favs.add(247).unwrap());
        assert!(!favs.add(247).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[247,257]");

        assert!(favs.toggle(257).is_ok());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[247]");

        let reloaded = FileFavourites::load(path);
        assert!(reloaded.contains(247));
        assert!(!reloaded.contains(257));
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let path = scratch_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        let favs = FileFavourites::load(path);
        assert!(favs.all().is_empty());
    }

    #[test]
    fn duplicates_in_file_collapse() {
        let path = scratch_path("dupes");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[3, 1, 3]").unwrap();
        let favs = FileFavourites::load(path);
        assert_eq!(favs.all().into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }
}
