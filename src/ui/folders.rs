// SPDX-License-Identifier: MPL-2.0
//! Folder sidebar model.

/// Folder list as returned by the server, plus the highlighted folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderList {
    folders: Option<Vec<String>>,
    active: Option<String>,
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderItem<'a> {
    pub name: &'a str,
    pub active: bool,
}

impl FolderList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list, keeping server order.
    pub fn set_folders(&mut self, folders: Vec<String>) {
        self.folders = Some(folders);
    }

    pub fn set_active(&mut self, folder: Option<&str>) {
        self.active = folder.map(str::to_string);
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a listing has been received at all.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.folders.is_some()
    }

    /// Loaded but empty: the sidebar shows its "no folders" state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.as_ref().is_some_and(Vec::is_empty)
    }

    pub fn items(&self) -> impl Iterator<Item = FolderItem<'_>> {
        let active = self.active.as_deref();
        self.folders
            .iter()
            .flatten()
            .map(move |name| FolderItem {
                name,
                active: Some(name.as_str()) == active,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_server_order_and_marks_active() {
        let mut list = FolderList::new();
        list.set_folders(vec!["Zed".into(), "Alice".into()]);
        list.set_active(Some("Alice"));

        let items: Vec<_> = list.items().collect();
        assert_eq!(
            items,
            vec![
                FolderItem {
                    name: "Zed",
                    active: false
                },
                FolderItem {
                    name: "Alice",
                    active: true
                },
            ]
        );
    }

    #[test]
    fn empty_and_unloaded_are_distinct() {
        let mut list = FolderList::new();
        assert!(!list.is_loaded());
        assert!(!list.is_empty());

        list.set_folders(Vec::new());
        assert!(list.is_loaded());
        assert!(list.is_empty());
    }
}
