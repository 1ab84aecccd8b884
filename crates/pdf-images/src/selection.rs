//! Ordered set of files picked for a build

use crate::decode::SelectedFile;

/// Identity of a file within a `Selection`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub u64);

/// Immutable, ordered list of selected files.
///
/// Adding and removing return a new selection; ids are never reused
/// within one lineage of selections.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: Vec<(FileId, SelectedFile)>,
    next_id: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files, returning the new selection and the ids they were given
    pub fn with_files(
        &self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> (Selection, Vec<FileId>) {
        let mut next = self.clone();
        let mut ids = Vec::new();

        for file in files {
            let id = FileId(next.next_id);
            next.next_id += 1;
            next.entries.push((id, file));
            ids.push(id);
        }

        (next, ids)
    }

    /// Selection without the file `id`. Unknown ids leave it unchanged.
    pub fn without(&self, id: FileId) -> Selection {
        let mut next = self.clone();
        next.entries.retain(|(entry_id, _)| *entry_id != id);
        next
    }

    /// Empty selection that keeps allocating ids after the ones already handed out
    pub fn cleared(&self) -> Selection {
        Selection {
            entries: Vec::new(),
            next_id: self.next_id,
        }
    }

    pub fn entries(&self) -> &[(FileId, SelectedFile)] {
        &self.entries
    }

    /// Files in selection order, ready for `build`
    pub fn files(&self) -> Vec<SelectedFile> {
        self.entries.iter().map(|(_, file)| file.clone()).collect()
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
