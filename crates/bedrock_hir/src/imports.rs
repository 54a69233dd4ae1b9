//! Import graph: which files import which, with DFS-based cycle detection
//! performed as each file's imports are explored.

use bedrock_base::FileId;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ImportGraph {
    importees: Vec<(FileId, Vec<FileId>)>,
    importers: Vec<(FileId, Vec<FileId>)>,
}

impl ImportGraph {
    pub fn new() -> Self {
        ImportGraph::default()
    }

    fn entry<'a>(list: &'a mut Vec<(FileId, Vec<FileId>)>, file: FileId) -> &'a mut Vec<FileId> {
        if let Some(pos) = list.iter().position(|(f, _)| *f == file) {
            &mut list[pos].1
        } else {
            list.push((file, Vec::new()));
            &mut list.last_mut().unwrap().1
        }
    }

    pub fn add_edge(&mut self, importer: FileId, importee: FileId) {
        Self::entry(&mut self.importees, importer).push(importee);
        Self::entry(&mut self.importers, importee).push(importer);
    }

    pub fn importees_of(&self, file: FileId) -> &[FileId] {
        self.importees
            .iter()
            .find(|(f, _)| *f == file)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn importers_of(&self, file: FileId) -> &[FileId] {
        self.importers
            .iter()
            .find(|(f, _)| *f == file)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Tracks the DFS "in progress" stack used while exploring imports, so a
/// file re-reached while its own import chain is still being walked is
/// reported as a cycle rather than re-explored.
#[derive(Debug, Default)]
pub struct ImportFrontier {
    in_progress: Vec<FileId>,
    visited: HashSet<FileId>,
}

impl ImportFrontier {
    pub fn new() -> Self {
        ImportFrontier::default()
    }

    /// Returns `true` if `file` is already on the current DFS path, i.e.
    /// entering it now would close a cycle.
    pub fn would_cycle(&self, file: FileId) -> bool {
        self.in_progress.contains(&file)
    }

    pub fn already_visited(&self, file: FileId) -> bool {
        self.visited.contains(&file)
    }

    pub fn enter(&mut self, file: FileId) {
        self.in_progress.push(file);
    }

    pub fn leave(&mut self, file: FileId) {
        self.in_progress.pop();
        self.visited.insert(file);
    }

    /// The current DFS path, root-first, for rendering a cycle diagnostic.
    pub fn path(&self) -> &[FileId] {
        &self.in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_is_queryable_from_both_directions() {
        let mut graph = ImportGraph::new();
        graph.add_edge(FileId(1), FileId(2));
        assert_eq!(graph.importees_of(FileId(1)), &[FileId(2)]);
        assert_eq!(graph.importers_of(FileId(2)), &[FileId(1)]);
    }

    #[test]
    fn frontier_detects_reentry_of_in_progress_file() {
        let mut frontier = ImportFrontier::new();
        frontier.enter(FileId(1));
        frontier.enter(FileId(2));
        assert!(frontier.would_cycle(FileId(1)));
        assert!(!frontier.would_cycle(FileId(3)));
    }

    #[test]
    fn leaving_moves_file_from_in_progress_to_visited() {
        let mut frontier = ImportFrontier::new();
        frontier.enter(FileId(1));
        frontier.leave(FileId(1));
        assert!(!frontier.would_cycle(FileId(1)));
        assert!(frontier.already_visited(FileId(1)));
    }
}
