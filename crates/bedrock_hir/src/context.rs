//! The compilation orchestrator: loads files, drives lex + parse, explores
//! imports, and registers top-level definitions into scopes.

use crate::def::{classify, Def, DefPayload};
use crate::id::{DefId, ScopeAnonId, ScopeId};
use crate::imports::{ImportFrontier, ImportGraph};
use crate::scope::{self, Namespace, Scope, ScopeAnon};
use bedrock_ast::{AstContext, Stmt};
use bedrock_base::{FileId, Interner, SourceSet, Symbol};
use bedrock_token::{Diagnostic, DiagnosticCode, DiagnosticList, Token};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum HirError {
    #[error("could not read {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, HirError>;

struct FileEntry<'a> {
    id: FileId,
    root: &'a Stmt<'a>,
    scope: ScopeId,
    scope_anon: ScopeAnonId,
    dir: PathBuf,
}

/// Owns every piece of compiler state that outlives a single file: the
/// interner, loaded source bytes, scope/def tables, the import graph, and
/// accumulated diagnostics. Borrows the AST arenas so every file parsed in
/// one compilation shares one set of arenas.
pub struct Context<'a> {
    pub interner: Interner,
    pub sources: SourceSet,
    ast: &'a AstContext<'a>,
    files: Vec<FileEntry<'a>>,
    scopes: Vec<Scope>,
    scope_anons: Vec<ScopeAnon>,
    defs: Vec<Def<'a>>,
    pub diagnostics: DiagnosticList,
    pub import_search_paths: Vec<PathBuf>,
    graph: ImportGraph,
    path_to_file: Vec<(PathBuf, FileId)>,
}

impl<'a> Context<'a> {
    pub fn new(ast: &'a AstContext<'a>) -> Self {
        Context {
            interner: Interner::new(),
            sources: SourceSet::new(),
            ast,
            files: Vec::new(),
            scopes: Vec::new(),
            scope_anons: Vec::new(),
            defs: Vec::new(),
            diagnostics: DiagnosticList::new(),
            import_search_paths: Vec::new(),
            graph: ImportGraph::new(),
            path_to_file: Vec::new(),
        }
    }

    pub fn def(&self, id: DefId) -> Def<'a> {
        self.defs[id.val() as usize]
    }

    pub fn defs(&self) -> &[Def<'a>] {
        &self.defs
    }

    /// Dead-definition tracking: set once a lookup resolves to `id`. No pass
    /// in this crate calls this yet (there is no name resolver here), but
    /// the bit is threaded through so a future pass or a reporting tool can
    /// query it without a schema change.
    pub fn mark_used(&mut self, id: DefId) {
        self.defs[id.val() as usize].used = true;
    }

    pub fn is_used(&self, id: DefId) -> bool {
        self.defs[id.val() as usize].used
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.val() as usize]
    }

    pub fn scope_anon(&self, id: ScopeAnonId) -> &ScopeAnon {
        &self.scope_anons[id.val() as usize]
    }

    /// Resolves a name from an anonymous scope, falling back to its
    /// used-modules list once the lexical parent chain is exhausted.
    pub fn look_up_anon(&self, id: ScopeAnonId, ns: Namespace, symbol: Symbol) -> scope::LookupResult {
        scope::look_up_anon(&self.scope_anons, &self.scopes, &self.defs, id, ns, symbol)
    }

    pub fn graph(&self) -> &ImportGraph {
        &self.graph
    }

    fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope::new(parent));
        ScopeId::new((self.scopes.len() - 1) as u32)
    }

    fn push_scope_anon_top_level(&mut self) -> ScopeAnonId {
        self.scope_anons.push(ScopeAnon::top_level());
        ScopeAnonId::new((self.scope_anons.len() - 1) as u32)
    }

    fn push_def(&mut self, def: Def<'a>) -> DefId {
        self.defs.push(def);
        DefId::new((self.defs.len() - 1) as u32)
    }

    /// Loads `path` as the compilation's root file: reads it, interns it
    /// into the source set, lexes, and parses it. Does not explore imports
    /// or register definitions; call [`Context::process`] for the full
    /// pipeline, or call [`explore_imports`]/[`register_top_level`]
    /// directly to drive the stages independently.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId> {
        let bytes = std::fs::read(path).map_err(|source| HirError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let path_str = path.to_string_lossy().into_owned();
        tracing::debug!(path = %path_str, bytes = bytes.len(), "loaded source file");
        let path_symbol = self.interner.intern(&path_str);
        let file_id = self.sources.add(path_symbol, bytes);
        self.path_to_file.push((path.to_path_buf(), file_id));

        let source = self.sources.get(file_id);
        let (root, diagnostics) =
            bedrock_parser::parse_file(&source.bytes.clone(), file_id, &path_str, &mut self.interner, self.ast);
        for d in diagnostics.iter() {
            self.diagnostics.push(d.clone());
        }

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let scope = self.push_scope(None);
        let scope_anon = self.push_scope_anon_top_level();
        self.files.push(FileEntry { id: file_id, root, scope, scope_anon, dir });
        Ok(file_id)
    }

    fn resolve_import_path(&self, dir: &Path, literal: &str) -> Option<PathBuf> {
        let candidate = dir.join(literal);
        if candidate.exists() {
            return Some(candidate);
        }
        for search in &self.import_search_paths {
            let candidate = search.join(literal);
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }

    fn file_root(&self, file_id: FileId) -> &'a Stmt<'a> {
        self.files.iter().find(|f| f.id == file_id).unwrap().root
    }

    fn file_dir(&self, file_id: FileId) -> PathBuf {
        self.files.iter().find(|f| f.id == file_id).unwrap().dir.clone()
    }

    /// Names every file from `reentered`'s first appearance on the DFS stack
    /// through the top, then `reentered` again, closing the loop: `a -> b ->
    /// a` rather than just "circular import".
    fn describe_cycle(&self, reentered: FileId, in_progress: &[FileId]) -> String {
        let start = in_progress.iter().position(|f| *f == reentered).unwrap_or(0);
        let mut names: Vec<&str> = in_progress[start..].iter().map(|f| self.path_of(*f)).collect();
        names.push(self.path_of(reentered));
        names.join(" -> ")
    }

    /// Recursively walks `file_id`'s `import` statements, loading and
    /// lexing/parsing each importee exactly once and recording an edge in
    /// the import graph. Detects cycles via the DFS in-progress stack and
    /// emits a diagnostic instead of recursing forever.
    pub fn explore_imports(&mut self, file_id: FileId) -> Result<()> {
        let mut frontier = ImportFrontier::new();
        self.explore_imports_inner(file_id, &mut frontier)
    }

    fn explore_imports_inner(&mut self, file_id: FileId, frontier: &mut ImportFrontier) -> Result<()> {
        if frontier.already_visited(file_id) {
            return Ok(());
        }
        if frontier.would_cycle(file_id) {
            let root = self.file_root(file_id);
            let detail = self.describe_cycle(file_id, frontier.path());
            self.diagnostics.push(
                Diagnostic::new(file_id, root.span(), DiagnosticCode::CircularImport)
                    .with_detail(detail),
            );
            return Ok(());
        }
        frontier.enter(file_id);

        let root = self.file_root(file_id);
        let dir = self.file_dir(file_id);
        let import_literals = collect_import_literals(root, &self.interner);

        for (literal, span) in import_literals {
            match self.resolve_import_path(&dir, &literal) {
                Some(resolved) => {
                    let canonical = resolved.canonicalize().unwrap_or(resolved);
                    let importee_id = if let Some((_, id)) =
                        self.path_to_file.iter().find(|(p, _)| *p == canonical)
                    {
                        *id
                    } else {
                        self.load_file(&canonical)?
                    };
                    self.graph.add_edge(file_id, importee_id);
                    self.explore_imports_inner(importee_id, frontier)?;
                }
                None => {
                    self.diagnostics
                        .push(Diagnostic::new(file_id, span, DiagnosticCode::ImportedFileDoesNotExist));
                }
            }
        }

        frontier.leave(file_id);
        Ok(())
    }

    /// Registers every top-level declaration in `file_id` into that file's
    /// root scope, reporting a `Redefinition` diagnostic (chained to a note
    /// at the original definition) on collision. Runs in two passes: every
    /// declaration first (so a `use` later in the file can still resolve a
    /// module declared after it), then every top-level `use` against the
    /// now-complete root scope.
    pub fn register_top_level(&mut self, file_id: FileId) {
        let entry_idx = self.files.iter().position(|f| f.id == file_id).unwrap();
        let scope = self.files[entry_idx].scope;
        let scope_anon = self.files[entry_idx].scope_anon;
        let root = self.files[entry_idx].root;
        let statements: &[Stmt] = match root {
            Stmt::File { statements, .. } => statements,
            _ => return,
        };
        for stmt in statements {
            self.register_one(file_id, scope, stmt);
        }
        for stmt in statements {
            if let Stmt::Use { path, .. } = stmt {
                self.register_use(file_id, scope, scope_anon, path);
            }
        }
    }

    fn register_one(&mut self, file_id: FileId, scope: ScopeId, stmt: &'a Stmt<'a>) {
        let (inner, visibility) = classify(stmt);
        let (ns, name, payload) = match inner {
            Stmt::Module { name, body, .. } => {
                let module_scope = self.push_scope(Some(scope));
                for child in *body {
                    self.register_one(file_id, module_scope, child);
                }
                (Namespace::Namespaces, *name, DefPayload::Module { scope: module_scope })
            }
            Stmt::FnDecl { name, .. } => (Namespace::Functions, *name, DefPayload::Function { stmt: inner }),
            Stmt::VarDecl { name, .. } => (Namespace::Variables, *name, DefPayload::Variable { stmt: inner }),
            Stmt::TypeDecl { kind, name, .. } => {
                (Namespace::Types, *name, DefPayload::TypeDecl { kind: *kind, stmt: inner })
            }
            _ => return,
        };
        self.insert_def(file_id, scope, ns, name.lexeme, name.span, visibility, payload);
    }

    /// Resolves a `use A..B..C;` path one segment at a time, starting in
    /// `scope`'s namespace map and then descending into each resolved
    /// module's own scope, and adds the final module as a used module of
    /// `scope_anon`. Reports `UnresolvedUsePath` and gives up on the first
    /// segment that isn't a module.
    fn register_use(&mut self, file_id: FileId, scope: ScopeId, scope_anon: ScopeAnonId, path: &[Token]) {
        let Some((first, rest)) = path.split_first() else { return };
        let mut current = match scope::look_up_named(&self.scopes, scope, Namespace::Namespaces, first.lexeme) {
            result if result.status == scope::LookupStatus::Ok => result.def.unwrap(),
            _ => {
                self.diagnostics
                    .push(Diagnostic::new(file_id, first.span, DiagnosticCode::UnresolvedUsePath));
                return;
            }
        };
        for segment in rest {
            let module_scope = match self.def(current).payload {
                DefPayload::Module { scope } => scope,
                _ => {
                    self.diagnostics
                        .push(Diagnostic::new(file_id, segment.span, DiagnosticCode::UnresolvedUsePath));
                    return;
                }
            };
            current = match scope::look_up_named(&self.scopes, module_scope, Namespace::Namespaces, segment.lexeme)
            {
                result if result.status == scope::LookupStatus::Ok => result.def.unwrap(),
                _ => {
                    self.diagnostics
                        .push(Diagnostic::new(file_id, segment.span, DiagnosticCode::UnresolvedUsePath));
                    return;
                }
            };
        }
        self.scope_anons[scope_anon.val() as usize].add_used_def(current);
    }

    fn insert_def(
        &mut self,
        file_id: FileId,
        scope: ScopeId,
        ns: Namespace,
        name: Symbol,
        span: bedrock_base::Span,
        visibility: bedrock_ast::Visibility,
        payload: DefPayload<'a>,
    ) {
        if let Some(existing) = self.scopes[scope.val() as usize].get_local(ns, name) {
            let parent = self
                .diagnostics
                .push(Diagnostic::new(file_id, span, DiagnosticCode::Redefinition));
            let existing_def = self.def(existing);
            self.diagnostics.push_note(
                parent,
                Diagnostic::new(existing_def.file, existing_def.span, DiagnosticCode::OriginalDefinitionHere),
            );
            return;
        }
        let def = Def::new(name, file_id, span, visibility, scope, payload);
        let def_id = self.push_def(def);
        self.scopes[scope.val() as usize].insert(ns, name, def_id);
    }

    pub fn root_scope_of(&self, file_id: FileId) -> Option<ScopeId> {
        self.files.iter().find(|f| f.id == file_id).map(|f| f.scope)
    }

    /// The top-level anonymous scope created alongside `file_id`'s named
    /// root scope, whose used-modules list a top-level `use` registers into.
    pub fn root_scope_anon_of(&self, file_id: FileId) -> Option<ScopeAnonId> {
        self.files.iter().find(|f| f.id == file_id).map(|f| f.scope_anon)
    }

    pub fn root_stmt_of(&self, file_id: FileId) -> Option<&'a Stmt<'a>> {
        self.files.iter().find(|f| f.id == file_id).map(|f| f.root)
    }

    /// Every loaded file, in the order it was first registered (`load_file`
    /// order, which for `--list-files` is discovery order, not sorted).
    pub fn file_ids(&self) -> Vec<FileId> {
        self.files.iter().map(|f| f.id).collect()
    }

    pub fn path_of(&self, file_id: FileId) -> &str {
        self.interner.resolve(self.sources.get(file_id).path)
    }

    /// Runs the whole pipeline for `path`: load, explore imports, register
    /// top-level definitions for every file reached transitively.
    pub fn process(&mut self, path: &Path) -> Result<FileId> {
        let root_id = self.load_file(path)?;
        self.explore_imports(root_id)?;
        let all_files: Vec<FileId> = self.files.iter().map(|f| f.id).collect();
        for file in all_files {
            self.register_top_level(file);
        }
        Ok(root_id)
    }
}

fn collect_import_literals<'a>(
    root: &'a Stmt<'a>,
    interner: &Interner,
) -> Vec<(String, bedrock_base::Span)> {
    let statements: &[Stmt] = match root {
        Stmt::File { statements, .. } => statements,
        _ => return Vec::new(),
    };
    let mut out = Vec::new();
    for stmt in statements {
        if let Stmt::Import { path, .. } = stmt {
            let raw = interner.resolve(path.lexeme);
            let trimmed = raw.trim_matches('"');
            out.push((trimmed.to_string(), path.span));
        }
    }
    out
}

