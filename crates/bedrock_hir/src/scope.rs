//! Named and anonymous scopes: `Symbol -> DefId` maps across four
//! independent namespaces (types don't shadow variables, functions don't
//! shadow modules), walked upward through parents on lookup miss.

use crate::def::{Def, DefPayload};
use crate::id::{DefId, ScopeAnonId, ScopeId};
use bedrock_base::Symbol;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    Ok,
    InvalidScopeSearched,
    Collision,
    NotFound,
}

#[derive(Debug, Clone, Copy)]
pub struct LookupResult {
    pub def: Option<DefId>,
    pub status: LookupStatus,
}

impl LookupResult {
    fn found(def: DefId) -> Self {
        LookupResult { def: Some(def), status: LookupStatus::Ok }
    }

    fn not_found() -> Self {
        LookupResult { def: None, status: LookupStatus::NotFound }
    }

    fn invalid() -> Self {
        LookupResult { def: None, status: LookupStatus::InvalidScopeSearched }
    }
}

/// The four independent name namespaces every scope tracks, mirroring how
/// the grammar keeps `mod`/`struct` names, variables, functions, and type
/// declarations from colliding with each other.
#[derive(Debug, Default)]
struct Namespaces {
    namespaces: HashMap<Symbol, DefId>,
    variables: HashMap<Symbol, DefId>,
    functions: HashMap<Symbol, DefId>,
    types: HashMap<Symbol, DefId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Namespaces,
    Variables,
    Functions,
    Types,
}

impl Namespaces {
    fn map(&self, ns: Namespace) -> &HashMap<Symbol, DefId> {
        match ns {
            Namespace::Namespaces => &self.namespaces,
            Namespace::Variables => &self.variables,
            Namespace::Functions => &self.functions,
            Namespace::Types => &self.types,
        }
    }

    fn map_mut(&mut self, ns: Namespace) -> &mut HashMap<Symbol, DefId> {
        match ns {
            Namespace::Namespaces => &mut self.namespaces,
            Namespace::Variables => &mut self.variables,
            Namespace::Functions => &mut self.functions,
            Namespace::Types => &mut self.types,
        }
    }
}

/// A named scope: a module, struct, or variant body. Its parent is always
/// another named scope (or none, for a file's root scope).
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    names: Namespaces,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope { parent, names: Namespaces::default() }
    }

    pub fn insert(&mut self, ns: Namespace, symbol: Symbol, def: DefId) -> Option<DefId> {
        self.names.map_mut(ns).insert(symbol, def)
    }

    pub fn get_local(&self, ns: Namespace, symbol: Symbol) -> Option<DefId> {
        self.names.map(ns).get(&symbol).copied()
    }
}

/// An anonymous scope: a function body or control-flow block. Its parent is
/// either another anonymous scope (nested blocks) or the named scope the
/// function/block lives directly inside.
#[derive(Debug)]
pub struct ScopeAnon {
    pub named_parent: Option<ScopeId>,
    pub anon_parent: Option<ScopeAnonId>,
    pub is_top_level: bool,
    names: Namespaces,
    used_defs: Vec<DefId>,
}

impl ScopeAnon {
    pub fn top_level() -> Self {
        ScopeAnon {
            named_parent: None,
            anon_parent: None,
            is_top_level: true,
            names: Namespaces::default(),
            used_defs: Vec::new(),
        }
    }

    pub fn with_named_parent(named_parent: ScopeId) -> Self {
        ScopeAnon {
            named_parent: Some(named_parent),
            anon_parent: None,
            is_top_level: false,
            names: Namespaces::default(),
            used_defs: Vec::new(),
        }
    }

    pub fn with_anon_parent(anon_parent: ScopeAnonId) -> Self {
        ScopeAnon {
            named_parent: None,
            anon_parent: Some(anon_parent),
            is_top_level: false,
            names: Namespaces::default(),
            used_defs: Vec::new(),
        }
    }

    pub fn insert(&mut self, ns: Namespace, symbol: Symbol, def: DefId) -> Option<DefId> {
        self.names.map_mut(ns).insert(symbol, def)
    }

    pub fn get_local(&self, ns: Namespace, symbol: Symbol) -> Option<DefId> {
        self.names.map(ns).get(&symbol).copied()
    }

    /// Not a top-level anonymous scope's used-module list is lazily
    /// populated; a top-level scope never accumulates one (there is no
    /// outer anonymous parent to import into).
    pub fn add_used_def(&mut self, def: DefId) {
        self.used_defs.push(def);
    }

    pub fn used_defs(&self) -> &[DefId] {
        &self.used_defs
    }
}

/// Looks up `symbol` in `ns` starting at `scope_id`, walking up through
/// `parent` links until found or the chain is exhausted.
pub fn look_up_named(scopes: &[Scope], scope_id: ScopeId, ns: Namespace, symbol: Symbol) -> LookupResult {
    let mut current = Some(scope_id);
    while let Some(id) = current {
        let idx = id.val() as usize;
        let Some(scope) = scopes.get(idx) else {
            return LookupResult::invalid();
        };
        if let Some(def) = scope.get_local(ns, symbol) {
            return LookupResult::found(def);
        }
        current = scope.parent;
    }
    LookupResult::not_found()
}

/// Looks up `symbol` in `ns` starting at an anonymous scope: walks anonymous
/// parents, alternating at most once into the named parent chain once one is
/// reached (exactly one of the two parent slots is ever populated at a given
/// step). A local hit anywhere on that walk wins outright. Only when the
/// whole chain misses does the *originating* scope's used-modules list get
/// consulted: each used module's own scope is searched, a single hit
/// succeeds, and two or more distinct hits report `Collision` instead of
/// silently picking one.
pub fn look_up_anon<'a>(
    scope_anons: &[ScopeAnon],
    scopes: &[Scope],
    defs: &[Def<'a>],
    scope_anon_id: ScopeAnonId,
    ns: Namespace,
    symbol: Symbol,
) -> LookupResult {
    let Some(origin) = scope_anons.get(scope_anon_id.val() as usize) else {
        return LookupResult::invalid();
    };

    let mut anon_current = Some(scope_anon_id);
    let mut named_current: Option<ScopeId> = None;
    loop {
        if let Some(id) = anon_current {
            let idx = id.val() as usize;
            let Some(anon) = scope_anons.get(idx) else {
                return LookupResult::invalid();
            };
            if let Some(def) = anon.get_local(ns, symbol) {
                return LookupResult::found(def);
            }
            anon_current = anon.anon_parent;
            named_current = anon.named_parent;
        } else if let Some(id) = named_current {
            let idx = id.val() as usize;
            let Some(scope) = scopes.get(idx) else {
                return LookupResult::invalid();
            };
            if let Some(def) = scope.get_local(ns, symbol) {
                return LookupResult::found(def);
            }
            named_current = scope.parent;
            anon_current = None;
        } else {
            break;
        }
    }

    let mut hit: Option<DefId> = None;
    let mut collision = false;
    for &used in origin.used_defs() {
        let Some(used_def) = defs.get(used.val() as usize) else { continue };
        let DefPayload::Module { scope: module_scope } = used_def.payload else { continue };
        let res = look_up_named(scopes, module_scope, ns, symbol);
        if res.status == LookupStatus::Ok {
            if hit.is_some() {
                collision = true;
            }
            hit = res.def;
        }
    }

    if collision {
        LookupResult { def: None, status: LookupStatus::Collision }
    } else if let Some(def) = hit {
        LookupResult::found(def)
    } else {
        LookupResult::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_base::Interner;

    fn def(n: u32) -> DefId {
        DefId::new(n)
    }

    #[test]
    fn local_lookup_finds_inserted_name() {
        let mut interner = Interner::new();
        let foo = interner.intern("foo");
        let mut scopes = vec![Scope::new(None)];
        scopes[0].insert(Namespace::Variables, foo, def(1));
        let result = look_up_named(&scopes, ScopeId::new(0), Namespace::Variables, foo);
        assert_eq!(result.status, LookupStatus::Ok);
        assert_eq!(result.def, Some(def(1)));
    }

    #[test]
    fn lookup_walks_up_to_parent_scope() {
        let mut interner = Interner::new();
        let foo = interner.intern("foo");
        let mut scopes = vec![Scope::new(None), Scope::new(Some(ScopeId::new(0)))];
        scopes[0].insert(Namespace::Functions, foo, def(9));
        let result = look_up_named(&scopes, ScopeId::new(1), Namespace::Functions, foo);
        assert_eq!(result.def, Some(def(9)));
    }

    #[test]
    fn lookup_across_namespaces_does_not_collide() {
        let mut interner = Interner::new();
        let foo = interner.intern("foo");
        let mut scopes = vec![Scope::new(None)];
        scopes[0].insert(Namespace::Variables, foo, def(1));
        let result = look_up_named(&scopes, ScopeId::new(0), Namespace::Functions, foo);
        assert_eq!(result.status, LookupStatus::NotFound);
    }

    #[test]
    fn anon_scope_falls_through_to_named_parent() {
        let mut interner = Interner::new();
        let foo = interner.intern("foo");
        let mut scopes = vec![Scope::new(None)];
        scopes[0].insert(Namespace::Variables, foo, def(4));
        let scope_anons = vec![ScopeAnon::with_named_parent(ScopeId::new(0))];
        let defs: Vec<Def> = Vec::new();
        let result = look_up_anon(
            &scope_anons,
            &scopes,
            &defs,
            ScopeAnonId::new(0),
            Namespace::Variables,
            foo,
        );
        assert_eq!(result.def, Some(def(4)));
    }

    #[test]
    fn used_module_hit_succeeds_when_only_one_matches() {
        let mut interner = Interner::new();
        let shared = interner.intern("shared");
        let module_scope_id = ScopeId::new(1);
        let mut scopes = vec![Scope::new(None), Scope::new(None)];
        scopes[1].insert(Namespace::Functions, shared, def(7));
        let mut scope_anons = vec![ScopeAnon::top_level()];
        scope_anons[0].add_used_def(def(0));
        let defs = vec![Def::new(
            shared,
            bedrock_base::FileId(1),
            bedrock_base::Span::new(0, 0),
            bedrock_ast::Visibility::Public,
            ScopeId::new(0),
            DefPayload::Module { scope: module_scope_id },
        )];
        let result =
            look_up_anon(&scope_anons, &scopes, &defs, ScopeAnonId::new(0), Namespace::Functions, shared);
        assert_eq!(result.status, LookupStatus::Ok);
        assert_eq!(result.def, Some(def(7)));
    }

    #[test]
    fn two_used_modules_defining_the_same_name_collide() {
        let mut interner = Interner::new();
        let shared = interner.intern("shared");
        let mut scopes = vec![Scope::new(None), Scope::new(None), Scope::new(None)];
        scopes[1].insert(Namespace::Functions, shared, def(7));
        scopes[2].insert(Namespace::Functions, shared, def(8));
        let mut scope_anons = vec![ScopeAnon::top_level()];
        scope_anons[0].add_used_def(def(0));
        scope_anons[0].add_used_def(def(1));
        let defs = vec![
            Def::new(
                shared,
                bedrock_base::FileId(1),
                bedrock_base::Span::new(0, 0),
                bedrock_ast::Visibility::Public,
                ScopeId::new(0),
                DefPayload::Module { scope: ScopeId::new(1) },
            ),
            Def::new(
                shared,
                bedrock_base::FileId(1),
                bedrock_base::Span::new(0, 0),
                bedrock_ast::Visibility::Public,
                ScopeId::new(0),
                DefPayload::Module { scope: ScopeId::new(2) },
            ),
        ];
        let result =
            look_up_anon(&scope_anons, &scopes, &defs, ScopeAnonId::new(0), Namespace::Functions, shared);
        assert_eq!(result.status, LookupStatus::Collision);
        assert_eq!(result.def, None);
    }

    #[test]
    fn invalid_scope_id_is_reported_distinctly_from_not_found() {
        let scopes: Vec<Scope> = Vec::new();
        let mut interner = Interner::new();
        let foo = interner.intern("foo");
        let result = look_up_named(&scopes, ScopeId::new(0), Namespace::Variables, foo);
        assert_eq!(result.status, LookupStatus::InvalidScopeSearched);
    }
}
