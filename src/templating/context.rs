//! Render contexts: one per include frame.
//!
//! A [`RenderContext`] bundles the identity of the document being rendered,
//! the positional arguments it was included with, its own variable bindings,
//! a back-reference to the context that included it and a sticky error slot.
//!
//! Contexts form a tree rooted at the top-level render. Each node is owned by
//! the call frame that created it; a child only holds a [`Weak`] link to its
//! parent, so nothing in the tree keeps an ancestor alive. Variable lookup
//! walks those links, which gives dynamic (call-chain) scoping: a document
//! sees what its includers defined, never what its siblings defined.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

use strsim::levenshtein;
use tera::Value;

use super::error::ComposeError;
use super::path;

/// Maximum Levenshtein distance, as a percentage of the name length, for
/// "did you mean" suggestions on undefined variables.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// The state of one include frame.
#[derive(Debug)]
pub struct RenderContext {
    document: String,
    parent: Option<Weak<RenderContext>>,
    depth: usize,
    args: Vec<Value>,
    bindings: Mutex<HashMap<String, Value>>,
    error: OnceLock<ComposeError>,
}

impl RenderContext {
    /// Creates the root context for a top-level render of `document`.
    pub fn root(document: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            document: document.into(),
            parent: None,
            depth: 0,
            args: Vec::new(),
            bindings: Mutex::new(HashMap::new()),
            error: OnceLock::new(),
        })
    }

    /// Creates a child context for an include of `document` with `args`.
    ///
    /// The child starts with no bindings and no error, and receives only the
    /// arguments given here; the parent's arguments are not inherited.
    pub fn child(self: &Arc<Self>, document: impl Into<String>, args: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            document: document.into(),
            parent: Some(Arc::downgrade(self)),
            depth: self.depth + 1,
            args,
            bindings: Mutex::new(HashMap::new()),
            error: OnceLock::new(),
        })
    }

    /// The document this context renders, as referenced (not canonicalized).
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Directory of the document, with a trailing `/`.
    pub fn dir(&self) -> String {
        path::dir_of(&self.document)
    }

    /// Number of include frames between this context and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The context that included this one, if it is still alive.
    pub fn parent(&self) -> Option<Arc<RenderContext>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// The full argument frame.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Positional argument `index`.
    ///
    /// An index past the end of the frame yields an empty string and a
    /// warning; it never records an error.
    pub fn arg(&self, index: usize) -> Value {
        match self.args.get(index) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(
                    "{}: argument {} not provided ({} given)",
                    self.document,
                    index,
                    self.args.len()
                );
                Value::String(String::new())
            }
        }
    }

    /// Binds `name` to `value` in this context only, replacing any earlier
    /// binding at this level. Ancestors are never touched.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        tracing::trace!("{}: def {}", self.document, name);
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner).insert(name, value);
    }

    /// Looks `name` up here, then in each ancestor in turn.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.local(name) {
            return Some(value);
        }
        let mut current = self.parent();
        while let Some(ctx) = current {
            if let Some(value) = ctx.local(name) {
                return Some(value);
            }
            current = ctx.parent();
        }
        None
    }

    /// Like [`lookup`](Self::lookup), but an undefined name yields an empty
    /// string and a warning listing similar visible names.
    pub fn var(&self, name: &str) -> Value {
        if let Some(value) = self.lookup(name) {
            return value;
        }

        let suggestions = find_similar(name, &self.visible_names());
        if suggestions.is_empty() {
            tracing::warn!("{} -> undefined variable: {}", self.document, name);
        } else {
            tracing::warn!(
                "{} -> undefined variable: {} (did you mean: {}?)",
                self.document,
                name,
                suggestions.join(", ")
            );
        }
        Value::String(String::new())
    }

    /// Every name visible from this context, nearest definitions first,
    /// without duplicates.
    pub fn visible_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut push_level = |ctx: &RenderContext| {
            let bindings = ctx.bindings.lock().unwrap_or_else(PoisonError::into_inner);
            let mut level: Vec<&String> = bindings.keys().collect();
            level.sort();
            for name in level {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        };

        push_level(self);
        let mut current = self.parent();
        while let Some(ctx) = current {
            push_level(ctx.as_ref());
            current = ctx.parent();
        }
        names
    }

    /// Records `error` unless an earlier one is already held.
    ///
    /// Returns `true` if this call set the slot.
    pub fn record(&self, error: ComposeError) -> bool {
        match self.error.set(error) {
            Ok(()) => true,
            Err(ignored) => {
                tracing::debug!("{}: keeping earlier error, ignoring: {}", self.document, ignored);
                false
            }
        }
    }

    /// Adopts `child`'s error, if it has one and this context has none.
    pub fn adopt(&self, child: &RenderContext) {
        if let Some(err) = child.error.get() {
            self.record(err.clone());
        }
    }

    /// The first error recorded on (or adopted by) this context.
    pub fn error(&self) -> Option<&ComposeError> {
        self.error.get()
    }

    /// Whether an error has been recorded.
    pub fn has_error(&self) -> bool {
        self.error.get().is_some()
    }

    fn local(&self, name: &str) -> Option<Value> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }
}

/// Up to three names from `available` close to `target`, closest first.
fn find_similar(target: &str, available: &[String]) -> Vec<String> {
    let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<(&String, usize)> =
        available.iter().map(|name| (name, levenshtein(target, name))).collect();
    scored.sort_by_key(|(_, dist)| *dist);
    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= limit)
        .take(3)
        .map(|(name, _)| name.clone())
        .collect()
}
