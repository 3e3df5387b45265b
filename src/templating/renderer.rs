//! The recursive composition driver.
//!
//! [`Composer::include`] is the unit of recursion: resolve the reference,
//! load it, create a child [`RenderContext`], and let Tera expand the content
//! with the child's functions registered. An `inc(...)` call inside that
//! content comes straight back here with the child as the active context.
//!
//! Failures never unwind. A failing include yields empty (or partial) text at
//! its call site, the error is recorded on the nearest context, and each
//! context hands its first error to its includer once it finishes. Sibling
//! includes keep rendering, and the root ends up holding the first failure of
//! the whole tree.

use std::sync::Arc;

use tera::{Context as TeraContext, Tera, Value};

use super::context::RenderContext;
use super::error::{ComposeError, Rendered};
use super::{functions, loader, path};
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_PUBLICATION_TEMPLATE};

/// Knobs for a [`Composer`].
#[derive(Debug, Clone)]
pub struct ComposerSettings {
    /// Deepest include nesting allowed before recording
    /// [`ComposeError::DepthExceeded`]; guards against include cycles.
    pub max_depth: usize,
    /// Template used by `publist` when the document names none.
    pub publication_template: String,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            publication_template: DEFAULT_PUBLICATION_TEMPLATE.to_string(),
        }
    }
}

/// Expands documents and everything they include.
///
/// Cheap to clone; every Tera function that needs to recurse holds a clone.
///
/// # Examples
///
/// ```rust,no_run
/// use boilerplate::templating::Composer;
///
/// let composer = Composer::default();
/// let rendered = composer.render_file("site/index.html.t");
/// match rendered.error {
///     None => println!("{}", rendered.text),
///     Some(err) => eprintln!("site/index.html.t: {err}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composer {
    settings: Arc<ComposerSettings>,
}

impl Composer {
    /// Creates a composer with the given settings.
    pub fn new(settings: ComposerSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// The settings this composer was built with.
    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Renders `document` from the top.
    ///
    /// A root context for `document` is created and includes `document`
    /// itself. The returned text is kept even when an error is reported.
    pub fn render_file(&self, document: &str) -> Rendered {
        tracing::debug!("Rendering {}", document);
        let root = RenderContext::root(document);
        let text = self.include(&root, document, Vec::new()).text;
        Rendered {
            text,
            error: root.error().cloned(),
        }
    }

    /// Expands `content` as if it had been loaded from `document`, with an
    /// empty argument frame and no enclosing scope.
    pub fn render_str(&self, document: &str, content: &str) -> Rendered {
        let ctx = RenderContext::root(document);
        let text = self.evaluate(&ctx, content);
        Rendered {
            text,
            error: ctx.error().cloned(),
        }
    }

    /// Includes `reference` from the document rendered by `ctx`, passing
    /// `args` as the new document's argument frame.
    ///
    /// An empty reference (or one that resolves to the current directory)
    /// yields empty text and leaves `ctx` untouched. Any error met while
    /// rendering the include is recorded on `ctx` if it has none yet, and is
    /// also returned in [`Rendered::error`].
    pub fn include(&self, ctx: &Arc<RenderContext>, reference: &str, args: Vec<Value>) -> Rendered {
        if reference.is_empty() {
            return Rendered::default();
        }

        let resolved = path::resolve(ctx.document(), reference);
        if resolved.is_empty() {
            return Rendered::default();
        }

        if ctx.depth() >= self.settings.max_depth {
            let err = ComposeError::DepthExceeded {
                document: resolved,
                limit: self.settings.max_depth,
            };
            tracing::debug!("{}: {}", ctx.document(), err);
            ctx.record(err.clone());
            return Rendered {
                text: String::new(),
                error: Some(err),
            };
        }

        let content = match loader::load(&resolved) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("{}: include failed: {}", ctx.document(), err);
                ctx.record(err.clone());
                return Rendered {
                    text: String::new(),
                    error: Some(err),
                };
            }
        };

        let child = ctx.child(resolved, args);
        let text = self.evaluate(&child, &content);
        ctx.adopt(&child);

        Rendered {
            text,
            error: child.error().cloned(),
        }
    }

    /// Expands `content` with `ctx` as the active context.
    ///
    /// Parse and evaluation faults are recorded on `ctx`; whatever Tera wrote
    /// before an evaluation fault is returned.
    fn evaluate(&self, ctx: &Arc<RenderContext>, content: &str) -> String {
        let name = ctx.document().to_string();

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        functions::register(&mut tera, self, ctx);

        if let Err(e) = tera.add_raw_template(&name, content) {
            let err = ComposeError::expansion(&name, &e);
            tracing::debug!("{}", err);
            ctx.record(err);
            return String::new();
        }

        let mut data = TeraContext::new();
        data.insert("file", ctx.document());
        data.insert("dir", &ctx.dir());
        data.insert("args", ctx.args());

        let mut out = Vec::with_capacity(content.len());
        if let Err(e) = tera.render_to(&name, &data, &mut out) {
            let err = ComposeError::expansion(&name, &e);
            tracing::debug!("{}", err);
            ctx.record(err);
        }

        String::from_utf8_lossy(&out).into_owned()
    }
}
