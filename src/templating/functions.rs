//! Tera functions bound to one render context.
//!
//! Every document is expanded by its own `Tera` instance, and the functions
//! registered here close over that document's [`RenderContext`]. This is the
//! whole directive surface a document can call; Tera parses and evaluates the
//! calls, the closures below only do the work.
//!
//! Tera functions take named arguments only:
//!
//! ```text
//! {{ def(name="title", value="Publications") }}
//! {{ inc(path="./header.html", args=[var(name="title")]) }}
//! {% for f in ls(pattern="\.md$") %}{{ raw(path=f) }}{% endfor %}
//! ```
//!
//! Argument mistakes (missing or mistyped parameters, bad patterns) are
//! returned to Tera as errors and surface as expansion errors on the
//! document. File problems are recorded on the context and the call yields
//! an empty value, so the rest of the document still renders.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use tera::{Tera, Value};

use super::context::RenderContext;
use super::ops;
use super::path;
use super::renderer::Composer;
use crate::publications;

/// Longest argument preview shown in include traces.
const PREVIEW_LEN: usize = 20;

type Args = HashMap<String, Value>;

/// Registers the full directive surface on `tera`, bound to `ctx`.
pub fn register(tera: &mut Tera, composer: &Composer, ctx: &Arc<RenderContext>) {
    let (c, cx) = (composer.clone(), Arc::clone(ctx));
    tera.register_function("inc", move |args: &Args| {
        let reference = optional_str(args, "path")?.unwrap_or_default();
        let frame = list_arg(args, "args");
        if tracing::enabled!(tracing::Level::DEBUG) {
            let preview: Vec<String> = frame.iter().map(preview).collect();
            tracing::debug!(
                "{}inc {}({})",
                "  ".repeat(cx.depth()),
                reference,
                preview.join(" ")
            );
        }
        Ok(Value::String(c.include(&cx, reference, frame).text))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("arg", move |args: &Args| {
        let index = match args.get("i") {
            Some(value) => value.as_u64().ok_or_else(|| {
                tera::Error::msg(format!("arg: `i` must be a non-negative integer, got {value}"))
            })?,
            None => return Err(tera::Error::msg("arg: missing argument `i`")),
        };
        Ok(cx.arg(usize::try_from(index).unwrap_or(usize::MAX)))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("args", move |_: &Args| Ok(Value::Array(cx.args().to_vec())));

    let cx = Arc::clone(ctx);
    tera.register_function("def", move |args: &Args| {
        let name = required_str(args, "def", "name")?;
        let value = args.get("value").cloned().unwrap_or(Value::Null);
        cx.define(name, value);
        Ok(Value::String(String::new()))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("var", move |args: &Args| {
        let name = required_str(args, "var", "name")?;
        Ok(cx.var(name))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("raw", move |args: &Args| {
        let reference = required_str(args, "raw", "path")?;
        Ok(Value::String(ops::raw(&cx, reference)))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("esc", move |args: &Args| {
        let reference = required_str(args, "esc", "path")?;
        Ok(Value::String(ops::escaped(&cx, reference)))
    });

    tera.register_function("cat", |args: &Args| {
        Ok(Value::String(ops::concat(&list_arg(args, "values"))))
    });

    tera.register_function("to_lower", |args: &Args| {
        let value = args.get("value").cloned().unwrap_or(Value::Null);
        Ok(Value::String(ops::lowercase(&value)))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("ls", move |args: &Args| {
        let pattern = match optional_str(args, "pattern")? {
            Some(p) if !p.is_empty() => Some(
                Regex::new(p)
                    .map_err(|e| tera::Error::msg(format!("ls: invalid pattern `{p}`: {e}")))?,
            ),
            _ => None,
        };
        let files = ops::list_files(&cx.dir(), pattern.as_ref()).unwrap_or_else(|err| {
            cx.record(err);
            Vec::new()
        });
        Ok(string_array(files))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("ls_dirs", move |_: &Args| {
        let dirs = ops::list_dirs(&cx.dir()).unwrap_or_else(|err| {
            cx.record(err);
            Vec::new()
        });
        Ok(string_array(dirs))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("exists", move |args: &Args| {
        let reference = required_str(args, "exists", "path")?;
        Ok(Value::Bool(ops::exists(&cx, reference)))
    });

    tera.register_function("base_name", |args: &Args| {
        let p = required_str(args, "base_name", "path")?;
        Ok(Value::String(path::base_name(p)))
    });

    tera.register_function("no_ext", |args: &Args| {
        let p = required_str(args, "no_ext", "path")?;
        Ok(Value::String(path::strip_extension(p).to_string()))
    });

    let cx = Arc::clone(ctx);
    tera.register_function("dir", move |_: &Args| Ok(Value::String(cx.dir())));

    let cx = Arc::clone(ctx);
    tera.register_function("path", move |_: &Args| {
        let elements = ops::path_elements(&cx.dir());
        tracing::debug!("path of {} {:?}", cx.document(), elements);
        Ok(string_array(elements))
    });

    tera.register_function("cmd", |args: &Args| {
        let name = required_str(args, "cmd", "name")?;
        let cmd_args: Vec<String> = list_arg(args, "args").iter().map(ops::display).collect();
        match ops::run_command(name, &cmd_args) {
            Ok(output) => Ok(Value::String(output)),
            Err(err) => {
                tracing::warn!("{}", err);
                Ok(Value::String(String::new()))
            }
        }
    });

    let cx = Arc::clone(ctx);
    tera.register_function("echo", move |args: &Args| {
        let msg = args.get("msg").map(ops::display).unwrap_or_default();
        tracing::info!("{}{}", "  ".repeat(cx.depth()), msg);
        Ok(Value::String(String::new()))
    });

    let (c, cx) = (composer.clone(), Arc::clone(ctx));
    tera.register_function("publist", move |args: &Args| {
        let dir = required_str(args, "publist", "dir")?;
        let template = match optional_str(args, "template")? {
            Some(t) => t,
            None => c.settings().publication_template.as_str(),
        };
        Ok(Value::String(publications::publist(&c, &cx, dir, template)))
    });
}

fn required_str<'a>(args: &'a Args, function: &str, key: &str) -> tera::Result<&'a str> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => {
            Err(tera::Error::msg(format!("{function}: `{key}` must be a string, got {other}")))
        }
        None => Err(tera::Error::msg(format!("{function}: missing argument `{key}`"))),
    }
}

fn optional_str<'a>(args: &'a Args, key: &str) -> tera::Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(tera::Error::msg(format!("`{key}` must be a string, got {other}"))),
    }
}

/// Reads a list parameter; a single non-array value counts as a one-element list.
fn list_arg(args: &Args, key: &str) -> Vec<Value> {
    match args.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(single) => vec![single.clone()],
    }
}

fn string_array(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

fn preview(value: &Value) -> String {
    let text = ops::display(value);
    if text.chars().count() > PREVIEW_LEN {
        let head: String = text.chars().take(PREVIEW_LEN - 3).collect();
        format!("{head}...")
    } else {
        text
    }
}
