//! Template engine implementation using minijinja.
//!
//! Undefined variables are errors. A template that refers to the answer of a
//! question that may be skipped has to guard it with `is defined` or pass it
//! through the built-in `default` filter.

use std::path::Path;
use std::sync::Arc;

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior, Value, value::ValueKind};
use tracing::{debug, instrument};

use playforge_core::{
    application::{ApplicationError, RenderError, ports::Filesystem, ports::TemplateEngine},
    domain::AnswerMap,
    error::{PlayforgeError, PlayforgeResult},
};

use crate::filesystem::LocalFilesystem;

/// Jinja2-compatible template engine with an extended filter library.
pub struct JinjaEngine {
    filesystem: Arc<dyn Filesystem>,
}

impl JinjaEngine {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Build an environment with strict undefined handling and the custom
    /// filters registered.
    pub fn environment<'source>() -> Environment<'source> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        env.add_filter("snakecase", filter_snakecase);
        env.add_filter("kebabcase", filter_kebabcase);
        env.add_filter("camelcase", filter_camelcase);
        env.add_filter("quote", filter_quote);
        env.add_filter("squote", filter_squote);
        env.add_filter("trunc", filter_trunc);
        env.add_filter("nospace", filter_nospace);
        env.add_filter("has_prefix", filter_has_prefix);
        env.add_filter("has_suffix", filter_has_suffix);
        env.add_filter("split_list", filter_split_list);
        env.add_filter("compact", filter_compact);
        env.add_filter("uniq", filter_uniq);

        env
    }

    fn read(&self, path: &Path) -> PlayforgeResult<String> {
        self.filesystem.read_to_string(path).map_err(|e| {
            render_error(RenderError::TemplateRead {
                template: path.display().to_string(),
                reason: e.to_string(),
            })
        })
    }

    fn render_source(&self, name: &str, source: &str, answers: &AnswerMap) -> PlayforgeResult<String> {
        let mut env = Self::environment();
        env.add_template(name, source).map_err(|e| {
            render_error(RenderError::TemplateParse {
                template: name.to_string(),
                reason: e.to_string(),
            })
        })?;

        let template = env.get_template(name).map_err(|e| {
            render_error(RenderError::TemplateParse {
                template: name.to_string(),
                reason: e.to_string(),
            })
        })?;

        template.render(Value::from_serialize(answers)).map_err(|e| {
            render_error(RenderError::TemplateExec {
                template: name.to_string(),
                reason: e.to_string(),
            })
        })
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        Self::new(Arc::new(LocalFilesystem::new()))
    }
}

impl TemplateEngine for JinjaEngine {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn check(&self, path: &Path) -> PlayforgeResult<()> {
        let source = self.read(path)?;
        let name = path.display().to_string();

        let mut env = Self::environment();
        env.add_template(&name, &source).map_err(|e| {
            render_error(RenderError::TemplateParse {
                template: name.clone(),
                reason: e.to_string(),
            })
        })?;

        debug!("Template parsed");
        Ok(())
    }

    #[instrument(skip(self, answers), fields(path = %path.display()))]
    fn render_file(&self, path: &Path, answers: &AnswerMap) -> PlayforgeResult<String> {
        let source = self.read(path)?;
        self.render_source(&path.display().to_string(), &source, answers)
    }

    fn render_str(&self, name: &str, source: &str, answers: &AnswerMap) -> PlayforgeResult<String> {
        self.render_source(name, source, answers)
    }
}

fn render_error(error: RenderError) -> PlayforgeError {
    ApplicationError::from(error).into()
}

// ── Filters ──────────────────────────────────────────────────────────────────

/// Split on non-alphanumerics and lower→upper case boundaries.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn filter_snakecase(value: Value) -> String {
    words(&value.to_string())
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn filter_kebabcase(value: Value) -> String {
    words(&value.to_string())
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `http_server` → `HttpServer`.
fn filter_camelcase(value: Value) -> String {
    words(&value.to_string())
        .iter()
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

fn filter_quote(value: Value) -> String {
    let s = value.to_string();
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn filter_squote(value: Value) -> String {
    format!("'{value}'")
}

/// Keep the first `n` characters, or the last `-n` when negative.
fn filter_trunc(value: Value, n: i64) -> String {
    let s = value.to_string();
    let len = s.chars().count();
    let keep = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
    if keep >= len {
        return s;
    }
    if n < 0 {
        s.chars().skip(len - keep).collect()
    } else {
        s.chars().take(keep).collect()
    }
}

fn filter_nospace(value: Value) -> String {
    value.to_string().split_whitespace().collect()
}

fn filter_has_prefix(value: Value, prefix: String) -> bool {
    value.to_string().starts_with(&prefix)
}

fn filter_has_suffix(value: Value, suffix: String) -> bool {
    value.to_string().ends_with(&suffix)
}

fn filter_split_list(value: Value, sep: String) -> Vec<String> {
    value.to_string().split(&sep).map(str::to_string).collect()
}

fn sequence(value: &Value) -> Result<Vec<Value>, Error> {
    if value.kind() != ValueKind::Seq {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("expected a list, got {}", value.kind()),
        ));
    }
    Ok(value.try_iter()?.collect())
}

/// Drop empty strings, none and undefined entries.
fn filter_compact(value: Value) -> Result<Vec<Value>, Error> {
    Ok(sequence(&value)?
        .into_iter()
        .filter(|v| !(v.is_undefined() || v.is_none() || v.as_str() == Some("")))
        .collect())
}

/// Remove duplicates, keeping the first occurrence.
fn filter_uniq(value: Value) -> Result<Vec<Value>, Error> {
    let mut seen: Vec<Value> = Vec::new();
    for item in sequence(&value)? {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    fn engine_with(path: &str, template: &str) -> JinjaEngine {
        JinjaEngine::new(Arc::new(MemoryFilesystem::new().with_file(path, template)))
    }

    fn render(source: &str, answers: &AnswerMap) -> PlayforgeResult<String> {
        JinjaEngine::new(Arc::new(MemoryFilesystem::new())).render_str("inline", source, answers)
    }

    #[test]
    fn renders_output_file_name() {
        let answers = AnswerMap::new().with("subdomain_name", "testsubdomain");
        assert_eq!(
            render("terraform/{{ subdomain_name }}.tf", &answers).unwrap(),
            "terraform/testsubdomain.tf"
        );
    }

    #[test]
    fn typed_answers_keep_their_type() {
        let answers = AnswerMap::new().with("ttl", 3600_i64).with("proxied", true);
        assert_eq!(
            render("{{ ttl + 1 }} {% if proxied %}on{% endif %}", &answers).unwrap(),
            "3601 on"
        );
    }

    #[test]
    fn undefined_variable_is_an_exec_error() {
        let err = render("{{ missing }}", &AnswerMap::new()).unwrap_err();
        assert!(matches!(
            err,
            PlayforgeError::Application(ApplicationError::Render(RenderError::TemplateExec { .. }))
        ));
    }

    #[test]
    fn skipped_answers_can_be_guarded() {
        let source = "{% if cname_target is defined %}{{ cname_target }}{% else %}none{% endif %}";
        assert_eq!(render(source, &AnswerMap::new()).unwrap(), "none");
        assert_eq!(
            render("{{ cname_target | default('@') }}", &AnswerMap::new()).unwrap(),
            "@"
        );
    }

    #[test]
    fn check_reports_syntax_errors() {
        let ok = engine_with("ok.tpl", "{% for x in items %}{{ x }}{% endfor %}");
        assert!(ok.check(Path::new("ok.tpl")).is_ok());

        let broken = engine_with("bad.tpl", "{% if x %}never closed");
        assert!(matches!(
            broken.check(Path::new("bad.tpl")).unwrap_err(),
            PlayforgeError::Application(ApplicationError::Render(RenderError::TemplateParse { .. }))
        ));

        assert!(matches!(
            ok.check(Path::new("missing.tpl")).unwrap_err(),
            PlayforgeError::Application(ApplicationError::Render(RenderError::TemplateRead { .. }))
        ));
    }

    #[test]
    fn render_file_reads_through_filesystem() {
        let engine = engine_with("zone.tpl", "name = \"{{ name }}\"\n");
        let answers = AnswerMap::new().with("name", "www");
        assert_eq!(
            engine.render_file(Path::new("zone.tpl"), &answers).unwrap(),
            "name = \"www\"\n"
        );
    }

    #[test]
    fn case_filters() {
        let answers = AnswerMap::new().with("v", "HTTP server-Name");
        assert_eq!(render("{{ v | snakecase }}", &answers).unwrap(), "http_server_name");
        assert_eq!(render("{{ v | kebabcase }}", &answers).unwrap(), "http-server-name");

        let answers = AnswerMap::new().with("v", "firstName_last");
        assert_eq!(render("{{ v | snakecase }}", &answers).unwrap(), "first_name_last");
        assert_eq!(render("{{ v | camelcase }}", &answers).unwrap(), "FirstNameLast");
    }

    #[test]
    fn string_filters() {
        let answers = AnswerMap::new().with("v", "hello world");
        assert_eq!(render("{{ v | quote }}", &answers).unwrap(), "\"hello world\"");
        assert_eq!(render("{{ v | squote }}", &answers).unwrap(), "'hello world'");
        assert_eq!(render("{{ v | trunc(5) }}", &answers).unwrap(), "hello");
        assert_eq!(render("{{ v | trunc(-5) }}", &answers).unwrap(), "world");
        assert_eq!(render("{{ v | nospace }}", &answers).unwrap(), "helloworld");
        assert_eq!(render("{{ v | has_prefix('hell') }}", &answers).unwrap(), "true");
        assert_eq!(render("{{ v | has_suffix('hell') }}", &answers).unwrap(), "false");
    }

    #[test]
    fn list_filters() {
        let answers = AnswerMap::new().with("v", "a,,b,a");
        assert_eq!(
            render("{{ v | split_list(',') | compact | uniq | join('|') }}", &answers).unwrap(),
            "a|b"
        );
        assert!(render("{{ v | uniq }}", &answers).is_err());
    }
}
