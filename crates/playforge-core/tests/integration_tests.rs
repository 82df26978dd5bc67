//! Integration tests for playforge-core, driven through the public API with
//! in-memory port implementations.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use playforge_core::application::{ApplicationError, LoadError, PromptError};
use playforge_core::prelude::*;

// ── Test doubles ─────────────────────────────────────────────────────────────

struct FixedLoader(Playbook);

impl PlaybookLoader for FixedLoader {
    fn load(&self, _path: &Path) -> PlayforgeResult<Playbook> {
        Ok(self.0.clone())
    }
}

/// Replaces `{{ name }}` occurrences; templates are looked up by path.
struct MapEngine {
    templates: HashMap<PathBuf, String>,
}

impl MapEngine {
    fn substitute(source: &str, answers: &AnswerMap) -> String {
        answers.iter().fold(source.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{{ {key} }}}}"), &value.to_string())
        })
    }

    fn template(&self, path: &Path) -> PlayforgeResult<&String> {
        self.templates.get(path).ok_or_else(|| {
            ApplicationError::from(playforge_core::application::RenderError::TemplateRead {
                template: path.display().to_string(),
                reason: "not found".into(),
            })
            .into()
        })
    }
}

impl TemplateEngine for MapEngine {
    fn check(&self, path: &Path) -> PlayforgeResult<()> {
        self.template(path).map(|_| ())
    }

    fn render_file(&self, path: &Path, answers: &AnswerMap) -> PlayforgeResult<String> {
        Ok(Self::substitute(self.template(path)?, answers))
    }

    fn render_str(&self, _name: &str, source: &str, answers: &AnswerMap) -> PlayforgeResult<String> {
        Ok(Self::substitute(source, answers))
    }
}

#[derive(Default, Clone)]
struct MapFs(Arc<Mutex<HashMap<PathBuf, String>>>);

impl MapFs {
    fn get(&self, path: &str) -> Option<String> {
        self.0.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl Filesystem for MapFs {
    fn exists(&self, path: &Path) -> bool {
        self.0.lock().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, _path: &Path) -> PlayforgeResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PlayforgeResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> PlayforgeResult<()> {
        self.0
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> PlayforgeResult<String> {
        self.get(&path.to_string_lossy())
            .ok_or_else(|| ApplicationError::from(LoadError::NotFound { path: path.into() }).into())
    }
}

struct Answers {
    queue: Mutex<VecDeque<String>>,
    confirm: bool,
}

impl Answers {
    fn new(answers: &[&str], confirm: bool) -> Self {
        Self {
            queue: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            confirm,
        }
    }

    fn next(&self, label: &str) -> PlayforgeResult<String> {
        self.queue.lock().unwrap().pop_front().ok_or_else(|| {
            ApplicationError::from(PromptError::Exhausted {
                label: label.into(),
            })
            .into()
        })
    }
}

impl Prompter for Answers {
    fn select(&self, label: &str, items: &[String]) -> PlayforgeResult<String> {
        let answer = self.next(label)?;
        assert!(items.contains(&answer), "{answer} is not one of {items:?}");
        Ok(answer)
    }

    fn text(&self, label: &str, _default: Option<&str>, _placeholder: Option<&str>) -> PlayforgeResult<String> {
        self.next(label)
    }

    fn confirm(&self, _message: &str) -> PlayforgeResult<bool> {
        Ok(self.confirm)
    }

    fn report_invalid(&self, _question: &Question, _error: &InputValidationError) {}
}

#[derive(Default)]
struct CountingReporter(Mutex<usize>);

impl ErrorReporter for CountingReporter {
    fn report(&self, _error: &PlayforgeError) {
        *self.0.lock().unwrap() += 1;
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn zone_playbook() -> Playbook {
    Playbook::new("New Zone Record")
        .with_question(Question::text("Subdomain?", "subdomain_name"))
        .with_question(Question::select("Record type?", "record_type", ["A", "CNAME"]))
        .with_question(
            Question::text("Record value?", "record_value")
                .with_validation("ip_address")
                .with_condition("record_type == A"),
        )
        .with_output(Output::new("zone_record.tpl", "terraform/{{ subdomain_name }}.tf"))
}

fn engine() -> MapEngine {
    MapEngine {
        templates: HashMap::from([(
            PathBuf::from("play/zone_record.tpl"),
            "{{ subdomain_name }} IN {{ record_type }} {{ record_value }}\n".to_string(),
        )]),
    }
}

fn runner(
    playbook: Playbook,
    fs: MapFs,
    answers: Answers,
    reporter: Arc<CountingReporter>,
) -> PlaybookRunner {
    PlaybookRunner::new(
        Arc::new(FixedLoader(playbook)),
        Arc::new(engine()),
        Arc::new(fs),
        Arc::new(answers),
        reporter,
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn full_run_writes_rendered_output() {
    let fs = MapFs::default();
    let reporter = Arc::new(CountingReporter::default());
    let report = runner(
        zone_playbook(),
        fs.clone(),
        Answers::new(&["testsubdomain", "A", "10.0.0.1"], false),
        reporter.clone(),
    )
    .run(Path::new("play/playbook.yaml"), WritePolicy::default())
    .unwrap();

    assert_eq!(report.playbook, "New Zone Record");
    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].path, PathBuf::from("play/terraform/testsubdomain.tf"));
    assert_eq!(report.outputs[0].action, WriteAction::Created);
    assert_eq!(
        fs.get("play/terraform/testsubdomain.tf").as_deref(),
        Some("testsubdomain IN A 10.0.0.1\n")
    );
    assert_eq!(*reporter.0.lock().unwrap(), 0);
}

#[test]
fn second_run_appends_when_asked_to() {
    let fs = MapFs::default();
    fs.write_file(Path::new("play/terraform/www.tf"), "existing\n")
        .unwrap();

    let report = runner(
        zone_playbook(),
        fs.clone(),
        Answers::new(&["www", "A", "10.0.0.2"], false),
        Arc::default(),
    )
    .run(Path::new("play/playbook.yaml"), WritePolicy::append())
    .unwrap();

    assert_eq!(report.outputs[0].action, WriteAction::Appended);
    assert_eq!(
        fs.get("play/terraform/www.tf").as_deref(),
        Some("existing\nwww IN A 10.0.0.2\n")
    );
}

#[test]
fn declined_overwrite_fails_without_reporting() {
    let fs = MapFs::default();
    fs.write_file(Path::new("play/terraform/www.tf"), "keep me")
        .unwrap();
    let reporter = Arc::new(CountingReporter::default());

    let err = runner(
        zone_playbook(),
        fs.clone(),
        Answers::new(&["www", "A", "10.0.0.2"], false),
        reporter.clone(),
    )
    .run(Path::new("play/playbook.yaml"), WritePolicy::default())
    .unwrap_err();

    assert!(err.is_user_abort());
    assert_eq!(fs.get("play/terraform/www.tf").as_deref(), Some("keep me"));
    assert_eq!(*reporter.0.lock().unwrap(), 0);
}

#[test]
fn invalid_playbook_is_rejected_before_any_prompt() {
    let mut playbook = zone_playbook();
    playbook.outputs[0].template_file = "missing.tpl".into();
    let reporter = Arc::new(CountingReporter::default());

    // No answers queued: reaching a prompt would fail with a prompt error.
    let err = runner(playbook, MapFs::default(), Answers::new(&[], false), reporter.clone())
        .run(Path::new("play/playbook.yaml"), WritePolicy::default())
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(err.to_string().contains("missing.tpl"));
    assert_eq!(*reporter.0.lock().unwrap(), 1);
}
