//! End-to-end writer, professor, and distillation flows against a mock
//! provider (no network).

use std::sync::Mutex;

use pretty_assertions::assert_eq;

use quill::config::GenerationLimits;
use quill::memory::{sections, MemoryDocument, MemoryStore};
use quill::professor;
use quill::project::{create_project, ProjectPaths};
use quill::provider::{GenerationRequest, Provider};
use quill::writer::{history, Writer};
use quill::QuillError;

/// Returns a fixed reply and records every prompt it sees.
struct MockProvider {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn generate(&self, request: &GenerationRequest) -> quill::Result<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        Ok(self.reply.clone())
    }
}

fn seeded_project(temp: &tempfile::TempDir) -> ProjectPaths {
    let paths = create_project(temp.path(), "paper").unwrap();

    let mut doc = MemoryStore::load_paragraph(&paths.temp_memory).unwrap();
    doc.set(sections::TOPIC_SENTENCE, ["Calibration is the crux."]);
    doc.set(sections::BULLET_POINTS, ["noise scale", "epsilon budget"]);
    doc.save(&paths.temp_memory).unwrap();

    let mut project = MemoryStore::load_project(&paths.project_memory).unwrap();
    project.set(sections::KEY_IDEAS, ["privacy bounds influence"]);
    project.save(&paths.project_memory).unwrap();

    paths
}

mod draft_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn draft_writes_history_outputs_and_memory() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);
        let provider = MockProvider::new("A generated paragraph about calibration.");

        let writer = Writer::new(paths.clone(), &provider, GenerationLimits::default());
        let result = writer.draft().unwrap();

        assert_eq!(result.version, 1);
        assert_eq!(result.text, "A generated paragraph about calibration.");

        // History has the entry.
        let content = std::fs::read_to_string(&paths.writing_history).unwrap();
        assert_eq!(
            history::latest_entry(&content).as_deref(),
            Some("A generated paragraph about calibration.")
        );

        // Output files are refreshed.
        let plain = std::fs::read_to_string(&paths.output_plaintext).unwrap();
        assert_eq!(plain, "A generated paragraph about calibration.");
        assert!(!std::fs::read_to_string(&paths.output_latex).unwrap().is_empty());

        // The paragraph lands in the temp memory Output section.
        let doc = MemoryDocument::load(&paths.temp_memory).unwrap();
        assert_eq!(
            doc.entries(sections::OUTPUT),
            ["A generated paragraph about calibration."]
        );

        // The exact prompt was logged.
        let log = std::fs::read_to_string(&paths.prompt_log).unwrap();
        assert!(log.contains("Mode: NewParagraph"));
        assert!(log.contains("===== Topic Sentence ====="));

        // Draft prompt first, LaTeX conversion prompt second.
        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("- noise scale"));
        assert!(prompts[1].contains("Convert the following academic text to LaTeX"));
    }

    #[test]
    fn draft_without_inputs_is_a_precondition_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = create_project(temp.path(), "empty").unwrap();
        let provider = MockProvider::new("unused");

        let writer = Writer::new(paths, &provider, GenerationLimits::default());
        let err = writer.draft().unwrap_err();
        assert!(matches!(err, QuillError::MissingSection { .. }));
        assert!(provider.prompts().is_empty());
    }

    #[test]
    fn stray_braces_in_model_output_are_stripped() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);
        let provider = MockProvider::new("Kept text. {leftover note}");

        let writer = Writer::new(paths, &provider, GenerationLimits::default());
        let result = writer.draft().unwrap();
        assert_eq!(result.text, "Kept text.");
    }
}

mod revise_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inline_comments_feed_the_revision_prompt() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        let mut doc = MemoryDocument::load(&paths.temp_memory).unwrap();
        doc.set(
            sections::CURRENT_PARAGRAPH,
            ["The result holds broadly. {Quantify the improvement.}"],
        );
        doc.save(&paths.temp_memory).unwrap();

        let provider = MockProvider::new("The result improves accuracy by twelve percent.");
        let writer = Writer::new(paths, &provider, GenerationLimits::default());
        let result = writer.revise().unwrap();

        assert_eq!(result.version, 1);
        let prompts = provider.prompts();
        assert!(prompts[0].contains("Feedback: Quantify the improvement."));
        assert!(prompts[0].contains("The result holds broadly."));
        assert!(prompts[0].contains("Address every inline comment"));
    }

    #[test]
    fn revision_without_feedback_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        let mut doc = MemoryDocument::load(&paths.temp_memory).unwrap();
        doc.set(sections::CURRENT_PARAGRAPH, ["A finished paragraph."]);
        doc.save(&paths.temp_memory).unwrap();

        let provider = MockProvider::new("unused");
        let writer = Writer::new(paths, &provider, GenerationLimits::default());
        let err = writer.revise().unwrap_err();
        assert!(matches!(
            err,
            QuillError::MissingSection { ref section, .. }
                if section.as_str() == "Revision Feedback"
        ));
    }

    #[test]
    fn versions_increase_across_runs() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        let provider = MockProvider::new("Draft one text, long enough to keep.");
        let writer = Writer::new(paths.clone(), &provider, GenerationLimits::default());
        assert_eq!(writer.draft().unwrap().version, 1);
        assert_eq!(writer.draft().unwrap().version, 2);

        let content = std::fs::read_to_string(&paths.writing_history).unwrap();
        assert_eq!(history::next_version(&content), 3);
    }
}

mod professor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn review_records_todo_history() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        // Produce a draft to review.
        let draft_provider = MockProvider::new("A paragraph that needs citations.");
        Writer::new(paths.clone(), &draft_provider, GenerationLimits::default())
            .draft()
            .unwrap();

        let review_provider =
            MockProvider::new("1. **Add** a citation for the main claim.\n2. Tighten the opening.");
        let store = MemoryStore::open(temp.path().join("global_memory.txt"));
        let todo = professor::review_project(&review_provider, &paths, &store).unwrap();

        // Markdown is normalized away.
        assert_eq!(todo, "1. Add a citation for the main claim.\n2. Tighten the opening.");

        let content = std::fs::read_to_string(&paths.todo_history).unwrap();
        assert_eq!(history::latest_todo(&content).as_deref(), Some(todo.as_str()));

        // The professor saw the draft and the default heuristics.
        let prompts = review_provider.prompts();
        assert!(prompts[0].contains("A paragraph that needs citations."));
        assert!(prompts[0].contains("Clarity"));
    }

    #[test]
    fn review_without_history_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);
        std::fs::remove_file(&paths.writing_history).unwrap();

        let provider = MockProvider::new("unused");
        let store = MemoryStore::open(temp.path().join("global_memory.txt"));
        let err = professor::review_project(&provider, &paths, &store).unwrap_err();
        assert!(matches!(err, QuillError::FileNotFound(_)));
    }

    #[test]
    fn apply_revises_against_latest_todo() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        let draft_provider = MockProvider::new("A paragraph that needs citations.");
        Writer::new(paths.clone(), &draft_provider, GenerationLimits::default())
            .draft()
            .unwrap();

        history::prepend_todo(&paths.todo_history, "1. Add a citation.").unwrap();

        let apply_provider = MockProvider::new("A paragraph with a citation [12].");
        let writer = Writer::new(paths.clone(), &apply_provider, GenerationLimits::default());
        let result = writer.apply_todo().unwrap();

        assert_eq!(result.version, 2);
        let prompts = apply_provider.prompts();
        assert!(prompts[0].contains("1. Add a citation."));
        assert!(prompts[0].contains("A paragraph that needs citations."));
    }

    #[test]
    fn apply_without_todo_list_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        let provider = MockProvider::new("unused");
        let writer = Writer::new(paths, &provider, GenerationLimits::default());
        assert!(writer.apply_todo().is_err());
    }
}

mod distill_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use quill::distill;

    #[test]
    fn remember_replaces_previous_content() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        std::fs::write(
            &paths.staged_output,
            "A long draft with many ideas worth remembering across sessions.",
        )
        .unwrap();

        let provider = MockProvider::new(
            "1. The mechanism bounds each record's influence on the output.\n\
             2. Calibration ties the noise scale to the sensitivity bound.",
        );
        let sentences = distill::update_previous_content(&provider, &paths, 10).unwrap();
        assert_eq!(sentences.len(), 2);

        let doc = MemoryDocument::load(&paths.project_memory).unwrap();
        assert_eq!(doc.entries(sections::PREVIOUS_CONTENT), sentences.as_slice());
        // Key ideas are untouched.
        assert_eq!(doc.entries(sections::KEY_IDEAS), ["privacy bounds influence"]);
    }

    #[test]
    fn empty_staged_output_changes_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = seeded_project(&temp);

        let provider = MockProvider::new("unused");
        let sentences = distill::update_previous_content(&provider, &paths, 10).unwrap();
        assert!(sentences.is_empty());
        assert!(provider.prompts().is_empty());
    }
}
