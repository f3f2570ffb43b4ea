//! Memory file format integration tests.
//!
//! Exercises parse/serialize round trips through real files and the
//! project scaffolding that seeds them.

use pretty_assertions::assert_eq;

use quill::memory::{sections, MemoryDocument, MemoryStore};
use quill::project::create_project;

mod round_trip_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_survives_save_and_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("Memory").join("ProjectMemory.txt");

        let mut doc = MemoryDocument::new();
        doc.set(
            sections::KEY_IDEAS,
            [
                "Differential privacy bounds per-record influence",
                "Noise calibration trades utility for privacy",
            ],
        );
        doc.set(sections::PREVIOUS_CONTENT, ["The introduction frames the tradeoff."]);
        doc.set(sections::OUTLINES, Vec::<String>::new());

        doc.save(&path).unwrap();
        let loaded = MemoryDocument::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn hand_written_file_with_dashes_normalizes_to_bullets() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("TempMemory.txt");
        std::fs::write(
            &path,
            "===== Topic Sentence =====\n\
             - Privacy mechanisms must be calibrated.\n\
             \n\
             ===== Bullet Points =====\n\
             - noise scale\n\
             - epsilon budget\n",
        )
        .unwrap();

        let doc = MemoryDocument::load(&path).unwrap();
        assert_eq!(
            doc.first_entry(sections::TOPIC_SENTENCE),
            Some("Privacy mechanisms must be calibrated.")
        );

        doc.save(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("• noise scale"));
        assert!(!content.contains("- noise scale"));

        // Normalization is stable.
        assert_eq!(MemoryDocument::load(&path).unwrap(), doc);
    }

    #[test]
    fn prose_between_sections_is_dropped_on_round_trip() {
        let input = "junk before\n\
                     ===== Key Ideas =====\n\
                     • kept idea\n\
                     prose that is not a bullet\n";
        let doc = MemoryDocument::parse(input);
        let again = MemoryDocument::parse(&doc.serialize());
        assert_eq!(again, doc);
        assert_eq!(again.entries(sections::KEY_IDEAS), ["kept idea"]);
    }
}

mod scaffold_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_files_parse_with_standard_sections() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = create_project(temp.path(), "paper").unwrap();

        let project = MemoryDocument::load(&paths.project_memory).unwrap();
        let names: Vec<&str> = project.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Key Ideas", "Previous Content", "Outlines"]);

        let paragraph = MemoryStore::load_paragraph(&paths.temp_memory).unwrap();
        assert!(paragraph.section(sections::CURRENT_PARAGRAPH).is_some());
        assert!(paragraph.entries(sections::CURRENT_PARAGRAPH).is_empty());
    }

    #[test]
    fn store_falls_back_to_default_heuristics() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = MemoryStore::open(temp.path().join("missing.txt"));

        let text = store.heuristics_text();
        assert!(text.starts_with("===== Writing Heuristics ====="));
        assert!(text.contains("• Clarity"));
    }
}
