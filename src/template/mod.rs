//! Writing-template generation.
//!
//! Learns the rhetorical structure of a reference section: each sentence is
//! assigned a semantic role by the model, and the ordered roles become a
//! reusable paragraph template (`[role]. [role]. ...`) plus a list of the
//! transitions between them. The result is written in the memory-file
//! format so it can seed a project's Template Flow section directly.

use serde::Deserialize;

use crate::error::{QuillError, Result};
use crate::memory::{sections, MemoryDocument};
use crate::provider::{GenerationRequest, Provider};
use crate::writer::latex::strip_code_fences;

/// Model judgment for one sentence.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceAnalysis {
    pub sentence_index: usize,
    #[serde(default)]
    pub text: String,
    pub role: String,
    #[serde(default)]
    pub transition_type: Option<String>,
    #[serde(default)]
    pub transition_description: Option<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

/// Whole-section analysis returned by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateAnalysis {
    pub sentence_analyses: Vec<SentenceAnalysis>,
}

/// Split text into sentences at `.`/`!`/`?` boundaries followed by
/// whitespace. Good enough for prose; abbreviations may over-split.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let boundary = chars.peek().map(|next| next.is_whitespace()).unwrap_or(true);
            if boundary {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                current.clear();
            }
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

/// Ask the model to classify each sentence's semantic role.
pub fn analyze_section(
    provider: &dyn Provider,
    text: &str,
    section_name: &str,
) -> Result<TemplateAnalysis> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Err(QuillError::Other("no sentences found in input text".into()));
    }

    let numbered: Vec<String> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect();

    let prompt = format!(
        "Analyze the following sentences from the \"{section_name}\" section of an academic \
         research paper.\n\
         \n\
         For each sentence, identify:\n\
         1. Its semantic role/purpose (e.g., \"introduces background\", \"explains research \
         gap\", \"presents key idea\", \"provides example\", \"compares approaches\")\n\
         2. Its relationship to the previous sentence (transition type: continuation, \
         contrast, example, elaboration, conclusion, etc.)\n\
         3. Key concepts or topics it addresses\n\
         \n\
         Sentences:\n\
         {}\n\
         \n\
         Respond with a JSON object containing \"sentence_analyses\": an array with one object \
         per sentence, each having \"sentence_index\" (0-indexed), \"text\", \"role\", \
         \"transition_type\" (null for the first sentence), \"transition_description\", and \
         \"key_concepts\" (array of strings).\n\
         \n\
         Return ONLY valid JSON, nothing else.",
        numbered.join("\n")
    );

    let response = provider.generate(&GenerationRequest::new(prompt))?;
    let json = strip_code_fences(&response);
    let mut analysis: TemplateAnalysis = serde_json::from_str(json)
        .map_err(|e| QuillError::Other(format!("model returned invalid analysis JSON: {e}")))?;

    analysis
        .sentence_analyses
        .sort_by_key(|s| s.sentence_index);
    Ok(analysis)
}

/// Render an analysis as a template document: the role chain plus the
/// transitions between consecutive sentences.
pub fn render_template(analysis: &TemplateAnalysis) -> MemoryDocument {
    let template = analysis
        .sentence_analyses
        .iter()
        .map(|s| format!("[{}]", s.role))
        .collect::<Vec<_>>()
        .join(". ");

    let mut doc = MemoryDocument::new();
    if !template.is_empty() {
        doc.set(sections::TEMPLATE_FLOW, [template]);
    } else {
        doc.ensure_section(sections::TEMPLATE_FLOW);
    }

    let mut transitions = Vec::new();
    for pair in analysis.sentence_analyses.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let kind = curr.transition_type.as_deref().unwrap_or("unspecified");
        let mut line = format!(
            "{} -> {}: {kind}",
            prev.sentence_index, curr.sentence_index
        );
        if let Some(description) = curr.transition_description.as_deref() {
            if !description.is_empty() {
                line.push_str(&format!(" ({description})"));
            }
        }
        transitions.push(line);
    }
    doc.set(sections::TRANSITIONS, transitions);

    doc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_on_sentence_boundaries() {
        let sentences = split_sentences("First one. Second one! Third one?");
        assert_eq!(sentences, ["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn keeps_unterminated_tail() {
        let sentences = split_sentences("Complete sentence. trailing fragment");
        assert_eq!(sentences, ["Complete sentence.", "trailing fragment"]);
    }

    #[test]
    fn decimal_points_do_not_split() {
        let sentences = split_sentences("Accuracy reached 99.5 percent. Second claim.");
        assert_eq!(
            sentences,
            ["Accuracy reached 99.5 percent.", "Second claim."]
        );
    }

    #[test]
    fn analysis_json_deserializes() {
        let json = r#"{
            "sentence_analyses": [
                {"sentence_index": 1, "text": "However, gaps remain.", "role": "identifies the research gap",
                 "transition_type": "contrast", "transition_description": "contrasts promise with limits",
                 "key_concepts": ["gap"]},
                {"sentence_index": 0, "text": "ML transformed healthcare.", "role": "introduces background",
                 "transition_type": null, "transition_description": null}
            ]
        }"#;
        let mut analysis: TemplateAnalysis = serde_json::from_str(json).unwrap();
        analysis.sentence_analyses.sort_by_key(|s| s.sentence_index);
        assert_eq!(analysis.sentence_analyses[0].role, "introduces background");
        assert!(analysis.sentence_analyses[0].key_concepts.is_empty());
    }

    #[test]
    fn template_joins_roles_in_order() {
        let analysis = TemplateAnalysis {
            sentence_analyses: vec![
                SentenceAnalysis {
                    sentence_index: 0,
                    text: String::new(),
                    role: "introduces background".into(),
                    transition_type: None,
                    transition_description: None,
                    key_concepts: vec![],
                },
                SentenceAnalysis {
                    sentence_index: 1,
                    text: String::new(),
                    role: "identifies the research gap".into(),
                    transition_type: Some("contrast".into()),
                    transition_description: Some("promise vs limits".into()),
                    key_concepts: vec![],
                },
            ],
        };

        let doc = render_template(&analysis);
        assert_eq!(
            doc.entries(sections::TEMPLATE_FLOW),
            ["[introduces background]. [identifies the research gap]"]
        );
        assert_eq!(
            doc.entries(sections::TRANSITIONS),
            ["0 -> 1: contrast (promise vs limits)"]
        );
    }
}
