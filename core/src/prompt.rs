//! Instructions sent to the generative model.

use slide_common::Deck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit,
}

impl Mode {
    pub fn for_prior(prior: Option<&Deck>) -> Self {
        if prior.is_some() {
            Mode::Edit
        } else {
            Mode::Create
        }
    }
}

const CREATE_SCHEMA: &str = r#"{
  "title": "Presentation Title",
  "slides": [
    {
      "id": "slide-1",
      "title": "Slide Title",
      "content": ["Bullet point 1", "Bullet point 2", "Bullet point 3"],
      "layout": "title" | "content" | "image-content",
      "backgroundColor": "FFFFFF"
    }
  ]
}"#;

const EDIT_SCHEMA: &str = r#"{
  "title": "Presentation Title",
  "slides": [
    {
      "id": "unique-id",
      "title": "Slide Title",
      "content": ["Bullet point 1", "Bullet point 2"],
      "layout": "title" | "content" | "image-content",
      "backgroundColor": "FFFFFF"
    }
  ]
}"#;

/// Edit instruction when a prior deck exists, create instruction otherwise.
pub fn build(instruction: &str, prior: Option<&Deck>) -> String {
    match prior {
        Some(deck) => edit_prompt(instruction, deck),
        None => create_prompt(instruction),
    }
}

pub fn create_prompt(instruction: &str) -> String {
    format!(
        "You are a PowerPoint presentation generator. Create a professional presentation based on the user's topic.

User's request: {instruction}

Generate a complete presentation with multiple slides (typically 5-8 slides) covering the topic comprehensively.

Return ONLY a valid JSON object with this structure:
{CREATE_SCHEMA}

Guidelines:
- First slide should use \"title\" layout with presentation title and subtitle
- Other slides should use \"content\" layout
- Each content slide should have 3-5 bullet points
- Make content informative and well-structured
- Use professional language
- Return ONLY the JSON object, no additional text or markdown"
    )
}

pub fn edit_prompt(instruction: &str, prior: &Deck) -> String {
    // Deck only holds strings and lists, so serialization cannot fail.
    let current = serde_json::to_string_pretty(prior).unwrap_or_default();
    format!(
        "You are a PowerPoint presentation editor. The user wants to edit an existing presentation.

Current presentation:
{current}

User's edit request: {instruction}

Please update the presentation based on the user's request and return the COMPLETE updated presentation in JSON format.

Return ONLY a valid JSON object with this structure:
{EDIT_SCHEMA}

Important:
- Maintain the same slide IDs unless creating new slides
- Apply the requested changes
- Keep the JSON structure intact
- Return ONLY the JSON object, no additional text"
    )
}
