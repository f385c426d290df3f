//! AI name generation over the Anthropic Messages API.
//!
//! One request per round, no streaming. The model is asked for a strict
//! JSON array of exactly ten `{name, reasoning}` records; because models
//! sometimes wrap the array in prose, parsing falls back to extracting
//! the first array-shaped substring before giving up. A malformed or
//! failed response is fatal to that generation round only — the caller
//! reports it and may retry.

use crate::error::NameCheckError;
use crate::types::{GeneratedName, NameBrief, NameLength, NameStyle, ProductType, ToneStyle};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 2048;

lazy_static! {
    /// First array-shaped substring in a response that wraps the JSON in prose.
    static ref ARRAY_RE: Regex = Regex::new(r"(?s)\[.*\]").expect("array pattern is valid");
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Client for the name-generation collaborator.
pub struct NameGenerator {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl NameGenerator {
    /// Create a generator for the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, NameCheckError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a generator with a custom model id.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, NameCheckError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                NameCheckError::network_with_source(
                    "Failed to create generation HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Generate ten fresh name ideas for a brief.
    pub async fn generate(&self, brief: &NameBrief) -> Result<Vec<GeneratedName>, NameCheckError> {
        self.complete(&build_prompt(brief)).await
    }

    /// Generate ten more ideas, steering away from previous suggestions
    /// and optionally incorporating free-text feedback.
    pub async fn generate_more(
        &self,
        brief: &NameBrief,
        previous_names: &[String],
        feedback: Option<&str>,
    ) -> Result<Vec<GeneratedName>, NameCheckError> {
        self.complete(&build_iterative_prompt(brief, previous_names, feedback))
            .await
    }

    async fn complete(&self, prompt: &str) -> Result<Vec<GeneratedName>, NameCheckError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| NameCheckError::generation(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NameCheckError::generation(format!(
                "upstream returned {}: {}",
                status,
                crate::utils::truncate_chars(&body, 200)
            )));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| NameCheckError::generation(format!("unreadable response: {}", e)))?;

        let text = body
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .ok_or_else(|| NameCheckError::generation("response contained no text block"))?;

        debug!(chars = text.len(), "generation response received");
        parse_name_array(text)
    }
}

/// Validate an API key with a trivial live request.
pub async fn validate_api_key(api_key: &str) -> bool {
    let generator = match NameGenerator::new(api_key) {
        Ok(g) => g,
        Err(_) => return false,
    };

    let request = MessagesRequest {
        model: &generator.model,
        max_tokens: 10,
        messages: vec![Message {
            role: "user",
            content: "Hi",
        }],
    };

    match generator
        .http
        .post(API_URL)
        .header("x-api-key", &generator.api_key)
        .header("anthropic-version", API_VERSION)
        .json(&request)
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Parse the model's output into name records, tolerating wrapping prose.
pub(crate) fn parse_name_array(text: &str) -> Result<Vec<GeneratedName>, NameCheckError> {
    if let Ok(names) = serde_json::from_str::<Vec<GeneratedName>>(text) {
        return Ok(names);
    }

    if let Some(found) = ARRAY_RE.find(text) {
        if let Ok(names) = serde_json::from_str::<Vec<GeneratedName>>(found.as_str()) {
            return Ok(names);
        }
    }

    Err(NameCheckError::generation(
        "could not parse name suggestions from the response",
    ))
}

fn tone_description(tone: ToneStyle) -> &'static str {
    match tone {
        ToneStyle::Modern => "innovative, cutting-edge, sleek, minimalist, tech-forward",
        ToneStyle::Friendly => "approachable, warm, welcoming, human, inviting",
        ToneStyle::Professional => "trustworthy, established, serious, reliable, corporate",
        ToneStyle::Playful => "fun, creative, energetic, quirky, memorable",
        ToneStyle::Luxurious => "premium, exclusive, elegant, sophisticated, refined",
        ToneStyle::Bold => "strong, confident, powerful, assertive, impactful",
    }
}

fn style_description(style: NameStyle) -> &'static str {
    match style {
        NameStyle::RealWords => {
            "actual dictionary words that relate to the product (like Slack, Apple, Square, Notion)"
        }
        NameStyle::Invented => {
            "made-up but phonetically pleasing words that feel memorable (like Spotify, Kodak, Xerox, Hulu)"
        }
        NameStyle::Compound => {
            "two words cleverly combined into one (like Facebook, YouTube, Snapchat, WordPress)"
        }
        NameStyle::Abstract => {
            "evocative names that suggest rather than describe (like Amazon, Nike, Oracle, Uber)"
        }
        NameStyle::Any => {
            "a creative mix of styles including real words, invented words, and compound words"
        }
    }
}

fn length_guideline(length: NameLength) -> &'static str {
    match length {
        NameLength::Short => "1-5 letters, ultra-punchy and easy to remember",
        NameLength::Medium => "6-8 letters, balanced length that works well for brands",
        NameLength::Long => "9+ letters, more descriptive but still memorable",
        NameLength::Any => "whatever length works best for each name concept",
    }
}

fn product_type_label(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::App => "app",
        ProductType::Saas => "saas",
        ProductType::Website => "website",
        ProductType::Physical => "physical",
        ProductType::Service => "service",
        ProductType::Other => "other",
    }
}

/// Build the first-round prompt for a brief.
pub(crate) fn build_prompt(brief: &NameBrief) -> String {
    let mut sections = Vec::new();

    sections.push(
        "You are an expert brand naming consultant with 20 years of experience creating \
         memorable product names. Generate 10 unique name ideas based on the following brief:"
            .to_string(),
    );

    sections.push(format!(
        "\n## Product Details\n\
         - **Type**: {}\n\
         - **Description**: {}\n\
         - **Industry**: {}\n\
         - **Target Audience**: {}",
        product_type_label(brief.product_type),
        brief.description,
        brief.industry,
        brief.target_audience
    ));

    sections.push(format!(
        "\n## Name Requirements\n\
         - **Tone**: {}\n\
         - **Style**: {}\n\
         - **Length**: {}",
        tone_description(brief.tone_style),
        style_description(brief.name_style),
        length_guideline(brief.name_length)
    ));

    if !brief.keywords.is_empty() || !brief.themes.is_empty() {
        let mut creative = "\n## Creative Direction".to_string();
        if !brief.keywords.is_empty() {
            creative.push_str(&format!(
                "\n- **Keywords to incorporate or draw from**: {}",
                brief.keywords.join(", ")
            ));
        }
        if !brief.themes.is_empty() {
            creative.push_str(&format!(
                "\n- **Themes/concepts to evoke**: {}",
                brief.themes.join(", ")
            ));
        }
        sections.push(creative);
    }

    if !brief.avoid_words.is_empty() {
        sections.push(format!(
            "\n## Words/Sounds to AVOID\n{}",
            bullet_list(&brief.avoid_words)
        ));
    }

    if !brief.competitors.is_empty() {
        sections.push(format!(
            "\n## Competitor Names (differentiate from these)\n{}\n\
             Make sure the names are distinctly different from these competitors while still \
             fitting the industry.",
            bullet_list(&brief.competitors)
        ));
    }

    sections.push(format!(
        "\n## Requirements for Each Name\n\
         1. Must be easy to spell and pronounce\n\
         2. Should work well as a domain name (consider .com availability)\n\
         3. Should be legally defensible (avoid generic terms)\n\
         4. Must feel appropriate for the {} industry\n\
         5. Should resonate with {}\n\n\
         ## Output Format\n\
         Respond with a JSON array containing exactly 10 name objects. Each object should have:\n\
         - \"name\": The suggested name (1-2 words max)\n\
         - \"reasoning\": A brief explanation of why this name works (1 sentence)\n\n\
         Example format:\n\
         [\n\
           {{\"name\": \"Lumina\", \"reasoning\": \"Evokes light and clarity, perfect for an innovative solution\"}},\n\
           {{\"name\": \"SwiftHub\", \"reasoning\": \"Combines speed with connectivity, appealing to tech users\"}}\n\
         ]\n\n\
         Return ONLY the JSON array, no other text or markdown formatting.",
        brief.industry, brief.target_audience
    ));

    sections.join("\n")
}

/// Build the follow-up prompt: same brief, avoid previous names, honor
/// user feedback when present.
pub(crate) fn build_iterative_prompt(
    brief: &NameBrief,
    previous_names: &[String],
    feedback: Option<&str>,
) -> String {
    let mut sections = Vec::new();

    sections.push(
        "You are an expert brand naming consultant. We're continuing a naming session. \
         Generate 10 NEW and DIFFERENT name ideas based on the brief below."
            .to_string(),
    );

    sections.push(format!(
        "\n## Product Brief\n\
         - **Type**: {}\n\
         - **Description**: {}\n\
         - **Industry**: {}\n\
         - **Target Audience**: {}\n\
         - **Tone**: {}\n\
         - **Style**: {}\n\
         - **Length**: {}",
        product_type_label(brief.product_type),
        brief.description,
        brief.industry,
        brief.target_audience,
        tone_description(brief.tone_style),
        style_description(brief.name_style),
        length_guideline(brief.name_length)
    ));

    if !previous_names.is_empty() {
        sections.push(format!(
            "\n## Previously Suggested Names (DO NOT repeat these or similar variations)\n{}",
            bullet_list(previous_names)
        ));
    }

    if let Some(feedback) = feedback {
        sections.push(format!(
            "\n## User Feedback / Direction\n\
             The user has provided the following guidance for this round:\n\
             \"{}\"\n\n\
             Please incorporate this feedback into your new suggestions. This is the most \
             important consideration for this round.",
            feedback
        ));
    }

    if !brief.keywords.is_empty() || !brief.themes.is_empty() {
        let mut creative = "\n## Creative Direction".to_string();
        if !brief.keywords.is_empty() {
            creative.push_str(&format!("\n- **Keywords**: {}", brief.keywords.join(", ")));
        }
        if !brief.themes.is_empty() {
            creative.push_str(&format!("\n- **Themes**: {}", brief.themes.join(", ")));
        }
        sections.push(creative);
    }

    if !brief.avoid_words.is_empty() {
        sections.push(format!(
            "\n## Words/Sounds to AVOID\n{}",
            bullet_list(&brief.avoid_words)
        ));
    }

    sections.push(format!(
        "\n## Output Format\n\
         Respond with a JSON array containing exactly 10 NEW name objects. Each must be:\n\
         - Completely different from all previous suggestions\n\
         - Easy to spell and pronounce\n\
         - Appropriate for the {} industry\n\n\
         Format:\n\
         [\n\
           {{\"name\": \"ExampleName\", \"reasoning\": \"Brief explanation\"}}\n\
         ]\n\n\
         Return ONLY the JSON array, no other text.",
        brief.industry
    ));

    sections.join("\n")
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
