use anyhow::{Context, Result};
use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::extract::first_json_array;
use crate::models::NewsStory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    Global,
    Legal,
}

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    tools: Vec<Tool>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    max_uses: u32,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

/// With web search enabled the response interleaves tool-use blocks with text
/// blocks; only the text carries the story list.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub struct NewsClient {
    client: Client,
    api_key: String,
}

impl NewsClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_key })
    }

    /// Search for today's top five stories in the given category.
    ///
    /// When the model answers without any recoverable JSON array, this
    /// returns the placeholder story set rather than an error: the briefing
    /// front-end renders a degraded panel instead of failing the whole view.
    pub async fn fetch_stories(&self, category: NewsCategory) -> Result<Vec<NewsStory>> {
        let prompt = match category {
            NewsCategory::Global => global_news_prompt(),
            NewsCategory::Legal => legal_news_prompt(),
        };

        let request = ClaudeRequest {
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 2048,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            tools: vec![Tool {
                kind: "web_search_20250305".to_string(),
                name: "web_search".to_string(),
                max_uses: 5,
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Claude API error: {}", error_text);
        }

        let claude_response = response
            .json::<ClaudeResponse>()
            .await
            .context("Failed to parse Claude API response")?;

        let response_text = claude_response
            .content
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        parse_stories(&response_text)
    }
}

/// Recover the story list from free-form model output.
///
/// No array at all degrades to the placeholder set; an array that exists but
/// does not deserialize is a hard failure (the model produced something that
/// looks like our format but isn't, and silently dropping it would hide bugs
/// in the prompt).
fn parse_stories(response_text: &str) -> Result<Vec<NewsStory>> {
    let Some(json_text) = first_json_array(response_text) else {
        warn!("News search returned no JSON array, serving placeholder stories");
        return Ok(placeholder_stories());
    };

    let stories: Vec<NewsStory> =
        serde_json::from_str(json_text).context("Failed to parse news stories JSON")?;

    Ok(stories)
}

/// Deterministic stand-in served when the model output had no story list.
fn placeholder_stories() -> Vec<NewsStory> {
    (0..5)
        .map(|_| NewsStory {
            title: "News Unavailable".to_string(),
            summary: "News could not be retrieved at this time. Please try again later."
                .to_string(),
            url: String::new(),
            source: "System".to_string(),
            image_url: String::new(),
        })
        .collect()
}

fn global_news_prompt() -> String {
    r#"Search the web for today's top world news. Select the 5 most significant stories across politics, economics, science, and technology.

Respond with ONLY a JSON array of exactly 5 objects, each shaped as:
{"title": "...", "summary": "...", "url": "...", "source": "...", "imageUrl": "..."}

Rules:
- "summary" is 1-2 sentences, factual, no editorializing
- "source" is the publication name
- "imageUrl" is the story's lead image URL, or "" if none
- No text before or after the array"#
        .to_string()
}

fn legal_news_prompt() -> String {
    r#"Search the web for today's news, prioritizing in this order:
1. Legal technology and the business of law
2. Major litigation and regulatory actions affecting the technology industry
3. Notable general technology news

Select the 5 most significant stories. Respond with ONLY a JSON array of exactly 5 objects, each shaped as:
{"title": "...", "summary": "...", "url": "...", "source": "...", "imageUrl": "..."}

Rules:
- "summary" is 1-2 sentences, factual, no editorializing
- "source" is the publication name
- "imageUrl" is the story's lead image URL, or "" if none
- No text before or after the array"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_story_array() -> String {
        let stories: Vec<String> = (1..=5)
            .map(|i| {
                format!(
                    r#"{{"title": "Story {i}", "summary": "Summary {i}", "url": "https://example.com/{i}", "source": "Example Wire", "imageUrl": ""}}"#
                )
            })
            .collect();
        format!("[{}]", stories.join(","))
    }

    #[test]
    fn parses_array_with_surrounding_prose() {
        let text = format!(
            "I searched the web and found these stories:\n\n{}\n\nThese are today's highlights.",
            five_story_array()
        );
        let stories = parse_stories(&text).unwrap();
        assert_eq!(stories.len(), 5);
        assert_eq!(stories[0].title, "Story 1");
        assert_eq!(stories[4].source, "Example Wire");
    }

    #[test]
    fn missing_image_url_defaults_to_empty() {
        let text = r#"[{"title": "T", "summary": "S", "url": "https://example.com", "source": "Wire"}]"#;
        let stories = parse_stories(text).unwrap();
        assert_eq!(stories[0].image_url, "");
    }

    #[test]
    fn no_array_degrades_to_placeholders() {
        let stories = parse_stories("I'm sorry, I couldn't find any news today.").unwrap();
        assert_eq!(stories.len(), 5);
        assert!(stories.iter().all(|s| s.source == "System"));
        assert!(stories.iter().all(|s| s.title == "News Unavailable"));
    }

    #[test]
    fn malformed_array_is_a_hard_failure() {
        // An array exists but the elements are the wrong shape.
        let text = r#"Here you go: [{"headline": 42}]"#;
        assert!(parse_stories(text).is_err());
    }

    #[test]
    fn unparseable_json_inside_array_is_a_hard_failure() {
        let text = r#"[{"title": "A" "summary": "missing comma"}]"#;
        assert!(parse_stories(text).is_err());
    }
}
