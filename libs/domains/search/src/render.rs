//! HTML fragments for search matches.
//!
//! Fields render in a fixed order (text, title, url, source) followed by the
//! relevance line. A match with none of those fields renders as a single
//! placeholder line carrying the score.

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::error::SearchResult;
use crate::models::Match;

const RESULT_TEMPLATE: &str = "result";
const PLACEHOLDER_TEMPLATE: &str = "placeholder";

const RESULT_SOURCE: &str = concat!(
    "{{#if text}}<div class=\"text-lg font-semibold mb-2\">{{text}}</div>{{/if}}",
    "{{#if title}}<div class=\"text-sm text-gray-400 mb-2\">Title: {{title}}</div>{{/if}}",
    "{{#if url}}<div class=\"text-sm text-blue-400 mb-2\">",
    "<a href=\"{{url}}\" target=\"_blank\" rel=\"noopener noreferrer\">{{url}}</a></div>{{/if}}",
    "{{#if source}}<div class=\"text-sm text-gray-500 mb-2\">Source: {{source}}</div>{{/if}}",
    "<div class=\"text-xs text-gray-600\">Relevance Score: {{relevance}}%</div>",
);

const PLACEHOLDER_SOURCE: &str =
    "<div class=\"text-gray-400\">No metadata available (Score: {{relevance}}%)</div>";

/// Metadata keys rendered into a result, in output order
const RENDERED_FIELDS: [&str; 4] = ["text", "title", "url", "source"];

/// How metadata values are inserted into the fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataEscaping {
    /// HTML-escape every interpolated value
    #[default]
    Escape,
    /// Insert values verbatim; only for indexes whose content is trusted markup
    Trusted,
}

/// Renders matches into HTML fragments
pub struct ResultRenderer {
    handlebars: Handlebars<'static>,
}

impl ResultRenderer {
    pub fn new(escaping: MetadataEscaping) -> SearchResult<Self> {
        let mut handlebars = Handlebars::new();
        if escaping == MetadataEscaping::Trusted {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        handlebars.register_template_string(RESULT_TEMPLATE, RESULT_SOURCE)?;
        handlebars.register_template_string(PLACEHOLDER_TEMPLATE, PLACEHOLDER_SOURCE)?;

        Ok(Self { handlebars })
    }

    pub fn render(&self, m: &Match) -> SearchResult<String> {
        let mut context = Map::new();
        for key in RENDERED_FIELDS {
            if let Some(value) = m.field(key) {
                context.insert(key.to_string(), Value::String(value));
            }
        }

        let template = if context.is_empty() {
            PLACEHOLDER_TEMPLATE
        } else {
            RESULT_TEMPLATE
        };
        context.insert("relevance".to_string(), Value::String(relevance(m.score)));

        Ok(self.handlebars.render(template, &Value::Object(context))?)
    }
}

/// Score as a percentage with one decimal place, ties rounded away from zero
fn relevance(score: f64) -> String {
    let percent = score * 100.0;
    format!("{:.1}", (percent * 10.0).round() / 10.0)
}
