//! Social share intent formatting.

use crate::model::story::StoryContent;

/// Host hook that opens a URL in a new browsing context.
///
/// Fire-and-forget: no response is observed.
pub trait IntentOpener {
    fn open(&mut self, url: &str);
}

/// Share text: title, blank line, body, blank line, `By: <byline>`.
pub fn share_message(content: &StoryContent) -> String {
    format!(
        "{}\n\n{}\n\nBy: {}",
        content.title, content.text, content.byline
    )
}

/// Builds `<intent_base>?text=<url-encoded share message>`.
pub fn share_intent_url(intent_base: &str, content: &StoryContent) -> String {
    let message = share_message(content);
    format!("{intent_base}?text={}", urlencoding::encode(message.as_str()))
}

#[cfg(test)]
mod tests {
    use super::{share_intent_url, share_message};
    use crate::model::story::StoryContent;

    fn sample() -> StoryContent {
        StoryContent {
            title: "Night Bus".to_string(),
            byline: "Jane Doe".to_string(),
            text: "It rained & nobody spoke.".to_string(),
            image: None,
        }
    }

    #[test]
    fn message_joins_title_body_and_byline() {
        assert_eq!(
            share_message(&sample()),
            "Night Bus\n\nIt rained & nobody spoke.\n\nBy: Jane Doe"
        );
    }

    #[test]
    fn intent_url_percent_encodes_message() {
        let url = share_intent_url("https://twitter.com/intent/tweet", &sample());
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?text=Night%20Bus%0A%0AIt%20rained%20%26%20nobody%20spoke.%0A%0ABy%3A%20Jane%20Doe"
        );
    }
}
