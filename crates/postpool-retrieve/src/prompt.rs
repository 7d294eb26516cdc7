//! Few-shot prompt block formatting for the generation wrapper.

use postpool_core::NormalizedPost;

/// Render retrieved posts as numbered example blocks, ready to splice into
/// a generation prompt.
pub fn format_examples<'a>(posts: impl IntoIterator<Item = &'a NormalizedPost>) -> String {
    posts
        .into_iter()
        .enumerate()
        .map(|(i, p)| format!("Example {}:\n\n{}", i + 1, p.text))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use postpool_core::{Language, PostMetadata};
    use serde_json::Map;

    fn post(text: &str) -> NormalizedPost {
        NormalizedPost::from_parts(
            text.into(),
            PostMetadata {
                line_count: 1,
                language: Language::English,
                tags: vec![],
            },
            Map::new(),
        )
    }

    #[test]
    fn numbers_and_separates_examples() {
        let posts = [post("first"), post("second")];
        let block = format_examples(posts.iter());
        assert_eq!(block, "Example 1:\n\nfirst\n\n---\n\nExample 2:\n\nsecond");
    }

    #[test]
    fn empty_input_renders_empty_block() {
        let none: [NormalizedPost; 0] = [];
        assert_eq!(format_examples(none.iter()), "");
    }
}
