pub mod error;
pub mod gemini;
pub mod prompt;

use crate::slide::Presentation;

pub use error::{GenerationError, Result};
pub use gemini::GeminiClient;

/// Anything able to produce a complete presentation in one attempt.
pub trait SlideSource: Send + Sync {
    fn generate(&self) -> Result<Presentation>;
}

/// Parse the structured-output text into slides.
///
/// Strict: a syntax error, a missing field or a `null` anywhere fails the whole
/// payload. Order and field contents are kept exactly as received.
pub fn parse_slides(text: &str) -> Result<Presentation> {
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let slides: Presentation = serde_json::from_str(text)?;
    Ok(slides)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SLIDES: &str = r#"[
        {
            "title": "  Catalysis ",
            "bullets": ["Lower activation energy", "Fewer by-products", "Milder conditions"],
            "highlight": "Catalysts cut process energy by up to 30%",
            "imageKeyword": "catalyst",
            "notes": "Explain heterogeneous vs homogeneous catalysis."
        },
        {
            "title": "Renewable Feedstocks",
            "bullets": ["Biomass", "CO2 utilisation", "Waste valorisation", "Algae"],
            "highlight": "Carbon from the air, not the ground",
            "imageKeyword": "forest",
            "notes": "Mention lignin."
        }
    ]"#;

    #[test]
    fn test_parse_preserves_order_and_fields() {
        let slides = parse_slides(TWO_SLIDES).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "  Catalysis ");
        assert_eq!(slides[0].bullets.len(), 3);
        assert_eq!(slides[0].image_keyword, "catalyst");
        assert_eq!(slides[1].title, "Renewable Feedstocks");
        assert_eq!(slides[1].bullets[3], "Algae");
        assert_eq!(slides[1].notes, "Mention lignin.");
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(matches!(parse_slides(""), Err(GenerationError::EmptyResponse)));
        assert!(matches!(
            parse_slides("  \n"),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_syntax_error() {
        let err = parse_slides("[{\"title\": ").unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn test_parse_missing_field_in_any_element() {
        let text = r#"[
            {"title": "A", "bullets": [], "highlight": "h", "imageKeyword": "k", "notes": "n"},
            {"title": "B", "bullets": [], "highlight": "h", "imageKeyword": "k"}
        ]"#;
        let err = parse_slides(text).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
        assert!(err.to_string().contains("notes"));
    }

    #[test]
    fn test_parse_null_field_rejected() {
        let text = r#"[{"title": null, "bullets": [], "highlight": "h",
            "imageKeyword": "k", "notes": "n"}]"#;
        assert!(matches!(
            parse_slides(text),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_wrong_shape_rejected() {
        let text = r#"{"title": "A", "bullets": [], "highlight": "h",
            "imageKeyword": "k", "notes": "n"}"#;
        assert!(matches!(
            parse_slides(text),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_bullets_must_be_strings() {
        let text = r#"[{"title": "A", "bullets": [1, 2], "highlight": "h",
            "imageKeyword": "k", "notes": "n"}]"#;
        assert!(matches!(
            parse_slides(text),
            Err(GenerationError::Malformed(_))
        ));
    }
}
