use serde::{Deserialize, Serialize};

/// Suffix appended to the keyword when seeding the placeholder image.
const IMAGE_SEED_SUFFIX: &str = "123";
const IMAGE_WIDTH: u32 = 1200;
const IMAGE_HEIGHT: u32 = 800;

/// One generated slide. Every field is required; a payload missing any of
/// them (or carrying `null`) fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideContent {
    pub title: String,
    pub bullets: Vec<String>,
    pub highlight: String,
    /// Single lowercase word used to seed the placeholder image.
    pub image_keyword: String,
    pub notes: String,
}

/// Generated slides in display order.
pub type Presentation = Vec<SlideContent>;

/// Build the seeded placeholder image URL for a keyword.
///
/// The seed depends only on the keyword, so slides sharing a keyword share an image.
pub fn placeholder_image_url(host: &str, keyword: &str) -> String {
    format!(
        "{}/seed/{keyword}{IMAGE_SEED_SUFFIX}/{IMAGE_WIDTH}/{IMAGE_HEIGHT}",
        host.trim_end_matches('/')
    )
}

#[cfg(test)]
pub(crate) fn sample_slide(n: usize) -> SlideContent {
    SlideContent {
        title: format!("Slide {n}"),
        bullets: vec![format!("Point {n}.1"), format!("Point {n}.2")],
        highlight: format!("Takeaway {n}"),
        image_keyword: "molecule".to_string(),
        notes: format!("Notes for slide {n}"),
    }
}

#[cfg(test)]
pub(crate) fn sample_presentation(len: usize) -> Presentation {
    (0..len).map(sample_slide).collect()
}
