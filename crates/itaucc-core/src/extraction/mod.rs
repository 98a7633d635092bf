pub mod pdftotext;

use crate::error::ItauccError;
use serde::{Deserialize, Serialize};

/// Rectangle in PDF user space: points, origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    /// True if `other` lies entirely inside this box grown by `tolerance` on every side.
    pub fn contains(&self, other: &BBox, tolerance: f32) -> bool {
        other.x_min >= self.x_min - tolerance
            && other.y_min >= self.y_min - tolerance
            && other.x_max <= self.x_max + tolerance
            && other.y_max <= self.y_max + tolerance
    }
}

/// A fixed rectangular area on one page of a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// 1-based page number.
    pub page: usize,
    pub bbox: BBox,
    /// Slack in points applied around `bbox` when testing containment.
    #[serde(default)]
    pub tolerance: f32,
}

/// A word and where it sits on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub bbox: BBox,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_number: usize,
    pub width: f32,
    pub height: f32,
    pub words: Vec<TextSpan>,
}

/// Everything the parser needs from one statement PDF.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementDocument {
    /// Layout-preserving plain text of the whole document.
    pub text: String,
    pub pages: Vec<PageLayout>,
}

impl StatementDocument {
    /// Text of the words lying inside `region`, joined by single spaces.
    ///
    /// Returns `None` if the page does not exist or the region is empty.
    pub fn text_in_region(&self, region: &Region) -> Option<String> {
        let page = self.pages.iter().find(|p| p.page_number == region.page)?;

        let words: Vec<&str> = page
            .words
            .iter()
            .filter(|w| region.bbox.contains(&w.bbox, region.tolerance))
            .map(|w| w.text.as_str())
            .filter(|t| !t.trim().is_empty())
            .collect();

        if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        }
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the plain text and word boxes of a statement from PDF bytes.
    fn extract(&self, pdf_bytes: &[u8]) -> Result<StatementDocument, ItauccError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(x_min: f32, y_min: f32, x_max: f32, y_max: f32, text: &str) -> TextSpan {
        TextSpan {
            bbox: BBox {
                x_min,
                y_min,
                x_max,
                y_max,
            },
            text: text.to_string(),
        }
    }

    fn document() -> StatementDocument {
        StatementDocument {
            text: String::new(),
            pages: vec![PageLayout {
                page_number: 1,
                width: 612.0,
                height: 792.0,
                words: vec![
                    word(495.0, 725.0, 510.0, 733.0, "15"),
                    word(512.0, 725.0, 522.0, 733.0, "03"),
                    word(524.0, 725.0, 534.0, 733.0, "24"),
                    word(40.0, 700.0, 120.0, 710.0, "VISA"),
                ],
            }],
        }
    }

    fn region(page: usize, tolerance: f32) -> Region {
        Region {
            page,
            bbox: BBox {
                x_min: 493.5,
                y_min: 724.06,
                x_max: 541.5,
                y_max: 734.06,
            },
            tolerance,
        }
    }

    #[test]
    fn test_text_in_region_joins_contained_words() {
        let text = document().text_in_region(&region(1, 0.0));
        assert_eq!(text.as_deref(), Some("15 03 24"));
    }

    #[test]
    fn test_text_in_region_missing_page() {
        assert!(document().text_in_region(&region(2, 0.0)).is_none());
    }

    #[test]
    fn test_partially_outside_word_excluded_without_tolerance() {
        let mut doc = document();
        doc.pages[0].words = vec![word(490.0, 725.0, 510.0, 733.0, "15/03/24")];
        assert!(doc.text_in_region(&region(1, 0.0)).is_none());
        assert_eq!(
            doc.text_in_region(&region(1, 4.0)).as_deref(),
            Some("15/03/24")
        );
    }
}
