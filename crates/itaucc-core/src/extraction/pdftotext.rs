use crate::error::ItauccError;
use crate::extraction::{BBox, PageLayout, PdfExtractor, StatementDocument, TextSpan};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to keep the column alignment of statement lines,
/// and `pdftotext -bbox-layout` for the word boxes used by positional reads.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<StatementDocument, ItauccError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ItauccError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ItauccError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext(&tmp_path, LAYOUT_ARGS)?;
        let xml = run_pdftotext(&tmp_path, &["-bbox-layout"])?;
        let pages = parse_bbox_xml(&xml);

        debug!(
            chars = text.len(),
            pages = pages.len(),
            "extracted statement text with pdftotext"
        );

        Ok(StatementDocument { text, pages })
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Column-preserving text with `\n` line ends on every platform.
const LAYOUT_ARGS: &[&str] = &["-layout", "-eol", "unix"];

fn run_pdftotext(pdf_path: &Path, args: &[&str]) -> Result<String, ItauccError> {
    let output = Command::new("pdftotext")
        .args(args)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ItauccError::PdftotextNotFound
            } else {
                ItauccError::Extraction(format!("pdftotext {} failed: {}", args.join(" "), e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(ItauccError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pdftotext -bbox-layout` output into per-page word boxes.
///
/// pdftotext measures y from the top of the page; boxes are flipped to PDF
/// user space (origin bottom-left) using the page height.
fn parse_bbox_xml(xml: &str) -> Vec<PageLayout> {
    let mut pages: Vec<PageLayout> = Vec::new();

    for raw in xml.lines() {
        let line = raw.trim();

        if line.starts_with("<page ") {
            pages.push(PageLayout {
                page_number: pages.len() + 1,
                width: parse_attr_f32(line, "width").unwrap_or(0.0),
                height: parse_attr_f32(line, "height").unwrap_or(0.0),
                words: Vec::new(),
            });
            continue;
        }

        if line.starts_with("<word ") {
            let Some(page) = pages.last_mut() else {
                continue;
            };
            let (Some(bbox), Some(word_text)) = (parse_bbox(line), parse_word_text(line)) else {
                continue;
            };
            let text = decode_xml_entities(&word_text).trim().to_string();
            if text.is_empty() {
                continue;
            }
            page.words.push(TextSpan {
                bbox: BBox {
                    x_min: bbox.x_min,
                    y_min: page.height - bbox.y_max,
                    x_max: bbox.x_max,
                    y_max: page.height - bbox.y_min,
                },
                text,
            });
        }
    }

    pages
}

fn parse_attr_f32(tag: &str, name: &str) -> Option<f32> {
    parse_attr(tag, name)?.parse().ok()
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_bbox(tag: &str) -> Option<BBox> {
    Some(BBox {
        x_min: parse_attr_f32(tag, "xMin")?,
        y_min: parse_attr_f32(tag, "yMin")?,
        x_max: parse_attr_f32(tag, "xMax")?,
        y_max: parse_attr_f32(tag, "yMax")?,
    })
}

fn parse_word_text(word_tag: &str) -> Option<String> {
    let start = word_tag.find('>')? + 1;
    let end = word_tag.rfind("</word>")?;
    Some(word_tag.get(start..end)?.to_string())
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
