//! Minimal PDF writer for text-only reports.
//!
//! Produces a PDF 1.4 file with one catalog, one page tree, a page object and
//! a content stream per page, and a single shared Helvetica font. Objects are
//! accumulated first, then serialised in id order while their byte offsets
//! are recorded, and finally indexed by the cross-reference table.
//!
//! # Object numbering
//!
//! For `N` pages:
//!
//! - `1`: catalog
//! - `2`: page tree
//! - `3 ..= 2 + N`: pages
//! - `3 + N ..= 2 + 2N`: content streams
//! - `3 + 2N`: font

use std::fmt::Write as _;

use tracing::debug;

const HEADER: &str = "%PDF-1.4\n";
const MEDIA_BOX: &str = "[0 0 612 792]";
const TITLE_SIZE: u32 = 18;
const BODY_SIZE: u32 = 12;
/// Baseline-to-baseline distance used by `T*`.
const LEADING: u32 = 16;
const ORIGIN_X: u32 = 72;
const ORIGIN_Y: u32 = 740;

/// Identifier of an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn number(self) -> u32 {
        self.0
    }

    /// Indirect reference, e.g. `3 0 R`.
    pub fn reference(self) -> String {
        format!("{} 0 R", self.0)
    }
}

/// Accumulates indirect objects and serialises them with an xref table.
#[derive(Debug, Default)]
pub struct PdfBuilder {
    objects: Vec<Option<String>>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequential object id. Ids start at 1.
    pub fn allocate(&mut self) -> ObjectId {
        self.objects.push(None);
        ObjectId(self.objects.len() as u32)
    }

    /// Set the body of a previously allocated object.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by [`allocate`](Self::allocate).
    pub fn set(&mut self, id: ObjectId, content: impl Into<String>) {
        let slot = id
            .0
            .checked_sub(1)
            .and_then(|i| self.objects.get_mut(i as usize))
            .unwrap_or_else(|| panic!("object {} was never allocated", id.0));
        *slot = Some(content.into());
    }

    /// Allocate an object and set its body in one step.
    pub fn push(&mut self, content: impl Into<String>) -> ObjectId {
        let id = self.allocate();
        self.set(id, content);
        id
    }

    /// Number of allocated objects, excluding the free-list head.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialise all objects, the cross-reference table and the trailer.
    ///
    /// The root is object 1. Objects allocated but never set are written as
    /// `null` so the xref stays contiguous.
    pub fn finish(self) -> Vec<u8> {
        let mut out = String::from(HEADER);
        let mut offsets = Vec::with_capacity(self.objects.len());

        for (index, content) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            let body = content.as_deref().unwrap_or("null");
            // Writing to a String cannot fail.
            let _ = write!(out, "{} 0 obj\n{}\nendobj\n", index + 1, body);
        }

        let xref_offset = out.len();
        let size = offsets.len() + 1;
        let _ = write!(out, "xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &offsets {
            let _ = write!(out, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            out,
            "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF"
        );

        debug!(objects = offsets.len(), bytes = out.len(), "serialised PDF");
        out.into_bytes()
    }
}

/// Escape the literal-string delimiters `(`, `)` and `\`.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Content stream for one page: the title as a heading, then one body line
/// per entry.
fn content_stream(title: &str, lines: &[String]) -> String {
    let mut stream = format!(
        "BT /F1 {TITLE_SIZE} Tf {LEADING} TL {ORIGIN_X} {ORIGIN_Y} Td ({}) Tj",
        escape_text(title)
    );
    for line in lines {
        let _ = write!(stream, "\nT* /F1 {BODY_SIZE} Tf ({}) Tj", escape_text(line));
    }
    stream.push_str("\nET");
    stream
}

/// Build a text-only PDF with `title` repeated at the top of every page.
pub fn build(title: &str, pages: &[Vec<String>]) -> Vec<u8> {
    let mut pdf = PdfBuilder::new();

    let catalog = pdf.allocate();
    let tree = pdf.allocate();
    let page_ids: Vec<ObjectId> = pages.iter().map(|_| pdf.allocate()).collect();
    let content_ids: Vec<ObjectId> = pages.iter().map(|_| pdf.allocate()).collect();
    let font = pdf.allocate();

    pdf.set(catalog, format!("<< /Type /Catalog /Pages {} >>", tree.reference()));

    let kids: Vec<String> = page_ids.iter().map(|id| id.reference()).collect();
    pdf.set(
        tree,
        format!(
            "<< /Type /Pages /Count {} /Kids [{}] >>",
            pages.len(),
            kids.join(" ")
        ),
    );

    for ((lines, &page), &contents) in pages.iter().zip(&page_ids).zip(&content_ids) {
        pdf.set(
            page,
            format!(
                "<< /Type /Page /Parent {} /MediaBox {MEDIA_BOX} /Resources << /Font << /F1 {} >> >> /Contents {} >>",
                tree.reference(),
                font.reference(),
                contents.reference()
            ),
        );

        let stream = content_stream(title, lines);
        pdf.set(
            contents,
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ),
        );
    }

    pdf.set(font, "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");

    pdf.finish()
}
