//! HTML summary report.

use featmatch_core::MatchTable;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportImage {
    /// Path relative to the report file.
    pub src: String,
    pub alt: String,
}

impl ReportImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLink {
    pub href: String,
    pub text: String,
}

impl ReportLink {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// A heading followed by a row of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub heading: String,
    pub images: Vec<ReportImage>,
}

/// How the matched subgraphs are presented.
#[derive(Debug, Clone, Copy)]
pub enum MatchSection<'a> {
    Table(&'a MatchTable),
    NoMatches,
}

#[derive(Debug, Clone)]
pub struct ReportDocument<'a> {
    pub title: String,
    pub heading: String,
    pub sections: Vec<ReportSection>,
    pub links_heading: String,
    pub links: Vec<ReportLink>,
    pub matches_heading: String,
    pub matches: MatchSection<'a>,
    /// Drawn under the match table (or the no-match notice).
    pub overlay: Option<ReportImage>,
}

pub const NO_MATCHES_TEXT: &str = "No matching subgraphs found";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; }
.image-container { display: flex; flex-wrap: wrap; }
.image-container img { margin: 10px; width: 45%; border: 1px solid #ddd; border-radius: 5px; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid black; padding: 8px; text-align: left; }
";

fn push_images(out: &mut String, images: &[ReportImage]) {
    out.push_str("<div class=\"image-container\">\n");
    for img in images {
        let _ = writeln!(
            out,
            "<img src=\"{}\" alt=\"{}\"/>",
            htmlize::escape_attribute(img.src.as_str()),
            htmlize::escape_attribute(img.alt.as_str())
        );
    }
    out.push_str("</div>\n");
}

fn push_table(out: &mut String, table: &MatchTable) {
    out.push_str("<table>\n<thead>\n<tr>");
    for h in &table.headers {
        let _ = write!(out, "<th>{}</th>", htmlize::escape_text(h.as_str()));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", htmlize::escape_text(cell.as_str()));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

pub fn render_report_html(doc: &ReportDocument<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        &mut out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n",
        htmlize::escape_text(doc.title.as_str())
    );
    let _ = writeln!(&mut out, "<h1>{}</h1>", htmlize::escape_text(doc.heading.as_str()));

    for section in &doc.sections {
        let _ = writeln!(
            &mut out,
            "<h2>{}</h2>",
            htmlize::escape_text(section.heading.as_str())
        );
        push_images(&mut out, &section.images);
    }

    if !doc.links.is_empty() {
        let _ = writeln!(
            &mut out,
            "<h2>{}</h2>",
            htmlize::escape_text(doc.links_heading.as_str())
        );
        out.push_str("<ul>\n");
        for link in &doc.links {
            let _ = writeln!(
                &mut out,
                "<li><a href=\"{}\">{}</a></li>",
                htmlize::escape_attribute(link.href.as_str()),
                htmlize::escape_text(link.text.as_str())
            );
        }
        out.push_str("</ul>\n");
    }

    let _ = writeln!(
        &mut out,
        "<h2>{}</h2>",
        htmlize::escape_text(doc.matches_heading.as_str())
    );
    match doc.matches {
        MatchSection::Table(table) => push_table(&mut out, table),
        MatchSection::NoMatches => {
            let _ = writeln!(&mut out, "<p class=\"no-matches\">{NO_MATCHES_TEXT}</p>");
        }
    }
    if let Some(img) = &doc.overlay {
        push_images(&mut out, std::slice::from_ref(img));
    }

    out.push_str("</body>\n</html>\n");
    out
}
