// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! HTML fragments shared by [`Report`] and [`Page`].
//!
//! Only structural markup is emitted unescaped. Every piece of text coming
//! from a feature file or a step definition goes through [`escape()`].
//!
//! [`Page`]: super::Page
//! [`Report`]: super::Report

use std::{borrow::Cow, io};

use derive_more::with_trait::Display;
use itertools::Itertools as _;

use crate::event;

use super::out::WriteStrExt as _;

/// Heading level of a rendered [`event::Heading`].
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Level {
    /// Features.
    #[display("h3")]
    H3,

    /// Rules, backgrounds, scenarios, outlines and examples captions.
    #[display("h4")]
    H4,

    /// Instantiated scenario outline rows.
    #[display("h5")]
    H5,
}

/// Escapes `&`, `<`, `>`, `"` and `'` in the given `text`.
///
/// Borrows the `text` back if there is nothing to escape.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Escapes the given `text` and turns its line breaks into `<br/>`.
#[must_use]
pub fn escape_lines(text: &str) -> String {
    text.lines().map(escape).join("<br/>")
}

/// Writes the given [`event::Heading`] as `<hN>keyword: name</hN>`, followed
/// by a paragraph with its description, if the description isn't blank.
///
/// # Errors
///
/// If the `out`put fails to be written.
pub fn write_heading(
    out: &mut impl io::Write,
    level: Level,
    heading: &event::Heading,
) -> io::Result<()> {
    out.write_str(format!(
        "<{level}>{}: {}</{level}>",
        escape(&heading.keyword),
        escape(&heading.name),
    ))?;
    if let Some(description) = heading.description() {
        out.write_str(format!(
            "<p style='white-space: pre-line'>{}</p>",
            escape(description.trim()),
        ))?;
    }
    Ok(())
}

/// Renders the title of a scenario instantiated from an [`event::Examples`]
/// row: `keyword: h1 = v1, h2 = v2`.
///
/// Header names and `cells` are zipped, so the shorter one bounds the output.
#[must_use]
pub fn example_title(
    keyword: &str,
    header: &[String],
    cells: &[String],
) -> String {
    let mut title = format!("{}: ", escape(keyword));
    let pairs = header
        .iter()
        .zip(cells)
        .map(|(name, value)| format!("{} = {}", escape(name), escape(value)))
        .join(", ");
    title.push_str(&pairs);
    title
}

/// Writes the given `rows` as a `<table>`, the first one being the header.
///
/// # Errors
///
/// If the `out`put fails to be written.
pub fn write_table(
    out: &mut impl io::Write,
    rows: &[Vec<String>],
) -> io::Result<()> {
    let cells = |row: &[String], tag: &str| {
        row.iter()
            .map(|cell| format!("<{tag}>{}</{tag}>", escape(cell)))
            .join("")
    };

    let mut rows = rows.iter();
    let header = rows
        .next()
        .map(|h| format!("<tr>{}</tr>", cells(h, "th")))
        .unwrap_or_default();
    let data = rows.map(|r| format!("<tr>{}</tr>", cells(r, "td"))).join("");
    out.write_str(format!("<table>{header}{data}</table>"))
}

#[cfg(test)]
mod tests {
    use crate::writer::out::WritableString;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("a < b && c > \"d\" 'e'"),
            "a &lt; b &amp;&amp; c &gt; &quot;d&quot; &#39;e&#39;",
        );
    }

    #[test]
    fn borrows_plain_text() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn escapes_lines() {
        assert_eq!(escape_lines("a<b\nc&d"), "a&lt;b<br/>c&amp;d");
    }

    #[test]
    fn heading_without_description() {
        let mut out = WritableString::default();
        write_heading(&mut out, Level::H4, &event::Heading::new("Scenario", "x"))
            .unwrap();
        assert_eq!(out.0, "<h4>Scenario: x</h4>");
    }

    #[test]
    fn heading_with_description() {
        let mut out = WritableString::default();
        let heading = event::Heading::new("Feature", "<f>")
            .with_description("line 1\nline 2");
        write_heading(&mut out, Level::H3, &heading).unwrap();
        assert_eq!(
            out.0,
            "<h3>Feature: &lt;f&gt;</h3>\
             <p style='white-space: pre-line'>line 1\nline 2</p>",
        );
    }

    #[test]
    fn example_title_zips_header_and_cells() {
        let header = ["start".to_owned(), "eat".to_owned()];
        let cells = ["12".to_owned(), "5".to_owned()];
        assert_eq!(
            example_title("Examples", &header, &cells),
            "Examples: start = 12, eat = 5",
        );
    }

    #[test]
    fn table_renders_header_cells_apart() {
        let mut out = WritableString::default();
        let rows = vec![
            vec!["a".to_owned(), "b".to_owned()],
            vec!["1".to_owned(), "<2>".to_owned()],
        ];
        write_table(&mut out, &rows).unwrap();
        assert_eq!(
            out.0,
            "<table><tr><th>a</th><th>b</th></tr>\
             <tr><td>1</td><td>&lt;2&gt;</td></tr></table>",
        );
    }
}
