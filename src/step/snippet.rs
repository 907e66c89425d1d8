// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Snippets of [`Step`] definitions for undefined [`gherkin::Step`]s.
//!
//! [`Step`]: super::Step

use gherkin::StepType;
use lazy_regex::regex;
use once_cell::sync::Lazy;
use regex::Regex;

/// Generates a [`Collection`] builder call defining the given undefined
/// [`gherkin::Step`], ready to be pasted into glue code. The step itself is
/// kept above it as a comment.
///
/// Integers become `(\d+)` groups and double-quoted strings become
/// `"([^"]*)"` groups, everything else is matched literally.
///
/// [`Collection`]: super::Collection
#[must_use]
pub fn snippet(step: &gherkin::Step) -> String {
    /// [`Regex`] matching parts of a step text turned into capturing groups.
    static PARAM_REGEX: &Lazy<Regex> = regex!(r#""[^"]*"|\d+"#);

    let mut pattern = String::from("^");
    let mut last = 0;
    for m in PARAM_REGEX.find_iter(&step.value) {
        pattern.push_str(&regex::escape(&step.value[last..m.start()]));
        pattern.push_str(if m.as_str().starts_with('"') {
            r#""([^"]*)""#
        } else {
            r"(\d+)"
        });
        last = m.end();
    }
    pattern.push_str(&regex::escape(&step.value[last..]));
    pattern.push('$');

    let method = match step.ty {
        StepType::Given => "given",
        StepType::When => "when",
        StepType::Then => "then",
    };

    format!(
        "// {} {}\n\
         .{method}(Regex::new(r#\"{pattern}\"#)?, |world, ctx| {{\n    \
             todo!(\"turn the phrase above into concrete actions\")\n\
         }})",
        step.keyword.trim_end(),
        step.value,
    )
}
