// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Evaluation of [`TagOperation`]s filtering hooks.

use gherkin::tagexpr::TagOperation;
use sealed::sealed;

/// Extension of a [`TagOperation`] allowing to evaluate it against the tags
/// of a scenario.
#[sealed]
pub trait Ext {
    /// Indicates whether the given `tags` (stored without their leading `@`)
    /// satisfy this [`TagOperation`].
    #[must_use]
    fn eval<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone;
}

#[sealed]
impl Ext for TagOperation {
    fn eval<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone,
    {
        match self {
            Self::And(l, r) => l.eval(tags.clone()) && r.eval(tags),
            Self::Or(l, r) => l.eval(tags.clone()) || r.eval(tags),
            Self::Not(t) => !t.eval(tags),
            Self::Tag(t) => tags.into_iter().any(|tag| tag.as_ref() == t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(expr: &str) -> TagOperation {
        expr.parse().unwrap()
    }

    #[test]
    fn matches_hook_tags() {
        let tags = ["withBefore", "slow"];

        assert!(op("@withBefore").eval(tags));
        assert!(!op("@withAfter").eval(tags));
        assert!(op("@withBefore and @slow").eval(tags));
        assert!(op("@withAfter or @slow").eval(tags));
        assert!(!op("not @slow").eval(tags));
        assert!(op("not @withAfter").eval(tags));
    }

    #[test]
    fn nothing_matches_untagged_scenario() {
        assert!(!op("@withBefore").eval(Vec::<String>::new()));
        assert!(op("not @withBefore").eval(&[] as &[String]));
    }
}
