use crate::selector::ast::{Combinator, ComplexSelector, Compound, SelectorList};

/// An element as seen by the selector matcher.
///
/// Navigation must stay inside the subject's own tree: `parent` returns
/// `None` at a shadow root or document root, which is what keeps matching
/// from leaking across boundaries.
pub trait Subject: Copy {
    /// Lowercase tag name; `None` for anything that is not an element.
    fn local_name(&self) -> Option<&str>;
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Parent element within the same tree.
    fn parent(&self) -> Option<Self>;
    /// Closest preceding sibling element.
    fn previous_sibling(&self) -> Option<Self>;
}

impl SelectorList {
    pub fn matches<S: Subject>(&self, subject: S) -> bool {
        subject.local_name().is_some() && self.selectors.iter().any(|s| s.matches(subject))
    }
}

impl ComplexSelector {
    pub fn matches<S: Subject>(&self, subject: S) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(n - 1, subject),
        }
    }

    fn matches_at<S: Subject>(&self, index: usize, subject: S) -> bool {
        if !self.compounds[index].matches(subject) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let next = index - 1;
        match self.combinators[next] {
            Combinator::Child => subject.parent().is_some_and(|p| self.matches_at(next, p)),
            Combinator::NextSibling => subject
                .previous_sibling()
                .is_some_and(|s| self.matches_at(next, s)),
            Combinator::Descendant => {
                successors(subject, S::parent).any(|ancestor| self.matches_at(next, ancestor))
            }
            Combinator::SubsequentSibling => successors(subject, S::previous_sibling)
                .any(|sibling| self.matches_at(next, sibling)),
        }
    }
}

impl Compound {
    pub fn matches<S: Subject>(&self, subject: S) -> bool {
        let Some(name) = subject.local_name() else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(name) {
                return false;
            }
        }

        let id = subject.attribute("id");
        if !self.ids.iter().all(|want| id == Some(want.as_str())) {
            return false;
        }

        let classes = subject.attribute("class").unwrap_or("");
        if !self
            .classes
            .iter()
            .all(|want| classes.split_ascii_whitespace().any(|c| c == want))
        {
            return false;
        }

        self.attributes.iter().all(|attr| {
            match (subject.attribute(&attr.name), &attr.test) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some((op, expected))) => op.test(actual, expected),
            }
        })
    }
}

/// Iterate `step` from `start`, excluding `start` itself.
fn successors<S: Copy>(start: S, step: fn(&S) -> Option<S>) -> impl Iterator<Item = S> {
    std::iter::successors(step(&start), move |s| step(s))
}
