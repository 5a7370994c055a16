//! Combining two documents into a third.
//!
//! Later source wins: sections only in one input are copied over, sections
//! in both get the second input's keys on top of the first's. Entry sets are
//! deep-copied, so mutating an input afterwards never changes the result.

use super::{Document, Model};

impl Model {
    /// Lay `other` over `self`, `other` winning on key collisions.
    fn overlay(&mut self, other: &Model) {
        for (name, entries) in &other.sections {
            match self.sections.get_mut(name) {
                Some(existing) => {
                    for entry in entries {
                        existing.insert(entry.clone());
                    }
                }
                None => {
                    self.sections.insert(name.clone(), entries.clone());
                }
            }
        }
        for (name, comment) in &other.section_comments {
            if !comment.is_empty() {
                self.section_comments.insert(name.clone(), comment.clone());
            }
        }
        if !other.trailing_comment.is_empty() {
            self.trailing_comment = other.trailing_comment.clone();
        }
        self.included.extend(other.included.iter().cloned());
    }
}

impl Document {
    /// Build a fresh document from `self` overlaid with `other`.
    pub fn merge(&self, other: &Document) -> Document {
        // First guard is released here; `a.merge(&a)` takes the lock twice.
        let mut model = self.read().clone();
        model.overlay(&other.read());
        Document::from_model(model)
    }
}

/// Merge two optional documents.
///
/// Two `None` give `None`; a single document is returned as is.
pub fn merge_optional(first: Option<Document>, second: Option<Document>) -> Option<Document> {
    match (first, second) {
        (None, None) => None,
        (Some(doc), None) | (None, Some(doc)) => Some(doc),
        (Some(first), Some(second)) => Some(first.merge(&second)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: &[(&str, &str, &str)]) -> Document {
        let doc = Document::new();
        for (section, key, value) in pairs {
            doc.add_entry(section, key, value);
        }
        doc
    }

    #[test]
    fn test_merge_unions_keys_of_shared_section() {
        let a = doc(&[("s", "k1", "1")]);
        let b = doc(&[("s", "k2", "2")]);

        let merged = a.merge(&b);
        assert_eq!(merged.get_string("s::k1").unwrap(), "1");
        assert_eq!(merged.get_string("s::k2").unwrap(), "2");
    }

    #[test]
    fn test_merge_later_source_wins() {
        let a = doc(&[("s", "k1", "1")]);
        let b = doc(&[("s", "k1", "3"), ("s", "k2", "2")]);

        let merged = a.merge(&b);
        assert_eq!(merged.get_string("s::k1").unwrap(), "3");
        assert_eq!(a.get_string("s::k1").unwrap(), "1");
    }

    #[test]
    fn test_merge_result_is_independent_of_inputs() {
        let a = doc(&[("only_a", "k", "a")]);
        let b = doc(&[("only_b", "k", "b")]);
        let merged = a.merge(&b);

        a.add_entry("only_a", "k", "changed");
        b.delete_section("only_b");

        assert_eq!(merged.get_string("only_a::k").unwrap(), "a");
        assert_eq!(merged.get_string("only_b::k").unwrap(), "b");
    }

    #[test]
    fn test_merge_comments() {
        let a = Document::new();
        a.set_section_comment("s", "# from a").set_trailing_comment("# end a");
        let b = Document::new();
        b.set_section_comment("s", "# from b");

        let merged = a.merge(&b);
        assert_eq!(merged.section_comment("s").as_deref(), Some("# from b"));
        assert_eq!(merged.trailing_comment(), "# end a");
    }

    #[test]
    fn test_merge_with_itself() {
        let a = doc(&[("s", "k", "v")]);
        let merged = a.merge(&a);
        assert_eq!(merged.get_string("s::k").unwrap(), "v");
    }

    #[test]
    fn test_merge_optional() {
        assert!(merge_optional(None, None).is_none());

        let only = merge_optional(Some(doc(&[("", "a", "1")])), None).unwrap();
        assert_eq!(only.get_string("a").unwrap(), "1");

        let only = merge_optional(None, Some(doc(&[("", "b", "2")]))).unwrap();
        assert_eq!(only.get_string("b").unwrap(), "2");

        let both = merge_optional(
            Some(doc(&[("", "a", "1")])),
            Some(doc(&[("", "a", "9")])),
        )
        .unwrap();
        assert_eq!(both.get_string("a").unwrap(), "9");
    }
}
