//! Form value trees.
//!
//! A form's values are a tree of named fields: leaves hold text, branches are
//! named groups of further fields (e.g. `address`, `company`). Branch children
//! are reference-counted so that producing an updated tree only rebuilds the
//! nodes on the edited path; every sibling subtree is shared with the previous
//! tree rather than copied. Cloning a tree is therefore cheap, and a clone can
//! never be corrupted through edits to the original.

use super::path::FieldPath;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A node in a form value tree.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Group(BTreeMap<String, Arc<Value>>),
}

impl Value {
    /// Return a text leaf.
    ///
    pub fn text(text: impl Into<String>) -> Value {
        Value::Text(text.into())
    }

    /// Return a group branch from named entries.
    ///
    pub fn group<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Group(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), Arc::new(value)))
                .collect(),
        )
    }

    /// Return the text of a leaf, or None for a group.
    ///
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Group(_) => None,
        }
    }

    /// Return the node addressed by the path, or None if the path does not
    /// resolve inside this tree's shape.
    ///
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self;
        for segment in path.segments() {
            match current {
                Value::Group(children) => current = children.get(segment)?.as_ref(),
                Value::Text(_) => return None,
            }
        }
        Some(current)
    }

    /// Return the text of the leaf addressed by the path, or None if the path
    /// does not resolve to a leaf.
    ///
    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).and_then(Value::as_text)
    }

    /// Return the names of the top-level fields, in order. Empty for a leaf.
    ///
    pub fn top_level_keys(&self) -> Vec<&str> {
        match self {
            Value::Group(children) => children.keys().map(String::as_str).collect(),
            Value::Text(_) => vec![],
        }
    }

    /// Return a new tree in which only the node addressed by the path is
    /// replaced. Every node on the root-to-target path is rebuilt; every
    /// subtree off that path is shared by reference with this tree.
    ///
    /// # Panics
    /// Panics if the path does not resolve inside this tree's shape. The tree
    /// shape is fixed at construction and paths come from hand-written field
    /// specs, so a non-resolving path is a precondition violation.
    pub fn with(&self, path: &FieldPath, value: Value) -> Value {
        let segments: Vec<&str> = path.segments().collect();
        self.rebuild(&segments, value, path)
    }

    fn rebuild(&self, segments: &[&str], value: Value, path: &FieldPath) -> Value {
        let (head, rest) = match segments.split_first() {
            Some(split) => split,
            // FieldPath guarantees at least one segment.
            None => return value,
        };
        let children = match self {
            Value::Group(children) => children,
            Value::Text(_) => panic!(
                "field path '{}' does not resolve: '{}' is not a group",
                path, head
            ),
        };
        let child = children.get(*head).unwrap_or_else(|| {
            panic!(
                "field path '{}' does not resolve: unknown field '{}'",
                path, head
            )
        });
        let replacement = if rest.is_empty() {
            value
        } else {
            child.rebuild(rest, value, path)
        };
        let mut children = children.clone();
        children.insert((*head).to_owned(), Arc::new(replacement));
        Value::Group(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Value {
        Value::group([
            ("street", Value::text("")),
            ("city", Value::text("")),
            ("zipcode", Value::text("")),
        ])
    }

    fn user_values() -> Value {
        Value::group([
            ("name", Value::text("")),
            ("email", Value::text("")),
            ("address", address()),
        ])
    }

    /// Walk to the Arc holding the node at the path, for identity checks.
    fn arc_at(value: &Value, path: &str) -> Arc<Value> {
        let path = FieldPath::new(path);
        let mut current = value;
        let mut held: Option<Arc<Value>> = None;
        for segment in path.segments() {
            match current {
                Value::Group(children) => {
                    let child = children.get(segment).expect("path resolves");
                    held = Some(Arc::clone(child));
                    current = child.as_ref();
                }
                Value::Text(_) => panic!("path descends through a leaf"),
            }
        }
        held.expect("non-empty path")
    }

    #[test]
    fn test_get_top_level() {
        let values = user_values();
        let name = values.get(&FieldPath::new("name")).unwrap();
        assert_eq!(name.as_text(), Some(""));
    }

    #[test]
    fn test_get_nested() {
        let values = user_values();
        let city = values.text_at(&FieldPath::new("address.city"));
        assert_eq!(city, Some(""));
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let values = user_values();
        assert!(values.get(&FieldPath::new("phone")).is_none());
        assert!(values.get(&FieldPath::new("name.inner")).is_none());
    }

    #[test]
    fn test_with_replaces_top_level_leaf() {
        let values = user_values();
        let updated = values.with(&FieldPath::new("name"), Value::text("Ada"));
        assert_eq!(updated.text_at(&FieldPath::new("name")), Some("Ada"));
        assert_eq!(updated.text_at(&FieldPath::new("email")), Some(""));
    }

    #[test]
    fn test_with_rebuilds_only_path_nodes() {
        let values = user_values();
        let updated = values.with(&FieldPath::new("address.city"), Value::text("Lagos"));

        assert_eq!(updated.text_at(&FieldPath::new("address.city")), Some("Lagos"));
        assert_eq!(updated.text_at(&FieldPath::new("address.street")), Some(""));

        // Siblings off the edited path are the same nodes, not copies.
        assert!(Arc::ptr_eq(
            &arc_at(&values, "address.street"),
            &arc_at(&updated, "address.street"),
        ));
        assert!(Arc::ptr_eq(
            &arc_at(&values, "email"),
            &arc_at(&updated, "email"),
        ));
        // The edited branch itself is rebuilt.
        assert!(!Arc::ptr_eq(
            &arc_at(&values, "address"),
            &arc_at(&updated, "address"),
        ));
    }

    #[test]
    fn test_with_leaves_original_unchanged() {
        let values = user_values();
        let _updated = values.with(&FieldPath::new("address.city"), Value::text("Lagos"));
        assert_eq!(values.text_at(&FieldPath::new("address.city")), Some(""));
    }

    #[test]
    fn test_with_replaces_branch() {
        let values = user_values();
        let updated = values.with(
            &FieldPath::new("address"),
            Value::group([("street", Value::text("1 Main St"))]),
        );
        assert_eq!(
            updated.text_at(&FieldPath::new("address.street")),
            Some("1 Main St")
        );
        assert!(updated.get(&FieldPath::new("address.city")).is_none());
    }

    #[test]
    #[should_panic(expected = "unknown field 'phone'")]
    fn test_with_unknown_field_panics() {
        user_values().with(&FieldPath::new("phone"), Value::text("x"));
    }

    #[test]
    #[should_panic(expected = "is not a group")]
    fn test_with_through_leaf_panics() {
        user_values().with(&FieldPath::new("name.first"), Value::text("x"));
    }

    #[test]
    fn test_top_level_keys() {
        let values = user_values();
        assert_eq!(values.top_level_keys(), vec!["address", "email", "name"]);
        assert!(Value::text("x").top_level_keys().is_empty());
    }
}
