//! Typed path queries over a parsed JSON document.

use serde_json::Value;

/// An immutable parsed JSON document.
///
/// Every query names a path of object keys and the JSON type expected at
/// its end. A type mismatch answers `None`, exactly like a missing key.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTree {
    root: Value,
}

impl ParsedTree {
    /// Wraps an already parsed value.
    #[must_use]
    pub const fn new(root: Value) -> Self {
        Self { root }
    }

    /// Walks `path` from the root.
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// String at `path`.
    #[must_use]
    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Integer at `path`. Fractional numbers do not match.
    #[must_use]
    pub fn get_i64(&self, path: &[&str]) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    /// Array at `path`.
    #[must_use]
    pub fn get_array(&self, path: &[&str]) -> Option<&[Value]> {
        self.get(path).and_then(Value::as_array).map(Vec::as_slice)
    }
}

/// Walks `path` from `value` through nested objects.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |node, key| node.as_object()?.get(*key))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tree() -> ParsedTree {
        ParsedTree::new(json!({
            "root": "/rootfs",
            "pid": 1234,
            "ratio": 1.5,
            "process": { "args": ["sh"], "env": ["A=1"] }
        }))
    }

    #[test]
    fn nested_paths_resolve() {
        let tree = tree();
        assert_eq!(tree.get_array(&["process", "args"]).map(<[Value]>::len), Some(1));
        assert_eq!(tree.get_str(&["root"]), Some("/rootfs"));
        assert_eq!(tree.get_i64(&["pid"]), Some(1234));
    }

    #[test]
    fn type_mismatch_is_absent() {
        let tree = tree();
        assert_eq!(tree.get_str(&["pid"]), None);
        assert_eq!(tree.get_i64(&["root"]), None);
        assert_eq!(tree.get_i64(&["ratio"]), None);
        assert!(tree.get_array(&["process"]).is_none());
    }

    #[test]
    fn walking_through_a_scalar_is_absent() {
        let tree = tree();
        assert!(tree.get(&["root", "inner"]).is_none());
        assert!(tree.get(&["missing"]).is_none());
    }

    #[test]
    fn empty_path_is_the_root() {
        let tree = tree();
        assert_eq!(tree.get(&[]), Some(&tree.root));
    }
}
