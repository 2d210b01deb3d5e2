//! Capture environment produced by a successful match.
//!
//! Bindings keep first-bind order. Binding a name that is already present
//! replaces its value in place (last write wins), so a pattern that captures
//! the same name twice exposes the value from the later position in
//! traversal order.

use protomatch_value::{Name, Value};

/// Ordered name -> value captures of one match attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(Name, Value)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier value for the same name.
    pub fn bind(&mut self, name: Name, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Merge `other` into `self`, entry by entry, with last write wins.
    pub fn merge(&mut self, other: Bindings) {
        for (name, value) in other.entries {
            self.bind(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `name` is bound to a truthy value.
    ///
    /// Convenience for guards of the form `if captured`.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::is_truthy)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> + '_ {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> + '_ {
        self.entries.iter().map(|(n, _)| n)
    }
}

impl IntoIterator for Bindings {
    type Item = (Name, Value);
    type IntoIter = std::vec::IntoIter<(Name, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(Name, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.bind(name, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn later_binding_replaces_earlier_in_place() {
        let mut bindings = Bindings::new();
        bindings.bind(Name::new("x"), Value::Int(1));
        bindings.bind(Name::new("y"), Value::Int(2));
        bindings.bind(Name::new("x"), Value::Int(3));

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("x"), Some(&Value::Int(3)));
        let names: Vec<&str> = bindings.names().map(Name::as_str).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn merge_is_last_write_wins() {
        let mut left: Bindings = [(Name::new("v"), Value::string("left"))]
            .into_iter()
            .collect();
        let right: Bindings = [(Name::new("v"), Value::string("right"))]
            .into_iter()
            .collect();
        left.merge(right);
        assert_eq!(left.get("v"), Some(&Value::string("right")));
    }

    #[test]
    fn truthiness_of_missing_name_is_false() {
        let mut bindings = Bindings::new();
        bindings.bind(Name::new("empty"), Value::string(""));
        bindings.bind(Name::new("full"), Value::string("TestA"));
        assert!(!bindings.is_truthy("missing"));
        assert!(!bindings.is_truthy("empty"));
        assert!(bindings.is_truthy("full"));
    }
}
