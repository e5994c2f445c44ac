//! Ordered form parameters.
//!
//! Request bodies are sequences of name/value pairs rather than maps: the same
//! name may appear more than once and order is preserved exactly as pushed, so a
//! given set of inputs always encodes to the same body.

use std::fmt;

/// A single form parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    value: String,
}

impl Param {
    /// Create a parameter from a name and a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a boolean flag parameter, encoded as `"1"` or `"0"`.
    pub fn flag(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, if value { "1" } else { "0" })
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Param {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// An append-only, ordered list of form parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Param>);

impl Params {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create the `sld`/`tld` pair most endpoints start from.
    pub fn domain(sld: &str, tld: &str) -> Self {
        let mut params = Self::new();
        params.push("sld", sld);
        params.push("tld", tld);
        params
    }

    /// Append a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Param::new(name, value));
    }

    /// Append everything a record contributes.
    pub fn append(&mut self, record: &impl ToParams) {
        self.0.extend(record.to_params());
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Number of parameters, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First value sent under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|p| p.name == name).map(Param::value)
    }

    /// All values sent under `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().filter(move |p| p.name == name).map(Param::value)
    }

    /// Iterate over the parameters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }

    /// Borrow as `(name, value)` pairs, ready for form encoding.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.0.iter().map(|p| (p.name(), p.value())).collect()
    }
}

impl Extend<Param> for Params {
    fn extend<I: IntoIterator<Item = Param>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Param> for Params {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Params {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Param>> for Params {
    fn from(params: Vec<Param>) -> Self {
        Self(params)
    }
}

/// Records that flatten into form parameters.
///
/// Implementations must be pure: the same value always yields the same
/// parameters in the same order.
pub trait ToParams {
    /// The ordered parameters this record contributes to a request.
    fn to_params(&self) -> Vec<Param>;
}
