use std::collections::HashMap;

/// Read-only lookup of build properties used to resolve `${name}` placeholders.
pub trait PropertySource {
    fn lookup(&self, name: &str) -> Option<String>;

    /// Where the properties came from, used in diagnostics.
    fn origin(&self) -> &str;
}

/// In-memory property source assembled once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    origin: String,
    values: HashMap<String, String>,
}

impl Properties {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            values: HashMap::new(),
        }
    }

    /// Later values override earlier ones.
    pub fn extend<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for Properties {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}
