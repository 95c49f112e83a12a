//! Last-known value cache for router status fields.

use serde::{Deserialize, Serialize};

/// Markup the firmware uses for padding inside values.
const NBSP: &str = "&nbsp;";

/// A single named status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as reported by the firmware (e.g. `lan_ip`).
    pub name: String,
    /// Raw string value.
    #[serde(rename = "val")]
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of a [`FieldStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new field was appended.
    Inserted,
    /// An existing field was overwritten in place.
    Updated,
    /// The value carried markup and the field was not created.
    Dropped,
}

/// Insertion-ordered store of fields, one per name.
///
/// Field counts per router are in the tens, so lookups are a linear scan
/// over a `Vec`, which also keeps first-seen order for free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    fields: Vec<Field>,
}

impl FieldStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a field.
    ///
    /// - Empty store: the pair is inserted as-is.
    /// - Existing name: `&nbsp;` is stripped and the value overwritten.
    /// - New name: `&nbsp;` is stripped; values containing `<` are dropped,
    ///   everything else is appended.
    pub fn upsert(&mut self, name: &str, value: &str) -> Upsert {
        if self.fields.is_empty() {
            self.fields.push(Field::new(name, value));
            return Upsert::Inserted;
        }

        let value = strip_nbsp(value);

        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value;
            return Upsert::Updated;
        }

        if value.contains('<') {
            return Upsert::Dropped;
        }

        self.fields.push(Field::new(name, value));
        Upsert::Inserted
    }

    /// Current value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Whether a field named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the store has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Copy of every field, in first-seen order.
    pub fn snapshot(&self) -> Vec<Field> {
        self.fields.clone()
    }

    /// Remove every field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

/// Remove every `&nbsp;` sequence from a value.
pub fn strip_nbsp(value: &str) -> String {
    value.replace(NBSP, "")
}
