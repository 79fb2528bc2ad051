/// A single extracted field value.
///
/// Comma-delimited source fields become `Many`; everything else stays a
/// `Scalar`. Multi-valued cells are joined with [`MULTI_VALUE_SEPARATOR`]
/// when rendered for the tabular sink so they cannot collide with the CSV
/// column delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    Many(Vec<String>),
}

/// Separator used when a multi-valued field is rendered into one cell.
pub const MULTI_VALUE_SEPARATOR: &str = ";";

impl FieldValue {
    /// Render the value as a single CSV cell.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::Many(items) => items.join(MULTI_VALUE_SEPARATOR),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

/// One product's extracted fields, in insertion order.
///
/// Inserting under an existing name replaces the value in place and keeps the
/// name's original position, so repeated characteristics on a detail page
/// overwrite earlier ones without reordering the record. Every record starts
/// with `url`, `model` and `color`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ProductRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, overwriting any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// The record's absolute detail-page URL, if seeded.
    pub fn url(&self) -> &str {
        match self.get("url") {
            Some(FieldValue::Scalar(url)) => url,
            _ => "<unknown>",
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut record = ProductRecord::new();
        record.insert("url", "https://example.com/p/1");
        record.insert("Storage", "64");
        record.insert("Battery", "4000");
        record.insert("Storage", "128");

        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["url", "Storage", "Battery"]);
        assert_eq!(record.get("Storage"), Some(&FieldValue::Scalar("128".into())));
    }

    #[test]
    fn test_multi_value_cell_rendering() {
        let value = FieldValue::Many(vec!["128".into(), "256".into(), "512".into()]);
        assert_eq!(value.to_cell(), "128;256;512");

        let scalar = FieldValue::Scalar("4000".into());
        assert_eq!(scalar.to_cell(), "4000");
    }
}
