use crate::error::HarvestError;
use crate::records::ProductRecord;
use serde::{Deserialize, Serialize};

/// How records with diverging field sets are reconciled into one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Union the columns across all records; missing cells render empty.
    #[default]
    Lenient,
    /// Fail on the first record whose field set differs from the first one's.
    Strict,
}

/// The reconciled output: canonical column names plus rows in the order the
/// fetch results were collected.
#[derive(Debug, Clone)]
pub struct AggregatedTable {
    pub columns: Vec<String>,
    pub rows: Vec<ProductRecord>,
}

impl AggregatedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Merge per-product records into one rectangular table.
///
/// The first record's key order is the canonical base order. Under the lenient
/// policy, names unseen so far are appended in first-seen order and the number
/// of records that extended the schema is reported; under the strict policy,
/// any record whose field set is not exactly the canonical one fails with
/// `SchemaMismatch` naming the offending URL and columns.
pub fn aggregate(
    records: Vec<ProductRecord>,
    policy: SchemaPolicy,
) -> Result<AggregatedTable, HarvestError> {
    let mut columns: Vec<String> = match records.first() {
        Some(first) => first.keys().map(|k| k.to_string()).collect(),
        None => Vec::new(),
    };

    let mut extended = 0usize;
    for record in records.iter().skip(1) {
        let unseen: Vec<String> = record
            .keys()
            .filter(|k| !columns.iter().any(|c| c == k))
            .map(|k| k.to_string())
            .collect();
        let dropped = columns.iter().any(|c| record.get(c).is_none());

        match policy {
            SchemaPolicy::Strict => {
                if !unseen.is_empty() || dropped {
                    let mut offending = unseen;
                    offending.extend(
                        columns
                            .iter()
                            .filter(|c| record.get(c).is_none())
                            .cloned(),
                    );
                    return Err(HarvestError::SchemaMismatch {
                        url: record.url().to_string(),
                        columns: offending,
                    });
                }
            }
            SchemaPolicy::Lenient => {
                if !unseen.is_empty() || dropped {
                    extended += 1;
                }
                columns.extend(unseen);
            }
        }
    }

    if extended > 0 {
        ::log::warn!(
            "{} of {} records diverged from the first record's schema; columns were unioned",
            extended,
            records.len()
        );
    }

    Ok(AggregatedTable {
        columns,
        rows: records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::FieldValue;

    fn record(url: &str, extra: &[(&str, &str)]) -> ProductRecord {
        let mut r = ProductRecord::new();
        r.insert("url", url);
        r.insert("model", "XZ");
        r.insert("color", "Black");
        for (name, value) in extra {
            r.insert(*name, *value);
        }
        r
    }

    #[test]
    fn test_lenient_unions_columns() {
        let records = vec![
            record("https://example.com/p/1", &[("A", "1")]),
            record("https://example.com/p/2", &[("B", "2")]),
        ];
        let table = aggregate(records, SchemaPolicy::Lenient).unwrap();

        assert_eq!(table.columns, vec!["url", "model", "color", "A", "B"]);
        assert!(table.rows[0].get("B").is_none());
        assert!(table.rows[1].get("A").is_none());
        assert_eq!(table.rows[1].get("B"), Some(&FieldValue::Scalar("2".into())));
    }

    #[test]
    fn test_strict_rejects_divergent_record() {
        let records = vec![
            record("https://example.com/p/1", &[("A", "1")]),
            record("https://example.com/p/2", &[("B", "2")]),
        ];
        let err = aggregate(records, SchemaPolicy::Strict).unwrap_err();

        match err {
            HarvestError::SchemaMismatch { url, columns } => {
                assert_eq!(url, "https://example.com/p/2");
                assert!(columns.contains(&"A".to_string()));
                assert!(columns.contains(&"B".to_string()));
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_accepts_uniform_records() {
        let records = vec![
            record("https://example.com/p/1", &[("A", "1")]),
            record("https://example.com/p/2", &[("A", "9")]),
        ];
        let table = aggregate(records, SchemaPolicy::Strict).unwrap();
        assert_eq!(table.columns, vec!["url", "model", "color", "A"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let table = aggregate(Vec::new(), SchemaPolicy::Lenient).unwrap();
        assert!(table.columns.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_first_record_order_is_canonical() {
        let records = vec![record(
            "https://example.com/p/1",
            &[("Storage", "64"), ("Battery", "4000")],
        )];
        let table = aggregate(records, SchemaPolicy::Lenient).unwrap();
        assert_eq!(
            table.columns,
            vec!["url", "model", "color", "Storage", "Battery"]
        );
    }
}
