use crate::core::{OrderedMap, Result, Value};
use crate::export::{CsvOptions, SingleExport};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// One decoded row: column name to normalized value, in the column order of
/// the query that produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: OrderedMap<Value>,
}

impl Record {
    pub fn new(fields: OrderedMap<Value>) -> Self {
        Record { fields }
    }

    /// Returns the value of the named column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Column names in order; this is also the CSV header.
    pub fn columns(&self) -> Vec<String> {
        self.fields.keys().map(String::from).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &OrderedMap<Value> {
        &self.fields
    }

    pub(crate) fn csv_row(&self, options: &CsvOptions) -> Vec<String> {
        self.fields.values().map(|v| v.to_text(&options.null_text)).collect()
    }
}

impl From<OrderedMap<Value>> for Record {
    fn from(fields: OrderedMap<Value>) -> Self {
        Record::new(fields)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl SingleExport for Record {
    fn to_map(&self) -> IndexMap<String, Value> {
        self.fields.as_index_map().clone()
    }

    fn to_slice(&self) -> Vec<Value> {
        self.fields.values().cloned().collect()
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_csv_with(&self, with_header: bool, options: &CsvOptions) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(2);
        if with_header {
            grid.push(self.columns());
        }
        grid.push(self.csv_row(options));
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordsError;

    fn user() -> Record {
        let mut fields = OrderedMap::new();
        fields.set("user_name", Value::from("xzy"), true);
        fields.set("deleted_at", Value::Null, true);
        fields.set("id", Value::Integer(1), true);
        Record::new(fields)
    }

    #[test]
    fn test_to_map_keeps_column_order() {
        let map = user().to_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["user_name", "deleted_at", "id"]);
        assert_eq!(map["deleted_at"], Value::Null);
        assert_eq!(map["id"], Value::Integer(1));
    }

    #[test]
    fn test_to_slice() {
        assert_eq!(
            user().to_slice(),
            vec![Value::from("xzy"), Value::Null, Value::Integer(1)]
        );
    }

    #[test]
    fn test_to_json() {
        assert_eq!(
            user().to_json().unwrap(),
            r#"{"user_name":"xzy","deleted_at":null,"id":1}"#
        );
    }

    #[test]
    fn test_to_json_rejects_non_finite_float() {
        let mut fields = OrderedMap::new();
        fields.set("ratio", Value::Float(f64::NAN), true);
        let record = Record::new(fields);
        assert!(matches!(record.to_json(), Err(RecordsError::Serialization(_))));
        // the record itself is still usable
        assert_eq!(record.to_slice().len(), 1);
    }

    #[test]
    fn test_to_csv() {
        let record = user();
        assert_eq!(
            record.to_csv(true),
            vec![
                vec!["user_name".to_string(), "deleted_at".to_string(), "id".to_string()],
                vec!["xzy".to_string(), "".to_string(), "1".to_string()],
            ]
        );
        assert_eq!(
            record.to_csv_with(false, &CsvOptions::with_null_text("<nil>")),
            vec![vec!["xzy".to_string(), "<nil>".to_string(), "1".to_string()]]
        );
    }

    #[test]
    fn test_empty_record() {
        let record = Record::default();
        assert!(record.is_empty());
        assert_eq!(record.to_json().unwrap(), "{}");
        assert_eq!(record.to_csv(true), vec![Vec::<String>::new(), Vec::new()]);
    }
}
