//! JSON report output
//!
//! Machine-readable dump of the section mapping, pretty-printed with the
//! same indent and key order the HTML report uses for text sections.

use crate::render::{to_structured_text, ResultSet};
use serde_json::Value;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, results: &ResultSet) -> io::Result<()> {
    let value = Value::Object(results.clone());
    writer.write_all(to_structured_text(&value).as_bytes())?;
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_round_trips_mapping() {
        let mut results = ResultSet::new();
        results.insert("stats".to_string(), json!({"rows": 10}));
        results.insert("chart".to_string(), json!("<svg></svg>"));

        let mut buf = Vec::new();
        write(&mut buf, &results).unwrap();

        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, json!({"stats": {"rows": 10}, "chart": "<svg></svg>"}));
    }

    #[test]
    fn test_write_empty_mapping() {
        let mut buf = Vec::new();
        write(&mut buf, &ResultSet::new()).unwrap();
        assert_eq!(buf, b"{}\n");
    }

    #[test]
    fn test_write_preserves_key_order() {
        let mut results = ResultSet::new();
        results.insert("z".to_string(), json!(1));
        results.insert("a".to_string(), json!(2));

        let mut buf = Vec::new();
        write(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }
}
