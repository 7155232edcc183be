//! Parsing of `key=value` arguments into filter lists and write payloads.
//!
//! Everything arrives as a string; typed coercion (numeric ids, flags,
//! dates) happens in the gateway schema, not here.

use anyhow::bail;
use crewdesk_core::Record;
use serde_json::Value;

/// Parses repeated `KEY=VALUE` arguments into ordered pairs.
pub fn parse_pairs(raw: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => bail!("invalid KEY=VALUE argument: {pair}"),
        })
        .collect()
}

/// Builds a write payload from repeated `KEY=VALUE` arguments. A later
/// duplicate key overwrites an earlier one.
pub fn pairs_to_record(raw: &[String]) -> anyhow::Result<Record> {
    let mut record = Record::new();
    for (key, value) in parse_pairs(raw)? {
        record.insert(key, Value::String(value));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs(&[
            "first_name=Ali".to_string(),
            "department_id=2".to_string(),
        ])
        .unwrap();
        assert_eq!(pairs[0], ("first_name".to_string(), "Ali".to_string()));
        assert_eq!(pairs[1], ("department_id".to_string(), "2".to_string()));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let pairs = parse_pairs(&["note=a=b".to_string()]).unwrap();
        assert_eq!(pairs[0], ("note".to_string(), "a=b".to_string()));
    }

    #[test]
    fn test_missing_equals_rejected() {
        let err = parse_pairs(&["first_name".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invalid KEY=VALUE"));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(parse_pairs(&["=oops".to_string()]).is_err());
    }

    #[test]
    fn test_pairs_to_record_keeps_strings() {
        let record = pairs_to_record(&[
            "name=Engineering".to_string(),
            "code=ENG".to_string(),
        ])
        .unwrap();
        assert_eq!(record["name"], Value::String("Engineering".to_string()));
        assert_eq!(record["code"], Value::String("ENG".to_string()));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let record =
            pairs_to_record(&["name=First".to_string(), "name=Second".to_string()]).unwrap();
        assert_eq!(record["name"], Value::String("Second".to_string()));
    }
}
