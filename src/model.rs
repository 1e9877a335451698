use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i64,
    pub description: String,
    pub id: Uuid,
}

/// Request body for both create and whole-record update.
///
/// Text fields take a string or a number (stored as its textual form);
/// `year` takes an integer, an integral float, or an integer string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookInput {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub author: String,
    #[serde(deserialize_with = "text")]
    pub genre: String,
    #[serde(deserialize_with = "year")]
    pub year: i64,
    #[serde(deserialize_with = "text")]
    pub description: String,
}

impl BookInput {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: self.year,
            description: self.description,
            id,
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected a string, got {}", kind(&other)))),
    }
}

fn year<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| de::Error::custom(format!("year must be an integer, got {}", value)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> Result<BookInput, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_plain_input() {
        let book = input(json!({
            "title": "Dune",
            "author": "Herbert",
            "genre": "SciFi",
            "year": 1965,
            "description": "desert planet"
        }))
        .unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.year, 1965);
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let book = input(json!({
            "title": "Dune",
            "author": 42,
            "genre": 3.5,
            "year": 1965,
            "description": "desert planet"
        }))
        .unwrap();
        assert_eq!(book.author, "42");
        assert_eq!(book.genre, "3.5");
    }

    #[test]
    fn test_year_accepts_integral_forms() {
        for year in [json!(1965), json!(1965.0), json!("1965"), json!(" 1965 ")] {
            let book = input(json!({
                "title": "t", "author": "a", "genre": "g", "year": year, "description": "d"
            }))
            .unwrap();
            assert_eq!(book.year, 1965);
        }
    }

    #[test]
    fn test_year_rejects_non_integers() {
        for year in [json!(1965.5), json!("nineteen"), json!(null), json!(true)] {
            let err = input(json!({
                "title": "t", "author": "a", "genre": "g", "year": year, "description": "d"
            }))
            .unwrap_err();
            assert!(err.to_string().contains("year must be an integer"));
        }
    }

    #[test]
    fn test_year_i64_boundaries() {
        let body = |year: &str| {
            format!(r#"{{"title":"t","author":"a","genre":"g","year":{year},"description":"d"}}"#)
        };

        let max: BookInput = serde_json::from_str(&body("9223372036854775807")).unwrap();
        assert_eq!(max.year, i64::MAX);
        let min: BookInput = serde_json::from_str(&body("-9223372036854775808")).unwrap();
        assert_eq!(min.year, i64::MIN);

        for year in ["9223372036854775808", "1e19", "-1e19"] {
            let err = serde_json::from_str::<BookInput>(&body(year)).unwrap_err();
            assert!(err.to_string().contains("year must be an integer"), "{year}");
        }
    }

    #[test]
    fn test_text_rejects_null_and_bool() {
        assert!(input(json!({
            "title": null, "author": "a", "genre": "g", "year": 1, "description": "d"
        }))
        .is_err());
        assert!(input(json!({
            "title": "t", "author": false, "genre": "g", "year": 1, "description": "d"
        }))
        .is_err());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let err = input(json!({
            "title": "t", "author": "a", "genre": "g", "year": 1
        }))
        .unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let book = input(json!({
            "title": "t", "author": "a", "genre": "g", "year": 1, "description": "d", "isbn": "x"
        }))
        .unwrap();
        assert_eq!(book.description, "d");
    }

    #[test]
    fn test_book_serializes_id_as_hyphenated_string() {
        let id = Uuid::new_v4();
        let book = input(json!({
            "title": "t", "author": "a", "genre": "g", "year": 1, "description": "d"
        }))
        .unwrap()
        .into_book(id);
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["id"], json!(id.hyphenated().to_string()));
        assert_eq!(value["year"], json!(1));
    }
}
