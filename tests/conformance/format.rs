use serde_json::json;
use well_known_bots::FormatError;
use well_known_bots::format::{canonical, check_format, generate};

const CANONICAL: &str = "[
  {
    \"id\": \"examplebot\",
    \"pattern\": {
      \"accepted\": [
        \"^ExampleBot/\"
      ],
      \"forbidden\": []
    },
    \"categories\": [
      \"search-engine-crawler\"
    ],
    \"verification\": []
  }
]
";

#[test]
fn canonical_form_is_two_space_pretty_with_newline() {
    let value = json!([{
        "id": "examplebot",
        "pattern": { "accepted": ["^ExampleBot/"], "forbidden": [] },
        "categories": ["search-engine-crawler"],
        "verification": []
    }]);
    assert_eq!(canonical(&value), CANONICAL);
}

#[test]
fn canonical_text_passes_check() {
    let value = check_format(CANONICAL).unwrap();
    assert_eq!(value[0]["id"], "examplebot");
}

#[test]
fn key_order_is_preserved() {
    let text = "[\n  {\n    \"z\": 1,\n    \"a\": 2\n  }\n]\n";
    assert!(check_format(text).is_ok());
    assert_eq!(generate(text).unwrap(), text);
}

#[test]
fn compact_text_is_not_canonical() {
    let compact = serde_json::to_string(&serde_json::from_str::<serde_json::Value>(CANONICAL).unwrap()).unwrap();
    match check_format(&compact).unwrap_err() {
        FormatError::NotCanonical { line, found, .. } => {
            assert_eq!(line, 1);
            assert_eq!(found, compact);
        }
        other => panic!("expected NotCanonical, got {:?}", other),
    }
    assert_eq!(generate(&compact).unwrap(), CANONICAL);
}

#[test]
fn missing_trailing_newline_is_reported() {
    let text = CANONICAL.trim_end();
    match check_format(text).unwrap_err() {
        FormatError::NotCanonical { line, expected, found } => {
            assert_eq!(line, 16);
            assert_eq!(expected, "");
            assert_eq!(found, "");
        }
        other => panic!("expected NotCanonical, got {:?}", other),
    }
}

#[test]
fn four_space_indent_is_reported_at_first_line() {
    let text = CANONICAL.replace("\n  {", "\n    {");
    match check_format(&text).unwrap_err() {
        FormatError::NotCanonical { line, expected, found } => {
            assert_eq!(line, 2);
            assert_eq!(expected, "  {");
            assert_eq!(found, "    {");
        }
        other => panic!("expected NotCanonical, got {:?}", other),
    }
}

#[test]
fn invalid_json_is_a_parse_error() {
    assert!(matches!(check_format("[,]"), Err(FormatError::Parse(_))));
    assert!(matches!(generate("nope"), Err(FormatError::Parse(_))));
}

#[test]
fn integral_floats_render_as_integers() {
    let text = "[\n  1.0,\n  -0.0,\n  2.5,\n  10\n]\n";
    match check_format(text).unwrap_err() {
        FormatError::NotCanonical { line, expected, found } => {
            assert_eq!(line, 2);
            assert_eq!(expected, "  1,");
            assert_eq!(found, "  1.0,");
        }
        other => panic!("expected NotCanonical, got {:?}", other),
    }
    assert_eq!(generate(text).unwrap(), "[\n  1,\n  0,\n  2.5,\n  10\n]\n");
}

#[test]
fn index_like_keys_sort_first_numerically() {
    let text = r#"{"b": 1, "10": 2, "a": 3, "2": 4, "01": 5}"#;
    let expected = "{\n  \"2\": 4,\n  \"10\": 2,\n  \"b\": 1,\n  \"a\": 3,\n  \"01\": 5\n}\n";
    assert_eq!(generate(text).unwrap(), expected);
    assert!(check_format(expected).is_ok());
}

#[test]
fn nested_objects_are_normalized() {
    let value = json!([{ "id": "x", "meta": { "z": 1.0, "1": true } }]);
    let text = canonical(&value);
    assert!(text.contains("\"meta\": {\n      \"1\": true,\n      \"z\": 1\n    }"), "{}", text);
    assert_eq!(generate(&text).unwrap(), text);
}
