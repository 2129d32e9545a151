//! Tests for header merging.

use super::{Error, HeaderSource, Headers, default_headers, merge_headers, to_header_map};
use http::{HeaderMap, HeaderValue};

fn reason_for(result: Result<Headers, Error>) -> (String, String) {
    match result {
        Err(Error::InvalidHeader { name, reason }) => (name, reason),
        other => panic!("Expected InvalidHeader, got {other:?}"),
    }
}

mod merge {
    use super::*;

    #[test]
    fn defaults_contain_json_content_type() {
        let defaults = default_headers();

        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults["Content-Type"], "application/json");
    }

    #[test]
    fn no_incoming_returns_defaults() {
        let merged = merge_headers(&default_headers(), None).unwrap();

        assert_eq!(merged, default_headers());
    }

    #[test]
    fn incoming_map_is_added() {
        let incoming = HeaderSource::from([("X-Trace", "abc")]);

        let merged = merge_headers(&default_headers(), Some(&incoming)).unwrap();

        assert_eq!(merged["Content-Type"], "application/json");
        assert_eq!(merged["X-Trace"], "abc");
    }

    #[test]
    fn incoming_overrides_same_key() {
        let incoming = HeaderSource::from([("Content-Type", "text/plain")]);

        let merged = merge_headers(&default_headers(), Some(&incoming)).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged["Content-Type"], "text/plain");
    }

    #[test]
    fn map_keys_are_compared_exactly() {
        let incoming = HeaderSource::from([("content-type", "text/plain")]);

        let merged = merge_headers(&default_headers(), Some(&incoming)).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged["Content-Type"], "application/json");
        assert_eq!(merged["content-type"], "text/plain");
    }

    #[test]
    fn collection_entries_use_lowercase_names() {
        let mut map = HeaderMap::new();
        map.insert("X-Api-Key", HeaderValue::from_static("secret"));

        let merged = merge_headers(&default_headers(), Some(&map.into())).unwrap();

        assert_eq!(merged["x-api-key"], "secret");
    }

    #[test]
    fn empty_value_is_allowed() {
        let incoming = HeaderSource::from([("X-Empty", "")]);

        let merged = merge_headers(&Headers::new(), Some(&incoming)).unwrap();

        assert_eq!(merged["X-Empty"], "");
    }

    #[test]
    fn defaults_are_not_modified() {
        let defaults = default_headers();
        let incoming = HeaderSource::from([("Content-Type", "text/csv")]);

        let _ = merge_headers(&defaults, Some(&incoming)).unwrap();

        assert_eq!(defaults["Content-Type"], "application/json");
    }
}

mod line_breaks {
    use super::*;

    #[test]
    fn newline_is_rejected_naming_key() {
        let incoming = HeaderSource::from([("X-Custom", "value\nInjected: true")]);

        let (name, reason) = reason_for(merge_headers(&default_headers(), Some(&incoming)));

        assert_eq!(name, "X-Custom");
        assert_eq!(reason, "value contains a line break");
    }

    #[test]
    fn carriage_return_is_rejected() {
        let incoming = HeaderSource::from([("Authorization", "Bearer x\r")]);

        let (name, _) = reason_for(merge_headers(&default_headers(), Some(&incoming)));

        assert_eq!(name, "Authorization");
    }

    #[test]
    fn error_message_names_header() {
        let incoming = HeaderSource::from([("X-Custom", "a\r\nb")]);

        let error = merge_headers(&default_headers(), Some(&incoming)).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Invalid header value for \"X-Custom\": value contains a line break"
        );
    }

    #[test]
    fn one_bad_value_rejects_whole_merge() {
        let incoming = HeaderSource::from([("A-Good", "fine"), ("B-Bad", "x\ny")]);

        let result = merge_headers(&default_headers(), Some(&incoming));

        assert!(matches!(result, Err(Error::InvalidHeader { ref name, .. }) if name == "B-Bad"));
    }
}

mod header_map {
    use super::*;

    fn map_from(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn converts_merged_headers() {
        let map = to_header_map(&default_headers(), &default_headers()).unwrap();

        assert_eq!(map.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn lowercase_caller_variant_replaces_default() {
        let mut headers = default_headers();
        headers.insert("content-type".to_string(), "text/plain".to_string());

        let map = to_header_map(&default_headers(), &headers).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn uppercase_caller_variant_replaces_default() {
        let incoming = HeaderSource::from([("CONTENT-TYPE", "text/plain")]);
        let merged = merge_headers(&default_headers(), Some(&incoming)).unwrap();

        let map = to_header_map(&default_headers(), &merged).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn caller_variants_of_other_names_collapse_to_last_sorted() {
        let headers = map_from(&[("X-TRACE", "upper"), ("x-trace", "lower")]);

        let map = to_header_map(&Headers::new(), &headers).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-trace").unwrap(), "lower");
    }

    #[test]
    fn invalid_name_is_rejected() {
        let headers = map_from(&[("Bad Name", "x")]);

        let result = to_header_map(&Headers::new(), &headers);

        assert!(matches!(result, Err(Error::InvalidHeader { ref name, .. }) if name == "Bad Name"));
    }

    #[test]
    fn control_character_value_is_rejected() {
        let headers = map_from(&[("X-Bell", "\u{7}")]);

        assert!(to_header_map(&Headers::new(), &headers).is_err());
    }
}
