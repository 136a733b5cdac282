//! Property-based tests for the link extraction adapter.
//!
//! Uses proptest to generate noisy free-text responses and verify the
//! extraction invariants: everything extracted is an absolute HTTP(S)
//! URL, nothing on the excluded domain survives, and planted external
//! URLs are always found.

use proptest::prelude::*;

use workspace_builder::extraction::{is_absolute_url, is_on_domain, urls_from_text};

/// Strategy for plausible external hosts
fn arb_external_host() -> impl Strategy<Value = String> {
    "[a-z]{3,12}\\.(example|org|net|dev)".prop_map(|s| s)
}

/// Strategy for URL path segments
fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9-]{1,10}", 0..4).prop_map(|segs| {
        if segs.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segs.join("/"))
        }
    })
}

/// Strategy for an absolute external URL
fn arb_external_url() -> impl Strategy<Value = String> {
    (arb_external_host(), arb_path())
        .prop_map(|(host, path)| format!("https://{host}{path}"))
}

/// Strategy for search-engine URLs on the excluded domain
fn arb_search_engine_url() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}", arb_path()).prop_map(|(q, path)| {
        format!("https://www.google.com{path}?q={q}")
    })
}

/// Strategy for non-URL prose fragments
fn arb_noise() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Here are the results:".to_string()),
        Just("I found the following pages".to_string()),
        "[A-Za-z ,]{0,40}".prop_map(|s| s),
        Just("rank went to".to_string()),
    ]
}

proptest! {
    #[test]
    fn extracted_urls_are_absolute_http(
        noise in prop::collection::vec(arb_noise(), 0..5),
        urls in prop::collection::vec(arb_external_url(), 0..5),
    ) {
        let mut lines: Vec<String> = noise;
        lines.extend(urls);
        let text = lines.join("\n");

        for url in urls_from_text(&text, "google.com") {
            prop_assert!(is_absolute_url(&url), "{url} is not absolute");
        }
    }

    #[test]
    fn excluded_domain_never_survives(
        engine_urls in prop::collection::vec(arb_search_engine_url(), 1..5),
        external_urls in prop::collection::vec(arb_external_url(), 0..5),
    ) {
        let mut lines = engine_urls;
        lines.extend(external_urls);
        let text = lines.join("\n");

        for url in urls_from_text(&text, "google.com") {
            prop_assert!(!is_on_domain(&url, "google.com"), "{url} is on the excluded domain");
        }
    }

    #[test]
    fn planted_external_url_is_found(
        before in arb_noise(),
        url in arb_external_url(),
        after in arb_noise(),
    ) {
        let text = format!("{before}\n{url}\n{after}");
        let extracted = urls_from_text(&text, "google.com");
        prop_assert!(
            extracted.iter().any(|u| u == &url),
            "planted {url} missing from {extracted:?}"
        );
    }

    #[test]
    fn order_of_appearance_is_preserved(
        urls in prop::collection::vec(arb_external_url(), 2..6),
    ) {
        let text = urls.join("\nand then\n");
        let extracted = urls_from_text(&text, "google.com");
        prop_assert_eq!(extracted, urls);
    }

    #[test]
    fn extraction_never_panics_on_arbitrary_text(text in ".{0,300}") {
        let _ = urls_from_text(&text, "google.com");
    }
}
