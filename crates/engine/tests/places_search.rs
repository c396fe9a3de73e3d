mod support;

use serde_json::{Value, json};
use support::{API_KEY, StubTransport, configuration, init_tracing, keyed};
use wayfinder_engine::{Lookup, PlacesSearch, ProviderSettings, RaisePolicy};
use wayfinder_types::{ErrorKind, Query, RequestMethod};

fn search(settings: ProviderSettings) -> PlacesSearch {
    PlacesSearch::new(&configuration(PlacesSearch::HANDLE, settings), StubTransport::ok("{}"))
}

fn body(settings: ProviderSettings, query: &Query) -> Value {
    search(settings).build_request(query).expect("request").body.expect("search sends a body")
}

#[test]
fn returns_every_place_in_the_response() {
    init_tracing();
    let transport = StubTransport::ok(include_str!("data/places_search_madison_square_garden.json"));
    let lookup = PlacesSearch::new(&configuration(PlacesSearch::HANDLE, keyed()), transport.clone());

    let places = lookup.fetch(&Query::new("Madison Square Garden")).expect("fetch");
    assert_eq!(places.len(), 2);

    let garden = &places[0];
    assert_eq!(garden.place_id(), Some("ChIJhRwB-yFawokR5Phil-QQ3zM"));
    assert_eq!(garden.latitude(), Some(40.75050450000001));
    assert_eq!(garden.longitude(), Some(-73.9934387));
    assert_eq!(garden.rating(), Some(4.5));
    assert_eq!(garden.types(), vec!["stadium", "point_of_interest", "establishment"]);
    assert_eq!(garden.vicinity(), garden.formatted_address());
    assert_eq!(garden.phone_number(), None);
    assert_eq!(garden.street_address(), None);
    assert!(garden.address_components().is_empty());

    assert!(places[1].permanently_closed());
    assert_eq!(places[1].rating(), None);
}

#[test]
fn builds_a_post_request() {
    let request = search(keyed()).build_request(&Query::new("some-address")).expect("request");

    assert_eq!(request.method, RequestMethod::Post);
    assert_eq!(request.url.as_str(), "https://places.googleapis.com/v1/places:searchText");
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("X-Goog-Api-Key"), Some(API_KEY));
    assert_eq!(request.header("X-Goog-FieldMask"), None);
    assert!(!request.cache_key().contains(API_KEY));

    let body = request.body.expect("body");
    assert_eq!(body["textQuery"], "some-address");
    assert!(body.get("locationBias").is_none());
    assert!(body.get("languageCode").is_none());
}

#[test]
fn coordinate_text_is_sent_verbatim() {
    let request = search(keyed()).build_request(&Query::new("40.7500, -73.9900")).expect("request");
    assert_eq!(request.body.expect("body")["textQuery"], "40.7500, -73.9900");
}

#[test]
fn build_request_is_deterministic() {
    let lookup = search(keyed().with_locationbias("point:1,2").with_param("pageSize", 3));
    let query = Query::new("pizza").with_language("it").with_option("fields", "id,location");
    assert_eq!(lookup.build_request(&query).expect("first"), lookup.build_request(&query).expect("second"));
}

#[test]
fn language_is_sent_in_body_and_url() {
    let request = search(keyed().with_language("en"))
        .build_request(&Query::new("some-address").with_language("de"))
        .expect("request");

    assert_eq!(request.query_parameter("languageCode").as_deref(), Some("de"));
    assert_eq!(request.body.expect("body")["languageCode"], "de");
}

#[test]
fn explicit_fields_become_included_paths() {
    let fields = json!(["formattedAddress", "id"]);
    let body = body(keyed(), &Query::new("some-address").with_option("fields", fields.clone()));
    assert_eq!(body["includedFields"]["paths"], fields);
}

#[test]
fn configured_fields_become_included_paths() {
    let body = body(keyed().with_fields(json!(["businessStatus", "photos"])), &Query::new("some-address"));
    assert_eq!(body["includedFields"]["paths"], json!(["businessStatus", "photos"]));
}

#[test]
fn default_fields_apply_without_configuration() {
    let body = body(keyed(), &Query::new("some-address"));
    let paths = body["includedFields"]["paths"].as_array().expect("paths");
    assert_eq!(paths.len(), 12);
    assert!(!paths.contains(&json!("addressComponents")));
}

#[test]
fn null_fields_omit_included_fields() {
    let configured = body(keyed().with_fields(Value::Null), &Query::new("some-address"));
    assert!(configured.get("includedFields").is_none());

    let given = body(keyed(), &Query::new("some-address").with_option("fields", Value::Null));
    assert!(given.get("includedFields").is_none());
}

#[test]
fn location_bias_precedence() {
    let configured_bias = "point:37.4275,-122.1697";
    let given_bias = "point:-36.8509,174.7645";

    let configured = body(keyed().with_locationbias(configured_bias), &Query::new("some-address"));
    assert_eq!(configured["locationBias"], configured_bias);

    let given = body(
        keyed().with_locationbias(configured_bias),
        &Query::new("some-address").with_option("locationbias", given_bias),
    );
    assert_eq!(given["locationBias"], given_bias);

    let suppressed = body(
        keyed().with_locationbias(configured_bias),
        &Query::new("some-address").with_option("locationbias", Value::Null),
    );
    assert!(suppressed.get("locationBias").is_none());
}

#[test]
fn extra_params_merge_into_the_body() {
    let body = body(
        keyed().with_param("pageSize", 5).with_param("openNow", true),
        &Query::new("coffee").with_option("params", json!({ "pageSize": 10, "openNow": null, "textQuery": "tea" })),
    );

    assert_eq!(body["pageSize"], 10);
    assert!(body.get("openNow").is_none());
    assert_eq!(body["textQuery"], "coffee");
}

#[test]
fn quota_and_permission_errors_follow_the_policy() {
    init_tracing();
    let cases = [
        (429, include_str!("data/places_quota_exceeded.json"), ErrorKind::QuotaExceeded),
        (403, include_str!("data/places_permission_denied.json"), ErrorKind::PermissionDenied),
    ];

    for (status, payload, kind) in cases {
        let lenient = PlacesSearch::new(&configuration(PlacesSearch::HANDLE, keyed()), StubTransport::json(status, payload));
        assert!(lenient.fetch(&Query::new("x")).expect("degraded").is_empty(), "{kind}");

        let other_kinds = ErrorKind::ALL.into_iter().filter(|candidate| *candidate != kind);
        let unrelated = PlacesSearch::new(
            &configuration(PlacesSearch::HANDLE, keyed()).with_always_raise(RaisePolicy::only(other_kinds)),
            StubTransport::json(status, payload),
        );
        assert!(unrelated.fetch(&Query::new("x")).expect("degraded").is_empty(), "{kind}");

        let strict = PlacesSearch::new(
            &configuration(PlacesSearch::HANDLE, keyed()).with_always_raise(RaisePolicy::only([kind])),
            StubTransport::json(status, payload),
        );
        assert_eq!(strict.fetch(&Query::new("x")).expect_err("raised").kind(), Some(kind));
    }
}

#[test]
fn http_errors_without_a_status_object_are_classified() {
    let strict = PlacesSearch::new(
        &configuration(PlacesSearch::HANDLE, keyed()).with_always_raise(RaisePolicy::all()),
        StubTransport::json(503, "<html>Service Unavailable</html>"),
    );
    let error = strict.fetch(&Query::new("x")).expect_err("raised");
    assert_eq!(error.kind(), Some(ErrorKind::Unclassified));
    assert!(error.to_string().contains("HTTP_503"), "{error}");
}

#[test]
fn empty_success_yields_no_places() {
    let lookup = PlacesSearch::new(&configuration(PlacesSearch::HANDLE, keyed()), StubTransport::ok("{}"));
    assert!(lookup.fetch(&Query::new("nowhere in particular")).expect("fetch").is_empty());
}

#[test]
fn transport_failures_degrade_unless_configured_to_raise() {
    init_tracing();
    let lenient = PlacesSearch::new(&configuration(PlacesSearch::HANDLE, keyed()), StubTransport::failing("connection reset"));
    assert!(lenient.fetch(&Query::new("x")).expect("degraded").is_empty());

    let strict = PlacesSearch::new(
        &configuration(PlacesSearch::HANDLE, keyed())
            .with_always_raise(RaisePolicy::all())
            .with_raise_on_transport_failure(true),
        StubTransport::failing("connection reset"),
    );
    let error = strict.fetch(&Query::new("x")).expect_err("raised");
    assert!(error.is_transport());
    assert_eq!(error.kind(), None);
}
