mod support;

use std::sync::Arc;
use std::thread;

use serde_json::{Value, json};
use support::{API_KEY, StubTransport, configuration, init_tracing, keyed};
use wayfinder_engine::{BusinessStatus, ConfigError, Lookup, LookupError, PlacesDetails, PriceLevel, Protocol, RaisePolicy};
use wayfinder_types::{ErrorKind, Query, RequestMethod};

const PLACE_ID: &str = "ChIJhRwB-yFawokR5Phil-QQ3zM";

fn madison_square_garden() -> &'static str {
    include_str!("data/places_details_madison_square_garden.json")
}

fn lookup(settings: wayfinder_engine::ProviderSettings, transport: Arc<StubTransport>) -> PlacesDetails {
    PlacesDetails::new(&configuration(PlacesDetails::HANDLE, settings), transport)
}

#[test]
fn fetches_a_place_by_identifier() {
    init_tracing();
    let transport = StubTransport::ok(madison_square_garden());
    let places = lookup(keyed(), transport.clone()).fetch(&Query::new(PLACE_ID)).expect("fetch");

    assert_eq!(places.len(), 1);
    let place = &places[0];
    assert_eq!(place.latitude(), Some(40.750504));
    assert_eq!(place.longitude(), Some(-73.993439));
    assert_eq!(place.place_id(), Some(PLACE_ID));
    assert_eq!(place.name(), Some("Madison Square Garden"));
    assert_eq!(place.types(), vec!["stadium", "establishment"]);
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn exposes_the_full_accessor_surface() {
    let places = lookup(keyed(), StubTransport::ok(madison_square_garden()))
        .fetch(&Query::new(PLACE_ID))
        .expect("fetch");
    let place = &places[0];

    assert_eq!(place.formatted_address(), Some("4 Pennsylvania Plaza, New York, NY 10001, USA"));
    assert_eq!(place.address(), place.formatted_address());
    assert_eq!(place.vicinity(), Some("4 Pennsylvania Plaza, New York"));
    assert_eq!(place.website(), Some("https://www.msg.com/madison-square-garden"));
    assert_eq!(place.maps_url(), Some("https://maps.google.com/?cid=3723238046466211172"));
    assert_eq!(place.rating(), Some(4.5));
    assert_eq!(place.rating_count(), Some(41280));
    assert_eq!(place.price_level(), Some(PriceLevel::Expensive));
    assert_eq!(place.business_status(), Some(BusinessStatus::Operational));
    assert!(!place.permanently_closed());
    assert_eq!(place.opening_periods().len(), 2);
    assert_eq!(place.open_now(), Some(false));
    assert_eq!(place.photos().len(), 1);
    assert_eq!(place.phone_number(), Some("+1 212-465-6741"));
    assert!(place.reviews().is_empty());
    assert_eq!(place.address_components().len(), 7);
}

#[test]
fn decomposes_address_components() {
    let places = lookup(keyed(), StubTransport::ok(madison_square_garden()))
        .fetch(&Query::new(PLACE_ID))
        .expect("fetch");
    let place = &places[0];

    let sublocality = place.address_components_of_type("sublocality");
    assert_eq!(sublocality.len(), 1);
    assert_eq!(sublocality[0]["longText"], "Manhattan");

    assert_eq!(place.street_number(), Some("4"));
    assert_eq!(place.route(), Some("Pennsylvania Plaza"));
    assert_eq!(place.street_address().as_deref(), Some("4 Pennsylvania Plaza"));
    assert_eq!(place.city(), Some("New York"));
    assert_eq!(place.state(), Some("New York"));
    assert_eq!(place.state_code(), Some("NY"));
    assert_eq!(place.country(), Some("United States"));
    assert_eq!(place.country_code(), Some("US"));
    assert_eq!(place.postal_code(), Some("10001"));
    assert_eq!(place.neighborhood(), None);
}

#[test]
fn builds_a_get_request_with_credentials_in_headers() {
    let request = lookup(keyed(), StubTransport::ok("{}")).build_request(&Query::new(PLACE_ID)).expect("request");

    assert_eq!(request.method, RequestMethod::Get);
    assert_eq!(request.url.scheme(), "https");
    assert_eq!(request.url.host_str(), Some("places.googleapis.com"));
    assert_eq!(request.url.path(), format!("/v1/places/{PLACE_ID}"));
    assert_eq!(request.header("x-goog-api-key"), Some(API_KEY));
    assert!(!request.url.as_str().contains(API_KEY));
    assert!(!request.cache_key().contains(API_KEY));
    assert!(request.body.is_none());
}

#[test]
fn strips_the_places_prefix_and_encodes_identifiers() {
    let details = lookup(keyed(), StubTransport::ok("{}"));

    let prefixed = details.build_request(&Query::new(format!("places/{PLACE_ID}"))).expect("request");
    assert_eq!(prefixed.url.path(), format!("/v1/places/{PLACE_ID}"));

    let odd = details.build_request(&Query::new("a/b c?d")).expect("request");
    assert_eq!(odd.url.path(), "/v1/places/a%2Fb%20c%3Fd");
}

#[test]
fn dot_segment_identifiers_never_leave_the_details_path() {
    let transport = StubTransport::ok(madison_square_garden());
    let details = lookup(keyed(), transport.clone());

    for text in [".", "..", "places/..", "places/"] {
        let error = details.build_request(&Query::new(text)).expect_err("unaddressable");
        assert!(matches!(error, ConfigError::InvalidIdentifier { .. }), "{text}: {error:?}");
        assert!(details.fetch(&Query::new(text)).expect("degraded").is_empty());
    }
    assert!(transport.requests().is_empty());

    let strict = PlacesDetails::new(
        &configuration(PlacesDetails::HANDLE, keyed()).with_always_raise(RaisePolicy::only([ErrorKind::InvalidArgument])),
        transport.clone(),
    );
    let error = strict.fetch(&Query::new("places/..")).expect_err("raised");
    assert_eq!(error.kind(), Some(ErrorKind::InvalidArgument));
    assert!(transport.requests().is_empty());

    let dotted = details.build_request(&Query::new("...")).expect("request");
    assert_eq!(dotted.url.path(), "/v1/places/...");
}

#[test]
fn query_language_wins_over_configuration() {
    let details = lookup(keyed().with_language("de").with_region("us"), StubTransport::ok("{}"));

    let configured = details.build_request(&Query::new(PLACE_ID)).expect("request");
    assert_eq!(configured.query_parameter("languageCode").as_deref(), Some("de"));
    assert_eq!(configured.query_parameter("regionCode").as_deref(), Some("us"));

    let explicit = details
        .build_request(&Query::new(PLACE_ID).with_language("fr").with_option("region", "ca"))
        .expect("request");
    assert_eq!(explicit.query_parameter("languageCode").as_deref(), Some("fr"));
    assert_eq!(explicit.query_parameter("regionCode").as_deref(), Some("ca"));

    let neither = lookup(keyed(), StubTransport::ok("{}")).build_request(&Query::new(PLACE_ID)).expect("request");
    assert_eq!(neither.url.query(), None);
}

#[test]
fn url_round_trips_query_values() {
    let query = Query::new(PLACE_ID)
        .with_language("pt-BR")
        .with_option("region", "br")
        .with_option("params", json!({ "sessionToken": "token with spaces&more" }));
    let request = lookup(keyed(), StubTransport::ok("{}")).build_request(&query).expect("request");

    let identifier = request.url.path_segments().and_then(|mut segments| segments.next_back()).map(str::to_string);
    assert_eq!(identifier.as_deref(), Some(PLACE_ID));
    assert_eq!(request.query_parameter("languageCode").as_deref(), Some("pt-BR"));
    assert_eq!(request.query_parameter("regionCode").as_deref(), Some("br"));
    assert_eq!(request.query_parameter("sessionToken").as_deref(), Some("token with spaces&more"));
}

#[test]
fn field_mask_header_follows_precedence() {
    let transport = StubTransport::ok("{}");

    let default_mask = lookup(keyed(), transport.clone()).build_request(&Query::new(PLACE_ID)).expect("request");
    let header = default_mask.header("X-Goog-FieldMask").expect("default mask");
    assert!(header.starts_with("id,displayName.text,formattedAddress,location"), "{header}");
    assert!(header.ends_with("internationalPhoneNumber,addressComponents"), "{header}");

    let configured = lookup(keyed().with_fields(json!(["rating"])), transport.clone());
    let request = configured.build_request(&Query::new(PLACE_ID)).expect("request");
    assert_eq!(request.header("X-Goog-FieldMask"), Some("rating"));

    let explicit = configured
        .build_request(&Query::new(PLACE_ID).with_option("fields", "id, types"))
        .expect("request");
    assert_eq!(explicit.header("X-Goog-FieldMask"), Some("id,types"));

    let empty = configured.build_request(&Query::new(PLACE_ID).with_option("fields", json!([]))).expect("request");
    assert_eq!(empty.header("X-Goog-FieldMask"), None);

    let suppressed = lookup(keyed().with_fields(Value::Null), transport);
    let request = suppressed.build_request(&Query::new(PLACE_ID)).expect("request");
    assert_eq!(request.header("X-Goog-FieldMask"), None);
}

#[test]
fn invalid_argument_degrades_unless_raised() {
    init_tracing();
    let payload = include_str!("data/places_details_invalid_argument.json");

    let places = lookup(keyed(), StubTransport::json(400, payload))
        .fetch(&Query::new("invalid request"))
        .expect("degraded");
    assert!(places.is_empty());

    let strict = PlacesDetails::new(
        &configuration(PlacesDetails::HANDLE, keyed()).with_always_raise(RaisePolicy::only([ErrorKind::InvalidArgument])),
        StubTransport::json(400, payload),
    );
    let error = strict.fetch(&Query::new("invalid request")).expect_err("raised");
    assert_eq!(error.kind(), Some(ErrorKind::InvalidArgument));
    assert!(error.to_string().contains("Not a valid Place ID"), "{error}");
}

#[test]
fn reverse_queries_are_rejected_without_a_network_call() {
    let transport = StubTransport::ok(madison_square_garden());
    let details = lookup(keyed(), transport.clone());
    let query = Query::reverse(40.750504, -73.993439);

    let request = details.build_request(&query).expect("request still builds");
    assert_eq!(request.url.path(), "/v1/places/40.750504%2C-73.993439");

    assert!(details.fetch(&query).expect("degraded").is_empty());
    assert!(transport.requests().is_empty());

    let strict = PlacesDetails::new(
        &configuration(PlacesDetails::HANDLE, keyed()).with_always_raise(RaisePolicy::all()),
        transport.clone(),
    );
    let error = strict.fetch(&query).expect_err("raised");
    assert!(matches!(error, LookupError::InvalidArgument { .. }), "{error:?}");
    assert!(transport.requests().is_empty());
}

#[test]
fn missing_key_fails_before_any_request() {
    let transport = StubTransport::ok(madison_square_garden());
    let details = lookup(wayfinder_engine::ProviderSettings::default(), transport.clone());

    let error = details.fetch(&Query::new(PLACE_ID)).expect_err("missing key");
    assert!(matches!(error, LookupError::Config(ConfigError::MissingCredentials { .. })), "{error:?}");
    assert!(transport.requests().is_empty());
}

#[test]
fn plain_http_is_a_configuration_error() {
    let details = lookup(keyed().with_protocol(Protocol::Http), StubTransport::ok("{}"));
    let error = details.build_request(&Query::new(PLACE_ID)).expect_err("http rejected");
    assert!(matches!(error, ConfigError::UnsupportedProtocol { protocol: Protocol::Http, .. }));
}

#[test]
fn shared_lookup_serves_concurrent_calls() {
    let transport = StubTransport::ok(madison_square_garden());
    let details = Arc::new(lookup(keyed(), transport.clone()));

    let handles = (0..4)
        .map(|_| {
            let details = Arc::clone(&details);
            thread::spawn(move || details.fetch(&Query::new(PLACE_ID)).expect("fetch").len())
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().expect("thread"), 1);
    }
    assert_eq!(transport.requests().len(), 4);
}
