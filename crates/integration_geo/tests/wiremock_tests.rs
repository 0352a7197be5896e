//! Integration tests for the geocoding and routing clients (wiremock-based)

use domain::Coordinate;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_geo::{
    GeocodingClient, GeocodingError, MapplsConfig, MapplsGeocodingClient, MapplsRoutingClient,
    NominatimConfig, NominatimGeocodingClient, OsrmConfig, OsrmRoutingClient, RoutingClient,
    RoutingError,
};

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn mappls_for_mock(base_url: &str) -> MapplsConfig {
    MapplsConfig {
        geocode_base_url: base_url.to_string(),
        routing_base_url: base_url.to_string(),
        ..MapplsConfig::for_testing()
    }
}

fn osrm_for_mock(base_url: &str) -> OsrmConfig {
    OsrmConfig {
        base_url: base_url.to_string(),
        ..OsrmConfig::for_testing()
    }
}

fn delhi() -> Coordinate {
    Coordinate::new(77.209, 28.6139).unwrap()
}

fn jaipur() -> Coordinate {
    Coordinate::new(75.7873, 26.9124).unwrap()
}

const fn route_json() -> &'static str {
    r#"{"code": "Ok", "routes": [{"distance": 281500.0, "duration": 18300.0}]}"#
}

// =============================================================================
// Nominatim
// =============================================================================

#[tokio::test]
async fn nominatim_geocodes_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Jaipur"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "26.9124", "lon": "75.7873", "display_name": "Jaipur, Rajasthan, India"}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let coordinate = client.geocode("Jaipur").await.unwrap();

    assert!((coordinate.latitude() - 26.9124).abs() < 1e-6);
    assert!((coordinate.longitude() - 75.7873).abs() < 1e-6);
}

#[tokio::test]
async fn nominatim_sends_user_agent_and_country_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("user-agent", "travel-advisor-tests"))
        .and(query_param("countrycodes", "in"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"lat": "19.0760", "lon": "72.8777"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        user_agent: "travel-advisor-tests".to_string(),
        country_filter: "in".to_string(),
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    assert!(client.geocode("Mumbai").await.is_ok());
}

#[tokio::test]
async fn nominatim_empty_result_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client.geocode("Atlantis").await;

    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}

#[tokio::test]
async fn nominatim_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client.geocode("Jaipur").await;

    assert!(matches!(result, Err(GeocodingError::RequestFailed(_))));
}

#[tokio::test]
async fn nominatim_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client.geocode("Jaipur").await;

    assert!(matches!(
        result,
        Err(GeocodingError::RateLimitExceeded {
            retry_after_secs: Some(2)
        })
    ));
}

#[tokio::test]
async fn nominatim_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client.geocode("Jaipur").await;

    assert!(matches!(result, Err(GeocodingError::ParseError(_))));
}

#[tokio::test]
async fn nominatim_blank_place_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client.geocode("   ").await;

    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}

// =============================================================================
// Mappls geocoding
// =============================================================================

#[tokio::test]
async fn mappls_geocodes_with_bearer_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/geocode"))
        .and(query_param("address", "Bengaluru"))
        .and(header("authorization", "bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"copResults": {"latitude": "12.9716", "longitude": "77.5946", "formattedAddress": "Bengaluru, Karnataka"}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = MapplsGeocodingClient::new(&mappls_for_mock(&server.uri()), "test-key").unwrap();
    let coordinate = client.geocode("Bengaluru").await.unwrap();

    assert!((coordinate.latitude() - 12.9716).abs() < 1e-6);
    assert!((coordinate.longitude() - 77.5946).abs() < 1e-6);
}

#[tokio::test]
async fn mappls_geocode_accepts_result_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"copResults": [{"latitude": 12.9716, "longitude": 77.5946}, {"latitude": 1.0, "longitude": 1.0}]}"#,
        ))
        .mount(&server)
        .await;

    let client = MapplsGeocodingClient::new(&mappls_for_mock(&server.uri()), "test-key").unwrap();
    let coordinate = client.geocode("Bengaluru").await.unwrap();

    assert!((coordinate.latitude() - 12.9716).abs() < 1e-6);
}

#[tokio::test]
async fn mappls_geocode_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/geocode"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = MapplsGeocodingClient::new(&mappls_for_mock(&server.uri()), "bad-key").unwrap();
    let result = client.geocode("Bengaluru").await;

    assert!(matches!(result, Err(GeocodingError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn mappls_geocode_without_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = MapplsGeocodingClient::new(&mappls_for_mock(&server.uri()), "test-key").unwrap();
    let result = client.geocode("Atlantis").await;

    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn osrm_routes_between_coordinates() {
    let server = MockServer::start().await;
    let route_path = format!(
        "/route/v1/driving/{};{}",
        delhi().to_path_segment(),
        jaipur().to_path_segment()
    );

    Mock::given(method("GET"))
        .and(path(route_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let summary = client.route(&delhi(), &jaipur()).await.unwrap();

    assert!((summary.distance_meters - 281_500.0).abs() < f64::EPSILON);
    assert!((summary.duration_seconds - 18_300.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn osrm_no_route_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"code": "NoRoute", "routes": []}"#),
        )
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let result = client.route(&delhi(), &jaipur()).await;

    assert!(matches!(result, Err(RoutingError::NoRoute(_))));
}

#[tokio::test]
async fn osrm_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let result = client.route(&delhi(), &jaipur()).await;

    assert!(matches!(result, Err(RoutingError::RequestFailed(_))));
}

#[tokio::test]
async fn mappls_routes_with_key_in_path() {
    let server = MockServer::start().await;
    let route_path = format!(
        "/test-key/route_adv/driving/{};{}",
        delhi().to_path_segment(),
        jaipur().to_path_segment()
    );

    Mock::given(method("GET"))
        .and(path(route_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = MapplsRoutingClient::new(&mappls_for_mock(&server.uri()), "test-key").unwrap();
    let summary = client.route(&delhi(), &jaipur()).await.unwrap();

    assert!((summary.distance_meters - 281_500.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn mappls_route_missing_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code": "Ok", "routes": []}"#))
        .mount(&server)
        .await;

    let client = MapplsRoutingClient::new(&mappls_for_mock(&server.uri()), "test-key").unwrap();
    let result = client.route(&delhi(), &jaipur()).await;

    assert!(matches!(result, Err(RoutingError::NoRoute(_))));
}

#[tokio::test]
async fn mappls_route_connection_error_omits_key() {
    let config = mappls_for_mock("http://127.0.0.1:1");
    let client = MapplsRoutingClient::new(&config, "route-secret").unwrap();
    let err = client.route(&delhi(), &jaipur()).await.unwrap_err();

    assert!(matches!(err, RoutingError::ConnectionFailed(_)), "{err}");
    assert!(!err.to_string().contains("route-secret"), "{err}");
}

#[tokio::test]
async fn mappls_route_malformed_body_omits_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = MapplsRoutingClient::new(&mappls_for_mock(&server.uri()), "route-secret").unwrap();
    let err = client.route(&delhi(), &jaipur()).await.unwrap_err();

    assert!(matches!(err, RoutingError::ParseError(_)), "{err}");
    assert!(!err.to_string().contains("route-secret"), "{err}");
}
