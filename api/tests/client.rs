use mockito::Matcher;
use stands_api::client::{ApiError, ErrorKind, FootballApi};
use stands_api::source::{FixtureQuery, SportsData};
use std::collections::BTreeSet;
use std::net::TcpListener;
use std::time::Duration;

const KEY: &str = "test-key";

fn api_for(server: &mockito::ServerGuard) -> FootballApi {
    FootballApi::new(KEY).with_base_urls(&server.url(), &server.url())
}

const TEAMS_BODY: &str = r#"{
  "get": "teams",
  "errors": [],
  "results": 2,
  "response": [
    { "team": { "id": 257, "name": "Rangers", "logo": "https://media.example/257.png" },
      "venue": { "name": "Ibrox Stadium", "city": "Glasgow" } },
    { "team": { "id": 247, "name": "Celtic", "logo": "https://media.example/247.png" },
      "venue": { "name": "Celtic Park", "city": "Glasgow" } }
  ]
}"#;

#[tokio::test]
async fn list_teams_sends_key_and_country_and_keeps_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/teams")
        .match_query(Matcher::UrlEncoded("country".into(), "Northern Ireland".into()))
        .match_header("x-apisports-key", KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TEAMS_BODY)
        .create_async()
        .await;

    let teams = api_for(&server).list_teams("Northern Ireland").await.unwrap();

    mock.assert_async().await;
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Rangers", "Celtic"]);
    assert_eq!(teams[0].venue_label(), "Ibrox Stadium, Glasgow");
}

#[tokio::test]
async fn empty_response_array_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/teams")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"errors":[],"results":0,"response":[]}"#)
        .create_async()
        .await;

    let teams = api_for(&server).list_teams("Wales").await.unwrap();
    assert!(teams.is_empty());
}

#[tokio::test]
async fn missing_response_field_is_provider_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/teams")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"message":"nope"}"#)
        .create_async()
        .await;

    let err = api_for(&server).list_teams("Wales").await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed { .. }), "got {err}");
    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
}

#[tokio::test]
async fn provider_errors_with_http_200_are_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/teams")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"errors":{"requests":"You have reached the request limit for the day"},"response":[]}"#)
        .create_async()
        .await;

    let err = api_for(&server).list_teams("Scotland").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
    assert!(err.to_string().contains("request limit"), "got {err}");
}

#[tokio::test]
async fn server_error_and_garbage_body_are_provider_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/teams")
        .match_query(Matcher::UrlEncoded("country".into(), "England".into()))
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("GET", "/teams")
        .match_query(Matcher::UrlEncoded("country".into(), "Wales".into()))
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let api = api_for(&server);
    let err = api.list_teams("England").await.unwrap_err();
    assert!(matches!(err, ApiError::Api(..)), "got {err}");
    let err = api.list_teams("Wales").await.unwrap_err();
    assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
}

#[tokio::test]
async fn teams_by_ids_asks_for_each_id() {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    for (id, name) in [(247, "Celtic"), (257, "Rangers")] {
        let body = format!(
            r#"{{"errors":[],"response":[{{"team":{{"id":{id},"name":"{name}","logo":""}},"venue":{{}}}}]}}"#
        );
        let mock = server
            .mock("GET", "/teams")
            .match_query(Matcher::UrlEncoded("id".into(), id.to_string()))
            .match_header("x-apisports-key", KEY)
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }

    let ids: BTreeSet<u32> = [257, 247].into_iter().collect();
    let teams = api_for(&server).list_teams_by_ids(&ids).await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    let found: Vec<u32> = teams.iter().map(|t| t.id).collect();
    assert_eq!(found, vec![247, 257]);
}

#[tokio::test]
async fn teams_by_ids_fails_when_one_lookup_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/teams")
        .match_query(Matcher::UrlEncoded("id".into(), "247".into()))
        .with_status(500)
        .create_async()
        .await;

    let ids: BTreeSet<u32> = [247, 257].into_iter().collect();
    let err = api_for(&server).list_teams_by_ids(&ids).await.unwrap_err();

    assert!(matches!(err, ApiError::Api(..)), "got {err}");
    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
}

#[tokio::test]
async fn teams_by_empty_id_set_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let teams = api_for(&server).list_teams_by_ids(&BTreeSet::new()).await.unwrap();

    mock.assert_async().await;
    assert!(teams.is_empty());
}

#[tokio::test]
async fn fixtures_request_carries_season_and_window() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/fixtures")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("team".into(), "247".into()),
            Matcher::UrlEncoded("season".into(), "2025".into()),
            Matcher::UrlEncoded("next".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"errors":[],"response":[
              {"fixture":{"id":11,"date":"2025-10-04T14:00:00+00:00","timestamp":1759586400},
               "teams":{"home":{"id":247,"name":"Celtic"},"away":{"id":252,"name":"Motherwell"}},
               "goals":{"home":null,"away":null}},
              {"fixture":{"id":12,"date":"2025-10-18T11:30:00+00:00","timestamp":1760787000},
               "teams":{"home":{"id":254,"name":"Hearts"},"away":{"id":247,"name":"Celtic"}},
               "goals":{"home":null,"away":null}}
            ]}"#,
        )
        .create_async()
        .await;

    let fixtures = api_for(&server)
        .list_fixtures(247, FixtureQuery::next(2025, 5))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(fixtures.len(), 2);
    assert_eq!(fixtures[0].id, Some(11));
    assert_eq!(fixtures[1].home, "Hearts");
    assert!(fixtures[0].kickoff < fixtures[1].kickoff);
}

#[tokio::test]
async fn fixture_without_kickoff_rejects_the_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/fixtures")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"response":[{"fixture":{"id":1},"teams":{"home":{"name":"A"},"away":{"name":"B"}}}]}"#,
        )
        .create_async()
        .await;

    let err = api_for(&server)
        .list_fixtures(1, FixtureQuery::whole_season(2024))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Malformed { .. }), "got {err}");
}

#[tokio::test]
async fn reverse_geocode_returns_raw_country() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/reverse")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "jsonv2".into()),
            Matcher::UrlEncoded("lat".into(), "55.8642".into()),
            Matcher::UrlEncoded("lon".into(), "-4.2518".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"address":{"city":"Glasgow","state":"Scotland","country":"United Kingdom","country_code":"gb"}}"#)
        .create_async()
        .await;

    let country = api_for(&server).reverse_geocode(55.8642, -4.2518).await.unwrap();

    mock.assert_async().await;
    assert_eq!(country, "United Kingdom");
}

#[tokio::test]
async fn geocoder_failures_are_geo_lookup_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/reverse")
        .match_query(Matcher::UrlEncoded("lat".into(), "0".into()))
        .with_status(200)
        .with_body(r#"{"error":"Unable to geocode"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/reverse")
        .match_query(Matcher::UrlEncoded("lat".into(), "1".into()))
        .with_status(500)
        .create_async()
        .await;

    let api = api_for(&server);
    let err = api.reverse_geocode(0.0, 0.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeoLookupFailed);
    let err = api.reverse_geocode(1.0, 0.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeoLookupFailed);
}

#[tokio::test]
async fn unreachable_provider_is_provider_unavailable() {
    let api = FootballApi::new(KEY).with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
    let err = api.list_teams("Scotland").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(..)), "got {err}");
    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
}

/// Accepts connections and never writes a byte back.
fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    url
}

#[tokio::test]
async fn slow_provider_times_out_as_provider_unavailable() {
    let url = silent_server();
    let api = FootballApi::new(KEY)
        .with_base_urls(&url, &url)
        .with_timeout(Duration::from_millis(200));

    let err = api.list_teams("Scotland").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(..)), "got {err}");
    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);

    let err = api.reverse_geocode(55.86, -4.25).await.unwrap_err();
    assert!(matches!(err, ApiError::GeoLookup(..)), "got {err}");
    assert_eq!(err.kind(), ErrorKind::GeoLookupFailed);
}
