use super::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> Fetcher {
    let config = UpstreamConfig {
        base_url: server.uri(),
        client_id: "test-key".to_string(),
        ..Default::default()
    };
    Fetcher::new(&config).unwrap()
}

async fn mount_creatives(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/creativestofollow"))
        .and(query_param("page", "1"))
        .and(query_param("client_id", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_projects(server: &MockServer, username: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/projects", username)))
        .and(query_param("page", "1"))
        .and(query_param("client_id", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_project(server: &MockServer, id: i64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/{}", id)))
        .and(query_param("page", "1"))
        .and(query_param("client_id", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_project_detail_follows_the_chain() {
    let server = MockServer::start().await;

    mount_creatives(
        &server,
        json!({
            "creatives_to_follow": [
                { "id": 7, "username": "janedoe" },
                { "id": 8, "username": "someoneelse" }
            ],
            "http_code": 200
        }),
    )
    .await;
    mount_projects(
        &server,
        "janedoe",
        json!({ "projects": [{ "id": 4242 }, { "id": 1 }] }),
    )
    .await;
    mount_project(
        &server,
        4242,
        json!({
            "project": {
                "name": "Poster Series",
                "description": "Risograph prints",
                "covers": {
                    "115": "https://cdn.example.com/projects/115/abc.jpg",
                    "original": "https://cdn.example.com/projects/original/abc.jpg"
                }
            }
        }),
    )
    .await;

    let detail = fetcher_for(&server).fetch_project_detail().await.unwrap();

    assert_eq!(detail.title, "Poster Series");
    assert_eq!(detail.description, "Risograph prints");
    assert_eq!(
        detail.covers["original"],
        "https://cdn.example.com/projects/original/abc.jpg"
    );
}

#[tokio::test]
async fn test_empty_creatives_short_circuits() {
    let server = MockServer::start().await;

    mount_creatives(&server, json!({ "creatives_to_follow": [] })).await;

    // Later stages must never be called
    Mock::given(method("GET"))
        .and(path("/projects/0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch_project_detail()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Data(DataError::EmptyUpstreamList { ref list }) if list == "creatives_to_follow"
    ));
}

#[tokio::test]
async fn test_failed_first_call_degrades_to_empty_list_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/creativestofollow"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch_project_detail()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Data(DataError::EmptyUpstreamList { ref list }) if list == "creatives_to_follow"
    ));
}

#[tokio::test]
async fn test_empty_projects_short_circuits() {
    let server = MockServer::start().await;

    mount_creatives(
        &server,
        json!({ "creatives_to_follow": [{ "id": 1, "username": "janedoe" }] }),
    )
    .await;
    mount_projects(&server, "janedoe", json!({ "projects": [] })).await;

    let err = fetcher_for(&server)
        .fetch_project_detail()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Data(DataError::EmptyUpstreamList { ref list }) if list == "projects"
    ));
}

#[tokio::test]
async fn test_failed_detail_call_yields_zero_valued_project() {
    let server = MockServer::start().await;

    mount_creatives(
        &server,
        json!({ "creatives_to_follow": [{ "id": 1, "username": "janedoe" }] }),
    )
    .await;
    mount_projects(&server, "janedoe", json!({ "projects": [{ "id": 9 }] })).await;
    // No mock for /projects/9: the mock server answers 404 with an empty body

    let detail = fetcher_for(&server).fetch_project_detail().await.unwrap();

    assert!(detail.title.is_empty());
    assert!(detail.covers.is_empty());
}

#[tokio::test]
async fn test_fetch_surfaces_decode_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/creativestofollow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    let url = format!("{}/creativestofollow", server.uri());

    let result = fetcher.fetch::<CreativesPage>(&url).await;
    assert!(matches!(result, Err(Error::Network(_))));

    let page = fetcher.fetch_or_default::<CreativesPage>(&url).await;
    assert!(page.creatives_to_follow.is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream_degrades() {
    // Nothing listens on port 9 of localhost
    let fetcher = Fetcher::new(&UpstreamConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        client_id: "k".to_string(),
        ..Default::default()
    })
    .unwrap();

    let page = fetcher.creatives_to_follow().await;
    assert!(page.creatives_to_follow.is_empty());
}

#[test]
fn test_first_element_accessors() {
    let creatives = CreativesPage {
        creatives_to_follow: vec![
            Creative {
                id: 1,
                username: "a".into(),
            },
            Creative {
                id: 2,
                username: "b".into(),
            },
        ],
    };
    assert_eq!(first_creative(&creatives).unwrap().username, "a");

    let projects = ProjectsPage {
        projects: vec![ProjectRef { id: 5 }],
    };
    assert_eq!(first_project(&projects).unwrap().id, 5);

    assert!(first_project(&ProjectsPage::default()).is_err());
    assert!(first_creative(&CreativesPage::default()).is_err());
}
