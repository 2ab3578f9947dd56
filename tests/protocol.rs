use std::sync::{
    Arc,
    Mutex,
};

use async_trait::async_trait;
use axum::{
    body::{
        to_bytes,
        Body,
    },
    http::{
        Request,
        StatusCode,
    },
};
use pretty_assertions::assert_eq;
use renshuu_connect::{
    core::{
        diagnostics,
        ConnectError,
    },
    renshuu::{
        types::{
            ListCatalog,
            RemoteId,
            RemoteTerm,
        },
        Connector,
        RemoteApi,
    },
    server::{
        create_router,
        AppState,
    },
};
use serde_json::{
    json,
    Value,
};
use tower::ServiceExt;

#[derive(Default)]
struct FakeService {
    assigned: Mutex<Vec<(String, String)>>,
}

struct Session(Arc<FakeService>);

#[async_trait]
impl RemoteApi for Session {
    async fn list_catalog(&self) -> Result<ListCatalog, ConnectError> {
        Ok(serde_json::from_value(json!({
            "termtype_groups": [
                { "termtype": "vocab", "groups": [{ "title": "Core", "lists": [
                    { "list_id": 10, "title": "Week 1" },
                    { "list_id": 11, "title": "Week 2" }
                ] }] },
                { "termtype": "kanji", "groups": [{ "title": "Jouyou", "lists": [{ "list_id": 99, "title": "N5" }] }] }
            ]
        }))?)
    }

    async fn search_terms(&self, headword: &str) -> Result<Vec<RemoteTerm>, ConnectError> {
        if headword == "壊" {
            return Err(ConnectError::Upstream("Search is unavailable.".to_string()));
        }
        Ok(vec![
            RemoteTerm {
                id: RemoteId::Number(1),
                hiragana_full: "みず".to_string(),
                kanji_full: "水".to_string(),
                aforms: Vec::new(),
                edict_ent: Some(RemoteId::Number(1508640)),
            },
            RemoteTerm {
                id: RemoteId::Number(2),
                hiragana_full: "すい".to_string(),
                kanji_full: "水".to_string(),
                aforms: Vec::new(),
                edict_ent: Some(RemoteId::Number(2028990)),
            },
        ])
    }

    async fn assign_to_list(&self, term_id: &str, list_id: &str) -> Result<(), ConnectError> {
        self.0.assigned.lock().unwrap().push((term_id.to_string(), list_id.to_string()));
        Ok(())
    }
}

struct FakeConnector(Arc<FakeService>);

impl Connector for FakeConnector {
    fn connect(&self, _api_key: &str) -> Arc<dyn RemoteApi> {
        Arc::new(Session(self.0.clone()))
    }
}

fn app(service: Arc<FakeService>) -> axum::Router {
    create_router(AppState::new(Arc::new(FakeConnector(service))))
}

async fn post(router: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn add_note(japanese: &str, jmdict: Option<&str>) -> String {
    let mut fields = json!({ "Japanese": japanese, "English": "water" });
    if let Some(id) = jmdict {
        fields["jmdictId"] = json!(id);
    }
    json!({
        "action": "addNote",
        "version": 2,
        "key": "api-key",
        "params": { "note": { "fields": fields, "deckName": "11:Core:Week 2" } }
    })
    .to_string()
}

#[tokio::test]
async fn deck_names_list_only_vocabulary() {
    let (status, body) = post(
        app(Arc::default()),
        json!({ "action": "deckNames", "version": 2, "key": "k" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["10:Core:Week 1", "11:Core:Week 2"]));
}

#[tokio::test]
async fn dictionary_id_selects_the_term() {
    let service = Arc::new(FakeService::default());
    let (_, body) = post(app(service.clone()), add_note("水/みず", Some("2028990"))).await;
    assert_eq!(body, json!(1));
    assert_eq!(*service.assigned.lock().unwrap(), vec![("2".to_string(), "11".to_string())]);
}

#[tokio::test]
async fn reading_selects_the_term_without_dictionary_id() {
    let service = Arc::new(FakeService::default());
    let (_, body) = post(app(service.clone()), add_note("水/すい", None)).await;
    assert_eq!(body, json!(1));
    assert_eq!(*service.assigned.lock().unwrap(), vec![("2".to_string(), "11".to_string())]);
}

#[tokio::test]
async fn unmatched_note_is_null_and_logged() {
    let service = Arc::new(FakeService::default());
    let (status, body) = post(app(service.clone()), add_note("水/みずみず", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert!(service.assigned.lock().unwrap().is_empty());
    assert!(diagnostics::global()
        .snapshot()
        .iter()
        .any(|entry| entry.message.contains("no match for '水'")));
}

#[tokio::test]
async fn upstream_failure_is_still_http_ok() {
    let (status, body) = post(app(Arc::default()), add_note("壊", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": null, "error": "Search is unavailable." }));
}

#[tokio::test]
async fn invalid_json_is_still_http_ok() {
    let (status, body) = post(app(Arc::default()), "{\"action\": ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], Value::Null);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn log_endpoint_shows_diagnostics() {
    diagnostics::record("log endpoint check");
    let request = Request::builder().uri("/log").body(Body::empty()).unwrap();
    let response = app(Arc::default()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("log endpoint check"));
}
