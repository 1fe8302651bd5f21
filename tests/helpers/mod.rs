use notegrid::domain::NoteRecord;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the GraphQL gateway is mounted on in the mock server
#[allow(dead_code)]
pub const GRAPHQL_PATH: &str = "/graphql";

#[allow(dead_code)]
pub fn graphql_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), GRAPHQL_PATH)
}

/// Answer any request whose body mentions `operation` with `{"data": data}`
#[allow(dead_code)]
pub async fn mount_graphql(server: &MockServer, operation: &str, data: Value) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn record_json(record: &NoteRecord) -> Value {
    json!({
        "id": record.id,
        "name": record.name,
        "description": record.description,
        "image": record.image,
    })
}

/// Known sample notes
#[allow(dead_code)]
pub mod sample_notes {
    use notegrid::domain::NoteRecord;

    pub fn groceries() -> NoteRecord {
        NoteRecord {
            id: "1".to_string(),
            name: "Groceries".to_string(),
            description: "Milk".to_string(),
            image: Some("img1.png".to_string()),
        }
    }

    pub fn todo() -> NoteRecord {
        NoteRecord {
            id: "2".to_string(),
            name: "Todo".to_string(),
            description: "Call the plumber\nBefore Friday".to_string(),
            image: None,
        }
    }

    pub const NONEXISTENT: &str = "does-not-exist";
}
