use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Topup, SEED_BANK_ID, SEED_MUTATION_ID, SEED_TOPUP_ID};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "Bearer abcdefghijklmnopqrstuvwxyz";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn message(response: axum::response::Response) -> String {
    let body: Value = body_json(response).await;
    body["message"].as_str().unwrap().to_string()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .body(String::new())
        .unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/v2/mutation").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Unauthenticated.");
}

#[tokio::test]
async fn empty_bearer_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v2/topup")
                .header(http::header::AUTHORIZATION, "Bearer ")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- mutation ---

#[tokio::test]
async fn list_mutations_filters_by_bank() {
    let resp = app()
        .oneshot(get_request(&format!("/v2/mutation?type=CR&bank={SEED_BANK_ID}&page=1&per_page=20")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["mutation_id"], SEED_MUTATION_ID);
}

#[tokio::test]
async fn list_mutations_unknown_bank_returns_404() {
    let resp = app().oneshot(get_request("/v2/mutation?bank=1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(message(resp).await, "Bank not found");
}

#[tokio::test]
async fn store_mutation_returns_summary() {
    let resp = app()
        .oneshot(json_request(
            "/v2/mutation/store",
            r#"{"date":"2021-09-21","note":"Testing Note Mutation","amount":"2000123","type":"CR"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": false, "mutation": {"total": 1, "new": 1}}));
}

#[tokio::test]
async fn store_mutation_without_type_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "/v2/mutation/store",
            r#"{"date":"2021-09-21","note":"Testing Note Mutation","amount":"2000123","type":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn note_on_unknown_mutation_returns_404() {
    let resp = app()
        .oneshot(json_request("/v2/mutation/1/note", r#"{"note":"Testing Note Mutation"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn webhook_for_known_mutation() {
    let resp = app()
        .oneshot(json_request(&format!("/v2/mutation/{SEED_MUTATION_ID}/webhook"), "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn destroy_with_empty_list_returns_422() {
    let resp = app()
        .oneshot(json_request("/v2/mutation/destroy", r#"{"mutations":[]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn destroy_with_unknown_ids_returns_500() {
    let resp = app()
        .oneshot(json_request("/v2/mutation/destroy", r#"{"mutations":["abcdefg","efgh"]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(resp).await, "Server Error");
}

// --- bank ---

#[tokio::test]
async fn update_unknown_bank_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "/v2/bank/update/nope",
            r#"{"bank_type":"bca","username":"u","name_holder":"n","account_number":"1","is_active":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_bank_requires_fields() {
    let resp = app().oneshot(json_request("/v2/bank/store", "{}")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- top-up ---

#[tokio::test]
async fn store_topup_below_minimum_returns_422() {
    let resp = app()
        .oneshot(json_request("/v2/topup/store", r#"{"amount":500,"payment_method":"bca"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn confirm_topup_requires_multipart() {
    let resp = app()
        .oneshot(json_request(&format!("/v2/topup/{SEED_TOPUP_ID}/manual-confirmation"), "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

fn multipart_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(body.to_string())
        .unwrap()
}

#[tokio::test]
async fn confirm_topup_requires_file_part_with_filename() {
    let body = "--XYZ\r\nContent-Disposition: form-data; name=\"file\"\r\n\r\nbytes\r\n--XYZ--\r\n";
    let resp = app()
        .oneshot(multipart_request(&format!("/v2/topup/{SEED_TOPUP_ID}/manual-confirmation"), body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(message(resp).await, "The file field is required.");
}

#[tokio::test]
async fn confirm_topup_ignores_file_name_mentioned_in_other_parts() {
    let body = "--XYZ\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nname=\"file\"\r\n--XYZ--\r\n";
    let resp = app()
        .oneshot(multipart_request(&format!("/v2/topup/{SEED_TOPUP_ID}/manual-confirmation"), body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn confirm_topup_rejects_truncated_body() {
    let body = "--XYZ\r\nContent-Disposition: form-data; name=\"file\"; filename=\"p.jpg\"\r\n\r\nbytes";
    let resp = app()
        .oneshot(multipart_request(&format!("/v2/topup/{SEED_TOPUP_ID}/manual-confirmation"), body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn confirm_topup_echoes_uploaded_filename() {
    let body = "--XYZ\r\nContent-Disposition: form-data; name=\"file\"; filename=\"proof.jpg\"\r\n\r\nbytes\r\n--XYZ--\r\n";
    let resp = app()
        .oneshot(multipart_request(&format!("/v2/topup/{SEED_TOPUP_ID}/manual-confirmation"), body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["filename"], "proof.jpg");
}

// --- full top-up lifecycle ---

#[tokio::test]
async fn topup_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("/v2/topup/store", r#"{"amount":100000,"payment_method":"bca"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Topup = body_json(resp).await;
    assert_eq!(created.status, "pending");
    let id = created.topup_id;

    // list: seed plus the new one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/v2/topup?page=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["current_page"], 1);

    // confirm
    let boundary = "XYZ";
    let multipart = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"proof.jpg\"\r\n\r\nbytes\r\n--{boundary}--\r\n"
    );
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!("/v2/topup/{id}/manual-confirmation"))
                .header(http::header::AUTHORIZATION, TOKEN)
                .header(http::header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
                .body(multipart)
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // list again: status changed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/v2/topup"))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    let confirmed = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["topup_id"] == id.as_str())
        .unwrap();
    assert_eq!(confirmed["status"], "waiting-confirmation");
}
