//! Verify dispatch outcomes and built requests against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON, not raw strings, so field ordering in
//! the vectors does not matter.

use moota_core::{
    dispatch, Config, CreateTopup, EndpointCatalog, HttpBody, HttpMethod, HttpRequest, HttpResponse,
    MootaClient, MootaError,
};
use moota_core::testing::ScriptedTransport;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> MootaClient<ScriptedTransport> {
    MootaClient::with_transport(Config::new("abc").with_base_url(BASE_URL), ScriptedTransport::default())
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn dispatch_test_vectors() {
    let raw = include_str!("../../test-vectors/dispatch.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let catalog = EndpointCatalog::standard();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["url"].as_str().unwrap();
        let result = dispatch(&catalog, &simulated(case), url);

        if let Some(expected) = case.get("expected_error") {
            let err = result.unwrap_err();
            let kind_matches = match expected["kind"].as_str().unwrap() {
                "api" => matches!(err, MootaError::Api(_)),
                "mutation" => matches!(err, MootaError::Mutation(_)),
                other => panic!("{name}: unknown error kind: {other}"),
            };
            assert!(kind_matches, "{name}: wrong error variant {err:?}");
            let failure = err.failure().unwrap();
            assert_eq!(u64::from(failure.status_code), expected["status"].as_u64().unwrap(), "{name}: status");
            assert_eq!(failure.message, expected["message"].as_str().unwrap(), "{name}: message");
        } else {
            let expected = &case["expected"];
            let response = result.unwrap();
            assert_eq!(response.kind_name(), expected["kind"].as_str().unwrap(), "{name}: kind");
            assert_eq!(response.into_json(), expected["data"], "{name}: data");
        }
    }
}

// ---------------------------------------------------------------------------
// Top-up requests
// ---------------------------------------------------------------------------

fn build(c: &MootaClient<ScriptedTransport>, case: &serde_json::Value) -> HttpRequest {
    let topup = c.topup();
    match case["operation"].as_str().unwrap() {
        "payment_methods" => topup.build_payment_methods(),
        "topup_amounts" => topup.build_topup_amounts(),
        "list" => topup.build_list(case["input"]["page"].as_u64().unwrap() as u32),
        "create" => {
            let input: CreateTopup = serde_json::from_value(case["input"].clone()).unwrap();
            topup.build_create(&input).unwrap()
        }
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn topup_request_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];
        let req = build(&c, case);

        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.header("Authorization"), Some("Bearer abc"), "{name}: auth");
        assert_eq!(req.header("Accept"), Some("application/json"), "{name}: accept");
        assert_eq!(req.header("User-Agent"), Some("Moota/2.0"), "{name}: user agent");

        let expected_query: Vec<(String, String)> = expected_req["query"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let arr = pair.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.query, expected_query, "{name}: query");

        match expected_req.get("body") {
            Some(expected_body) => {
                assert_eq!(
                    req.header("Content-Type"),
                    expected_req["content_type"].as_str(),
                    "{name}: content type"
                );
                let HttpBody::Json(body) = &req.body else {
                    panic!("{name}: expected json body");
                };
                let body: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(&body, expected_body, "{name}: body");
            }
            None => assert!(req.body.is_empty(), "{name}: body should be empty"),
        }
    }
}

#[test]
fn every_dispatch_yields_exactly_one_outcome() {
    let catalog = EndpointCatalog::standard();
    let urls = ["/v2/mutation", "/v2/topup", "/v2/tagging", "/v2/mutation/destroy", "/v2/unknown"];
    for url in urls {
        for status in [200u16, 201, 204, 301, 400, 401, 404, 422, 500, 503] {
            let response = HttpResponse::new(status, r#"{"message":"m"}"#);
            match dispatch(&catalog, &response, url) {
                Ok(out) => {
                    assert!(response.is_success(), "{url} {status}: success on non-2xx");
                    assert_eq!(out.into_json(), serde_json::json!({"message": "m"}));
                }
                Err(err) => {
                    assert!(!response.is_success(), "{url} {status}: error on 2xx");
                    assert_eq!(err.status_code(), Some(status));
                }
            }
        }
    }
}
