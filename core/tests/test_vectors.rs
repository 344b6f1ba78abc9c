//! Verify triggers against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file names a trigger and lists cases: the form before the
//! trigger, the expected request (or `null` when the trigger stays local),
//! a simulated response, and the view expected afterwards. Comparing parsed
//! JSON (not raw strings) avoids false negatives from field ordering.

use wishlist_core::render::body_rows;
use wishlist_core::{
    FormController, FormState, HttpMethod, HttpResponse, Trigger, ViewState, WishlistAction, WishlistClient,
};

const BASE_URL: &str = "http://localhost:3000";

fn controller() -> FormController {
    FormController::new(WishlistClient::new(BASE_URL))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_trigger(s: &str) -> Trigger {
    match s {
        "create" => Trigger::Create,
        "update" => Trigger::Update,
        "retrieve" => Trigger::Retrieve,
        "delete" => Trigger::Delete,
        "search" => Trigger::Search,
        "duplicate" => Trigger::Action(WishlistAction::Duplicate),
        "clear" => Trigger::Action(WishlistAction::Clear),
        other => panic!("unknown trigger: {other}"),
    }
}

fn run_vectors(raw: &str) {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let trigger = parse_trigger(vectors["trigger"].as_str().unwrap());
    let c = controller();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let form: FormState = serde_json::from_value(case["form"].clone()).unwrap();
        let mut state = ViewState::with_form(form);

        // Verify begin
        let request = c.begin(trigger, &mut state);
        let expected_req = &case["expected_request"];
        match (request, expected_req.is_null()) {
            (None, true) => {}
            (Some(req), false) => {
                assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
                assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

                let expected_headers: Vec<(String, String)> = expected_req["headers"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|h| {
                        let arr = h.as_array().unwrap();
                        (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                    })
                    .collect();
                assert_eq!(req.headers, expected_headers, "{name}: headers");

                match req.body.as_deref() {
                    Some(body) => {
                        let body: serde_json::Value = serde_json::from_str(body).unwrap();
                        assert_eq!(body, expected_req["body"], "{name}: body");
                    }
                    None => assert!(expected_req["body"].is_null(), "{name}: body"),
                }

                // Verify complete
                let sim = &case["simulated_response"];
                let response = HttpResponse {
                    status: sim["status"].as_u64().unwrap() as u16,
                    headers: Vec::new(),
                    body: sim["body"].as_str().unwrap().to_string(),
                };
                c.complete(trigger, response, &mut state);
            }
            (request, _) => panic!("{name}: unexpected request {request:?}"),
        }

        let expected = &case["expected_view"];
        let expected_form: FormState = serde_json::from_value(expected["form"].clone()).unwrap();
        assert_eq!(state.form, expected_form, "{name}: form");
        assert_eq!(state.status, expected["status"].as_str().unwrap(), "{name}: status");
        let rows = state.results.as_deref().map(body_rows);
        assert_eq!(rows, expected["result_rows"].as_u64().map(|n| n as usize), "{name}: result rows");
    }
}

#[test]
fn create_test_vectors() {
    run_vectors(include_str!("../../test-vectors/create.json"));
}

#[test]
fn retrieve_test_vectors() {
    run_vectors(include_str!("../../test-vectors/retrieve.json"));
}

#[test]
fn delete_test_vectors() {
    run_vectors(include_str!("../../test-vectors/delete.json"));
}

#[test]
fn search_test_vectors() {
    run_vectors(include_str!("../../test-vectors/search.json"));
}

#[test]
fn action_test_vectors() {
    run_vectors(include_str!("../../test-vectors/actions.json"));
}
