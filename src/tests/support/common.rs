// Common test utilities for integration tests.

use std::collections::HashMap;
use std::time::Duration;

pub type H = HashMap<String, String>;

pub const MICHAEL: &str = "michael@mergington.edu";
pub const DANIEL: &str = "daniel@mergington.edu";
pub const JOHN: &str = "john@mergington.edu";

/// Builds a client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build http client")
}

/// Percent-encodes one path segment.
pub fn seg(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// `/activities/{name}/signup?email={email}` with both parts encoded.
pub fn signup_path(activity: &str, email: &str) -> String {
    format!(
        "/activities/{}/signup?email={}",
        seg(activity),
        urlencoding::encode(email)
    )
}

/// `/activities/{name}/participants/{email}` with both parts encoded.
pub fn participant_path(activity: &str, email: &str) -> String {
    format!("/activities/{}/participants/{}", seg(activity), seg(email))
}

/// `/activities/{name}/unregister?email={email}` with both parts encoded.
pub fn unregister_path(activity: &str, email: &str) -> String {
    format!(
        "/activities/{}/unregister?email={}",
        seg(activity),
        urlencoding::encode(email)
    )
}

/// Makes an HTTP request.
pub async fn do_request(
    method: &str,
    url: &str,
    headers: &H,
) -> Result<reqwest::Response, reqwest::Error> {
    let client = client();

    let mut request = match method {
        "GET" => client.get(url),
        "POST" => client.post(url),
        "PUT" => client.put(url),
        "DELETE" => client.delete(url),
        _ => panic!("unsupported method: {}", method),
    };

    for (k, v) in headers {
        request = request.header(k, v);
    }

    request.send().await
}

/// Makes an HTTP request and parses JSON response.
pub async fn do_json<T: serde::de::DeserializeOwned>(
    method: &str,
    url: &str,
) -> Result<(u16, HashMap<String, String>, Vec<u8>, Option<T>), reqwest::Error> {
    let resp = do_request(method, url, &H::new()).await?;
    let status = resp.status().as_u16();

    // Convert headers to HashMap
    let mut header_map = HashMap::new();
    for (k, v) in resp.headers() {
        if let Ok(v_str) = v.to_str() {
            header_map.insert(k.as_str().to_string(), v_str.to_string());
        }
    }

    let body = resp.bytes().await?.to_vec();

    let parsed: Option<T> = if header_map
        .get("content-type")
        .map(|s| s.contains("json"))
        .unwrap_or(false)
        && !body.is_empty()
    {
        serde_json::from_slice(&body).ok()
    } else {
        None
    };

    Ok((status, header_map, body, parsed))
}

/// Body of `{"message": ...}` responses.
#[derive(Debug, serde::Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body of `{"detail": ...}` responses.
#[derive(Debug, serde::Deserialize)]
pub struct DetailBody {
    pub detail: String,
}

/// Asserts that an error is None.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {}", e))
}

/// Asserts that two values are equal.
pub fn assert_equal<T: PartialEq + std::fmt::Debug>(want: T, got: T) {
    if want != got {
        panic!("want={:?} got={:?}", want, got);
    }
}
