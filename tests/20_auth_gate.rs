mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Admin routes must reject requests with no session cookie before touching
// the store or the request body.
#[tokio::test]
async fn admin_routes_require_a_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let attempts = [
        client
            .post(format!("{}/api/admin/streets", server.base_url))
            .json(&json!({ "name": "Rua A" })),
        client
            .put(format!("{}/api/admin/streets/1", server.base_url))
            .json(&json!({ "status": "completed" })),
        client.delete(format!("{}/api/admin/streets/1", server.base_url)),
        client.get(format!("{}/api/admin/suggestions", server.base_url)),
        client
            .put(format!("{}/api/admin/suggestions/1/review", server.base_url))
            .json(&json!({ "is_approved": true })),
        client
            .post(format!("{}/api/admin/users", server.base_url))
            .json(&json!({ "email": "a@b.com" })),
        client.get(format!("{}/api/admin/photos/1", server.base_url)),
        client.delete(format!("{}/api/admin/photos/1", server.base_url)),
    ];

    for attempt in attempts {
        let res = attempt.send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["error"], "Unauthorized");
    }
    Ok(())
}

#[tokio::test]
async fn me_requires_a_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users/me", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn suggestion_submission_is_validated() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Empty street name fails field validation
    let res = client
        .post(format!("{}/api/suggestions", server.base_url))
        .json(&json!({ "street_name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string());

    // Missing street name fails structural parsing
    let res = client
        .post(format!("{}/api/suggestions", server.base_url))
        .json(&json!({ "neighborhood": "Centro" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn logout_always_clears_the_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/logout", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()?;
    assert!(cookie.contains("Max-Age=0"));

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    Ok(())
}
