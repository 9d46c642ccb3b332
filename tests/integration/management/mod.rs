//! Management client integration tests against a mock backend API

use propelauth_client::{
    ClientError, CreateUserRequest, PropelAuthClient, UserQuery, UsersInOrgQuery,
};
use propelauth_common::AuthConfig;
use serde_json::json;
use wiremock::{
    matchers::{bearer_token, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const API_KEY: &str = "integration-api-key";

async fn setup() -> (MockServer, PropelAuthClient) {
    let server = MockServer::start().await;
    let client = PropelAuthClient::with_base_url(&server.uri(), API_KEY).unwrap();
    (server, client)
}

#[test]
fn test_client_from_auth_config() {
    let config = AuthConfig::new()
        .with_auth_url("https://auth.example.com/some/path?x=1")
        .unwrap()
        .with_api_key(API_KEY);

    let client = PropelAuthClient::new(&config).unwrap();
    let debug = format!("{:?}", client);
    assert!(debug.contains("https://auth.example.com"));
    assert!(!debug.contains(API_KEY));
}

#[test_log::test(tokio::test)]
async fn test_onboarding_flow() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/backend/v1/org/"))
        .and(bearer_token(API_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "org_id": "org1", "name": "Acme" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/backend/v1/user/"))
        .and(bearer_token(API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_id": "u1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/backend/v1/user/u1"))
        .and(query_param("include_orgs", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u1",
            "email": "founder@acme.com",
            "org_id_to_org_info": {
                "org1": { "org_id": "org1", "org_name": "Acme", "user_role": "Owner" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let org = client.create_org("Acme").await.unwrap();
    let user = client
        .create_user(&CreateUserRequest::new("founder@acme.com"))
        .await
        .unwrap();
    let metadata = client
        .fetch_user_metadata_by_user_id(&user.user_id, true)
        .await
        .unwrap()
        .unwrap();

    let orgs = metadata.org_id_to_org_info.unwrap();
    assert_eq!(orgs[&org.org_id].user_role, "Owner");
}

#[tokio::test]
async fn test_paging_through_users() {
    let (server, client) = setup().await;

    for (page, has_more) in [(0u32, true), (1, false)] {
        Mock::given(method("GET"))
            .and(path("/api/backend/v1/user/query"))
            .and(query_param("page_number", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{ "user_id": format!("u{}", page) }],
                "total_users": 2,
                "current_page": page,
                "page_size": 1,
                "has_more_results": has_more,
            })))
            .mount(&server)
            .await;
    }

    let mut query = UserQuery {
        page_size: 1,
        ..Default::default()
    };
    let mut user_ids = Vec::new();
    loop {
        let page = client.fetch_users_by_query(&query).await.unwrap();
        user_ids.extend(page.users.into_iter().map(|u| u.user_id));
        if !page.has_more_results {
            break;
        }
        query.page_number += 1;
    }

    assert_eq!(user_ids, vec!["u0", "u1"]);
}

#[tokio::test]
async fn test_revoked_api_key_surfaces_everywhere() {
    let (server, client) = setup().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(matches!(
        client.fetch_user_metadata_by_email("a@x.com", false).await,
        Err(ClientError::InvalidApiKey)
    ));
    assert!(matches!(
        client
            .fetch_batch_user_metadata_by_user_ids(&["u1"], false)
            .await,
        Err(ClientError::InvalidApiKey)
    ));
    assert!(matches!(
        client.fetch_org("org1").await,
        Err(ClientError::InvalidApiKey)
    ));
    assert!(matches!(
        client
            .fetch_users_in_org("org1", &UsersInOrgQuery::default())
            .await,
        Err(ClientError::InvalidApiKey)
    ));
    assert!(matches!(
        client.create_org("Acme").await,
        Err(ClientError::InvalidApiKey)
    ));
}
