use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::{DatabaseError, PostgrestError};

/// Thin client over the Supabase PostgREST endpoint.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap, DatabaseError> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.service_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_key))?,
        );

        Ok(headers)
    }

    /// Headers asking PostgREST to return the affected rows from a mutation.
    pub fn return_representation() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, DatabaseError>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T, DatabaseError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(DatabaseError::Api {
                status: status.as_u16(),
                error: PostgrestError::from_body(&error_text),
            });
        }

        let bytes = response.bytes().await?;
        let data = serde_json::from_slice::<T>(&bytes)?;
        Ok(data)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> SupabaseClient {
        SupabaseClient::new(&AppConfig {
            supabase_url: format!("{}/", uri),
            supabase_service_key: "service-key".to_string(),
            port: 3000,
        })
    }

    #[tokio::test]
    async fn test_sends_service_key_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/patients"))
            .and(query_param("id", "eq.1"))
            .and(header("apikey", "service-key"))
            .and(header("Authorization", "Bearer service-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let rows: Vec<Value> = client
            .request(Method::GET, "/rest/v1/patients?id=eq.1", None)
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({ "id": 1 })]);
    }

    #[tokio::test]
    async fn test_surfaces_postgrest_error_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/patients"))
            .and(header("Prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23505",
                "details": "Key (email)=(a@b.com) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"patients_email_key\""
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .request_with_headers::<Vec<Value>>(
                Method::POST,
                "/rest/v1/patients",
                Some(json!({ "email": "a@b.com" })),
                Some(SupabaseClient::return_representation()),
            )
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_matches!(err, DatabaseError::Api { status: 409, .. });
    }

    #[test]
    fn test_trims_trailing_slash() {
        let client = client_for("http://localhost:54321");
        assert_eq!(client.get_base_url(), "http://localhost:54321");
    }
}
