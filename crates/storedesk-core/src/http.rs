use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, StoreApi};
use crate::config::ApiConfig;
use crate::store::{Store, StoreId, StorePayload};

const BODY_SNIPPET_LIMIT: usize = 512;

/// Create responses carry at least the new id; the rest is ignored.
#[derive(Debug, Deserialize)]
struct CreatedStore {
    id: StoreId,
}

/// [`StoreApi`] over HTTP against `{base_url}/api/stores`.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    agent: ureq::Agent,
    origin: String,
    token: Option<String>,
}

impl HttpStoreApi {
    pub fn new(config: &ApiConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
            origin: config.origin().to_string(),
            token: config.bearer_token().map(str::to_string),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.origin, path.trim_start_matches('/'))
    }

    fn request(&self, method: &'static str, url: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    fn read_json<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self.request(method, &url).call();
        decode(method, &url, response)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self.send(method, &url, body)?;
        decode(method, &url, Ok(response))
    }

    /// Any 2xx is success; the body is not read.
    fn send_ignoring_body<B: Serialize>(
        &self,
        method: &'static str,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path);
        self.send(method, &url, body).map(|_| ())
    }

    fn send<B: Serialize>(
        &self,
        method: &'static str,
        url: &str,
        body: &B,
    ) -> Result<ureq::Response, ApiError> {
        let value = serde_json::to_value(body).map_err(|error| ApiError::Transport {
            method,
            url: url.to_string(),
            message: format!("failed to encode request body: {error}"),
        })?;
        self.request(method, url)
            .send_json(value)
            .map_err(|error| map_error(method, url, error))
    }
}

impl StoreApi for HttpStoreApi {
    fn list_stores(&self) -> Result<Vec<Store>, ApiError> {
        self.read_json("GET", "stores")
    }

    fn get_store(&self, id: &StoreId) -> Result<Store, ApiError> {
        self.read_json("GET", &format!("stores/{id}"))
    }

    fn create_store(&self, payload: &StorePayload) -> Result<StoreId, ApiError> {
        let created: CreatedStore = self.send_json("POST", "stores", payload)?;
        Ok(created.id)
    }

    fn update_store(&self, id: &StoreId, payload: &StorePayload) -> Result<(), ApiError> {
        self.send_ignoring_body("PATCH", &format!("stores/{id}"), payload)
    }

    fn delete_store(&self, id: &StoreId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("stores/{id}"));
        self.request("DELETE", &url)
            .call()
            .map(|_| ())
            .map_err(|error| map_error("DELETE", &url, error))
    }
}

fn decode<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    response: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let response = response.map_err(|error| map_error(method, url, error))?;
    response
        .into_json::<T>()
        .map_err(|error| ApiError::Decode {
            method,
            url: url.to_string(),
            message: error.to_string(),
        })
}

fn map_error(method: &'static str, url: &str, error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::Status {
                method,
                url: url.to_string(),
                status,
                body: snippet(body.trim()),
            }
        }
        ureq::Error::Transport(transport) => ApiError::Transport {
            method,
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}

fn snippet(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_LIMIT {
        return body.to_string();
    }

    let mut output: String = body.chars().take(BODY_SNIPPET_LIMIT).collect();
    output.push_str("...");
    output
}
