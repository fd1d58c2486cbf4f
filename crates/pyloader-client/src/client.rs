//! Session API client.

use crate::types::{ExecuteRequest, ExecuteResponse, RegisterResponse};
use pyloader_core::{Error, ModuleName, Result, SessionEndpoint, WireContract};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

const API_PATH: &str = "api/session/python/";

/// Operation name of the module registration request.
pub const REGISTER_MODULE: &str = "registermodule";
/// Operation name of the script execution request.
pub const EXECUTE: &str = "execute";

/// Client for one Python module on a remote session.
///
/// Every request goes to `http://<endpoint>/api/session/python/<operation>`
/// as a JSON POST. Failures are not retried.
///
/// Cloning is cheap; clones share the HTTP connection pool and the module
/// source.
///
/// # Examples
///
/// ```no_run
/// use pyloader_client::PythonApiClient;
/// use pyloader_core::SessionEndpoint;
///
/// # async fn example() -> pyloader_core::Result<()> {
/// let endpoint = SessionEndpoint::new("localhost:80")?;
/// let client = PythonApiClient::new(endpoint, "example", "def add(a, b):\n    return a + b\n")?;
///
/// client.register().await?;
/// let response = client.execute_script("return add(2, 3)").await?;
/// println!("{}", response.return_value);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PythonApiClient {
    http: reqwest::Client,
    endpoint: SessionEndpoint,
    base_url: String,
    module_name: ModuleName,
    source: Arc<str>,
    contract: WireContract,
}

impl PythonApiClient {
    /// Creates a client using the default wire contract.
    ///
    /// No request is sent until [`register`](Self::register) or
    /// [`execute_script`](Self::execute_script) is called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: SessionEndpoint,
        module_name: impl Into<ModuleName>,
        source: impl Into<String>,
    ) -> Result<Self> {
        Self::with_contract(endpoint, module_name, source, WireContract::default())
    }

    /// Creates a client with an explicit wire contract.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_client::PythonApiClient;
    /// use pyloader_core::{RegisterSourceField, SessionEndpoint, WireContract};
    ///
    /// let contract = WireContract { register_source_field: RegisterSourceField::SourceCode };
    /// let endpoint = SessionEndpoint::new("director.local:8080").unwrap();
    /// let client = PythonApiClient::with_contract(endpoint, "example", "", contract).unwrap();
    ///
    /// assert_eq!(client.base_url(), "http://director.local:8080/api/session/python/");
    /// ```
    pub fn with_contract(
        endpoint: SessionEndpoint,
        module_name: impl Into<ModuleName>,
        source: impl Into<String>,
        contract: WireContract,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        let base_url = format!("http://{endpoint}/{API_PATH}");
        let source: String = source.into();

        Ok(Self {
            http,
            endpoint,
            base_url,
            module_name: module_name.into(),
            source: Arc::from(source),
            contract,
        })
    }

    /// Returns the session endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &SessionEndpoint {
        &self.endpoint
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the module name requests are sent for.
    #[must_use]
    pub const fn module_name(&self) -> &ModuleName {
        &self.module_name
    }

    /// Returns the wire contract in use.
    #[must_use]
    pub const fn contract(&self) -> WireContract {
        self.contract
    }

    /// Registers the module source with the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on network failure, a non-2xx status, or
    /// an undecodable response body.
    pub async fn register(&self) -> Result<RegisterResponse> {
        let mut body = Map::with_capacity(2);
        body.insert(
            "moduleName".to_string(),
            Value::String(self.module_name.as_str().to_string()),
        );
        body.insert(
            self.contract.register_source_field.as_str().to_string(),
            Value::String(self.source.to_string()),
        );

        tracing::info!("Registering module {} with {}", self.module_name, self.endpoint);
        let response = self.post(REGISTER_MODULE, &body).await?;
        tracing::debug!("Module {} registered", self.module_name);

        Ok(response)
    }

    /// Executes a script in the module's namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on network failure, a non-2xx status, or
    /// an undecodable response body.
    pub async fn execute_script(&self, script: &str) -> Result<ExecuteResponse> {
        let body = ExecuteRequest {
            module_name: self.module_name.as_str(),
            script,
        };

        tracing::debug!("Executing in {}: {}", self.module_name, script);
        self.post(EXECUTE, &body).await
    }

    async fn post<B, T>(&self, operation: &'static str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{operation}", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.transport_error(operation, e))?;

        tracing::debug!(%url, status = %response.status(), "Session request completed");

        response
            .json::<T>()
            .await
            .map_err(|e| self.transport_error(operation, e))
    }

    fn transport_error(&self, operation: &str, source: reqwest::Error) -> Error {
        tracing::warn!(error = %source, "Request '{}' to {} failed", operation, self.endpoint);
        Error::Transport {
            operation: operation.to_string(),
            endpoint: self.endpoint.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyloader_core::RegisterSourceField;

    fn endpoint() -> SessionEndpoint {
        SessionEndpoint::new("localhost:80").unwrap()
    }

    #[test]
    fn test_base_url() {
        let client = PythonApiClient::new(endpoint(), "example", "").unwrap();
        assert_eq!(client.base_url(), "http://localhost:80/api/session/python/");
    }

    #[test]
    fn test_default_contract() {
        let client = PythonApiClient::new(endpoint(), "example", "").unwrap();
        assert_eq!(
            client.contract().register_source_field,
            RegisterSourceField::Contents
        );
    }

    #[test]
    fn test_clone_shares_identity() {
        let client = PythonApiClient::new(endpoint(), "example", "x = 1").unwrap();
        let cloned = client.clone();
        assert_eq!(cloned.module_name(), client.module_name());
        assert_eq!(cloned.endpoint(), client.endpoint());
        assert!(Arc::ptr_eq(&cloned.source, &client.source));
    }
}
