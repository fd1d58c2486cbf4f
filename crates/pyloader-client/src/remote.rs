//! Typed handle on a registered module.
//!
//! [`RemoteModule`] behaves like the generated JavaScript factory: it starts
//! registration in the background as soon as it is created, and checks the
//! function name and argument count of every call before anything is sent.

use crate::client::{PythonApiClient, REGISTER_MODULE};
use crate::script::call_script;
use crate::types::{ExecuteResponse, RegisterResponse};
use pyloader_core::{Error, ModuleName, Result, SessionEndpoint, WireContract};
use pyloader_introspector::FunctionSignature;
use serde_json::Value;
use tokio::task::JoinHandle;

/// A module registered on a remote session, with its exported functions.
///
/// # Examples
///
/// ```no_run
/// use pyloader_client::RemoteModule;
/// use pyloader_core::SessionEndpoint;
/// use pyloader_introspector::FunctionSignature;
/// use serde_json::json;
///
/// # async fn example() -> pyloader_core::Result<()> {
/// let mut module = RemoteModule::connect(
///     SessionEndpoint::new("localhost:80")?,
///     "example",
///     "def add(a, b):\n    return a + b\n",
///     vec![FunctionSignature::new("add", ["a", "b"])],
/// )?;
///
/// module.wait_registered().await?;
/// let response = module.call("add", &[json!(2), json!(3)]).await?;
/// assert_eq!(response.return_value, "5");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RemoteModule {
    client: PythonApiClient,
    functions: Vec<FunctionSignature>,
    registration: Option<JoinHandle<Result<RegisterResponse>>>,
}

impl RemoteModule {
    /// Creates the client and spawns registration without awaiting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if called outside a Tokio runtime or if
    /// the HTTP client cannot be built.
    pub fn connect(
        endpoint: SessionEndpoint,
        module_name: impl Into<ModuleName>,
        source: impl Into<String>,
        functions: Vec<FunctionSignature>,
    ) -> Result<Self> {
        Self::connect_with_contract(
            endpoint,
            module_name,
            source,
            functions,
            WireContract::default(),
        )
    }

    /// Like [`connect`](Self::connect), with an explicit wire contract.
    ///
    /// # Errors
    ///
    /// See [`connect`](Self::connect).
    pub fn connect_with_contract(
        endpoint: SessionEndpoint,
        module_name: impl Into<ModuleName>,
        source: impl Into<String>,
        functions: Vec<FunctionSignature>,
        contract: WireContract,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| Error::ConfigError {
            message: format!("RemoteModule requires a Tokio runtime: {e}"),
        })?;

        let client = PythonApiClient::with_contract(endpoint, module_name, source, contract)?;

        let registering = client.clone();
        let registration = runtime.spawn(async move { registering.register().await });

        tracing::debug!(
            "Connected module {} ({} functions)",
            client.module_name(),
            functions.len()
        );

        Ok(Self {
            client,
            functions,
            registration: Some(registration),
        })
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &PythonApiClient {
        &self.client
    }

    /// Returns the exported functions in declaration order.
    #[must_use]
    pub fn functions(&self) -> &[FunctionSignature] {
        &self.functions
    }

    /// Looks up an exported function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Takes the pending registration handle, if it has not been taken yet.
    pub const fn take_registration(&mut self) -> Option<JoinHandle<Result<RegisterResponse>>> {
        self.registration.take()
    }

    /// Waits for the background registration to finish.
    ///
    /// # Errors
    ///
    /// Returns the registration's own error, [`Error::Transport`] if the
    /// registration task was cancelled or panicked, or
    /// [`Error::InvalidArgument`] if the registration was already taken.
    pub async fn wait_registered(&mut self) -> Result<RegisterResponse> {
        let handle = self.registration.take().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "registration of '{}' was already awaited",
                self.client.module_name()
            ))
        })?;

        handle.await.map_err(|e| Error::Transport {
            operation: REGISTER_MODULE.to_string(),
            endpoint: self.client.endpoint().to_string(),
            source: Box::new(e),
        })?
    }

    /// Calls an exported function with JSON arguments.
    ///
    /// The function name and argument count are checked before any request
    /// is made. Registration is not awaited first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`] if the module does not export
    /// `name`, [`Error::ArityMismatch`] if `args` has the wrong length, or
    /// [`Error::Transport`] if the request fails.
    pub async fn call(&self, name: &str, args: &[Value]) -> Result<ExecuteResponse> {
        let signature = self.function(name).ok_or_else(|| Error::UnknownFunction {
            module: self.client.module_name().to_string(),
            function: name.to_string(),
        })?;

        let script = call_script(&signature.name, &signature.parameters, args)?;
        self.client.execute_script(&script).await
    }
}
