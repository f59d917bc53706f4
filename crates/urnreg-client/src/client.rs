//! Session-guarded registry client.

use std::fmt;
use std::sync::RwLock;

use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use urnreg_core::{
    Error, RegistryEndpoint, Result, SeriesCode, SessionToken, TargetUrl, Urn, ops,
};

use crate::config::RegistryConfig;

/// A client for a URN PID registry service.
///
/// Wraps a [`RegistryEndpoint`] and owns the session token for one
/// authenticated session. The client is a single logical session: exactly
/// one token is live at a time, replaced by a subsequent `login` and
/// cleared by `logout`.
///
/// Successful results are the endpoint's JSON payloads, passed through
/// unmodified.
pub struct UrnClient<E> {
    endpoint: E,
    config: RegistryConfig,
    token: RwLock<Option<SessionToken>>,
}

impl<E: RegistryEndpoint> UrnClient<E> {
    /// Create a client over the given endpoint and configuration.
    pub fn new(endpoint: E, config: RegistryConfig) -> Self {
        Self {
            endpoint,
            config,
            token: RwLock::new(None),
        }
    }

    /// Returns the configuration this client was constructed with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the underlying endpoint.
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Snapshot of the currently held session token, if any.
    pub fn session_token(&self) -> Option<SessionToken> {
        self.token.read().unwrap().clone()
    }

    /// Whether a usable session token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    // An empty token cannot authenticate anything; treat it as absent.
    fn current_token(&self) -> Option<SessionToken> {
        self.token
            .read()
            .unwrap()
            .clone()
            .filter(|token| !token.is_empty())
    }

    /// Log in to the registry service.
    ///
    /// Credentials omitted here are resolved from the configuration; if a
    /// credential is available from neither source the call fails with
    /// [`Error::MissingCredential`] before anything is sent. The returned
    /// token is stored and authenticates subsequent mutating operations.
    ///
    /// Logging in while already authenticated simply replaces the held
    /// token; the previous token is not invalidated locally.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<SessionToken> {
        let credentials = self.config.resolve_credentials(username, password)?;
        debug!(username = credentials.username(), "logging in");

        let result = self
            .endpoint
            .invoke(
                ops::LOGIN,
                vec![json!(credentials.username()), json!(credentials.password())],
            )
            .await?;

        // The service answers with the token itself. A non-string or empty
        // result is stored as the empty token, which current_token treats
        // as absent.
        let token = SessionToken::new(result.as_str().unwrap_or_default());
        *self.token.write().unwrap() = Some(token.clone());
        info!("session established");
        Ok(token)
    }

    /// Log out of the registry service.
    ///
    /// A no-op returning `Ok(None)` when no session is held. Otherwise the
    /// held token is cleared and the endpoint's logout result returned.
    /// Clearing is unconditional: the token is taken out of the slot before
    /// the remote call, so a transport failure cannot leave the client
    /// believing it is still authenticated.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<Option<Value>> {
        let taken = self.token.write().unwrap().take();
        let Some(token) = taken else {
            debug!("logout without a session is a no-op");
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }

        let result = self
            .endpoint
            .invoke(ops::LOGOUT, vec![json!(token.as_str())])
            .await?;
        info!("session closed");
        Ok(Some(result))
    }

    // The single authentication guard for every operation that needs a
    // session: fail locally when no token is held, otherwise forward with
    // the token prepended as the first argument.
    async fn authed(&self, operation: &'static str, args: Vec<Value>) -> Result<Value> {
        let token = self.current_token().ok_or(Error::AuthenticationRequired)?;
        let mut call = Vec::with_capacity(args.len() + 1);
        call.push(json!(token.as_str()));
        call.extend(args);
        debug!(operation, "dispatching authenticated operation");
        self.endpoint.invoke(operation, call).await
    }

    /// Create a new URN under the given series and bind it to `url`.
    ///
    /// Works only when the service supports serial-number assignment for
    /// the series and the caller holds authority over it. The created URN
    /// is stored by the service.
    pub async fn create_urn(&self, series_code: &SeriesCode, url: &TargetUrl) -> Result<Value> {
        self.authed(ops::CREATE_URN, vec![json!(series_code), json!(url)])
            .await
    }

    /// Register a caller-supplied URN and bind it to the target at `url`.
    pub async fn register_urn(&self, urn: &Urn, url: &TargetUrl) -> Result<Value> {
        self.authed(ops::REGISTER_URN, vec![json!(urn), json!(url)])
            .await
    }

    /// Reserve a URN for future use, without binding any targets.
    ///
    /// Only allowed for URNs belonging to a series without serial numbers.
    pub async fn reserve_urn(&self, urn: &Urn) -> Result<Value> {
        self.authed(ops::RESERVE_URN, vec![json!(urn)]).await
    }

    /// Create the next URN of the given series and reserve it, unbound.
    ///
    /// Requires serial-number assignment for the series and caller
    /// authority over it.
    pub async fn reserve_next_urn(&self, series_code: &SeriesCode) -> Result<Value> {
        self.authed(ops::RESERVE_NEXT_URN, vec![json!(series_code)])
            .await
    }

    /// Request the next available URN of the given series.
    ///
    /// The returned URN is not stored by the service.
    pub async fn get_next_urn(&self, series_code: &SeriesCode) -> Result<Value> {
        self.authed(ops::GET_NEXT_URN, vec![json!(series_code)])
            .await
    }

    /// Bind an additional target URL to a URN.
    pub async fn add_url(&self, urn: &Urn, url: &TargetUrl) -> Result<Value> {
        self.authed(ops::ADD_URL, vec![json!(urn), json!(url)]).await
    }

    /// Replace one registered target URL of a URN with another.
    pub async fn replace_url(
        &self,
        urn: &Urn,
        old_url: &TargetUrl,
        new_url: &TargetUrl,
    ) -> Result<Value> {
        self.authed(
            ops::REPLACE_URL,
            vec![json!(urn), json!(old_url), json!(new_url)],
        )
        .await
    }

    /// Remove a target URL from a URN.
    ///
    /// The service allows this only while the URN has more than one
    /// registered target.
    pub async fn delete_url(&self, urn: &Urn, url: &TargetUrl) -> Result<Value> {
        self.authed(ops::DELETE_URL, vec![json!(urn), json!(url)])
            .await
    }

    /// Mark one of a URN's registered targets as its default.
    pub async fn set_default_url(&self, urn: &Urn, url: &TargetUrl) -> Result<Value> {
        self.authed(ops::SET_DEFAULT_URL, vec![json!(urn), json!(url)])
            .await
    }

    /// Look up a registered URN with all its locations and other
    /// registered information. No authentication needed.
    pub async fn find_urn(&self, urn: &Urn) -> Result<Value> {
        self.endpoint.invoke(ops::FIND_URN, vec![json!(urn)]).await
    }

    /// Look up every URN bound to the given target URL. No authentication
    /// needed.
    pub async fn find_urns_for_url(&self, url: &TargetUrl) -> Result<Value> {
        self.endpoint
            .invoke(ops::FIND_URNS_FOR_URL, vec![json!(url)])
            .await
    }

    /// Retrieve all series available to the session.
    ///
    /// Unimplemented on the server side; always fails with
    /// [`Error::UnsupportedOperation`] without a remote call.
    pub async fn get_all_urn_series(&self) -> Result<Value> {
        Err(Error::UnsupportedOperation {
            operation: ops::GET_ALL_URN_SERIES,
        })
    }

    /// Report the service API version.
    ///
    /// Unimplemented on the server side; always fails with
    /// [`Error::UnsupportedOperation`] without a remote call.
    pub async fn get_version(&self) -> Result<Value> {
        Err(Error::UnsupportedOperation {
            operation: ops::GET_VERSION,
        })
    }
}

impl<E> fmt::Debug for UrnClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrnClient")
            .field("config", &self.config)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
