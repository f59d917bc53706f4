//! In-memory registry endpoint implementation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use urnreg_core::{Error, RegistryEndpoint, RemoteError, Result, TargetUrl, Urn, ops};

use crate::records::{Target, UrnRecord};

/// An in-memory simulation of the URN registry service.
///
/// Accounts, series, and per-account series authority are seeded through
/// the admin methods; everything else goes through
/// [`RegistryEndpoint::invoke`] and follows the service's business rules.
/// Cloning is cheap and clones share state.
#[derive(Clone, Default)]
pub struct MemRegistry {
    state: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    // token -> username
    sessions: HashMap<String, String>,
    series: HashMap<String, Series>,
    records: HashMap<String, UrnRecord>,
}

struct Account {
    password: String,
    authority: Vec<String>,
}

struct Series {
    serial_assignment: bool,
    next_serial: u64,
}

fn fault(code: &str, message: impl Into<String>) -> Error {
    RemoteError::fault(code, message).into()
}

fn arg<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a str> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| fault("MalformedRequest", format!("missing argument '{name}'")))
}

fn ensure_authority(authority: &[String], code: &str) -> Result<()> {
    if authority.iter().any(|c| c == code) {
        Ok(())
    } else {
        Err(fault(
            "NoAuthority",
            format!("caller lacks authority over series '{code}'"),
        ))
    }
}

fn mint(code: &str, serial: u64) -> String {
    format!("URN:NBN:{code}-{serial}")
}

fn to_json(record: &UrnRecord) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| fault("InternalError", e.to_string()))
}

impl State {
    // Resolve the leading token argument to the account's authority list.
    fn authenticate(&self, token: &str) -> Result<Vec<String>> {
        let username = self
            .sessions
            .get(token)
            .ok_or_else(|| fault("InvalidSsoToken", "session token is not valid"))?;
        let account = self
            .accounts
            .get(username)
            .ok_or_else(|| fault("InvalidSsoToken", "session has no account"))?;
        Ok(account.authority.clone())
    }

    // Longest series code prefixing the URN's namespace-specific part.
    fn series_for_urn(&self, urn: &str) -> Result<String> {
        let nss = urn.strip_prefix("URN:NBN:").unwrap_or(urn);
        self.series
            .keys()
            .filter(|code| nss.starts_with(code.as_str()))
            .max_by_key(|code| code.len())
            .cloned()
            .ok_or_else(|| fault("UnknownSeries", format!("no series matches '{urn}'")))
    }
}

impl MemRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that can log in.
    pub async fn add_account(&self, username: impl Into<String>, password: impl Into<String>) {
        let mut state = self.state.write().await;
        state.accounts.insert(
            username.into(),
            Account {
                password: password.into(),
                authority: Vec::new(),
            },
        );
    }

    /// Register a series, with or without serial-number assignment.
    pub async fn add_series(&self, code: impl Into<String>, serial_assignment: bool) {
        let mut state = self.state.write().await;
        state.series.insert(
            code.into(),
            Series {
                serial_assignment,
                next_serial: 1,
            },
        );
    }

    /// Grant an account authority over a series.
    pub async fn grant_authority(&self, username: &str, code: &str) {
        let mut state = self.state.write().await;
        if let Some(account) = state.accounts.get_mut(username) {
            account.authority.push(code.to_string());
        }
    }

    /// Inspect a stored record.
    pub async fn record(&self, urn: &Urn) -> Option<UrnRecord> {
        self.state.read().await.records.get(urn.as_str()).cloned()
    }

    /// Number of currently open sessions.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    async fn login(&self, args: &[Value]) -> Result<Value> {
        let username = arg(args, 0, "username")?;
        let password = arg(args, 1, "password")?;

        let mut state = self.state.write().await;
        let valid = state
            .accounts
            .get(username)
            .is_some_and(|account| account.password == password);
        if !valid {
            return Err(fault(
                "InvalidCredentials",
                "unknown username or wrong password",
            ));
        }

        let token = Uuid::new_v4().to_string();
        state.sessions.insert(token.clone(), username.to_string());
        debug!(username, "session opened");
        Ok(Value::String(token))
    }

    async fn logout(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let mut state = self.state.write().await;
        state
            .sessions
            .remove(token)
            .ok_or_else(|| fault("InvalidSsoToken", "session token is not valid"))?;
        debug!("session closed");
        Ok(Value::Null)
    }

    async fn create_urn(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let code = arg(args, 1, "seriesCode")?;
        let url = arg(args, 2, "url")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        ensure_authority(&authority, code)?;

        let series = state
            .series
            .get_mut(code)
            .ok_or_else(|| fault("UnknownSeries", format!("no series '{code}'")))?;
        if !series.serial_assignment {
            return Err(fault(
                "NoSerialAssignment",
                format!("series '{code}' has no serial assignment"),
            ));
        }
        let serial = series.next_serial;
        series.next_serial += 1;

        let urn = mint(code, serial);
        let now = Utc::now();
        let mut record = UrnRecord::new(Urn::new(&urn), now);
        record.targets.push(Target {
            url: TargetUrl::new(url),
            is_default: true,
        });
        let value = to_json(&record)?;
        state.records.insert(urn, record);
        Ok(value)
    }

    async fn register_urn(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let urn = arg(args, 1, "urn")?;
        let url = arg(args, 2, "url")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        let code = state.series_for_urn(urn)?;
        ensure_authority(&authority, &code)?;

        let now = Utc::now();
        if let Some(record) = state.records.get_mut(urn) {
            if !record.targets.is_empty() {
                return Err(fault(
                    "UrnAlreadyRegistered",
                    format!("'{urn}' already has targets"),
                ));
            }
            // Registering a reserved URN binds its first target.
            record.targets.push(Target {
                url: TargetUrl::new(url),
                is_default: true,
            });
            record.last_modified = now;
            return to_json(record);
        }

        let mut record = UrnRecord::new(Urn::new(urn), now);
        record.targets.push(Target {
            url: TargetUrl::new(url),
            is_default: true,
        });
        let value = to_json(&record)?;
        state.records.insert(urn.to_string(), record);
        Ok(value)
    }

    async fn reserve_urn(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let urn = arg(args, 1, "urn")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        let code = state.series_for_urn(urn)?;
        ensure_authority(&authority, &code)?;

        // Reservation by name only makes sense where the service does not
        // assign serial numbers itself.
        let serial_assignment = state
            .series
            .get(&code)
            .ok_or_else(|| fault("UnknownSeries", format!("no series '{code}'")))?
            .serial_assignment;
        if serial_assignment {
            return Err(fault(
                "SerialSeries",
                format!("series '{code}' assigns serial numbers, reserve the next URN instead"),
            ));
        }
        if state.records.contains_key(urn) {
            return Err(fault(
                "UrnAlreadyRegistered",
                format!("'{urn}' is already stored"),
            ));
        }

        let record = UrnRecord::new(Urn::new(urn), Utc::now());
        let value = to_json(&record)?;
        state.records.insert(urn.to_string(), record);
        Ok(value)
    }

    async fn reserve_next_urn(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let code = arg(args, 1, "seriesCode")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        ensure_authority(&authority, code)?;

        let series = state
            .series
            .get_mut(code)
            .ok_or_else(|| fault("UnknownSeries", format!("no series '{code}'")))?;
        if !series.serial_assignment {
            return Err(fault(
                "NoSerialAssignment",
                format!("series '{code}' has no serial assignment"),
            ));
        }
        let serial = series.next_serial;
        series.next_serial += 1;

        let urn = mint(code, serial);
        let record = UrnRecord::new(Urn::new(&urn), Utc::now());
        let value = to_json(&record)?;
        state.records.insert(urn, record);
        Ok(value)
    }

    async fn get_next_urn(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let code = arg(args, 1, "seriesCode")?;

        let state = self.state.read().await;
        let authority = state.authenticate(token)?;
        ensure_authority(&authority, code)?;

        let series = state
            .series
            .get(code)
            .ok_or_else(|| fault("UnknownSeries", format!("no series '{code}'")))?;
        if !series.serial_assignment {
            return Err(fault(
                "NoSerialAssignment",
                format!("series '{code}' has no serial assignment"),
            ));
        }

        // Peek only; the serial is consumed when a URN is actually stored.
        Ok(Value::String(mint(code, series.next_serial)))
    }

    async fn add_url(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let urn = arg(args, 1, "urn")?;
        let url = arg(args, 2, "url")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        let code = state.series_for_urn(urn)?;
        ensure_authority(&authority, &code)?;

        let record = state
            .records
            .get_mut(urn)
            .ok_or_else(|| fault("UnknownUrn", format!("'{urn}' is not registered")))?;
        let url = TargetUrl::new(url);
        if record.has_target(&url) {
            return Err(fault(
                "UrlAlreadyRegistered",
                format!("'{url}' is already bound to '{urn}'"),
            ));
        }
        let is_default = record.targets.is_empty();
        record.targets.push(Target { url, is_default });
        record.last_modified = Utc::now();
        to_json(record)
    }

    async fn replace_url(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let urn = arg(args, 1, "urn")?;
        let old_url = arg(args, 2, "oldUrl")?;
        let new_url = arg(args, 3, "newUrl")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        let code = state.series_for_urn(urn)?;
        ensure_authority(&authority, &code)?;

        let record = state
            .records
            .get_mut(urn)
            .ok_or_else(|| fault("UnknownUrn", format!("'{urn}' is not registered")))?;
        let target = record
            .targets
            .iter_mut()
            .find(|t| t.url.as_str() == old_url)
            .ok_or_else(|| {
                fault(
                    "UnknownUrl",
                    format!("'{old_url}' is not bound to '{urn}'"),
                )
            })?;
        // Default flag follows the slot.
        target.url = TargetUrl::new(new_url);
        record.last_modified = Utc::now();
        to_json(record)
    }

    async fn delete_url(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let urn = arg(args, 1, "urn")?;
        let url = arg(args, 2, "url")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        let code = state.series_for_urn(urn)?;
        ensure_authority(&authority, &code)?;

        let record = state
            .records
            .get_mut(urn)
            .ok_or_else(|| fault("UnknownUrn", format!("'{urn}' is not registered")))?;
        if record.targets.len() <= 1 {
            return Err(fault(
                "LastUrl",
                format!("'{urn}' has only one target, cannot delete"),
            ));
        }
        let index = record
            .targets
            .iter()
            .position(|t| t.url.as_str() == url)
            .ok_or_else(|| fault("UnknownUrl", format!("'{url}' is not bound to '{urn}'")))?;
        let removed = record.targets.remove(index);
        // Deleting the default target promotes the first remaining one.
        if removed.is_default {
            if let Some(first) = record.targets.first_mut() {
                first.is_default = true;
            }
        }
        record.last_modified = Utc::now();
        to_json(record)
    }

    async fn set_default_url(&self, args: &[Value]) -> Result<Value> {
        let token = arg(args, 0, "token")?;
        let urn = arg(args, 1, "urn")?;
        let url = arg(args, 2, "url")?;

        let mut state = self.state.write().await;
        let authority = state.authenticate(token)?;
        let code = state.series_for_urn(urn)?;
        ensure_authority(&authority, &code)?;

        let record = state
            .records
            .get_mut(urn)
            .ok_or_else(|| fault("UnknownUrn", format!("'{urn}' is not registered")))?;
        if !record.has_target(&TargetUrl::new(url)) {
            return Err(fault(
                "UnknownUrl",
                format!("'{url}' is not bound to '{urn}'"),
            ));
        }
        for target in &mut record.targets {
            target.is_default = target.url.as_str() == url;
        }
        record.last_modified = Utc::now();
        to_json(record)
    }

    async fn find_urn(&self, args: &[Value]) -> Result<Value> {
        let urn = arg(args, 0, "urn")?;
        let state = self.state.read().await;
        let record = state
            .records
            .get(urn)
            .ok_or_else(|| fault("UnknownUrn", format!("'{urn}' is not registered")))?;
        to_json(record)
    }

    async fn find_urns_for_url(&self, args: &[Value]) -> Result<Value> {
        let url = arg(args, 0, "url")?;
        let url = TargetUrl::new(url);
        let state = self.state.read().await;
        let mut urns: Vec<&str> = state
            .records
            .values()
            .filter(|record| record.has_target(&url))
            .map(|record| record.urn.as_str())
            .collect();
        urns.sort_unstable();
        Ok(Value::Array(
            urns.into_iter().map(|u| Value::String(u.to_string())).collect(),
        ))
    }
}

#[async_trait]
impl RegistryEndpoint for MemRegistry {
    #[instrument(skip(self, args))]
    async fn invoke(&self, operation: &str, args: Vec<Value>) -> Result<Value> {
        match operation {
            ops::LOGIN => self.login(&args).await,
            ops::LOGOUT => self.logout(&args).await,
            ops::CREATE_URN => self.create_urn(&args).await,
            ops::REGISTER_URN => self.register_urn(&args).await,
            ops::RESERVE_URN => self.reserve_urn(&args).await,
            ops::RESERVE_NEXT_URN => self.reserve_next_urn(&args).await,
            ops::GET_NEXT_URN => self.get_next_urn(&args).await,
            ops::ADD_URL => self.add_url(&args).await,
            ops::REPLACE_URL => self.replace_url(&args).await,
            ops::DELETE_URL => self.delete_url(&args).await,
            ops::SET_DEFAULT_URL => self.set_default_url(&args).await,
            ops::FIND_URN => self.find_urn(&args).await,
            ops::FIND_URNS_FOR_URL => self.find_urns_for_url(&args).await,
            other => Err(fault(
                "UnknownOperation",
                format!("no such operation '{other}'"),
            )),
        }
    }
}

impl fmt::Debug for MemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemRegistry").finish_non_exhaustive()
    }
}
