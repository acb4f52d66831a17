use anyhow::Context;
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use pigeon_shared::{
    const_config::{
        client::CLIENT_DEFAULT_SERVER_ADDRESS,
        path::{PathSpec, PATH_AUTH_LOGIN, PATH_AUTH_REGISTER, PATH_HEALTH_CHECK},
    },
    errors::{ApiError, ConversionError, MessageResponse},
    req_args::{LoginReqArgs, RegisterReqArgs},
    token::AuthToken,
    uac::{LoginResponse, UserProfile},
};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret as _;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{info, warn};

use crate::session::SessionStore;

pub mod api;

/// Use as the arguments of requests that do not take any
pub const NO_ARGUMENTS: Option<&()> = None;

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    server_address: Arc<str>,
    session: SessionStore,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(
            CLIENT_DEFAULT_SERVER_ADDRESS.to_string(),
            SessionStore::default(),
        )
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE", skip(session))]
    pub fn new(server_address: String, session: SessionStore) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            server_address: server_address.trim_end_matches('/').into(),
            session,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_settings(settings: &crate::ClientSettings) -> anyhow::Result<Self> {
        Ok(Self::new(
            settings.server_address.clone(),
            settings.session_store()?,
        ))
    }

    /// The session shared by every clone of this client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// On success the session is stored before the receiver resolves
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
        });
        let session = self.session.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_login(resp, session).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        let request = self.build_request(&PATH_AUTH_LOGIN, Some(&args));
        reqwest_cross::fetch(request, on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn register<F: UiCallBack>(
        &self,
        args: RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "username": args.username,
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp, None).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        let request = self.build_request(&PATH_AUTH_REGISTER, Some(&args));
        reqwest_cross::fetch(request, on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn health_check<F>(&self, ui_notify: F) -> oneshot::Receiver<anyhow::Result<()>>
    where
        F: UiCallBack,
    {
        self.send_request_expect_empty(PATH_HEALTH_CHECK, NO_ARGUMENTS, ui_notify)
    }

    /// Builds the request without credentials
    #[tracing::instrument(skip(args))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn build_request<T>(&self, path_spec: &PathSpec, args: Option<&T>) -> reqwest::RequestBuilder
    where
        T: serde::Serialize + Debug,
    {
        let is_get_method = path_spec.method == Method::GET;
        let mut request = self
            .api_client
            .request(path_spec.method.clone(), self.path_to_url(&path_spec.path));
        if let Some(args) = args {
            request = if is_get_method {
                request.query(args)
            } else {
                request.json(args)
            };
        }
        request
    }

    /// Attaches the bearer token of `credentials` if any and starts the request
    fn initiate_request<T, F, O>(
        &self,
        path_spec: &PathSpec,
        args: Option<&T>,
        credentials: Option<&SentCredentials>,
        on_done: F,
    ) where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let request = self.build_request(path_spec, args);
        let request = match credentials {
            Some(credentials) => request.bearer_auth(credentials.token.expose_secret()),
            None => request,
        };
        reqwest_cross::fetch(request, on_done)
    }

    /// Reads the stored token once so the same value is sent and, on a 401,
    /// used to decide which session to clear
    fn current_credentials(&self) -> Option<SentCredentials> {
        self.session.token().map(|token| SentCredentials {
            session: self.session.clone(),
            token,
        })
    }

    fn send_request_expect_json<P, F, T, U>(
        &self,
        path: P,
        args: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        P: RequestPath,
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let path_spec = match path.into_path_spec() {
            Ok(path_spec) => path_spec,
            Err(e) => return rejected_before_sending(e, ui_notify),
        };
        let (tx, rx) = oneshot::channel();
        let credentials = self.current_credentials();
        let sent_with = credentials.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp, sent_with).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        self.initiate_request(&path_spec, args, credentials.as_ref(), on_done);
        rx
    }

    fn send_request_expect_empty<P, F, T>(
        &self,
        path: P,
        args: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        P: RequestPath,
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let path_spec = match path.into_path_spec() {
            Ok(path_spec) => path_spec,
            Err(e) => return rejected_before_sending(e, ui_notify),
        };
        let (tx, rx) = oneshot::channel();
        let credentials = self.current_credentials();
        let sent_with = credentials.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_empty(resp, sent_with).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        self.initiate_request(&path_spec, args, credentials.as_ref(), on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!("{}{path}", self.server_address)
    }
}

/// A path that is either fixed or built from an id that may not be usable
trait RequestPath {
    fn into_path_spec(self) -> Result<PathSpec, ConversionError>;
}

impl RequestPath for PathSpec {
    fn into_path_spec(self) -> Result<PathSpec, ConversionError> {
        Ok(self)
    }
}

impl RequestPath for Result<PathSpec, ConversionError> {
    fn into_path_spec(self) -> Result<PathSpec, ConversionError> {
        self
    }
}

/// Resolves the receiver with `error` without contacting the backend
fn rejected_before_sending<T, F>(
    error: ConversionError,
    ui_notify: F,
) -> oneshot::Receiver<anyhow::Result<T>>
where
    F: UiCallBack,
{
    warn!(?error, "request not sent");
    let (tx, rx) = oneshot::channel();
    send_outcome(tx, Err(anyhow::Error::from(error).context("invalid request path")));
    ui_notify();
    rx
}

/// The token a request was sent with and the session it was read from
#[derive(Debug, Clone)]
struct SentCredentials {
    session: SessionStore,
    token: AuthToken,
}

impl SentCredentials {
    /// Clears the session unless a different token has been stored since
    fn revoke(&self) {
        if self.session.clear_session_if_token(&self.token) {
            warn!("credentials rejected, session cleared");
        } else {
            info!("stale token rejected, newer session kept");
        }
    }
}

fn send_outcome<T>(tx: oneshot::Sender<anyhow::Result<T>>, msg: anyhow::Result<T>) {
    if tx.send(msg).is_err() {
        warn!("receiver dropped before the response was delivered");
    }
}

#[tracing::instrument(ret, err(Debug), skip(credentials))]
async fn process_empty(
    response: reqwest::Result<reqwest::Response>,
    credentials: Option<SentCredentials>,
) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response, credentials).await)
    }
}

#[tracing::instrument(ret, err(Debug), skip(credentials))]
async fn process_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
    credentials: Option<SentCredentials>,
) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .json()
            .await
            .context("failed to parse result as json")?)
    } else {
        Err(handle_error(response, credentials).await)
    }
}

#[tracing::instrument(ret, err(Debug), skip(session))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    session: SessionStore,
) -> anyhow::Result<UserProfile> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response, None).await);
    }
    let login_response: LoginResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    let (token, user) = login_response.into_parts();
    session
        .set_session(token, &user)
        .context("failed to store session")?;
    info!(username = %user.username, "logged in");
    Ok(user)
}

/// Converts a failed response into an [`ApiError`]
///
/// A 401 on a request that carried a token means the backend no longer
/// accepts that token so the session holding it is cleared
#[tracing::instrument(ret, skip(credentials))]
async fn handle_error(
    response: reqwest::Response,
    credentials: Option<SentCredentials>,
) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    if status == StatusCode::UNAUTHORIZED {
        if let Some(credentials) = credentials {
            credentials.revoke();
        }
    }
    let message = match response.text().await {
        Ok(body) => message_from_body(&body),
        Err(e) => {
            warn!(?e, "failed to get response body");
            None
        }
    };
    ApiError::new(status, message).into()
}

/// Prefers the `message` of a [`MessageResponse`] and falls back to the
/// raw text
fn message_from_body(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    Some(match serde_json::from_str::<MessageResponse>(body) {
        Ok(MessageResponse { message }) => message,
        Err(_) => body.to_string(),
    })
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
