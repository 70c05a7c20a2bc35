use super::{SessionError, SessionResult};
use crate::api::{decode_json, endpoints, HttpRequest, HttpResponse, Transport, TransportError};
use crate::model::credentials::Credentials;
use crate::model::note::{Note, NoteAnalytics, NoteDraft, NoteId};
use crate::model::session::{Session, TokenPair, UserIdentity};
use crate::storage::{LocalStorage, StorageResult, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Behaviour switches for the session store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// When set, an authenticated request answered with 401 triggers one
    /// token refresh and one retry. Off by default: callers refresh
    /// explicitly.
    pub auto_refresh: bool,
}

/// Owner of the session, its durable token mirror and the API transport.
///
/// Created once at startup and handed to whatever needs it; there is no
/// global instance.
pub struct SessionStore<S: LocalStorage, T: Transport> {
    session: Session,
    storage: S,
    transport: T,
    options: SessionOptions,
}

impl<S: LocalStorage, T: Transport> SessionStore<S, T> {
    /// Builds a store whose tokens are read back from `storage`.
    ///
    /// The user identity is not durable and starts empty. Blank stored
    /// tokens count as absent.
    pub fn restore(storage: S, transport: T, options: SessionOptions) -> SessionResult<Self> {
        let session = Session {
            access_token: non_empty(storage.get_item(ACCESS_TOKEN_KEY)?),
            refresh_token: non_empty(storage.get_item(REFRESH_TOKEN_KEY)?),
            user: None,
        };
        info!(
            "event=session_restore module=session status=ok authenticated={}",
            session.is_authenticated()
        );

        Ok(Self {
            session,
            storage,
            transport,
            options,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.session.user.as_ref()
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exchanges credentials for tokens and records the user's email.
    ///
    /// # Errors
    /// - `SessionError::Authentication` on any transport failure; the
    ///   session is left untouched.
    /// - `SessionError::Storage` when the tokens cannot be persisted.
    pub async fn login(&mut self, credentials: &Credentials) -> SessionResult<()> {
        info!("event=session_login module=session status=start");
        let request = HttpRequest::post(endpoints::LOGIN)
            .json(credentials)
            .map_err(SessionError::Authentication)?;

        let tokens: TokenPair = match self.send_decoded(request).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(
                    "event=session_login module=session status=error http_status={} error={}",
                    status_label(&err),
                    err
                );
                return Err(SessionError::Authentication(err));
            }
        };

        self.set_tokens(tokens)?;
        self.session.user = Some(UserIdentity::from_email(credentials.email.as_str()));
        info!("event=session_login module=session status=ok");
        Ok(())
    }

    /// Creates an account. The returned profile is kept in memory only;
    /// no tokens are issued.
    pub async fn register(&mut self, credentials: &Credentials) -> SessionResult<UserIdentity> {
        info!("event=session_register module=session status=start");
        let request = HttpRequest::post(endpoints::REGISTER)
            .json(credentials)
            .map_err(SessionError::Registration)?;

        let profile: UserIdentity = match self.send_decoded(request).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(
                    "event=session_register module=session status=error http_status={} error={}",
                    status_label(&err),
                    err
                );
                return Err(SessionError::Registration(err));
            }
        };

        self.session.user = Some(profile.clone());
        info!("event=session_register module=session status=ok");
        Ok(profile)
    }

    /// Trades the refresh token for a new access token.
    ///
    /// A response without `refresh_token` keeps the current one. Expired
    /// sessions surface as `SessionError::TokenRefresh`; the caller decides
    /// whether to log out. With no refresh token in the session the same
    /// error is returned and no request is made.
    pub async fn refresh_access_token(&mut self) -> SessionResult<()> {
        let refresh_token = match self.session.refresh_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                warn!(
                    "event=session_refresh module=session status=error error_code=missing_refresh_token"
                );
                return Err(SessionError::TokenRefresh(TransportError::NotSent(
                    "no refresh token in session".to_string(),
                )));
            }
        };

        info!("event=session_refresh module=session status=start");
        let request = HttpRequest::post(endpoints::REFRESH)
            .json(&json!({ "refresh_token": refresh_token }))
            .map_err(SessionError::TokenRefresh)?;

        let tokens: TokenPair = match self.send_decoded(request).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(
                    "event=session_refresh module=session status=error http_status={} error={}",
                    status_label(&err),
                    err
                );
                return Err(SessionError::TokenRefresh(err));
            }
        };

        self.set_tokens(tokens)?;
        info!("event=session_refresh module=session status=ok");
        Ok(())
    }

    /// Forgets the session. Memory is cleared first and stays cleared even
    /// when this returns an error; calling it again is a no-op.
    ///
    /// Each durable key is removed on its own. A key that cannot be removed
    /// is overwritten with an empty value, which restores as signed out.
    ///
    /// # Errors
    /// - `SessionError::Storage` with the first removal failure.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.session.clear();

        let access = self.forget_durable(ACCESS_TOKEN_KEY);
        let refresh = self.forget_durable(REFRESH_TOKEN_KEY);

        match access.and(refresh) {
            Err(err) => Err(SessionError::Storage(err)),
            Ok(()) => {
                info!("event=session_logout module=session status=ok");
                Ok(())
            }
        }
    }

    /// Replaces both tokens, persisting them before updating memory.
    ///
    /// Every request issued afterwards carries `Bearer <access_token>`.
    pub fn set_tokens(&mut self, tokens: TokenPair) -> SessionResult<()> {
        let refresh_token = tokens
            .refresh_token
            .or_else(|| self.session.refresh_token.clone());

        match refresh_token.as_deref() {
            Some(refresh) => self.storage.set_items(&[
                (ACCESS_TOKEN_KEY, tokens.access_token.as_str()),
                (REFRESH_TOKEN_KEY, refresh),
            ])?,
            None => self
                .storage
                .set_item(ACCESS_TOKEN_KEY, tokens.access_token.as_str())?,
        }

        self.session.access_token = Some(tokens.access_token);
        self.session.refresh_token = refresh_token;
        Ok(())
    }

    /// Lists notes visible to the signed-in user.
    pub async fn fetch_notes(&mut self) -> SessionResult<Vec<Note>> {
        let response = self
            .send_authorized(HttpRequest::get(endpoints::NOTES))
            .await?;
        decode_json(&response).map_err(SessionError::Request)
    }

    /// Creates a note and returns the stored resource.
    pub async fn create_note(&mut self, text: &str) -> SessionResult<Note> {
        let request = note_write(HttpRequest::post(endpoints::NOTES), text)?;
        let response = self.send_authorized(request).await?;
        decode_json(&response).map_err(SessionError::Request)
    }

    /// Aggregate statistics over the caller's notes.
    pub async fn fetch_analytics(&mut self) -> SessionResult<NoteAnalytics> {
        let response = self
            .send_authorized(HttpRequest::get(endpoints::NOTES_ANALYTICS))
            .await?;
        decode_json(&response).map_err(SessionError::Request)
    }

    pub async fn fetch_note(&mut self, id: NoteId) -> SessionResult<Note> {
        let response = self
            .send_authorized(HttpRequest::get(endpoints::note(id)))
            .await?;
        decode_json(&response).map_err(SessionError::Request)
    }

    /// Stores `text` as a new version of note `id` and returns that version.
    pub async fn update_note(&mut self, id: NoteId, text: &str) -> SessionResult<Note> {
        let request = note_write(HttpRequest::patch(endpoints::note(id)), text)?;
        let response = self.send_authorized(request).await?;
        decode_json(&response).map_err(SessionError::Request)
    }

    pub async fn delete_note(&mut self, id: NoteId) -> SessionResult<()> {
        self.send_authorized(HttpRequest::delete(endpoints::note(id)))
            .await?;
        Ok(())
    }

    async fn send_decoded<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<R, TransportError> {
        let response = self.transport.send(request).await?.error_for_status()?;
        decode_json(&response)
    }

    async fn send_with_bearer(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = request.bearer(self.session.bearer());
        self.transport.send(request).await?.error_for_status()
    }

    async fn send_authorized(&mut self, request: HttpRequest) -> SessionResult<HttpResponse> {
        match self.send_with_bearer(request.clone()).await {
            Err(err) if err.is_unauthorized() && self.can_auto_refresh() => {
                warn!(
                    "event=session_auto_refresh module=session status=start path={}",
                    request.path
                );
                self.refresh_access_token().await?;
                self.send_with_bearer(request)
                    .await
                    .map_err(SessionError::Request)
            }
            Err(err) => {
                warn!(
                    "event=api_request module=session status=error path={} http_status={} error={}",
                    request.path,
                    status_label(&err),
                    err
                );
                Err(SessionError::Request(err))
            }
            Ok(response) => Ok(response),
        }
    }

    fn forget_durable(&mut self, key: &str) -> StorageResult<()> {
        let err = match self.storage.remove_item(key) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        error!(
            "event=session_logout module=session status=error error_code=storage_remove_failed key={key} error={err}"
        );
        if let Err(blank_err) = self.storage.set_item(key, "") {
            error!(
                "event=session_logout module=session status=error error_code=storage_blank_failed key={key} error={blank_err}"
            );
        }
        Err(err)
    }

    fn can_auto_refresh(&self) -> bool {
        self.options.auto_refresh
            && self
                .session
                .refresh_token
                .as_deref()
                .is_some_and(|token| !token.is_empty())
    }
}

fn note_write(request: HttpRequest, text: &str) -> SessionResult<HttpRequest> {
    request
        .json(&NoteDraft {
            text: text.to_string(),
        })
        .map_err(SessionError::Request)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|token| !token.is_empty())
}

fn status_label(err: &TransportError) -> String {
    err.status()
        .map_or_else(|| "none".to_string(), |status| status.to_string())
}
