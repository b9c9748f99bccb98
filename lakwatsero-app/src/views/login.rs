use std::time::Duration;

use lakwatsero_core::identity::Session;
use lakwatsero_shared::Masked;

use crate::error::{AppError, AppResult};
use crate::navigation::{Redirect, Route};
use crate::state::AppState;

pub const MIN_PASSWORD_LEN: usize = 8;
const LANDING_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// `local@domain.tld` with no whitespace anywhere.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_credentials(email: &str, password: &Masked<String>) -> LoginErrors {
    LoginErrors {
        email: (!looks_like_email(email)).then_some("Invalid email format."),
        password: (password.expose().chars().count() < MIN_PASSWORD_LEN)
            .then_some("Password must be at least 8 characters."),
    }
}

pub struct LoginView {
    state: AppState,
    errors: LoginErrors,
}

impl LoginView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            errors: LoginErrors::default(),
        }
    }

    /// Opening the login screen ends any current session.
    pub async fn activate(&mut self) {
        self.errors = LoginErrors::default();
        self.state.session.sign_out().await;
    }

    pub fn errors(&self) -> &LoginErrors {
        &self.errors
    }

    /// Returns `None` when the form did not validate; the field errors are
    /// then available from [`errors`](Self::errors).
    pub async fn login(&mut self, email: &str, password: Masked<String>) -> AppResult<Option<Redirect>> {
        self.errors = validate_credentials(email, &password);
        if !self.errors.is_empty() {
            return Ok(None);
        }

        let accounts = &self.state.accounts;
        let signed_in = async {
            let token = accounts.login(email, &password).await?;
            let user = accounts.user_details(&token).await?;
            Ok::<_, lakwatsero_core::repository::GatewayError>(Session { token, user })
        }
        .await;

        match signed_in {
            Ok(session) => {
                let landing = if session.is_admin() {
                    Route::AdminDashboard
                } else {
                    Route::Home
                };
                self.state.session.sign_in(session).await;
                self.state.notices.success("Login successful!");
                Ok(Some(Redirect::delayed(landing, LANDING_DELAY)))
            }
            Err(err) => {
                let err = AppError::LoginFailed(err);
                self.state.notices.send(err.notice());
                Err(err)
            }
        }
    }
}
