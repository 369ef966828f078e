use crate::config::Config;
use crate::constants::{LOGOUT_PATH, USER_AGENT};
use crate::errors::{AppError, AppResult};
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

const FORM_SELECTOR: &str = "form";
const NAMED_INPUT_SELECTOR: &str = "input[name]";
const ANON_LOGIN_LINK_SELECTOR: &str = r#"a[href="/en"]"#;

static FORM_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static NAMED_INPUT_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static ANON_LOGIN_LINK_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// The login form as scraped from the portal root: resolved action URL plus
/// the form-encoded fields to submit.
#[derive(Debug, PartialEq, Eq)]
struct LoginForm {
    action: Url,
    fields: Vec<(String, String)>,
}

/// An authenticated portal session (cookie jar lives in the client).
///
/// Acquire with [`Session::login`], release with [`Session::logout`]. The CLI
/// layer guarantees logout on every exit path after a successful login; there
/// is no destructor magic.
pub struct Session {
    client: reqwest::Client,
    portal: Url,
}

impl Session {
    /// Logs into the portal by submitting the first form on the root page
    /// with the configured credentials.
    ///
    /// All named inputs of the form (hidden tokens included) are carried into
    /// the POST; only `name` and `pass` are overwritten. Success is
    /// content-sniffed: if the post-login page still shows the anonymous
    /// "Login" navigation link, the credentials were rejected — the HTTP
    /// status is not consulted.
    ///
    /// # Errors
    ///
    /// `LoginFailed` on rejected credentials, `ParseError` if the root page
    /// has no form, plus network errors.
    pub async fn login(config: &Config) -> AppResult<Self> {
        let (username, password) = config.credentials()?;
        let portal = Url::parse(&config.portal_url)?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;

        let body = client.get(portal.clone()).send().await?.text().await?;
        let form = parse_login_form(&body, &portal, username, password)?;

        let body = client
            .post(form.action)
            .form(&form.fields)
            .send()
            .await?
            .text()
            .await?;
        if has_anonymous_login_link(&body) {
            return Err(AppError::LoginFailed);
        }

        info!(portal = portal.as_str(), "Logged in");
        Ok(Self { client, portal })
    }

    /// Fetches a portal page (path relative to the portal root) as HTML.
    pub(crate) async fn get_html(&self, path: &str) -> AppResult<String> {
        let url = self.portal.join(path)?;
        Ok(self.client.get(url).send().await?.text().await?)
    }

    /// Ends the session by visiting the logout page, ignoring the outcome.
    pub async fn logout(self) {
        let Ok(url) = self.portal.join(LOGOUT_PATH) else {
            return;
        };
        match self.client.get(url).send().await {
            Ok(_) => debug!("Logged out"),
            Err(e) => debug!(error = %e, "Logout request failed (ignored)"),
        }
    }
}

/// Extracts the first form on the page and fills in the credentials.
fn parse_login_form(
    html: &str,
    portal: &Url,
    username: &str,
    password: &str,
) -> AppResult<LoginForm> {
    let document = Html::parse_document(html);

    let form_selector = FORM_SELECTOR_CACHED
        .get_or_init(|| Selector::parse(FORM_SELECTOR).expect("FORM_SELECTOR is a valid selector"));
    let input_selector = NAMED_INPUT_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(NAMED_INPUT_SELECTOR).expect("NAMED_INPUT_SELECTOR is a valid selector")
    });

    let form = document
        .select(form_selector)
        .next()
        .ok_or_else(|| AppError::ParseError("no form on the portal login page".to_string()))?;

    let action = match form.value().attr("action") {
        Some(action) if !action.is_empty() => portal.join(action)?,
        _ => portal.clone(),
    };

    let mut fields: Vec<(String, String)> = Vec::new();
    for input in form.select(input_selector) {
        let name = input.value().attr("name").unwrap_or_default();
        let value = match name {
            "name" => username,
            "pass" => password,
            _ => input.value().attr("value").unwrap_or_default(),
        };
        fields.push((name.to_string(), value.to_string()));
    }
    if !fields.iter().any(|(n, _)| n == "name") {
        fields.push(("name".to_string(), username.to_string()));
    }
    if !fields.iter().any(|(n, _)| n == "pass") {
        fields.push(("pass".to_string(), password.to_string()));
    }

    Ok(LoginForm { action, fields })
}

/// True if the page still carries the anonymous "Login" navigation link.
fn has_anonymous_login_link(html: &str) -> bool {
    let document = Html::parse_document(html);
    let selector = ANON_LOGIN_LINK_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(ANON_LOGIN_LINK_SELECTOR)
            .expect("ANON_LOGIN_LINK_SELECTOR is a valid selector")
    });
    document
        .select(selector)
        .any(|a| a.text().collect::<String>().trim() == "Login")
}
