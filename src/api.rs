use crate::server::{Client, ServerContext};
use anyhow::{anyhow, bail, Context, Error};
use reqwest::Response;
use serde::Deserialize;

const USER_AGENT: &str = concat!("get-access-token/", env!("CARGO_PKG_VERSION"));

const CLIENT_PATH: &str = "/api/v1/oauth-clients/local";
const TOKEN_PATH: &str = "/api/v1/users/token";

// longest error body quoted in an error message, in chars
const MAX_ERROR_BODY: usize = 512;

/// Remote calls for a password-grant login; one request each, never retried.
#[allow(async_fn_in_trait)]
pub trait ServerApi {
    async fn get_client(&self, url: &str) -> Result<Client, Error>;

    async fn login_and_get_access_token(&self, ctx: &ServerContext) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct HttpApi {
    c: reqwest::Client,
}

impl HttpApi {
    pub fn new() -> Result<HttpApi, Error> {
        let c = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("build http client")?;
        Ok(HttpApi { c })
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

async fn check_status(rsp: Response) -> Result<Response, Error> {
    let status = rsp.status();
    if status.is_success() {
        return Ok(rsp);
    }
    let body = rsp
        .text()
        .await
        .with_context(|| format!("bad response status: {}: read body", status))?;
    let body = error_body(&body);
    if body.is_empty() {
        Err(anyhow!("bad response status: {}", status))
    } else {
        Err(anyhow!("bad response status: {}: {}", status, body))
    }
}

fn error_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut s: String = body.chars().take(MAX_ERROR_BODY).collect();
    s.push_str("...");
    s
}

impl ServerApi for HttpApi {
    async fn get_client(&self, url: &str) -> Result<Client, Error> {
        let req = self
            .c
            .get(endpoint(url, CLIENT_PATH))
            .build()
            .context("build request")?;
        let rsp = self.c.execute(req).await.context("execute request")?;
        let rsp = check_status(rsp).await?;

        let body: ClientResponse = rsp.json().await.context("json deserialize")?;
        Ok(Client::new(body.client_id, body.client_secret))
    }

    async fn login_and_get_access_token(&self, ctx: &ServerContext) -> Result<String, Error> {
        let form = [
            ("client_id", ctx.client.id.as_str()),
            ("client_secret", ctx.client.secret.as_str()),
            ("username", ctx.user.username.as_str()),
            ("password", ctx.user.password.as_str()),
            ("response_type", "code"),
            ("grant_type", "password"),
            ("scope", "upload"),
        ];
        let req = self
            .c
            .post(endpoint(&ctx.url, TOKEN_PATH))
            .form(&form)
            .build()
            .context("build request")?;
        let rsp = self.c.execute(req).await.context("execute request")?;
        let rsp = check_status(rsp).await?;

        let body: TokenResponse = rsp.json().await.context("json deserialize")?;
        if body.access_token.is_empty() {
            bail!("empty access token in response");
        }
        Ok(body.access_token)
    }
}

#[derive(Deserialize)]
struct ClientResponse {
    client_id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}
