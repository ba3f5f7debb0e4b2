use crate::api::ServerApi;
use crate::args::Args;
use crate::error::Error;
use crate::server::{ServerContext, Unresolved};
use log::*;
use std::io::Write;

pub async fn fetch<A: ServerApi>(
    api: &A,
    ctx: ServerContext<Unresolved>,
) -> Result<String, Error> {
    debug!("resolving oauth client for {}", ctx.url);
    let client = api
        .get_client(&ctx.url)
        .await
        .map_err(Error::ClientResolution)?;
    debug!("resolved oauth client {}", client.id);

    let ctx = ctx.with_client(client);
    debug!("fetching access token for {}", ctx.user.username);
    api.login_and_get_access_token(&ctx)
        .await
        .map_err(Error::TokenFetch)
}

pub async fn run<A: ServerApi, W: Write>(api: &A, args: &Args, out: &mut W) -> Result<(), Error> {
    let tok = fetch(api, args.context()).await?;
    writeln!(out, "{}", tok)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{self, Command};
    use crate::server::{Client, User};
    use anyhow::anyhow;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        GetClient(String),
        Login(ServerContext),
    }

    /// Answers from canned results and records every call.
    struct StubApi {
        client: Result<Client, String>,
        token: Result<String, String>,
        calls: Mutex<Vec<Call>>,
    }

    impl StubApi {
        fn new(client: Result<Client, String>, token: Result<String, String>) -> StubApi {
            StubApi {
                client,
                token,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ok() -> StubApi {
            StubApi::new(Ok(Client::new("abc", "xyz")), Ok("tok-123".to_string()))
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ServerApi for StubApi {
        async fn get_client(&self, url: &str) -> Result<Client, anyhow::Error> {
            self.calls.lock().unwrap().push(Call::GetClient(url.to_string()));
            self.client.clone().map_err(|e| anyhow!(e))
        }

        async fn login_and_get_access_token(
            &self,
            ctx: &ServerContext,
        ) -> Result<String, anyhow::Error> {
            self.calls.lock().unwrap().push(Call::Login(ctx.clone()));
            self.token.clone().map_err(|e| anyhow!(e))
        }
    }

    fn alice() -> Args {
        Args {
            url: "https://example.test".to_string(),
            user: User::new("alice", "secret"),
            verbose: false,
        }
    }

    #[tokio::test]
    async fn prints_token() {
        let api = StubApi::ok();
        let mut out: Vec<u8> = Vec::new();

        run(&api, &alice(), &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "tok-123\n");
    }

    #[tokio::test]
    async fn passes_fields_through_unchanged() {
        let api = StubApi::new(
            Ok(Client::new(" id with spaces ", "sec/ret+=")),
            Ok("t".to_string()),
        );
        let a = Args {
            url: "http://localhost:9000/sub/".to_string(),
            user: User::new("Élodie", "p@ss word&x=1"),
            verbose: false,
        };

        run(&api, &a, &mut Vec::<u8>::new()).await.unwrap();

        let want_ctx = ServerContext::new(
            "http://localhost:9000/sub/",
            User::new("Élodie", "p@ss word&x=1"),
        )
        .with_client(Client::new(" id with spaces ", "sec/ret+="));
        assert_eq!(
            api.calls(),
            vec![
                Call::GetClient("http://localhost:9000/sub/".to_string()),
                Call::Login(want_ctx),
            ]
        );
    }

    #[tokio::test]
    async fn client_failure_skips_login() {
        let api = StubApi::new(Err("connection refused".to_string()), Ok("tok".to_string()));
        let mut out: Vec<u8> = Vec::new();

        let err = run(&api, &alice(), &mut out).await.unwrap_err();

        assert!(matches!(err, Error::ClientResolution(_)));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(api.calls(), vec![Call::GetClient("https://example.test".to_string())]);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn login_failure_prints_nothing() {
        let api = StubApi::new(Ok(Client::new("abc", "xyz")), Err("invalid_grant".to_string()));
        let mut out: Vec<u8> = Vec::new();

        let err = run(&api, &alice(), &mut out).await.unwrap_err();

        assert!(matches!(err, Error::TokenFetch(_)));
        assert!(err.to_string().contains("invalid_grant"));
        assert_eq!(api.calls().len(), 2);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn missing_argument_makes_no_calls() {
        let api = StubApi::ok();

        let res = args::parse(&["-u", "https://example.test", "-n", "alice"]);
        if let Ok(Command::Fetch(a)) = &res {
            run(&api, a, &mut Vec::<u8>::new()).await.unwrap();
        }

        assert!(matches!(res, Err(Error::MissingArgument("password"))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_match() {
        let mut outs = Vec::new();
        for _ in 0..2 {
            let api = StubApi::ok();
            let mut out: Vec<u8> = Vec::new();
            run(&api, &alice(), &mut out).await.unwrap();
            outs.push((out, api.calls()));
        }
        assert_eq!(outs[0], outs[1]);
    }
}
