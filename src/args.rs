use crate::error::Error;
use crate::server::{ServerContext, Unresolved, User};
use getopts::Options;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Fetch(Args),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub url: String,
    pub user: User,
    pub verbose: bool,
}

impl Args {
    pub fn context(&self) -> ServerContext<Unresolved> {
        ServerContext::new(self.url.clone(), self.user.clone())
    }
}

pub fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("u", "url", "Server url", "URL");
    opts.optopt("n", "username", "Username", "USERNAME");
    opts.optopt("p", "password", "Password", "PASSWORD");
    opts.optflag("v", "verbose", "Log progress to stderr");
    opts.optflag("h", "help", "Print this help");
    opts
}

pub fn usage(prog: &str) -> String {
    let brief = format!(
        "usage: {} --url <url> --username <username> --password <password>",
        prog
    );
    options().usage(&brief)
}

/// Parses the command line, excluding the program name.
pub fn parse<S: AsRef<str>>(argv: &[S]) -> Result<Command, Error> {
    let m = options().parse(argv.iter().map(|s| s.as_ref()))?;
    if m.opt_present("h") {
        return Ok(Command::Help);
    }
    if !m.free.is_empty() {
        return Err(Error::BadArguments(getopts::Fail::UnrecognizedOption(
            m.free[0].clone(),
        )));
    }

    let required = |short: &str, name: &'static str| {
        m.opt_str(short)
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingArgument(name))
    };
    let url = required("u", "url")?;
    let username = required("n", "username")?;
    let password = required("p", "password")?;

    Ok(Command::Fetch(Args {
        url,
        user: User::new(username, password),
        verbose: m.opt_present("v"),
    }))
}
