use std::io;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("missing required argument: --{0}")]
    MissingArgument(&'static str),
    #[error("bad arguments: {0}")]
    BadArguments(#[from] getopts::Fail),
    #[error("get client: {0:#}")]
    ClientResolution(anyhow::Error),
    #[error("get access token: {0:#}")]
    TokenFetch(anyhow::Error),
    #[error("write access token: {0}")]
    Output(#[from] io::Error),
}
