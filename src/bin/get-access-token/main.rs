use anyhow::{Context, Error};
use getaccesstoken::access_token;
use getaccesstoken::api::HttpApi;
use getaccesstoken::args::{self, Command};
use log::*;
use logosaurus::{self, Logger, L_LEVEL, L_TIME};
use std::env;
use std::io;
use std::process;

#[tokio::main]
async fn main() {
    let argv = env::args().collect::<Vec<String>>();
    let prog = argv
        .first()
        .map(String::as_str)
        .unwrap_or("get-access-token");

    let args = match args::parse(argv.get(1..).unwrap_or(&[])) {
        Ok(Command::Fetch(a)) => a,
        Ok(Command::Help) => {
            eprint!("{}", args::usage(prog));
            return;
        }
        Err(e) => {
            eprint!("{}: {}\n\n{}", prog, e, args::usage(prog));
            process::exit(2);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = Logger::builder(io::stderr())
        .set_prefix("get-access-token: ")
        .set_flags(L_LEVEL | L_TIME)
        .set_level(level)
        .build();
    if let Err(e) = logosaurus::init(logger) {
        eprintln!("{}: init logger: {}", prog, e);
    }

    if let Err(e) = run(&args).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(args: &args::Args) -> Result<(), Error> {
    let api = HttpApi::new().context("create api client")?;
    let stdout = io::stdout();
    access_token::run(&api, args, &mut stdout.lock()).await?;
    Ok(())
}
