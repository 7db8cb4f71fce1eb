// src/main.rs

use launchshim::{cli, logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("launchshim error: {err}");
            err.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run_main() -> launchshim::errors::Result<i32> {
    let args = cli::parse();
    logging::init_logging()?;
    run(args).await
}
