mod cli;
mod workflow;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // RUST_LOG が未指定なら info レベルで出力します
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    match workflow::run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}
