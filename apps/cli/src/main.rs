//! `stockroom` binary. Setup lives in `lib.rs` for testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    stockroom_cli::run().await
}
