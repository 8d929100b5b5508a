use hdrcheck::Config;
use hdrcheck::cli::xmain;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = Config::default();
    match xmain(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
