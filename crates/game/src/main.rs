use std::process::ExitCode;

mod app;

fn main() -> ExitCode {
    app::bootstrap::run()
}
