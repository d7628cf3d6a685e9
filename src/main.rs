use std::process::ExitCode;

fn main() -> ExitCode {
    match stellar_cohorts::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("starplot: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
