use sparklog::cli;

fn main() {
    // Diagnostics go to stderr; stdout carries only log lines
    cli::init_diagnostics();

    let code = cli::process_cli();
    if code != 0 {
        std::process::exit(code);
    }
}
