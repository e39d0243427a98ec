fn main() -> std::process::ExitCode {
    pravaah_lib::run()
}
