fn main() -> std::process::ExitCode {
    promptblok_lib::run()
}
