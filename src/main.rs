fn main() -> std::process::ExitCode {
    laptop_import_lib::run()
}
