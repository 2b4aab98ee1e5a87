fn main() {
    if let Err(e) = btrs_launcher::run() {
        eprintln!("btrs-launcher: {e:#}");
        std::process::exit(1);
    }
}
