use std::process;

fn main() {
    match wiki_sync_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("wiki-sync error: {err}");
            process::exit(1);
        }
    }
}
