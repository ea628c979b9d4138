//! techinvoice main entrypoint.

use techinvoice::run;
use techinvoice::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        if e.is_storage_failure() {
            eprintln!("The draft may not have been saved; run `techinvoice show` to check.");
        }
        std::process::exit(1);
    }
}
