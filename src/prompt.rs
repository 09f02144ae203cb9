//! Interactive yes/no confirmation.

use std::io::{self, BufRead};

const POSITIVE_RESPONSES: [&str; 2] = ["y", "yes"];

/// Read one line from `reader` and return true if it is `y` or `yes`, ignoring case
/// and surrounding whitespace.
///
/// Anything else, including end of input or a read error, is a "no".
pub fn ask_yes_no<R: BufRead>(mut reader: R) -> bool {
    let mut response = String::new();

    match reader.read_line(&mut response) {
        Ok(0) | Err(_) => false,
        Ok(_) => {
            let response = response.trim().to_lowercase();
            POSITIVE_RESPONSES.contains(&response.as_str())
        }
    }
}

/// [ask_yes_no] on the process' standard input.
pub fn ask_yes_no_stdin() -> bool {
    ask_yes_no(io::stdin().lock())
}
