pub mod batch;
pub mod compile;
pub mod table;

use crate::error::{read_file, Error};

/// Combine `--string` arguments with the lines of an optional
/// `--strings-file`.
pub fn gather_strings(inline: &[String], file: &Option<String>) -> Result<Vec<String>, Error> {
    let mut strings: Vec<String> = inline.to_vec();
    if let Some(path) = file {
        let contents = read_file(path)?;
        strings.extend(contents.lines().map(|l| l.to_string()));
    }
    Ok(strings)
}
