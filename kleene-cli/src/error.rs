use kleene::format::error::FormatError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {path}: {source}")]
    InputFile { path: String, source: io::Error },
    #[error(transparent)]
    Compile(#[from] kleene::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}

pub fn read_file(path: &str) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::InputFile {
        path: path.to_string(),
        source,
    })
}
