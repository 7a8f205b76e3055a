use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    // -- CLI
    InvalidDomain(String),

    // -- Sources
    HttpStatus { url: String, status: u16 },
    UnexpectedPayload(String),

    // -- Externals
    #[from]
    Reqwest(reqwest::Error),

    #[from]
    Json(serde_json::Error),

    #[from]
    Regex(regex::Error),

    #[from]
    ParseInt(std::num::ParseIntError),

    #[from]
    File(std::io::Error),

    #[from]
    SystemTime(std::time::SystemTimeError),
}

/// Coarse classification used when reporting a failed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Parse,
    Io,
    Usage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDomain(_) => ErrorKind::Usage,
            Error::HttpStatus { .. } => ErrorKind::Transport,
            Error::Reqwest(err) if err.is_decode() => ErrorKind::Parse,
            Error::Reqwest(_) => ErrorKind::Transport,
            Error::UnexpectedPayload(_)
            | Error::Json(_)
            | Error::Regex(_)
            | Error::ParseInt(_) => ErrorKind::Parse,
            Error::File(_) | Error::SystemTime(_) => ErrorKind::Io,
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        let kind = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
            ErrorKind::Usage => "usage",
        };
        fmt.write_str(kind)
    }
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
