use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input did not contain anything shaped like an arXiv identifier.
    #[error("no arXiv identifier found in {0:?}")]
    InvalidInput(String),

    #[error("arXiv returned no entry for {0}")]
    NotFound(String),

    /// arXiv answered with an error entry instead of a paper.
    #[error("arXiv rejected {id}: {message}")]
    Api { id: String, message: String },

    #[error("unknown Notion database {0:?}")]
    UnknownDatabase(String),

    #[error("NOTION_AUTH is not set")]
    MissingToken,

    #[error("Notion responded with {status}: {message}")]
    Notion { status: u16, message: String },

    #[error("a file already exists at: {0}")]
    FileExists(String),

    #[error(transparent)]
    Http(#[from] Box<ureq::Error>),

    #[error("could not parse arXiv response: {0}")]
    Feed(#[from] quick_xml::de::DeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
