use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'gantry init <name>' to create a new project"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gantry.toml")]
    #[diagnostic(code(gantry::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid route path '{path}'")]
    #[diagnostic(
        code(gantry::invalid_path),
        help(
            "{reason}. Paths start with '/', and each segment is a name or a '{{param}}' placeholder."
        )
    )]
    InvalidPath {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid path")]
        span: Option<SourceSpan>,
        path: String,
        reason: String,
    },

    #[error("{verb} on '{route}' has no handler")]
    #[diagnostic(
        code(gantry::missing_handler),
        help("every non-mock method needs a 'handler' entry point, e.g. handler = \"app.getAllTodo\"")
    )]
    MissingHandler {
        #[source_code]
        src: NamedSource<String>,
        #[label("method declared here")]
        span: Option<SourceSpan>,
        route: String,
        verb: String,
    },

    #[error("mock {verb} on '{route}' cannot be authenticated")]
    #[diagnostic(
        code(gantry::mock_authorization),
        help("mock integrations terminate locally and never see credentials; drop auth = \"authenticated\"")
    )]
    MockAuthorization {
        #[source_code]
        src: NamedSource<String>,
        #[label("mock method declared here")]
        span: Option<SourceSpan>,
        route: String,
        verb: String,
    },

    #[error("duplicate logical name '{name}'")]
    #[diagnostic(
        code(gantry::duplicate_name),
        help("logical names become provider resource names and must be unique across the manifest")
    )]
    DuplicateName {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("conflicts with first declaration")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("{message}")]
    #[diagnostic(code(gantry::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with source context
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid-path error
    pub fn invalid_path(
        path: impl Into<String>,
        reason: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::InvalidPath {
            src: NamedSource::new(filename, src.to_string()),
            span,
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Create a missing-handler error
    pub fn missing_handler(
        route: impl Into<String>,
        verb: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::MissingHandler {
            src: NamedSource::new(filename, src.to_string()),
            span,
            route: route.into(),
            verb: verb.into(),
        })
    }

    /// Create a mock-authorization error
    pub fn mock_authorization(
        route: impl Into<String>,
        verb: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::MockAuthorization {
            src: NamedSource::new(filename, src.to_string()),
            span,
            route: route.into(),
            verb: verb.into(),
        })
    }

    /// Create a duplicate-name error with both declaration sites labeled
    pub fn duplicate_name(
        name: impl Into<String>,
        src: &str,
        filename: &str,
        first_span: Option<SourceSpan>,
        second_span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::DuplicateName {
            src: NamedSource::new(filename, src.to_string()),
            first_span,
            second_span,
            name: name.into(),
        })
    }
}
