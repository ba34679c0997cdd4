use thiserror::Error;

/// A date format pattern that cannot be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format pattern is empty")]
    Empty,

    #[error("unterminated quote at byte {offset} of `{pattern}`")]
    UnterminatedQuote { pattern: String, offset: usize },

    #[error("unsupported token `{token}` in `{pattern}`")]
    UnsupportedToken { pattern: String, token: String },
}

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("locale pack has no name")]
    MissingName,

    #[error("`{field}` must list 12 months, found {found}")]
    MonthCount { field: &'static str, found: usize },

    #[error("`{0}` contains an empty month name")]
    EmptyName(&'static str),

    #[error("am/pm names must be non-empty and distinct")]
    Meridiem,
}

/// Invalid component props
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("`{field}` is not a number: `{value}`")]
    NotANumber { field: &'static str, value: String },

    #[error("min ({min}) is greater than max ({max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("range preset `{label}` ends before it starts")]
    ReversedRange { label: String },

    #[error("default value does not match picker type `{kind}`")]
    ValueShape { kind: &'static str },
}
