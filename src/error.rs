use thiserror::Error;

/// A raw EXIF value did not have the shape a consumer required.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("unexpected tag value type for {tag}: expected {expected}, found {found}")]
    UnexpectedType {
        tag: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unexpected component count for {tag}: expected {expected}, found {found}")]
    WrongCount {
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("{axis} {value} is outside the valid range")]
    OutOfRange { axis: &'static str, value: f64 },
}

/// Why a file did not produce a marker. None of these abort the batch.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("failed to open `{path}`: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no EXIF metadata in `{path}`")]
    NoMetadata { path: String },

    #[error("no GPSInfo block in `{path}`")]
    NoGpsBlock { path: String },

    #[error("GPS block in `{path}` is missing {missing}")]
    IncompleteGps { path: String, missing: &'static str },

    #[error("bad GPS value in `{path}`: {source}")]
    BadValue {
        path: String,
        #[source]
        source: ValueError,
    },

    #[error("failed to decode image `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to build popup for `{path}`: {message}")]
    Thumbnail { path: String, message: String },
}

impl SkipReason {
    /// Short stable label, used for the run summary.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Unreadable { .. } => "unreadable",
            SkipReason::NoMetadata { .. } => "no-metadata",
            SkipReason::NoGpsBlock { .. } => "no-gps-block",
            SkipReason::IncompleteGps { .. } => "incomplete-gps",
            SkipReason::BadValue { .. } => "bad-value",
            SkipReason::Decode { .. } => "decode-failure",
            SkipReason::Thumbnail { .. } => "thumbnail-failure",
        }
    }
}
