//! Strongly typed identifier wrappers.
//!
//! Stations, tracks, and trains are keyed by the human-facing codes carried
//! in the topology and schedule files (`"NDLS"`, `"NDLS_ANVR_MAIN"`,
//! `"12001_SHATABDI"`), so each wrapper holds a `String` rather than a dense
//! index.  All IDs implement `Borrow<str>` so `FxHashMap<TrackId, _>` lookups
//! work directly from a `&str` without an allocation.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around an owned code string.
macro_rules! typed_code {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub String);

        impl $name {
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_code! {
    /// Short station code, e.g. `NDLS`.
    pub struct StationCode;
}

typed_code! {
    /// Unique directed track-edge key, e.g. `NDLS_ANVR_MAIN`.
    pub struct TrackId;
}

typed_code! {
    /// Train identifier from the schedule file, e.g. `12001_SHATABDI`.
    pub struct TrainId;
}
