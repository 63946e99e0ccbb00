use serde::{Deserialize, Serialize};

/// Kind of analysis object, as named by the `Type` annotation in YODA files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Histo1D,
    Counter,
    /// Single value with errors (YODA1 `Scatter1D`, YODA2 `Estimate0D`)
    Estimate,
}

impl ObjectKind {
    /// Map a YODA block tag (`HISTO1D_V2`, `COUNTER_V3`, ...) to a kind.
    ///
    /// Returns `None` for block types this crate does not model.
    #[must_use]
    pub fn from_block_tag(tag: &str) -> Option<Self> {
        let base = strip_version(tag);
        match base {
            "HISTO1D" => Some(Self::Histo1D),
            "COUNTER" => Some(Self::Counter),
            "SCATTER1D" | "ESTIMATE0D" => Some(Self::Estimate),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Histo1D => write!(f, "Histo1D"),
            Self::Counter => write!(f, "Counter"),
            Self::Estimate => write!(f, "Estimate"),
        }
    }
}

/// Strip a trailing `_V<n>` format version from a block tag
#[must_use]
pub fn strip_version(tag: &str) -> &str {
    match tag.rfind("_V") {
        Some(pos)
            if pos + 2 < tag.len() && tag[pos + 2..].chars().all(|c| c.is_ascii_digit()) =>
        {
            &tag[..pos]
        }
        _ => tag,
    }
}

/// Format version of a block tag (`HISTO1D_V3` -> 3); untagged blocks are version 1
#[must_use]
pub fn block_version(tag: &str) -> u32 {
    let base = strip_version(tag);
    if base.len() == tag.len() {
        1
    } else {
        tag[base.len() + 2..].parse().unwrap_or(1)
    }
}

/// Namespace qualifier for analysis outputs in the same file.
///
/// Rivet writes finalized objects without a prefix, the unscaled objects
/// under `/RAW` and the reference data under `/REF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prefix(pub String);

impl Prefix {
    #[must_use]
    pub fn none() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn raw() -> Self {
        Self("/RAW".to_string())
    }

    #[must_use]
    pub fn reference() -> Self {
        Self("/REF".to_string())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full object path for `path` under this prefix
    #[must_use]
    pub fn qualify(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
