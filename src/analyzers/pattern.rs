use regex::bytes::Regex;

use crate::errors::AnalyzeError;

/// A compiled content pattern.
///
/// The empty pattern string compiles to [`Pattern::Any`], which matches any
/// content including empty content: presence of the artifact is enough.
#[derive(Debug, Clone)]
pub enum Pattern {
    Any,
    Regex(Regex),
}

impl Pattern {
    /// Compile `pattern`, surfacing syntax errors as
    /// [`AnalyzeError::PatternCompile`].
    pub fn compile(pattern: &str) -> Result<Self, AnalyzeError> {
        if pattern.is_empty() {
            return Ok(Pattern::Any);
        }

        Regex::new(pattern)
            .map(Pattern::Regex)
            .map_err(|source| AnalyzeError::PatternCompile {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Search `content` for a match anywhere in it
    pub fn is_match(&self, content: &[u8]) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Regex(regex) => regex.is_match(content),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Any => "",
            Pattern::Regex(regex) => regex.as_str(),
        }
    }
}

/// Decide whether `content` satisfies `pattern`.
///
/// Matching is a case-sensitive search; the pattern does not need to cover
/// the whole content. Content is matched as bytes, so artifacts that are not
/// valid UTF-8 can still be searched.
///
/// # Example
///
/// ```
/// use rust_troubleshoot::analyzers::classify;
///
/// assert!(classify("succeeded", b"Yes it all succeeded").unwrap());
/// assert!(classify("", b"").unwrap());
/// assert!(classify("(unclosed", b"anything").is_err());
/// ```
pub fn classify(pattern: &str, content: &[u8]) -> Result<bool, AnalyzeError> {
    Ok(Pattern::compile(pattern)?.is_match(content))
}
