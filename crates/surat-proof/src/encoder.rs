//! # Scannable Artifact Encoder
//!
//! The encoder turns a proof string into something printable on a letter.
//! Image rendering (QR code generation) happens outside this crate; the
//! bundled [`DataUriEncoder`] produces a `data:` URI that any QR renderer
//! accepts as its text input.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const DATA_URI_PREFIX: &str = "data:application/json;charset=utf-8,";

/// Everything except RFC 3986 unreserved characters is escaped.
const PROOF_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Opaque output of a [`ProofEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScannableArtifact(String);

impl ScannableArtifact {
    /// Wrap an encoder's textual output.
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// The encoded content.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the artifact and return its content.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ScannableArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a proof string into a scannable artifact. Pure; cannot fail.
pub trait ProofEncoder: Send + Sync {
    /// Encode the proof string.
    fn encode(&self, proof_string: &str) -> ScannableArtifact;
}

impl<F> ProofEncoder for F
where
    F: Fn(&str) -> ScannableArtifact + Send + Sync,
{
    fn encode(&self, proof_string: &str) -> ScannableArtifact {
        self(proof_string)
    }
}

/// Encodes the proof string as a percent-encoded `data:` URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriEncoder;

impl DataUriEncoder {
    /// Recover the proof string from a URI produced by [`ProofEncoder::encode`].
    ///
    /// Returns `None` if the input is not a JSON data URI, or if its body is
    /// not exactly what this encoder emits for the decoded text. Raw `&`,
    /// `=`, `+` or spaces, malformed escapes and non-UTF-8 escapes are all
    /// rejected rather than silently dropped or rewritten.
    pub fn decode(uri: &str) -> Option<String> {
        let encoded = uri.trim().strip_prefix(DATA_URI_PREFIX)?;
        let decoded = percent_decode_str(encoded).decode_utf8().ok()?;
        if utf8_percent_encode(&decoded, PROOF_ESCAPE).to_string() != encoded {
            return None;
        }
        Some(decoded.into_owned())
    }
}

impl ProofEncoder for DataUriEncoder {
    fn encode(&self, proof_string: &str) -> ScannableArtifact {
        ScannableArtifact(format!(
            "{DATA_URI_PREFIX}{}",
            utf8_percent_encode(proof_string, PROOF_ESCAPE)
        ))
    }
}
