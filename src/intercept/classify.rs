//! Upload-candidate classification

use log::debug;
use percent_encoding::percent_decode_str;

/// Placeholder when no usable file name can be derived
pub const FALLBACK_NAME: &str = "Unknown file";

// Trailing segment used by chunked uploads as the assembly target; it names
// the protocol operation, not the file.
const RESERVED_SEGMENT: &str = ".file";

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    Patch,
}

impl Method {
    /// Only PUT and POST can carry a file upload
    pub fn can_upload(&self) -> bool {
        matches!(self, Method::Put | Method::Post)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        };
        write!(f, "{}", name)
    }
}

/// Payload attached to an outgoing request, as far as the observer can see it
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No payload
    Empty,

    /// File-like payload carrying its own name and size
    File { name: String, size: u64 },

    /// Binary blob with a known size but no name
    Blob { size: u64 },

    /// Opaque payload that still exposes a byte size
    Sized { size: u64 },

    /// Plain text payload; size is not considered determinable
    Text(String),
}

impl RequestBody {
    /// Determinable payload size, when the body shape exposes one
    pub fn size_hint(&self) -> Option<u64> {
        match self {
            RequestBody::File { size, .. }
            | RequestBody::Blob { size }
            | RequestBody::Sized { size } => Some(*size),
            RequestBody::Empty | RequestBody::Text(_) => None,
        }
    }

    /// File name carried by the payload itself, if any
    pub fn file_name(&self) -> Option<&str> {
        match self {
            RequestBody::File { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A request classified as representing a file upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate {
    pub name: String,
    pub size: u64,
}

/// Decide whether a request represents a file upload worth tracking.
///
/// All three must hold: the method can carry an upload, the URL path hits a
/// known upload endpoint, and the payload exposes a size greater than zero.
/// Anything else proceeds untracked.
pub fn classify(
    method: Method,
    url: &str,
    body: &RequestBody,
    endpoints: &[String],
) -> Option<UploadCandidate> {
    if !method.can_upload() {
        return None;
    }

    if !endpoints.iter().any(|pattern| url.contains(pattern.as_str())) {
        debug!("{} {} does not hit an upload endpoint", method, url);
        return None;
    }

    let size = body.size_hint().filter(|s| *s > 0)?;

    let name = match body.file_name() {
        Some(name) => name.to_string(),
        None => name_from_url(url),
    };

    Some(UploadCandidate { name, size })
}

/// Best-effort file name from the trailing path segment of a URL.
///
/// The segment is percent-decoded; an empty, purely numeric, or reserved
/// segment falls back to the generic placeholder.
pub fn name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or("");
    let decoded = percent_decode_str(segment).decode_utf8_lossy();

    if decoded.is_empty()
        || decoded == RESERVED_SEGMENT
        || decoded.chars().all(|c| c.is_ascii_digit())
    {
        FALLBACK_NAME.to_string()
    } else {
        decoded.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Vec<String> {
        vec![
            "/remote.php/dav/".to_string(),
            "/remote.php/webdav/".to_string(),
            "/uploads/".to_string(),
        ]
    }

    const DAV_URL: &str = "https://cloud.example.com/remote.php/dav/files/user/report.pdf";

    #[test]
    fn test_classifies_put_file_upload() {
        let body = RequestBody::File {
            name: "report.pdf".to_string(),
            size: 2_097_152,
        };
        let candidate = classify(Method::Put, DAV_URL, &body, &endpoints()).unwrap();
        assert_eq!(candidate.name, "report.pdf");
        assert_eq!(candidate.size, 2_097_152);
    }

    #[test]
    fn test_get_is_never_a_candidate() {
        let body = RequestBody::Blob { size: 1024 };
        assert!(classify(Method::Get, DAV_URL, &body, &endpoints()).is_none());
    }

    #[test]
    fn test_non_endpoint_path_is_ignored() {
        let body = RequestBody::Blob { size: 1024 };
        let url = "https://cloud.example.com/ocs/v2.php/apps/files/api";
        assert!(classify(Method::Post, url, &body, &endpoints()).is_none());
    }

    #[test]
    fn test_zero_size_is_not_tracked() {
        let body = RequestBody::Blob { size: 0 };
        assert!(classify(Method::Put, DAV_URL, &body, &endpoints()).is_none());
    }

    #[test]
    fn test_text_body_has_no_determinable_size() {
        let body = RequestBody::Text("{\"op\":\"rename\"}".to_string());
        assert!(classify(Method::Post, DAV_URL, &body, &endpoints()).is_none());
    }

    #[test]
    fn test_payload_name_preferred_over_url() {
        let body = RequestBody::File {
            name: "actual.odt".to_string(),
            size: 10,
        };
        let candidate = classify(Method::Put, DAV_URL, &body, &endpoints()).unwrap();
        assert_eq!(candidate.name, "actual.odt");
    }

    #[test]
    fn test_blob_falls_back_to_url_name() {
        let body = RequestBody::Blob { size: 10 };
        let candidate = classify(Method::Put, DAV_URL, &body, &endpoints()).unwrap();
        assert_eq!(candidate.name, "report.pdf");
    }

    #[test]
    fn test_name_from_url_percent_decodes() {
        let url = "https://cloud.example.com/remote.php/dav/files/user/annual%20report.pdf";
        assert_eq!(name_from_url(url), "annual report.pdf");
    }

    #[test]
    fn test_name_from_url_ignores_query() {
        let url = "https://cloud.example.com/uploads/photo.jpg?chunked=1";
        assert_eq!(name_from_url(url), "photo.jpg");
    }

    #[test]
    fn test_numeric_segment_uses_placeholder() {
        // Chunk numbers are not file names
        let url = "https://cloud.example.com/uploads/web-file-upload-abc/000001";
        assert_eq!(name_from_url(url), FALLBACK_NAME);
    }

    #[test]
    fn test_reserved_segment_uses_placeholder() {
        let url = "https://cloud.example.com/uploads/web-file-upload-abc/.file";
        assert_eq!(name_from_url(url), FALLBACK_NAME);
    }

    #[test]
    fn test_trailing_slash_uses_placeholder() {
        let url = "https://cloud.example.com/remote.php/dav/files/user/";
        assert_eq!(name_from_url(url), FALLBACK_NAME);
    }
}
