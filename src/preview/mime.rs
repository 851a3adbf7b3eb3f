//! Content types served by the preview server.
use std::path::Path;

/// Content type used for unknown or missing extensions.
pub const DEFAULT_MIME: &str = "text/html";

/// Extension (without the dot) to content type.
const MIME_TYPES: &[(&str, &str)] = &[
    ("avi", "video/x-msvideo"),
    ("bmp", "image/bmp"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    ("docm", "application/vnd.ms-word.document.macroEnabled.12"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("flv", "video/x-flv"),
    ("gz", "application/x-gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ico", "image/x-icon"),
    ("jpe", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "application/x-javascript"),
    ("m4a", "audio/m4a"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("movie", "video/x-sgi-movie"),
    ("mp2", "video/mpeg"),
    ("mp2v", "video/mpeg"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mp4v", "video/mp4"),
    ("mpa", "video/mpeg"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("png", "image/png"),
    ("rar", "application/octet-stream"),
    ("tar", "application/x-tar"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ttf", "application/octet-stream"),
    ("tts", "video/vnd.dlna.mpeg-tts"),
    ("txt", "text/plain"),
    ("wav", "audio/wav"),
    ("wsdl", "text/xml"),
    ("xhtml", "application/xhtml+xml"),
    ("xml", "text/xml"),
    ("xsd", "text/xml"),
    ("xsf", "text/xml"),
    ("xsl", "text/xml"),
    ("xslt", "text/xml"),
    ("xsn", "application/octet-stream"),
    ("zip", "application/x-zip-compressed"),
];

/// Content type for `path`, matched case-sensitively on its extension.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            MIME_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_MIME)
}
