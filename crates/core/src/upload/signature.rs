//! Accepted media types and their leading-byte signatures.

/// Number of leading bytes inspected.
pub const SIGNATURE_LEN: usize = 8;

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
const GIF: &[u8] = b"GIF8";
// Only the RIFF container prefix; WAV/AVI share it.
const WEBP: &[u8] = b"RIFF";
const PDF: &[u8] = b"%PDF";

/// Size class used to pick the upload ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Raster images.
    Image,
    /// PDF documents.
    Document,
}

/// One of the media types the upload gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
    /// `image/gif`
    Gif,
    /// `image/webp`
    Webp,
    /// `application/pdf`
    Pdf,
}

impl MediaType {
    /// Every accepted type.
    pub const ALL: [Self; 5] = [Self::Jpeg, Self::Png, Self::Gif, Self::Webp, Self::Pdf];

    /// Resolves a declared content type. Parameters (`; charset=...`) and case are ignored.
    #[must_use]
    pub fn from_mime(content_type: &str) -> Option<Self> {
        match essence(content_type).as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Canonical MIME string.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Pdf => "application/pdf",
        }
    }

    /// Size class of this type.
    #[must_use]
    pub const fn class(self) -> FileClass {
        match self {
            Self::Pdf => FileClass::Document,
            _ => FileClass::Image,
        }
    }

    /// Expected leading bytes.
    #[must_use]
    pub const fn signature(self) -> &'static [u8] {
        match self {
            Self::Jpeg => JPEG,
            Self::Png => PNG,
            Self::Gif => GIF,
            Self::Webp => WEBP,
            Self::Pdf => PDF,
        }
    }

    /// Whether the first bytes of `data` carry this type's signature.
    #[must_use]
    pub fn matches(self, data: &[u8]) -> bool {
        let head = &data[..data.len().min(SIGNATURE_LEN)];
        head.starts_with(self.signature())
    }
}

/// Size class of a declared content type, before it is checked against the allow-list.
#[must_use]
pub fn class_of_declared(content_type: &str) -> FileClass {
    if essence(content_type) == "application/pdf" {
        FileClass::Document
    } else {
        FileClass::Image
    }
}

fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
