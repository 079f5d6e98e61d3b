use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Uniform type identifier (`ZTYPEUTI`) describing an embedded object.
///
/// The tag is kept verbatim from the store. Unknown tags are valid; they
/// simply classify as [`TypeCategory::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    /// Fixed tag given to every thumbnail row.
    pub const THUMBNAIL: &'static str = "thumbnail";
    pub const GALLERY: &'static str = "com.apple.notes.gallery";
    pub const TABLE: &'static str = "com.apple.notes.table";
    pub const JPEG: &'static str = "public.jpeg";
    pub const PNG: &'static str = "public.png";
    pub const HEIC: &'static str = "public.heic";
    pub const PDF: &'static str = "com.adobe.pdf";
    pub const URL: &'static str = "public.url";
    pub const VCARD: &'static str = "public.vcard";

    /// Tags whose file content lives in a separate media row.
    const MEDIA_TAGS: [&'static str; 5] =
        [Self::JPEG, Self::PNG, Self::HEIC, Self::PDF, Self::VCARD];

    /// Build a tag from a store value. Empty strings are rejected.
    pub fn new(tag: impl Into<String>) -> Result<Self, TypeError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(TypeError::EmptyTypeTag);
        }
        Ok(Self(tag))
    }

    /// The tag used for thumbnails.
    pub fn thumbnail() -> Self {
        Self(Self::THUMBNAIL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coarse classification used to pick an object kind.
    pub fn category(&self) -> TypeCategory {
        match self.0.as_str() {
            Self::GALLERY => TypeCategory::Gallery,
            tag if Self::MEDIA_TAGS.contains(&tag) => TypeCategory::Media,
            _ => TypeCategory::Other,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Classification of a [`TypeTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// Container whose children are the gallery pages.
    Gallery,
    /// Pointer to a file stored in a media row.
    Media,
    /// Anything else (thumbnails, tables, URLs, drawings, unknown tags).
    Other,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gallery => write!(f, "gallery"),
            Self::Media => write!(f, "media"),
            Self::Other => write!(f, "other"),
        }
    }
}
