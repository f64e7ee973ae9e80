/// File categorization by extension.
///
/// This module owns the fixed table that maps lowercase file extensions to
/// category buckets (e.g., "images", "videos", "documents"). Any extension
/// that no category claims falls back to [`Category::Others`].
///
/// # Examples
///
/// ```
/// use organize_files::file_category::{Category, CategoryRules};
///
/// let rules = CategoryRules::default();
/// assert_eq!(rules.categorize_name("photo.PNG"), Category::Images);
/// assert_eq!(rules.categorize_name("archive.tar.gz"), Category::Compressed);
/// assert_eq!(rules.categorize_name("notes"), Category::Others);
/// ```
use serde::Serialize;
use std::collections::HashMap;

/// Represents a category bucket.
///
/// The declaration order of [`Category::ALL`] is the matching order: when an
/// extension appears in more than one set, the earlier category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Image files (JPG, PNG, GIF, etc.)
    Images,
    /// Video files (MP4, MKV, MOV, etc.)
    Videos,
    /// Documents, spreadsheets and slides (PDF, DOCX, XLSX, TXT, etc.)
    Documents,
    /// Archives (ZIP, RAR, TAR, GZ, 7Z)
    Compressed,
    /// Windows installers and executables
    Executables,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Source code and web files
    Code,
    /// Fallback bucket; never matched by membership.
    Others,
}

impl Category {
    /// Every category in matching order. `Others` is always last.
    pub const ALL: [Category; 8] = [
        Category::Images,
        Category::Videos,
        Category::Documents,
        Category::Compressed,
        Category::Executables,
        Category::Audio,
        Category::Code,
        Category::Others,
    ];

    /// Returns the subdirectory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use organize_files::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Others.dir_name(), "others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Videos => "videos",
            Category::Documents => "documents",
            Category::Compressed => "compressed",
            Category::Executables => "executables",
            Category::Audio => "audio",
            Category::Code => "code",
            Category::Others => "others",
        }
    }

    /// Returns the lowercase extensions (no leading dot) claimed by this category.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => &["jpg", "jpeg", "png", "gif", "bmp", "webp"],
            Category::Videos => &["mp4", "mkv", "webm", "flv", "avi", "mov"],
            Category::Documents => &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt"],
            Category::Compressed => &["zip", "rar", "tar", "gz", "7z"],
            Category::Executables => &["exe", "msi"],
            Category::Audio => &["mp3", "wav", "flac", "m4a", "aac"],
            Category::Code => &[
                "html", "css", "js", "py", "java", "c", "cpp", "h", "hpp", "php", "sql",
            ],
            Category::Others => &[],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Extracts the classification extension of a file name.
///
/// The extension is everything after the last `.`, lower-cased. A name with
/// no dot, or whose only dot is the first character, has an empty extension.
///
/// # Examples
///
/// ```
/// use organize_files::file_category::extension_of;
///
/// assert_eq!(extension_of("IMG.JPG"), "jpg");
/// assert_eq!(extension_of("archive.tar.gz"), "gz");
/// assert_eq!(extension_of(".bashrc"), "");
/// assert_eq!(extension_of("Makefile"), "");
/// ```
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name[pos + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Maps file extensions to categories.
///
/// The lookup table is built once from [`Category::ALL`] so that
/// classification is a single hash lookup while still honouring the
/// declared matching order.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    extension_map: HashMap<&'static str, Category>,
}

impl CategoryRules {
    /// Creates the rule set from the built-in category table.
    pub fn new() -> Self {
        let mut extension_map = HashMap::new();
        for category in Category::ALL {
            for ext in category.extensions() {
                // First declaration wins.
                extension_map.entry(*ext).or_insert(category);
            }
        }
        Self { extension_map }
    }

    /// Maps an extension to a category, if any category claims it.
    ///
    /// The lookup is case-insensitive.
    ///
    /// ```
    /// use organize_files::file_category::{Category, CategoryRules};
    ///
    /// let rules = CategoryRules::default();
    /// assert_eq!(rules.extension_to_category("PDF"), Some(Category::Documents));
    /// assert_eq!(rules.extension_to_category("xyz"), None);
    /// ```
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        self.extension_map.get(ext.to_lowercase().as_str()).copied()
    }

    /// Classifies an extension, falling back to [`Category::Others`].
    pub fn categorize(&self, ext: &str) -> Category {
        self.extension_to_category(ext).unwrap_or(Category::Others)
    }

    /// Classifies a file by its name.
    pub fn categorize_name(&self, name: &str) -> Category {
        self.categorize(&extension_of(name))
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::new()
    }
}
