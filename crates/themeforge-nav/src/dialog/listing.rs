//! Directory listings, breadcrumbs and dropdown items.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::file::{normalize_path, HostFs};

use super::filter::FilterEntry;

/// Type description shown for directories.
pub const FOLDER_DESCRIPTION: &str = "File folder";

/// An entry of an address-bar dropdown or breadcrumb bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    /// Text shown to the user.
    pub label: String,
    /// Directory or file the item navigates to.
    pub path: PathBuf,
}

impl SuggestionItem {
    /// Creates a new item.
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// An item labelled with the full path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            label: path.display().to_string(),
            path,
        }
    }
}

/// Dropdown of the breadcrumb bar: recently visited folders, then
/// frequently used ones, each labelled by folder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathDropdown {
    /// The "Recent" group.
    pub recent: Vec<SuggestionItem>,
    /// The "Frequent" group.
    pub frequent: Vec<SuggestionItem>,
}

impl PathDropdown {
    /// Returns true if both groups are empty, in which case the dropdown is
    /// hidden.
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.frequent.is_empty()
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// File or directory name.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// True for directories.
    pub is_dir: bool,
    /// Human-readable type, see [`describe_file_type`].
    pub type_description: String,
}

/// What the file list should show after a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Directory to list.
    pub directory: PathBuf,
    /// Filter applied to files. Directories are always shown.
    pub filter: FilterEntry,
    /// Whether dot-files are shown.
    pub show_hidden: bool,
}

impl ListingRequest {
    /// Lists the directory: child directories first, then the files that
    /// pass the filter, each group in name order.
    pub fn list(&self, host: &dyn HostFs) -> io::Result<Vec<ListingEntry>> {
        let mut entries = Vec::new();
        for dir in host.child_dirs(&self.directory)? {
            let Some(name) = self.visible_name(&dir) else {
                continue;
            };
            entries.push(ListingEntry {
                name,
                path: dir,
                is_dir: true,
                type_description: FOLDER_DESCRIPTION.to_string(),
            });
        }
        for file in host.child_files(&self.directory)? {
            let Some(name) = self.visible_name(&file) else {
                continue;
            };
            if !self.filter.matches(&name) {
                continue;
            }
            entries.push(ListingEntry {
                type_description: describe_file_type(&name),
                name,
                path: file,
                is_dir: false,
            });
        }
        Ok(entries)
    }

    fn visible_name(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        (self.show_hidden || !name.starts_with('.')).then_some(name)
    }
}

/// Describes a file by its extension, e.g. `"PNG Image"`.
///
/// Unknown extensions are described as `"<EXT> File"` and names without an
/// extension as `"File"`.
pub fn describe_file_type(file_name: &str) -> String {
    let Some(ext) = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
    else {
        return "File".to_string();
    };

    let known = match ext.as_str() {
        "txt" => "Text Document",
        "doc" | "docx" => "Microsoft Word Document",
        "xls" | "xlsx" => "Microsoft Excel Spreadsheet",
        "ppt" | "pptx" => "Microsoft PowerPoint Presentation",
        "pdf" => "PDF Document",
        "jpg" | "jpeg" => "JPEG Image",
        "png" => "PNG Image",
        "gif" => "GIF Image",
        "bmp" => "Bitmap Image",
        "mp3" => "MP3 Audio",
        "mp4" => "MP4 Video",
        "zip" => "ZIP Archive",
        "rar" => "RAR Archive",
        "exe" => "Application",
        "dll" => "Application Extension",
        "obj" => "OBJ 3D Model",
        "stl" => "STL 3D Model",
        "ply" => "PLY 3D Model",
        "json" => "JSON File",
        "xml" => "XML File",
        "html" | "htm" => "HTML Document",
        "css" => "CSS File",
        "js" => "JavaScript File",
        "rs" => "Rust Source Code",
        "py" => "Python Source Code",
        "java" => "Java Source Code",
        "c" | "cpp" | "h" => "C/C++ Source Code",
        _ => return format!("{} File", ext.to_uppercase()),
    };
    known.to_string()
}

/// Splits a path into clickable segments from the root down.
///
/// The root segment is labelled with its full text (`/`, `C:\`), the others
/// with their name.
pub fn breadcrumbs(path: &Path) -> Vec<SuggestionItem> {
    let mut items = Vec::new();
    let mut acc = PathBuf::new();
    let mut root_pending = false;

    for component in normalize_path(path).components() {
        let is_root = matches!(component, Component::Prefix(_) | Component::RootDir);
        if root_pending && !is_root {
            items.push(SuggestionItem::from_path(&acc));
            root_pending = false;
        }
        acc.push(component.as_os_str());
        match component {
            Component::Prefix(_) | Component::RootDir => root_pending = true,
            Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => items.push(SuggestionItem::new(
                component.as_os_str().to_string_lossy(),
                acc.clone(),
            )),
        }
    }
    if root_pending {
        items.push(SuggestionItem::from_path(acc));
    }
    items
}
