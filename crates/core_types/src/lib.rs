use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub type RequestId = u64;

/// How a text binding writes into its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Literal text; markup in the value is never interpreted.
    #[default]
    Text,
    /// Parsed markup.
    Html,
}

/// Admin pages that carry a live preview panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Hero,
    About,
    Parent,
    Puppy,
    Announcement,
    Review,
    /// Combined hero/about/parent bindings used by the generic content editor.
    Content,
    /// Only the auto-discovered file-input thumbnails.
    ImageUpload,
}

impl PageKind {
    pub const ALL: [PageKind; 8] = [
        PageKind::Hero,
        PageKind::About,
        PageKind::Parent,
        PageKind::Puppy,
        PageKind::Announcement,
        PageKind::Review,
        PageKind::Content,
        PageKind::ImageUpload,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Hero => "hero",
            PageKind::About => "about",
            PageKind::Parent => "parent",
            PageKind::Puppy => "puppy",
            PageKind::Announcement => "announcement",
            PageKind::Review => "review",
            PageKind::Content => "content",
            PageKind::ImageUpload => "image-upload",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown page {wanted:?}"))
    }
}

/// A file picked in a file input: on disk, or already in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectedFile {
    Path(PathBuf),
    Memory { name: String, bytes: Arc<[u8]> },
}

impl SelectedFile {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        SelectedFile::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            SelectedFile::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            SelectedFile::Memory { name, .. } => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_kind_parses_case_insensitively() {
        assert_eq!("Parent".parse::<PageKind>(), Ok(PageKind::Parent));
        assert_eq!(" image-upload ".parse::<PageKind>(), Ok(PageKind::ImageUpload));
        assert!("gallery".parse::<PageKind>().is_err());
    }

    #[test]
    fn selected_file_name() {
        let f = SelectedFile::Path(PathBuf::from("/tmp/pups/bella.jpg"));
        assert_eq!(f.name(), "bella.jpg");
        let m = SelectedFile::from_bytes("rex.png", vec![1u8, 2, 3]);
        assert_eq!(m.name(), "rex.png");
    }
}
