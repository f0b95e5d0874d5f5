use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use core_types::SelectedFile;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum FileReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const FALLBACK_MIME: &str = "application/octet-stream";

/// Read a selected file and encode it as a `data:<mime>;base64,<payload>` URI.
pub fn read_as_data_url(file: &SelectedFile) -> Result<String, FileReadError> {
    let (bytes, name): (Arc<[u8]>, String) = match file {
        SelectedFile::Path(path) => {
            let bytes = std::fs::read(path).map_err(|source| FileReadError::Io {
                path: path.clone(),
                source,
            })?;
            (bytes.into(), file.name())
        }
        SelectedFile::Memory { name, bytes } => (bytes.clone(), name.clone()),
    };
    Ok(encode_data_url(&bytes, &name))
}

pub fn encode_data_url(bytes: &[u8], file_name: &str) -> String {
    let mime = sniff_mime(bytes, file_name);
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Content sniffing first, then the extension, then a generic binary type.
pub fn sniff_mime(bytes: &[u8], file_name: &str) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_for_extension)
        .unwrap_or(FALLBACK_MIME)
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    #[test]
    fn sniffs_png_from_content_even_with_wrong_extension() {
        assert_eq!(sniff_mime(PNG_MAGIC, "photo.jpg"), "image/png");
    }

    #[test]
    fn falls_back_to_extension_then_octet_stream() {
        assert_eq!(sniff_mime(b"<svg/>", "logo.SVG"), "image/svg+xml");
        assert_eq!(sniff_mime(b"hello", "notes.txt"), "application/octet-stream");
        assert_eq!(sniff_mime(b"hello", "noext"), "application/octet-stream");
    }

    #[test]
    fn memory_file_encodes_to_data_url() {
        let file = SelectedFile::from_bytes("a.bin", b"hi".to_vec());
        assert_eq!(
            read_as_data_url(&file).expect("memory read"),
            "data:application/octet-stream;base64,aGk="
        );
    }

    #[test]
    fn missing_path_is_an_io_error() {
        let file = SelectedFile::Path(PathBuf::from("/definitely/not/here.png"));
        let err = read_as_data_url(&file).expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }
}
