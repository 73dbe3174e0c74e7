use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

/// Synthesized audio staged on local disk between synthesis and upload
///
/// Each artifact owns a uniquely named file that is removed when the
/// artifact is dropped, whatever happened to the upload.
#[derive(Debug)]
pub struct AudioArtifact {
    path: TempPath,
    file_name: String,
    content_type: String,
    size: u64,
}

impl AudioArtifact {
    /// Write `audio` to a fresh `speech-XXXXXX.<extension>` file in `dir`
    ///
    /// Falls back to the OS temp dir when `dir` is `None`.
    pub async fn stage(
        dir: Option<&Path>,
        extension: &str,
        content_type: impl Into<String>,
        audio: &[u8],
    ) -> std::io::Result<Self> {
        let dir: PathBuf = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
        let suffix = format!(".{extension}");

        let named = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(&suffix)
            .tempfile_in(&dir)?;

        // Keep only the path guard, the file is reopened for async writing
        let path = named.into_temp_path();

        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(audio).await?;
        file.flush().await?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| std::io::Error::other("staged file name is not valid UTF-8"))?;

        tracing::debug!(path = %path.display(), bytes = audio.len(), "staged audio artifact");

        Ok(Self {
            path,
            file_name,
            content_type: content_type.into(),
            size: audio.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Local file name, unique per artifact
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub const fn size(&self) -> u64 {
        self.size
    }
}
