use std::io;
use std::path::{Path, PathBuf};

/// The on-disk layout the pipeline stages share.
///
/// `raw_pdfs/` holds imported booklets, `records/` the extracted CSVs, and
/// `tokenized/` the tokenized CSVs the recommender reads.
#[derive(Debug, Clone)]
pub struct DataDirs {
    pub root: PathBuf,
    pub raw_pdfs: PathBuf,
    pub records: PathBuf,
    pub tokenized: PathBuf,
}

impl DataDirs {
    /// Resolve the layout rooted at `root`, or at the platform data dir
    /// (`<data_dir>/projmatch`) when none is given. Falls back to `./data`
    /// on platforms without a data dir.
    pub fn resolve(root: Option<&Path>) -> Self {
        let root = match root {
            Some(p) => p.to_path_buf(),
            None => dirs::data_dir()
                .map(|d| d.join("projmatch"))
                .unwrap_or_else(|| PathBuf::from("data")),
        };
        Self {
            raw_pdfs: root.join("raw_pdfs"),
            records: root.join("records"),
            tokenized: root.join("tokenized"),
            root,
        }
    }

    /// Create the directory tree. Idempotent.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.raw_pdfs)?;
        std::fs::create_dir_all(&self.records)?;
        std::fs::create_dir_all(&self.tokenized)?;
        Ok(())
    }
}

/// Recursively collect every `*.pdf` under `dir`, sorted for stable output.
pub fn collect_pdfs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        {
            found.push(path);
        }
    }
    Ok(())
}

/// Copy PDFs found under `src` into `dest`, returning the destination paths.
pub fn import_pdfs(src: &Path, dest: &Path) -> io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dest)?;
    let mut copied = Vec::new();
    for pdf in collect_pdfs(src)? {
        let name = pdf
            .file_name()
            .ok_or_else(|| io::Error::other("PDF path has no file name"))?;
        let target = dest.join(name);
        std::fs::copy(&pdf, &target)?;
        copied.push(target);
    }
    tracing::info!(src = %src.display(), dest = %dest.display(), count = copied.len(), "imported PDFs");
    Ok(copied)
}
