//! Page description files

use std::fs;
use std::path::{Path, PathBuf};

use insular_reveal::PageDescription;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read page {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse page {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Page {0} has no elements")]
    Empty(PathBuf),
}

pub fn load_page(path: &Path) -> Result<PageDescription, PageError> {
    let content = fs::read_to_string(path).map_err(|source| PageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let page: PageDescription = toml::from_str(&content).map_err(|source| PageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if page.elements.is_empty() {
        return Err(PageError::Empty(path.to_path_buf()));
    }
    Ok(page)
}
