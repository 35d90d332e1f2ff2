use crate::error::ClimeError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "clime_data";

pub fn get_data_dir() -> Result<PathBuf, ClimeError> {
    dirs::data_dir()
        .map(|p| p.join(DATA_DIR_NAME))
        .ok_or(ClimeError::DataDirResolution)
}

pub async fn ensure_data_dir_exists(path: &Path) -> Result<(), ClimeError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ClimeError::DataDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating data directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| ClimeError::DataDirCreation(path.to_path_buf(), e))?;
            Ok(())
        }
        Err(e) => Err(ClimeError::DataDirCreation(path.to_path_buf(), e)),
    }
}
