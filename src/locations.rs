use crate::errors::{Result, ShellError, ShellErrorType};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

pub fn get_main_dir() -> Result<PathBuf> {
    let base_dir = BaseDirs::new().ok_or_else(|| {
        ShellError::new(
            ShellErrorType::NotFound,
            "Could not determine the user's home directory".to_string(),
        )
    })?;
    let user_data_dir: &Path = base_dir.data_dir();
    Ok(user_data_dir.join("treefs"))
}

pub fn get_default_log_dir() -> Result<PathBuf> {
    Ok(get_main_dir()?.join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_sits_under_the_main_dir() {
        if let (Ok(main), Ok(logs)) = (get_main_dir(), get_default_log_dir()) {
            assert!(main.ends_with("treefs"));
            assert_eq!(logs.parent(), Some(main.as_path()));
        }
    }
}
