use std::env;
use std::path::PathBuf;

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let candidates = [
        env::current_exe().ok().and_then(|exe| exe.parent().map(|dir| dir.join(CFG_FILE_NAME))),
        env::current_dir().ok().map(|dir| dir.join(CFG_FILE_NAME)),
        dirs::config_dir().map(|dir| dir.join("folio").join(CFG_FILE_NAME)),
    ];

    candidates.into_iter()
        .flatten()
        .find(|path| path.exists())
}

/// Explicit path first, then the usual locations, then `./content` defaults.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Ok(Config::with_content_dir(PathBuf::from("content"))),
    };

    read_config(&config_path).map_err(|e| e.to_string())
}
