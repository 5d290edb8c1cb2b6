use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono::Duration;
use serde::Deserialize;

use crate::content::ContentDirs;
use crate::content_cache::{ContentCache, Expire, DEFAULT_FRESHNESS_SECS};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub posts_dir: Option<PathBuf>,
    pub services_dir: Option<PathBuf>,
    pub testimonials_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Cache {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Zero keeps entries until a file changes.
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: i64,
}

fn default_enabled() -> bool {
    true
}

fn default_freshness_secs() -> i64 {
    DEFAULT_FRESHNESS_SECS
}

impl Default for Cache {
    fn default() -> Self {
        Cache {
            enabled: default_enabled(),
            freshness_secs: default_freshness_secs(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub cache: Cache,
    pub log: Option<Log>,
}

impl Config {
    /// Used when no configuration file exists.
    pub fn with_content_dir(content_dir: PathBuf) -> Self {
        Config {
            paths: Paths {
                content_dir,
                posts_dir: None,
                services_dir: None,
                testimonials_dir: None,
            },
            cache: Cache::default(),
            log: None,
        }
    }

    pub fn content_dirs(&self) -> ContentDirs {
        let defaults = ContentDirs::from_root(&self.paths.content_dir);
        ContentDirs {
            posts: self.paths.posts_dir.clone().unwrap_or(defaults.posts),
            services: self.paths.services_dir.clone().unwrap_or(defaults.services),
            testimonials: self.paths.testimonials_dir.clone().unwrap_or(defaults.testimonials),
        }
    }

    pub fn expire(&self) -> Expire {
        match self.cache.freshness_secs {
            x if x <= 0 => Expire::Never,
            x => Expire::After(Duration::seconds(x)),
        }
    }

    pub fn build_cache(&self) -> ContentCache {
        if self.cache.enabled {
            ContentCache::new(self.content_dirs(), self.expire())
        } else {
            ContentCache::non_caching(self.content_dirs())
        }
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
    Ok(exe_dir.join(rest))
}

fn parse_opt_path(path: Option<PathBuf>) -> io::Result<Option<PathBuf>> {
    path.map(parse_path).transpose()
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        posts_dir: parse_opt_path(cfg.paths.posts_dir)?,
        services_dir: parse_opt_path(cfg.paths.services_dir)?,
        testimonials_dir: parse_opt_path(cfg.paths.testimonials_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
