use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod content_file;
pub mod content_list;
pub mod front_matter;
pub mod markup;

/// The fixed kinds of content kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Post,
    Service,
    Testimonial,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Post, ContentType::Service, ContentType::Testimonial];

    /// Directory name under the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentType::Post => "blog",
            ContentType::Service => "services",
            ContentType::Testimonial => "testimonials",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Service => "service",
            ContentType::Testimonial => "testimonial",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" | "posts" | "blog" => Ok(ContentType::Post),
            "service" | "services" => Ok(ContentType::Service),
            "testimonial" | "testimonials" => Ok(ContentType::Testimonial),
            other => Err(format!("Unknown content type {}", other)),
        }
    }
}

/// Where each content type lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDirs {
    pub posts: PathBuf,
    pub services: PathBuf,
    pub testimonials: PathBuf,
}

impl ContentDirs {
    pub fn from_root(root: &Path) -> Self {
        ContentDirs {
            posts: root.join(ContentType::Post.dir_name()),
            services: root.join(ContentType::Service.dir_name()),
            testimonials: root.join(ContentType::Testimonial.dir_name()),
        }
    }

    pub fn dir(&self, content_type: ContentType) -> &Path {
        match content_type {
            ContentType::Post => &self.posts,
            ContentType::Service => &self.services,
            ContentType::Testimonial => &self.testimonials,
        }
    }
}
