use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use spdlog::{info, warn};

use folio::logger::configure_logger;
use folio::paginator::Paginator;
use folio::query::{Query, QueryResult};
use folio::record::{ContentRecord, Post, Service, Testimonial};
use folio::text_utils::format_date;
use folio::{ContentRepository, ContentType};

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "folio.toml";
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Parser, Debug)]
#[command(version, about = "Validate and query the site content library", long_about = None)]
struct Cli {
    /// Config path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root, overrides the configured one
    #[arg(long)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every content file and list the ones that fail
    Validate {
        #[arg(long)]
        json: bool,
    },
    /// List records of one type
    List(ListArgs),
    /// Show a single record
    Show {
        kind: Kind,
        slug: String,
        #[arg(long)]
        json: bool,
    },
    /// Record counts plus category and tag tallies
    Stats,
}

#[derive(Args, Debug)]
struct ListArgs {
    kind: Kind,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    #[arg(long)]
    featured: Option<bool>,
    /// Case-insensitive part of the author name
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    min_rating: Option<u8>,
    /// Related service slug
    #[arg(long)]
    service: Option<String>,
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long, default_value_t = 0)]
    offset: usize,
    #[arg(long, default_value_t = 0)]
    limit: usize,
    /// 1-based page of `--limit` items (10 when no limit is given)
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Post,
    Service,
    Testimonial,
}

impl From<Kind> for ContentType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Post => ContentType::Post,
            Kind::Service => ContentType::Service,
            Kind::Testimonial => ContentType::Testimonial,
        }
    }
}

impl ListArgs {
    fn page_size(&self) -> u32 {
        match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            x => u32::try_from(x).unwrap_or(u32::MAX),
        }
    }

    fn query(&self) -> Query {
        let mut query = match self.page {
            Some(_) => Query::new(),
            None => Query::new().offset(self.offset).limit(self.limit),
        };
        query.filter.category = self.category.clone();
        query.filter.tag = self.tag.clone();
        query.filter.featured = self.featured;
        query.filter.author = self.author.clone();
        query.filter.min_rating = self.min_rating;
        query.filter.service = self.service.clone();
        query.search = self.search.clone();
        query
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list<T, F>(mut result: QueryResult<T>, args: &ListArgs, line: F) -> Result<()>
where
    T: ContentRecord + Serialize,
    F: Fn(&T) -> String,
{
    if let Some(page) = args.page {
        let paginator = Paginator::from(&result.items, args.page_size());
        let items = paginator.get_page(page).map_err(|e| anyhow!(e))?.to_vec();
        result.items = items;
    }

    if args.json {
        return print_json(&result.items);
    }
    for item in result.items.iter() {
        println!("{}", line(item));
    }
    println!("-- {} of {} matching", result.items.len(), result.total);
    Ok(())
}

fn list(repo: &ContentRepository, args: &ListArgs) -> Result<()> {
    let query = args.query();
    match args.kind {
        Kind::Post => print_list(repo.query::<Post>(&query)?, args, |p| {
            format!("{}  {}  {} ({})", format_date(&p.date), p.slug, p.title, p.reading_time)
        }),
        Kind::Service => print_list(repo.query::<Service>(&query)?, args, |s| {
            format!("{:>3}  {}  {}", s.order, s.slug, s.title)
        }),
        Kind::Testimonial => print_list(repo.query::<Testimonial>(&query)?, args, |t| {
            format!("{:>3}  {}  {} ({}/5)", t.order, t.id, t.author, t.rating)
        }),
    }
}

fn show(repo: &ContentRepository, kind: Kind, slug: &str, json: bool) -> Result<()> {
    let not_found = || anyhow!("No {} named {}", ContentType::from(kind), slug);
    match kind {
        Kind::Post => {
            let post = repo.post_by_slug(slug)?.ok_or_else(not_found)?;
            if json {
                return print_json(&*post);
            }
            println!("{}\n\n{}", post, post.html);
        }
        Kind::Service => {
            let service = repo.service_by_slug(slug)?.ok_or_else(not_found)?;
            if json {
                return print_json(&*service);
            }
            println!("{}\n{}\n\n{}", service.title, service.short_description, service.html);
        }
        Kind::Testimonial => {
            let testimonial = repo.testimonial_by_id(slug)?.ok_or_else(not_found)?;
            if json {
                return print_json(&*testimonial);
            }
            println!("\"{}\"\n  {}, {} ({}/5)", testimonial.content, testimonial.author, testimonial.position, testimonial.rating);
        }
    }
    Ok(())
}

fn stats(repo: &ContentRepository) -> Result<()> {
    println!("posts: {}", repo.posts()?.len());
    println!("services: {}", repo.services()?.len());
    println!("testimonials: {}", repo.testimonials()?.len());

    println!("\ncategories:");
    for (name, count) in repo.categories()? {
        println!("  {:<24} {}", name, count);
    }
    println!("\ntags:");
    for (name, count) in repo.tags()? {
        println!("  {:<24} {}", name, count);
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match open_config(cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run folio --help");
            return Ok(ExitCode::FAILURE);
        }
    };
    if let Some(content_dir) = cli.content_dir {
        config.paths.content_dir = content_dir;
    }

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    info!("Reading content from {}", config.paths.content_dir.display());

    let repo = ContentRepository::with_cache(config.build_cache());

    match cli.command {
        Command::Validate { json } => {
            let report = repo.validate_all();
            if json {
                print_json(&report)?;
            } else {
                print!("{}", report);
            }
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List(ref args) => list(&repo, args)?,
        Command::Show { kind, ref slug, json } => show(&repo, kind, slug, json)?,
        Command::Stats => stats(&repo)?,
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args(args: &[&str]) -> ListArgs {
        let mut argv = vec!["folio", "list"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::List(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_page_size() {
        assert_eq!(list_args(&["post"]).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(list_args(&["post", "--limit", "25"]).page_size(), 25);
        let huge = (u32::MAX as u64 + 5).to_string();
        assert_eq!(list_args(&["post", "--limit", &huge]).page_size(), u32::MAX);
    }

    #[test]
    fn test_page_replaces_offset_and_limit() {
        let args = list_args(&["service", "--page", "2", "--offset", "3", "--limit", "4", "--search", "photo"]);
        let query = args.query();
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 0);
        assert_eq!(query.search.as_deref(), Some("photo"));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let result: QueryResult<Post> = QueryResult { items: vec![], total: 0 };
        let args = list_args(&["post", "--page", "1", "--json"]);
        assert!(print_list(result, &args, |p| p.slug.clone()).is_ok());
    }
}
