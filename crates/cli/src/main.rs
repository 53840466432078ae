use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tumblr::{ClientConfig, Post, PostType, ReadRequest, Tumblelog, TumblrClient};

#[derive(Parser)]
#[command(name = "tumblr-read", version)]
#[command(about = "Read a tumblelog through the Tumblr XML API", long_about = None)]
struct Cli {
    /// Tumblelog name, site or API URL, saved XML document, or `-` for stdin
    source: String,

    /// Offset of the first post
    #[arg(long)]
    start: Option<u32>,

    /// Number of posts to return
    #[arg(short, long)]
    num: Option<u32>,

    /// Only return posts of this type
    #[arg(long = "type", value_parser = parse_post_type)]
    post_type: Option<PostType>,

    /// Return a single post by id
    #[arg(long)]
    id: Option<i64>,

    /// Only return posts with this tag
    #[arg(long)]
    tagged: Option<String>,

    /// Only return posts matching this search
    #[arg(long)]
    search: Option<String>,

    /// Account email, needed to read private posts
    #[arg(long, env = "TUMBLR_EMAIL", requires = "password")]
    email: Option<String>,

    /// Account password
    #[arg(long, env = "TUMBLR_PASSWORD", hide_env_values = true, requires = "email")]
    password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Override the User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    /// Print the whole tumblelog as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn source(&self) -> Source {
        if self.source == "-" {
            return Source::Stdin;
        }
        if tumblr::is_url(&self.source) {
            let request = if self.source.trim_end_matches('/').ends_with("/api/read") {
                ReadRequest::for_endpoint(self.source.clone())
            } else {
                ReadRequest::for_site(&self.source)
            };
            return Source::Remote(self.with_parameters(request));
        }
        let path = Path::new(&self.source);
        if path.exists() {
            return Source::File(path.to_path_buf());
        }
        Source::Remote(self.with_parameters(ReadRequest::for_name(&self.source)))
    }

    fn with_parameters(&self, mut request: ReadRequest) -> ReadRequest {
        if let Some(start) = self.start {
            request = request.start(start);
        }
        if let Some(num) = self.num {
            request = request.num(num);
        }
        if let Some(post_type) = self.post_type {
            request = request.post_type(post_type);
        }
        if let Some(id) = self.id {
            request = request.id(id);
        }
        if let Some(tagged) = &self.tagged {
            request = request.tagged(tagged.clone());
        }
        if let Some(search) = &self.search {
            request = request.search(search.clone());
        }
        if let (Some(email), Some(password)) = (&self.email, &self.password) {
            request = request.credentials(email.clone(), password.clone());
        }
        request
    }

    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(self.timeout));
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.clone()),
            None => config,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Source {
    Stdin,
    File(PathBuf),
    Remote(ReadRequest),
}

fn parse_post_type(value: &str) -> Result<PostType, String> {
    match PostType::from_discriminator(Some(value)) {
        PostType::Unknown => Err(format!(
            "unknown post type '{}', expected one of: {}",
            value,
            PostType::KNOWN.map(|t| t.as_str()).join(", ")
        )),
        post_type => Ok(post_type),
    }
}

/// Short single-line description of a post for the text listing.
fn headline(post: &Post) -> String {
    let text = ["title", "body"]
        .iter()
        .filter_map(|name| post.field(name).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_default();
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > 72 {
        format!("{}...", line.chars().take(69).collect::<String>())
    } else {
        line
    }
}

fn print_summary(out: &mut impl Write, log: &Tumblelog) -> io::Result<()> {
    writeln!(out, "{} <{}>", log.title, log.url)?;
    if !log.tagline.is_empty() {
        writeln!(out, "{}", log.tagline)?;
    }
    writeln!(
        out,
        "posts {}-{} of {}",
        log.start,
        log.start + log.posts.len() as i64,
        log.num_posts
    )?;
    for post in &log.posts {
        writeln!(out)?;
        writeln!(out, "[{}] {} {}", post.post_type(), post.id, post.permalink())?;
        let headline = headline(post);
        if !headline.is_empty() {
            writeln!(out, "    {}", headline)?;
        }
        if let Some(feed) = &post.source_feed {
            writeln!(out, "    via {} ({})", feed.title, feed.url)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let log = match cli.source() {
        Source::Stdin => tumblr::parse_reader(io::stdin().lock())?,
        Source::File(path) => tumblr::parse_file(path)?,
        Source::Remote(request) => {
            let client = TumblrClient::new(cli.client_config())?;
            client.read(&request).await?
        }
    };

    tracing::info!(
        "Read {} of {} posts from {}",
        log.posts.len(),
        log.num_posts,
        log.url
    );

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &log)?;
        writeln!(out)?;
    } else {
        print_summary(&mut out, &log)?;
    }
    Ok(())
}
