use anyhow::{bail, Context, Result};
use blog_client::{Blog, BlogClientError, HttpClient};
use clap::{Parser, Subcommand};
use colored::Colorize;

const DEFAULT_SERVER: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// BlogIt server URL (falls back to BLOGIT_SERVER)
    #[arg(short, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all blogs, or those matching a search
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    Get {
        #[arg(short, long)]
        id: i64,
    },

    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,

        /// Creation time, e.g. "2022-12-18 10:00:00"; the server fills it in otherwise
        #[arg(long)]
        created_at: Option<String>,
    },

    /// Update the title and/or content of an existing blog
    Save {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    Delete {
        #[arg(short, long)]
        id: i64,
    },

    /// Delete every blog and restart ids at 1
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

impl Commands {
    /// Checks that need no server round trip.
    fn validate(&self) -> Result<()> {
        match self {
            Commands::Save {
                title: None,
                content: None,
                ..
            } => bail!("nothing to save: pass --title and/or --content"),
            Commands::Clear { yes: false } => {
                bail!("refusing to delete every blog without --yes")
            }
            Commands::Create { title, content, .. } if title.is_empty() || content.is_empty() => {
                bail!("title and content must not be empty")
            }
            _ => Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.command.validate()?;

    let server = cli
        .server
        .or_else(|| std::env::var("BLOGIT_SERVER").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    println!("🔌 Connecting to: {}", server);

    let client = HttpClient::new(server);

    match run(&client, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            std::process::exit(1);
        }
    }
}

async fn run(client: &HttpClient, command: Commands) -> Result<()> {
    match command {
        Commands::List { search } => {
            let search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
            match &search {
                Some(q) => println!("🔍 Searching blogs for {:?}", q),
                None => println!("📋 Listing blogs"),
            }

            match client.list_blogs(search.as_deref()).await {
                Ok(blogs) if blogs.is_empty() => {
                    println!("   No blogs matched");
                }
                Ok(blogs) => {
                    println!("{} Found {} blogs", "✅".green(), blogs.len());
                    println!();
                    for (i, blog) in blogs.iter().enumerate() {
                        print_summary(i + 1, blog);
                    }
                }
                Err(BlogClientError::InvalidRequest(_)) if search.is_none() => {
                    println!("   No blogs yet");
                    println!("   Tip: blog-cli create --title \"My Post\" --content \"Hello\"");
                }
                Err(e) => return Err(e).context("Failed to list blogs"),
            }
        }

        Commands::Get { id } => {
            println!("🔍 Getting blog #{}", id);

            match client.get_blog(id).await {
                Ok(blog) => {
                    println!("{} Blog retrieved:", "✅".green());
                    println!("   ID: {}", blog.id);
                    println!("   Title: {}", blog.title.bold());
                    println!("   Content: {}", blog.content);
                    println!("   Created: {}", blog.created_at);
                }
                Err(e) if e.is_invalid_request() => {
                    bail!("Blog #{} not found. Tip: use 'list' to see available blogs", id)
                }
                Err(e) => return Err(e).context("Failed to get blog"),
            }
        }

        Commands::Create {
            title,
            content,
            created_at,
        } => {
            println!("📝 Creating new blog...");

            let created = client
                .create_blog(title.clone(), content, created_at.clone())
                .await
                .context("Failed to create blog")?;

            println!("{} Blog created successfully!", "✅".green());
            println!("   ID: {}", created.id);
            println!("   Title: {}", title);
            if let Some(date) = created.created_at.or(created_at) {
                println!("   Created: {}", date);
            }
        }

        Commands::Save { id, title, content } => {
            println!("✏️ Saving blog #{}", id);

            let text = client
                .save_blog(id, title, content)
                .await
                .context("Failed to save blog")?;

            println!("{} {}", "✅".green(), text);
        }

        Commands::Delete { id } => {
            println!("🗑️ Deleting blog #{}", id);

            let text = client
                .delete_blog(id)
                .await
                .context("Failed to delete blog")?;

            println!("{} {}", "✅".green(), text);
        }

        Commands::Clear { .. } => {
            println!("🗑️ Deleting all blogs");

            let text = client
                .delete_all_blogs()
                .await
                .context("Failed to delete blogs")?;

            println!("{} {}", "✅".green(), text);
        }
    }

    Ok(())
}

fn print_summary(position: usize, blog: &Blog) {
    println!("   {}. [{}] {}", position, blog.id, blog.title.bold());
    println!("      Created: {}", blog.created_at);
    println!("      Content: {}", truncate(&blog.content, 50));
    println!();
}

/// Cuts at a char boundary so multi-byte text never panics.
fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}
