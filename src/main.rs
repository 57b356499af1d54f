use anyhow::{Context, Result};
use clap::Parser;
use jsonfetch::{ClientConfig, ErrorSink, HttpClient, LogSink, UploadFile};
use serde_json::Value;
use std::path::PathBuf;

/// jsonfetch - call JSON services from the command line
///
/// Prints the JSON response on stdout. Responses carrying a truthy `isBoom`
/// field are logged and reported as failures.
///
/// Examples:
///   jsonfetch get https://svc/items -q id=5
///   jsonfetch post https://svc/items '{"name": "x"}'
#[derive(Parser, Debug)]
#[command(author, version = env!("JSONFETCH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// User-Agent header sent with every request (also via JSONFETCH_USER_AGENT)
    #[arg(
        long = "user-agent",
        env = "JSONFETCH_USER_AGENT",
        value_name = "AGENT",
        global = true
    )]
    pub user_agent: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a GET request
    Get(GetArgs),

    /// Send a POST request with a JSON body
    Post(BodyArgs),

    /// Send a PUT request with a JSON body
    Put(BodyArgs),

    /// Send a DELETE request
    Delete(UrlArgs),

    /// Upload a file as a multipart form
    Upload(UploadArgs),
}

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    #[arg(value_name = "URL")]
    pub url: String,

    /// Query parameter, replaces any query string in URL (repeatable)
    #[arg(short = 'q', long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub query: Vec<(String, String)>,
}

#[derive(clap::Args, Debug)]
pub struct BodyArgs {
    #[arg(value_name = "URL")]
    pub url: String,

    /// Request body as JSON text
    #[arg(value_name = "JSON")]
    pub body: String,
}

#[derive(clap::Args, Debug)]
pub struct UrlArgs {
    #[arg(value_name = "URL")]
    pub url: String,
}

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
    #[arg(value_name = "URL")]
    pub url: String,

    /// File to upload
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Media type of the file
    #[arg(long, default_value = jsonfetch::http::DEFAULT_MIMETYPE)]
    pub mimetype: String,

    /// Transfer encoding of the file
    #[arg(long, default_value = jsonfetch::http::DEFAULT_ENCODING)]
    pub encoding: String,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body).context("Request body is not valid JSON")
}

async fn run<S: ErrorSink>(client: &HttpClient<S>, command: Commands) -> Result<Value> {
    match command {
        Commands::Get(args) => {
            if args.query.is_empty() {
                return client.get(&args.url, None).await;
            }
            let query: Vec<(&str, &str)> = args
                .query
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            client.get(&args.url, Some(&query)).await
        }
        Commands::Post(args) => client.post(&args.url, &parse_body(&args.body)?).await,
        Commands::Put(args) => client.put(&args.url, &parse_body(&args.body)?).await,
        Commands::Delete(args) => client.delete(&args.url).await,
        Commands::Upload(args) => {
            let file = UploadFile::from_path(&args.path)
                .await?
                .with_mimetype(args.mimetype)
                .with_encoding(args.encoding);
            client.upload(&args.url, file).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = ClientConfig::new(cli.user_agent);
    let client = HttpClient::from_config(&config, LogSink)?;

    let value = run(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
