//! CLI command implementations

use clap::Subcommand;
use placefind_search::{DisplayBatch, Notice, SearchSessionHandle, ServiceContext};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Interactive search prompt (default)
    Interactive,
    /// Fetch pages for one keyword and print them
    Search {
        /// Keyword to search for
        keyword: String,
        /// Number of pages to fetch
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
        /// Save the fetched results to the configured spreadsheet
        #[arg(short, long)]
        export: bool,
    },
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum PromptInput<'a> {
    Search(&'a str),
    Next,
    Previous,
    Save,
    Help,
    Quit,
}

impl<'a> PromptInput<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            ":n" | "next" => PromptInput::Next,
            ":p" | "prev" => PromptInput::Previous,
            ":s" | "save" => PromptInput::Save,
            ":h" | "help" => PromptInput::Help,
            ":q" | "quit" | "exit" => PromptInput::Quit,
            keyword => PromptInput::Search(keyword),
        }
    }
}

const PROMPT_HELP: &str = "검색어를 입력하면 첫 페이지를 검색합니다.\n\
    :n 다음 페이지 | :p 이전 페이지 | :s 엑셀로 저장 | :q 종료";

/// Handle the CLI command
///
/// # Errors
/// Returns an error if the session stops unexpectedly or the terminal
/// cannot be read or written
pub async fn handle_command(context: &ServiceContext, command: Commands) -> anyhow::Result<()> {
    let session = context.spawn_session();

    let result = match command {
        Commands::Interactive => run_interactive(&session).await,
        Commands::Search {
            keyword,
            pages,
            export,
        } => run_search(&session, &keyword, pages, export).await,
    };

    session.shutdown().await?;
    result
}

/// Fetch consecutive pages for a keyword, stopping at the last page.
///
/// # Errors
/// - `PlaceSearchError::SessionClosed` - Session actor stopped
pub async fn run_search(
    session: &SearchSessionHandle,
    keyword: &str,
    pages: u32,
    export: bool,
) -> anyhow::Result<()> {
    let mut batch = session.request_page(keyword, 1).await?;
    print_batch(&batch);

    for _ in 1..pages {
        if !matches!(batch, DisplayBatch::Fetched { is_end: false, .. }) {
            break;
        }
        batch = session.next_page(keyword).await?;
        print_batch(&batch);
    }

    if export {
        let notice = session.export().await?;
        if notice.is_failure() {
            eprintln!("{notice}");
        } else {
            println!("{notice}");
        }
    }

    Ok(())
}

/// Prompt loop reading keywords and navigation commands from stdin.
///
/// # Errors
/// Returns an error if stdin/stdout fail or the session actor stops
pub async fn run_interactive(session: &SearchSessionHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();
    let mut typed_keyword = String::new();

    println!("{PROMPT_HELP}");

    loop {
        stdout.write_all("검색어> ".as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let (output, failed) = match PromptInput::parse(&line) {
            PromptInput::Search(keyword) => {
                typed_keyword = keyword.to_string();
                render_batch(&session.request_page(&typed_keyword, 1).await?)
            }
            PromptInput::Next => render_batch(&session.next_page(&typed_keyword).await?),
            PromptInput::Previous => render_batch(&session.previous_page(&typed_keyword).await?),
            PromptInput::Save => {
                let notice = session.export().await?;
                (format!("{notice}\n"), notice.is_failure())
            }
            PromptInput::Help => (format!("{PROMPT_HELP}\n"), false),
            PromptInput::Quit => break,
        };

        if failed {
            stderr.write_all(output.as_bytes()).await?;
            stderr.flush().await?;
        } else {
            stdout.write_all(output.as_bytes()).await?;
        }
    }

    Ok(())
}

/// Renders a batch and whether it reports a failure, which goes to stderr.
fn render_batch(batch: &DisplayBatch) -> (String, bool) {
    let failed = batch.notice().is_some_and(Notice::is_failure);
    (batch.to_string(), failed)
}

fn print_batch(batch: &DisplayBatch) {
    match render_batch(batch) {
        (output, true) => eprint!("{output}"),
        (output, false) => print!("{output}"),
    }
}
