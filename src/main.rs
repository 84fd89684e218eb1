use clap::Parser;
use clap::error::ErrorKind;
use humansize::{DECIMAL, format_size};
use std::io;
use std::path::PathBuf;
use std::process;
use subdb_downloader::{FetchOutcome, SubDbProvider, download_subtitle};

/// Download a subtitle for a movie file from the SubDB hash database
#[derive(Parser, Debug)]
#[command(name = "subdb-downloader")]
#[command(version)]
#[command(about = "Download subtitles for a movie file from the SubDB hash database")]
struct Cli {
    /// Movie file to find a subtitle for
    #[arg(value_name = "MOVIE_FILE")]
    movie_file: PathBuf,

    /// Language code to download (e.g. 'en', 'pt')
    #[arg(value_name = "LANGUAGE")]
    language: String,
}

/// Prints the prompt and reads a y/n answer from standard input
///
/// Only a single-character "y" or "Y" line counts as affirmative; anything
/// else, including a failed read, is a no.
fn confirm_via_stdin(prompt: &str) -> bool {
    println!("{prompt}");

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim_end_matches(['\r', '\n']), "y" | "Y")
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage problems exit 1; --help and --version are not errors
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                process::exit(1);
            }
        },
    };

    let provider = SubDbProvider::new();

    match download_subtitle(&cli.movie_file, &cli.language, &provider, confirm_via_stdin) {
        Ok(FetchOutcome::Downloaded {
            subtitle_path,
            bytes,
        }) => {
            println!(
                "Subtitle downloaded to {} ({}).",
                subtitle_path.display(),
                format_size(bytes, DECIMAL)
            );
        }
        Ok(FetchOutcome::NotFound {
            movie_path,
            language,
            url,
            status,
        }) => {
            println!(
                "Subtitle not found for {} in {} language.",
                movie_path.display(),
                language
            );
            println!("{url}: {status}");
        }
        Ok(FetchOutcome::Failed { error }) => {
            eprintln!("Error: {error}");
        }
        Ok(FetchOutcome::Aborted(_)) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
