// SPDX-License-Identifier: MPL-2.0
use st_gallery::app::{paths, DELETE_PROMPT};
use st_gallery::application::port::ImageApi;
use st_gallery::config::{self, SortOrder};
use st_gallery::error::Result;
use st_gallery::infrastructure::HttpImageApi;
use st_gallery::media::{delete_path, image_path, sort_images};
use st_gallery::ui::notifications::Notification;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
st-gallery - browse a remote image gallery

USAGE:
  st-gallery <COMMAND> [ARGS] [OPTIONS]

COMMANDS:
  folders                              List image folders
  list <folder> [--oldest]             List images, newest first by default
  delete <folder> <filename> [--yes]   Delete an image after confirmation
  download <folder> <filename> [--out PATH]
                                       Save an image, or print its direct link

OPTIONS:
  --server URL        Gallery server (overrides settings.toml)
  --config-dir DIR    Directory holding settings.toml
  --data-dir DIR      Directory holding window_state.json
  -h, --help          Print this help
";

enum Command {
    Folders,
    List {
        folder: String,
        order: Option<SortOrder>,
    },
    Delete {
        folder: String,
        filename: String,
        assume_yes: bool,
    },
    Download {
        folder: String,
        filename: String,
        out: Option<PathBuf>,
    },
}

struct Cli {
    command: Command,
    server: Option<String>,
    config_dir: Option<String>,
    data_dir: Option<String>,
}

fn parse_args() -> std::result::Result<Option<Cli>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let Some(name) = args.subcommand()? else {
        return Ok(None);
    };

    let server = args.opt_value_from_str("--server")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;

    let command = match name.as_str() {
        "folders" => Command::Folders,
        "list" => {
            let order = args.contains("--oldest").then_some(SortOrder::Oldest);
            Command::List {
                folder: args.free_from_str()?,
                order,
            }
        }
        "delete" => {
            let assume_yes = args.contains(["-y", "--yes"]);
            Command::Delete {
                folder: args.free_from_str()?,
                filename: args.free_from_str()?,
                assume_yes,
            }
        }
        "download" => {
            let out = args.opt_value_from_str("--out")?;
            Command::Download {
                folder: args.free_from_str()?,
                filename: args.free_from_str()?,
                out,
            }
        }
        _ => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command '{name}'"),
            })
        }
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {rest:?}"),
        });
    }

    Ok(Some(Cli {
        command,
        server,
        config_dir,
        data_dir,
    }))
}

/// Asks on stdin; anything but `y`/`yes` declines.
fn confirm_on_stdin(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn run(cli: Cli) -> Result<()> {
    paths::init_cli_overrides(cli.data_dir, cli.config_dir);

    let (mut config, warning) = config::load();
    if let Some(key) = warning {
        log::warn!("{}", Notification::warning(key).text());
    }
    if let Some(server) = cli.server {
        config.server.base_url = Some(server);
    }
    let api = HttpImageApi::new(&config.server)?;

    match cli.command {
        Command::Folders => {
            for folder in api.list_folders().await? {
                println!("{folder}");
            }
        }
        Command::List { folder, order } => {
            let order = order.unwrap_or_else(|| config.display.sort_order.unwrap_or_default());
            let names = api.list_images(&folder).await?;
            for entry in sort_images(names, order) {
                let date = entry
                    .capture_date()
                    .map_or_else(|| "-".to_string(), |date| date.to_string());
                println!("{date}\t{}", entry.filename());
            }
        }
        Command::Delete {
            folder,
            filename,
            assume_yes,
        } => {
            if !assume_yes && !confirm_on_stdin(DELETE_PROMPT)? {
                log::debug!("Delete of {:?} declined", filename);
                return Ok(());
            }
            api.delete_image(&delete_path(&folder, &filename)).await?;
            println!("{}", Notification::success("notification-image-deleted").text());
        }
        Command::Download {
            folder,
            filename,
            out,
        } => {
            let path = image_path(&folder, &filename);
            match api.fetch_image(&path).await {
                Ok(bytes) => {
                    let out = out.unwrap_or_else(|| PathBuf::from(&filename));
                    std::fs::write(&out, &bytes)?;
                    log::info!("Saved {} bytes to {}", bytes.len(), out.display());
                }
                Err(err) => {
                    log::warn!("Download failed, falling back to direct link: {}", err);
                    println!("{}", api.image_url(&path));
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match parse_args() {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
