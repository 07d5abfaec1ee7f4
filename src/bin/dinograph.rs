use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dinograph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the contribution graph (SVG, plus GIF when built with `gif`).
    Graph(GraphArgs),
    /// Patch the language-statistics regions of a README.
    Readme(ReadmeArgs),
}

#[derive(Parser, Debug)]
struct GraphArgs {
    /// GitHub login; defaults to the environment (DINOGRAPH_USER,
    /// GITHUB_ACTOR, GITHUB_REPOSITORY_OWNER).
    #[arg(long)]
    user: Option<String>,

    /// Output directory.
    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,

    /// Theme(s) to render.
    #[arg(long, value_enum, default_value_t = ThemeChoice::All)]
    theme: ThemeChoice,

    /// Skip the animated GIF output.
    #[arg(long)]
    no_gif: bool,
}

#[derive(Parser, Debug)]
struct ReadmeArgs {
    /// GitHub login; defaults to the environment.
    #[arg(long)]
    user: Option<String>,

    /// README file to patch in place.
    #[arg(long, default_value = "README.md")]
    file: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
    All,
}

impl ThemeChoice {
    fn kinds(self) -> Vec<dinograph::ThemeKind> {
        match self {
            ThemeChoice::Light => vec![dinograph::ThemeKind::Light],
            ThemeChoice::Dark => vec![dinograph::ThemeKind::Dark],
            ThemeChoice::All => dinograph::ThemeKind::ALL.to_vec(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Graph(args) => cmd_graph(args),
        Command::Readme(args) => cmd_readme(args),
    }
}

fn cmd_graph(args: GraphArgs) -> anyhow::Result<()> {
    let job = dinograph::GraphJob {
        login: args.user,
        out_dir: args.out_dir,
        themes: args.theme.kinds(),
        animate: !args.no_gif,
    };
    let written = dinograph::run_graph(&job)?;
    for path in written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_readme(args: ReadmeArgs) -> anyhow::Result<()> {
    let job = dinograph::ReadmeJob {
        login: args.user,
        readme: args.file,
    };
    let changed = dinograph::run_readme(&job)?;
    if changed {
        eprintln!("patched {}", job.readme.display());
    } else {
        eprintln!("{} already up to date", job.readme.display());
    }
    Ok(())
}
