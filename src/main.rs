use author_registry::config::Config;
use author_registry::database::SqliteHiddenStore;
use author_registry::http::HttpAuthorRepository;
use author_registry::models::{Author, AuthorForm};
use author_registry::registry::{AuthorRegistry, RegistryError};
use author_registry::repositories::{AuthorRepository, HiddenAuthorStore};
use author_registry::store::InMemoryHiddenStore;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Manage author records on a REST backend")]
struct Cli {
    /// Keep hidden authors in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List authors that are not hidden locally
    List,
    /// Show a single author
    Show { id: i64 },
    /// Create an author
    Create(FormArgs),
    /// Replace every field of an existing author
    Update {
        id: i64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete an author, hiding it locally if the backend refuses
    Delete { id: i64 },
    /// Print the ids hidden on this machine
    Hidden,
}

#[derive(Debug, Args)]
struct FormArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    image: String,
    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    birth_date: String,
}

impl FormArgs {
    fn parse_form(&self) -> anyhow::Result<AuthorForm> {
        let form =
            AuthorForm::parse(&self.name, &self.description, &self.image, &self.birth_date)?;
        Ok(form)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let author_repo = HttpAuthorRepository::new(config.api_base_url())?;

    if cli.ephemeral {
        let registry = AuthorRegistry::new(author_repo, InMemoryHiddenStore::new());
        run(registry, cli.command).await
    } else {
        let hidden_store = SqliteHiddenStore::open(config.hidden_store_url()).await?;
        let registry = AuthorRegistry::new(author_repo, hidden_store);
        run(registry, cli.command).await
    }
}

async fn run<AR, HS>(
    mut registry: AuthorRegistry<AR, HS>,
    command: Command,
) -> anyhow::Result<ExitCode>
where
    AR: AuthorRepository,
    HS: HiddenAuthorStore,
{
    let result = match command {
        Command::List => registry.load().await.map(|authors| print_authors(&authors)),
        Command::Show { id } => registry.get(id).await.map(|author| println!("{author}")),
        Command::Create(args) => {
            let form = args.parse_form()?;
            registry
                .create(&form)
                .await
                .map(|()| println!("Author \"{}\" created.", form.name()))
        }
        Command::Update { id, form } => {
            let form = form.parse_form()?;
            registry
                .update(id, &form)
                .await
                .map(|()| println!("Author {id} updated."))
        }
        Command::Delete { id } => delete(&mut registry, id).await,
        Command::Hidden => {
            for id in registry.load_hidden().await {
                println!("{id}");
            }
            Ok(())
        }
    };

    Ok(report(result))
}

async fn delete<AR, HS>(registry: &mut AuthorRegistry<AR, HS>, id: i64) -> Result<(), RegistryError>
where
    AR: AuthorRepository,
    HS: HiddenAuthorStore,
{
    registry.load().await?;
    let outcome = registry.delete(id).await;
    println!("{outcome}");
    print_authors(&registry.visible());
    Ok(())
}

fn report(result: Result<(), RegistryError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn print_authors(authors: &[&Author]) {
    if authors.is_empty() {
        println!("No authors to show (some may be hidden locally).");
        return;
    }
    for author in authors {
        println!("{author}");
    }
}
