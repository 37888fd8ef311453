use pwaudit::candidates::{self, BruteForce, BruteForceSetup};
use pwaudit::mock::{self, Profile, UserRole, UserSeed};
use pwaudit::{auto, legacy, pbkdf2_sha256, search, HashSetup};

use std::io;
use std::path::PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(infer_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check a password against a stored hash (either format)
    Verify(VerifyArgs),
    /// Look for the password behind a stored legacy hash
    Search(SearchArgs),
    /// Produce a legacy hash
    Hash(HashArgs),
    /// Produce a PBKDF2 hash
    Pbkdf2(Pbkdf2Args),
    /// Write the mock user fixture
    Mock(MockArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Source {
    Common,
    Roles,
    Brute,
    All,
}

#[derive(Clone, Debug, Args)]
struct VerifyArgs {
    #[arg(long, short)]
    password: Option<String>,
    hash: String,
}

#[derive(Clone, Debug, Args)]
struct SearchArgs {
    hash: String,
    #[arg(long, short, value_enum, default_value_t = Source::All)]
    source: Source,
    /// Search the words in this file, one per line, instead of a built-in source
    #[arg(long, short)]
    wordlist: Option<PathBuf>,
    #[arg(long, default_value = candidates::DEFAULT_ALPHABET)]
    alphabet: String,
    #[arg(long, default_value_t = candidates::DEFAULT_MIN_LEN)]
    min_len: usize,
    #[arg(long, default_value_t = candidates::DEFAULT_MAX_LEN)]
    max_len: usize,
    /// Candidates to try per length in brute force
    #[arg(long, default_value_t = candidates::DEFAULT_MAX_ATTEMPTS, conflicts_with = "exhaustive")]
    max_attempts: u64,
    /// Try every string of each length in brute force
    #[arg(long)]
    exhaustive: bool,
}

#[derive(Clone, Debug, Args)]
struct HashArgs {
    #[arg(long, short)]
    password: Option<String>,
    /// Salt to use; a random UUID if omitted
    #[arg(long)]
    salt: Option<String>,
}

#[derive(Clone, Debug, Args)]
struct Pbkdf2Args {
    #[arg(long, short)]
    password: Option<String>,
}

#[derive(Clone, Debug, Args)]
struct MockArgs {
    #[arg(long, short, default_value = mock::DEFAULT_FIXTURE)]
    output: PathBuf,
}

fn verify(VerifyArgs{ password, hash }: VerifyArgs) -> io::Result<()> {
    let pw = prompt_password(password, false)?;
    if auto::verify(pw, &hash) {
        println!("valid");
    } else {
        println!("not valid");
    }
    Ok(())
}

fn search(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fixed = |list: &'static [&'static str]| list.iter().map(|s| s.to_string());
    let cands: Box<dyn Iterator<Item = String>> = if let Some(path) = &args.wordlist {
        Box::new(candidates::read_wordlist(path)?.into_iter())
    } else {
        let setup = BruteForceSetup {
            alphabet: &args.alphabet,
            min_len: args.min_len,
            max_len: args.max_len,
            max_attempts: if args.exhaustive { None } else { Some(args.max_attempts) },
        };
        if matches!(args.source, Source::Brute | Source::All) {
            println!("Brute force: up to {} candidates", BruteForce::total(&setup));
        }
        match args.source {
            Source::Common => Box::new(fixed(candidates::COMMON_PASSWORDS)),
            Source::Roles => Box::new(fixed(candidates::ROLE_DEFAULTS)),
            Source::Brute => Box::new(BruteForce::new(setup)?),
            Source::All => Box::new(fixed(candidates::COMMON_PASSWORDS)
                .chain(fixed(candidates::ROLE_DEFAULTS))
                .chain(BruteForce::new(setup)?)),
        }
    };
    match search::search(&args.hash, cands) {
        Some(pw) => println!("found: '{}'", pw),
        None => println!("not found"),
    }
    Ok(())
}

fn hash(HashArgs{ password, salt }: HashArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pw = prompt_password(password, true)?;
    let h = legacy::hash_with(HashSetup { salt: salt.as_deref(), rounds: None }, pw)?;
    println!("{}", h);
    Ok(())
}

fn pbkdf2(Pbkdf2Args{ password }: Pbkdf2Args) -> Result<(), Box<dyn std::error::Error>> {
    let pw = prompt_password(password, true)?;
    println!("{}", pbkdf2_sha256::hash(pw)?);
    Ok(())
}

fn mock_fixture(MockArgs{ output }: MockArgs) -> Result<(), Box<dyn std::error::Error>> {
    let seeds = seeds();
    let records = mock::generate(&seeds)?;
    for (seed, rec) in seeds.iter().zip(&records) {
        println!("{}:{} -> {}", rec.profile.email, seed.password, rec.password_hash);
    }
    mock::write_fixture(&output, &records)?;
    println!("Wrote {} users to {}", records.len(), output.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Verify(args) => verify(args)?,
        Commands::Search(args) => search(args)?,
        Commands::Hash(args) => hash(args)?,
        Commands::Pbkdf2(args) => pbkdf2(args)?,
        Commands::Mock(args) => mock_fixture(args)?,
    };
    Ok(())
}

fn prompt_password(password: Option<String>, confirm: bool) -> io::Result<String> {
    match password {
        Some(pw) => Ok(pw),
        None if !confirm => rpassword::prompt_password("Password: "),
        None => loop {
            let pw = rpassword::prompt_password("Enter new password: ")?;
            let confirmed = rpassword::prompt_password("Retype new password: ")?;
            if pw == confirmed {
                return Ok(pw)
            }
            println!("Error: Passwords don't match!")
        }
    }
}

fn user(id: &str, first: &str, last: &str, email: &str, role: UserRole, created: &str, updated: &str) -> Profile {
    Profile {
        id: id.to_owned(),
        username: String::new(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        full_name: String::new(),
        email: email.to_owned(),
        phone_number: String::new(),
        date_of_birth: "0001-01-01T00:00:00".to_owned(),
        age: 0,
        is_active: true,
        created_at: created.to_owned(),
        updated_at: Some(updated.to_owned()),
        last_login_at: None,
        role,
        profile_photo_url: None,
    }
}

// Accounts for local testing against the application's mock data store.
fn seeds() -> Vec<UserSeed<'static>> {
    let admin = Profile {
        full_name: "Admin User".to_owned(),
        phone_number: "+1-555-0100".to_owned(),
        date_of_birth: "1980-01-01T00:00:00Z".to_owned(),
        age: 45,
        updated_at: None,
        ..user("550e8400-e29b-41d4-a716-446655440000", "Admin", "User", "admin", UserRole::Admin,
            "2025-08-12T15:16:11.2932034Z", "")
    };
    vec![
        UserSeed {
            password: "admin",
            salt: "550e8400-e29b-41d4-a716-446655440000",
            profile: admin,
        },
        UserSeed {
            password: "SecureAdmin2024!",
            salt: "550e8400-e29b-41d4-a716-446655440001",
            profile: user("550e8400-e29b-41d4-a716-446655440001", "Admin", "User", "admin@stockflowpro.com",
                UserRole::Admin, "2025-06-13T15:16:11.2945196Z", "2025-08-02T15:16:11.2945297Z"),
        },
        UserSeed {
            password: "manager123",
            salt: "550e8400-e29b-41d4-a716-446655440002",
            profile: user("550e8400-e29b-41d4-a716-446655440002", "Manager", "User", "manager@stockflowpro.com",
                UserRole::Manager, "2025-07-13T15:16:11.2955833Z", "2025-08-07T15:16:11.2955849Z"),
        },
        UserSeed {
            password: "user123",
            salt: "550e8400-e29b-41d4-a716-446655440003",
            profile: user("550e8400-e29b-41d4-a716-446655440003", "Regular", "User", "user@stockflowpro.com",
                UserRole::User, "2025-05-13T15:16:11.2962542Z", "2025-08-01T15:16:11.2962551Z"),
        },
        UserSeed {
            password: "alice123",
            salt: "550e8400-e29b-41d4-a716-446655440004",
            profile: user("550e8400-e29b-41d4-a716-446655440004", "Alice", "Johnson", "alice@stockflowpro.com",
                UserRole::User, "2025-04-13T15:16:11.2969061Z", "2025-07-31T15:16:11.2969069Z"),
        },
    ]
}
