use fidget::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Demo server
// ---------------------------------------------------------------------------

const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo";
const DEMO_SERVER: &str = "s1.example.net";

/// A stand-in for the real server: one account and a canned ranking.
fn demo_server(credentials: &Credentials) -> MemoryTransport {
    MemoryTransport::new()
        .with_account(credentials.username(), credentials.password())
        .respond(
            CommandKind::Update,
            [("name", credentials.username()), ("level", "87")],
        )
        .respond(
            CommandKind::HallOfFamePage,
            [
                ("1", "Ironclad;412;Blackwater"),
                ("2", "Mosswhistle;398;"),
                ("3", "Quill;377;Blackwater"),
            ],
        )
}

/// `FIDGET_*` variables if they are all set, the demo account otherwise.
fn credentials() -> Result<Credentials, FidgetError> {
    match Credentials::from_env() {
        Ok(credentials) => Ok(credentials),
        Err(e) => {
            tracing::info!(reason = %e, "using demo credentials");
            Ok(Credentials::new(DEMO_USERNAME, DEMO_PASSWORD, DEMO_SERVER)?)
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), FidgetError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let credentials = credentials()?;
    let server = demo_server(&credentials);
    let session = Session::connect(&server, &credentials)?;

    let character = session.update();
    println!(
        "logged in as {} (level {})",
        character.value("name")?,
        character.value("level")?
    );

    let page = session.hall_of_fame_page(0);
    let mut entries: Vec<_> = page.entries()?.into_iter().collect();
    entries.sort();
    for (rank, row) in entries {
        println!("#{rank:>3}  {row}");
    }

    Ok(())
}
