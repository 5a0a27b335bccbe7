//! SmartTV Fernbedienung – Einstiegspunkt
//!
//! Verbindet sich per TCP mit dem SmartTV-Server und leitet Befehle von der
//! Tastatur weiter.

mod connection;

use clap::Parser;
use connection::SitzungsEnde;
use tokio::io::BufReader;
use tokio::net::TcpStream;

/// Interaktive Fernbedienung fuer den SmartTV-Server
#[derive(Parser, Debug)]
#[command(name = "smarttv-client", version, about)]
struct Args {
    /// Hostname oder IP des Servers
    #[arg(env = "SMARTTV_HOST", default_value = "127.0.0.1")]
    host: String,

    /// TCP-Port des Servers
    #[arg(env = "SMARTTV_PORT", default_value_t = 1238)]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    // Logs nach stderr, damit sie die Terminal-Ausgabe nicht stoeren
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("SMARTTV_LOG_LEVEL")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let runtime = tokio::runtime::Runtime::new()?;

    if let Err(e) = runtime.block_on(ausfuehren(&args)) {
        println!("An error occurred: {e:#}");
    }
    println!("Disconnected from server");

    // Ein haengender stdin-Lesevorgang darf das Beenden nicht blockieren
    runtime.shutdown_background();
    Ok(())
}

async fn ausfuehren(args: &Args) -> anyhow::Result<()> {
    let stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    println!("Connected to server");
    tracing::info!(host = %args.host, port = args.port, "Verbunden");

    let eingabe = BufReader::new(tokio::io::stdin());
    let ende = connection::sitzung(stream, eingabe, tokio::io::stdout()).await?;

    tracing::debug!(ende = ?ende, "Sitzung beendet");
    if ende == SitzungsEnde::ServerGetrennt {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardwerte() {
        let args = Args::try_parse_from(["smarttv-client"]).unwrap();
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 1238);
    }

    #[test]
    fn host_und_port_positionell() {
        let args = Args::try_parse_from(["smarttv-client", "192.168.1.20", "5555"]).unwrap();
        assert_eq!(args.host, "192.168.1.20");
        assert_eq!(args.port, 5555);
    }

    #[test]
    fn ungueltiger_port_wird_abgelehnt() {
        assert!(Args::try_parse_from(["smarttv-client", "localhost", "abc"]).is_err());
    }
}
