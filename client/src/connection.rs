//! Client-seitige TCP-Verbindung zum SmartTV-Server
//!
//! Das Protokoll ist Klartext ohne Framing: jede Eingabezeile wird als ein
//! Schreibvorgang gesendet, alles was der Server schickt (Antworten und
//! Hinweise anderer Clients) wird sofort angezeigt. Lesen und Schreiben
//! laufen deshalb getrennt: ein Empfangs-Task gibt eingehende Daten aus,
//! die Eingabeschleife liest die Tastatur.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

pub const PROMPT: &str = "SmartTV>> ";
pub const KEINE_EINGABE: &str = "No command entered (type 'help' for options).\n";

/// Maximale Bytes pro Lesevorgang, passend zum Server
const EMPFANGS_PUFFER: usize = 1024;

/// Wie lange nach `quit` auf das Schliessen durch den Server gewartet wird
const QUIT_WARTEZEIT: std::time::Duration = std::time::Duration::from_secs(2);

/// Warum die Sitzung endete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitzungsEnde {
    /// Benutzer hat `quit` eingegeben
    Quit,
    /// Eingabe beendet (Ctrl-D / Ende der Pipe)
    EingabeBeendet,
    /// Server hat die Verbindung geschlossen
    ServerGetrennt,
}

/// Gemeinsam genutzte Ausgabe (Terminal oder Testpuffer)
type Ausgabe<W> = Arc<Mutex<W>>;

/// Normalisiert eine Eingabezeile. `None` fuer Leerzeilen.
pub fn befehl_aus_zeile(zeile: &str) -> Option<&str> {
    let befehl = zeile.trim();
    (!befehl.is_empty()).then_some(befehl)
}

/// Text fuer die Anzeige: Serverantworten enden meist ohne Zeilenumbruch
pub fn anzeige_text(empfangen: &str) -> String {
    let mut text = empfangen.to_owned();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

async fn schreiben<W>(ausgabe: &Ausgabe<W>, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut ausgabe = ausgabe.lock().await;
    ausgabe.write_all(text.as_bytes()).await?;
    ausgabe.flush().await
}

/// Gibt alles aus, was der Server sendet, bis er die Verbindung schliesst
async fn empfangen<W>(mut leser: OwnedReadHalf, ausgabe: Ausgabe<W>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut puffer = [0u8; EMPFANGS_PUFFER];
    loop {
        let n = leser.read(&mut puffer).await?;
        if n == 0 {
            tracing::debug!("Server hat die Verbindung geschlossen");
            return Ok(());
        }
        let text = String::from_utf8_lossy(&puffer[..n]);
        schreiben(&ausgabe, &format!("{}{PROMPT}", anzeige_text(&text))).await?;
    }
}

/// Fuehrt eine interaktive Sitzung auf einer bestehenden Verbindung aus
///
/// Liest Befehle zeilenweise aus `eingabe` und schreibt alles Empfangene
/// nach `ausgabe`. Endet nach `quit`, am Ende der Eingabe oder wenn der
/// Server die Verbindung schliesst.
pub async fn sitzung<I, W>(stream: TcpStream, eingabe: I, ausgabe: W) -> anyhow::Result<SitzungsEnde>
where
    I: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (leser, mut schreiber) = stream.into_split();
    let ausgabe = Arc::new(Mutex::new(ausgabe));

    let mut empfang = tokio::spawn(empfangen(leser, Arc::clone(&ausgabe)));
    let mut zeilen = eingabe.lines();

    let ende = loop {
        tokio::select! {
            zeile = zeilen.next_line() => {
                let Some(zeile) = zeile? else {
                    break SitzungsEnde::EingabeBeendet;
                };
                let Some(befehl) = befehl_aus_zeile(&zeile) else {
                    schreiben(&ausgabe, &format!("{KEINE_EINGABE}{PROMPT}")).await?;
                    continue;
                };

                tracing::debug!(befehl, "Sende Befehl");
                schreiber.write_all(befehl.as_bytes()).await?;

                if befehl.eq_ignore_ascii_case("quit") {
                    // Abschiedszeile abwarten, der Server schliesst danach
                    match tokio::time::timeout(QUIT_WARTEZEIT, &mut empfang).await {
                        Ok(ergebnis) => ergebnis??,
                        Err(_) => tracing::warn!("Server hat nach quit nicht getrennt"),
                    }
                    break SitzungsEnde::Quit;
                }
            }

            ergebnis = &mut empfang => {
                ergebnis??;
                break SitzungsEnde::ServerGetrennt;
            }
        }
    };

    if !empfang.is_finished() {
        empfang.abort();
    }
    let _ = schreiber.shutdown().await;
    Ok(ende)
}
