// crates/lob-server/src/client.rs

//! Per-connection I/O.
//!
//! Each line a client sends is parsed with the CSV codec and forwarded
//! to the engine task. Lines that fail to parse are answered directly
//! with a `Rejected` event; they never reach the engine.

use lob_core::OutputMessage;
use lob_protocol::csv_codec;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{tcp::OwnedWriteHalf, TcpStream};
use tracing::{debug, warn};

use crate::types::{ClientId, ClientRegistry, EngineRequest, EngineTx, OutboundRx, OutboundTx};

/// Run the client I/O loop for a single connection.
pub async fn run_client(
    client_id: ClientId,
    stream: TcpStream,
    engine_tx: EngineTx,
    out_tx: OutboundTx,
    mut out_rx: OutboundRx,
    clients: ClientRegistry,
) -> anyhow::Result<()> {
    let (read_stream, write_stream) = stream.into_split();

    // Writer task: consume OutputMessages and write CSV lines.
    let writer_handle = tokio::spawn(async move {
        let mut write_stream = write_stream;

        while let Some(msg) = out_rx.recv().await {
            if let Err(e) = write_csv_message(&mut write_stream, &msg).await {
                warn!(client = client_id.0, error = %e, "write error");
                break;
            }
        }
    });

    let result = run_csv_reader(client_id, read_stream, &engine_tx, &out_tx).await;

    // Remove client from registry; once the engine drops its snapshot
    // and we drop `out_tx`, the writer drains and exits.
    {
        let mut guard = clients.write().await;
        guard.remove(&client_id);
    }
    drop(out_tx);
    let _ = writer_handle.await;

    result
}

async fn run_csv_reader(
    client_id: ClientId,
    read_stream: tokio::net::tcp::OwnedReadHalf,
    engine_tx: &EngineTx,
    out_tx: &OutboundTx,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(read_stream).lines();

    while let Some(line) = lines.next_line().await? {
        if csv_codec::is_skippable(&line) {
            continue;
        }

        debug!(client = client_id.0, line = line.trim(), "received");

        match csv_codec::parse_input_line(&line) {
            Ok(msg) => {
                if engine_tx.send(EngineRequest { client_id, msg }).is_err() {
                    anyhow::bail!("engine channel closed");
                }
            }
            Err(e) => {
                debug!(client = client_id.0, error = %e, "invalid line");
                let _ = out_tx.send(OutputMessage::rejected(e.to_string()));
            }
        }
    }

    Ok(())
}

async fn write_csv_message(
    stream: &mut OwnedWriteHalf,
    msg: &OutputMessage,
) -> std::io::Result<()> {
    let csv_line = csv_codec::format_output(msg);
    let data = format!("{}\n", csv_line);

    stream.write_all(data.as_bytes()).await?;
    stream.flush().await?;

    debug!(line = %csv_line, "sent");
    Ok(())
}
