//! A one-connection TCP server that plays a fixed script.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts a single client, sends `script` as CRLF lines, half-closes, and
/// collects every line the client sends until it hangs up.
pub struct ScriptedServer {
    port: u16,
    handle: JoinHandle<anyhow::Result<Vec<String>>>,
}

impl ScriptedServer {
    pub async fn spawn(script: &[&str]) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let script: Vec<String> = script.iter().map(|line| format!("{line}\r\n")).collect();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await?;
            let (read, mut write) = stream.into_split();
            for line in &script {
                write.write_all(line.as_bytes()).await?;
            }
            write.shutdown().await?;

            let mut received = Vec::new();
            let mut lines = BufReader::new(read).lines();
            while let Some(line) = lines.next_line().await? {
                received.push(line);
            }
            Ok(received)
        });

        Ok(Self { port, handle })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Lines the client sent, terminators removed.
    pub async fn received(self) -> anyhow::Result<Vec<String>> {
        self.handle.await?
    }
}
