//! Terminal messenger
//!
//! Each line typed is one operator message. A few directives cover what a
//! single line cannot carry:
//!
//! - `/paste` collects every following line until `/end` into one message,
//!   for list-shaped receipts;
//! - `/file <path>` sends the contents of a text file;
//! - `/photo <path>` sends an image file as a receipt photo.

use std::io::BufRead;
use std::path::Path;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use async_trait::async_trait;
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf, Stdout,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{SplitterError, SplitterResult};

use super::ports::{Messenger, OperatorInput};

const PASTE: &str = "/paste";
const PASTE_END: &str = "/end";
const FILE: &str = "/file";
const PHOTO: &str = "/photo";

pub struct ConsoleMessenger<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleMessenger<StdinLines, Stdout> {
    pub fn stdio() -> Self {
        Self::new(StdinLines::spawn(), io::stdout())
    }
}

/// Terminal input read on a detached thread
///
/// Reads on the runtime's blocking pool hold up runtime shutdown until the
/// next line arrives; a detached thread does not.
pub struct StdinLines {
    lines: mpsc::Receiver<std::io::Result<Vec<u8>>>,
    current: Vec<u8>,
    pos: usize,
}

impl StdinLines {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(64);
        std::thread::spawn(move || {
            let mut stdin = std::io::stdin().lock();
            loop {
                let mut line = Vec::new();
                match stdin.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.blocking_send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx.blocking_send(Err(e));
                        break;
                    }
                }
            }
            debug!("stdin reader finished");
        });
        Self::from_channel(rx)
    }

    fn from_channel(lines: mpsc::Receiver<std::io::Result<Vec<u8>>>) -> Self {
        Self {
            lines,
            current: Vec::new(),
            pos: 0,
        }
    }
}

impl AsyncBufRead for StdinLines {
    fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<&[u8]>> {
        let this = self.get_mut();
        while this.pos >= this.current.len() {
            match ready!(this.lines.poll_recv(cx)) {
                Some(Ok(line)) => {
                    this.current = line;
                    this.pos = 0;
                }
                Some(Err(e)) => return Poll::Ready(Err(e)),
                None => return Poll::Ready(Ok(&[])),
            }
        }
        Poll::Ready(Ok(&this.current[this.pos..]))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        let this = self.get_mut();
        this.pos = (this.pos + amt).min(this.current.len());
    }
}

impl AsyncRead for StdinLines {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        out: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let copied = {
            let available = ready!(self.as_mut().poll_fill_buf(cx))?;
            let n = available.len().min(out.remaining());
            out.put_slice(&available[..n]);
            n
        };
        self.consume(copied);
        Poll::Ready(Ok(()))
    }
}

impl<R, W> ConsoleMessenger<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Next line without its line ending; `None` at end of input
    async fn read_line(&mut self) -> SplitterResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| SplitterError::Messenger(format!("failed to read input: {}", e)))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Lines up to `/end`, or to end of input
    async fn read_paste(&mut self) -> SplitterResult<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line().await? {
            if line.trim() == PASTE_END {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    async fn write_text(&mut self, text: &str) -> SplitterResult<()> {
        let write = async {
            self.writer.write_all(text.as_bytes()).await?;
            self.writer.write_all(b"\n\n").await?;
            self.writer.flush().await
        };
        write
            .await
            .map_err(|e| SplitterError::Messenger(format!("failed to write output: {}", e)))
    }
}

/// Split `/file path` style directives
fn directive<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

#[async_trait]
impl<R, W> Messenger for ConsoleMessenger<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn receive_next(&mut self) -> SplitterResult<Option<OperatorInput>> {
        loop {
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let command = line.trim();

            if command == PASTE {
                return Ok(Some(OperatorInput::text(self.read_paste().await?)));
            }

            if let Some(path) = directive(command, FILE) {
                match tokio::fs::read_to_string(Path::new(path)).await {
                    Ok(text) => return Ok(Some(OperatorInput::text(text))),
                    Err(e) => {
                        warn!(path, error = %e, "cannot read receipt file");
                        self.write_text(&format!("Cannot read {}: {}", path, e))
                            .await?;
                        continue;
                    }
                }
            }

            if let Some(path) = directive(command, PHOTO) {
                match tokio::fs::read(Path::new(path)).await {
                    Ok(bytes) => return Ok(Some(OperatorInput::photo(bytes))),
                    Err(e) => {
                        warn!(path, error = %e, "cannot read photo");
                        self.write_text(&format!("Cannot read {}: {}", path, e))
                            .await?;
                        continue;
                    }
                }
            }

            return Ok(Some(OperatorInput::text(line)));
        }
    }

    async fn send(&mut self, text: &str) -> SplitterResult<()> {
        self.write_text(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn console(input: &'static str) -> ConsoleMessenger<&'static [u8], Vec<u8>> {
        ConsoleMessenger::new(input.as_bytes(), Vec::new())
    }

    fn output(console: ConsoleMessenger<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(console.writer).unwrap()
    }

    #[tokio::test]
    async fn test_line_per_message() {
        let mut c = console("Bread 2.00\r\na\n");
        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::text("Bread 2.00"))
        );
        assert_eq!(c.receive_next().await.unwrap(), Some(OperatorInput::text("a")));
        assert_eq!(c.receive_next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_paste_block() {
        let mut c = console("/paste\nBread\nMilk\n2.00\n1.40\n/end\nm\n");
        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::text("Bread\nMilk\n2.00\n1.40"))
        );
        assert_eq!(c.receive_next().await.unwrap(), Some(OperatorInput::text("m")));
    }

    #[tokio::test]
    async fn test_unterminated_paste_ends_at_eof() {
        let mut c = console("/paste\nBread\n2.00");
        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::text("Bread\n2.00"))
        );
        assert_eq!(c.receive_next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_and_photo_directives() {
        let dir = TempDir::new().unwrap();
        let receipt = dir.path().join("receipt.txt");
        let photo = dir.path().join("receipt.jpg");
        std::fs::write(&receipt, "Bread\n2.00\n").unwrap();
        std::fs::write(&photo, [0xff, 0xd8, 0xff]).unwrap();

        let script = format!("/file {}\n/photo {}\n", receipt.display(), photo.display());
        let script: &'static str = Box::leak(script.into_boxed_str());
        let mut c = console(script);

        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::text("Bread\n2.00\n"))
        );
        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::photo(vec![0xff, 0xd8, 0xff]))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_and_skipped() {
        let mut c = console("/file /definitely/not/here.txt\nnext\n");
        assert_eq!(c.receive_next().await.unwrap(), Some(OperatorInput::text("next")));
        assert!(output(c).starts_with("Cannot read /definitely/not/here.txt:"));
    }

    #[tokio::test]
    async fn test_directive_needs_argument() {
        let mut c = console("/filesystem\n");
        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::text("/filesystem"))
        );
    }

    #[tokio::test]
    async fn test_channel_fed_lines() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(Ok(b"/paste\n".to_vec())).await.unwrap();
        tx.send(Ok(b"Bread\n2.00\n".to_vec())).await.unwrap();
        tx.send(Ok(b"/end\n".to_vec())).await.unwrap();
        tx.send(Ok(b"s".to_vec())).await.unwrap();
        drop(tx);

        let mut c = ConsoleMessenger::new(StdinLines::from_channel(rx), Vec::new());
        assert_eq!(
            c.receive_next().await.unwrap(),
            Some(OperatorInput::text("Bread\n2.00"))
        );
        assert_eq!(c.receive_next().await.unwrap(), Some(OperatorInput::text("s")));
        assert_eq!(c.receive_next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_channel_read_error_surfaces() {
        let (tx, rx) = mpsc::channel(1);
        tx.send(Err(std::io::Error::other("tty gone"))).await.unwrap();

        let mut c = ConsoleMessenger::new(StdinLines::from_channel(rx), Vec::new());
        let err = c.receive_next().await.unwrap_err();
        assert!(err.to_string().contains("tty gone"));
    }

    #[tokio::test]
    async fn test_send_separates_messages() {
        let mut c = console("");
        c.send("Hi.").await.unwrap();
        c.send("More receipts?").await.unwrap();
        assert_eq!(output(c), "Hi.\n\nMore receipts?\n\n");
    }
}
