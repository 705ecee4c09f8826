use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Responses always use the non-persistent protocol version.
const HTTP_VERSION: &str = "HTTP/1.0";

/// Serializes the status line, headers and blank separator line.
pub fn serialize_head(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(128);

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(b"\r\n");

    buf.freeze()
}

/// Writes a serialized response to a stream.
///
/// The body is sent as-is after the head, without being copied into the
/// header buffer.
#[derive(Debug)]
pub struct ResponseWriter {
    head: Bytes,
    body: Bytes,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            head: serialize_head(response),
            body: response.body.clone(),
        }
    }

    /// Total number of bytes still to be written.
    pub fn remaining(&self) -> usize {
        self.head.remaining() + self.body.remaining()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        for chunk in [&mut self.head, &mut self.body] {
            while chunk.has_remaining() {
                let n = stream.write(chunk.chunk()).await?;

                if n == 0 {
                    return Err(anyhow::anyhow!("connection closed while writing"));
                }

                chunk.advance(n);
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
