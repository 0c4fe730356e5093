//! Streaming access to a conversion result.
//!
//! [`Client::dump`] hands back the response body chunk by chunk instead of
//! buffering it, for callers piping large workbooks somewhere else. Unlike
//! the buffered entry points, a transport failure can arrive mid-stream after
//! some chunks were already yielded.

use crate::client::Client;
use crate::error::PdfTablesError;
use crate::format::OutputFormat;
use crate::input::ConversionInput;
use bytes::Bytes;
use futures::stream::StreamExt;
use std::pin::Pin;
use tokio_stream::Stream;

/// A boxed stream of response body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, PdfTablesError>> + Send>>;

impl Client {
    /// Convert and stream the response body.
    ///
    /// # Returns
    /// - `Ok(ByteStream)` once the service answered with a success status
    /// - `Err(PdfTablesError)` for input, transport or rejection errors
    pub async fn dump(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
    ) -> Result<ByteStream, PdfTablesError> {
        let url = self.format_url(format);
        let response = self.send(input.into(), format).await?;
        let stream = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| PdfTablesError::from_transport(&url, e)));
        Ok(Box::pin(stream))
    }
}

/// Drain a [`ByteStream`] into one buffer.
pub async fn collect_bytes(mut stream: ByteStream) -> Result<Vec<u8>, PdfTablesError> {
    let mut out = Vec::new();
    while let Some(chunk) = stream.next().await {
        out.extend_from_slice(&chunk?);
    }
    Ok(out)
}
