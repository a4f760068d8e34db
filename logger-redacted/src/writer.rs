use crate::redactor::PiiRedactor;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// `MakeWriter` wrapper that redacts every formatted line before it is
/// written to the inner writer.
#[derive(Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
    redactor: Arc<PiiRedactor>,
    enabled: bool,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M, redactor: Arc<PiiRedactor>) -> Self {
        Self {
            inner,
            redactor,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            redactor: Arc::clone(&self.redactor),
            enabled: self.enabled,
        }
    }
}

/// Writer produced by [`RedactingMakeWriter`]
pub struct RedactingWriter<W> {
    inner: W,
    redactor: Arc<PiiRedactor>,
    enabled: bool,
}

impl<W> RedactingWriter<W> {
    pub fn new(inner: W, redactor: Arc<PiiRedactor>) -> Self {
        Self {
            inner,
            redactor,
            enabled: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.enabled {
            return self.inner.write(buf);
        }

        // The fmt layer hands over one complete event per call.
        let text = String::from_utf8_lossy(buf);
        let redacted = self.redactor.redact(&text);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redactor::RedactionConfig;
    use std::io::Write;

    fn masking() -> Arc<PiiRedactor> {
        Arc::new(PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        }))
    }

    #[test]
    fn test_writer_redacts_before_forwarding() {
        let mut writer = RedactingWriter::new(Vec::new(), masking());
        writer
            .write_all(b"discharged MRN778812, contact jane@example.org\n")
            .unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "discharged MRN[REDACTED], contact j***@e***\n");
    }

    #[test]
    fn test_disabled_make_writer_passes_through() {
        let make = RedactingMakeWriter::new(|| Vec::<u8>::new(), masking()).with_enabled(false);
        let mut writer = make.make_writer();
        let written = writer.write(b"MRN778812").unwrap();
        assert_eq!(written, 9);
        assert_eq!(writer.into_inner(), b"MRN778812".to_vec());
    }
}
