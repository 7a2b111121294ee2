use bytes::Bytes;

/// Response body of a report request, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    body: Bytes,
}

impl RawDocument {
    #[must_use]
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<Bytes> for RawDocument {
    fn from(body: Bytes) -> Self {
        Self::new(body)
    }
}

impl From<Vec<u8>> for RawDocument {
    fn from(body: Vec<u8>) -> Self {
        Self::new(body)
    }
}

impl From<String> for RawDocument {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}

impl From<&'static str> for RawDocument {
    fn from(body: &'static str) -> Self {
        Self::new(body)
    }
}
