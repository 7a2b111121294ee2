use std::io::Write;

/// Abstract the host environment to enable testing
pub trait Host: Send + Sync {
    // where to send measurements and command output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send error output (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// Terminate the process (although in a test environment this might just set a flag and return).
    fn exit(&mut self, code: i32);
}

/// Test host that captures output to in-memory buffers
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
