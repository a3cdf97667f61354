//! Regression test parameters and operations

use rastra_core::PixelBuffer;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and report failures only (default)
    #[default]
    Compare,
    /// Also print every compared value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running comparison index and every failure,
/// so one test can check many values and report them together from
/// [`RegParams::cleanup`].
pub struct RegParams {
    /// Name of the test (e.g., "binmorph")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Installs a test logger so `RUST_LOG=debug` shows library diagnostics.
    pub fn new(test_name: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if self.display() {
            eprintln!("  [{}] expected = {}, actual = {}", self.index, expected, actual);
        }

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Record a boolean check as a value comparison
    pub fn compare_true(&mut self, cond: bool) -> bool {
        self.compare_values(1.0, if cond { 1.0 } else { 0.0 }, 0.0)
    }

    /// Compare two buffers for exact equality
    ///
    /// Reports the first differing pixel.
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.index += 1;

        if buf1.width() != buf2.width() || buf1.height() != buf2.height() {
            self.fail(format!(
                "Failure in {}_reg: buffer comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                buf1.width(),
                buf1.height(),
                buf2.width(),
                buf2.height()
            ));
            return false;
        }

        for y in 0..buf1.height() {
            for x in 0..buf1.width() {
                let p1 = buf1.get_pixel_unchecked(x, y);
                let p2 = buf2.get_pixel_unchecked(x, y);
                if p1 != p2 {
                    self.fail(format!(
                        "Failure in {}_reg: buffer comparison for index {} - pixel mismatch \
                         at ({}, {}): {:?} vs {:?}",
                        self.test_name, self.index, x, y, p1, p2
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Compare two byte arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
