//! Browser launching
//!
//! Thin wrapper over the `open` crate. URLs are validated before anything
//! is shelled out, multi-open runs sequentially with a configurable delay
//! between launches, and every outcome is reported back to the caller.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Outcome of a multi-open run
#[derive(Debug, Default)]
pub struct LaunchReport {
    /// Successfully launched URLs
    pub opened: usize,

    /// (url, reason) for every launch that failed
    pub failures: Vec<(String, String)>,
}

impl LaunchReport {
    /// Total number of launch attempts
    pub fn attempted(&self) -> usize {
        self.opened + self.failures.len()
    }
}

/// Opens URLs in the user's browser
pub struct Launcher {
    browser: Option<String>,
    delay: Duration,
}

impl Launcher {
    /// Creates a launcher with an optional browser command and inter-open delay
    pub fn new(browser: Option<String>, delay_ms: u64) -> Self {
        Self {
            browser,
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Opens one URL, validating it first
    pub fn open_url(&self, url: &str) -> Result<()> {
        validate(url)?;

        match &self.browser {
            Some(browser) => open::with(url, browser)
                .with_context(|| format!("failed to open {url} with {browser}")),
            None => open::that(url).with_context(|| format!("failed to open {url}")),
        }
    }

    /// Opens URLs one by one, sleeping between launches
    pub fn open_all<'a, I>(&self, urls: I) -> LaunchReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = LaunchReport::default();

        for (i, url) in urls.into_iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            match self.open_url(url) {
                Ok(()) => report.opened += 1,
                Err(err) => report.failures.push((url.to_string(), format!("{err:#}"))),
            }
        }

        report
    }
}

/// Refuses anything that is not a well-formed http(s) URL with a host
fn validate(url: &str) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("not a valid URL: {url}"))?;

    anyhow::ensure!(
        matches!(parsed.scheme(), "http" | "https"),
        "refusing to open non-http(s) URL: {url}"
    );
    anyhow::ensure!(
        parsed.host_str().is_some_and(|h| !h.is_empty()),
        "refusing to open URL without a host: {url}"
    );

    Ok(())
}
