//! Browser lifecycle management
//!
//! Launching and managing the headless Chrome instance behind the
//! chromiumoxide page implementation: executable discovery, stealth launch
//! arguments, the CDP event-handler task, and temp-profile cleanup.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};

use crate::page::CdpPage;

/// User agent presented by launched browsers
///
/// A current desktop Chrome string; headless defaults advertise automation
/// and draw interstitials.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Locate a Chrome/Chromium executable
///
/// `CHROMIUM_PATH` overrides all other methods; otherwise well-known
/// per-platform installation paths are probed in order.
///
/// # Errors
/// Fails when no executable is found. There is no managed download here;
/// install Chrome or point `CHROMIUM_PATH` at one.
pub fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    let candidates = if cfg!(target_os = "windows") {
        vec![
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        vec![
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        vec![
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ]
    };

    for candidate in candidates {
        let path = PathBuf::from(candidate);
        if path.exists() {
            info!("Found browser executable: {}", path.display());
            return Ok(path);
        }
    }

    Err(anyhow!(
        "No Chrome/Chromium executable found. Install Chrome or set CHROMIUM_PATH."
    ))
}

/// Launch a browser with stealth configuration
///
/// Returns `(Browser, JoinHandle, PathBuf)` where the `PathBuf` is the temp
/// profile directory that must be removed after the browser exits. The
/// handler task must be aborted when done; [`BrowserWrapper`] does both
/// automatically.
pub async fn launch_browser() -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    let chrome_path = find_browser_executable()?;

    let user_data_dir =
        std::env::temp_dir().join(format!("serpscrape_chrome_{}", std::process::id()));
    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let browser_config = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path)
        .headless_mode(HeadlessMode::default())
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--disable-extensions")
        .arg("--disable-popup-blocking")
        .arg("--disable-background-networking")
        .arg("--disable-hang-monitor")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--no-sandbox")
        .arg("--metrics-recording-only")
        .arg("--password-store=basic")
        .arg("--mute-audio")
        .build()
        .map_err(|e| anyhow!("Failed to build browser config: {e}"))?;

    info!("Launching browser");
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    // The handler drives all CDP traffic; it must live as long as the
    // browser and be aborted afterwards.
    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::error!("Browser handler error: {:?}", e);
            }
        }
        info!("Browser event handler task completed");
    });

    Ok((browser, handler_task, user_data_dir))
}

/// Wrapper for a [`Browser`] and its event-handler task
///
/// Aborts the handler on drop and removes the temp profile directory if
/// explicit cleanup was skipped.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    /// Reference to the inner browser
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Mutable reference to the inner browser
    pub fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    /// Open a fresh page ready for a search
    pub async fn new_serp_page(&self) -> Result<CdpPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")?;
        Ok(CdpPage::new(page))
    }

    /// Remove the temp profile directory (blocking)
    ///
    /// Must run after the browser process has exited; Chrome holds file
    /// locks until then. Blocking `remove_dir_all` because this is also
    /// called from Drop, where async is unavailable.
    pub fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up temp directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();
        if self.user_data_dir.is_some() {
            warn!("BrowserWrapper dropped without explicit cleanup - removing temp dir in Drop");
            self.cleanup_temp_dir();
        }
    }
}

/// Manager for a shared, lazily launched browser instance
///
/// The browser is not launched on manager creation; the first
/// `get_or_launch` call launches it (seconds), subsequent calls reuse it
/// after a health check, and a failed health check triggers cleanup and
/// relaunch.
#[derive(Clone, Default)]
pub struct BrowserManager {
    browser: Arc<Mutex<Option<BrowserWrapper>>>,
}

impl BrowserManager {
    /// Create a manager with no browser running yet
    #[must_use]
    pub fn new() -> Self {
        Self {
            browser: Arc::new(Mutex::new(None)),
        }
    }

    /// Get or launch the shared browser, with health check and recovery
    pub async fn get_or_launch(&self) -> Result<Arc<Mutex<Option<BrowserWrapper>>>> {
        let mut guard = self.browser.lock().await;

        if let Some(wrapper) = guard.as_ref() {
            match wrapper.browser().version().await {
                Ok(_) => {
                    drop(guard);
                    return Ok(self.browser.clone());
                }
                Err(e) => {
                    warn!("Browser health check failed: {}. Relaunching...", e);
                    if let Some(mut crashed) = guard.take() {
                        // Best-effort; the process may already be gone.
                        let _ = crashed.browser_mut().close().await;
                        let _ = crashed.browser_mut().wait().await;
                        crashed.cleanup_temp_dir();
                    }
                }
            }
        }

        let (browser, handler, user_data_dir) = launch_browser().await?;
        *guard = Some(BrowserWrapper::new(browser, handler, user_data_dir));
        drop(guard);

        Ok(self.browser.clone())
    }

    /// Shut down the browser if running
    ///
    /// Safe to call multiple times; subsequent calls are no-ops.
    pub async fn shutdown(&self) -> Result<()> {
        let mut guard = self.browser.lock().await;

        if let Some(mut wrapper) = guard.take() {
            info!("Shutting down browser");
            if let Err(e) = wrapper.browser_mut().close().await {
                warn!("Failed to close browser cleanly: {}", e);
            }
            if let Err(e) = wrapper.browser_mut().wait().await {
                warn!("Failed to wait for browser exit: {}", e);
            }
            wrapper.cleanup_temp_dir();
        }

        Ok(())
    }
}
