// ABOUTME: Browser session bootstrap and scripted login flow
// ABOUTME: One visible browser per run with a manual confirmation checkpoint

use crate::browser::{ChromePage, Page};
use crate::config::Config;
use crate::{Error, Result};
use dialoguer::Confirm;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;

const PAGE_TRANSITION_DELAY: Duration = Duration::from_secs(1);
const SLOW_MO_DELAY: Duration = Duration::from_millis(1500);
// The manual login checkpoint can take a while; don't let the CDP
// connection idle out underneath it.
const IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

pub struct Session {
    // Dropping the browser closes every tab, so it must outlive the page
    _browser: Browser,
    page: ChromePage,
}

impl Session {
    /// Launch one visible browser for the whole run. The window stays
    /// visible because the login flow needs a human at the keyboard.
    pub fn launch(config: &Config) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(false)
            .idle_browser_timeout(IDLE_TIMEOUT)
            .build()
            .map_err(|e| Error::Browser(format!("invalid launch options: {}", e)))?;

        let browser = Browser::new(options)
            .map_err(|e| Error::Browser(format!("failed to launch browser: {}", e)))?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::Browser(format!("failed to open tab: {}", e)))?;

        let action_delay = if config.slow_mo {
            Some(SLOW_MO_DELAY)
        } else {
            None
        };

        Ok(Session {
            _browser: browser,
            page: ChromePage::new(tab, action_delay),
        })
    }

    pub fn page(&self) -> &ChromePage {
        &self.page
    }

    /// Scripted login against the identity provider, ending in a manual
    /// checkpoint: fully automated login is not reliable against its UI.
    pub fn login(&self, config: &Config) -> Result<()> {
        let email = config
            .email
            .as_deref()
            .ok_or_else(|| Error::Config("email not set".into()))?;
        let password = config
            .password
            .as_deref()
            .ok_or_else(|| Error::Config("password not set".into()))?;

        println!("Logging in to {}...", config.domain);
        self.page.goto(&config.domain)?;

        self.page.fill(r#"input[name="email"]"#, email)?;
        self.page.click_button("Continue")?;

        // Allow the password page to load
        std::thread::sleep(PAGE_TRANSITION_DELAY);

        self.page.fill(r#"input[type="password"]"#, password)?;
        self.page.click_button("Next")?;

        let confirmed = Confirm::new()
            .with_prompt("Complete any remaining login steps in the browser window, then confirm")
            .default(true)
            .interact()
            .map_err(|e| {
                Error::Filesystem(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("confirmation prompt failed: {}", e),
                ))
            })?;

        if !confirmed {
            return Err(Error::Auth("login not confirmed by operator".into()));
        }
        Ok(())
    }
}
