// ABOUTME: Page abstraction over the browser-automation capabilities we consume
// ABOUTME: ChromePage drives a real Chrome tab; tests substitute a scripted fake

use crate::{Error, Result};
use headless_chrome::{Element, Tab};
use std::sync::Arc;
use std::time::{Duration, Instant};

const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const ELEMENT_WAIT: Duration = Duration::from_secs(5);

/// The browser capabilities the exporter and login flow need. Kept narrow
/// so the export pipeline can run against a scripted fake in tests.
pub trait Page {
    fn goto(&self, url: &str) -> Result<()>;

    /// Fill a form field located by CSS selector.
    fn fill(&self, selector: &str, text: &str) -> Result<()>;

    /// Click a button whose text contains `label`. Ok(false) when no such
    /// button exists on the page; transient click failures are errors.
    fn click_button(&self, label: &str) -> Result<bool>;

    fn hover_menu_item(&self, label: &str) -> Result<()>;

    fn click_menu_item(&self, label: &str) -> Result<()>;

    fn clear_clipboard(&self) -> Result<()>;

    fn read_clipboard(&self) -> Result<String>;
}

pub struct ChromePage {
    tab: Arc<Tab>,
    action_delay: Option<Duration>,
}

impl ChromePage {
    pub fn new(tab: Arc<Tab>, action_delay: Option<Duration>) -> Self {
        ChromePage { tab, action_delay }
    }

    fn pace(&self) {
        if let Some(delay) = self.action_delay {
            std::thread::sleep(delay);
        }
    }

    // CDP has no :has-text() selector, so text matches go through XPath
    // with a bounded poll for the element to appear.
    fn find_by_xpath(&self, xpath: &str, timeout: Duration) -> Option<Element<'_>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.tab.find_element_by_xpath(xpath) {
                return Some(element);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(ELEMENT_POLL_INTERVAL);
        }
    }

    fn evaluate_string(&self, expression: &str) -> Result<String> {
        let result = self
            .tab
            .evaluate(expression, true)
            .map_err(|e| Error::Browser(format!("evaluate {:?} failed: {}", expression, e)))?;

        match result.value {
            Some(serde_json::Value::String(s)) => Ok(s),
            _ => Ok(String::new()),
        }
    }
}

impl Page for ChromePage {
    fn goto(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::Browser(format!("navigation to {} failed: {}", url, e)))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::Browser(format!("navigation to {} did not settle: {}", url, e)))?;
        self.pace();
        Ok(())
    }

    fn fill(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .tab
            .wait_for_element(selector)
            .map_err(|e| Error::Browser(format!("no element matching {}: {}", selector, e)))?;
        element
            .click()
            .and_then(|el| el.type_into(text))
            .map_err(|e| Error::Browser(format!("typing into {} failed: {}", selector, e)))?;
        self.pace();
        Ok(())
    }

    fn click_button(&self, label: &str) -> Result<bool> {
        let xpath = format!("//button[contains(., '{}')]", label);
        match self.find_by_xpath(&xpath, ELEMENT_WAIT) {
            Some(element) => {
                element
                    .click()
                    .map_err(|e| Error::Browser(format!("clicking '{}' failed: {}", label, e)))?;
                self.pace();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn hover_menu_item(&self, label: &str) -> Result<()> {
        let xpath = format!(
            "//div[contains(@class, 'parts-menu-label') and contains(., '{}')]",
            label
        );
        let element = self
            .find_by_xpath(&xpath, ELEMENT_WAIT)
            .ok_or_else(|| Error::Browser(format!("menu item '{}' not found", label)))?;
        element
            .move_mouse_over()
            .map_err(|e| Error::Browser(format!("hovering '{}' failed: {}", label, e)))?;
        self.pace();
        Ok(())
    }

    fn click_menu_item(&self, label: &str) -> Result<()> {
        let xpath = format!(
            "//div[contains(@class, 'parts-menu-label') and contains(., '{}')]",
            label
        );
        let element = self
            .find_by_xpath(&xpath, ELEMENT_WAIT)
            .ok_or_else(|| Error::Browser(format!("menu item '{}' not found", label)))?;
        element
            .click()
            .map_err(|e| Error::Browser(format!("clicking '{}' failed: {}", label, e)))?;
        self.pace();
        Ok(())
    }

    fn clear_clipboard(&self) -> Result<()> {
        self.evaluate_string("navigator.clipboard.writeText('')")?;
        Ok(())
    }

    fn read_clipboard(&self) -> Result<String> {
        self.evaluate_string("navigator.clipboard.readText()")
    }
}
