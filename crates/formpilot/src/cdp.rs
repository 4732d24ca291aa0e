//! Chromium backend over the DevTools protocol.
//!
//! The driver attaches to a browser that is already running and already
//! logged in; launching and authenticating are left to the caller. Element
//! operations are evaluated in the page as small scripts built from the
//! strategy queries in [`crate::locator`].

use async_trait::async_trait;
use chromiumoxide::browser::Browser as CdpBrowser;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::driver::{DriverConfig, ElementState, UiDriver};
use crate::locator::ResolvedLocator;
use crate::result::{FormError, FormResult};

const ELEMENT_STATE_JS: &str = "e => ({ \
    tag_name: e.tagName.toLowerCase(), \
    text: e.textContent, \
    value: e.tagName === 'SELECT' \
        ? (e.selectedIndex >= 0 ? e.options[e.selectedIndex].text.trim() : '') \
        : ('value' in e ? String(e.value) : null), \
    visible: !!(e.offsetWidth || e.offsetHeight || e.getClientRects().length), \
    enabled: !e.disabled })";

const PENDING_JS: &str = "(window.jQuery ? window.jQuery.active : 0) \
    + (document.readyState === 'complete' ? 0 : 1)";

/// Driver attached to Chromium over CDP
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    handle: tokio::task::JoinHandle<()>,
    request_timeout: Duration,
}

impl ChromiumDriver {
    /// Attach to the browser at `config.devtools_url`.
    ///
    /// Uses the first tab whose URL contains `config.tab_url_contains`, or
    /// the first tab when no filter is set, opening a blank one if needed.
    pub async fn attach(config: &DriverConfig) -> FormResult<Self> {
        let url = config
            .devtools_url
            .as_deref()
            .ok_or_else(|| FormError::config("driver.devtools_url is required to attach to a browser"))?;

        let (browser, mut handler) = CdpBrowser::connect(url)
            .await
            .map_err(|e| FormError::driver(format!("cannot attach to {url}: {e}")))?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = Self::pick_page(&browser, config.tab_url_contains.as_deref()).await?;
        info!(devtools = url, "attached to browser");

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            handle,
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }

    async fn pick_page(browser: &CdpBrowser, fragment: Option<&str>) -> FormResult<CdpPage> {
        let pages = browser
            .pages()
            .await
            .map_err(|e| FormError::driver(format!("cannot list tabs: {e}")))?;
        for page in pages {
            let url = page.url().await.ok().flatten().unwrap_or_default();
            if fragment.map_or(true, |f| url.contains(f)) {
                debug!(%url, "using tab");
                return Ok(page);
            }
        }
        if let Some(fragment) = fragment {
            return Err(FormError::driver(format!("no open tab matches '{fragment}'")));
        }
        browser
            .new_page("about:blank")
            .await
            .map_err(|e| FormError::driver(format!("cannot open tab: {e}")))
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> FormResult<T> {
        let page = self.page.lock().await;
        let result = tokio::time::timeout(self.request_timeout, page.evaluate(script))
            .await
            .map_err(|_| FormError::driver("browser did not answer in time"))?
            .map_err(|e| FormError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| FormError::driver(format!("unexpected script result: {e}")))
    }

    /// Run `body` against the first match, which is bound to `e`.
    /// Fails if nothing matches.
    async fn with_first<T: DeserializeOwned>(&self, locator: &ResolvedLocator, body: &str) -> FormResult<T> {
        let script = format!(
            "(() => {{ const e = ({})[0]; if (!e) return {{ found: false }}; \
             return {{ found: true, value: (() => {{ {body} }})() }}; }})()",
            locator.to_query()
        );
        let outcome: FirstMatch<T> = self.eval(script).await?;
        match outcome {
            FirstMatch {
                found: true,
                value: Some(value),
            } => Ok(value),
            FirstMatch { found: true, .. } => Err(FormError::driver(format!("{locator}: script returned nothing"))),
            FirstMatch { found: false, .. } => Err(FormError::driver(format!("no element matches {locator}"))),
        }
    }
}

#[derive(serde::Deserialize)]
struct FirstMatch<T> {
    found: bool,
    value: Option<T>,
}

fn js_string(value: &str) -> FormResult<String> {
    Ok(serde_json::to_string(value)?)
}

#[async_trait]
impl UiDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> FormResult<()> {
        let page = self.page.lock().await;
        let _ = page.goto(url).await.map_err(|e| FormError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn current_url(&self) -> FormResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(|e| FormError::driver(e.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn find(&self, locator: &ResolvedLocator) -> FormResult<Vec<ElementState>> {
        self.eval(format!("({}).map({ELEMENT_STATE_JS})", locator.to_query()))
            .await
    }

    async fn click(&self, locator: &ResolvedLocator) -> FormResult<()> {
        let _: bool = self
            .with_first(locator, "e.scrollIntoView({block: 'center'}); e.click(); return true;")
            .await?;
        Ok(())
    }

    async fn options(&self, locator: &ResolvedLocator) -> FormResult<Vec<String>> {
        self.with_first(locator, "return Array.from(e.options || []).map(o => o.text.trim());")
            .await
    }

    async fn select_option(&self, locator: &ResolvedLocator, value: &str) -> FormResult<()> {
        let body = format!(
            "const o = Array.from(e.options || []).find(o => o.text.trim() === {}); \
             if (!o) return false; e.value = o.value; \
             e.dispatchEvent(new Event('change', {{bubbles: true}})); \
             if (window.jQuery) window.jQuery(e).trigger('change'); return true;",
            js_string(value)?
        );
        let chosen: bool = self.with_first(locator, &body).await?;
        if chosen {
            Ok(())
        } else {
            Err(FormError::driver(format!("{locator} has no option '{value}'")))
        }
    }

    async fn clear(&self, locator: &ResolvedLocator) -> FormResult<()> {
        let _: bool = self
            .with_first(
                locator,
                "e.focus(); e.value = ''; e.dispatchEvent(new Event('input', {bubbles: true})); return true;",
            )
            .await?;
        Ok(())
    }

    async fn type_text(&self, locator: &ResolvedLocator, text: &str) -> FormResult<()> {
        let body = format!(
            "e.focus(); e.value += {}; \
             e.dispatchEvent(new Event('input', {{bubbles: true}})); \
             e.dispatchEvent(new Event('change', {{bubbles: true}})); return true;",
            js_string(text)?
        );
        let _: bool = self.with_first(locator, &body).await?;
        Ok(())
    }

    async fn pending_requests(&self) -> FormResult<usize> {
        self.eval(PENDING_JS.to_string()).await
    }

    async fn arm_dialog(&self, accept: bool) -> FormResult<()> {
        let _: bool = self
            .eval(format!("(() => {{ window.confirm = () => {accept}; return true; }})()"))
            .await?;
        Ok(())
    }

    /// Detach; the browser itself keeps running
    async fn close(&self) -> FormResult<()> {
        let _browser = self.browser.lock().await;
        self.handle.abort();
        info!("detached from browser");
        Ok(())
    }
}
