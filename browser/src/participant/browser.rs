use super::MeetParticipant;
use crate::{
    create_browser,
    driver::chromium::ChromiumDriver,
};
use chromiumoxide::{
    cdp::browser_protocol::target::CreateTargetParams,
    error::CdpError,
    Browser,
    Handler,
    Page,
};
use derive_more::{
    Debug,
    Deref,
};
use eyre::{
    bail,
    Context as _,
    ContextCompat as _,
    Result,
};
use futures::StreamExt as _;
use meet_ui_config::{
    BrowserConfig,
    ParticipantConfig,
};
use tokio::task::JoinHandle;

/// A participant backed by its own Chromium process.
///
/// Dereferences to the [`MeetParticipant`] driving its page.
#[derive(Debug, Deref)]
pub struct BrowserParticipant {
    #[deref]
    participant: MeetParticipant<ChromiumDriver>,
    #[debug(skip)]
    browser: Browser,
    browser_event_task_handle: JoinHandle<()>,
    // Owns the temporary profile directory for as long as the browser runs.
    #[debug(skip)]
    _browser_config: BrowserConfig,
}

impl BrowserParticipant {
    /// Starts a browser, opens the room and waits until the conference
    /// reports the participant as joined.
    #[instrument(level = "debug", skip_all, fields(name = %config.display_name))]
    pub async fn launch(config: ParticipantConfig) -> Result<Self> {
        let browser_config = BrowserConfig::try_from(&config).context("failed to prepare the browser profile")?;
        let (mut browser, handler) = create_browser(&browser_config).await?;
        let browser_event_task_handle = drive_browser_events(config.display_name.clone(), handler);

        let page = match create_page(&config, &mut browser).await {
            Ok(page) => page,
            Err(err) => {
                kill(&mut browser).await;
                return Err(err);
            }
        };

        let participant = MeetParticipant::new(
            config.display_name.clone(),
            ChromiumDriver::new(page),
            config.app_config.timeouts,
        );

        if let Err(err) = participant.wait_to_join().await {
            error!(config.display_name, "Failed joining the conference: {err}");
            kill(&mut browser).await;
            return Err(err);
        }

        Ok(Self {
            participant,
            browser,
            browser_event_task_handle,
            _browser_config: browser_config,
        })
    }

    pub async fn close(mut self) -> Result<()> {
        let name = self.participant.name().to_string();
        debug!(name, "Closing the browser...");

        if let Err(err) = self.participant.driver().page().clone().close().await {
            error!(name, "Error closing page: {err}");
        }

        self.browser.close().await.context("failed to close the browser")?;
        self.browser.wait().await.context("failed to wait for the browser to exit")?;
        self.browser_event_task_handle.await?;

        info!(name, "Closed the browser");
        Ok(())
    }
}

/// Pumps CDP events until the connection to the browser goes away.
fn drive_browser_events(name: String, mut handler: Handler) -> JoinHandle<()> {
    tokio::task::spawn(async move {
        while let Some(event) = handler.next().await {
            match event {
                Ok(()) => {}
                Err(CdpError::Ws(err)) => {
                    warn!(name, "Lost the connection to the browser: {err}");
                    break;
                }
                Err(err) => debug!(name, "Ignoring browser event error: {err}"),
            }
        }
        debug!(name, "Browser event handler stopped");
    })
}

async fn create_page(config: &ParticipantConfig, browser: &mut Browser) -> Result<Page> {
    let join_url = config.join_url().to_string();

    let page = if let Ok(Some(page)) = browser
        .pages()
        .await
        .context("failed to get pages")
        .map(|pages| pages.into_iter().next())
    {
        page.goto(join_url.as_str())
            .await
            .context("failed to navigate to the room")?;
        page
    } else {
        browser
            .new_page(
                CreateTargetParams::builder()
                    .url(join_url.as_str())
                    .build()
                    .map_err(|e| eyre::eyre!(e))?,
            )
            .await
            .context("failed to create new page")?
    };

    let navigation = page
        .wait_for_navigation_response()
        .await
        .context("Page could not navigate to the room")?
        .with_context(|| {
            format!(
                "{}: No request returned when creating a page for {}",
                config.display_name, config.room_url,
            )
        })?;

    if let Some(text) = &navigation.failure_text {
        bail!(
            "{}: When creating a new page request got a failure: {}",
            config.display_name,
            text
        );
    }

    debug!(config.display_name, "Created a new page for {}", config.room_url);

    Ok(page)
}

async fn kill(browser: &mut Browser) {
    match browser.kill().await {
        Some(Ok(_)) => debug!("browser killed"),
        Some(Err(err)) => error!("failed to kill browser: {err}"),
        None => debug!("browser process not found"),
    }
}
