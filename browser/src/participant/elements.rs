use super::MeetParticipant;
use crate::{
    driver::{
        Driver,
        DriverElement as _,
    },
    locator::Locator,
};
use eyre::Result;
use std::time::Duration;

impl<D: Driver> MeetParticipant<D> {
    /// First element matching `locator` right now, if any.
    pub async fn find_first(&self, locator: &Locator) -> Result<Option<D::Element>> {
        Ok(self.driver.find_elements(locator).await?.into_iter().next())
    }

    pub async fn is_present(&self, locator: &Locator) -> Result<bool> {
        Ok(!self.driver.find_elements(locator).await?.is_empty())
    }

    /// First displayed element matching `locator`, if any.
    pub async fn find_displayed(&self, locator: &Locator) -> Result<Option<D::Element>> {
        for element in self.driver.find_elements(locator).await? {
            if element.is_displayed().await? {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }

    /// `true` when no element matching `locator` is displayed.
    pub async fn is_absent_or_hidden(&self, locator: &Locator) -> Result<bool> {
        Ok(self.find_displayed(locator).await?.is_none())
    }

    /// Waits for an element to be present, displayed or not.
    pub async fn wait_for_element(&self, locator: &Locator, timeout: Duration, what: &str) -> Result<D::Element> {
        self.waiter
            .poll(timeout, || self.find_first(locator))
            .await?
            .ok_or_else(|| self.timeout_error(format!("{what} to be present"), locator, timeout))
    }

    /// Waits for an element to be present and displayed.
    pub async fn wait_for_displayed(&self, locator: &Locator, timeout: Duration, what: &str) -> Result<D::Element> {
        self.waiter
            .poll(timeout, || self.find_displayed(locator))
            .await?
            .ok_or_else(|| self.timeout_error(format!("{what} to be displayed"), locator, timeout))
    }

    /// Waits until nothing matching `locator` is displayed any more.
    pub async fn wait_for_absent_or_hidden(&self, locator: &Locator, timeout: Duration, what: &str) -> Result<()> {
        let outcome = self
            .waiter
            .until(timeout, || self.is_absent_or_hidden(locator))
            .await?;

        if !outcome.is_satisfied() {
            return Err(self.timeout_error(format!("{what} to be hidden"), locator, timeout));
        }
        Ok(())
    }

    pub async fn wait_for_display_to_be(
        &self,
        locator: &Locator,
        timeout: Duration,
        displayed: bool,
        what: &str,
    ) -> Result<()> {
        if displayed {
            self.wait_for_displayed(locator, timeout, what).await.map(drop)
        } else {
            self.wait_for_absent_or_hidden(locator, timeout, what).await
        }
    }

    /// Presence check: not finding the element in time is a `false`, not an error.
    pub async fn is_present_within(&self, locator: &Locator, timeout: Duration) -> Result<bool> {
        Ok(self
            .waiter
            .until(timeout, || self.is_present(locator))
            .await?
            .is_satisfied())
    }

    /// Waits for the element to be displayed and clicks it.
    pub async fn click_on_element(&self, locator: &Locator, timeout: Duration, what: &str) -> Result<()> {
        let element = self.wait_for_displayed(locator, timeout, what).await?;
        element.click().await?;
        debug!(self.name, "Clicked {what}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        locator::Locator,
        participant::MeetParticipant,
        testing::{
            FakeDriver,
            FakeNode,
        },
        wait::TimeoutError,
    };
    use meet_ui_config::Timeouts;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::Instant;

    fn participant(driver: &FakeDriver) -> MeetParticipant<FakeDriver> {
        MeetParticipant::new("host", driver.clone(), Timeouts::default())
    }

    #[tokio::test(start_paused = true)]
    async fn hidden_elements_are_not_clickable() {
        let driver = FakeDriver::default();
        let button = Locator::test_id("go");
        driver.dom().add(FakeNode::new(button.clone()).hidden());

        let err = participant(&driver)
            .click_on_element(&button, Duration::from_secs(1), "go button")
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<TimeoutError>().is_some());
        assert!(driver.dom().clicks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn late_elements_are_waited_for() {
        let driver = FakeDriver::default();
        let button = Locator::test_id("go");
        driver
            .dom()
            .add(FakeNode::new(button.clone()).appearing_at(Instant::now() + Duration::from_millis(1_500)));

        participant(&driver)
            .click_on_element(&button, Duration::from_secs(2), "go button")
            .await
            .unwrap();

        assert_eq!(driver.dom().clicks(), vec![button]);
    }

    #[tokio::test(start_paused = true)]
    async fn presence_check_reports_absence_as_false() {
        let driver = FakeDriver::default();
        let start = Instant::now();

        let present = participant(&driver)
            .is_present_within(&Locator::class_name("nowhere"), Duration::from_secs(3))
            .await
            .unwrap();

        assert!(!present);
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn driver_failures_are_not_mistaken_for_absence() {
        let driver = FakeDriver::default();
        driver.dom().fail_with("invalid session id");

        let err = participant(&driver)
            .is_present_within(&Locator::class_name("nowhere"), Duration::from_secs(3))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid session id");
        assert!(err.downcast_ref::<TimeoutError>().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_for_hidden_succeeds_once_the_element_goes_away() {
        let driver = FakeDriver::default();
        let toast = Locator::class_name("toast");
        driver
            .dom()
            .add(FakeNode::new(toast.clone()).removed_at(Instant::now() + Duration::from_secs(1)));

        participant(&driver)
            .wait_for_display_to_be(&toast, Duration::from_secs(2), false, "toast")
            .await
            .unwrap();
    }
}
