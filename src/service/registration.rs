//! Registration form spreadsheet lookup.
//!
//! Responses to the membership registration form land in a Google Sheet. The bot
//! reads the configured range with an API key and matches intro authors against
//! it by Discord username.

use serde::Deserialize;

use crate::{config::RegistrationSheetConfig, error::AppError};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Linked from verification requests when no spreadsheet is configured.
pub const SHEETS_HOME: &str = "https://docs.google.com/spreadsheets";

/// Body of a `spreadsheets.values.get` response. Empty ranges omit `values`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Clone)]
pub struct RegistrationSheet {
    http_client: reqwest::Client,
    config: RegistrationSheetConfig,
}

impl RegistrationSheet {
    pub fn new(http_client: reqwest::Client, config: RegistrationSheetConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Link to the spreadsheet for committee members doing a manual check.
    pub fn url(&self) -> String {
        spreadsheet_url(&self.config.sheet_id)
    }

    /// Fetches every row in the configured range, header row included.
    ///
    /// # Returns
    /// - `Ok(Vec<Vec<String>>)` - Rows as returned by the Sheets API
    /// - `Err(AppError::ReqwestErr)` - Request failed or returned a non-success status
    pub async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, AppError> {
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_API_BASE, self.config.sheet_id, self.config.range
        );

        let range = self
            .http_client
            .get(url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<ValueRange>()
            .await?;

        Ok(range.values)
    }
}

pub fn spreadsheet_url(sheet_id: &str) -> String {
    format!("{}/d/{}", SHEETS_HOME, sheet_id)
}
